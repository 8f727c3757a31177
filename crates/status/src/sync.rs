//! Top-level sync conditions of a propagated-work document.

use crate::document::{self, WorkDocument, parse_timestamp};
use crate::types::SyncSummary;

/// Condition type reporting the payload was applied.
pub const APPLIED_CONDITION: &str = "Applied";
/// Condition type reporting the payload is available.
pub const AVAILABLE_CONDITION: &str = "Available";

/// Parse the sync summary of one propagated-work document.
///
/// Unparsable timestamps are skipped; only a structurally invalid document
/// is an error.
///
/// # Errors
///
/// Returns the decode error if `raw` is not a valid document.
pub fn parse_sync_summary(raw: &str) -> serde_json::Result<SyncSummary> {
    let doc: WorkDocument = document::decode(raw)?;
    let mut summary = SyncSummary {
        name: doc.metadata.name,
        ..SyncSummary::default()
    };

    for condition in &doc.status.conditions {
        match condition.condition_type.as_str() {
            APPLIED_CONDITION => summary.applied = condition.status == "True",
            AVAILABLE_CONDITION => summary.available = condition.status == "True",
            _ => {}
        }
    }

    summary.last_sync_time = doc
        .status
        .conditions
        .iter()
        .filter_map(|c| parse_timestamp(&c.last_transition_time))
        .max();

    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_applied_and_available() {
        let raw = r#"{
            "metadata": {"name": "manifest_work-abc"},
            "status": {"conditions": [
                {"type": "Applied", "status": "True", "lastTransitionTime": "2026-01-10T10:00:00Z"},
                {"type": "Available", "status": "True", "lastTransitionTime": "2026-01-10T10:05:00Z"}
            ]}
        }"#;

        let summary = parse_sync_summary(raw).unwrap();
        assert_eq!(summary.name, "manifest_work-abc");
        assert!(summary.applied);
        assert!(summary.available);
        assert_eq!(
            summary.last_sync_time,
            Some(Utc.with_ymd_and_hms(2026, 1, 10, 10, 5, 0).unwrap())
        );
    }

    #[test]
    fn test_status_must_be_exactly_true() {
        let raw = r#"{"status": {"conditions": [
            {"type": "Applied", "status": "False"},
            {"type": "Available", "status": "true"}
        ]}}"#;

        let summary = parse_sync_summary(raw).unwrap();
        assert!(!summary.applied);
        assert!(!summary.available);
    }

    #[test]
    fn test_condition_type_is_case_sensitive() {
        let raw = r#"{"status": {"conditions": [{"type": "applied", "status": "True"}]}}"#;
        assert!(!parse_sync_summary(raw).unwrap().applied);
    }

    #[test]
    fn test_other_conditions_count_for_timestamp() {
        let raw = r#"{"status": {"conditions": [
            {"type": "Applied", "status": "True", "lastTransitionTime": "2026-01-10T10:00:00Z"},
            {"type": "Progressing", "status": "False", "lastTransitionTime": "2026-02-01T00:00:00Z"}
        ]}}"#;

        let summary = parse_sync_summary(raw).unwrap();
        assert_eq!(
            summary.last_sync_time,
            Some(Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_unparsable_timestamps_are_skipped() {
        let raw = r#"{"status": {"conditions": [
            {"type": "Applied", "status": "True", "lastTransitionTime": "yesterday"},
            {"type": "Available", "status": "True", "lastTransitionTime": "2026-01-10T10:00:00+02:00"}
        ]}}"#;

        let summary = parse_sync_summary(raw).unwrap();
        assert_eq!(
            summary.last_sync_time,
            Some(Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_no_timestamps_is_none() {
        let raw = r#"{"status": {"conditions": [{"type": "Applied", "status": "True"}]}}"#;
        assert_eq!(parse_sync_summary(raw).unwrap().last_sync_time, None);
    }

    #[test]
    fn test_empty_document() {
        let summary = parse_sync_summary("{}").unwrap();
        assert_eq!(summary, SyncSummary::default());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(parse_sync_summary("{\"status\": ").is_err());
    }
}
