//! Standalone certificate resources.

use crate::document::{self, CertificateDocument, parse_timestamp};
use crate::types::{CertificateReadiness, CertificateStatus};

/// Condition type reporting certificate readiness.
pub const READY_CONDITION: &str = "Ready";

/// Parse a certificate resource document.
///
/// Readiness stays `Unknown` unless a `Ready` condition is present; when
/// several are reported the last one counts. Missing or unparsable expiry
/// and renewal times are left empty.
///
/// # Errors
///
/// Returns the decode error if `raw` is not a valid document.
pub fn parse_certificate(raw: &str) -> serde_json::Result<CertificateStatus> {
    let doc: CertificateDocument = document::decode(raw)?;

    let ready = doc
        .status
        .conditions
        .iter()
        .rfind(|c| c.condition_type == READY_CONDITION)
        .map_or(CertificateReadiness::Unknown, |c| {
            CertificateReadiness::from_status(&c.status)
        });

    Ok(CertificateStatus {
        ready,
        not_after: parse_timestamp(&doc.status.not_after),
        renewal_time: parse_timestamp(&doc.status.renewal_time),
        dns_names: doc.spec.dns_names,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_ready_certificate() {
        let raw = r#"{
            "spec": {"dnsNames": ["*.apps.example.com", "apps.example.com"]},
            "status": {
                "conditions": [{"type": "Ready", "status": "True"}],
                "notAfter": "2026-08-01T12:00:00Z",
                "renewalTime": "2026-07-02T12:00:00Z"
            }
        }"#;

        let cert = parse_certificate(raw).unwrap();
        assert_eq!(cert.ready, CertificateReadiness::Ready);
        assert_eq!(
            cert.not_after,
            Some(Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap())
        );
        assert_eq!(
            cert.renewal_time,
            Some(Utc.with_ymd_and_hms(2026, 7, 2, 12, 0, 0).unwrap())
        );
        assert_eq!(cert.dns_names, vec!["*.apps.example.com", "apps.example.com"]);
    }

    #[test]
    fn test_not_ready_certificate() {
        let raw = r#"{"status": {"conditions": [
            {"type": "Issuing", "status": "True"},
            {"type": "Ready", "status": "False"}
        ]}}"#;

        assert_eq!(parse_certificate(raw).unwrap().ready, CertificateReadiness::NotReady);
    }

    #[test]
    fn test_last_ready_condition_wins() {
        let raw = r#"{"status": {"conditions": [
            {"type": "Ready", "status": "False"},
            {"type": "Ready", "status": "True"}
        ]}}"#;

        assert_eq!(parse_certificate(raw).unwrap().ready, CertificateReadiness::Ready);
    }

    #[test]
    fn test_missing_ready_condition_is_unknown() {
        let raw = r#"{"status": {"conditions": [{"type": "Issuing", "status": "False"}]}}"#;
        assert_eq!(parse_certificate(raw).unwrap().ready, CertificateReadiness::Unknown);
    }

    #[test]
    fn test_unparsable_times_are_empty() {
        let raw = r#"{"status": {"notAfter": "next summer", "renewalTime": ""}}"#;
        let cert = parse_certificate(raw).unwrap();
        assert!(cert.not_after.is_none());
        assert!(cert.renewal_time.is_none());
    }

    #[test]
    fn test_empty_document() {
        let cert = parse_certificate("{}").unwrap();
        assert_eq!(cert, CertificateStatus::observed());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(parse_certificate(r#"{"spec": {"dnsNames": "apps.example.com"}}"#).is_err());
    }
}
