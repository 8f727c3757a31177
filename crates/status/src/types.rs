//! Output model of the status engine.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Identity of the cluster a snapshot describes.
///
/// Filled in by the caller from the cluster record; the aggregator never
/// touches it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClusterIdentity {
    /// Externally visible cluster ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Lifecycle state reported by the management API.
    pub state: String,
}

/// Health of one hosted control plane and its worker pools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub identity: ClusterIdentity,
    /// Name of the management cluster hosting the control plane.
    pub management_cluster: String,
    pub version: VersionInfo,
    /// `Some` when a certificate manifest was seen in the main document.
    pub control_plane_certificate: Option<CertificateStatus>,
    /// `Some` when a standalone certificate document was parsed.
    pub ingress_certificate: Option<CertificateStatus>,
    /// One entry per propagated-work document, sorted by key.
    pub syncs: Vec<SyncSummary>,
    /// Control-plane conditions in feedback order.
    pub conditions: Vec<Condition>,
    /// Worker pools across all propagated-work documents, in key order.
    pub worker_pools: Vec<WorkerPoolStatus>,
}

impl StatusSnapshot {
    /// Attach the cluster identity.
    #[must_use]
    pub fn with_identity(mut self, identity: ClusterIdentity) -> Self {
        self.identity = identity;
        self
    }
}

/// Sync state of one propagated-work document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub name: String,
    pub applied: bool,
    pub available: bool,
    /// Most recent condition transition; `None` when no timestamp parsed.
    pub last_sync_time: Option<DateTime<Utc>>,
}

/// Control-plane version details. Empty strings mean unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub current: String,
    pub desired: String,
    pub status: String,
    pub image: String,
    pub available_updates: Vec<String>,
}

impl VersionInfo {
    /// Whether any of current, desired or status is known.
    pub fn is_known(&self) -> bool {
        !(self.current.is_empty() && self.desired.is_empty() && self.status.is_empty())
    }
}

/// A status condition reassembled from flattened feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    pub reason: String,
    pub message: String,
    /// Left as the raw wire string.
    pub last_transition_time: String,
}

impl Condition {
    /// Create an empty condition of the given type.
    pub fn new(condition_type: impl Into<String>) -> Self {
        Self {
            condition_type: condition_type.into(),
            ..Self::default()
        }
    }

    /// Message to show for this condition, falling back to the reason.
    pub fn summary(&self) -> &str {
        if self.message.is_empty() {
            &self.reason
        } else {
            &self.message
        }
    }
}

/// Readiness of a certificate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CertificateReadiness {
    /// Certificate observed without a `Ready` condition.
    #[default]
    Unknown,
    Ready,
    NotReady,
}

impl CertificateReadiness {
    /// Readiness from a condition status string.
    pub fn from_status(status: &str) -> Self {
        if status == "True" {
            Self::Ready
        } else {
            Self::NotReady
        }
    }
}

/// State of one certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CertificateStatus {
    pub ready: CertificateReadiness,
    pub not_after: Option<DateTime<Utc>>,
    pub renewal_time: Option<DateTime<Utc>>,
    pub dns_names: Vec<String>,
}

impl CertificateStatus {
    /// A certificate known to exist but with no detail available.
    pub fn observed() -> Self {
        Self::default()
    }
}

/// State of one worker pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkerPoolStatus {
    pub name: String,
    /// Zero when absent or unparsable.
    pub replicas: i64,
    pub version: String,
    pub conditions: Vec<Condition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_summary_falls_back_to_reason() {
        let mut condition = Condition::new("Available");
        condition.reason = "AsExpected".to_string();
        assert_eq!(condition.summary(), "AsExpected");

        condition.message = "The hosted control plane is available".to_string();
        assert_eq!(condition.summary(), "The hosted control plane is available");
    }

    #[test]
    fn test_observed_certificate_is_distinct_from_absent() {
        let observed = Some(CertificateStatus::observed());
        let absent: Option<CertificateStatus> = None;
        assert_ne!(observed, absent);
        assert_eq!(
            observed.map(|c| c.ready),
            Some(CertificateReadiness::Unknown)
        );
    }

    #[test]
    fn test_readiness_from_status() {
        assert_eq!(CertificateReadiness::from_status("True"), CertificateReadiness::Ready);
        assert_eq!(CertificateReadiness::from_status("False"), CertificateReadiness::NotReady);
        assert_eq!(CertificateReadiness::from_status("true"), CertificateReadiness::NotReady);
    }

    #[test]
    fn test_version_is_known() {
        assert!(!VersionInfo::default().is_known());
        let version = VersionInfo {
            status: "Partial".to_string(),
            ..VersionInfo::default()
        };
        assert!(version.is_known());
    }

    #[test]
    fn test_with_identity() {
        let snapshot = StatusSnapshot::default().with_identity(ClusterIdentity {
            id: "ext-1".to_string(),
            name: "prod".to_string(),
            state: "ready".to_string(),
        });
        assert_eq!(snapshot.identity.name, "prod");
    }
}
