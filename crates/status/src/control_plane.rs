//! Control-plane feedback from the main propagated-work document.

use crate::config::StatusConfig;
use crate::document::{self, WorkDocument};
use crate::feedback::{self, Feedback};
use crate::types::{CertificateStatus, Condition, VersionInfo};

/// Feedback extra holding the current version.
pub const VERSION_CURRENT: &str = "Version-Current";
/// Feedback extra holding the desired version.
pub const VERSION_DESIRED: &str = "Version-Desired";
/// Feedback extra holding the version rollout status.
pub const VERSION_STATUS: &str = "Version-Status";
/// Feedback extra holding the release image.
pub const VERSION_IMAGE: &str = "Version-Image";
/// Feedback extra holding comma-separated available updates.
pub const VERSION_AVAILABLE_UPDATES: &str = "Version-AvailableUpdates";

/// What the main document says about the control plane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlPlaneStatus {
    pub conditions: Vec<Condition>,
    pub version: VersionInfo,
    pub management_cluster: String,
    /// `Some` when a certificate manifest is present. Detailed certificate
    /// feedback is not propagated, so readiness stays unknown.
    pub certificate: Option<CertificateStatus>,
}

/// Parse the control-plane status out of the main propagated-work document.
///
/// Only the first manifest of the control-plane kind is read.
///
/// # Errors
///
/// Returns the decode error if `raw` is not a valid document.
pub fn parse_control_plane(
    raw: &str,
    config: &StatusConfig,
) -> serde_json::Result<ControlPlaneStatus> {
    let doc: WorkDocument = document::decode(raw)?;

    let management_cluster = doc
        .metadata
        .labels
        .get(&config.management_cluster_label)
        .cloned()
        .unwrap_or_default();

    let manifests = &doc.status.resource_status.manifests;

    let (conditions, version) = manifests
        .iter()
        .find(|m| m.resource_meta.kind == config.control_plane_kind)
        .map(|m| {
            let feedback =
                feedback::flatten(&m.status_feedback.values, &config.non_condition_prefixes);
            let version = version_info(&feedback);
            (feedback.conditions, version)
        })
        .unwrap_or_default();

    let certificate = manifests
        .iter()
        .any(|m| m.resource_meta.kind == config.certificate_kind)
        .then(CertificateStatus::observed);

    Ok(ControlPlaneStatus {
        conditions,
        version,
        management_cluster,
        certificate,
    })
}

fn version_info(feedback: &Feedback) -> VersionInfo {
    let field = |name| feedback.extra(name).unwrap_or_default().to_string();

    VersionInfo {
        current: field(VERSION_CURRENT),
        desired: field(VERSION_DESIRED),
        status: field(VERSION_STATUS),
        image: field(VERSION_IMAGE),
        available_updates: split_updates(feedback.extra(VERSION_AVAILABLE_UPDATES)),
    }
}

/// Comma-split the available updates; absent or empty means none.
fn split_updates(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(list) if !list.is_empty() => list.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}
