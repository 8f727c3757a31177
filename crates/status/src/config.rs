//! Naming-convention configuration for the aggregator.

use std::path::Path;

use hcp_core::Error;
use serde::{Deserialize, Serialize};

/// Environment variable naming a config file for [`StatusConfig::discover`].
pub const CONFIG_ENV: &str = "HCP_HEALTH_CONFIG";

/// Key prefixes, resource kinds and labels the aggregator matches on.
///
/// Every field has a default matching the management API conventions, so an
/// empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Prefix of propagated-work document keys (`<prefix>-<suffix>`).
    #[serde(default = "default_sync_prefix")]
    pub sync_prefix: String,

    /// Prefix of standalone certificate document keys.
    #[serde(default = "default_certificate_prefix")]
    pub certificate_prefix: String,

    /// Manifest kind carrying control-plane feedback.
    #[serde(default = "default_control_plane_kind")]
    pub control_plane_kind: String,

    /// Manifest kind marking a control-plane certificate.
    #[serde(default = "default_certificate_kind")]
    pub certificate_kind: String,

    /// Manifest kind carrying worker-pool feedback.
    #[serde(default = "default_worker_pool_kind")]
    pub worker_pool_kind: String,

    /// Metadata label holding the management cluster name.
    #[serde(default = "default_management_cluster_label")]
    pub management_cluster_label: String,

    /// Feedback name prefixes that are never condition types, even when
    /// followed by a condition field suffix (`Version-Status`).
    #[serde(default = "default_non_condition_prefixes")]
    pub non_condition_prefixes: Vec<String>,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            sync_prefix: default_sync_prefix(),
            certificate_prefix: default_certificate_prefix(),
            control_plane_kind: default_control_plane_kind(),
            certificate_kind: default_certificate_kind(),
            worker_pool_kind: default_worker_pool_kind(),
            management_cluster_label: default_management_cluster_label(),
            non_condition_prefixes: default_non_condition_prefixes(),
        }
    }
}

impl StatusConfig {
    /// Key of the main propagated-work document for a cluster.
    pub fn main_document_key(&self, cluster_internal_id: &str) -> String {
        format!("{}-{cluster_internal_id}", self.sync_prefix)
    }

    /// Whether `key` names a propagated-work document.
    pub fn is_sync_key(&self, key: &str) -> bool {
        has_prefix(key, &self.sync_prefix)
    }

    /// Whether `key` names a standalone certificate document.
    pub fn is_certificate_key(&self, key: &str) -> bool {
        has_prefix(key, &self.certificate_prefix)
    }

    /// Load configuration from a file.
    ///
    /// `.json` files are read as JSON, anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or
    /// fails [`StatusConfig::validate`].
    pub fn from_file(path: &Path) -> hcp_core::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::file_read_failed(path, e.to_string()))?;

        let config: Self = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content).map_err(|e| Error::json_parse_failed(e.to_string()))?
        } else {
            toml::from_str(&content).map_err(|e| Error::toml_parse_failed(e.to_string()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load the file named by `HCP_HEALTH_CONFIG`, or the defaults when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is set and the file fails to load.
    pub fn discover() -> hcp_core::Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Reject configs that would make key classification meaningless.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first empty field, or when one
    /// prefix would also match the other's keys.
    pub fn validate(&self) -> hcp_core::Result<()> {
        let required = [
            ("sync_prefix", &self.sync_prefix),
            ("certificate_prefix", &self.certificate_prefix),
            ("control_plane_kind", &self.control_plane_kind),
            ("certificate_kind", &self.certificate_kind),
            ("worker_pool_kind", &self.worker_pool_kind),
        ];

        match required.iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(Error::invalid_config(format!("{field} must not be empty"))),
            None if prefixes_overlap(&self.sync_prefix, &self.certificate_prefix) => Err(
                Error::invalid_config("sync_prefix and certificate_prefix must not overlap"),
            ),
            None => Ok(()),
        }
    }
}

fn has_prefix(key: &str, prefix: &str) -> bool {
    key.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('-'))
}

/// Whether some key could carry both prefixes.
fn prefixes_overlap(a: &str, b: &str) -> bool {
    let (a, b) = (format!("{a}-"), format!("{b}-"));
    a.starts_with(&b) || b.starts_with(&a)
}

fn default_sync_prefix() -> String {
    "manifest_work".to_string()
}

fn default_certificate_prefix() -> String {
    "certificate".to_string()
}

fn default_control_plane_kind() -> String {
    "HostedCluster".to_string()
}

fn default_certificate_kind() -> String {
    "Certificate".to_string()
}

fn default_worker_pool_kind() -> String {
    "NodePool".to_string()
}

fn default_management_cluster_label() -> String {
    "api.openshift.com/management-cluster".to_string()
}

fn default_non_condition_prefixes() -> Vec<String> {
    vec!["Version".to_string()]
}
