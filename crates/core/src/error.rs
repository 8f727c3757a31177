//! Core error types for hcp-health operations.
//!
//! All errors are explicit, typed, and recoverable - no panics allowed.

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for hcp-health operations.
#[derive(Debug, Error)]
pub enum Error {
    // I/O errors
    #[error("failed to read file '{path}': {reason}")]
    FileReadFailed { path: PathBuf, reason: String },

    // Parsing errors
    #[error("JSON parse error: {reason}")]
    JsonParseFailed { reason: String },

    #[error("TOML parse error: {reason}")]
    TomlParseFailed { reason: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // Cluster lookup errors
    #[error("no cluster matches '{query}'")]
    ClusterNotFound { query: String },

    #[error("'{query}' matches {matches} clusters, use the internal ID instead")]
    AmbiguousCluster { query: String, matches: usize },

    #[error("cluster '{cluster}' is not an HCP cluster")]
    NotHostedControlPlane { cluster: String },

    #[error("no live resources found for cluster {cluster_id}")]
    NoLiveResources { cluster_id: String },
}

impl Error {
    /// Create a file read error.
    pub fn file_read_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FileReadFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a JSON parse error.
    pub fn json_parse_failed(reason: impl Into<String>) -> Self {
        Self::JsonParseFailed {
            reason: reason.into(),
        }
    }

    /// Create a TOML parse error.
    pub fn toml_parse_failed(reason: impl Into<String>) -> Self {
        Self::TomlParseFailed {
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create a cluster not found error.
    pub fn cluster_not_found(query: impl Into<String>) -> Self {
        Self::ClusterNotFound {
            query: query.into(),
        }
    }

    /// Create an ambiguous cluster error.
    pub fn ambiguous_cluster(query: impl Into<String>, matches: usize) -> Self {
        Self::AmbiguousCluster {
            query: query.into(),
            matches,
        }
    }

    /// Create a not-a-hosted-control-plane error.
    pub fn not_hosted_control_plane(cluster: impl Into<String>) -> Self {
        Self::NotHostedControlPlane {
            cluster: cluster.into(),
        }
    }

    /// Create a no live resources error.
    pub fn no_live_resources(cluster_id: impl Into<String>) -> Self {
        Self::NoLiveResources {
            cluster_id: cluster_id.into(),
        }
    }
}
