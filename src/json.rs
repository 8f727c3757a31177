//! JSON output structures.
//!
//! Every JSON document the CLI prints carries a top-level `success` flag so
//! scripts can branch on it without inspecting the exit code.

use serde::Serialize;

/// Standard JSON success response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct JsonSuccess<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T> JsonSuccess<T> {
    /// Create a new success response
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> JsonSuccess<T> {
    /// Convert to a pretty-printed JSON string
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `data` cannot be represented as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Standard JSON error response
#[derive(Debug, Clone, Serialize)]
pub struct JsonError {
    pub success: bool,
    pub error: ErrorDetail,
}

/// Detailed error information
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (`SCREAMING_SNAKE_CASE`)
    pub code: &'static str,
    /// Human-readable error message, including its causes
    pub message: String,
}

impl JsonError {
    /// Build the error response for a failed command.
    pub fn from_error(error: &anyhow::Error) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: error_code(error),
                message: format!("{error:#}"),
            },
        }
    }

    /// Convert to a pretty-printed JSON string
    ///
    /// # Errors
    ///
    /// Returns the serializer error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Machine-readable code for the innermost known error in the chain.
fn error_code(error: &anyhow::Error) -> &'static str {
    if let Some(core) = error.downcast_ref::<hcp_core::Error>() {
        return match core {
            hcp_core::Error::FileReadFailed { .. } => "FILE_READ_FAILED",
            hcp_core::Error::JsonParseFailed { .. } => "JSON_PARSE_FAILED",
            hcp_core::Error::TomlParseFailed { .. } => "TOML_PARSE_FAILED",
            hcp_core::Error::InvalidConfig { .. } => "INVALID_CONFIG",
            hcp_core::Error::ClusterNotFound { .. } => "CLUSTER_NOT_FOUND",
            hcp_core::Error::AmbiguousCluster { .. } => "AMBIGUOUS_CLUSTER",
            hcp_core::Error::NotHostedControlPlane { .. } => "NOT_HOSTED_CONTROL_PLANE",
            hcp_core::Error::NoLiveResources { .. } => "NO_LIVE_RESOURCES",
        };
    }

    if error.downcast_ref::<hcp_status::Error>().is_some() {
        return "DOCUMENT_PARSE_FAILED";
    }

    "UNKNOWN"
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use anyhow::Context;
    use hcp_status::{ClusterIdentity, StatusSnapshot};

    use super::*;

    #[test]
    fn test_success_flattens_data() {
        let snapshot = StatusSnapshot::default().with_identity(ClusterIdentity {
            id: "ext-1".to_string(),
            name: "prod-east".to_string(),
            state: "ready".to_string(),
        });

        let json = JsonSuccess::new(&snapshot).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["identity"]["name"], "prod-east");
        assert!(value["syncs"].as_array().unwrap().is_empty());
        assert!(value["ingress_certificate"].is_null());
    }

    #[test]
    fn test_error_code_sees_through_context() {
        let error = Err::<(), _>(hcp_core::Error::cluster_not_found("nope"))
            .context("failed to find cluster")
            .unwrap_err();

        let json = JsonError::from_error(&error);
        assert!(!json.success);
        assert_eq!(json.error.code, "CLUSTER_NOT_FOUND");
        assert!(json.error.message.contains("failed to find cluster"));
        assert!(json.error.message.contains("nope"));
    }

    #[test]
    fn test_unknown_error_code() {
        let error = anyhow::anyhow!("something else");
        assert_eq!(JsonError::from_error(&error).error.code, "UNKNOWN");
    }
}
