//! Error types for the status crate.

use std::fmt;

use thiserror::Error;

/// Result type alias for status aggregation.
pub type Result<T> = std::result::Result<T, Error>;

/// Which parser rejected a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Top-level sync conditions of a propagated-work document.
    Sync,
    /// Control-plane feedback in the main propagated-work document.
    ControlPlane,
    /// Worker-pool feedback in any propagated-work document.
    WorkerPool,
    /// Standalone certificate resource.
    Certificate,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync => write!(f, "sync status"),
            Self::ControlPlane => write!(f, "control plane status"),
            Self::WorkerPool => write!(f, "worker pool status"),
            Self::Certificate => write!(f, "certificate"),
        }
    }
}

/// Status aggregation errors.
///
/// Only structural decode failures are errors. Missing documents, missing
/// fields and unparsable scalars degrade to empty values instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A document failed to decode.
    #[error("failed to parse {kind} for '{key}': {source}")]
    DocumentParse {
        key: String,
        kind: DocumentKind,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a document parse error.
    pub fn document_parse(
        key: impl Into<String>,
        kind: DocumentKind,
        source: serde_json::Error,
    ) -> Self {
        Self::DocumentParse {
            key: key.into(),
            kind,
            source,
        }
    }

    /// Key of the document that failed.
    pub fn key(&self) -> &str {
        match self {
            Self::DocumentParse { key, .. } => key,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn decode_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{not json").unwrap_err()
    }

    #[test]
    fn test_document_parse_display() {
        let err = Error::document_parse("manifest_work-abc", DocumentKind::Sync, decode_error());
        let msg = err.to_string();
        assert!(msg.contains("manifest_work-abc"));
        assert!(msg.contains("sync status"));
    }

    #[test]
    fn test_key_accessor() {
        let err = Error::document_parse("certificate-x", DocumentKind::Certificate, decode_error());
        assert_eq!(err.key(), "certificate-x");
    }
}
