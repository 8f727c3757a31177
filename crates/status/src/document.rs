//! Wire shapes of the live-resource documents.
//!
//! Only the fields the parsers read are modelled. Every field is optional on
//! the wire and JSON `null` is read as absent, so a sparse document decodes to
//! empty values rather than failing.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use tracing::debug;

/// Decode `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Decode a whole document, treating a top-level `null` as an empty document.
pub(crate) fn decode<'a, T>(raw: &'a str) -> serde_json::Result<T>
where
    T: Default + Deserialize<'a>,
{
    serde_json::from_str::<Option<T>>(raw).map(Option::unwrap_or_default)
}

/// Parse an RFC 3339 timestamp, `None` when empty or malformed.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .inspect_err(|e| debug!(timestamp = raw, error = %e, "Skipping unparsable timestamp"))
        .ok()
}

/// Propagated-work document: top-level sync conditions plus per-manifest
/// status feedback.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkDocument {
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(deserialize_with = "null_as_default")]
    pub status: WorkStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObjectMeta {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub labels: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub conditions: Vec<WorkCondition>,
    #[serde(deserialize_with = "null_as_default")]
    pub resource_status: ResourceStatus,
}

/// Top-level condition of a propagated-work document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkCondition {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub condition_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_transition_time: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResourceStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub manifests: Vec<ManifestStatus>,
}

/// Status of one embedded manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManifestStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub resource_meta: ResourceMeta,
    #[serde(deserialize_with = "null_as_default")]
    pub status_feedback: StatusFeedback,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResourceMeta {
    #[serde(deserialize_with = "null_as_default")]
    pub group: String,
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resource: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatusFeedback {
    #[serde(deserialize_with = "null_as_default")]
    pub values: Vec<FeedbackValue>,
}

/// One flattened feedback entry: `{"name": ..., "fieldValue": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedbackValue {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub field_value: FieldValue,
}

impl FeedbackValue {
    /// String-typed feedback entry.
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_value: FieldValue::String {
                string: value.into(),
            },
        }
    }

    /// Integer-typed feedback entry.
    pub fn integer(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            field_value: FieldValue::Integer { integer: value },
        }
    }
}

/// Typed payload of a feedback entry, tagged by `type`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawFieldValue")]
pub enum FieldValue {
    String { string: String },
    Integer { integer: i64 },
    /// Any other tag, or no payload at all.
    #[default]
    Unsupported,
}

/// Untagged wire form; the tag is resolved in `From<RawFieldValue>`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFieldValue {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    value_type: String,
    #[serde(deserialize_with = "null_as_default")]
    string: String,
    #[serde(deserialize_with = "null_as_default")]
    integer: i64,
}

impl From<RawFieldValue> for FieldValue {
    fn from(raw: RawFieldValue) -> Self {
        match raw.value_type.as_str() {
            "String" => Self::String { string: raw.string },
            "Integer" => Self::Integer {
                integer: raw.integer,
            },
            _ => Self::Unsupported,
        }
    }
}

impl FieldValue {
    /// Uniform string form: integers in decimal, unsupported payloads empty.
    pub fn render(&self) -> String {
        match self {
            Self::String { string } => string.clone(),
            Self::Integer { integer } => integer.to_string(),
            Self::Unsupported => String::new(),
        }
    }
}

/// Standalone certificate resource.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CertificateDocument {
    #[serde(deserialize_with = "null_as_default")]
    pub spec: CertificateSpec,
    #[serde(deserialize_with = "null_as_default")]
    pub status: CertificateDocumentStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificateSpec {
    #[serde(deserialize_with = "null_as_default")]
    pub dns_names: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificateDocumentStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub conditions: Vec<CertificateCondition>,
    #[serde(deserialize_with = "null_as_default")]
    pub not_after: String,
    #[serde(deserialize_with = "null_as_default")]
    pub renewal_time: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CertificateCondition {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub condition_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_field_value_string() {
        let value: FeedbackValue = serde_json::from_str(
            r#"{"name": "Available-Status", "fieldValue": {"type": "String", "string": "True"}}"#,
        )
        .unwrap();
        assert_eq!(value, FeedbackValue::string("Available-Status", "True"));
    }

    #[test]
    fn test_field_value_integer() {
        let value: FeedbackValue = serde_json::from_str(
            r#"{"name": "Replicas", "fieldValue": {"type": "Integer", "integer": 3}}"#,
        )
        .unwrap();
        assert_eq!(value.field_value.render(), "3");
    }

    #[test]
    fn test_field_value_unknown_tag_is_unsupported() {
        let value: FeedbackValue = serde_json::from_str(
            r#"{"name": "Paused", "fieldValue": {"type": "Boolean", "boolean": true}}"#,
        )
        .unwrap();
        assert_eq!(value.field_value, FieldValue::Unsupported);
        assert_eq!(value.field_value.render(), "");
    }

    #[test]
    fn test_missing_field_value_is_unsupported() {
        let value: FeedbackValue = serde_json::from_str(r#"{"name": "Replicas"}"#).unwrap();
        assert_eq!(value.field_value, FieldValue::Unsupported);
    }

    #[test]
    fn test_untagged_field_value_is_unsupported() {
        let value: FeedbackValue =
            serde_json::from_str(r#"{"name": "Replicas", "fieldValue": {"integer": 3}}"#).unwrap();
        assert_eq!(value.field_value, FieldValue::Unsupported);
    }

    #[test]
    fn test_nulls_read_as_absent() {
        let doc: WorkDocument = decode(
            r#"{"metadata": {"name": "mw", "labels": null},
                "status": {"conditions": null, "resourceStatus": {"manifests": null}}}"#,
        )
        .unwrap();
        assert_eq!(doc.metadata.name, "mw");
        assert!(doc.metadata.labels.is_empty());
        assert!(doc.status.conditions.is_empty());
        assert!(doc.status.resource_status.manifests.is_empty());
    }

    #[test]
    fn test_top_level_null_is_empty_document() {
        let doc: WorkDocument = decode("null").unwrap();
        assert!(doc.metadata.name.is_empty());
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        assert!(decode::<WorkDocument>(r#"{"status": {"conditions": "Applied"}}"#).is_err());
        assert!(decode::<WorkDocument>("[1, 2]").is_err());
    }
}
