//! Where clusters and their live resources come from.
//!
//! The status engine only needs two things from the management API: a cluster
//! record and the cluster's live-resource mapping. [`ClusterSource`] is that
//! seam; [`InventoryFileSource`] serves both from a JSON file.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use hcp_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A cluster as known to the management API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterRecord {
    /// Internal ID; keys the main propagated-work document.
    pub id: String,
    /// Externally visible ID.
    pub external_id: String,
    pub name: String,
    pub state: String,
    /// Whether the cluster runs a hosted control plane.
    pub hypershift: bool,
}

impl ClusterRecord {
    /// Whether `query` names this cluster by internal ID, external ID or name.
    pub fn matches(&self, query: &str) -> bool {
        !query.is_empty() && (self.id == query || self.external_id == query || self.name == query)
    }
}

/// Lookup of clusters and their live resources.
#[async_trait]
pub trait ClusterSource: Send + Sync {
    /// Find the single cluster matching `query`.
    ///
    /// # Errors
    ///
    /// [`Error::ClusterNotFound`] when nothing matches,
    /// [`Error::AmbiguousCluster`] when more than one cluster does.
    async fn find_cluster(&self, query: &str) -> Result<ClusterRecord>;

    /// Live resources of a cluster, keyed by document key.
    ///
    /// # Errors
    ///
    /// [`Error::ClusterNotFound`] when `cluster_id` is not a known internal ID.
    async fn live_resources(&self, cluster_id: &str) -> Result<HashMap<String, String>>;
}

#[derive(Debug, Default, Deserialize)]
struct Inventory {
    #[serde(default)]
    clusters: Vec<InventoryEntry>,
}

#[derive(Debug, Deserialize)]
struct InventoryEntry {
    #[serde(flatten)]
    record: ClusterRecord,
    /// Raw document text, or an inline JSON document.
    #[serde(default)]
    live_resources: HashMap<String, serde_json::Value>,
}

impl InventoryEntry {
    fn resources(&self) -> HashMap<String, String> {
        self.live_resources
            .iter()
            .map(|(key, value)| {
                let raw = match value {
                    serde_json::Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                (key.clone(), raw)
            })
            .collect()
    }
}

/// Cluster source backed by a JSON inventory file.
///
/// ```json
/// {"clusters": [{"id": "...", "name": "...", "hypershift": true,
///                "live_resources": {"manifest_work-...": "{...}"}}]}
/// ```
///
/// A live resource may be given as a JSON string holding the document text or
/// as the document itself.
#[derive(Debug)]
pub struct InventoryFileSource {
    entries: Vec<InventoryEntry>,
}

impl InventoryFileSource {
    /// Read and parse the inventory at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::FileReadFailed`] if the file cannot be read,
    /// [`Error::JsonParseFailed`] if it is not a valid inventory.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::file_read_failed(path, e.to_string()))?;

        let inventory: Inventory = serde_json::from_str(&content)
            .map_err(|e| Error::json_parse_failed(format!("{}: {e}", path.display())))?;

        debug!(
            path = %path.display(),
            clusters = inventory.clusters.len(),
            "Loaded inventory"
        );

        Ok(Self {
            entries: inventory.clusters,
        })
    }
}

#[async_trait]
impl ClusterSource for InventoryFileSource {
    async fn find_cluster(&self, query: &str) -> Result<ClusterRecord> {
        let matches: Vec<&ClusterRecord> = self
            .entries
            .iter()
            .map(|entry| &entry.record)
            .filter(|record| record.matches(query))
            .collect();

        match matches.as_slice() {
            [] => Err(Error::cluster_not_found(query)),
            [record] => Ok((*record).clone()),
            many => Err(Error::ambiguous_cluster(query, many.len())),
        }
    }

    async fn live_resources(&self, cluster_id: &str) -> Result<HashMap<String, String>> {
        self.entries
            .iter()
            .find(|entry| entry.record.id == cluster_id)
            .map(InventoryEntry::resources)
            .ok_or_else(|| Error::cluster_not_found(cluster_id))
    }
}
