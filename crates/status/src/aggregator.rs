//! Aggregator: live-resource mapping → [`StatusSnapshot`].

use std::collections::HashMap;

use itertools::Itertools;
use tracing::{debug, info};

use crate::certificate::parse_certificate;
use crate::config::StatusConfig;
use crate::control_plane::parse_control_plane;
use crate::error::{DocumentKind, Error, Result};
use crate::sync::parse_sync_summary;
use crate::types::{StatusSnapshot, SyncSummary, WorkerPoolStatus};
use crate::worker_pool::parse_worker_pools;

/// Aggregate live resources with the default naming conventions.
///
/// # Errors
///
/// Returns [`Error::DocumentParse`] naming the first document that fails to
/// decode.
pub fn aggregate(
    resources: &HashMap<String, String>,
    cluster_internal_id: &str,
) -> Result<StatusSnapshot> {
    Aggregator::default().aggregate(resources, cluster_internal_id)
}

/// Document keys split by naming convention, each list sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentKeys<'a> {
    pub sync: Vec<&'a str>,
    pub certificate: Vec<&'a str>,
}

/// Builds a [`StatusSnapshot`] from the documents of one cluster.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: StatusConfig,
}

impl Aggregator {
    /// Create an aggregator with the given naming conventions.
    pub const fn new(config: StatusConfig) -> Self {
        Self { config }
    }

    /// Partition keys into sync and certificate documents.
    ///
    /// Keys matching neither prefix are dropped. Both lists are sorted so
    /// every later step runs in a stable order.
    pub fn classify<'a, I>(&self, keys: I) -> DocumentKeys<'a>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let (sync, certificate): (Vec<&str>, Vec<&str>) = keys
            .into_iter()
            .map(String::as_str)
            .filter(|key| self.config.is_sync_key(key) || self.config.is_certificate_key(key))
            .sorted_unstable()
            .partition(|key| self.config.is_sync_key(key));

        DocumentKeys { sync, certificate }
    }

    /// Build the snapshot for one cluster.
    ///
    /// The document keyed `<sync_prefix>-<cluster_internal_id>` is the main
    /// document and supplies conditions, version, management cluster and the
    /// control-plane certificate marker. Its absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentParse`] naming the first document that fails
    /// to decode. No partial snapshot is returned.
    pub fn aggregate(
        &self,
        resources: &HashMap<String, String>,
        cluster_internal_id: &str,
    ) -> Result<StatusSnapshot> {
        let keys = self.classify(resources.keys());
        let main_key = self.config.main_document_key(cluster_internal_id);

        info!(
            documents = resources.len(),
            sync = keys.sync.len(),
            certificates = keys.certificate.len(),
            main = %main_key,
            "Aggregating live resources"
        );

        let mut snapshot = StatusSnapshot {
            syncs: self.sync_summaries(resources, &keys.sync)?,
            ..StatusSnapshot::default()
        };

        match resources.get(&main_key) {
            Some(raw) => {
                let control_plane = parse_control_plane(raw, &self.config)
                    .map_err(|e| Error::document_parse(&main_key, DocumentKind::ControlPlane, e))?;
                snapshot.conditions = control_plane.conditions;
                snapshot.version = control_plane.version;
                snapshot.management_cluster = control_plane.management_cluster;
                snapshot.control_plane_certificate = control_plane.certificate;
            }
            None => debug!(main = %main_key, "Main document not present"),
        }

        snapshot.worker_pools = self.worker_pools(resources, &keys.sync)?;

        if let Some(key) = keys.certificate.first() {
            if keys.certificate.len() > 1 {
                debug!(
                    selected = key,
                    ignored = keys.certificate.len().saturating_sub(1),
                    "Multiple certificate documents, using the first by key"
                );
            }
            let raw = resources.get(*key).map_or("", String::as_str);
            snapshot.ingress_certificate = Some(
                parse_certificate(raw)
                    .map_err(|e| Error::document_parse(*key, DocumentKind::Certificate, e))?,
            );
        }

        info!(
            conditions = snapshot.conditions.len(),
            worker_pools = snapshot.worker_pools.len(),
            ingress_certificate = snapshot.ingress_certificate.is_some(),
            "Aggregation complete"
        );

        Ok(snapshot)
    }

    fn sync_summaries(
        &self,
        resources: &HashMap<String, String>,
        keys: &[&str],
    ) -> Result<Vec<SyncSummary>> {
        keys.iter()
            .map(|key| {
                let raw = resources.get(*key).map_or("", String::as_str);
                let mut summary = parse_sync_summary(raw)
                    .map_err(|e| Error::document_parse(*key, DocumentKind::Sync, e))?;
                if summary.name.is_empty() {
                    summary.name = (*key).to_string();
                }
                debug!(
                    key,
                    applied = summary.applied,
                    available = summary.available,
                    "Parsed sync status"
                );
                Ok(summary)
            })
            .collect()
    }

    fn worker_pools(
        &self,
        resources: &HashMap<String, String>,
        keys: &[&str],
    ) -> Result<Vec<WorkerPoolStatus>> {
        keys.iter()
            .map(|key| {
                let raw = resources.get(*key).map_or("", String::as_str);
                parse_worker_pools(raw, &self.config)
                    .map_err(|e| Error::document_parse(*key, DocumentKind::WorkerPool, e))
            })
            .flatten_ok()
            .collect()
    }
}
