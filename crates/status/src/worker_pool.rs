//! Worker-pool feedback from any propagated-work document.

use tracing::debug;

use crate::config::StatusConfig;
use crate::document::{self, WorkDocument};
use crate::feedback;
use crate::types::WorkerPoolStatus;

/// Feedback extra holding the replica count.
pub const REPLICAS: &str = "Replicas";
/// Feedback extra holding the worker-pool version.
pub const VERSION: &str = "Version";

/// Parse every worker-pool manifest in one propagated-work document.
///
/// A document may carry zero or more worker pools. A replica count that is
/// not an integer is read as zero.
///
/// # Errors
///
/// Returns the decode error if `raw` is not a valid document.
pub fn parse_worker_pools(
    raw: &str,
    config: &StatusConfig,
) -> serde_json::Result<Vec<WorkerPoolStatus>> {
    let doc: WorkDocument = document::decode(raw)?;

    let pools = doc
        .status
        .resource_status
        .manifests
        .into_iter()
        .filter(|m| m.resource_meta.kind == config.worker_pool_kind)
        .map(|m| {
            let feedback =
                feedback::flatten(&m.status_feedback.values, &config.non_condition_prefixes);
            let name = m.resource_meta.name;

            WorkerPoolStatus {
                replicas: feedback
                    .extra(REPLICAS)
                    .map(|raw| parse_replicas(&name, raw))
                    .unwrap_or_default(),
                version: feedback.extra(VERSION).unwrap_or_default().to_string(),
                conditions: feedback.conditions,
                name,
            }
        })
        .collect();

    Ok(pools)
}

fn parse_replicas(pool: &str, raw: &str) -> i64 {
    raw.parse().unwrap_or_else(|_| {
        debug!(pool, replicas = raw, "Replica count is not an integer");
        0
    })
}
