//! CLI command handlers.
//!
//! All commands follow the same shape:
//! - Zero unwraps, zero panics
//! - Library errors carried through `anyhow` with context
//! - Pure rendering, I/O only at the edges

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use hcp_core::ResultExt;
use hcp_status::{Aggregator, ClusterIdentity, StatusConfig, StatusSnapshot};
use tracing::{debug, info};

use crate::cli::{Commands, OutputFormat};
use crate::json::{JsonError, JsonSuccess};
use crate::render::render_status;
use crate::source::{ClusterSource, InventoryFileSource};

/// Execute a CLI command.
///
/// This is the main command dispatcher that routes to the appropriate handler.
///
/// # Errors
///
/// Returns the first failure of the command, with context.
pub async fn execute_command(command: Commands) -> Result<()> {
    match command {
        Commands::Status {
            cluster_id,
            inventory,
            config,
            output,
        } => {
            let result = status_report(&cluster_id, &inventory, config.as_deref(), output).await;
            match (result, output) {
                (Ok(report), _) => {
                    print!("{report}");
                    Ok(())
                }
                (Err(e), OutputFormat::Json) => {
                    println!("{}", JsonError::from_error(&e).to_json()?);
                    Err(e)
                }
                (Err(e), OutputFormat::Text) => Err(e),
            }
        }
    }
}

/// Build the printable status report for one cluster.
///
/// # Errors
///
/// Returns an error if the config or inventory cannot be loaded, or
/// [`cluster_status`] fails.
pub async fn status_report(
    query: &str,
    inventory: &Path,
    config_path: Option<&Path>,
    output: OutputFormat,
) -> Result<String> {
    let config = load_config(config_path)?;
    let source = InventoryFileSource::open(inventory)
        .await
        .with_context(|| format!("failed to load inventory {}", inventory.display()))?;

    let snapshot = cluster_status(&source, query, &config).await?;

    match output {
        OutputFormat::Text => Ok(render_status(&snapshot, Utc::now())),
        OutputFormat::Json => {
            let mut json = JsonSuccess::new(&snapshot)
                .to_json()
                .context("failed to serialize status")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Pick the naming-convention config.
///
/// An explicit path must load. Otherwise the discovered config is used, and a
/// broken one falls back to the defaults with a warning.
///
/// # Errors
///
/// Returns an error only when an explicit `path` fails to load.
pub fn load_config(path: Option<&Path>) -> Result<StatusConfig> {
    match path {
        Some(path) => StatusConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(StatusConfig::discover().or_default_logged(StatusConfig::default())),
    }
}

/// Look a cluster up, fetch its live resources and aggregate them.
///
/// The snapshot carries the cluster's external ID, display name and state.
///
/// # Errors
///
/// Fails if the cluster is unknown or ambiguous, is not a hosted control
/// plane, has no live resources, or a document does not parse.
pub async fn cluster_status<S>(
    source: &S,
    query: &str,
    config: &StatusConfig,
) -> Result<StatusSnapshot>
where
    S: ClusterSource + ?Sized,
{
    let cluster = source
        .find_cluster(query)
        .await
        .context("failed to find cluster")?;

    if !cluster.hypershift {
        return Err(hcp_core::Error::not_hosted_control_plane(query).into());
    }

    let resources = source
        .live_resources(&cluster.id)
        .await
        .context("failed to get live resources")?;

    if resources.is_empty() {
        return Err(hcp_core::Error::no_live_resources(&cluster.id).into());
    }

    debug!(cluster = %cluster.id, documents = resources.len(), "Fetched live resources");

    let snapshot = Aggregator::new(config.clone())
        .aggregate(&resources, &cluster.id)
        .context("failed to parse live resources")?;

    info!(cluster = %cluster.id, name = %cluster.name, "Status aggregated");

    Ok(snapshot.with_identity(ClusterIdentity {
        id: cluster.external_id,
        name: cluster.name,
        state: cluster.state,
    }))
}
