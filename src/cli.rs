//! CLI command definitions using clap.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Environment variable naming the inventory file.
pub const INVENTORY_ENV: &str = "HCP_HEALTH_INVENTORY";

/// hcp-health - hosted control plane health overview
#[derive(Parser, Debug)]
#[command(name = "hcp-health")]
#[command(version)]
#[command(about = "Show hosted control plane cluster health from live resources")]
#[command(
    long_about = "Display a health overview of a hosted control plane cluster using its live resources: sync status of propagated work, control-plane conditions and version, certificate status, and worker-pool health."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show cluster health status
    Status {
        /// Cluster name, ID, or external ID
        #[arg(short = 'C', long)]
        cluster_id: String,

        /// Inventory file listing clusters and their live resources
        #[arg(short, long, env = INVENTORY_ENV)]
        inventory: PathBuf,

        /// Naming-convention config file (JSON or TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}

/// How the status report is printed.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned, human-readable report
    #[default]
    Text,
    /// Snapshot as pretty-printed JSON
    Json,
}
