#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # hcp-health
//!
//! Health overview of hosted control plane clusters, rebuilt from the live
//! resources the management API exposes for each cluster.
//!
//! This library re-exports the workspace crates and adds the command-line
//! surface: cluster lookup ([`source`]), text rendering ([`render`]) and the
//! `status` command ([`commands`]).

// Re-export workspace crates
pub use hcp_core;
pub use hcp_status;

pub mod cli;
pub mod commands;
pub mod json;
pub mod render;
pub mod source;
