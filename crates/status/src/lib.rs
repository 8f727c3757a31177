//! Status aggregation for hosted control planes.
//!
//! The management API exposes a cluster's live resources as a flat mapping of
//! document key → raw JSON. This crate rebuilds a typed [`StatusSnapshot`]
//! from that mapping:
//!
//! - **Sync status**: `Applied`/`Available` and the last transition of every
//!   propagated-work document (`manifest_work-*`)
//! - **Control plane**: conditions, version and management cluster from the
//!   main document (`manifest_work-<cluster internal id>`)
//! - **Worker pools**: replicas, version and conditions from every
//!   propagated-work document
//! - **Ingress certificate**: readiness, expiry and DNS names from the first
//!   `certificate-*` document
//!
//! Conditions and versions arrive as flattened status feedback
//! (`Available-Status`, `Version-Current`); see [`feedback`] for how they are
//! regrouped.
//!
//! Everything here is a pure, synchronous transformation: no I/O, no retained
//! state. Aggregating the same mapping twice gives the same snapshot.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! let mut resources = HashMap::new();
//! resources.insert(
//!     "manifest_work-abc".to_string(),
//!     r#"{"status": {"conditions": [{"type": "Applied", "status": "True"}]}}"#.to_string(),
//! );
//!
//! let snapshot = hcp_status::aggregate(&resources, "abc")?;
//! assert!(snapshot.syncs[0].applied);
//! # Ok::<(), hcp_status::Error>(())
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod aggregator;
pub mod certificate;
pub mod config;
pub mod control_plane;
pub mod document;
pub mod error;
pub mod feedback;
pub mod sync;
pub mod types;
pub mod worker_pool;

// Re-export main types
pub use aggregator::{Aggregator, DocumentKeys, aggregate};
pub use certificate::parse_certificate;
pub use config::StatusConfig;
pub use control_plane::{ControlPlaneStatus, parse_control_plane};
pub use document::{FeedbackValue, FieldValue};
pub use error::{DocumentKind, Error, Result};
pub use feedback::{Feedback, flatten};
pub use sync::parse_sync_summary;
pub use types::{
    CertificateReadiness, CertificateStatus, ClusterIdentity, Condition, StatusSnapshot,
    SyncSummary, VersionInfo, WorkerPoolStatus,
};
pub use worker_pool::parse_worker_pools;
