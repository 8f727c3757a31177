//! Shared error types and result combinators for hcp-health.
//!
//! Errors here cover everything around the status engine: reading
//! configuration and inventory files, and looking clusters up.

pub mod error;
pub mod result;

pub use error::Error;
pub use result::{Result, ResultExt};
