//! Result type definition and extension traits.
//!
//! Provides a logging combinator so callers can fall back to a default
//! without unwrap/expect/panic.

use crate::error::Error;

/// The standard Result type for hcp-health operations.
///
/// Use the `?` operator, `match`, or [`ResultExt`] to handle results.
///
/// # Examples
///
/// ```ignore
/// let config = StatusConfig::discover().or_default_logged(StatusConfig::default());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait providing a logged fallback for Results.
pub trait ResultExt<T> {
    /// Get the value or a default, logging the error if present.
    fn or_default_logged(self, default: T) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn or_default_logged(self, default: T) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Operation failed, using default: {}", e);
                default
            }
        }
    }
}
