//! Configuration error type.
//!
//! Map and simulation errors live in their own crates; this crate only knows
//! about configuration validation.

use thiserror::Error;

/// A `SimConfig` field failed validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration field {field} must be at least 1 (got {got})")]
    TooSmall { field: &'static str, got: i64 },

    #[error("configuration field {field} must lie in {range} (got {got})")]
    OutOfRange {
        field: &'static str,
        range: &'static str,
        got:   f64,
    },
}
