//! Error types for transition configuration.
//!
//! The engine itself never fails at runtime: missing nodes, stale callbacks
//! and absent previous keys are guarded, not reported. Errors only arise when
//! configuration is parsed from strings or raw values.

use thiserror::Error;

/// Result type for configuration parsing.
pub type Result<T> = std::result::Result<T, TransitionError>;

/// Errors produced while reading transition configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// Style name is not one of the known transition styles.
    #[error("unknown transition style: {0:?}")]
    UnknownAnimation(String),

    /// Direction is not `auto`, `inverse`, `1` or `-1`.
    #[error("unknown transition direction: {0:?}")]
    UnknownDirection(String),

    /// Animation level outside `0..=2`.
    #[error("invalid animation level: {0}")]
    InvalidAnimationLevel(u8),
}
