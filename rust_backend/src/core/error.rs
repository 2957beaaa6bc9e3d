//! Error types for the thermal synthesis core.

use super::domain::{Point, ResponseKind};

/// Result type for core thermal operations
pub type ThermalResult<T> = Result<T, ThermalError>;

/// Error type for core thermal operations.
///
/// Every variant names the precondition that was violated. Nothing in the core
/// substitutes a default value for malformed input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThermalError {
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Ambiguous input: {0}")]
    AmbiguousInput(String),

    #[error("Length mismatch: {what} ({left} != {right})")]
    LengthMismatch {
        what: String,
        left: usize,
        right: usize,
    },

    #[error("Point unavailable: {point} ({reason})")]
    PointUnavailable { point: Point, reason: String },

    #[error("Insufficient data: {what} requires at least {required} samples, got {actual}")]
    InsufficientData {
        what: String,
        required: usize,
        actual: usize,
    },

    #[error("Response kind mismatch: expected {expected}, got {actual}")]
    ResponseKindMismatch {
        expected: ResponseKind,
        actual: ResponseKind,
    },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl ThermalError {
    /// Shorthand for a [`ThermalError::LengthMismatch`].
    pub fn length_mismatch(what: impl Into<String>, left: usize, right: usize) -> Self {
        ThermalError::LengthMismatch {
            what: what.into(),
            left,
            right,
        }
    }

    /// Shorthand for a [`ThermalError::InsufficientData`].
    pub fn insufficient(what: impl Into<String>, required: usize, actual: usize) -> Self {
        ThermalError::InsufficientData {
            what: what.into(),
            required,
            actual,
        }
    }
}
