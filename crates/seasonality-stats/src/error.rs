//! Error types for statistical routines.

use thiserror::Error;

/// Errors that can occur while computing statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Insufficient data for the computation
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations
        required: usize,
        /// Actual number of observations
        actual: usize,
    },

    /// Series has no variance
    #[error("Series has zero variance")]
    ZeroVariance,

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Reference distribution could not be constructed
    #[error("Distribution error: {0}")]
    Distribution(String),
}
