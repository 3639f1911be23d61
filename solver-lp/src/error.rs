//! Error types for the LP solver.

use thiserror::Error;

/// Errors that can occur while setting up or solving an LP.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LpError {
    /// Problem dimensions do not agree.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Problem data contains NaN or an infinite coefficient.
    #[error("Non-finite data: {0}")]
    NonFinite(String),

    /// Variable bounds are malformed (negative lower bound, NaN, ...).
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),
}

/// Result type for LP operations.
pub type LpResult<T> = Result<T, LpError>;
