//! Error types for the ILP solver.

use solver_lp::LpError;
use thiserror::Error;

/// Errors that can occur during ILP solving.
///
/// Infeasible, unbounded and iteration-limited runs are not errors; they are
/// reported through [`IlpStatus`](crate::IlpStatus).
#[derive(Error, Debug)]
pub enum IlpError {
    /// Problem validation failed
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// The relaxation oracle returned a status the search cannot act on
    #[error("Unknown oracle state: {0}")]
    UnknownOracleState(String),

    /// The LP solver rejected the relaxation it was given
    #[error("LP relaxation failed: {0}")]
    Oracle(#[from] LpError),

    /// Internal solver error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result type for ILP operations.
pub type IlpResult<T> = Result<T, IlpError>;
