//! LP relaxation solver for the minix integer layer.
//!
//! A dense two-phase primal simplex for problems of the form
//!
//! ```text
//! maximize    c^T x
//! subject to  A x <= b
//!             lower <= x <= upper,  lower >= 0
//! ```
//!
//! Optimal results are always basic feasible solutions (vertices), which is
//! what branching on fractional coordinates relies on.
//!
//! # Example
//!
//! ```
//! use solver_lp::{solve, LpProblem, SolveStatus, SolverSettings};
//!
//! // max x + 2y  s.t.  x + y <= 4,  x <= 2,  y <= 3
//! let prob = LpProblem::from_dense(
//!     vec![1.0, 2.0],
//!     &[vec![1.0, 1.0], vec![1.0, 0.0], vec![0.0, 1.0]],
//!     vec![4.0, 2.0, 3.0],
//! )?;
//!
//! let result = solve(&prob, &SolverSettings::default())?;
//! assert_eq!(result.status, SolveStatus::Optimal);
//! assert!((result.obj_val - 7.0).abs() < 1e-9);
//! # Ok::<(), solver_lp::LpError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod problem;
mod simplex;

pub use error::{LpError, LpResult};
pub use problem::{dense_to_csr, LpProblem, SolveResult, SolveStatus, SolverSettings};

/// Main solve entry point.
///
/// Validates the problem and runs the simplex method. Infeasible and
/// unbounded problems are reported through [`SolveStatus`], not as errors.
pub fn solve(problem: &LpProblem, settings: &SolverSettings) -> LpResult<SolveResult> {
    problem.validate()?;
    Ok(simplex::solve_simplex(problem, settings))
}
