//! Branch-and-bound for pure integer linear programs.
//!
//! Solves
//!
//! ```text
//! maximize    c^T x
//! subject to  A x <= b
//!             x >= 0,  x integer
//! ```
//!
//! by repeatedly solving LP relaxations (through a [`RelaxationBackend`])
//! and splitting on fractional coordinates. The search reports an exit
//! status, the best integer point found, the final gap and the trajectory
//! of global bounds.
//!
//! # Example
//!
//! ```
//! use solver_ilp::{solve_ilp, IlpSettings, IlpStatus, IntegerProgram};
//!
//! // max x + y  s.t.  x <= 2.5,  y <= 3.5
//! let prob = IntegerProgram::from_dense(
//!     &[vec![1.0, 0.0], vec![0.0, 1.0]],
//!     vec![2.5, 3.5],
//!     vec![1.0, 1.0],
//! )?;
//!
//! let sol = solve_ilp(&prob, &IlpSettings::default())?;
//! assert_eq!(sol.status, IlpStatus::Optimal);
//! assert_eq!(sol.x, Some(vec![2.0, 3.0]));
//! assert_eq!(sol.obj_val, Some(5.0));
//! # Ok::<(), solver_ilp::IlpError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod model;
pub mod oracle;
pub mod search;
pub mod settings;

pub use error::{IlpError, IlpResult};
pub use model::{IlpSolution, IlpStatus, IncumbentTracker, IntegerProgram, SearchStats};
pub use oracle::{ConstraintSystem, Relaxation, RelaxationBackend, RelaxationStatus, SimplexBackend};
pub use search::{
    BranchAndBound, FeasibilityHeuristic, FirstFractional, NoHeuristic, RoundingHeuristic,
    VariableSelector,
};
pub use settings::{IlpSettings, NodeSelection};

/// Main solve entry point.
///
/// Runs branch-and-bound with the simplex relaxation backend, first-fractional
/// branching and the seeded rounding heuristic. Infeasible, unbounded and
/// iteration-limited runs are reported through [`IlpStatus`].
pub fn solve_ilp(prob: &IntegerProgram, settings: &IlpSettings) -> IlpResult<IlpSolution> {
    let mut bnb = BranchAndBound::with_defaults(settings.clone());

    if settings.verbose {
        log::info!(
            "solver-ilp: {} variables, {} constraints, {:?} node selection",
            prob.num_vars(),
            prob.num_constraints(),
            settings.node_selection,
        );
    }

    let sol = bnb.solve(prob)?;

    if settings.verbose {
        log::info!(
            "Status: {} | {} relaxations, {} simplex pivots",
            sol.status,
            bnb.backend().num_solves(),
            bnb.backend().num_pivots(),
        );
    }

    Ok(sol)
}
