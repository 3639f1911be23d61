//! Relaxation backend using the solver-lp simplex.
//!
//! Branching bounds are folded into variable bounds of the LP rather than
//! appended as generic rows, and the shared program is never copied beyond
//! the per-solve LP assembly.

use solver_lp::{solve, LpProblem, SolveStatus, SolverSettings};

use super::{ConstraintSystem, Relaxation, RelaxationBackend, RelaxationStatus};
use crate::error::IlpResult;

/// Relaxation backend using the dense simplex from solver-lp.
#[derive(Debug, Clone, Default)]
pub struct SimplexBackend {
    /// Simplex settings.
    settings: SolverSettings,

    /// Relaxations solved so far.
    solves: u64,

    /// Total simplex pivots over all solves.
    pivots: u64,
}

impl SimplexBackend {
    /// Create a new simplex backend.
    pub fn new(settings: SolverSettings) -> Self {
        Self {
            settings,
            solves: 0,
            pivots: 0,
        }
    }

    /// Number of relaxations solved.
    pub fn num_solves(&self) -> u64 {
        self.solves
    }

    /// Total simplex pivots.
    pub fn num_pivots(&self) -> u64 {
        self.pivots
    }
}

impl RelaxationBackend for SimplexBackend {
    fn solve(&mut self, system: &ConstraintSystem<'_>) -> IlpResult<Relaxation> {
        let (lower, upper) = system.variable_bounds();

        // Crossed bounds: empty region, no LP needed
        if lower.iter().zip(&upper).any(|(lo, up)| lo > up) {
            return Ok(Relaxation::infeasible());
        }

        let prog = system.program;
        let lp = LpProblem::new(prog.c().to_vec(), prog.a().clone(), prog.b().to_vec())?
            .with_bounds(lower, upper)?;

        let result = solve(&lp, &self.settings)?;
        self.solves += 1;
        self.pivots += result.iters as u64;

        let status = match result.status {
            SolveStatus::Optimal => RelaxationStatus::Optimal,
            SolveStatus::Infeasible => RelaxationStatus::Infeasible,
            SolveStatus::Unbounded => RelaxationStatus::Unbounded,
            SolveStatus::MaxIters => RelaxationStatus::IterationLimit,
            SolveStatus::NumericalError => RelaxationStatus::NumericalError,
        };

        if status != RelaxationStatus::Optimal {
            return Ok(Relaxation::without_solution(status));
        }

        Ok(Relaxation::optimal(result.obj_val, result.x))
    }
}
