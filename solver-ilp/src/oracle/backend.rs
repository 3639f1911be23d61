//! Relaxation backend trait and types.

use crate::error::IlpResult;
use crate::model::IntegerProgram;
use crate::search::{BoundChange, BoundKind};

/// Status of a relaxation solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxationStatus {
    /// Optimal vertex found.
    Optimal,

    /// Relaxation is infeasible (node can be pruned).
    Infeasible,

    /// Relaxation is unbounded.
    Unbounded,

    /// Backend ran out of iterations.
    IterationLimit,

    /// Numerical difficulties.
    NumericalError,
}

/// Result of solving one relaxation.
#[derive(Debug, Clone)]
pub struct Relaxation {
    /// Solve status.
    pub status: RelaxationStatus,

    /// Objective value (meaningful when optimal).
    pub obj_val: f64,

    /// Vertex solution (empty unless optimal).
    pub x: Vec<f64>,
}

impl Relaxation {
    /// Create an optimal result.
    pub fn optimal(obj_val: f64, x: Vec<f64>) -> Self {
        Self {
            status: RelaxationStatus::Optimal,
            obj_val,
            x,
        }
    }

    /// Create a result carrying no solution.
    pub fn without_solution(status: RelaxationStatus) -> Self {
        let obj_val = match status {
            RelaxationStatus::Infeasible => f64::NEG_INFINITY,
            RelaxationStatus::Unbounded => f64::INFINITY,
            _ => f64::NAN,
        };
        Self {
            status,
            obj_val,
            x: Vec::new(),
        }
    }

    /// Create an infeasible result.
    pub fn infeasible() -> Self {
        Self::without_solution(RelaxationStatus::Infeasible)
    }
}

/// The constraint system of one node: the shared program plus the node's
/// accumulated bounds. The objective is the program's `c`.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintSystem<'a> {
    /// Shared, read-only program.
    pub program: &'a IntegerProgram,

    /// Bounds added by branching.
    pub bounds: &'a [BoundChange],
}

impl<'a> ConstraintSystem<'a> {
    /// The unmodified program.
    pub fn root(program: &'a IntegerProgram) -> Self {
        Self {
            program,
            bounds: &[],
        }
    }

    /// The program restricted by `bounds`.
    pub fn with_bounds(program: &'a IntegerProgram, bounds: &'a [BoundChange]) -> Self {
        Self { program, bounds }
    }

    /// Fold the bounds into per-variable intervals `[lower, upper]`.
    ///
    /// Starts from `[0, inf)` and keeps the tightest bound seen per side.
    pub fn variable_bounds(&self) -> (Vec<f64>, Vec<f64>) {
        let n = self.program.num_vars();
        let mut lower = vec![0.0_f64; n];
        let mut upper = vec![f64::INFINITY; n];

        for bc in self.bounds {
            match bc.kind {
                BoundKind::Upper => upper[bc.var] = upper[bc.var].min(bc.value),
                BoundKind::Lower => lower[bc.var] = lower[bc.var].max(bc.value),
            }
        }

        (lower, upper)
    }
}

/// Trait for LP relaxation oracles.
///
/// Solves `max c^T x  s.t. A x <= b, x >= 0` plus the node's bounds, and
/// returns a vertex (basic feasible) solution when optimal: branching
/// inspects individual coordinates.
pub trait RelaxationBackend {
    /// Solve the relaxation of a constraint system.
    fn solve(&mut self, system: &ConstraintSystem<'_>) -> IlpResult<Relaxation>;
}

impl<B: RelaxationBackend + ?Sized> RelaxationBackend for &mut B {
    fn solve(&mut self, system: &ConstraintSystem<'_>) -> IlpResult<Relaxation> {
        (**self).solve(system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_bounds_fold() {
        let prob = IntegerProgram::from_dense(
            &[vec![1.0, 1.0, 1.0]],
            vec![10.0],
            vec![1.0, 1.0, 1.0],
        )
        .unwrap();

        let bounds = vec![
            BoundChange::down_branch(0, 4.5),
            BoundChange::up_branch(1, 1.2),
            BoundChange::down_branch(0, 3.5),
            BoundChange::up_branch(1, 0.2),
        ];
        let system = ConstraintSystem::with_bounds(&prob, &bounds);
        let (lower, upper) = system.variable_bounds();

        assert_eq!(lower, vec![0.0, 2.0, 0.0]);
        assert_eq!(upper, vec![3.0, f64::INFINITY, f64::INFINITY]);

        let (lower, upper) = ConstraintSystem::root(&prob).variable_bounds();
        assert_eq!(lower, vec![0.0; 3]);
        assert!(upper.iter().all(|u| u.is_infinite()));
    }

    #[test]
    fn test_relaxation_constructors() {
        let r = Relaxation::infeasible();
        assert_eq!(r.status, RelaxationStatus::Infeasible);
        assert!(r.x.is_empty());

        let r = Relaxation::without_solution(RelaxationStatus::Unbounded);
        assert_eq!(r.obj_val, f64::INFINITY);

        let r = Relaxation::optimal(5.0, vec![2.0, 3.0]);
        assert_eq!(r.status, RelaxationStatus::Optimal);
        assert_eq!(r.x.len(), 2);
    }
}
