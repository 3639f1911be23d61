//! Branching variable selection.

use super::BoundChange;
use crate::model::IntegerProgram;

/// A branching decision.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchDecision {
    /// Variable to branch on.
    pub var: usize,

    /// Current (fractional) value.
    pub value: f64,

    /// Bound change for "down" branch (x <= floor(value)).
    pub down_branch: BoundChange,

    /// Bound change for "up" branch (x >= ceil(value)).
    pub up_branch: BoundChange,
}

impl BranchDecision {
    /// Split on `var` at its fractional `value`.
    ///
    /// The open interval (floor(value), ceil(value)) holds no integer, so the
    /// two children together keep every integer point of the parent.
    pub fn new(var: usize, value: f64) -> Self {
        Self {
            var,
            value,
            down_branch: BoundChange::down_branch(var, value),
            up_branch: BoundChange::up_branch(var, value),
        }
    }
}

/// Branching variable selector.
pub trait VariableSelector {
    /// Select the coordinate of `x` to branch on.
    ///
    /// Returns None if `x` is integral within `tol`.
    fn select(&self, x: &[f64], tol: f64) -> Option<usize>;

    /// Select a variable and build the decision for it.
    fn decide(&self, x: &[f64], tol: f64) -> Option<BranchDecision> {
        self.select(x, tol).map(|var| BranchDecision::new(var, x[var]))
    }
}

/// Branch on the lowest-index fractional coordinate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFractional;

impl VariableSelector for FirstFractional {
    fn select(&self, x: &[f64], tol: f64) -> Option<usize> {
        x.iter()
            .position(|&v| IntegerProgram::fractionality(v) > tol)
    }
}
