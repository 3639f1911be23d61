//! Global bound bookkeeping and termination tests.

use super::{Frontier, NodeSelector};
use crate::model::{IlpSolution, IlpStatus};
use crate::settings::IlpSettings;

/// Why the exploration loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// |upper - lower| / |lower| <= opt_gap.
    RelativeGap,

    /// |upper - lower| <= abs_gap_tol.
    AbsoluteGap,

    /// Iteration counter exceeded max_iter.
    IterationLimit,

    /// No open nodes remain.
    FrontierExhausted,
}

impl Termination {
    /// Exit status reported for this termination.
    ///
    /// An exhausted frontier proves the incumbent (if any) exact.
    pub fn status(&self) -> IlpStatus {
        match self {
            Termination::IterationLimit => IlpStatus::MaxIterations,
            _ => IlpStatus::Optimal,
        }
    }
}

/// Global lower/upper bounds, iteration counter and bound trajectories.
#[derive(Debug, Clone)]
pub struct BoundTracker {
    /// Best integer objective found (-inf if none).
    pub lower_bound: f64,

    /// Best relaxation objective over the open region.
    pub upper_bound: f64,

    /// Iterations performed (2 per explored node).
    pub iterations: u64,

    lower_bounds: Vec<f64>,
    upper_bounds: Vec<f64>,

    max_iter: u64,
    opt_gap: f64,
    abs_gap_tol: f64,
}

impl BoundTracker {
    /// Start tracking from the root relaxation objective.
    pub fn new(root_bound: f64, settings: &IlpSettings) -> Self {
        Self {
            lower_bound: f64::NEG_INFINITY,
            upper_bound: root_bound,
            iterations: 0,
            lower_bounds: Vec::new(),
            upper_bounds: Vec::new(),
            max_iter: settings.max_iter,
            opt_gap: settings.opt_gap,
            abs_gap_tol: settings.abs_gap_tol,
        }
    }

    /// True once a lower bound (incumbent) exists.
    pub fn has_lower_bound(&self) -> bool {
        self.lower_bound > f64::NEG_INFINITY
    }

    /// Raise the lower bound. Never decreases it.
    pub fn raise_lower_bound(&mut self, obj: f64) {
        debug_assert!(obj >= self.lower_bound, "lower bound must not decrease");
        self.lower_bound = self.lower_bound.max(obj);
    }

    /// Recompute the upper bound from the open nodes.
    pub fn refresh<S: NodeSelector>(&mut self, frontier: &Frontier<S>) {
        self.upper_bound = match frontier.best_bound() {
            Some(best) => best.max(self.lower_bound),
            None => self.lower_bound,
        };
    }

    /// Append the current (lower, upper) pair to the trajectories.
    pub fn record(&mut self) {
        self.lower_bounds.push(self.lower_bound);
        self.upper_bounds.push(self.upper_bound);
    }

    /// Count one explored node.
    pub fn count_iteration(&mut self) {
        self.iterations += 2;
    }

    /// Consume the tracker and return both trajectories.
    pub fn into_trajectories(self) -> (Vec<f64>, Vec<f64>) {
        (self.lower_bounds, self.upper_bounds)
    }

    /// Final relative gap (None without incumbent or with a zero lower bound).
    pub fn gap(&self) -> Option<f64> {
        IlpSolution::compute_gap(self.lower_bound, self.upper_bound)
    }

    fn relative_gap_closed(&self) -> bool {
        self.has_lower_bound()
            && self.lower_bound != 0.0
            && ((self.upper_bound - self.lower_bound) / self.lower_bound).abs() <= self.opt_gap
    }

    fn absolute_gap_closed(&self) -> bool {
        self.has_lower_bound() && (self.upper_bound - self.lower_bound).abs() <= self.abs_gap_tol
    }

    /// Check termination conditions.
    ///
    /// Returns Some(reason) if the loop should stop, None otherwise.
    pub fn check_termination(&self, frontier_empty: bool) -> Option<Termination> {
        if self.relative_gap_closed() {
            return Some(Termination::RelativeGap);
        }
        if self.absolute_gap_closed() {
            return Some(Termination::AbsoluteGap);
        }
        if self.iterations > self.max_iter {
            return Some(Termination::IterationLimit);
        }
        if frontier_empty {
            return Some(Termination::FrontierExhausted);
        }
        None
    }
}
