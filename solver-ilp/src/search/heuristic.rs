//! Primal heuristics for seeding the incumbent.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::IntegerProgram;

/// Tolerance for A x <= b when checking rounded candidates.
const FEAS_TOL: f64 = 1e-9;

/// Derives an integer-feasible point from a fractional root vertex.
pub trait FeasibilityHeuristic {
    /// Return an integer point satisfying A x <= b, x >= 0, if one is found.
    fn find_feasible(&mut self, prob: &IntegerProgram, x: &[f64]) -> Option<Vec<f64>>;

    /// Return to the initial state. Called at the start of every solve.
    fn reset(&mut self) {}
}

/// Rounding heuristic.
///
/// Tries, in order: rounding every coordinate down, rounding up, randomized
/// rounding (up with probability equal to the fractional part), and the zero
/// vector. The first candidate satisfying the constraints is returned.
///
/// [`reset`](FeasibilityHeuristic::reset) rewinds the generator to its
/// initial state, so repeated solves draw the same sequence.
#[derive(Debug, Clone)]
pub struct RoundingHeuristic<R: Rng + Clone = StdRng> {
    rng: R,
    initial: R,
}

impl RoundingHeuristic<StdRng> {
    /// Create a heuristic drawing from a seeded `StdRng`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Clone> RoundingHeuristic<R> {
    /// Create a heuristic drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            initial: rng.clone(),
            rng,
        }
    }

    fn randomized(&mut self, x: &[f64]) -> Vec<f64> {
        x.iter()
            .map(|&v| {
                let down = v.floor();
                let frac = (v - down).clamp(0.0, 1.0);
                if self.rng.gen_bool(frac) {
                    down + 1.0
                } else {
                    down
                }
            })
            .collect()
    }
}

impl<R: Rng + Clone> FeasibilityHeuristic for RoundingHeuristic<R> {
    fn find_feasible(&mut self, prob: &IntegerProgram, x: &[f64]) -> Option<Vec<f64>> {
        let down: Vec<f64> = x.iter().map(|v| v.floor()).collect();
        if prob.satisfies_constraints(&down, FEAS_TOL) {
            log::debug!("rounding heuristic: floor point is feasible");
            return Some(down);
        }

        let up: Vec<f64> = x.iter().map(|v| v.ceil()).collect();
        if prob.satisfies_constraints(&up, FEAS_TOL) {
            log::debug!("rounding heuristic: ceil point is feasible");
            return Some(up);
        }

        let random = self.randomized(x);
        if prob.satisfies_constraints(&random, FEAS_TOL) {
            log::debug!("rounding heuristic: randomized point is feasible");
            return Some(random);
        }

        let zero = vec![0.0; x.len()];
        if prob.satisfies_constraints(&zero, FEAS_TOL) {
            log::debug!("rounding heuristic: zero point is feasible");
            return Some(zero);
        }

        None
    }

    fn reset(&mut self) {
        self.rng = self.initial.clone();
    }
}

/// Heuristic that never finds a point; the search starts without incumbent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHeuristic;

impl FeasibilityHeuristic for NoHeuristic {
    fn find_feasible(&mut self, _prob: &IntegerProgram, _x: &[f64]) -> Option<Vec<f64>> {
        None
    }
}
