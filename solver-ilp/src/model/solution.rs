//! ILP solution types.

use std::fmt;

/// Status of the ILP solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IlpStatus {
    /// Gap closed or search exhausted; the incumbent is optimal within tolerance.
    Optimal,

    /// Problem has no integer-feasible point.
    Infeasible,

    /// Problem is feasible and its objective is unbounded.
    Unbounded,

    /// Iteration limit reached, best incumbent returned.
    MaxIterations,
}

impl IlpStatus {
    /// Returns true if an integer-feasible solution is reported.
    pub fn has_solution(&self) -> bool {
        matches!(self, IlpStatus::Optimal | IlpStatus::MaxIterations)
    }

    /// Returns true if optimality was proven within tolerance.
    pub fn is_optimal(&self) -> bool {
        matches!(self, IlpStatus::Optimal)
    }
}

impl fmt::Display for IlpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IlpStatus::Optimal => write!(f, "Optimal"),
            IlpStatus::Infeasible => write!(f, "Infeasible"),
            IlpStatus::Unbounded => write!(f, "Unbounded"),
            IlpStatus::MaxIterations => write!(f, "Maximum number of iterations reached"),
        }
    }
}

/// Search statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Iteration count (2 per explored node: attempted child relaxations).
    pub iterations: u64,

    /// Final relative gap |upper - lower| / |lower| (None if lower is 0 or absent).
    pub gap: Option<f64>,

    /// Lower bound after root seeding and after every iteration.
    pub lower_bounds: Vec<f64>,

    /// Upper bound after root seeding and after every iteration.
    pub upper_bounds: Vec<f64>,

    /// Nodes taken from the frontier and branched.
    pub nodes_explored: u64,

    /// Children discarded as infeasible or dominated.
    pub nodes_pruned: u64,

    /// Number of times the incumbent improved (heuristic seed included).
    pub incumbent_updates: u64,
}

/// Complete ILP solution with diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct IlpSolution {
    /// Solve status.
    pub status: IlpStatus,

    /// Best integer point found.
    pub x: Option<Vec<f64>>,

    /// Objective value of `x`.
    pub obj_val: Option<f64>,

    /// Search statistics.
    pub stats: SearchStats,
}

impl IlpSolution {
    /// Create a solution indicating infeasibility.
    pub fn infeasible(iterations: u64) -> Self {
        Self {
            status: IlpStatus::Infeasible,
            x: None,
            obj_val: None,
            stats: SearchStats {
                iterations,
                ..Default::default()
            },
        }
    }

    /// Create a solution indicating unboundedness.
    pub fn unbounded(iterations: u64) -> Self {
        Self {
            status: IlpStatus::Unbounded,
            x: None,
            obj_val: None,
            stats: SearchStats {
                iterations,
                ..Default::default()
            },
        }
    }

    /// Create an optimal solution found directly at the root.
    pub fn integral_root(x: Vec<f64>, obj_val: f64) -> Self {
        Self {
            status: IlpStatus::Optimal,
            x: Some(x),
            obj_val: Some(obj_val),
            stats: SearchStats {
                gap: Some(0.0),
                lower_bounds: vec![obj_val],
                upper_bounds: vec![obj_val],
                incumbent_updates: 1,
                ..Default::default()
            },
        }
    }

    /// Compute the relative gap |upper - lower| / |lower|.
    ///
    /// Undefined when the lower bound is zero or there is no incumbent.
    pub fn compute_gap(lower: f64, upper: f64) -> Option<f64> {
        if lower == 0.0 || !lower.is_finite() || !upper.is_finite() {
            return None;
        }
        Some((upper - lower).abs() / lower.abs())
    }
}

/// Tracks the best known integer-feasible point (incumbent).
#[derive(Debug, Clone)]
pub struct IncumbentTracker {
    /// Current best solution (if any).
    pub solution: Option<Vec<f64>>,

    /// Objective value of incumbent (lower bound).
    /// Initialized to -inf for maximization.
    pub obj_val: f64,

    /// Number of times incumbent was updated.
    pub update_count: u64,
}

impl Default for IncumbentTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl IncumbentTracker {
    /// Create a new incumbent tracker.
    pub fn new() -> Self {
        Self {
            solution: None,
            obj_val: f64::NEG_INFINITY,
            update_count: 0,
        }
    }

    /// Check if we have an incumbent.
    pub fn has_incumbent(&self) -> bool {
        self.solution.is_some()
    }

    /// Try to update incumbent with a new solution.
    ///
    /// Returns true if the incumbent was improved.
    pub fn update(&mut self, x: &[f64], obj: f64) -> bool {
        // For maximization, accept if strictly better
        if obj > self.obj_val {
            self.solution = Some(x.to_vec());
            self.obj_val = obj;
            self.update_count += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incumbent_tracker() {
        let mut tracker = IncumbentTracker::new();

        assert!(!tracker.has_incumbent());
        assert_eq!(tracker.obj_val, f64::NEG_INFINITY);

        // First solution
        assert!(tracker.update(&[1.0, 2.0], 10.0));
        assert!(tracker.has_incumbent());
        assert_eq!(tracker.obj_val, 10.0);
        assert_eq!(tracker.update_count, 1);

        // Worse solution (rejected)
        assert!(!tracker.update(&[0.0, 3.0], 5.0));
        assert_eq!(tracker.obj_val, 10.0);
        assert_eq!(tracker.update_count, 1);

        // Better solution (accepted)
        assert!(tracker.update(&[3.0, 3.0], 15.0));
        assert_eq!(tracker.obj_val, 15.0);
        assert_eq!(tracker.solution.as_deref(), Some(&[3.0, 3.0][..]));
        assert_eq!(tracker.update_count, 2);
    }

    #[test]
    fn test_gap_computation() {
        // |10 - 8| / |8| = 0.25
        let gap = IlpSolution::compute_gap(8.0, 10.0).unwrap();
        assert!((gap - 0.25).abs() < 1e-12);

        // Negative objectives use the magnitude of the lower bound
        let gap = IlpSolution::compute_gap(-4.0, -3.0).unwrap();
        assert!((gap - 0.25).abs() < 1e-12);

        assert_eq!(IlpSolution::compute_gap(0.0, 1.0), None);
        assert_eq!(IlpSolution::compute_gap(f64::NEG_INFINITY, 1.0), None);
    }

    #[test]
    fn test_status_methods() {
        assert!(IlpStatus::Optimal.has_solution());
        assert!(IlpStatus::MaxIterations.has_solution());
        assert!(!IlpStatus::Infeasible.has_solution());
        assert!(!IlpStatus::Unbounded.has_solution());

        assert!(IlpStatus::Optimal.is_optimal());
        assert!(!IlpStatus::MaxIterations.is_optimal());

        assert_eq!(
            IlpStatus::MaxIterations.to_string(),
            "Maximum number of iterations reached"
        );
    }

    #[test]
    fn test_integral_root_solution() {
        let sol = IlpSolution::integral_root(vec![2.0, 3.0], 5.0);
        assert_eq!(sol.status, IlpStatus::Optimal);
        assert_eq!(sol.stats.iterations, 0);
        assert_eq!(sol.stats.lower_bounds, vec![5.0]);
        assert_eq!(sol.stats.upper_bounds, vec![5.0]);
    }
}
