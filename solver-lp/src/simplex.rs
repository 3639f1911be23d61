//! Dense two-phase primal simplex.
//!
//! Every row `a_i x <= b_i` (including finite variable bounds) gets a slack.
//! Rows with `b_i < 0` are negated and receive an artificial variable, which
//! phase one drives to zero. Phase two then maximizes `c^T x` from the
//! resulting basis. Pivoting follows Bland's rule in both phases, so the
//! method is deterministic and cannot cycle on degenerate vertices.

// Indexed loops are clearer for tableau operations
#![allow(clippy::needless_range_loop)]

use crate::problem::{LpProblem, SolveResult, SolveStatus, SolverSettings};

/// Outcome of one optimization phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhaseOutcome {
    Optimal,
    Unbounded,
    IterationLimit,
}

/// Dense simplex tableau.
///
/// Rows `0..m` hold the constraints `[A | S | R | rhs]`; row `m` holds the
/// objective in `z - c^T x = 0` form, so a negative entry is an improving
/// column and the last entry is the current objective value.
struct Tableau {
    /// Constraint rows plus the objective row.
    rows: Vec<Vec<f64>>,

    /// Basic variable of each constraint row.
    basis: Vec<usize>,

    /// Number of structural variables.
    n: usize,

    /// Index of the first artificial column.
    first_artificial: usize,

    /// Index of the right-hand-side column.
    rhs: usize,
}

impl Tableau {
    /// Build the initial tableau with a slack/artificial starting basis.
    fn build(prob: &LpProblem) -> Self {
        let n = prob.num_vars();

        // Gather rows: A x <= b, then x_j <= u_j, then -x_j <= -l_j
        let mut lhs: Vec<Vec<(usize, f64)>> = Vec::new();
        let mut rhs_vals: Vec<f64> = Vec::new();

        for (row, &bi) in prob.a.outer_iterator().zip(&prob.b) {
            lhs.push(row.iter().map(|(j, &v)| (j, v)).collect());
            rhs_vals.push(bi);
        }
        for (j, &up) in prob.upper.iter().enumerate() {
            if up.is_finite() {
                lhs.push(vec![(j, 1.0)]);
                rhs_vals.push(up);
            }
        }
        for (j, &lo) in prob.lower.iter().enumerate() {
            if lo > 0.0 {
                lhs.push(vec![(j, -1.0)]);
                rhs_vals.push(-lo);
            }
        }

        let m = lhs.len();
        let num_artificial = rhs_vals.iter().filter(|&&v| v < 0.0).count();
        let first_artificial = n + m;
        let rhs = first_artificial + num_artificial;

        let mut rows = vec![vec![0.0; rhs + 1]; m + 1];
        let mut basis = vec![0; m];
        let mut next_artificial = first_artificial;

        for (i, (entries, &bi)) in lhs.iter().zip(&rhs_vals).enumerate() {
            let sign = if bi < 0.0 { -1.0 } else { 1.0 };
            for &(j, v) in entries {
                rows[i][j] = sign * v;
            }
            rows[i][n + i] = sign;
            rows[i][rhs] = sign * bi;

            if bi < 0.0 {
                rows[i][next_artificial] = 1.0;
                basis[i] = next_artificial;
                next_artificial += 1;
            } else {
                basis[i] = n + i;
            }
        }

        Self {
            rows,
            basis,
            n,
            first_artificial,
            rhs,
        }
    }

    fn num_rows(&self) -> usize {
        self.basis.len()
    }

    fn has_artificials(&self) -> bool {
        self.rhs > self.first_artificial
    }

    fn objective_value(&self) -> f64 {
        self.rows[self.num_rows()][self.rhs]
    }

    /// Phase one: maximize `-sum(artificials)`.
    fn set_phase_one_objective(&mut self) {
        let m = self.num_rows();
        let mut obj = vec![0.0; self.rhs + 1];
        for j in self.first_artificial..self.rhs {
            obj[j] = 1.0;
        }
        // Price out the basic artificials
        for i in 0..m {
            if self.basis[i] >= self.first_artificial {
                for (o, &t) in obj.iter_mut().zip(&self.rows[i]) {
                    *o -= t;
                }
            }
        }
        self.rows[m] = obj;
    }

    /// Phase two: maximize `c^T x` from the current basis.
    fn set_phase_two_objective(&mut self, c: &[f64]) {
        let m = self.num_rows();
        let mut obj = vec![0.0; self.rhs + 1];
        for (o, &cj) in obj.iter_mut().zip(c) {
            *o = -cj;
        }
        for i in 0..m {
            let bv = self.basis[i];
            let cost = if bv < self.n { c[bv] } else { 0.0 };
            if cost != 0.0 {
                for (o, &t) in obj.iter_mut().zip(&self.rows[i]) {
                    *o += cost * t;
                }
            }
        }
        self.rows[m] = obj;
    }

    /// Run primal simplex iterations on the current objective row.
    fn optimize(
        &mut self,
        settings: &SolverSettings,
        iters: &mut usize,
        allow_artificial: bool,
    ) -> PhaseOutcome {
        let m = self.num_rows();
        let last_col = if allow_artificial {
            self.rhs
        } else {
            self.first_artificial
        };

        loop {
            // Bland: smallest improving column
            let entering = (0..last_col).find(|&j| self.rows[m][j] < -settings.tol_pivot);
            let Some(col) = entering else {
                return PhaseOutcome::Optimal;
            };

            if *iters >= settings.max_iter {
                return PhaseOutcome::IterationLimit;
            }

            // Ratio test, ties to the smallest basic index
            let mut leaving: Option<(usize, f64)> = None;
            for i in 0..m {
                let a = self.rows[i][col];
                if a <= settings.tol_pivot {
                    continue;
                }
                let ratio = self.rows[i][self.rhs] / a;
                leaving = match leaving {
                    None => Some((i, ratio)),
                    Some((r, best)) => {
                        if ratio < best - 1e-12
                            || ((ratio - best).abs() <= 1e-12 && self.basis[i] < self.basis[r])
                        {
                            Some((i, ratio))
                        } else {
                            Some((r, best))
                        }
                    }
                };
            }

            let Some((row, _)) = leaving else {
                return PhaseOutcome::Unbounded;
            };

            self.pivot(row, col);
            *iters += 1;
        }
    }

    /// Pivot `col` into the basis at `row`.
    fn pivot(&mut self, row: usize, col: usize) {
        let p = self.rows[row][col];
        for v in self.rows[row].iter_mut() {
            *v /= p;
        }
        let pivot_row = self.rows[row].clone();

        for (i, r) in self.rows.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = r[col];
            if factor != 0.0 {
                for (v, &pv) in r.iter_mut().zip(&pivot_row) {
                    *v -= factor * pv;
                }
            }
        }
        self.basis[row] = col;
    }

    /// Replace artificials left in the basis at zero level.
    ///
    /// Rows where no non-artificial pivot exists are redundant and keep their
    /// artificial; it stays at zero because artificials never re-enter.
    fn drive_out_artificials(&mut self, tol: f64) {
        for i in 0..self.num_rows() {
            if self.basis[i] < self.first_artificial {
                continue;
            }
            if let Some(col) = (0..self.first_artificial).find(|&j| self.rows[i][j].abs() > tol) {
                self.pivot(i, col);
            }
        }
    }

    /// Read the structural part of the current basic solution.
    fn vertex(&self) -> Vec<f64> {
        let mut x = vec![0.0; self.n];
        for (i, &bv) in self.basis.iter().enumerate() {
            if bv < self.n {
                x[bv] = self.rows[i][self.rhs].max(0.0);
            }
        }
        x
    }
}

/// Solve a validated LP.
pub(crate) fn solve_simplex(prob: &LpProblem, settings: &SolverSettings) -> SolveResult {
    if prob.has_empty_domain() {
        return SolveResult::without_solution(SolveStatus::Infeasible, 0);
    }

    let mut tab = Tableau::build(prob);
    let mut iters = 0;

    if tab.has_artificials() {
        tab.set_phase_one_objective();
        match tab.optimize(settings, &mut iters, true) {
            PhaseOutcome::Optimal => {}
            PhaseOutcome::IterationLimit => {
                return SolveResult::without_solution(SolveStatus::MaxIters, iters);
            }
            PhaseOutcome::Unbounded => {
                // The phase-one objective is bounded above by zero
                return SolveResult::without_solution(SolveStatus::NumericalError, iters);
            }
        }

        let infeasibility = -tab.objective_value();
        if infeasibility > settings.tol_feas {
            log::trace!("phase one ended with infeasibility {:.3e}", infeasibility);
            return SolveResult::without_solution(SolveStatus::Infeasible, iters);
        }

        tab.drive_out_artificials(settings.tol_pivot);
    }

    tab.set_phase_two_objective(&prob.c);
    match tab.optimize(settings, &mut iters, false) {
        PhaseOutcome::Optimal => {}
        PhaseOutcome::Unbounded => {
            return SolveResult::without_solution(SolveStatus::Unbounded, iters);
        }
        PhaseOutcome::IterationLimit => {
            return SolveResult::without_solution(SolveStatus::MaxIters, iters);
        }
    }

    let x = tab.vertex();
    let obj_val = prob.c.iter().zip(&x).map(|(c, x)| c * x).sum();
    log::trace!("simplex optimal after {} pivots, obj={:.6}", iters, obj_val);

    SolveResult {
        status: SolveStatus::Optimal,
        x,
        obj_val,
        iters,
    }
}
