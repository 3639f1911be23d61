//! Problem data structures and validation.
//!
//! The solver works with the canonical formulation:
//!
//! ```text
//! maximize    c^T x
//! subject to  A x <= b
//!             lower <= x <= upper
//! ```
//!
//! with `lower >= 0` componentwise, so `x >= 0` always holds.

use std::fmt;

use sprs::{CsMat, TriMat};

use crate::error::{LpError, LpResult};

/// Linear program in canonical (maximization, `<=`) form.
#[derive(Debug, Clone)]
pub struct LpProblem {
    /// Objective coefficients (length n).
    pub c: Vec<f64>,

    /// Constraint matrix (m × n, CSR).
    pub a: CsMat<f64>,

    /// Right-hand side (length m).
    pub b: Vec<f64>,

    /// Variable lower bounds (length n, each >= 0).
    pub lower: Vec<f64>,

    /// Variable upper bounds (length n, `f64::INFINITY` = none).
    pub upper: Vec<f64>,
}

impl LpProblem {
    /// Create a problem with the default bounds `0 <= x < inf`.
    ///
    /// The matrix is converted to CSR storage if needed.
    pub fn new(c: Vec<f64>, a: CsMat<f64>, b: Vec<f64>) -> LpResult<Self> {
        let n = c.len();
        let a = if a.is_csr() { a } else { a.to_other_storage() };
        let prob = Self {
            c,
            a,
            b,
            lower: vec![0.0; n],
            upper: vec![f64::INFINITY; n],
        };
        prob.validate()?;
        Ok(prob)
    }

    /// Create a problem from dense constraint rows.
    pub fn from_dense(c: Vec<f64>, rows: &[Vec<f64>], b: Vec<f64>) -> LpResult<Self> {
        let a = dense_to_csr(rows, c.len())?;
        Self::new(c, a, b)
    }

    /// Replace the variable bounds.
    pub fn with_bounds(mut self, lower: Vec<f64>, upper: Vec<f64>) -> LpResult<Self> {
        self.lower = lower;
        self.upper = upper;
        self.validate()?;
        Ok(self)
    }

    /// Number of variables (n).
    pub fn num_vars(&self) -> usize {
        self.c.len()
    }

    /// Number of constraint rows (m).
    pub fn num_constraints(&self) -> usize {
        self.b.len()
    }

    /// True if some variable has `lower > upper`.
    pub fn has_empty_domain(&self) -> bool {
        self.lower
            .iter()
            .zip(&self.upper)
            .any(|(&lo, &up)| lo > up)
    }

    /// Validate dimensions, finiteness and bounds.
    pub fn validate(&self) -> LpResult<()> {
        let n = self.num_vars();
        let m = self.num_constraints();

        if self.a.rows() != m {
            return Err(LpError::DimensionMismatch(format!(
                "A has {} rows, expected {}",
                self.a.rows(),
                m
            )));
        }
        if self.a.cols() != n {
            return Err(LpError::DimensionMismatch(format!(
                "A has {} cols, expected {}",
                self.a.cols(),
                n
            )));
        }
        if self.lower.len() != n || self.upper.len() != n {
            return Err(LpError::DimensionMismatch(format!(
                "bounds have lengths {}/{}, expected {}",
                self.lower.len(),
                self.upper.len(),
                n
            )));
        }

        if let Some(j) = self.c.iter().position(|v| !v.is_finite()) {
            return Err(LpError::NonFinite(format!("c[{}] = {}", j, self.c[j])));
        }
        if let Some(i) = self.b.iter().position(|v| !v.is_finite()) {
            return Err(LpError::NonFinite(format!("b[{}] = {}", i, self.b[i])));
        }
        if self.a.data().iter().any(|v| !v.is_finite()) {
            return Err(LpError::NonFinite("A has a non-finite entry".to_string()));
        }

        for (j, (&lo, &up)) in self.lower.iter().zip(&self.upper).enumerate() {
            if !lo.is_finite() || lo < 0.0 {
                return Err(LpError::InvalidBounds(format!(
                    "lower bound of x{} is {}, must be finite and >= 0",
                    j, lo
                )));
            }
            if up.is_nan() {
                return Err(LpError::InvalidBounds(format!("upper bound of x{} is NaN", j)));
            }
        }

        Ok(())
    }
}

/// Build a CSR matrix from dense rows of width `ncols`.
pub fn dense_to_csr(rows: &[Vec<f64>], ncols: usize) -> LpResult<CsMat<f64>> {
    let mut tri = TriMat::new((rows.len(), ncols));
    for (i, row) in rows.iter().enumerate() {
        if row.len() != ncols {
            return Err(LpError::DimensionMismatch(format!(
                "row {} has {} entries, expected {}",
                i,
                row.len(),
                ncols
            )));
        }
        for (j, &v) in row.iter().enumerate() {
            if v != 0.0 {
                tri.add_triplet(i, j, v);
            }
        }
    }
    Ok(tri.to_csr())
}

/// Solver settings.
#[derive(Debug, Clone)]
pub struct SolverSettings {
    /// Maximum number of simplex pivots (both phases).
    pub max_iter: usize,

    /// Smallest magnitude accepted as a pivot or an improving reduced cost.
    pub tol_pivot: f64,

    /// Phase-one infeasibility tolerance.
    pub tol_feas: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_iter: 50_000,
            tol_pivot: 1e-9,
            tol_feas: 1e-9,
        }
    }
}

/// Solution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Optimal vertex found.
    Optimal,

    /// No point satisfies the constraints.
    Infeasible,

    /// Objective grows without bound over the feasible region.
    Unbounded,

    /// Pivot limit reached.
    MaxIters,

    /// Phase one reported an impossible outcome.
    NumericalError,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::Unbounded => write!(f, "Unbounded"),
            SolveStatus::MaxIters => write!(f, "MaxIters"),
            SolveStatus::NumericalError => write!(f, "Numerical Error"),
        }
    }
}

/// Solve result.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Solution status.
    pub status: SolveStatus,

    /// Vertex solution (length n when optimal, empty otherwise).
    pub x: Vec<f64>,

    /// Objective value (`-inf` if infeasible, `+inf` if unbounded).
    pub obj_val: f64,

    /// Number of pivots performed.
    pub iters: usize,
}

impl SolveResult {
    pub(crate) fn without_solution(status: SolveStatus, iters: usize) -> Self {
        let obj_val = match status {
            SolveStatus::Unbounded => f64::INFINITY,
            SolveStatus::Infeasible => f64::NEG_INFINITY,
            _ => f64::NAN,
        };
        Self {
            status,
            x: Vec::new(),
            obj_val,
            iters,
        }
    }
}
