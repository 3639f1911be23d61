//! Pure integer program representation.

use solver_lp::dense_to_csr;
use sprs::CsMat;

use crate::error::{IlpError, IlpResult};

/// Pure integer linear program.
///
/// ```text
/// maximize    c^T x
/// subject to  A x <= b
///             x >= 0, x integer
/// ```
///
/// Immutable once built; every search node refers to the same instance.
#[derive(Debug, Clone)]
pub struct IntegerProgram {
    /// Objective coefficients (length n).
    c: Vec<f64>,

    /// Constraint matrix (m × n, CSR).
    a: CsMat<f64>,

    /// Right-hand side (length m).
    b: Vec<f64>,
}

impl IntegerProgram {
    /// Create a program from a sparse constraint matrix.
    pub fn new(a: CsMat<f64>, b: Vec<f64>, c: Vec<f64>) -> IlpResult<Self> {
        let a = if a.is_csr() { a } else { a.to_other_storage() };

        if a.rows() != b.len() {
            return Err(IlpError::InvalidProblem(format!(
                "A has {} rows but b has length {}",
                a.rows(),
                b.len()
            )));
        }
        if a.cols() != c.len() {
            return Err(IlpError::InvalidProblem(format!(
                "A has {} cols but c has length {}",
                a.cols(),
                c.len()
            )));
        }
        if c.iter().chain(&b).chain(a.data()).any(|v| !v.is_finite()) {
            return Err(IlpError::InvalidProblem(
                "problem data must be finite".to_string(),
            ));
        }

        Ok(Self { c, a, b })
    }

    /// Create a program from dense constraint rows.
    pub fn from_dense(a: &[Vec<f64>], b: Vec<f64>, c: Vec<f64>) -> IlpResult<Self> {
        let a = dense_to_csr(a, c.len()).map_err(|e| IlpError::InvalidProblem(e.to_string()))?;
        Self::new(a, b, c)
    }

    /// Copy of this program with an all-zero objective.
    pub fn with_zero_objective(&self) -> Self {
        Self {
            c: vec![0.0; self.c.len()],
            a: self.a.clone(),
            b: self.b.clone(),
        }
    }

    /// Objective coefficients.
    pub fn c(&self) -> &[f64] {
        &self.c
    }

    /// Constraint matrix (CSR).
    pub fn a(&self) -> &CsMat<f64> {
        &self.a
    }

    /// Right-hand side.
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Number of variables.
    pub fn num_vars(&self) -> usize {
        self.c.len()
    }

    /// Number of constraints.
    pub fn num_constraints(&self) -> usize {
        self.b.len()
    }

    /// Objective value c^T x.
    pub fn objective(&self, x: &[f64]) -> f64 {
        self.c.iter().zip(x).map(|(c, x)| c * x).sum()
    }

    /// Row activities A x.
    pub fn activities(&self, x: &[f64]) -> Vec<f64> {
        self.a
            .outer_iterator()
            .map(|row| row.iter().map(|(j, &v)| v * x[j]).sum())
            .collect()
    }

    /// Check A x <= b and x >= 0 within tolerance.
    pub fn satisfies_constraints(&self, x: &[f64], tol: f64) -> bool {
        if x.len() != self.num_vars() || x.iter().any(|&v| v < -tol) {
            return false;
        }
        self.activities(x)
            .iter()
            .zip(&self.b)
            .all(|(ax, b)| *ax <= b + tol)
    }

    /// Check that every coordinate is within `tol` of an integer.
    pub fn is_integral(x: &[f64], tol: f64) -> bool {
        x.iter().all(|&v| Self::fractionality(v) <= tol)
    }

    /// Distance of a value to its nearest integer.
    pub fn fractionality(val: f64) -> f64 {
        (val - val.round()).abs()
    }
}
