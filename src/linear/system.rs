//! Immutable pairing of a coefficient matrix and a right-hand side.

use crate::core::{Matrix, Vector};
use crate::error::{NumericalError, Result};

/// Linear system `A·x = b`.
///
/// Shapes are not checked here. Each solver validates them before use, so the
/// same value can be handed to several methods.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    a: Matrix,
    b: Vector,
}

impl LinearSystem {
    pub fn new(a: Matrix, b: Vector) -> Self {
        Self { a, b }
    }

    /// System size, taken from the right-hand side.
    pub fn size(&self) -> usize {
        self.b.len()
    }

    /// Coefficient matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.a
    }

    /// Right-hand side.
    pub fn rhs(&self) -> &Vector {
        &self.b
    }

    /// Consume the system, returning owned copies for in-place elimination.
    pub fn into_parts(self) -> (Matrix, Vector) {
        (self.a, self.b)
    }

    /// Infinity norm of the residual `A·x − b`.
    pub fn residual_inf(&self, x: &Vector) -> Result<f64> {
        let ax = self.a.multiply(x)?;
        if ax.len() != self.b.len() {
            return Err(NumericalError::dimension_mismatch(format!(
                "A·x has length {}, b has length {}",
                ax.len(),
                self.b.len()
            )));
        }
        Ok(ax
            .iter()
            .zip(self.b.iter())
            .fold(0.0f64, |acc, (l, r)| acc.max((l - r).abs())))
    }

    /// Check that `A` is `n × n` with `n = b.len()`.
    pub(crate) fn ensure_square(&self, context: &str) -> Result<usize> {
        let n = self.size();
        if self.a.rows() != n || self.a.cols() != n {
            return Err(NumericalError::dimension_mismatch(format!(
                "{context}: coefficient matrix is {}x{}, right-hand side has length {n}",
                self.a.rows(),
                self.a.cols()
            )));
        }
        Ok(n)
    }
}
