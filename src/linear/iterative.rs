//! Stationary iterative solvers: Jacobi and Gauss-Seidel.
//!
//! Both apply the same row update
//!
//! ```text
//! x_i <- (b_i - sum_{j != i} a_ij * x_j) / a_ii
//! ```
//!
//! for a fixed number of sweeps, with no tolerance-based early exit. Jacobi
//! reads every `x_j` from the previous sweep. Gauss-Seidel writes `x_i` back
//! immediately, so later rows in the same sweep already see the new values.

use crate::core::Vector;
use crate::error::{NumericalError, Result};

use super::{LinearSystem, PIVOT_EPSILON};

/// Iterate after one sweep (iteration 0 is the initial guess).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IterativeTraceStep {
    pub iter: usize,
    pub x: Vector,
}

/// Record of a Jacobi or Gauss-Seidel run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct IterativeMethodTrace {
    pub steps: Vec<IterativeTraceStep>,
}

impl IterativeMethodTrace {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Where a sweep reads the other components from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Update {
    /// Jacobi: read the previous sweep only.
    Simultaneous,
    /// Gauss-Seidel: read the vector being updated.
    InPlace,
}

impl Update {
    fn name(self) -> &'static str {
        match self {
            Update::Simultaneous => "Jacobi",
            Update::InPlace => "Gauss-Seidel",
        }
    }
}

/// Run `iterations` Jacobi sweeps starting from `x0`.
///
/// # Errors
///
/// - [`NumericalError::DimensionMismatch`] if `A` is not `n × n` or `b`/`x0`
///   do not have length `n`
/// - [`NumericalError::SingularMatrix`] if a diagonal entry is (nearly) zero
pub fn jacobi(
    system: &LinearSystem,
    x0: &Vector,
    iterations: usize,
    trace: Option<&mut IterativeMethodTrace>,
) -> Result<Vector> {
    iterate(Update::Simultaneous, system, x0, iterations, trace)
}

/// Run `iterations` Gauss-Seidel sweeps starting from `x0`.
///
/// # Errors
///
/// Same conditions as [`jacobi`].
pub fn gauss_seidel(
    system: &LinearSystem,
    x0: &Vector,
    iterations: usize,
    trace: Option<&mut IterativeMethodTrace>,
) -> Result<Vector> {
    iterate(Update::InPlace, system, x0, iterations, trace)
}

fn iterate(
    update: Update,
    system: &LinearSystem,
    x0: &Vector,
    iterations: usize,
    mut trace: Option<&mut IterativeMethodTrace>,
) -> Result<Vector> {
    let n = system.ensure_square(update.name())?;
    if x0.len() != n {
        return Err(NumericalError::dimension_mismatch(format!(
            "{}: initial guess has length {}, system has size {n}",
            update.name(),
            x0.len()
        )));
    }

    let mut x = x0.clone();
    let mut next = Vector::zeros(n);

    if let Some(t) = trace.as_deref_mut() {
        t.steps.clear();
        t.steps.push(IterativeTraceStep { iter: 0, x: x.clone() });
    }

    for it in 0..iterations {
        match update {
            Update::Simultaneous => {
                for i in 0..n {
                    next[i] = row_update(system, &x, i)?;
                }
                std::mem::swap(&mut x, &mut next);
            }
            Update::InPlace => {
                for i in 0..n {
                    x[i] = row_update(system, &x, i)?;
                }
            }
        }

        log::trace!("{} iteration {}: x = {x}", update.name(), it + 1);
        if let Some(t) = trace.as_deref_mut() {
            t.steps.push(IterativeTraceStep {
                iter: it + 1,
                x: x.clone(),
            });
        }
    }

    log::debug!("{} finished {iterations} iterations", update.name());
    Ok(x)
}

/// Solve row `i` for `x_i`, holding the other components of `x` fixed.
fn row_update(system: &LinearSystem, x: &Vector, i: usize) -> Result<f64> {
    let a = system.matrix();
    let aii = a[(i, i)];
    if aii.abs() < PIVOT_EPSILON {
        return Err(NumericalError::singular_matrix(format!(
            "zero diagonal entry in row {}",
            i + 1
        )));
    }

    let sum: f64 = a
        .row(i)
        .iter()
        .zip(x.iter())
        .enumerate()
        .filter(|&(j, _)| j != i)
        .map(|(_, (aij, xj))| aij * xj)
        .sum();

    Ok((system.rhs()[i] - sum) / aii)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::Matrix;
    use approx::assert_relative_eq;

    fn diagonally_dominant() -> LinearSystem {
        let a = Matrix::from_rows(&[
            [4.0, 1.0, 1.0, 0.0, 1.0],
            [-1.0, -3.0, 1.0, 1.0, 0.0],
            [2.0, 1.0, 5.0, -1.0, -1.0],
            [-1.0, -1.0, -1.0, 4.0, 0.0],
            [0.0, 2.0, -1.0, 1.0, 4.0],
        ])
        .unwrap();
        LinearSystem::new(a, Vector::from([6.0; 5]))
    }

    #[test]
    fn test_jacobi_two_iterations() {
        let x = jacobi(&diagonally_dominant(), &Vector::zeros(5), 2, None).unwrap();
        let expected = [1.325, -1.6, 1.6, 1.675, 2.425];
        for (got, want) in x.iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_gauss_seidel_two_iterations() {
        let x = gauss_seidel(&diagonally_dominant(), &Vector::zeros(5), 2, None).unwrap();
        let expected = [
            1.1890625,
            -1.521354166666667,
            1.862395833333333,
            1.882526041666667,
            2.255644531250000,
        ];
        for (got, want) in x.iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_gauss_seidel_sees_updated_components() {
        // After one sweep Jacobi only uses x0, Gauss-Seidel uses fresh values.
        let system = diagonally_dominant();
        let xj = jacobi(&system, &Vector::zeros(5), 1, None).unwrap();
        let xg = gauss_seidel(&system, &Vector::zeros(5), 1, None).unwrap();
        assert_relative_eq!(xj[0], xg[0]);
        assert_relative_eq!(xj[1], -2.0);
        assert_relative_eq!(xg[1], -2.5);
    }

    #[test]
    fn test_trace_has_initial_guess_and_every_iteration() {
        let mut trace = IterativeMethodTrace::new();
        let x = jacobi(&diagonally_dominant(), &Vector::zeros(5), 3, Some(&mut trace)).unwrap();

        assert_eq!(trace.steps.len(), 4);
        assert_eq!(trace.steps[0].iter, 0);
        assert_eq!(trace.steps[0].x, Vector::zeros(5));
        assert_eq!(trace.steps[3].x, x);
    }

    #[test]
    fn test_zero_iterations_returns_initial_guess() {
        let x0 = Vector::from([1.0, 2.0, 3.0, 4.0, 5.0]);
        let x = gauss_seidel(&diagonally_dominant(), &x0, 0, None).unwrap();
        assert_eq!(x, x0);
    }

    #[test]
    fn test_zero_diagonal_is_singular() {
        let a = Matrix::from_rows(&[[0.0, 1.0], [1.0, 2.0]]).unwrap();
        let system = LinearSystem::new(a, Vector::from([1.0, 1.0]));
        for result in [
            jacobi(&system, &Vector::zeros(2), 1, None),
            gauss_seidel(&system, &Vector::zeros(2), 1, None),
        ] {
            assert!(matches!(result, Err(NumericalError::SingularMatrix { .. })));
        }
    }

    #[test]
    fn test_initial_guess_length_checked() {
        let result = jacobi(&diagonally_dominant(), &Vector::zeros(4), 1, None);
        assert!(matches!(result, Err(NumericalError::DimensionMismatch { .. })));
    }
}
