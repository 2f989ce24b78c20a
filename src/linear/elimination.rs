//! Gaussian elimination with partial pivoting.
//!
//! One routine serves both the hand-calculation solver, which re-rounds every
//! intermediate product and difference, and Newton's method for systems, which
//! solves its linearised step at full precision. The [`Rounding`] policy is the
//! only thing that differs between the two.

use crate::core::{Matrix, Vector};
use crate::error::{NumericalError, Result};
use crate::rounding::round_significant;

use super::gauss::{EliminationOperation, ForwardStep, GaussianEliminationTrace, Phase, SolvedValue};
use super::PIVOT_EPSILON;

/// How intermediate values are rounded during elimination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rounding {
    /// Full `f64` precision.
    Exact,
    /// Re-round every intermediate to this many significant digits.
    Significant(u32),
}

impl Rounding {
    #[inline]
    fn apply(self, value: f64) -> f64 {
        match self {
            Rounding::Exact => value,
            Rounding::Significant(digits) => round_significant(value, digits),
        }
    }
}

/// Significant digits of multipliers and solved values in operation labels.
const LABEL_DIGITS: u32 = 8;

/// Format a multiplier or solved value for an operation label.
fn label_number(value: f64) -> String {
    format!("{}", round_significant(value, LABEL_DIGITS))
}

/// Solve `a·x = b` in place on owned copies.
///
/// `a` must be `n × n` with `n = b.len()`; callers validate shapes first.
/// When `trace` is given, it is cleared and then filled with the per-pivot
/// snapshots and the labelled operation log.
pub(crate) fn solve_pivoted(
    mut a: Matrix,
    mut b: Vector,
    rounding: Rounding,
    mut trace: Option<&mut GaussianEliminationTrace>,
) -> Result<Vector> {
    let n = b.len();
    debug_assert!(a.rows() == n && a.cols() == n);

    let r = |v: f64| rounding.apply(v);

    if let Some(t) = trace.as_deref_mut() {
        t.forward_steps.clear();
        t.operations.clear();
        t.push(Phase::Forward, "initial augmented matrix", &a, &b, None);
    }

    for k in 0..n {
        let (pivot_row, max_abs) = ((k + 1)..n)
            .map(|i| (i, a[(i, k)].abs()))
            .fold((k, a[(k, k)].abs()), |best, cand| if cand.1 > best.1 { cand } else { best });

        if max_abs < PIVOT_EPSILON {
            return Err(NumericalError::singular_matrix(format!(
                "zero pivot in column {}",
                k + 1
            )));
        }

        if let Some(t) = trace.as_deref_mut() {
            let op = format!("choose pivot in column {}: R{}", k + 1, pivot_row + 1);
            t.push(Phase::Forward, op, &a, &b, None);
        }

        let swapped = pivot_row != k;
        if swapped {
            a.swap_rows(k, pivot_row);
            b.swap(k, pivot_row);

            if let Some(t) = trace.as_deref_mut() {
                let op = format!("swap rows: R{} <-> R{}", k + 1, pivot_row + 1);
                t.push(Phase::Forward, op, &a, &b, None);
            }
        }

        let pivot = a[(k, k)];
        if pivot.abs() < PIVOT_EPSILON {
            return Err(NumericalError::singular_matrix(format!(
                "zero pivot in column {} after row swap",
                k + 1
            )));
        }

        for i in (k + 1)..n {
            let multiplier = r(a[(i, k)] / pivot);

            // Eliminated entry is zero by construction.
            a[(i, k)] = 0.0;

            for j in (k + 1)..n {
                let product = r(multiplier * a[(k, j)]);
                a[(i, j)] = r(a[(i, j)] - product);
            }

            let product = r(multiplier * b[k]);
            b[i] = r(b[i] - product);

            if let Some(t) = trace.as_deref_mut() {
                let op = format!(
                    "R{} <- R{} - ({}) * R{}",
                    i + 1,
                    i + 1,
                    label_number(multiplier),
                    k + 1
                );
                t.push(Phase::Forward, op, &a, &b, None);
            }
        }

        if let Some(t) = trace.as_deref_mut() {
            t.forward_steps.push(ForwardStep {
                k,
                pivot_row,
                swapped,
                a: a.clone(),
                b: b.clone(),
            });
        }
        log::trace!("elimination column {k}: pivot row {pivot_row}, swapped {swapped}");
    }

    if let Some(t) = trace.as_deref_mut() {
        t.push(Phase::Forward, "upper triangular matrix after elimination", &a, &b, None);
    }

    let mut x = Vector::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum = r(sum + r(a[(i, j)] * x[j]));
        }

        let diag = a[(i, i)];
        if diag.abs() < PIVOT_EPSILON {
            return Err(NumericalError::singular_matrix(format!(
                "zero diagonal entry in row {} during back substitution",
                i + 1
            )));
        }

        let rhs = r(b[i] - sum);
        x[i] = r(rhs / diag);

        if let Some(t) = trace.as_deref_mut() {
            let op = format!("back substitution: x{} = {}", i + 1, label_number(x[i]));
            t.push(Phase::Back, op, &a, &b, Some((i, x[i])));
        }
    }

    if let Some(t) = trace {
        t.push(Phase::Back, "final solution after back substitution", &a, &b, None);
    }

    Ok(x)
}

impl GaussianEliminationTrace {
    fn push(
        &mut self,
        phase: Phase,
        op: impl Into<String>,
        a: &Matrix,
        b: &Vector,
        solved: Option<(usize, f64)>,
    ) {
        self.operations.push(EliminationOperation {
            phase,
            op: op.into(),
            a: a.clone(),
            b: b.clone(),
            solved: solved.map(|(index, value)| SolvedValue { index, value }),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn test_exact_solve_matches_known_solution() {
        let a = Matrix::from_rows(&[[2.0, 1.0, -1.0], [-3.0, -1.0, 2.0], [-2.0, 1.0, 2.0]]).unwrap();
        let b = Vector::from([8.0, -11.0, -3.0]);

        let x = solve_pivoted(a, b, Rounding::Exact, None).unwrap();

        assert_relative_eq!(x[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);
        assert_relative_eq!(x[2], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_column_is_singular() {
        let a = Matrix::from_rows(&[[0.0, 1.0], [0.0, 2.0]]).unwrap();
        let err = solve_pivoted(a, Vector::from([1.0, 2.0]), Rounding::Exact, None).unwrap_err();
        assert!(matches!(err, NumericalError::SingularMatrix { .. }));
    }

    #[test]
    fn test_rank_deficient_is_singular() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        let err = solve_pivoted(a, Vector::from([1.0, 2.0]), Rounding::Exact, None).unwrap_err();
        assert!(matches!(err, NumericalError::SingularMatrix { .. }));
    }

    #[test]
    fn test_rounding_policy_rounds_result() {
        let a = Matrix::from_rows(&[[3.0]]).unwrap();
        let x = solve_pivoted(a, Vector::from([1.0]), Rounding::Significant(2), None).unwrap();
        assert_eq!(x[0], 0.33);
    }

    #[test]
    fn test_label_number_uses_eight_digits() {
        assert_eq!(label_number(1.0 / 3.0), "0.33333333");
        assert_eq!(label_number(-2.0), "-2");
    }
}
