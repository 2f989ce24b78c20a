//! Newton's method for systems of nonlinear equations.

use crate::core::{Matrix, Vector};
use crate::error::{NumericalError, Result};
use crate::linear::{solve_pivoted, Rounding};

use super::NonlinearSystem;

/// Iteration cap for [`solve`].
pub const NEWTON_SYSTEM_MAX_ITERATIONS: usize = 100;

/// State of one Newton iteration, recorded before the update is applied.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NewtonSystemTraceStep {
    pub iter: usize,
    pub x: Vector,
    pub fx: Vector,
    pub jac: Matrix,
    pub delta: Vector,
}

/// Ordered record of a Newton run, one entry per linearised step.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NewtonSystemTrace {
    #[cfg_attr(feature = "serde", serde(rename = "iterations"))]
    pub steps: Vec<NewtonSystemTraceStep>,
}

impl NewtonSystemTrace {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Solve `F(x) = 0` by Newton's method starting from `x0`.
///
/// Each iteration solves `J(x)·delta = −F(x)` by pivoted elimination at full
/// precision and sets `x += delta`. Stops when `‖F(x)‖∞ <= eps` or when the
/// relative step `‖delta‖∞ / max(‖x‖∞, 1) <= eps`.
///
/// # Errors
///
/// - [`NumericalError::InvalidArgument`] for a non-positive `eps` or an empty
///   or non-finite `x0`
/// - [`NumericalError::DimensionMismatch`] if `F(x)` or `J(x)` does not match
///   the length of `x`
/// - [`NumericalError::SingularMatrix`] if the Jacobian is singular
/// - [`NumericalError::NonConvergence`] if `F(x)`, the step or the iterate
///   become non-finite, or after [`NEWTON_SYSTEM_MAX_ITERATIONS`]
pub fn solve(
    system: &NonlinearSystem,
    x0: &Vector,
    eps: f64,
    mut trace: Option<&mut NewtonSystemTrace>,
) -> Result<Vector> {
    if !(eps > 0.0) {
        return Err(NumericalError::invalid_argument("eps must be > 0"));
    }
    if x0.is_empty() {
        return Err(NumericalError::invalid_argument("initial guess must be non-empty"));
    }
    if !x0.is_finite() {
        return Err(NumericalError::invalid_argument(
            "initial guess contains non-finite values",
        ));
    }

    let n = x0.len();
    let mut x = x0.clone();

    if let Some(t) = trace.as_deref_mut() {
        t.steps.clear();
    }

    for iter in 0..NEWTON_SYSTEM_MAX_ITERATIONS {
        let fx = system.evaluate(&x);
        if fx.len() != n {
            return Err(NumericalError::dimension_mismatch(format!(
                "F(x) has length {}, x has length {n}",
                fx.len()
            )));
        }
        if !fx.is_finite() {
            return Err(NumericalError::non_convergence(format!(
                "F(x) became non-finite at iteration {iter}"
            )));
        }

        let residual = fx.norm_inf();
        if residual <= eps {
            log::debug!("newton system converged after {iter} iterations: ||F||inf = {residual:e}");
            return Ok(x);
        }

        let jac = system.jacobian(&x);
        if jac.rows() != n || jac.cols() != n {
            return Err(NumericalError::dimension_mismatch(format!(
                "J(x) is {}x{}, expected {n}x{n}",
                jac.rows(),
                jac.cols()
            )));
        }

        let rhs: Vector = fx.iter().map(|v| -v).collect();
        let delta = solve_pivoted(jac.clone(), rhs, Rounding::Exact, None)?;
        if !delta.is_finite() {
            return Err(NumericalError::non_convergence("Newton step became non-finite"));
        }

        if let Some(t) = trace.as_deref_mut() {
            t.steps.push(NewtonSystemTraceStep {
                iter,
                x: x.clone(),
                fx,
                jac,
                delta: delta.clone(),
            });
        }

        for i in 0..n {
            x[i] += delta[i];
        }
        if !x.is_finite() {
            return Err(NumericalError::non_convergence("iterate became non-finite"));
        }

        let step = delta.norm_inf() / x.norm_inf().max(1.0);
        log::trace!("newton system iteration {iter}: ||F||inf = {residual:e}, step = {step:e}");
        if step <= eps {
            log::debug!("newton system converged on step size after {} iterations", iter + 1);
            return Ok(x);
        }
    }

    Err(NumericalError::non_convergence(format!(
        "Newton's method did not converge within {NEWTON_SYSTEM_MAX_ITERATIONS} iterations"
    )))
}
