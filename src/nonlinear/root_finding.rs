//! Scalar root finding: bisection, regula falsi, secant and Newton.
//!
//! Bisection and regula falsi are bracketing methods. They need `a < b` with
//! `f(a)` and `f(b)` finite and of opposite sign, and they keep the root
//! bracketed on every step. Secant and Newton are open methods: no bracket,
//! faster near a simple root, no convergence guarantee.

use crate::error::{NumericalError, Result};

use super::ScalarEquation;

/// Iteration cap for [`bisection`].
pub const BISECTION_MAX_ITERATIONS: usize = 1000;
/// Iteration cap for [`regula_falsi`].
pub const REGULA_FALSI_MAX_ITERATIONS: usize = 100_000;
/// Iteration cap for [`secant`].
pub const SECANT_MAX_ITERATIONS: usize = 100_000;
/// Iteration cap for [`newton`].
pub const NEWTON_MAX_ITERATIONS: usize = 1000;

/// One bisection step: the bracket and its midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct BisectionTraceStep {
    pub iter: usize,
    pub a: f64,
    pub b: f64,
    /// Midpoint.
    pub p: f64,
    pub fp: f64,
    /// Half the bracket width, `|b − a| / 2`.
    pub error_bound: f64,
}

/// One regula falsi step: the bracket and its chord intercept.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegulaFalsiTraceStep {
    pub iter: usize,
    pub a: f64,
    pub b: f64,
    /// Secant x-intercept.
    pub p: f64,
    pub fp: f64,
}

/// One secant step: the two previous estimates and the new one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SecantTraceStep {
    pub iter: usize,
    pub x0: f64,
    pub x1: f64,
    pub p: f64,
    pub fp: f64,
}

/// One Newton step: the tangent at `x` and where it lands.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct NewtonTraceStep {
    pub iter: usize,
    pub x: f64,
    pub fx: f64,
    pub dfx: f64,
    pub x_next: f64,
    pub fx_next: f64,
}

/// Ordered per-iteration record of a root-finding run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct RootTrace<S> {
    pub steps: Vec<S>,
}

impl<S> Default for RootTrace<S> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<S> RootTrace<S> {
    pub fn new() -> Self {
        Self::default()
    }
}

pub type BisectionTrace = RootTrace<BisectionTraceStep>;
pub type RegulaFalsiTrace = RootTrace<RegulaFalsiTraceStep>;
pub type SecantTrace = RootTrace<SecantTraceStep>;
pub type NewtonTrace = RootTrace<NewtonTraceStep>;

/// Sign as -1, 0 or 1. Zero (of either sign) and NaN map to 0.
fn signum(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

fn validate_eps(eps: f64) -> Result<()> {
    // Written so that NaN is rejected too.
    if !(eps > 0.0) {
        return Err(NumericalError::invalid_argument("eps must be > 0"));
    }
    Ok(())
}

/// Check `a < b`, finite endpoint values and a sign change. Returns `(f(a), f(b))`.
fn validate_bracket(eq: &ScalarEquation, a: f64, b: f64) -> Result<(f64, f64)> {
    if !(a < b) {
        return Err(NumericalError::invalid_argument(format!(
            "invalid interval [{a}, {b}]: require a < b"
        )));
    }

    let fa = eq.evaluate(a);
    let fb = eq.evaluate(b);
    if !fa.is_finite() || !fb.is_finite() {
        return Err(NumericalError::invalid_argument(format!(
            "f(a) = {fa} or f(b) = {fb} is not finite"
        )));
    }

    if signum(fa) == signum(fb) {
        return Err(NumericalError::invalid_argument(format!(
            "interval [{a}, {b}] does not bracket a root (f(a) = {fa}, f(b) = {fb})"
        )));
    }

    Ok((fa, fb))
}

/// Find a root of `eq` in `[a, b]` by repeated halving.
///
/// Stops when `|f(p)| <= eps`, when the half-width `|b − a| / 2 <= eps`, or
/// when `f(p)` is exactly zero. An endpoint whose residual is already below
/// `eps` is returned without iterating.
///
/// # Errors
///
/// - [`NumericalError::InvalidArgument`] for a non-positive `eps` or an
///   interval that does not bracket a root
/// - [`NumericalError::NonConvergence`] after [`BISECTION_MAX_ITERATIONS`]
pub fn bisection(
    eq: &ScalarEquation,
    mut a: f64,
    mut b: f64,
    eps: f64,
    mut trace: Option<&mut BisectionTrace>,
) -> Result<f64> {
    validate_eps(eps)?;
    let (mut fa, mut fb) = validate_bracket(eq, a, b)?;

    if fa.abs() < eps {
        return Ok(a);
    }
    if fb.abs() < eps {
        return Ok(b);
    }

    for iter in 0..BISECTION_MAX_ITERATIONS {
        // Midpoint without forming a + b.
        let p = a + (b - a) / 2.0;
        let fp = eq.evaluate(p);
        let half_width = (b - a).abs() / 2.0;

        if let Some(t) = trace.as_deref_mut() {
            t.steps.push(BisectionTraceStep {
                iter,
                a,
                b,
                p,
                fp,
                error_bound: half_width,
            });
        }

        if fp.abs() <= eps || half_width <= eps {
            log::debug!("bisection converged after {} iterations: x = {p}", iter + 1);
            return Ok(p);
        }

        let sp = signum(fp);
        if sp == 0 {
            return Ok(p);
        }

        // Both endpoints are tested against sign(f(p)); only one can match.
        let sa = signum(fa);
        let sb = signum(fb);
        if sa == sp {
            a = p;
            fa = fp;
        }
        if sb == sp {
            b = p;
            fb = fp;
        }
    }

    Err(NumericalError::non_convergence(format!(
        "bisection did not converge within {BISECTION_MAX_ITERATIONS} iterations"
    )))
}

/// Find a root of `eq` in `[a, b]` by false position.
///
/// Each step intersects the chord through `(a, f(a))` and `(b, f(b))` with the
/// x-axis and replaces the endpoint whose residual has the same sign.
/// Stops when `|f(p)| <= eps`, when successive estimates differ by at most
/// `eps`, when the bracket is no wider than `2·eps`, or when `f(p)` is exactly
/// zero.
///
/// # Errors
///
/// - [`NumericalError::InvalidArgument`] for a non-positive `eps`, a
///   non-bracketing interval, or `f(b) − f(a) == 0`
/// - [`NumericalError::NonConvergence`] after [`REGULA_FALSI_MAX_ITERATIONS`]
pub fn regula_falsi(
    eq: &ScalarEquation,
    mut a: f64,
    mut b: f64,
    eps: f64,
    mut trace: Option<&mut RegulaFalsiTrace>,
) -> Result<f64> {
    validate_eps(eps)?;
    let (mut fa, mut fb) = validate_bracket(eq, a, b)?;

    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }

    let mut prev_p: Option<f64> = None;
    for iter in 0..REGULA_FALSI_MAX_ITERATIONS {
        let denom = fb - fa;
        if denom == 0.0 {
            return Err(NumericalError::invalid_argument(
                "regula falsi failed: f(b) - f(a) == 0",
            ));
        }

        let p = (a * fb - b * fa) / denom;
        let fp = eq.evaluate(p);

        if let Some(t) = trace.as_deref_mut() {
            t.steps.push(RegulaFalsiTraceStep { iter, a, b, p, fp });
        }

        let stalled = prev_p.is_some_and(|prev| (p - prev).abs() <= eps);
        if fp.abs() <= eps || stalled || (b - a).abs() <= 2.0 * eps {
            log::debug!("regula falsi converged after {} iterations: x = {p}", iter + 1);
            return Ok(p);
        }

        let sp = signum(fp);
        if sp == 0 {
            return Ok(p);
        }

        if signum(fa) == sp {
            a = p;
            fa = fp;
        } else {
            b = p;
            fb = fp;
        }

        prev_p = Some(p);
    }

    Err(NumericalError::non_convergence(format!(
        "regula falsi did not converge within {REGULA_FALSI_MAX_ITERATIONS} iterations"
    )))
}

/// Find a root of `eq` by the secant method seeded with `x0` and `x1`.
///
/// Stops when `|f(p)| <= eps` or `|p − x1| <= eps`.
///
/// # Errors
///
/// - [`NumericalError::InvalidArgument`] for a non-positive `eps`, non-finite
///   seed residuals, `f(x1) − f(x0) == 0`, or a non-finite `f(p)`
/// - [`NumericalError::NonConvergence`] after [`SECANT_MAX_ITERATIONS`]
pub fn secant(
    eq: &ScalarEquation,
    mut x0: f64,
    mut x1: f64,
    eps: f64,
    mut trace: Option<&mut SecantTrace>,
) -> Result<f64> {
    validate_eps(eps)?;

    let mut f0 = eq.evaluate(x0);
    let mut f1 = eq.evaluate(x1);
    if !f0.is_finite() || !f1.is_finite() {
        return Err(NumericalError::invalid_argument(
            "secant requires finite function values at the initial points",
        ));
    }
    if f0.abs() <= eps {
        return Ok(x0);
    }
    if f1.abs() <= eps {
        return Ok(x1);
    }

    for iter in 0..SECANT_MAX_ITERATIONS {
        let denom = f1 - f0;
        if denom == 0.0 {
            return Err(NumericalError::invalid_argument(
                "secant failed: f(x1) - f(x0) == 0",
            ));
        }

        let p = x1 - f1 * (x1 - x0) / denom;
        let fp = eq.evaluate(p);

        // Recorded before the finite check so a diverging step stays visible.
        if let Some(t) = trace.as_deref_mut() {
            t.steps.push(SecantTraceStep { iter, x0, x1, p, fp });
        }

        if !fp.is_finite() {
            return Err(NumericalError::invalid_argument(format!(
                "secant produced non-finite f(p) at p = {p}"
            )));
        }
        if fp.abs() <= eps || (p - x1).abs() <= eps {
            log::debug!("secant converged after {} iterations: x = {p}", iter + 1);
            return Ok(p);
        }

        x0 = x1;
        f0 = f1;
        x1 = p;
        f1 = fp;
    }

    Err(NumericalError::non_convergence(format!(
        "secant did not converge within {SECANT_MAX_ITERATIONS} iterations"
    )))
}

/// Find a root of `eq` by Newton's (tangent) method from `x0`.
///
/// `derivative` must be supplied; it is an `Option` so that a missing
/// derivative is reported as an error rather than a panic. Stops when
/// `|f(p)| <= eps` or `|p − x| <= eps`.
///
/// # Errors
///
/// - [`NumericalError::InvalidArgument`] for a non-positive `eps`, a missing
///   derivative, a non-finite `f(x0)`, `f'(x)` or `f(p)`
/// - [`NumericalError::NonConvergence`] if `f'(x)` is exactly zero or after
///   [`NEWTON_MAX_ITERATIONS`]
pub fn newton(
    eq: &ScalarEquation,
    derivative: Option<&ScalarEquation>,
    x0: f64,
    eps: f64,
    mut trace: Option<&mut NewtonTrace>,
) -> Result<f64> {
    validate_eps(eps)?;
    let derivative = derivative.ok_or_else(|| {
        NumericalError::invalid_argument("newton requires a derivative function")
    })?;

    let mut x = x0;
    let mut fx = eq.evaluate(x);
    if !fx.is_finite() {
        return Err(NumericalError::invalid_argument("newton requires finite f(x0)"));
    }
    if fx.abs() <= eps {
        return Ok(x);
    }

    for iter in 0..NEWTON_MAX_ITERATIONS {
        let dfx = derivative.evaluate(x);
        if !dfx.is_finite() {
            return Err(NumericalError::invalid_argument(format!(
                "newton requires finite f'(x), got {dfx} at x = {x}"
            )));
        }
        if dfx == 0.0 {
            return Err(NumericalError::non_convergence(format!(
                "newton failed: derivative is zero at x = {x}"
            )));
        }

        let p = x - fx / dfx;
        let fp = eq.evaluate(p);

        if let Some(t) = trace.as_deref_mut() {
            t.steps.push(NewtonTraceStep {
                iter,
                x,
                fx,
                dfx,
                x_next: p,
                fx_next: fp,
            });
        }

        if !fp.is_finite() {
            return Err(NumericalError::invalid_argument(format!(
                "newton produced non-finite f(p) at p = {p}"
            )));
        }
        if fp.abs() <= eps || (p - x).abs() <= eps {
            log::debug!("newton converged after {} iterations: x = {p}", iter + 1);
            return Ok(p);
        }

        x = p;
        fx = fp;
    }

    Err(NumericalError::non_convergence(format!(
        "newton did not converge within {NEWTON_MAX_ITERATIONS} iterations"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    const EPS: f64 = 1e-7;

    fn quadratic_log() -> ScalarEquation {
        ScalarEquation::new(|x| x * x - 4.0 * x + 4.0 - x.ln())
    }

    fn quadratic_log_derivative() -> ScalarEquation {
        ScalarEquation::new(|x| 2.0 * x - 4.0 - 1.0 / x)
    }

    #[test]
    fn test_bisection_finds_root() {
        let eq = quadratic_log();
        let mut trace = BisectionTrace::new();
        let x = bisection(&eq, 1.0, 2.0, EPS, Some(&mut trace)).unwrap();

        assert_abs_diff_eq!(x, 1.412391172, epsilon = 1e-6);
        assert!(eq.evaluate(x).abs() <= EPS || trace.steps.last().unwrap().error_bound <= EPS);

        let first = trace.steps[0];
        assert_eq!(first.iter, 0);
        assert_eq!((first.a, first.b, first.p), (1.0, 2.0, 1.5));
        assert_eq!(first.error_bound, 0.5);
    }

    #[test]
    fn test_bisection_keeps_bracket() {
        let eq = quadratic_log();
        let mut trace = BisectionTrace::new();
        bisection(&eq, 1.0, 2.0, EPS, Some(&mut trace)).unwrap();

        for step in &trace.steps {
            assert!(eq.evaluate(step.a) * eq.evaluate(step.b) < 0.0);
        }
    }

    #[test]
    fn test_bisection_returns_endpoint_root() {
        let eq = ScalarEquation::new(|x| x - 1.0);
        assert_eq!(bisection(&eq, 1.0, 3.0, EPS, None).unwrap(), 1.0);
        assert_eq!(bisection(&eq, -1.0, 1.0, EPS, None).unwrap(), 1.0);
    }

    #[test]
    fn test_bracket_validation() {
        let eq = quadratic_log();
        for result in [
            bisection(&eq, 2.0, 1.0, EPS, None),
            bisection(&eq, 1.5, 2.5, EPS, None),
            regula_falsi(&eq, 1.0, 1.0, EPS, None),
            regula_falsi(&eq, 1.0, 2.0, 0.0, None),
        ] {
            assert!(matches!(result, Err(NumericalError::InvalidArgument { .. })));
        }
    }

    #[test]
    fn test_non_finite_endpoint_rejected() {
        let eq = quadratic_log();
        let result = bisection(&eq, 0.0, 2.0, EPS, None);
        assert!(matches!(result, Err(NumericalError::InvalidArgument { .. })));
    }

    #[test]
    fn test_regula_falsi_finds_root() {
        let eq = quadratic_log();
        let mut trace = RegulaFalsiTrace::new();
        let x = regula_falsi(&eq, 1.0, 2.0, EPS, Some(&mut trace)).unwrap();

        assert_abs_diff_eq!(x, 1.412391172, epsilon = 1e-6);
        assert!(!trace.steps.is_empty());
        // First chord through (1, 1) and (2, -ln 2).
        let fb = -(2.0f64).ln();
        assert_abs_diff_eq!(trace.steps[0].p, (fb - 2.0) / (fb - 1.0), epsilon = 1e-15);
    }

    #[test]
    fn test_regula_falsi_exact_endpoint_root() {
        let eq = ScalarEquation::new(|x| x * x - 4.0);
        assert_eq!(regula_falsi(&eq, 0.0, 2.0, EPS, None).unwrap(), 2.0);
    }

    #[test]
    fn test_secant_finds_root() {
        let eq = quadratic_log();
        let mut trace = SecantTrace::new();
        let x = secant(&eq, 1.0, 2.0, EPS, Some(&mut trace)).unwrap();

        assert_abs_diff_eq!(x, 1.412391172, epsilon = 1e-6);
        assert_eq!(trace.steps[0].x0, 1.0);
        assert_eq!(trace.steps[0].x1, 2.0);
    }

    #[test]
    fn test_secant_zero_denominator() {
        let eq = ScalarEquation::new(|x| x * x);
        let result = secant(&eq, -1.0, 1.0, EPS, None);
        assert!(matches!(result, Err(NumericalError::InvalidArgument { .. })));
    }

    #[test]
    fn test_secant_non_finite_seed() {
        let eq = quadratic_log();
        let result = secant(&eq, -1.0, 2.0, EPS, None);
        assert!(matches!(result, Err(NumericalError::InvalidArgument { .. })));
    }

    #[test]
    fn test_newton_finds_root() {
        let eq = quadratic_log();
        let d = quadratic_log_derivative();
        let mut trace = NewtonTrace::new();
        let x = newton(&eq, Some(&d), 1.5, EPS, Some(&mut trace)).unwrap();

        assert_abs_diff_eq!(x, 1.412391172, epsilon = 1e-6);
        let first = trace.steps[0];
        assert_eq!(first.x, 1.5);
        assert_abs_diff_eq!(first.x_next, first.x - first.fx / first.dfx, epsilon = 1e-15);
    }

    #[test]
    fn test_newton_requires_derivative() {
        let eq = quadratic_log();
        let result = newton(&eq, None, 1.5, EPS, None);
        assert!(matches!(result, Err(NumericalError::InvalidArgument { .. })));
    }

    #[test]
    fn test_newton_zero_derivative_does_not_converge() {
        let eq = ScalarEquation::new(|x| x * x + 1.0);
        let d = ScalarEquation::new(|x| 2.0 * x);
        let result = newton(&eq, Some(&d), 0.0, EPS, None);
        assert!(matches!(result, Err(NumericalError::NonConvergence { .. })));
    }

    #[test]
    fn test_newton_early_return_on_root() {
        let eq = ScalarEquation::new(|x| x - 2.0);
        let d = ScalarEquation::new(|_| 1.0);
        let mut trace = NewtonTrace::new();
        assert_eq!(newton(&eq, Some(&d), 2.0, EPS, Some(&mut trace)).unwrap(), 2.0);
        assert!(trace.steps.is_empty());
    }

    #[test]
    fn test_bisection_stops_at_iteration_cap() {
        // Below the float spacing near sqrt(2) the bracket can no longer shrink.
        let eq = ScalarEquation::new(|x| x * x - 2.0);
        let mut trace = BisectionTrace::new();
        let result = bisection(&eq, 1.0, 2.0, 1e-300, Some(&mut trace));

        assert!(matches!(result, Err(NumericalError::NonConvergence { .. })));
        assert_eq!(trace.steps.len(), BISECTION_MAX_ITERATIONS);
    }

    #[test]
    fn test_regula_falsi_stops_at_iteration_cap() {
        // Steep plateau left of the jump: each chord moves b by about 2e-6.
        let eq = ScalarEquation::new(|x| if x < 1.0 { -1e6 } else { 1.0 });
        let result = regula_falsi(&eq, 0.0, 2.0, 1e-12, None);
        assert!(matches!(result, Err(NumericalError::NonConvergence { .. })));
    }

    #[test]
    fn test_secant_stops_at_iteration_cap() {
        let eq = ScalarEquation::new(|x| x * x + 1.0);
        let result = secant(&eq, 0.5, 1.7, 1e-12, None);
        assert!(matches!(result, Err(NumericalError::NonConvergence { .. })));
    }

    #[test]
    fn test_newton_stops_at_iteration_cap() {
        let eq = ScalarEquation::new(|x| x * x + 1.0);
        let d = ScalarEquation::new(|x| 2.0 * x);
        let mut trace = NewtonTrace::new();
        let result = newton(&eq, Some(&d), 0.5, EPS, Some(&mut trace));

        assert!(matches!(result, Err(NumericalError::NonConvergence { .. })));
        assert_eq!(trace.steps.len(), NEWTON_MAX_ITERATIONS);
    }

    #[test]
    fn test_newton_non_finite_derivative() {
        let eq = quadratic_log();
        let d = ScalarEquation::new(|x| 1.0 / (x - 1.5));
        let result = newton(&eq, Some(&d), 1.5, EPS, None);
        assert!(matches!(result, Err(NumericalError::InvalidArgument { .. })));
    }

    #[test]
    fn test_secant_non_finite_step_value() {
        // The first secant step through (3, ln 3) and (4, ln 4) lands below zero.
        let eq = ScalarEquation::new(f64::ln);
        let mut trace = SecantTrace::new();
        let result = secant(&eq, 3.0, 4.0, EPS, Some(&mut trace));

        assert!(matches!(result, Err(NumericalError::InvalidArgument { .. })));
        assert_eq!(trace.steps.len(), 1);
        assert!(trace.steps[0].p < 0.0);
        assert!(trace.steps[0].fp.is_nan());
    }

    #[test]
    fn test_newton_non_finite_step_value() {
        // The tangent to ln at 3 crosses zero at 3 - 3 ln 3 < 0.
        let eq = ScalarEquation::new(f64::ln);
        let d = ScalarEquation::new(|x| 1.0 / x);
        let result = newton(&eq, Some(&d), 3.0, EPS, None);
        assert!(matches!(result, Err(NumericalError::InvalidArgument { .. })));
    }

    #[test]
    fn test_eps_must_be_positive() {
        let eq = quadratic_log();
        let d = quadratic_log_derivative();
        assert!(secant(&eq, 1.0, 2.0, -1.0, None).is_err());
        assert!(newton(&eq, Some(&d), 1.5, f64::NAN, None).is_err());
    }
}
