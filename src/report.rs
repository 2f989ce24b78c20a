//! JSON reports for the demonstration problems.
//!
//! Each report runs the solvers of one family on a built-in problem and
//! collects inputs, solutions, residuals and (optionally) traces in the shape
//! the web front-end reads. The command-line driver and the WASM bindings
//! both go through here.

use serde::Serialize;
use thiserror::Error;

use crate::core::{Matrix, Vector};
use crate::demo::{self, EquationProblem};
use crate::error::NumericalError;
use crate::linear::{self, GaussianEliminationTrace, IterativeMethodTrace};
use crate::nonlinear::{
    self, BisectionTrace, NewtonSystemTrace, NewtonTrace, RegulaFalsiTrace, SecantTrace,
};

/// Significant digits used for the Gaussian elimination demonstrations.
pub const GAUSS_SIGNIFICANT_DIGITS: u32 = 3;
/// Sweeps used for the iterative demonstrations.
pub const ITERATIVE_SWEEPS: usize = 2;
/// Tolerance used for the nonlinear-system demonstrations.
pub const NEWTON_SYSTEM_EPS: f64 = 1e-5;
/// Default tolerance for the root-finding demonstrations.
pub const ROOT_FINDING_EPS: f64 = 1e-7;

/// Course assignment each report family belongs to, as the front-end labels it.
const ROOT_FINDING_REFERAT: &str = "01";
const GAUSS_REFERAT: &str = "01";
const ITERATIVE_REFERAT: &str = "01";
const NEWTON_SYSTEMS_REFERAT: &str = "02";

/// Why a report could not be produced.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The requested problem or its parameters are not valid.
    #[error("{0}")]
    Selection(String),

    /// A solver failed on the selected problem.
    #[error(transparent)]
    Numerical(#[from] NumericalError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;

fn selection(message: impl Into<String>) -> ReportError {
    ReportError::Selection(message.into())
}

/// Parameters of a root-finding report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootFindingParams {
    /// Equation number, 1 to 4.
    pub equation: usize,
    /// Built-in interval, 1 or 2. Ignored when `bounds` is set.
    pub interval: usize,
    /// Explicit `(a, b)` overriding the built-in interval.
    pub bounds: Option<(f64, f64)>,
    /// Newton starting point; the interval midpoint when unset.
    pub x0: Option<f64>,
    pub eps: f64,
}

impl Default for RootFindingParams {
    fn default() -> Self {
        Self {
            equation: 1,
            interval: 1,
            bounds: None,
            x0: None,
            eps: ROOT_FINDING_EPS,
        }
    }
}

/// Trace of any one scalar method.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RootMethodTrace {
    Bisection(BisectionTrace),
    RegulaFalsi(RegulaFalsiTrace),
    Secant(SecantTrace),
    Newton(NewtonTrace),
}

#[derive(Debug, Clone, Serialize)]
pub struct RootMethodReport {
    pub name: &'static str,
    pub x: f64,
    pub fx: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<RootMethodTrace>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootFindingReport {
    pub kind: &'static str,
    pub referat: &'static str,
    pub eq: usize,
    pub interval: usize,
    pub eps: f64,
    pub statement: &'static str,
    pub a: f64,
    pub b: f64,
    pub trace_enabled: bool,
    pub x0: f64,
    pub methods: Vec<RootMethodReport>,
}

/// Run all four scalar methods on a demonstration equation.
///
/// Bisection, regula falsi and the secant seeds use `[a, b]`; Newton starts
/// from `x0`.
pub fn rootfinding(params: &RootFindingParams, trace: bool) -> Result<RootFindingReport> {
    let problem = demo::equation(params.equation)
        .ok_or_else(|| selection("Invalid equation. Use 1-4."))?;
    let (a, b) = match params.bounds {
        Some(bounds) => bounds,
        None => problem
            .interval(params.interval)
            .ok_or_else(|| selection("Invalid interval. Use 1 or 2."))?,
    };

    if !(a < b) {
        return Err(selection("Invalid interval. Require a < b."));
    }
    if problem.positive_domain && (a <= 0.0 || b <= 0.0) {
        return Err(selection(format!(
            "Invalid interval for eq({}). Require a > 0 and b > 0 because of ln(x).",
            params.equation
        )));
    }

    let eps = params.eps;
    let x0 = params.x0.unwrap_or((a + b) / 2.0);
    let EquationProblem {
        statement,
        equation,
        derivative,
        ..
    } = problem;

    let mut bis = trace.then(BisectionTrace::new);
    let mut rf = trace.then(RegulaFalsiTrace::new);
    let mut sec = trace.then(SecantTrace::new);
    let mut newt = trace.then(NewtonTrace::new);

    let x_bis = nonlinear::bisection(&equation, a, b, eps, bis.as_mut())?;
    let x_rf = nonlinear::regula_falsi(&equation, a, b, eps, rf.as_mut())?;
    let x_sec = nonlinear::secant(&equation, a, b, eps, sec.as_mut())?;
    let x_newt = nonlinear::newton(&equation, Some(&derivative), x0, eps, newt.as_mut())?;

    let method = |name, x: f64, trace| RootMethodReport {
        name,
        x,
        fx: equation.evaluate(x),
        trace,
    };
    let methods = vec![
        method("bisection", x_bis, bis.map(RootMethodTrace::Bisection)),
        method("regulaFalsi", x_rf, rf.map(RootMethodTrace::RegulaFalsi)),
        method("secant", x_sec, sec.map(RootMethodTrace::Secant)),
        method("newton", x_newt, newt.map(RootMethodTrace::Newton)),
    ];

    Ok(RootFindingReport {
        kind: "rootfinding",
        referat: ROOT_FINDING_REFERAT,
        eq: params.equation,
        interval: params.interval,
        eps,
        statement,
        a,
        b,
        trace_enabled: trace,
        x0,
        methods,
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GaussReport {
    pub kind: &'static str,
    pub referat: &'static str,
    pub system: usize,
    pub significant_digits: u32,
    #[serde(rename = "A")]
    pub a: Matrix,
    pub b: Vector,
    pub x: Vector,
    #[serde(rename = "residual_inf")]
    pub residual_inf: f64,
    pub trace_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<GaussianEliminationTrace>,
}

/// Solve demonstration system `system` by Gaussian elimination.
pub fn gauss(system: usize, trace: bool) -> Result<GaussReport> {
    let linear_system =
        demo::gauss_system(system).ok_or_else(|| selection("Invalid system. Use 1-4."))?;

    let mut t = trace.then(GaussianEliminationTrace::new);
    let x = linear::gauss::solve(&linear_system, GAUSS_SIGNIFICANT_DIGITS, t.as_mut())?;
    let residual_inf = linear_system.residual_inf(&x)?;
    let (a, b) = linear_system.into_parts();

    Ok(GaussReport {
        kind: "gauss",
        referat: GAUSS_REFERAT,
        system,
        significant_digits: GAUSS_SIGNIFICANT_DIGITS,
        a,
        b,
        x,
        residual_inf,
        trace_enabled: trace,
        trace: t,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct IterativeMethodReport {
    pub name: &'static str,
    pub x: Vector,
    pub residual_inf: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<IterativeMethodTrace>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IterativeReport {
    pub kind: &'static str,
    pub referat: &'static str,
    pub system: usize,
    pub iterations: usize,
    #[serde(rename = "A")]
    pub a: Matrix,
    pub b: Vector,
    pub x0: Vector,
    pub trace_enabled: bool,
    pub methods: Vec<IterativeMethodReport>,
}

/// Run Jacobi and Gauss-Seidel from the zero vector on demonstration system `system`.
pub fn iterative(system: usize, trace: bool) -> Result<IterativeReport> {
    let linear_system =
        demo::iterative_system(system).ok_or_else(|| selection("Invalid system. Use 1-4."))?;
    let x0 = Vector::zeros(linear_system.size());

    let mut jac = trace.then(IterativeMethodTrace::new);
    let mut gs = trace.then(IterativeMethodTrace::new);
    let x_jac = linear::jacobi(&linear_system, &x0, ITERATIVE_SWEEPS, jac.as_mut())?;
    let x_gs = linear::gauss_seidel(&linear_system, &x0, ITERATIVE_SWEEPS, gs.as_mut())?;

    let methods = vec![
        IterativeMethodReport {
            name: "jacobi",
            residual_inf: linear_system.residual_inf(&x_jac)?,
            x: x_jac,
            trace: jac,
        },
        IterativeMethodReport {
            name: "gaussSeidel",
            residual_inf: linear_system.residual_inf(&x_gs)?,
            x: x_gs,
            trace: gs,
        },
    ];
    let (a, b) = linear_system.into_parts();

    Ok(IterativeReport {
        kind: "iterative",
        referat: ITERATIVE_REFERAT,
        system,
        iterations: ITERATIVE_SWEEPS,
        a,
        b,
        x0,
        trace_enabled: trace,
        methods,
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewtonSystemsReport {
    pub kind: &'static str,
    pub referat: &'static str,
    pub system: usize,
    pub eps: f64,
    pub statement: &'static str,
    pub x0: Vector,
    pub x: Vector,
    pub fx: Vector,
    #[serde(rename = "residual_inf")]
    pub residual_inf: f64,
    pub trace_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<NewtonSystemTrace>,
}

/// Solve demonstration nonlinear system `system` by Newton's method.
pub fn newton_systems(system: usize, trace: bool) -> Result<NewtonSystemsReport> {
    let problem =
        demo::nonlinear_system(system).ok_or_else(|| selection("Invalid system. Use 1, 2, 3, or 4."))?;

    let mut t = trace.then(NewtonSystemTrace::new);
    let x = nonlinear::newton::solve(&problem.system, &problem.x0, NEWTON_SYSTEM_EPS, t.as_mut())?;
    let fx = problem.system.evaluate(&x);

    Ok(NewtonSystemsReport {
        kind: "newton_systems",
        referat: NEWTON_SYSTEMS_REFERAT,
        system,
        eps: NEWTON_SYSTEM_EPS,
        statement: problem.statement,
        x0: problem.x0,
        residual_inf: fx.norm_inf(),
        x,
        fx,
        trace_enabled: trace,
        trace: t,
    })
}

/// Pretty-print a report as JSON.
pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
