//! Nonlinear solvers: scalar root finding and Newton's method for systems.

mod equation;
pub mod newton;
pub mod root_finding;

pub use equation::{NonlinearSystem, ScalarEquation};
pub use newton::{NewtonSystemTrace, NewtonSystemTraceStep, NEWTON_SYSTEM_MAX_ITERATIONS};
pub use root_finding::{
    bisection, newton, regula_falsi, secant, BisectionTrace, BisectionTraceStep, NewtonTrace,
    NewtonTraceStep, RegulaFalsiTrace, RegulaFalsiTraceStep, RootTrace, SecantTrace,
    SecantTraceStep, BISECTION_MAX_ITERATIONS, NEWTON_MAX_ITERATIONS, REGULA_FALSI_MAX_ITERATIONS,
    SECANT_MAX_ITERATIONS,
};
