//! # nm_core
//!
//! Classical numerical methods for small dense problems, written to reproduce
//! textbook algorithms exactly and to expose every step they take.
//!
//! This library provides:
//! - Dense [`Vector`] and [`Matrix`] value types
//! - Significant-digit rounding with round-half-to-even ties
//! - Gaussian elimination with partial pivoting and hand-calculation rounding
//! - Jacobi and Gauss-Seidel iteration
//! - Bisection, regula falsi, secant and Newton for scalar equations
//! - Newton's method for nonlinear systems
//!
//! ## Architecture
//!
//! - [`core`] - Vector and matrix containers
//! - [`rounding`] - Rounding to significant digits
//! - [`linear`] - Linear systems and their solvers
//! - [`nonlinear`] - Scalar root finding and Newton for systems
//! - [`demo`] - Built-in demonstration problems
//! - `report` - JSON reports for the front-end (feature `serde`)
//!
//! ## Traces
//!
//! Every solver takes an optional trace sink. When one is passed, the solver
//! clears or appends to it and records the state of each iteration; with
//! `None` nothing is recorded. Traces never change the numerical result.
//!
//! ## Usage
//!
//! ```
//! use nm_core::{bisection, jacobi, LinearSystem, Matrix, ScalarEquation, Vector};
//! use nm_core::nonlinear::BisectionTrace;
//!
//! let eq = ScalarEquation::new(|x| x * x - 2.0);
//! let mut trace = BisectionTrace::new();
//! let root = bisection(&eq, 1.0, 2.0, 1e-10, Some(&mut trace)).unwrap();
//! assert!((root - 2f64.sqrt()).abs() < 1e-9);
//! assert!(!trace.steps.is_empty());
//!
//! let a = Matrix::from([[4.0, 1.0], [1.0, 3.0]]);
//! let system = LinearSystem::new(a, Vector::from([1.0, 2.0]));
//! let x = jacobi(&system, &Vector::zeros(2), 25, None).unwrap();
//! assert!(system.residual_inf(&x).unwrap() < 1e-6);
//! ```

pub mod core;
pub mod demo;
pub mod error;
pub mod linear;
pub mod nonlinear;
pub mod rounding;

#[cfg(feature = "serde")]
pub mod report;

// Re-export main types for convenience
pub use crate::core::{Matrix, Vector};
pub use error::{NumericalError, Result};
pub use linear::gauss::solve as gaussian_elimination;
pub use linear::{gauss_seidel, jacobi, LinearSystem, PIVOT_EPSILON};
pub use nonlinear::newton::solve as newton_system;
pub use nonlinear::{bisection, newton, regula_falsi, secant, NonlinearSystem, ScalarEquation};
pub use rounding::{round_to_significant_digits, TIE_TOLERANCE};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;
