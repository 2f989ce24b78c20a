//! Linear systems and their solvers.
//!
//! ## Direct
//!
//! [`gauss::solve`] performs Gaussian elimination with partial pivoting. At
//! each column the row with the largest magnitude entry becomes the pivot row;
//! every multiplier, product and difference is then rounded to a fixed number
//! of significant digits, as in a worked example done by hand.
//!
//! ## Iterative
//!
//! [`jacobi`] and [`gauss_seidel`] run a fixed number of sweeps of the
//! classical splitting `x <- D⁻¹ (b − (L + U) x)`.

mod elimination;
pub mod gauss;
mod iterative;
mod system;

pub(crate) use elimination::{solve_pivoted, Rounding};
pub use gauss::{
    EliminationOperation, ForwardStep, GaussianEliminationTrace, Phase, SolvedValue,
};
pub use iterative::{gauss_seidel, jacobi, IterativeMethodTrace, IterativeTraceStep};
pub use system::LinearSystem;

/// Pivots and diagonal entries with smaller magnitude are treated as zero.
pub const PIVOT_EPSILON: f64 = 1e-15;
