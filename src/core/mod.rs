//! Dense value containers.
//!
//! [`Vector`] and [`Matrix`] own their storage exclusively and are sized at
//! construction. Solvers copy them before mutating, so caller-owned values are
//! never changed behind their back.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
