//! Callable wrappers that give the solvers a uniform evaluation contract.
//!
//! Equations are values built from closures, not types: a demonstration
//! equation is one `ScalarEquation::new(|x| ...)` call.

use std::fmt;

use crate::core::{Matrix, Vector};

type ScalarFn = dyn Fn(f64) -> f64 + Send + Sync;
type VectorFn = dyn Fn(&Vector) -> Vector + Send + Sync;
type JacobianFn = dyn Fn(&Vector) -> Matrix + Send + Sync;

/// Real function of one real variable, `f: ℝ → ℝ`.
pub struct ScalarEquation {
    f: Box<ScalarFn>,
}

impl ScalarEquation {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self { f: Box::new(f) }
    }

    /// Evaluate `f(x)`.
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        (self.f)(x)
    }
}

impl fmt::Debug for ScalarEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarEquation").finish_non_exhaustive()
    }
}

/// System `F(x) = 0` with its Jacobian `J(x)`.
///
/// No dimension invariant is enforced here; Newton's method checks the shapes
/// of `F(x)` and `J(x)` every time it evaluates them.
pub struct NonlinearSystem {
    f: Box<VectorFn>,
    j: Box<JacobianFn>,
}

impl NonlinearSystem {
    pub fn new<F, J>(f: F, j: J) -> Self
    where
        F: Fn(&Vector) -> Vector + Send + Sync + 'static,
        J: Fn(&Vector) -> Matrix + Send + Sync + 'static,
    {
        Self {
            f: Box::new(f),
            j: Box::new(j),
        }
    }

    /// Evaluate `F(x)`.
    pub fn evaluate(&self, x: &Vector) -> Vector {
        (self.f)(x)
    }

    /// Evaluate the Jacobian `J(x)`.
    pub fn jacobian(&self, x: &Vector) -> Matrix {
        (self.j)(x)
    }
}

impl fmt::Debug for NonlinearSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NonlinearSystem").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_equation_evaluates_closure() {
        let offset = 4.0;
        let eq = ScalarEquation::new(move |x| x * x - offset);
        assert_eq!(eq.evaluate(3.0), 5.0);
    }

    #[test]
    fn test_nonlinear_system_evaluates_both_parts() {
        let system = NonlinearSystem::new(
            |x: &Vector| Vector::from([x[0] * x[1], x[0] + x[1]]),
            |x: &Vector| {
                let mut j = Matrix::zeros(2, 2);
                j[(0, 0)] = x[1];
                j[(0, 1)] = x[0];
                j[(1, 0)] = 1.0;
                j[(1, 1)] = 1.0;
                j
            },
        );
        let x = Vector::from([2.0, 3.0]);
        assert_eq!(system.evaluate(&x).as_slice(), &[6.0, 5.0]);
        assert_eq!(system.jacobian(&x)[(0, 1)], 2.0);
    }
}
