//! Built-in demonstration problems.
//!
//! Four problems per solver family, numbered from 1. The numbering is part of
//! the command-line and WASM interfaces, so selections stay stable.

use std::f64::consts::{E, PI};

use crate::core::{Matrix, Vector};
use crate::linear::LinearSystem;
use crate::nonlinear::{NonlinearSystem, ScalarEquation};

/// Problems available per family.
pub const PROBLEM_COUNT: usize = 4;

/// Scalar equation with its derivative and two bracketing intervals.
#[derive(Debug)]
pub struct EquationProblem {
    pub statement: &'static str,
    pub equation: ScalarEquation,
    pub derivative: ScalarEquation,
    pub intervals: [(f64, f64); 2],
    /// `f` is only defined for `x > 0`.
    pub positive_domain: bool,
}

impl EquationProblem {
    /// Interval `1` or `2`.
    pub fn interval(&self, which: usize) -> Option<(f64, f64)> {
        which.checked_sub(1).and_then(|i| self.intervals.get(i).copied())
    }
}

/// Nonlinear system with a starting point.
#[derive(Debug)]
pub struct NonlinearProblem {
    pub statement: &'static str,
    pub system: NonlinearSystem,
    pub x0: Vector,
}

/// Scalar equation `index` (1-based).
pub fn equation(index: usize) -> Option<EquationProblem> {
    let problem = match index {
        1 => EquationProblem {
            statement: "x^2 - 4x + 4 - ln(x) = 0",
            equation: ScalarEquation::new(|x| x * x - 4.0 * x + 4.0 - x.ln()),
            derivative: ScalarEquation::new(|x| 2.0 * x - 4.0 - 1.0 / x),
            intervals: [(1.0, 2.0), (2.0, 4.0)],
            positive_domain: true,
        },
        2 => EquationProblem {
            statement: "x + 1 - 2 sin(pi x) = 0",
            equation: ScalarEquation::new(|x| x + 1.0 - 2.0 * (PI * x).sin()),
            derivative: ScalarEquation::new(|x| 1.0 - 2.0 * PI * (PI * x).cos()),
            intervals: [(0.0, 0.5), (0.5, 1.0)],
            positive_domain: false,
        },
        3 => EquationProblem {
            statement: "e^x - 3x^2 = 0",
            equation: ScalarEquation::new(|x| x.exp() - 3.0 * x * x),
            derivative: ScalarEquation::new(|x| x.exp() - 6.0 * x),
            intervals: [(0.0, 1.0), (3.0, 5.0)],
            positive_domain: false,
        },
        4 => EquationProblem {
            statement: "2x cos(2x) - (x-2)^2 = 0",
            equation: ScalarEquation::new(|x| {
                2.0 * x * (2.0 * x).cos() - (x - 2.0) * (x - 2.0)
            }),
            derivative: ScalarEquation::new(|x| {
                2.0 * (2.0 * x).cos() - 4.0 * x * (2.0 * x).sin() - 2.0 * (x - 2.0)
            }),
            intervals: [(2.0, 3.0), (3.0, 4.0)],
            positive_domain: false,
        },
        _ => return None,
    };
    Some(problem)
}

/// System `index` (1-based) for Gaussian elimination.
pub fn gauss_system(index: usize) -> Option<LinearSystem> {
    let system = match index {
        1 => LinearSystem::new(
            Matrix::from([
                [3.03, -12.1, 14.0],
                [-3.03, 12.1, -7.0],
                [6.11, -14.2, 21.0],
            ]),
            Vector::from([-119.0, 120.0, -139.0]),
        ),
        2 => LinearSystem::new(
            Matrix::from([
                [3.333, 15920.0, 10.333],
                [2.222, 16.71, 9.612],
                [-1.5611, 5.1792, -1.6855],
            ]),
            Vector::from([7953.0, 0.965, 2714.0]),
        ),
        3 => LinearSystem::new(
            Matrix::from([
                [2.12, -2.12, 51.3, 100.0],
                [0.333, -0.333, -12.2, 19.7],
                [6.19, 8.20, -1.0, -2.01],
                [-5.73, 6.12, 1.0, -1.0],
            ]),
            Vector::from([PI, 2.0f64.sqrt(), 0.0, -1.0]),
        ),
        4 => LinearSystem::new(
            Matrix::from([
                [PI, 2.0f64.sqrt(), -1.0, 1.0],
                [E, -1.0, 1.0, 2.0],
                [1.0, 1.0, -(3.0f64.sqrt()), 1.0],
                [-1.0, -1.0, 1.0, -(5.0f64.sqrt())],
            ]),
            Vector::from([0.0, 1.0, 2.0, 3.0]),
        ),
        _ => return None,
    };
    Some(system)
}

/// Diagonally dominant system `index` (1-based) for Jacobi and Gauss-Seidel.
pub fn iterative_system(index: usize) -> Option<LinearSystem> {
    let system = match index {
        1 => LinearSystem::new(
            Matrix::from([
                [4.0, 1.0, 1.0, 0.0, 1.0],
                [-1.0, -3.0, 1.0, 1.0, 0.0],
                [2.0, 1.0, 5.0, -1.0, -1.0],
                [-1.0, -1.0, -1.0, 4.0, 0.0],
                [0.0, 2.0, -1.0, 1.0, 4.0],
            ]),
            Vector::from([6.0; 5]),
        ),
        2 => LinearSystem::new(
            Matrix::from([
                [4.0, -1.0, 0.0, -1.0, 0.0, 0.0],
                [-1.0, 4.0, -1.0, 0.0, -1.0, 0.0],
                [0.0, -1.0, 4.0, 0.0, 0.0, -1.0],
                [-1.0, 0.0, 0.0, 4.0, -1.0, 0.0],
                [0.0, -1.0, 0.0, -1.0, 4.0, -1.0],
                [0.0, 0.0, -1.0, 0.0, -1.0, 4.0],
            ]),
            Vector::from([0.0, 5.0, 0.0, 6.0, -2.0, 6.0]),
        ),
        3 => LinearSystem::new(
            Matrix::from([
                [10.0, 5.0, 0.0, 0.0],
                [5.0, 10.0, -4.0, 0.0],
                [0.0, -4.0, 8.0, -1.0],
                [0.0, 0.0, -1.0, 5.0],
            ]),
            Vector::from([6.0, 25.0, -11.0, -11.0]),
        ),
        4 => LinearSystem::new(
            Matrix::from([
                [4.0, 1.0, -1.0, 1.0],
                [1.0, 4.0, -1.0, -1.0],
                [-1.0, -1.0, 5.0, 1.0],
                [1.0, -1.0, 1.0, 3.0],
            ]),
            Vector::from([-2.0, -1.0, 0.0, 1.0]),
        ),
        _ => return None,
    };
    Some(system)
}

/// Nonlinear system `index` (1-based) with its starting point.
pub fn nonlinear_system(index: usize) -> Option<NonlinearProblem> {
    let problem = match index {
        1 => NonlinearProblem {
            statement: "x1 + 2x2^2 - x2 - 2x3 = 0;  x2 - 8x2^2 + 10x3 = 0;  1/(7x3) - 1 = 0",
            system: NonlinearSystem::new(
                |x: &Vector| {
                    Vector::from([
                        x[0] + 2.0 * x[1] * x[1] - x[1] - 2.0 * x[2],
                        x[1] - 8.0 * x[1] * x[1] + 10.0 * x[2],
                        1.0 / (7.0 * x[2]) - 1.0,
                    ])
                },
                |x: &Vector| {
                    Matrix::from([
                        [1.0, 4.0 * x[1] - 1.0, -2.0],
                        [0.0, 1.0 - 16.0 * x[1], 10.0],
                        [0.0, 0.0, -1.0 / (7.0 * x[2] * x[2])],
                    ])
                },
            ),
            x0: Vector::from([0.3, 0.5, 0.14]),
        },
        2 => NonlinearProblem {
            statement: "x1^2 + x2 - 37 = 0;  x1 - x2^2 - 5 = 0;  x1 + x2 + x3 - 3 = 0",
            system: NonlinearSystem::new(
                |x: &Vector| {
                    Vector::from([
                        x[0] * x[0] + x[1] - 37.0,
                        x[0] - x[1] * x[1] - 5.0,
                        x[0] + x[1] + x[2] - 3.0,
                    ])
                },
                |x: &Vector| {
                    Matrix::from([
                        [2.0 * x[0], 1.0, 0.0],
                        [1.0, -2.0 * x[1], 0.0],
                        [1.0, 1.0, 1.0],
                    ])
                },
            ),
            x0: Vector::from([6.0, 6.0, -9.0]),
        },
        3 => NonlinearProblem {
            statement: "x1^2 + x2^2 - x1 = 0;  x1^2 - x2^2 - x2 = 0",
            system: NonlinearSystem::new(
                |x: &Vector| {
                    Vector::from([
                        x[0] * x[0] + x[1] * x[1] - x[0],
                        x[0] * x[0] - x[1] * x[1] - x[1],
                    ])
                },
                |x: &Vector| {
                    Matrix::from([
                        [2.0 * x[0] - 1.0, 2.0 * x[1]],
                        [2.0 * x[0], -2.0 * x[1] - 1.0],
                    ])
                },
            ),
            x0: Vector::from([0.5, 0.5]),
        },
        4 => NonlinearProblem {
            statement: "3x1^2 - x2^2 = 0;  3x1 x2^2 - x1^3 - 1 = 0",
            system: NonlinearSystem::new(
                |x: &Vector| {
                    Vector::from([
                        3.0 * x[0] * x[0] - x[1] * x[1],
                        3.0 * x[0] * x[1] * x[1] - x[0] * x[0] * x[0] - 1.0,
                    ])
                },
                |x: &Vector| {
                    Matrix::from([
                        [6.0 * x[0], -2.0 * x[1]],
                        [3.0 * x[1] * x[1] - 3.0 * x[0] * x[0], 6.0 * x[0] * x[1]],
                    ])
                },
            ),
            x0: Vector::from([1.0, 2.0]),
        },
        _ => return None,
    };
    Some(problem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_one_based() {
        assert!(equation(0).is_none());
        assert!(gauss_system(PROBLEM_COUNT + 1).is_none());
        for i in 1..=PROBLEM_COUNT {
            assert!(equation(i).is_some());
            assert!(gauss_system(i).is_some());
            assert!(iterative_system(i).is_some());
            assert!(nonlinear_system(i).is_some());
        }
    }

    #[test]
    fn test_every_interval_brackets_a_root() {
        for i in 1..=PROBLEM_COUNT {
            let problem = equation(i).unwrap();
            for (a, b) in problem.intervals {
                assert!(a < b);
                let fa = problem.equation.evaluate(a);
                let fb = problem.equation.evaluate(b);
                assert!(fa * fb < 0.0, "equation {i} on [{a}, {b}]");
            }
        }
    }

    #[test]
    fn test_interval_selection() {
        let problem = equation(1).unwrap();
        assert_eq!(problem.interval(1), Some((1.0, 2.0)));
        assert_eq!(problem.interval(2), Some((2.0, 4.0)));
        assert_eq!(problem.interval(0), None);
        assert_eq!(problem.interval(3), None);
    }

    #[test]
    fn test_system_shapes() {
        let sizes = [(3, 5, 3), (3, 6, 3), (4, 4, 2), (4, 4, 2)];
        for (i, (gauss, iterative, nonlinear)) in (1..=PROBLEM_COUNT).zip(sizes) {
            let g = gauss_system(i).unwrap();
            assert_eq!((g.size(), g.matrix().rows()), (gauss, gauss));
            let it = iterative_system(i).unwrap();
            assert_eq!((it.size(), it.matrix().cols()), (iterative, iterative));

            let nl = nonlinear_system(i).unwrap();
            assert_eq!(nl.x0.len(), nonlinear);
            assert_eq!(nl.system.evaluate(&nl.x0).len(), nonlinear);
            assert!(nl.system.jacobian(&nl.x0).is_square());
        }
    }
}
