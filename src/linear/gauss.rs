//! Gaussian elimination with hand-calculation rounding.

use crate::core::{Matrix, Vector};
use crate::error::{NumericalError, Result};

use super::elimination::{solve_pivoted, Rounding};
use super::LinearSystem;

/// Elimination phase an operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum Phase {
    Forward,
    Back,
}

/// State after eliminating below one pivot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct ForwardStep {
    /// Pivot column (0-based).
    pub k: usize,
    /// Row chosen as pivot before any swap (0-based).
    pub pivot_row: usize,
    pub swapped: bool,
    #[cfg_attr(feature = "serde", serde(rename = "A"))]
    pub a: Matrix,
    pub b: Vector,
}

/// Unknown solved by a back-substitution step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolvedValue {
    /// 0-based index into `x`.
    pub index: usize,
    pub value: f64,
}

/// One labelled operation with the working system after it was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct EliminationOperation {
    pub phase: Phase,
    /// Human-readable label, e.g. `R3 <- R3 - (0.5) * R1`.
    pub op: String,
    pub a: Matrix,
    pub b: Vector,
    /// Set on back-substitution steps.
    pub solved: Option<SolvedValue>,
}

#[cfg(feature = "serde")]
impl serde::Serialize for EliminationOperation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let (index, value) = self.solved.map_or((0, 0.0), |s| (s.index, s.value));
        let mut st = serializer.serialize_struct("EliminationOperation", 7)?;
        st.serialize_field("phase", &self.phase)?;
        st.serialize_field("op", &self.op)?;
        st.serialize_field("A", &self.a)?;
        st.serialize_field("b", &self.b)?;
        st.serialize_field("hasSolveValue", &self.solved.is_some())?;
        st.serialize_field("solveIndex", &index)?;
        st.serialize_field("solveValue", &value)?;
        st.end()
    }
}

/// Record of a Gaussian elimination run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GaussianEliminationTrace {
    /// One snapshot per pivot column.
    #[cfg_attr(feature = "serde", serde(rename = "forwardElimination"))]
    pub forward_steps: Vec<ForwardStep>,
    /// Fine-grained log: pivot choices, swaps, row operations, then each
    /// back-substitution step.
    pub operations: Vec<EliminationOperation>,
}

impl GaussianEliminationTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matrix after forward elimination, if the run got that far.
    pub fn triangular(&self) -> Option<&EliminationOperation> {
        self.operations
            .iter()
            .rev()
            .find(|op| op.phase == Phase::Forward)
    }
}

/// Solve `A·x = b` by Gaussian elimination with partial pivoting, rounding
/// every intermediate product and difference to `significant_digits`.
///
/// The per-operation rounding reproduces the error a person computing by hand
/// with that many digits would accumulate.
///
/// # Errors
///
/// - [`NumericalError::InvalidArgument`] if `significant_digits` is zero
/// - [`NumericalError::DimensionMismatch`] if `A` is not `n × n` with `n = b.len()`
/// - [`NumericalError::SingularMatrix`] if a pivot or diagonal entry vanishes
///
/// # Example
///
/// ```
/// use nm_core::{gaussian_elimination, LinearSystem, Matrix, Vector};
///
/// let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]]).unwrap();
/// let system = LinearSystem::new(a, Vector::from([3.0, 5.0]));
///
/// let x = gaussian_elimination(&system, 3, None).unwrap();
/// assert_eq!(x.as_slice(), &[0.8, 1.4]);
/// ```
pub fn solve(
    system: &LinearSystem,
    significant_digits: u32,
    trace: Option<&mut GaussianEliminationTrace>,
) -> Result<Vector> {
    if significant_digits == 0 {
        return Err(NumericalError::invalid_argument(
            "significant digits must be positive",
        ));
    }
    system.ensure_square("Gaussian elimination")?;

    let (a, b) = system.clone().into_parts();
    let x = solve_pivoted(a, b, Rounding::Significant(significant_digits), trace)?;

    log::debug!("Gaussian elimination solved {}x{} system with {significant_digits} digits", x.len(), x.len());
    Ok(x)
}
