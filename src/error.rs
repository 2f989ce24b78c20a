//! Error types for the numerical methods kernel.
//!
//! Every solver reports failures through [`NumericalError`]. The four variants
//! form a closed taxonomy: malformed input, inconsistent shapes, a vanishing
//! pivot, and an iteration that ran out of budget or diverged. None of them is
//! retried internally; the call in progress stops and the error is returned to
//! the immediate caller.
//!
//! Out-of-range element access on [`Vector`](crate::Vector) or
//! [`Matrix`](crate::Matrix) is not part of this taxonomy. Indexing panics like
//! a slice does, and the `get` accessors return `Option` for checked access.

use thiserror::Error;

/// Result type alias using [`NumericalError`].
pub type Result<T> = std::result::Result<T, NumericalError>;

/// Unified error type for all solver operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericalError {
    /// Caller input is malformed: non-positive tolerance or digit count,
    /// a non-bracketing interval, a zero denominator in an update formula,
    /// a non-finite required value, or a missing derivative.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Matrix and vector shapes disagree with the system size.
    #[error("Dimension mismatch: {message}")]
    DimensionMismatch { message: String },

    /// A pivot or diagonal entry fell below the singularity threshold.
    #[error("Singular matrix: {message}")]
    SingularMatrix { message: String },

    /// The iteration budget was exhausted or an iterate became non-finite.
    #[error("Did not converge: {message}")]
    NonConvergence { message: String },
}

impl NumericalError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(message: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            message: message.into(),
        }
    }

    /// Create a singular matrix error
    pub fn singular_matrix(message: impl Into<String>) -> Self {
        Self::SingularMatrix {
            message: message.into(),
        }
    }

    /// Create a non-convergence error
    pub fn non_convergence(message: impl Into<String>) -> Self {
        Self::NonConvergence {
            message: message.into(),
        }
    }

    /// Short machine-friendly name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::DimensionMismatch { .. } => "dimension_mismatch",
            Self::SingularMatrix { .. } => "singular_matrix",
            Self::NonConvergence { .. } => "non_convergence",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_failed_check() {
        let err = NumericalError::singular_matrix("zero pivot in column 2");
        assert_eq!(err.to_string(), "Singular matrix: zero pivot in column 2");
        assert_eq!(err.kind(), "singular_matrix");
    }

    #[test]
    fn test_constructors_pick_variant() {
        assert!(matches!(
            NumericalError::invalid_argument("eps must be > 0"),
            NumericalError::InvalidArgument { .. }
        ));
        assert!(matches!(
            NumericalError::dimension_mismatch("x0"),
            NumericalError::DimensionMismatch { .. }
        ));
        assert!(matches!(
            NumericalError::non_convergence("limit"),
            NumericalError::NonConvergence { .. }
        ));
    }
}
