//! Error types for orientation map segmentation

use std::fmt;

/// Coarse classification of every [`GrainError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller supplied data or parameters the algorithm cannot accept
    InvalidInput,
    /// A stage was invoked before the data it depends on exists
    PreconditionNotLoaded,
    /// A post-condition check failed; indicates a logic defect
    AlgorithmInvariantViolation,
}

/// Main error type for all segmentation operations
#[derive(Debug, Clone, PartialEq)]
pub enum GrainError {
    /// Input data doesn't meet algorithm requirements
    InvalidInput {
        /// Description of what's wrong with the input
        reason: String,
    },

    /// Algorithm parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Two grids that must share a shape do not
    DimensionMismatch {
        /// Shape of the reference grid (rows, cols)
        expected: (usize, usize),
        /// Shape of the offending grid (rows, cols)
        found: (usize, usize),
    },

    /// Quaternion is not unit norm within tolerance
    NonUnitQuaternion {
        /// Grid position `[row, col]` when the quaternion came from a grid
        position: Option<[usize; 2]>,
        /// Measured norm
        norm: f64,
    },

    /// Crystal symmetry family name is not recognised
    UnknownSymmetry {
        /// Name that failed to parse
        name: String,
    },

    /// Stage invoked before its inputs were produced
    PreconditionNotLoaded {
        /// Data that is missing
        stage: &'static str,
    },

    /// Post-condition check failed after an algorithm completed
    InvariantViolation {
        /// Name of the check that failed
        check: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl GrainError {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. }
            | Self::InvalidParameter { .. }
            | Self::DimensionMismatch { .. }
            | Self::NonUnitQuaternion { .. }
            | Self::UnknownSymmetry { .. } => ErrorKind::InvalidInput,
            Self::PreconditionNotLoaded { .. } => ErrorKind::PreconditionNotLoaded,
            Self::InvariantViolation { .. } => ErrorKind::AlgorithmInvariantViolation,
        }
    }
}

impl fmt::Display for GrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { reason } => write!(f, "Invalid input: {reason}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::DimensionMismatch { expected, found } => {
                write!(
                    f,
                    "Grid dimension mismatch: expected {}x{}, found {}x{}",
                    expected.0, expected.1, found.0, found.1
                )
            }
            Self::NonUnitQuaternion { position, norm } => match position {
                Some([row, col]) => write!(
                    f,
                    "Quaternion at [{row}, {col}] is not unit norm (norm {norm})"
                ),
                None => write!(f, "Quaternion is not unit norm (norm {norm})"),
            },
            Self::UnknownSymmetry { name } => {
                write!(f, "Unknown crystal symmetry '{name}'")
            }
            Self::PreconditionNotLoaded { stage } => {
                write!(f, "Precondition not met: {stage} not loaded")
            }
            Self::InvariantViolation { check, reason } => {
                write!(f, "Algorithm invariant '{check}' violated: {reason}")
            }
        }
    }
}

impl std::error::Error for GrainError {}

/// Convenience type alias for segmentation results
pub type Result<T> = std::result::Result<T, GrainError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GrainError {
    GrainError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invariant violation error
pub fn invariant_violation(check: &'static str, reason: &impl ToString) -> GrainError {
    GrainError::InvariantViolation {
        check,
        reason: reason.to_string(),
    }
}
