//! Error types for requirement normalization and validation.

use crate::ValidationFailure;
use thiserror::Error;

/// A raw requirement that cannot be normalized.
///
/// This is a usage error, surfaced immediately and distinct from a
/// validation failure. Normalization never returns a partially built tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedRequirement {
    /// Regex pattern failed to compile
    #[error("invalid pattern '{pattern}': {reason}")]
    BadPattern { pattern: String, reason: String },

    /// Tolerance must be a non-negative finite number
    #[error("tolerance must be a non-negative finite number, got {tolerance}")]
    BadTolerance { tolerance: f64 },

    /// Approximate expected values must be comparable
    #[error("approximate expected value must be finite, got {expected}")]
    NonFiniteExpected { expected: f64 },

    /// Structural variants are only valid at certain positions
    #[error("{found} requirement cannot appear inside a {container}")]
    Misplaced {
        found: &'static str,
        container: &'static str,
    },
}

/// Requirement and observed data have structurally incompatible shapes.
///
/// Shape mismatches abort the validation call; they are never silently
/// coerced into element comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{requirement} requirement cannot be checked against {observed} data")]
pub struct ShapeMismatch {
    /// Shape of the requirement side
    pub requirement: &'static str,
    /// Shape of the observed side
    pub observed: &'static str,
}

impl ShapeMismatch {
    /// Creates a new shape mismatch error.
    pub fn new(requirement: &'static str, observed: &'static str) -> Self {
        Self {
            requirement,
            observed,
        }
    }
}

/// Top-level error type for validation calls.
///
/// `Malformed` and `Shape` are hard errors that abort the call with no
/// difference sequence. `Failed` is the expected "data does not conform"
/// outcome and always carries the complete, ordered difference sequence.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The raw requirement could not be normalized
    #[error(transparent)]
    Malformed(#[from] MalformedRequirement),

    /// Requirement and observed data shapes are incompatible
    #[error(transparent)]
    Shape(#[from] ShapeMismatch),

    /// The data does not satisfy the requirement
    #[error("{0}")]
    Failed(ValidationFailure),
}

impl ValidateError {
    /// Returns the validation failure, if this is the soft outcome.
    pub fn into_failure(self) -> Option<ValidationFailure> {
        match self {
            ValidateError::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<ValidationFailure> for ValidateError {
    fn from(failure: ValidationFailure) -> Self {
        ValidateError::Failed(failure)
    }
}
