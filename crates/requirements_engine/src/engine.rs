//! Validation orchestrator.
//!
//! Top-level entry point: normalizes the raw requirement, drives the differ
//! or the group comparator, and aggregates all differences into a single
//! failure report or signals success. Purely computes and returns; it does
//! not mutate input data or perform I/O.

use crate::{differ, Normalizer, Observed, Requirement};
use requirements_core::{RawRequirement, ValidateError, ValidationFailure};
use tracing::debug;

/// Validates observed data against requirements.
///
/// Stateless between calls; a `Validator` only carries configuration and
/// may be shared freely across threads.
///
/// # Example
///
/// ```rust
/// use requirements_core::RawRequirement;
/// use requirements_engine::{Observed, Validator};
///
/// let requirement = RawRequirement::set([
///     RawRequirement::equal("active"),
///     RawRequirement::equal("inactive"),
/// ]);
/// let observed = Observed::collection(["active", "inactive", "pending"]);
///
/// let validator = Validator::new();
/// match validator.validate(&observed, &requirement) {
///     Ok(()) => println!("data conforms"),
///     Err(err) => println!("{err}"),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    normalizer: Normalizer,
}

impl Validator {
    /// Creates a validator with exact numeric equality.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tolerance applied to numeric equality requirements.
    pub fn with_tolerance_default(mut self, tolerance: f64) -> Self {
        self.normalizer = Normalizer::new().with_tolerance_default(tolerance);
        self
    }

    /// Validates observed data against a raw requirement.
    ///
    /// Returns `Ok(())` when the data conforms. A `Failed` error carries
    /// the complete ordered difference sequence; `Malformed` and `Shape`
    /// errors abort the call with no differences at all.
    pub fn validate(
        &self,
        observed: &Observed,
        requirement: &RawRequirement,
    ) -> Result<(), ValidateError> {
        let normalized = self.normalizer.normalize(requirement)?;
        self.validate_normalized(observed, &normalized)
    }

    /// Validates observed data against a pre-normalized requirement tree.
    ///
    /// Normalized trees are immutable and may be reused across many calls,
    /// including concurrently.
    pub fn validate_normalized(
        &self,
        observed: &Observed,
        requirement: &Requirement,
    ) -> Result<(), ValidateError> {
        let differences = differ::diff(requirement, observed)?;
        if differences.is_empty() {
            debug!("validation passed");
            return Ok(());
        }

        let failure = ValidationFailure::new(differences);
        debug!(
            "validation produced {} difference(s) ({})",
            failure.len(),
            failure.counts
        );
        Err(ValidateError::Failed(failure))
    }
}

/// Validates with a default-configured `Validator` (tolerance 0).
pub fn validate(observed: &Observed, requirement: &RawRequirement) -> Result<(), ValidateError> {
    Validator::new().validate(observed, requirement)
}
