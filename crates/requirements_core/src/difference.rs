//! Difference types produced by the differ.
//!
//! A `Difference` is a single detected discrepancy between observed data and
//! a requirement. Differences are immutable value objects; the differ emits
//! them in a deterministic order and the report owns them until the caller
//! consumes the report.

use crate::{Value, ValueKind};
use serde::Serialize;
use std::fmt;

/// What a requirement wanted, in displayable form.
///
/// Literal requirements expect a concrete value; pattern, type and predicate
/// requirements have no single concrete value, so they describe themselves
/// instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Expected {
    /// A concrete literal value
    Value {
        value: Value,
    },
    /// A full-match regex pattern
    Pattern {
        pattern: String,
    },
    /// A value kind
    Kind {
        kind: ValueKind,
    },
    /// A named user predicate
    Predicate {
        name: String,
    },
    /// A numeric value within a tolerance
    Approx {
        expected: f64,
        tolerance: f64,
    },
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Value { value } => write!(f, "{value}"),
            Expected::Pattern { pattern } => write!(f, "matching /{pattern}/"),
            Expected::Kind { kind } => write!(f, "of type {kind}"),
            Expected::Predicate { name } => write!(f, "satisfying '{name}'"),
            Expected::Approx {
                expected,
                tolerance,
            } => write!(f, "within {tolerance} of {expected}"),
        }
    }
}

impl From<Value> for Expected {
    fn from(value: Value) -> Self {
        Expected::Value { value }
    }
}

/// A single detected discrepancy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Difference {
    /// A required element is absent from the observed data.
    Missing { expected: Expected },

    /// An observed element is not sanctioned by any requirement.
    Extra { observed: Value },

    /// An observed element is present but fails its match.
    Invalid {
        observed: Value,
        /// The expectation it failed, when one can be stated.
        expected: Option<Expected>,
    },

    /// A numeric element is outside the allowed tolerance.
    Deviation {
        observed: Value,
        expected: f64,
        /// Signed magnitude: `observed - expected`.
        delta: f64,
    },
}

impl Difference {
    /// Creates a missing-element difference.
    pub fn missing(expected: impl Into<Expected>) -> Self {
        Difference::Missing {
            expected: expected.into(),
        }
    }

    /// Creates an extra-element difference.
    pub fn extra(observed: impl Into<Value>) -> Self {
        Difference::Extra {
            observed: observed.into(),
        }
    }

    /// Creates an invalid-element difference without a stated expectation.
    pub fn invalid(observed: impl Into<Value>) -> Self {
        Difference::Invalid {
            observed: observed.into(),
            expected: None,
        }
    }

    /// Creates an invalid-element difference with the expectation it failed.
    pub fn invalid_against(observed: impl Into<Value>, expected: impl Into<Expected>) -> Self {
        Difference::Invalid {
            observed: observed.into(),
            expected: Some(expected.into()),
        }
    }

    /// Creates a numeric deviation difference.
    pub fn deviation(observed: impl Into<Value>, expected: f64, delta: f64) -> Self {
        Difference::Deviation {
            observed: observed.into(),
            expected,
            delta,
        }
    }

    /// Returns the kind name used in summaries.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Difference::Missing { .. } => "missing",
            Difference::Extra { .. } => "extra",
            Difference::Invalid { .. } => "invalid",
            Difference::Deviation { .. } => "deviation",
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difference::Missing { expected } => write!(f, "missing: {expected}"),
            Difference::Extra { observed } => write!(f, "extra: {observed}"),
            Difference::Invalid {
                observed,
                expected: Some(expected),
            } => write!(f, "invalid: {observed}, expected {expected}"),
            Difference::Invalid {
                observed,
                expected: None,
            } => write!(f, "invalid: {observed}"),
            Difference::Deviation {
                observed,
                expected,
                delta,
            } => write!(f, "deviation: {observed} differs from {expected} by {delta:+}"),
        }
    }
}

/// Per-kind difference totals for a validation report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifferenceCounts {
    pub missing: usize,
    pub extra: usize,
    pub invalid: usize,
    pub deviation: usize,
}

impl DifferenceCounts {
    /// Tallies counts over a difference sequence.
    pub fn tally<'a>(differences: impl IntoIterator<Item = &'a Difference>) -> Self {
        let mut counts = DifferenceCounts::default();
        for difference in differences {
            match difference {
                Difference::Missing { .. } => counts.missing += 1,
                Difference::Extra { .. } => counts.extra += 1,
                Difference::Invalid { .. } => counts.invalid += 1,
                Difference::Deviation { .. } => counts.deviation += 1,
            }
        }
        counts
    }

    /// Total number of differences counted.
    pub fn total(&self) -> usize {
        self.missing + self.extra + self.invalid + self.deviation
    }
}

impl fmt::Display for DifferenceCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} missing, {} extra, {} invalid, {} deviation",
            self.missing, self.extra, self.invalid, self.deviation
        )
    }
}
