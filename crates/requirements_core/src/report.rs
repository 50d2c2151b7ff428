//! Aggregated validation failure report.
//!
//! A `ValidationFailure` is the "data does not conform" outcome: the full
//! ordered difference sequence, per-kind counts, and a stable textual
//! rendering suitable for direct display in a host test framework.

use crate::{Difference, DifferenceCounts};
use serde::Serialize;
use std::fmt;

/// A difference together with the group key it was produced under, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedDifference {
    /// Group key, or `None` for ungrouped data
    pub group: Option<String>,
    /// The discrepancy itself
    pub difference: Difference,
}

impl GroupedDifference {
    /// Creates an ungrouped difference entry.
    pub fn ungrouped(difference: Difference) -> Self {
        Self {
            group: None,
            difference,
        }
    }

    /// Creates a difference entry tagged with a group key.
    pub fn in_group(group: impl Into<String>, difference: Difference) -> Self {
        Self {
            group: Some(group.into()),
            difference,
        }
    }
}

impl fmt::Display for GroupedDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.group {
            Some(group) => write!(f, "[{group}] {}", self.difference),
            None => write!(f, "{}", self.difference),
        }
    }
}

/// Report of a failed validation.
///
/// Always complete: the engine computes the full set of discrepancies in
/// one pass, never a first-failure short-circuit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationFailure {
    /// All differences, in deterministic order
    pub differences: Vec<GroupedDifference>,

    /// Per-kind totals
    pub counts: DifferenceCounts,
}

impl ValidationFailure {
    /// Builds a failure report from an ordered difference sequence.
    ///
    /// Counts are tallied here so the report is self-describing.
    pub fn new(differences: Vec<GroupedDifference>) -> Self {
        let counts = DifferenceCounts::tally(differences.iter().map(|d| &d.difference));
        Self {
            differences,
            counts,
        }
    }

    /// Number of differences in the report.
    pub fn len(&self) -> usize {
        self.differences.len()
    }

    /// Returns true if the report carries no differences.
    ///
    /// The engine never produces an empty failure; this exists for callers
    /// assembling reports by hand.
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// Serializes the report to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "data does not satisfy requirement: {} difference(s) ({})",
            self.differences.len(),
            self.counts
        )?;
        for entry in &self.differences {
            write!(f, "\n  {entry}")?;
        }
        Ok(())
    }
}
