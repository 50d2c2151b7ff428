//! Builder pattern for grouped requirements.
//!
//! This module provides an ergonomic builder for constructing grouped
//! requirements with a fluent API. Flat requirements are built directly with
//! the `RawRequirement` constructors.

use crate::RawRequirement;
use std::collections::BTreeMap;

/// Builder for a grouped `RawRequirement`.
///
/// # Example
///
/// ```rust
/// use requirements_core::{GroupsBuilder, RawRequirement};
///
/// let requirement = GroupsBuilder::new()
///     .group("x", RawRequirement::set([
///         RawRequirement::equal(1),
///         RawRequirement::equal(2),
///     ]))
///     .group("y", RawRequirement::set([RawRequirement::equal(3)]))
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct GroupsBuilder {
    entries: BTreeMap<String, RawRequirement>,
}

impl GroupsBuilder {
    /// Creates a new, empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sub-requirement for a group key.
    ///
    /// Adding the same key twice replaces the earlier entry.
    pub fn group(mut self, key: impl Into<String>, requirement: RawRequirement) -> Self {
        self.entries.insert(key.into(), requirement);
        self
    }

    /// Builds the grouped requirement.
    pub fn build(self) -> RawRequirement {
        RawRequirement::Groups(self.entries)
    }
}
