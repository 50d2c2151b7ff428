//! Requirement normalization.
//!
//! Converts a caller-supplied `RawRequirement` into the engine's typed,
//! immutable `Requirement` tree: patterns are compiled once, tolerances are
//! validated, and structural rules are enforced. Normalization either
//! produces a complete tree or fails with `MalformedRequirement`; it never
//! returns a partially built requirement.

use crate::Matcher;
use requirements_core::{MalformedRequirement, RawRequirement, Value};
use std::collections::BTreeMap;

/// A normalized requirement tree.
///
/// Immutable once built; the same tree may be reused across many validation
/// calls, including concurrently (read-only sharing).
#[derive(Debug, Clone)]
pub enum Requirement {
    /// A single element must satisfy the matcher.
    Single(Matcher),
    /// A single element must be numeric and within tolerance of `expected`.
    Approx {
        expected: f64,
        tolerance: f64,
    },
    /// Unordered membership over atom matchers.
    Set(Vec<Matcher>),
    /// Position-aligned atom matchers.
    Sequence(Vec<Matcher>),
    /// Group key to sub-requirement; values are never themselves mappings.
    Mapping(BTreeMap<String, Requirement>),
}

impl Requirement {
    /// Returns the shape name used in error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Requirement::Single(_) => "scalar",
            Requirement::Approx { .. } => "approximate",
            Requirement::Set(_) => "set",
            Requirement::Sequence(_) => "sequence",
            Requirement::Mapping(_) => "grouped",
        }
    }
}

/// Normalizes raw requirements.
///
/// # Example
///
/// ```rust
/// use requirements_core::RawRequirement;
/// use requirements_engine::Normalizer;
///
/// let raw = RawRequirement::set([
///     RawRequirement::equal("a"),
///     RawRequirement::pattern("[0-9]+"),
/// ]);
/// let requirement = Normalizer::new().normalize(&raw).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    tolerance_default: f64,
}

impl Normalizer {
    /// Creates a normalizer with exact numeric equality (tolerance 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tolerance applied to numeric equality requirements at
    /// scalar positions. Membership in sets and sequences stays exact.
    pub fn with_tolerance_default(mut self, tolerance: f64) -> Self {
        self.tolerance_default = tolerance;
        self
    }

    /// Normalizes a raw requirement into its typed tree.
    pub fn normalize(&self, raw: &RawRequirement) -> Result<Requirement, MalformedRequirement> {
        check_tolerance(self.tolerance_default)?;
        self.normalize_value(raw, true)
    }

    /// Normalizes a requirement at scalar-or-structural position.
    /// `allow_groups` is true only at the top level.
    fn normalize_value(
        &self,
        raw: &RawRequirement,
        allow_groups: bool,
    ) -> Result<Requirement, MalformedRequirement> {
        match raw {
            RawRequirement::Approx {
                expected,
                tolerance,
            } => {
                check_tolerance(*tolerance)?;
                check_expected(*expected)?;
                Ok(Requirement::Approx {
                    expected: *expected,
                    tolerance: *tolerance,
                })
            }
            RawRequirement::Equal(value) => Ok(self.normalize_equal(value)),
            RawRequirement::Set(members) => {
                let members = members
                    .iter()
                    .map(|m| self.normalize_atom(m, "set"))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Requirement::Set(members))
            }
            RawRequirement::Sequence(items) => {
                let items = items
                    .iter()
                    .map(|i| self.normalize_atom(i, "sequence"))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Requirement::Sequence(items))
            }
            RawRequirement::Groups(entries) => {
                if !allow_groups {
                    return Err(MalformedRequirement::Misplaced {
                        found: "groups",
                        container: "groups",
                    });
                }
                let entries = entries
                    .iter()
                    .map(|(key, value)| {
                        self.normalize_value(value, false)
                            .map(|normalized| (key.clone(), normalized))
                    })
                    .collect::<Result<BTreeMap<_, _>, _>>()?;
                Ok(Requirement::Mapping(entries))
            }
            atom => self.normalize_atom(atom, "").map(Requirement::Single),
        }
    }

    /// Normalizes an atom, failing for structural variants. `container`
    /// names the enclosing set or sequence for error messages; atoms at
    /// scalar position pass an empty container and cannot fail that way.
    fn normalize_atom(
        &self,
        raw: &RawRequirement,
        container: &'static str,
    ) -> Result<Matcher, MalformedRequirement> {
        match raw {
            RawRequirement::Predicate { name, test } => Ok(Matcher::Predicate {
                name: name.clone(),
                test: test.clone(),
            }),
            RawRequirement::Pattern(pattern) => Matcher::compile_pattern(pattern),
            RawRequirement::TypeIs(kind) => Ok(Matcher::TypeIs(*kind)),
            RawRequirement::Equal(value) => Ok(Matcher::Equal(value.clone())),
            structural => Err(MalformedRequirement::Misplaced {
                found: structural.shape_name(),
                container,
            }),
        }
    }

    /// Numeric equality becomes approximate when a positive default
    /// tolerance is configured; everything else stays literal.
    fn normalize_equal(&self, value: &Value) -> Requirement {
        if self.tolerance_default > 0.0 {
            if let Some(expected) = value.as_float() {
                if expected.is_finite() {
                    return Requirement::Approx {
                        expected,
                        tolerance: self.tolerance_default,
                    };
                }
            }
        }
        Requirement::Single(Matcher::Equal(value.clone()))
    }
}

fn check_tolerance(tolerance: f64) -> Result<(), MalformedRequirement> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(MalformedRequirement::BadTolerance { tolerance });
    }
    Ok(())
}

fn check_expected(expected: f64) -> Result<(), MalformedRequirement> {
    if !expected.is_finite() {
        return Err(MalformedRequirement::NonFiniteExpected { expected });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use requirements_core::ValueKind;

    #[test]
    fn test_atoms_normalize_to_single() {
        let normalizer = Normalizer::new();
        assert!(matches!(
            normalizer.normalize(&RawRequirement::equal(5)).unwrap(),
            Requirement::Single(Matcher::Equal(Value::Int(5)))
        ));
        assert!(matches!(
            normalizer
                .normalize(&RawRequirement::of_type(ValueKind::String))
                .unwrap(),
            Requirement::Single(Matcher::TypeIs(ValueKind::String))
        ));
    }

    #[test]
    fn test_set_members_become_matchers() {
        let raw = RawRequirement::set([
            RawRequirement::equal("a"),
            RawRequirement::pattern("[0-9]+"),
        ]);
        match Normalizer::new().normalize(&raw).unwrap() {
            Requirement::Set(members) => assert_eq!(members.len(), 2),
            other => panic!("expected set, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_tolerance_is_malformed() {
        let raw = RawRequirement::approx(10.0, -1.0);
        let err = Normalizer::new().normalize(&raw).unwrap_err();
        assert_eq!(
            err,
            MalformedRequirement::BadTolerance { tolerance: -1.0 }
        );
    }

    #[test]
    fn test_nan_tolerance_is_malformed() {
        let raw = RawRequirement::approx(10.0, f64::NAN);
        assert!(matches!(
            Normalizer::new().normalize(&raw).unwrap_err(),
            MalformedRequirement::BadTolerance { .. }
        ));
    }

    #[test]
    fn test_bad_pattern_in_group_fails_whole_normalization() {
        let raw = RawRequirement::groups([
            ("a", RawRequirement::pattern("[invalid(regex")),
            ("b", RawRequirement::equal(1)),
        ]);
        assert!(matches!(
            Normalizer::new().normalize(&raw).unwrap_err(),
            MalformedRequirement::BadPattern { .. }
        ));
    }

    #[test]
    fn test_nested_groups_are_malformed() {
        let raw = RawRequirement::groups([(
            "outer",
            RawRequirement::groups([("inner", RawRequirement::equal(1))]),
        )]);
        assert_eq!(
            Normalizer::new().normalize(&raw).unwrap_err(),
            MalformedRequirement::Misplaced {
                found: "groups",
                container: "groups"
            }
        );
    }

    #[test]
    fn test_approx_inside_set_is_malformed() {
        let raw = RawRequirement::set([RawRequirement::approx(10.0, 1.0)]);
        assert_eq!(
            Normalizer::new().normalize(&raw).unwrap_err(),
            MalformedRequirement::Misplaced {
                found: "approximate",
                container: "set"
            }
        );
    }

    #[test]
    fn test_default_tolerance_rewrites_numeric_equality() {
        let normalizer = Normalizer::new().with_tolerance_default(0.5);
        match normalizer.normalize(&RawRequirement::equal(10)).unwrap() {
            Requirement::Approx {
                expected,
                tolerance,
            } => {
                assert_eq!(expected, 10.0);
                assert_eq!(tolerance, 0.5);
            }
            other => panic!("expected approx, got {other:?}"),
        }

        // Non-numeric equality is untouched.
        assert!(matches!(
            normalizer.normalize(&RawRequirement::equal("x")).unwrap(),
            Requirement::Single(Matcher::Equal(Value::String(_)))
        ));
    }

    #[test]
    fn test_default_tolerance_leaves_set_members_exact() {
        let normalizer = Normalizer::new().with_tolerance_default(0.5);
        let raw = RawRequirement::set([RawRequirement::equal(10)]);
        match normalizer.normalize(&raw).unwrap() {
            Requirement::Set(members) => {
                assert!(matches!(members[0], Matcher::Equal(Value::Int(10))));
            }
            other => panic!("expected set, got {other:?}"),
        }
    }

    #[test]
    fn test_groups_values_may_be_structural() {
        let raw = RawRequirement::groups([
            ("x", RawRequirement::set([RawRequirement::equal(1)])),
            ("y", RawRequirement::sequence([RawRequirement::equal(2)])),
            ("z", RawRequirement::approx(3.0, 0.1)),
        ]);
        match Normalizer::new().normalize(&raw).unwrap() {
            Requirement::Mapping(entries) => {
                assert!(matches!(entries.get("x"), Some(Requirement::Set(_))));
                assert!(matches!(entries.get("y"), Some(Requirement::Sequence(_))));
                assert!(matches!(entries.get("z"), Some(Requirement::Approx { .. })));
            }
            other => panic!("expected mapping, got {other:?}"),
        }
    }
}
