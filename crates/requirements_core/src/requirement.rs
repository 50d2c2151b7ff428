//! Declarative requirement tree, as supplied by callers.
//!
//! A `RawRequirement` describes what valid data must look like before any
//! normalization has happened: patterns are still strings, tolerances are
//! unchecked, and structural rules are not yet enforced. The engine crate
//! normalizes this tree into its compiled, immutable form.

use crate::{Value, ValueKind};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Boolean test applied to a single observed value.
///
/// Tests must be pure and must not panic for any well-formed `Value`.
pub type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A raw, caller-supplied requirement.
///
/// # Example
///
/// ```rust
/// use requirements_core::RawRequirement;
///
/// let requirement = RawRequirement::set([
///     RawRequirement::equal("active"),
///     RawRequirement::equal("inactive"),
/// ]);
/// ```
#[derive(Clone)]
pub enum RawRequirement {
    /// Observed element must equal the literal value.
    Equal(Value),
    /// Observed element's string form must fully match the pattern.
    Pattern(String),
    /// Observed element must be of the given kind.
    TypeIs(ValueKind),
    /// Observed element must satisfy a user-supplied test.
    Predicate {
        /// Name used when reporting failures of this predicate.
        name: String,
        /// The test itself.
        test: PredicateFn,
    },
    /// Observed element must be numeric and within `tolerance` of `expected`.
    Approx {
        /// Expected numeric value.
        expected: f64,
        /// Maximum allowed absolute deviation.
        tolerance: f64,
    },
    /// Unordered membership: each member must consume one observed element.
    Set(Vec<RawRequirement>),
    /// Order-sensitive, position-aligned comparison.
    Sequence(Vec<RawRequirement>),
    /// Group key to sub-requirement; keys partition the data.
    Groups(BTreeMap<String, RawRequirement>),
}

impl RawRequirement {
    /// Equality requirement for a literal value.
    pub fn equal(value: impl Into<Value>) -> Self {
        RawRequirement::Equal(value.into())
    }

    /// Full-match regex requirement.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        RawRequirement::Pattern(pattern.into())
    }

    /// Type-check requirement.
    pub fn of_type(kind: ValueKind) -> Self {
        RawRequirement::TypeIs(kind)
    }

    /// Requirement backed by an arbitrary boolean test.
    pub fn predicate<F>(name: impl Into<String>, test: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        RawRequirement::Predicate {
            name: name.into(),
            test: Arc::new(test),
        }
    }

    /// Numeric closeness requirement.
    pub fn approx(expected: f64, tolerance: f64) -> Self {
        RawRequirement::Approx {
            expected,
            tolerance,
        }
    }

    /// Unordered membership requirement over the given members.
    pub fn set(members: impl IntoIterator<Item = RawRequirement>) -> Self {
        RawRequirement::Set(members.into_iter().collect())
    }

    /// Order-sensitive requirement over the given items.
    pub fn sequence(items: impl IntoIterator<Item = RawRequirement>) -> Self {
        RawRequirement::Sequence(items.into_iter().collect())
    }

    /// Grouped requirement from `(key, sub-requirement)` pairs.
    pub fn groups<K>(entries: impl IntoIterator<Item = (K, RawRequirement)>) -> Self
    where
        K: Into<String>,
    {
        RawRequirement::Groups(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        )
    }

    /// Returns the shape name used in error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            RawRequirement::Equal(_) => "equality",
            RawRequirement::Pattern(_) => "pattern",
            RawRequirement::TypeIs(_) => "type",
            RawRequirement::Predicate { .. } => "predicate",
            RawRequirement::Approx { .. } => "approximate",
            RawRequirement::Set(_) => "set",
            RawRequirement::Sequence(_) => "sequence",
            RawRequirement::Groups(_) => "groups",
        }
    }
}

impl fmt::Debug for RawRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawRequirement::Equal(v) => f.debug_tuple("Equal").field(v).finish(),
            RawRequirement::Pattern(p) => f.debug_tuple("Pattern").field(p).finish(),
            RawRequirement::TypeIs(k) => f.debug_tuple("TypeIs").field(k).finish(),
            RawRequirement::Predicate { name, .. } => {
                f.debug_struct("Predicate").field("name", name).finish()
            }
            RawRequirement::Approx {
                expected,
                tolerance,
            } => f
                .debug_struct("Approx")
                .field("expected", expected)
                .field("tolerance", tolerance)
                .finish(),
            RawRequirement::Set(members) => f.debug_tuple("Set").field(members).finish(),
            RawRequirement::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            RawRequirement::Groups(entries) => f.debug_tuple("Groups").field(entries).finish(),
        }
    }
}

impl From<Value> for RawRequirement {
    fn from(value: Value) -> Self {
        RawRequirement::Equal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctor_helpers() {
        assert!(matches!(
            RawRequirement::equal(5),
            RawRequirement::Equal(Value::Int(5))
        ));
        assert!(matches!(
            RawRequirement::pattern("^a+$"),
            RawRequirement::Pattern(_)
        ));
        assert!(matches!(
            RawRequirement::of_type(ValueKind::String),
            RawRequirement::TypeIs(ValueKind::String)
        ));
    }

    #[test]
    fn test_predicate_is_callable() {
        let req = RawRequirement::predicate("is_even", |v| {
            v.as_int().is_some_and(|i| i % 2 == 0)
        });
        match req {
            RawRequirement::Predicate { name, test } => {
                assert_eq!(name, "is_even");
                assert!(test(&Value::Int(4)));
                assert!(!test(&Value::Int(3)));
                assert!(!test(&Value::String("4".into())));
            }
            other => panic!("expected predicate, got {other:?}"),
        }
    }

    #[test]
    fn test_groups_sorted_by_key() {
        let req = RawRequirement::groups([
            ("z", RawRequirement::equal(1)),
            ("a", RawRequirement::equal(2)),
        ]);
        match req {
            RawRequirement::Groups(entries) => {
                let keys: Vec<_> = entries.keys().cloned().collect();
                assert_eq!(keys, vec!["a".to_string(), "z".to_string()]);
            }
            other => panic!("expected groups, got {other:?}"),
        }
    }

    #[test]
    fn test_debug_omits_predicate_closure() {
        let req = RawRequirement::predicate("always", |_| true);
        let rendered = format!("{req:?}");
        assert!(rendered.contains("always"));
    }
}
