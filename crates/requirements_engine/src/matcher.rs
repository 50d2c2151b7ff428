//! Predicate matcher: uniform boolean-test wrapper around a requirement atom.
//!
//! Every atom a requirement can be built from (a literal, a regex pattern, a
//! type descriptor, a user predicate) is wrapped into one capability,
//! `matches(&Value) -> bool`, constructed once at normalization time. The
//! differ never re-derives matching behavior per comparison.

use regex::Regex;
use requirements_core::{Expected, MalformedRequirement, PredicateFn, Value, ValueKind};
use std::borrow::Cow;
use std::fmt;

/// A compiled requirement atom.
#[derive(Clone)]
pub enum Matcher {
    /// Literal equality. Null matches only null; NaN matches nothing.
    Equal(Value),
    /// Full match of the observed value's string form against a pattern.
    Pattern {
        /// Original pattern, for display
        pattern: String,
        /// Compiled, anchored regex
        regex: Regex,
    },
    /// Kind check.
    TypeIs(ValueKind),
    /// User-supplied boolean test.
    Predicate {
        /// Name used when reporting failures
        name: String,
        /// The test itself
        test: PredicateFn,
    },
}

impl Matcher {
    /// Compiles a pattern atom. The pattern is anchored so that only a full
    /// match of the string form succeeds, never a partial one.
    pub fn compile_pattern(pattern: &str) -> Result<Matcher, MalformedRequirement> {
        let anchored = format!(r"\A(?:{pattern})\z");
        let regex = Regex::new(&anchored).map_err(|e| MalformedRequirement::BadPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Matcher::Pattern {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Tests an observed value against this atom. Pure, never panics for
    /// well-formed values.
    pub fn matches(&self, observed: &Value) -> bool {
        match self {
            Matcher::Equal(expected) => value_eq(observed, expected),
            Matcher::Pattern { regex, .. } => match text_form(observed) {
                Some(text) => regex.is_match(&text),
                None => false,
            },
            Matcher::TypeIs(kind) => observed.kind() == *kind,
            Matcher::Predicate { test, .. } => test(observed),
        }
    }

    /// Describes what this atom expects, for use in differences.
    pub fn expected(&self) -> Expected {
        match self {
            Matcher::Equal(value) => Expected::Value {
                value: value.clone(),
            },
            Matcher::Pattern { pattern, .. } => Expected::Pattern {
                pattern: pattern.clone(),
            },
            Matcher::TypeIs(kind) => Expected::Kind { kind: *kind },
            Matcher::Predicate { name, .. } => Expected::Predicate { name: name.clone() },
        }
    }

    /// The expected literal, when this atom is one.
    pub fn literal(&self) -> Option<&Value> {
        match self {
            Matcher::Equal(value) => Some(value),
            _ => None,
        }
    }
}

/// Equality with numeric widening: an integer literal matches the same
/// number observed as a float, and vice versa. NaN compares equal to
/// nothing, itself included.
fn value_eq(observed: &Value, expected: &Value) -> bool {
    match (observed.as_float(), expected.as_float()) {
        (Some(a), Some(b)) => a == b,
        _ => observed == expected,
    }
}

/// The string form a pattern is matched against. Absence has no string
/// form, so null never matches a pattern.
fn text_form(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Int(i) => Some(Cow::Owned(i.to_string())),
        Value::Float(f) => Some(Cow::Owned(f.to_string())),
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Equal(v) => f.debug_tuple("Equal").field(v).finish(),
            Matcher::Pattern { pattern, .. } => f.debug_tuple("Pattern").field(pattern).finish(),
            Matcher::TypeIs(k) => f.debug_tuple("TypeIs").field(k).finish(),
            Matcher::Predicate { name, .. } => {
                f.debug_struct("Predicate").field("name", name).finish()
            }
        }
    }
}
