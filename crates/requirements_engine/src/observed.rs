//! Observed data shapes at the loader boundary.
//!
//! The engine consumes exactly three abstract shapes: a scalar, an ordered
//! collection of scalars, and a mapping from group key to scalar or
//! collection. Format-specific loaders (CSV, Excel, data frames) are
//! responsible for materializing one of these; the engine never touches a
//! file handle.

use requirements_core::Value;
use std::collections::BTreeMap;

/// Observed data, materialized in memory by a loader.
#[derive(Debug, Clone, PartialEq)]
pub enum Observed {
    /// A single element
    Scalar(Value),
    /// An ordered collection of elements
    Collection(Vec<Value>),
    /// Data partitioned by group key; group values are scalar or collection
    Groups(BTreeMap<String, Observed>),
}

impl Observed {
    /// Creates a scalar observation.
    pub fn scalar(value: impl Into<Value>) -> Self {
        Observed::Scalar(value.into())
    }

    /// Creates an ordered collection observation.
    pub fn collection<V>(values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<Value>,
    {
        Observed::Collection(values.into_iter().map(Into::into).collect())
    }

    /// Creates a grouped observation from `(key, data)` pairs.
    pub fn groups<K>(entries: impl IntoIterator<Item = (K, Observed)>) -> Self
    where
        K: Into<String>,
    {
        Observed::Groups(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        )
    }

    /// Returns the shape name used in error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Observed::Scalar(_) => "scalar",
            Observed::Collection(_) => "collection",
            Observed::Groups(_) => "groups",
        }
    }

    /// All elements of this observation in deterministic order: input order
    /// for collections, ascending key order for groups. Used when an entire
    /// group is unsanctioned and every element it holds is extra.
    pub(crate) fn flattened(&self) -> Vec<&Value> {
        match self {
            Observed::Scalar(value) => vec![value],
            Observed::Collection(values) => values.iter().collect(),
            Observed::Groups(entries) => {
                entries.values().flat_map(|o| o.flattened()).collect()
            }
        }
    }
}

impl From<Value> for Observed {
    fn from(value: Value) -> Self {
        Observed::Scalar(value)
    }
}

impl From<Vec<Value>> for Observed {
    fn from(values: Vec<Value>) -> Self {
        Observed::Collection(values)
    }
}
