//! The core differencing algorithm.
//!
//! Given one requirement node and the corresponding slice of observed data,
//! computes the ordered sequence of differences. Incompatible shape pairs
//! are a `ShapeMismatch` error, never coerced into element comparisons, and
//! the full set of discrepancies is always computed in one pass.

use crate::groups::{diff_each_group, diff_groups};
use crate::{Matcher, Observed, Requirement};
use requirements_core::{
    Difference, Expected, GroupedDifference, ShapeMismatch, Value,
};
use std::collections::HashMap;

/// Computes all differences between a requirement and observed data.
///
/// Grouped comparisons tag each difference with its group key; flat
/// comparisons leave the tag empty. The output order is deterministic:
/// ascending group key for mappings, position for sequences, and
/// first-seen order (extras, then missings) for sets.
pub fn diff(
    requirement: &Requirement,
    observed: &Observed,
) -> Result<Vec<GroupedDifference>, ShapeMismatch> {
    match (requirement, observed) {
        (Requirement::Mapping(entries), Observed::Groups(groups)) => {
            Ok(tag(diff_groups(entries, groups)?))
        }
        (Requirement::Mapping(_), other) => {
            Err(ShapeMismatch::new("grouped", other.shape_name()))
        }
        // A flat requirement against grouped data applies to every group.
        (flat, Observed::Groups(groups)) => Ok(tag(diff_each_group(flat, groups)?)),
        (flat, observed) => Ok(diff_flat(flat, observed)?
            .into_iter()
            .map(GroupedDifference::ungrouped)
            .collect()),
    }
}

fn tag(pairs: Vec<(String, Difference)>) -> Vec<GroupedDifference> {
    pairs
        .into_iter()
        .map(|(group, difference)| GroupedDifference::in_group(group, difference))
        .collect()
}

/// Compares a non-grouped requirement against scalar or collection data.
pub(crate) fn diff_flat(
    requirement: &Requirement,
    observed: &Observed,
) -> Result<Vec<Difference>, ShapeMismatch> {
    match (requirement, observed) {
        (Requirement::Single(matcher), Observed::Scalar(value)) => {
            Ok(diff_single(matcher, value))
        }
        (
            Requirement::Approx {
                expected,
                tolerance,
            },
            Observed::Scalar(value),
        ) => Ok(diff_approx(*expected, *tolerance, value)),
        (Requirement::Set(members), Observed::Collection(elements)) => {
            Ok(diff_set(members, elements))
        }
        (Requirement::Sequence(items), Observed::Collection(elements)) => {
            Ok(diff_sequence(items, elements))
        }
        (requirement, observed) => Err(ShapeMismatch::new(
            requirement.shape_name(),
            observed.shape_name(),
        )),
    }
}

/// Zero or one difference: `Invalid` if the matcher rejects the value.
fn diff_single(matcher: &Matcher, value: &Value) -> Vec<Difference> {
    if matcher.matches(value) {
        Vec::new()
    } else {
        vec![Difference::invalid_against(value.clone(), matcher.expected())]
    }
}

/// Numeric closeness check. A deviation cannot be computed for NaN or
/// non-numeric values, so those are `Invalid` rather than `Deviation`.
fn diff_approx(expected: f64, tolerance: f64, value: &Value) -> Vec<Difference> {
    let approx = Expected::Approx {
        expected,
        tolerance,
    };
    match value.as_float() {
        Some(observed) if !observed.is_nan() => {
            let delta = observed - expected;
            if delta.abs() > tolerance {
                vec![Difference::deviation(value.clone(), expected, delta)]
            } else {
                Vec::new()
            }
        }
        _ => vec![Difference::invalid_against(value.clone(), approx)],
    }
}

/// Unordered membership: each member, in declared order, consumes the first
/// unconsumed observed element it matches. Leftover observed elements are
/// `Extra` (input order), leftover members are `Missing` (declared order).
///
/// Worst case O(members × elements), since predicate members are not
/// hashable. All-literal member lists take a hash-multiset fast path with
/// identical output.
fn diff_set(members: &[Matcher], elements: &[Value]) -> Vec<Difference> {
    if let Some(differences) = diff_set_hashed(members, elements) {
        return differences;
    }

    let mut member_consumed = vec![false; members.len()];
    let mut element_consumed = vec![false; elements.len()];

    for (mi, member) in members.iter().enumerate() {
        for (ei, element) in elements.iter().enumerate() {
            if !element_consumed[ei] && member.matches(element) {
                member_consumed[mi] = true;
                element_consumed[ei] = true;
                break;
            }
        }
    }

    let mut differences = Vec::new();
    for (ei, element) in elements.iter().enumerate() {
        if !element_consumed[ei] {
            differences.push(Difference::extra(element.clone()));
        }
    }
    for (mi, member) in members.iter().enumerate() {
        if !member_consumed[mi] {
            differences.push(Difference::missing(member.expected()));
        }
    }
    differences
}

/// Hashable stand-in for a literal value. Floats participate only when they
/// carry an exact integer, so widened numeric equality stays consistent
/// with the general path; NaN and fractional floats force the general path.
#[derive(PartialEq, Eq, Hash)]
enum LiteralKey<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Str(&'a str),
}

fn literal_key(value: &Value) -> Option<LiteralKey<'_>> {
    match value {
        Value::Null => Some(LiteralKey::Null),
        Value::Bool(b) => Some(LiteralKey::Bool(*b)),
        Value::Int(i) => Some(LiteralKey::Int(*i)),
        Value::Float(f)
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 =>
        {
            Some(LiteralKey::Int(*f as i64))
        }
        Value::Float(_) => None,
        Value::String(s) => Some(LiteralKey::Str(s)),
    }
}

/// Fast path for sets whose members are all hashable literals. Returns
/// `None` when any member or element is not hashable.
fn diff_set_hashed(members: &[Matcher], elements: &[Value]) -> Option<Vec<Difference>> {
    let member_keys: Vec<LiteralKey<'_>> = members
        .iter()
        .map(|m| m.literal().and_then(literal_key))
        .collect::<Option<_>>()?;
    let element_keys: Vec<LiteralKey<'_>> = elements
        .iter()
        .map(literal_key)
        .collect::<Option<_>>()?;

    let mut totals: HashMap<&LiteralKey<'_>, usize> = HashMap::new();
    for key in &member_keys {
        *totals.entry(key).or_insert(0) += 1;
    }

    let mut remaining = totals.clone();
    let mut differences = Vec::new();
    for (element, key) in elements.iter().zip(&element_keys) {
        match remaining.get_mut(key) {
            Some(count) if *count > 0 => *count -= 1,
            _ => differences.push(Difference::extra(element.clone())),
        }
    }

    // Consumption is attributed to the earliest members of each key, the
    // same order the general member-major scan would assign it.
    let mut consumed: HashMap<&LiteralKey<'_>, usize> = HashMap::new();
    for (key, total) in &totals {
        let left = remaining.get(*key).copied().unwrap_or(0);
        consumed.insert(*key, *total - left);
    }
    for (member, key) in members.iter().zip(&member_keys) {
        match consumed.get_mut(key) {
            Some(count) if *count > 0 => *count -= 1,
            _ => differences.push(Difference::missing(member.expected())),
        }
    }
    Some(differences)
}

/// Position-aligned comparison. Strictly positional: no reordering or
/// alignment search. Mismatches up to the shorter length are `Invalid`;
/// the longer side's tail is `Missing` or `Extra` per position.
fn diff_sequence(items: &[Matcher], elements: &[Value]) -> Vec<Difference> {
    let mut differences = Vec::new();
    let aligned = items.len().min(elements.len());

    for (item, element) in items.iter().zip(elements.iter()).take(aligned) {
        if !item.matches(element) {
            differences.push(Difference::invalid_against(
                element.clone(),
                item.expected(),
            ));
        }
    }
    for item in &items[aligned..] {
        differences.push(Difference::missing(item.expected()));
    }
    for element in &elements[aligned..] {
        differences.push(Difference::extra(element.clone()));
    }
    differences
}
