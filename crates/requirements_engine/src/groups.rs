//! Group-wise comparison.
//!
//! When data and requirement are both organized by group key, each group is
//! compared independently and every resulting difference is tagged with its
//! key. A key present on only one side is not an error: it is data, reported
//! as missing or extra elements under that key.

use crate::differ::diff_flat;
use crate::{Observed, Requirement};
use requirements_core::{Difference, Expected, ShapeMismatch};
use std::collections::BTreeMap;

/// Compares grouped requirements against grouped data over the sorted
/// union of both key sets.
///
/// - key in both: the paired sub-requirement and sub-data are diffed;
/// - key only in the requirement: everything the sub-requirement implies
///   is missing;
/// - key only in the data: every element in the group is extra.
pub fn diff_groups(
    requirement: &BTreeMap<String, Requirement>,
    observed: &BTreeMap<String, Observed>,
) -> Result<Vec<(String, Difference)>, ShapeMismatch> {
    let mut keys: Vec<&String> = requirement.keys().chain(observed.keys()).collect();
    keys.sort();
    keys.dedup();

    let mut differences = Vec::new();
    for key in keys {
        match (requirement.get(key), observed.get(key)) {
            (Some(sub_requirement), Some(sub_observed)) => {
                for difference in diff_flat(sub_requirement, sub_observed)? {
                    differences.push((key.clone(), difference));
                }
            }
            (Some(sub_requirement), None) => {
                for expected in implied_elements(sub_requirement) {
                    differences.push((key.clone(), Difference::missing(expected)));
                }
            }
            (None, Some(sub_observed)) => {
                for element in sub_observed.flattened() {
                    differences.push((key.clone(), Difference::extra(element.clone())));
                }
            }
            (None, None) => continue,
        }
    }
    Ok(differences)
}

/// Applies one flat requirement uniformly to every group, tagging results
/// per key in ascending key order.
pub fn diff_each_group(
    requirement: &Requirement,
    observed: &BTreeMap<String, Observed>,
) -> Result<Vec<(String, Difference)>, ShapeMismatch> {
    let mut differences = Vec::new();
    for (key, sub_observed) in observed {
        for difference in diff_flat(requirement, sub_observed)? {
            differences.push((key.clone(), difference));
        }
    }
    Ok(differences)
}

/// Everything a requirement implies must be present, in declared order.
fn implied_elements(requirement: &Requirement) -> Vec<Expected> {
    match requirement {
        Requirement::Single(matcher) => vec![matcher.expected()],
        Requirement::Approx {
            expected,
            tolerance,
        } => vec![Expected::Approx {
            expected: *expected,
            tolerance: *tolerance,
        }],
        Requirement::Set(members) => members.iter().map(|m| m.expected()).collect(),
        Requirement::Sequence(items) => items.iter().map(|i| i.expected()).collect(),
        // The normalizer does not produce nested mappings; hand-built ones
        // flatten to the expectations of their values.
        Requirement::Mapping(entries) => {
            entries.values().flat_map(implied_elements).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Normalizer;
    use pretty_assertions::assert_eq;
    use requirements_core::{RawRequirement, Value};

    fn normalized_mapping(raw: RawRequirement) -> BTreeMap<String, Requirement> {
        match Normalizer::new().normalize(&raw).unwrap() {
            Requirement::Mapping(entries) => entries,
            other => panic!("expected mapping, got {other:?}"),
        }
    }

    #[test]
    fn test_group_partitioning() {
        let requirement = normalized_mapping(RawRequirement::groups([
            (
                "x",
                RawRequirement::set([RawRequirement::equal(1), RawRequirement::equal(2)]),
            ),
            ("y", RawRequirement::set([RawRequirement::equal(3)])),
        ]));
        let observed = BTreeMap::from([
            ("x".to_string(), Observed::collection([1, 2])),
            ("z".to_string(), Observed::collection([9])),
        ]);

        let differences = diff_groups(&requirement, &observed).unwrap();
        assert_eq!(
            differences,
            vec![
                ("y".to_string(), Difference::missing(Value::Int(3))),
                ("z".to_string(), Difference::extra(Value::Int(9))),
            ]
        );
    }

    #[test]
    fn test_keys_compared_in_ascending_order() {
        let requirement = normalized_mapping(RawRequirement::groups([
            ("b", RawRequirement::equal(1)),
            ("a", RawRequirement::equal(2)),
        ]));
        let observed = BTreeMap::from([
            ("b".to_string(), Observed::scalar(9)),
            ("a".to_string(), Observed::scalar(9)),
        ]);

        let differences = diff_groups(&requirement, &observed).unwrap();
        let keys: Vec<_> = differences.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_requirement_only_group_implies_all_missing() {
        let requirement = normalized_mapping(RawRequirement::groups([(
            "only",
            RawRequirement::sequence([RawRequirement::equal(1), RawRequirement::equal(2)]),
        )]));
        let observed = BTreeMap::new();

        let differences = diff_groups(&requirement, &observed).unwrap();
        assert_eq!(
            differences,
            vec![
                ("only".to_string(), Difference::missing(Value::Int(1))),
                ("only".to_string(), Difference::missing(Value::Int(2))),
            ]
        );
    }

    #[test]
    fn test_observed_only_group_is_all_extra() {
        let requirement = BTreeMap::new();
        let observed = BTreeMap::from([(
            "stray".to_string(),
            Observed::collection(["p", "q"]),
        )]);

        let differences = diff_groups(&requirement, &observed).unwrap();
        assert_eq!(
            differences,
            vec![
                (
                    "stray".to_string(),
                    Difference::extra(Value::String("p".into()))
                ),
                (
                    "stray".to_string(),
                    Difference::extra(Value::String("q".into()))
                ),
            ]
        );
    }

    #[test]
    fn test_shape_error_aborts_without_partial_result() {
        let requirement = normalized_mapping(RawRequirement::groups([
            ("a", RawRequirement::equal(1)),
            (
                "b",
                RawRequirement::sequence([RawRequirement::equal(2)]),
            ),
        ]));
        // Group "b" pairs a sequence requirement with scalar data.
        let observed = BTreeMap::from([
            ("a".to_string(), Observed::scalar(1)),
            ("b".to_string(), Observed::scalar(2)),
        ]);

        let err = diff_groups(&requirement, &observed).unwrap_err();
        assert_eq!(err, ShapeMismatch::new("sequence", "scalar"));
    }

    #[test]
    fn test_diff_each_group_applies_requirement_per_key() {
        let requirement = Normalizer::new()
            .normalize(&RawRequirement::set([
                RawRequirement::equal(1),
                RawRequirement::equal(2),
            ]))
            .unwrap();
        let observed = BTreeMap::from([
            ("m".to_string(), Observed::collection([1, 2])),
            ("n".to_string(), Observed::collection([1])),
        ]);

        let differences = diff_each_group(&requirement, &observed).unwrap();
        assert_eq!(
            differences,
            vec![("n".to_string(), Difference::missing(Value::Int(2)))]
        );
    }

    #[test]
    fn test_nested_observed_group_is_shape_mismatch() {
        let requirement = normalized_mapping(RawRequirement::groups([(
            "a",
            RawRequirement::set([RawRequirement::equal(1)]),
        )]));
        let observed = BTreeMap::from([(
            "a".to_string(),
            Observed::groups([("inner", Observed::collection([1]))]),
        )]);

        let err = diff_groups(&requirement, &observed).unwrap_err();
        assert_eq!(err, ShapeMismatch::new("set", "groups"));
    }
}
