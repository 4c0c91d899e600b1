//! Label selector matching
//!
//! Implements the `matchLabels` and `matchExpressions` semantics of a
//! Kubernetes `LabelSelector`. An empty selector matches everything.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, LabelSelectorRequirement};

/// Check `labels` against `selector`
///
/// Fails with a description of the first malformed requirement (unknown
/// operator, or values that do not fit the operator).
pub fn matches(selector: &LabelSelector, labels: &BTreeMap<String, String>) -> Result<bool, String> {
    let mut matched = true;

    for (key, value) in selector.match_labels.iter().flatten() {
        if labels.get(key) != Some(value) {
            matched = false;
        }
    }

    for requirement in selector.match_expressions.iter().flatten() {
        if !requirement_matches(requirement, labels)? {
            matched = false;
        }
    }

    Ok(matched)
}

fn requirement_matches(
    requirement: &LabelSelectorRequirement,
    labels: &BTreeMap<String, String>,
) -> Result<bool, String> {
    let values = requirement.values.as_deref().unwrap_or_default();
    let current = labels.get(&requirement.key);

    match requirement.operator.as_str() {
        "In" | "NotIn" if values.is_empty() => Err(format!(
            "{}: for 'in', 'notin' operators, values set can't be empty",
            requirement.key
        )),
        "Exists" | "DoesNotExist" if !values.is_empty() => Err(format!(
            "{}: values set must be empty for exists and does not exist",
            requirement.key
        )),
        "In" => Ok(current.is_some_and(|v| values.contains(v))),
        "NotIn" => Ok(current.map_or(true, |v| !values.contains(v))),
        "Exists" => Ok(current.is_some()),
        "DoesNotExist" => Ok(current.is_none()),
        other => Err(format!("{other:?} is not a valid label selector operator")),
    }
}
