//! Replacement detection between two property snapshots.
//!
//! No object kind supports in-place updates, so any changed field marks the
//! object for delete-then-recreate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::properties::{Properties, NAME, PROVIDER_REF, RESOURCE_NAME};

/// Fields left out of the general comparison pass.
const IGNORED_FIELDS: [&str; 3] = [NAME, RESOURCE_NAME, PROVIDER_REF];

/// Outcome of comparing the recorded and desired properties of an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    /// Whether any field changed.
    pub changed: bool,
    /// Fields whose change forces a replacement.
    pub replace_fields: Vec<String>,
    /// Always `true`: the old object is dropped before the new one is created.
    pub delete_before_replace: bool,
}

impl DiffResult {
    /// Builds a result from the fields that force a replacement.
    #[must_use]
    pub fn from_fields(replace_fields: Vec<String>) -> Self {
        Self {
            changed: !replace_fields.is_empty(),
            replace_fields,
            delete_before_replace: true,
        }
    }

    /// A result with no changes.
    #[must_use]
    pub fn unchanged() -> Self {
        Self::from_fields(Vec::new())
    }
}

/// Compares `old` and `new`, listing every field that differs.
///
/// `name`, `resource_name` and the host's provider reference are skipped in
/// the general pass. An explicit `name` in `new` that differs from `old` is
/// still reported, so a name recorded only in `old` never forces replacement.
#[must_use]
pub fn diff(old: &Properties, new: &Properties) -> DiffResult {
    let fields: BTreeSet<&str> = old
        .keys()
        .chain(new.keys())
        .filter(|field| !IGNORED_FIELDS.contains(field))
        .collect();

    let mut replace_fields: Vec<String> = fields
        .into_iter()
        .filter(|field| old.get(field) != new.get(field))
        .map(str::to_string)
        .collect();

    if new.contains(NAME) && old.get(NAME) != new.get(NAME) {
        replace_fields.push(NAME.to_string());
    }

    DiffResult::from_fields(replace_fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_no_change() {
        let props = Properties::new().with("comment", "a").with("database", "DB");
        let result = diff(&props, &props.clone());
        assert_eq!(result, DiffResult::unchanged());
        assert!(result.delete_before_replace);
    }

    #[test]
    fn test_changed_field() {
        let old = Properties::new().with("comment", "a");
        let new = Properties::new().with("comment", "b");
        let result = diff(&old, &new);
        assert!(result.changed);
        assert_eq!(result.replace_fields, ["comment"]);
        assert!(result.delete_before_replace);
    }

    #[test]
    fn test_added_and_removed_fields() {
        let old = Properties::new().with("url", "s3://a").with("comment", "c");
        let new = Properties::new().with("url", "s3://a").with("encryption", json!({"type": "SSE"}));
        let result = diff(&old, &new);
        assert_eq!(result.replace_fields, ["comment", "encryption"]);
    }

    #[test]
    fn test_null_equals_absent() {
        let old = Properties::new().with("comment", Value::Null);
        let new = Properties::new();
        assert!(!diff(&old, &new).changed);
    }

    #[test]
    fn test_structured_values_compare_deeply() {
        let old = Properties::new().with("copy_options", json!({"on_error": "CONTINUE"}));
        let new = Properties::new().with("copy_options", json!({"on_error": "ABORT_STATEMENT"}));
        assert_eq!(diff(&old, &new).replace_fields, ["copy_options"]);
    }

    #[test]
    fn test_name_change_forces_replacement() {
        let old = Properties::new().with("name", "X");
        let new = Properties::new().with("name", "Y");
        let result = diff(&old, &new);
        assert!(result.changed);
        assert_eq!(result.replace_fields, ["name"]);
    }

    #[test]
    fn test_name_reported_after_other_fields() {
        let old = Properties::new().with("name", "X").with("comment", "a");
        let new = Properties::new().with("name", "Y").with("comment", "b");
        assert_eq!(diff(&old, &new).replace_fields, ["comment", "name"]);
    }

    #[test]
    fn test_recorded_autogenerated_name_is_ignored() {
        let old = Properties::new()
            .with("name", "s1_a1B2c3D")
            .with("resource_name", "s1")
            .with("comment", "a");
        let new = Properties::new()
            .with("resource_name", "s1")
            .with("comment", "a");
        assert!(!diff(&old, &new).changed);
    }

    #[test]
    fn test_resource_name_and_provider_ignored() {
        let old = Properties::new()
            .with("resource_name", "a")
            .with("__provider", "urn:1");
        let new = Properties::new()
            .with("resource_name", "b")
            .with("__provider", "urn:2");
        assert!(!diff(&old, &new).changed);
    }

    #[test]
    fn test_symmetric_field_sets() {
        let a = Properties::new()
            .with("comment", "a")
            .with("url", "s3://x")
            .with("database", "DB");
        let b = Properties::new()
            .with("comment", "b")
            .with("schema", "PUB")
            .with("database", "DB");

        let forward: BTreeSet<String> = diff(&a, &b).replace_fields.into_iter().collect();
        let backward: BTreeSet<String> = diff(&b, &a).replace_fields.into_iter().collect();
        assert_eq!(forward, backward);
        assert!(diff(&b, &a).delete_before_replace);
    }
}
