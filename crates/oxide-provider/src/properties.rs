//! Property bags exchanged with the orchestration host.
//!
//! Inputs and outputs are both [`Properties`]. A `null` value is treated the
//! same as a missing key by every lookup.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Desired physical name.
pub const NAME: &str = "name";
/// Logical name supplied by the host, used to autogenerate a physical name.
pub const RESOURCE_NAME: &str = "resource_name";
/// Fully-qualified name, computed on create.
pub const FULL_NAME: &str = "full_name";
/// Database scoping.
pub const DATABASE: &str = "database";
/// Schema scoping.
pub const SCHEMA: &str = "schema";
/// Provider reference injected by the host; never compared or echoed.
pub const PROVIDER_REF: &str = "__provider";

/// Keys every resource kind accepts in addition to its attributes.
pub const RESERVED_KEYS: [&str; 3] = [NAME, RESOURCE_NAME, PROVIDER_REF];

/// Ordered string-keyed map of JSON values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, Value>);

impl Properties {
    /// Creates an empty property bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`, treating `null` as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Returns the value for `key` if it is a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Returns whether `key` holds a non-null value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Sets `key` to `value`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Iterates over all keys, including those holding `null`.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over entries holding a non-null value.
    pub fn present(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keys, including those holding `null`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copies every entry of `other` into `self`, overwriting existing keys.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Properties {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl IntoIterator for Properties {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<serde_json::Map<String, Value>> for Properties {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl TryFrom<Value> for Properties {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_is_absent() {
        let props = Properties::new()
            .with("comment", Value::Null)
            .with("database", "DB1");

        assert!(props.get("comment").is_none());
        assert!(!props.contains("comment"));
        assert!(props.contains("database"));
        assert_eq!(props.len(), 2);
        assert_eq!(props.present().count(), 1);
    }

    #[test]
    fn test_get_str_ignores_non_strings() {
        let props = Properties::new().with("retention", 3).with("url", "s3://b");
        assert_eq!(props.get_str("url"), Some("s3://b"));
        assert_eq!(props.get_str("retention"), None);
        assert_eq!(props.get("retention"), Some(&json!(3)));
    }

    #[test]
    fn test_from_json_object() {
        let props = Properties::try_from(json!({"b": 1, "a": {"x": true}})).unwrap();
        let keys: Vec<&str> = props.keys().collect();
        assert_eq!(keys, ["a", "b"]);

        assert!(Properties::try_from(json!([1, 2])).is_err());
    }

    #[test]
    fn test_merge_overwrites() {
        let mut props = Properties::new().with("a", 1).with("b", 2);
        props.merge(Properties::new().with("b", 3));
        assert_eq!(props.get("b"), Some(&json!(3)));
        assert_eq!(props.get("a"), Some(&json!(1)));
    }
}
