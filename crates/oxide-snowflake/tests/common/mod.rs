#![allow(dead_code)]

use std::sync::Arc;

use oxide_provider::prelude::*;
use oxide_snowflake::ResourceKind;

pub type DryRunProvider = ResourceProvider<Box<dyn StatementGenerator>, DryRunExecutor>;

/// Builds a dry-run provider for `kind` with a fixed name suffix.
pub fn provider(kind: ResourceKind, context: ProviderContext) -> DryRunProvider {
    ResourceProvider::new(kind.generator(), DryRunExecutor::new(), Arc::new(context))
        .with_suffix_generator(SequenceSuffix::new(["Xy7Qa2B"]))
}

/// Builds a dry-run provider for `kind` with random name suffixes.
pub fn random_provider(kind: ResourceKind, context: ProviderContext) -> DryRunProvider {
    ResourceProvider::new(kind.generator(), DryRunExecutor::new(), Arc::new(context))
}

pub fn props(value: serde_json::Value) -> Properties {
    Properties::try_from(value).unwrap_or_else(|e| panic!("Not a JSON object: {e}"))
}

/// Asserts that `name` is `prefix` followed by `_` and a 7 character
/// alphanumeric suffix.
pub fn assert_suffixed(name: &str, prefix: &str) {
    let suffix = name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or_else(|| panic!("Expected {prefix}_<suffix>, got {name}"));
    assert_eq!(suffix.len(), SUFFIX_LENGTH, "Bad suffix in {name}");
    assert!(
        suffix.chars().all(|c| c.is_ascii_alphanumeric()),
        "Bad suffix in {name}"
    );
}
