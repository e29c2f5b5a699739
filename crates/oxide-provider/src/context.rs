//! Account-level defaults shared by every resource of a provider.

use serde::{Deserialize, Serialize};

/// Default database and schema used to complete a partially scoped resource.
///
/// Empty strings are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderContext {
    /// Default database.
    #[serde(default)]
    pub database: Option<String>,
    /// Default schema.
    #[serde(default)]
    pub schema: Option<String>,
}

impl ProviderContext {
    /// Creates a context with no defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default database.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Sets the default schema.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// The default database, if set and non-empty.
    #[must_use]
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref().filter(|s| !s.is_empty())
    }

    /// The default schema, if set and non-empty.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref().filter(|s| !s.is_empty())
    }
}
