//! Provider configuration.
//!
//! Read once, from command-line flags or the environment, before any
//! provider is built.

use clap::Args;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use oxide_provider::context::ProviderContext;
use oxide_provider::executor::SqlxExecutor;
use oxide_provider::identifier::is_valid_identifier;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No connection URL was configured.
    #[error("no database URL configured (set --database-url or DATABASE_URL)")]
    MissingDatabaseUrl,

    /// A default database or schema is not a valid identifier.
    #[error("invalid default {field}: '{value}'")]
    InvalidDefault {
        /// `database` or `schema`.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Connection settings and account-level defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Connection URL, credentials included.
    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    #[serde(default)]
    pub database_url: Option<String>,

    /// Database used when a resource names only its schema.
    #[arg(long, global = true, env = "SNOWFLAKE_DATABASE")]
    #[serde(default)]
    pub default_database: Option<String>,

    /// Schema used when a resource names only its database.
    #[arg(long, global = true, env = "SNOWFLAKE_SCHEMA")]
    #[serde(default)]
    pub default_schema: Option<String>,
}

impl ProviderConfig {
    /// Checks that the configured defaults are usable identifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let defaults = [
            ("database", &self.default_database),
            ("schema", &self.default_schema),
        ];
        for (field, value) in defaults {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                if !is_valid_identifier(value) {
                    return Err(ConfigError::InvalidDefault {
                        field,
                        value: value.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Builds the provider defaults.
    #[must_use]
    pub fn context(&self) -> ProviderContext {
        ProviderContext {
            database: self.default_database.clone(),
            schema: self.default_schema.clone(),
        }
    }

    /// Builds an executor for the configured URL.
    pub fn executor(&self) -> Result<SqlxExecutor, ConfigError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(SqlxExecutor::new)
            .ok_or(ConfigError::MissingDatabaseUrl)
    }
}
