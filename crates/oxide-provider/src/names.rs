//! Physical and fully-qualified name resolution.

use serde_json::Value;

use crate::context::ProviderContext;
use crate::error::{ProviderError, Result};
use crate::identifier::validate_identifier;
use crate::properties::{Properties, DATABASE, NAME, RESOURCE_NAME, SCHEMA};
use crate::suffix::{SuffixGenerator, SUFFIX_LENGTH};

/// Database/schema namespace an object lives in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    /// Database, from the inputs or the provider default.
    pub database: Option<String>,
    /// Schema, from the inputs or the provider default.
    pub schema: Option<String>,
}

impl Scope {
    /// Returns whether neither database nor schema is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.database.is_none() && self.schema.is_none()
    }
}

/// Joins scope components and a name into a fully-qualified name.
///
/// `database.schema.name` when both are present, `database..name` when only
/// the database is, and the bare name otherwise.
#[must_use]
pub fn compose_full_name(database: Option<&str>, schema: Option<&str>, name: &str) -> String {
    match (database, schema) {
        (Some(database), Some(schema)) => format!("{database}.{schema}.{name}"),
        (Some(database), None) => format!("{database}..{name}"),
        _ => name.to_string(),
    }
}

/// Resolves physical names, scoping and full names for one provider.
pub struct NameResolver<'a> {
    context: &'a ProviderContext,
    suffix: &'a dyn SuffixGenerator,
}

impl<'a> NameResolver<'a> {
    /// Creates a resolver over the provider defaults and a suffix source.
    #[must_use]
    pub fn new(context: &'a ProviderContext, suffix: &'a dyn SuffixGenerator) -> Self {
        Self { context, suffix }
    }

    /// The provider defaults.
    #[must_use]
    pub const fn context(&self) -> &ProviderContext {
        self.context
    }

    /// Returns the explicit name, or `<resource_name>_<suffix>` when absent.
    pub fn resolve_name(&self, inputs: &Properties) -> Result<String> {
        let name = match inputs.get(NAME) {
            Some(Value::String(name)) => name.clone(),
            Some(other) => return Err(ProviderError::InvalidIdentifier(other.to_string())),
            None => {
                let resource_name = match inputs.get(RESOURCE_NAME) {
                    Some(Value::String(resource_name)) => resource_name.as_str(),
                    Some(other) => {
                        return Err(ProviderError::InvalidIdentifier(other.to_string()))
                    }
                    None => return Err(ProviderError::MissingNameOrResourceName),
                };
                format!("{resource_name}_{}", self.suffix.generate(SUFFIX_LENGTH))
            }
        };

        validate_identifier(&name)?;
        Ok(name)
    }

    /// Resolves database and schema.
    ///
    /// Both stay unset unless the inputs name at least one of them; each then
    /// falls back to the provider default when not given explicitly. A
    /// database or schema that is not a string is rejected.
    pub fn scoping(&self, inputs: &Properties) -> Result<Scope> {
        let database = scope_component(inputs, DATABASE)?;
        let schema = scope_component(inputs, SCHEMA)?;

        if database.is_none() && schema.is_none() {
            return Ok(Scope::default());
        }

        Ok(Scope {
            database: database.or_else(|| self.context.database()).map(str::to_string),
            schema: schema.or_else(|| self.context.schema()).map(str::to_string),
        })
    }

    /// Returns the validated fully-qualified name of `name` within its scope.
    pub fn full_name(&self, inputs: &Properties, name: &str) -> Result<String> {
        validate_identifier(name)?;

        let scope = self.scoping(inputs)?;
        if let Some(database) = &scope.database {
            validate_identifier(database)?;
        }
        if let Some(schema) = &scope.schema {
            validate_identifier(schema)?;
        }

        Ok(compose_full_name(
            scope.database.as_deref(),
            scope.schema.as_deref(),
            name,
        ))
    }
}

fn scope_component<'p>(inputs: &'p Properties, key: &str) -> Result<Option<&'p str>> {
    match inputs.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str()).filter(|s| !s.is_empty())),
        Some(other) => Err(ProviderError::InvalidIdentifier(other.to_string())),
    }
}
