//! `SCHEMA` resources.
//!
//! Schemas are the only kind scoped to a database alone, so their full name is
//! `database.name` and their outputs carry no `schema` key.

use serde_json::Value;

use oxide_provider::descriptor::{AttributeSpec, ResourceDescriptor};
use oxide_provider::error::Result;
use oxide_provider::identifier::{validate_identifier, ObjectKind};
use oxide_provider::names::NameResolver;
use oxide_provider::properties::{Properties, DATABASE, FULL_NAME, NAME};
use oxide_provider::render::render_statement;
use oxide_provider::statement::StatementGenerator;

const CREATE_TEMPLATE: &str = "\
CREATE{% if flags %} {{ flags }}{% endif %} SCHEMA {{ full_name }}
{%- if data_retention_time_in_days is defined %}
DATA_RETENTION_TIME_IN_DAYS = {{ data_retention_time_in_days | sql }}
{%- endif %}
{%- if comment is defined %}
COMMENT = {{ comment | sql }}
{%- endif %}";

/// Statement generator for schemas.
#[derive(Debug, Clone)]
pub struct SchemaGenerator {
    descriptor: ResourceDescriptor,
}

impl SchemaGenerator {
    /// Creates the schema generator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptor: ResourceDescriptor::new(ObjectKind::Schema)
                .attribute(AttributeSpec::optional(DATABASE))
                .flag("transient")
                .attribute(AttributeSpec::optional("data_retention_time_in_days"))
                .attribute(AttributeSpec::optional("comment")),
        }
    }
}

impl Default for SchemaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementGenerator for SchemaGenerator {
    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    fn render_create(&self, full_name: &str, inputs: &Properties) -> Result<String> {
        render_statement(
            CREATE_TEMPLATE,
            full_name,
            &self.descriptor.flag_keywords(inputs),
            inputs,
        )
    }

    fn full_name(&self, resolver: &NameResolver<'_>, inputs: &Properties, name: &str) -> Result<String> {
        validate_identifier(name)?;

        match resolver.scoping(inputs)?.database {
            Some(database) => {
                validate_identifier(&database)?;
                Ok(format!("{database}.{name}"))
            }
            None => Ok(name.to_string()),
        }
    }

    fn build_outputs(
        &self,
        resolver: &NameResolver<'_>,
        name: &str,
        inputs: &Properties,
    ) -> Result<Properties> {
        let mut outputs = self.descriptor.echo(inputs);
        outputs.insert(NAME, name);

        let database = resolver.scoping(inputs)?.database;
        outputs.insert(FULL_NAME, self.full_name(resolver, inputs, name)?);
        outputs.insert(DATABASE, database.map_or(Value::Null, Value::from));

        Ok(outputs)
    }
}
