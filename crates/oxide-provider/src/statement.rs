//! Per-kind statement generation.
//!
//! A [`StatementGenerator`] knows how to render CREATE and DROP statements for
//! one object kind. The scoping and output rules have default
//! implementations that kinds with a different namespace can override.

use serde_json::Value;

use crate::descriptor::ResourceDescriptor;
use crate::error::Result;
use crate::names::NameResolver;
use crate::properties::{Properties, DATABASE, FULL_NAME, NAME, SCHEMA};

/// Trait for kind-specific statement text and naming rules.
pub trait StatementGenerator: Send + Sync {
    /// Returns the descriptor of the kind this generator handles.
    fn descriptor(&self) -> &ResourceDescriptor;

    /// Generates the CREATE statement for an object named `full_name`.
    fn render_create(&self, full_name: &str, inputs: &Properties) -> Result<String>;

    /// Generates the DROP statement for an object named `full_name`.
    fn render_drop(&self, full_name: &str, _props: &Properties) -> Result<String> {
        Ok(format!("DROP {} {}", self.descriptor().kind().sql_name(), full_name))
    }

    /// Returns the fully-qualified name of `name`.
    fn full_name(&self, resolver: &NameResolver<'_>, inputs: &Properties, name: &str) -> Result<String> {
        resolver.full_name(inputs, name)
    }

    /// Builds the properties returned to the host after a create.
    ///
    /// Every attribute is echoed, then `name` is added, then the resolved
    /// `database`, `schema` and `full_name`. Without any scoping only
    /// `full_name` (equal to `name`) is added.
    fn build_outputs(
        &self,
        resolver: &NameResolver<'_>,
        name: &str,
        inputs: &Properties,
    ) -> Result<Properties> {
        let mut outputs = self.descriptor().echo(inputs);
        outputs.insert(NAME, name);

        let scope = resolver.scoping(inputs)?;
        if scope.is_empty() {
            outputs.insert(FULL_NAME, name);
        } else {
            let full_name = self.full_name(resolver, inputs, name)?;
            outputs.insert(DATABASE, scope.database.map_or(Value::Null, Value::from));
            outputs.insert(SCHEMA, scope.schema.map_or(Value::Null, Value::from));
            outputs.insert(FULL_NAME, full_name);
        }

        Ok(outputs)
    }
}

impl StatementGenerator for Box<dyn StatementGenerator> {
    fn descriptor(&self) -> &ResourceDescriptor {
        (**self).descriptor()
    }

    fn render_create(&self, full_name: &str, inputs: &Properties) -> Result<String> {
        (**self).render_create(full_name, inputs)
    }

    fn render_drop(&self, full_name: &str, props: &Properties) -> Result<String> {
        (**self).render_drop(full_name, props)
    }

    fn full_name(&self, resolver: &NameResolver<'_>, inputs: &Properties, name: &str) -> Result<String> {
        (**self).full_name(resolver, inputs, name)
    }

    fn build_outputs(
        &self,
        resolver: &NameResolver<'_>,
        name: &str,
        inputs: &Properties,
    ) -> Result<Properties> {
        (**self).build_outputs(resolver, name, inputs)
    }
}
