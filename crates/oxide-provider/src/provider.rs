//! Resource lifecycle: create, diff and delete.
//!
//! A [`ResourceProvider`] is the only entry point the orchestration host
//! calls. It validates inputs, resolves names, asks its
//! [`StatementGenerator`] for statement text and hands that text to its
//! [`SqlExecutor`]. Validation always completes before anything is executed;
//! failed executions are neither retried nor compensated.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::context::ProviderContext;
use crate::diff::{diff, DiffResult};
use crate::error::{ProviderError, Result};
use crate::executor::SqlExecutor;
use crate::identifier::validate_identifier;
use crate::names::NameResolver;
use crate::properties::{Properties, NAME, RESOURCE_NAME};
use crate::statement::StatementGenerator;
use crate::suffix::{RandomSuffix, SuffixGenerator};

/// Result of a successful create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateResult {
    /// Physical name of the created object; the host's identity key.
    pub id: String,
    /// Properties the host records for later diff and delete calls.
    pub outputs: Properties,
}

/// Manages objects of one kind.
pub struct ResourceProvider<G, E> {
    generator: G,
    executor: E,
    context: Arc<ProviderContext>,
    suffix: Box<dyn SuffixGenerator>,
}

impl<G, E> fmt::Debug for ResourceProvider<G, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceProvider")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl<G: StatementGenerator, E: SqlExecutor> ResourceProvider<G, E> {
    /// Creates a provider with random name suffixes.
    pub fn new(generator: G, executor: E, context: Arc<ProviderContext>) -> Self {
        Self {
            generator,
            executor,
            context,
            suffix: Box::new(RandomSuffix),
        }
    }

    /// Replaces the suffix generator used for autogenerated names.
    #[must_use]
    pub fn with_suffix_generator(mut self, suffix: impl SuffixGenerator + 'static) -> Self {
        self.suffix = Box::new(suffix);
        self
    }

    /// Returns the statement generator.
    #[must_use]
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    /// Returns the executor.
    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Returns the provider defaults.
    #[must_use]
    pub fn context(&self) -> &ProviderContext {
        &self.context
    }

    fn resolver(&self) -> NameResolver<'_> {
        NameResolver::new(&self.context, self.suffix.as_ref())
    }

    /// Validates `inputs` without touching the remote system.
    pub fn check(&self, inputs: &Properties) -> Result<()> {
        if !inputs.contains(NAME) && !inputs.contains(RESOURCE_NAME) {
            return Err(ProviderError::MissingNameOrResourceName);
        }

        let descriptor = self.generator.descriptor();
        descriptor.check_inputs(inputs)?;

        match descriptor.missing_required(inputs) {
            Some(field) => Err(ProviderError::MissingRequiredAttribute(field.to_string())),
            None => Ok(()),
        }
    }

    /// Creates the object described by `inputs`.
    pub async fn create(&self, inputs: &Properties) -> Result<CreateResult> {
        self.check(inputs)?;

        let kind = self.generator.descriptor().kind();
        let resolver = self.resolver();
        let name = resolver.resolve_name(inputs)?;
        let full_name = self.generator.full_name(&resolver, inputs, &name)?;
        let sql = self.generator.render_create(&full_name, inputs)?;
        let outputs = self.generator.build_outputs(&resolver, &name, inputs)?;

        info!(kind = %kind, name = %full_name, "Creating object");
        self.executor.execute(&sql).await?;
        info!(kind = %kind, name = %full_name, "Object created");

        Ok(CreateResult { id: name, outputs })
    }

    /// Compares the recorded properties with the desired ones.
    ///
    /// Never contacts the remote system.
    #[must_use]
    pub fn diff(&self, id: &str, old: &Properties, new: &Properties) -> DiffResult {
        let result = diff(old, new);
        debug!(
            id = %id,
            changed = result.changed,
            replace_fields = ?result.replace_fields,
            "Computed diff"
        );
        result
    }

    /// Drops the object identified by `id`.
    pub async fn delete(&self, id: &str, props: &Properties) -> Result<()> {
        let name = validate_identifier(id)?;

        let kind = self.generator.descriptor().kind();
        let full_name = self.generator.full_name(&self.resolver(), props, name)?;
        let sql = self.generator.render_drop(&full_name, props)?;

        info!(kind = %kind, name = %full_name, "Dropping object");
        self.executor.execute(&sql).await?;
        info!(kind = %kind, name = %full_name, "Object dropped");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{AttributeSpec, ResourceDescriptor};
    use crate::executor::DryRunExecutor;
    use crate::identifier::ObjectKind;
    use crate::render::render_statement;
    use crate::suffix::SequenceSuffix;
    use serde_json::{json, Value};

    struct TableGenerator {
        descriptor: ResourceDescriptor,
    }

    impl TableGenerator {
        fn new() -> Self {
            Self {
                descriptor: ResourceDescriptor::new(ObjectKind::Table)
                    .attribute(AttributeSpec::optional("database"))
                    .attribute(AttributeSpec::optional("schema"))
                    .flag("transient")
                    .attribute(AttributeSpec::required("columns"))
                    .attribute(AttributeSpec::optional("comment")),
            }
        }
    }

    impl StatementGenerator for TableGenerator {
        fn descriptor(&self) -> &ResourceDescriptor {
            &self.descriptor
        }

        fn render_create(&self, full_name: &str, inputs: &Properties) -> Result<String> {
            render_statement(
                "CREATE{% if flags %} {{ flags }}{% endif %} TABLE {{ full_name }} {{ columns }}\
                 {% if comment is defined %} COMMENT = {{ comment | sql }}{% endif %}",
                full_name,
                &self.descriptor.flag_keywords(inputs),
                inputs,
            )
        }
    }

    /// Executor that rejects every statement.
    struct FailingExecutor;

    impl SqlExecutor for FailingExecutor {
        async fn execute(&self, _statement: &str) -> Result<()> {
            Err(ProviderError::Execution(sqlx::Error::Protocol(
                "connection reset".to_string(),
            )))
        }
    }

    fn provider(context: ProviderContext) -> ResourceProvider<TableGenerator, DryRunExecutor> {
        ResourceProvider::new(TableGenerator::new(), DryRunExecutor::new(), Arc::new(context))
            .with_suffix_generator(SequenceSuffix::new(["Ab3dE9z"]))
    }

    #[tokio::test]
    async fn test_create_with_explicit_name() {
        let provider = provider(ProviderContext::new());
        let inputs = Properties::new()
            .with("name", "EVENTS")
            .with("columns", "(id INT)")
            .with("comment", "raw events");

        let result = provider.create(&inputs).await.unwrap();

        assert_eq!(result.id, "EVENTS");
        assert_eq!(
            provider.executor().statements(),
            ["CREATE TABLE EVENTS (id INT) COMMENT = 'raw events'"]
        );
        assert_eq!(result.outputs.get("full_name"), Some(&json!("EVENTS")));
        assert_eq!(result.outputs.get("comment"), Some(&json!("raw events")));
    }

    #[tokio::test]
    async fn test_create_autogenerates_scoped_name() {
        let provider = provider(ProviderContext::new().with_schema("PUBLIC"));
        let inputs = Properties::new()
            .with("resource_name", "events")
            .with("database", "DB1")
            .with("transient", true)
            .with("columns", "(id INT)");

        let result = provider.create(&inputs).await.unwrap();

        assert_eq!(result.id, "events_Ab3dE9z");
        assert_eq!(
            provider.executor().statements(),
            ["CREATE TRANSIENT TABLE DB1.PUBLIC.events_Ab3dE9z (id INT)"]
        );

        let outputs = &result.outputs;
        assert_eq!(outputs.get("name"), Some(&json!("events_Ab3dE9z")));
        assert_eq!(outputs.get("database"), Some(&json!("DB1")));
        assert_eq!(outputs.get("schema"), Some(&json!("PUBLIC")));
        assert_eq!(outputs.get("full_name"), Some(&json!("DB1.PUBLIC.events_Ab3dE9z")));
        assert_eq!(outputs.get("transient"), Some(&json!(true)));
        assert!(outputs.get("comment").is_none());
        assert!(outputs.keys().any(|k| k == "comment"));
    }

    #[tokio::test]
    async fn test_create_without_any_name_executes_nothing() {
        let provider = provider(ProviderContext::new());
        let inputs = Properties::new().with("columns", "(id INT)");

        let result = provider.create(&inputs).await;

        assert!(matches!(result, Err(ProviderError::MissingNameOrResourceName)));
        assert!(provider.executor().statements().is_empty());
    }

    #[tokio::test]
    async fn test_create_missing_required_attribute() {
        let provider = provider(ProviderContext::new());
        let inputs = Properties::new()
            .with("resource_name", "t")
            .with("columns", Value::Null);

        let result = provider.create(&inputs).await;

        assert!(matches!(
            result,
            Err(ProviderError::MissingRequiredAttribute(ref field)) if field == "columns"
        ));
        assert!(provider.executor().statements().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_attribute() {
        let provider = provider(ProviderContext::new());
        let inputs = Properties::new()
            .with("resource_name", "t")
            .with("columns", "(id INT)")
            .with("cluster_by", "id");

        assert!(matches!(
            provider.create(&inputs).await,
            Err(ProviderError::UnknownAttribute(ref key)) if key == "cluster_by"
        ));
        assert!(provider.executor().statements().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_scope() {
        let provider = provider(ProviderContext::new());
        let inputs = Properties::new()
            .with("name", "T")
            .with("database", "DB-1")
            .with("columns", "(id INT)");

        assert!(matches!(
            provider.create(&inputs).await,
            Err(ProviderError::InvalidIdentifier(ref v)) if v == "DB-1"
        ));
        assert!(provider.executor().statements().is_empty());
    }

    #[tokio::test]
    async fn test_create_surfaces_execution_error() {
        let provider = ResourceProvider::new(
            TableGenerator::new(),
            FailingExecutor,
            Arc::new(ProviderContext::new()),
        );
        let inputs = Properties::new().with("name", "T").with("columns", "(id INT)");

        assert!(matches!(
            provider.create(&inputs).await,
            Err(ProviderError::Execution(_))
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let provider = provider(ProviderContext::new());
        let props = Properties::new()
            .with("database", "DB1")
            .with("schema", "PUB")
            .with("full_name", "DB1.PUB.EVENTS");

        provider.delete("EVENTS", &props).await.unwrap();

        assert_eq!(provider.executor().statements(), ["DROP TABLE DB1.PUB.EVENTS"]);
    }

    #[tokio::test]
    async fn test_delete_invalid_id_executes_nothing() {
        let provider = provider(ProviderContext::new());

        assert!(matches!(
            provider.delete("EVENTS; DROP DATABASE X", &Properties::new()).await,
            Err(ProviderError::InvalidIdentifier(_))
        ));
        assert!(provider.executor().statements().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_delete_round_trip() {
        let provider = provider(ProviderContext::new());
        let inputs = Properties::new()
            .with("resource_name", "t")
            .with("database", "DB1")
            .with("columns", "(id INT)");

        let created = provider.create(&inputs).await.unwrap();
        provider.delete(&created.id, &created.outputs).await.unwrap();

        assert_eq!(
            provider.executor().statements().last().map(String::as_str),
            Some("DROP TABLE DB1..t_Ab3dE9z")
        );
    }

    #[test]
    fn test_diff_delegates() {
        let provider = provider(ProviderContext::new());
        let old = Properties::new().with("comment", "a");
        let new = Properties::new().with("comment", "b");

        let result = provider.diff("T", &old, &new);

        assert!(result.changed);
        assert_eq!(result.replace_fields, ["comment"]);
        assert!(result.delete_before_replace);
        assert!(provider.executor().statements().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_creates() {
        let provider = ResourceProvider::new(
            TableGenerator::new(),
            DryRunExecutor::new(),
            Arc::new(ProviderContext::new()),
        );
        let a = Properties::new().with("resource_name", "a").with("columns", "(x INT)");
        let b = Properties::new().with("resource_name", "b").with("columns", "(y INT)");

        let (ra, rb) = tokio::join!(provider.create(&a), provider.create(&b));

        assert!(ra.unwrap().id.starts_with("a_"));
        assert!(rb.unwrap().id.starts_with("b_"));
        assert_eq!(provider.executor().statements().len(), 2);
    }
}
