//! Declarative lifecycle engine for SQL-addressable objects.
//!
//! `oxide-provider` is the backend an infrastructure-orchestration host calls
//! to create, diff and delete remote objects such as schemas, stages and file
//! formats. The host owns state and dependency ordering; this crate turns a
//! desired set of attributes into DDL and runs it.
//!
//! # Architecture
//!
//! - **Identifier** - unquoted identifier and object-kind validation
//! - **Suffix** - random suffixes for autogenerated physical names
//! - **Descriptor** - the attributes each resource kind recognises
//! - **Names** - physical name, scoping and full-name resolution
//! - **Diff** - replacement detection between two property snapshots
//! - **Statement** - the per-kind [`StatementGenerator`](statement::StatementGenerator) trait
//! - **Render** - Jinja-style statement templates with SQL filters
//! - **Executor** - one connection per statement, or a dry run
//! - **Provider** - the create/diff/delete lifecycle
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use oxide_provider::prelude::*;
//!
//! struct SequenceGenerator(ResourceDescriptor);
//!
//! impl StatementGenerator for SequenceGenerator {
//!     fn descriptor(&self) -> &ResourceDescriptor {
//!         &self.0
//!     }
//!
//!     fn render_create(&self, full_name: &str, inputs: &Properties) -> Result<String> {
//!         render_statement("CREATE SEQUENCE {{ full_name }}", full_name, "", inputs)
//!     }
//! }
//!
//! let generator = SequenceGenerator(ResourceDescriptor::new(ObjectKind::Sequence));
//! let provider = ResourceProvider::new(
//!     generator,
//!     SqlxExecutor::new("postgres://localhost/app"),
//!     Arc::new(ProviderContext::new()),
//! );
//!
//! let created = provider
//!     .create(&Properties::new().with("resource_name", "order_ids"))
//!     .await?;
//! provider.delete(&created.id, &created.outputs).await?;
//! ```

pub mod context;
pub mod descriptor;
pub mod diff;
pub mod error;
pub mod executor;
pub mod identifier;
pub mod names;
pub mod properties;
pub mod provider;
pub mod render;
pub mod statement;
pub mod suffix;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::context::ProviderContext;
    pub use crate::descriptor::{AttributeSpec, ResourceDescriptor};
    pub use crate::diff::{diff, DiffResult};
    pub use crate::error::{ProviderError, Result};
    pub use crate::executor::{DryRunExecutor, SqlExecutor, SqlxExecutor};
    pub use crate::identifier::{validate_identifier, validate_object_kind, ObjectKind};
    pub use crate::names::{compose_full_name, NameResolver, Scope};
    pub use crate::properties::Properties;
    pub use crate::provider::{CreateResult, ResourceProvider};
    pub use crate::render::{render_statement, sql_literal};
    pub use crate::statement::StatementGenerator;
    pub use crate::suffix::{RandomSuffix, SequenceSuffix, SuffixGenerator, SUFFIX_LENGTH};
}
