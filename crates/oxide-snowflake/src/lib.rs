//! # oxide-snowflake
//!
//! Schema, stage and file-format resources for `oxide-provider`.
//!
//! Each resource kind is a [`StatementGenerator`] carrying its own
//! [`ResourceDescriptor`](oxide_provider::descriptor::ResourceDescriptor) and
//! CREATE template:
//!
//! | kind          | scoping            | create flags |
//! |---------------|--------------------|--------------|
//! | `SCHEMA`      | database           | `TRANSIENT`  |
//! | `STAGE`       | database + schema  | `TEMPORARY`  |
//! | `FILE FORMAT` | database + schema  | `TEMPORARY`  |
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use oxide_provider::prelude::*;
//! use oxide_snowflake::SchemaGenerator;
//!
//! let provider = ResourceProvider::new(
//!     SchemaGenerator::new(),
//!     DryRunExecutor::new(),
//!     Arc::new(ProviderContext::new()),
//! );
//!
//! let created = provider
//!     .create(
//!         &Properties::new()
//!             .with("resource_name", "analytics")
//!             .with("database", "DB1")
//!             .with("transient", true),
//!     )
//!     .await?;
//! // CREATE TRANSIENT SCHEMA DB1.analytics_XXXXXXX
//! ```

pub mod config;
mod file_format;
mod schema;
mod stage;

use std::fmt;

use clap::ValueEnum;
use oxide_provider::statement::StatementGenerator;

pub use config::{ConfigError, ProviderConfig};
pub use file_format::{FileFormatGenerator, FileFormatType};
pub use schema::SchemaGenerator;
pub use stage::StageGenerator;

/// Resource kinds with a statement generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ResourceKind {
    /// `SCHEMA`
    Schema,
    /// `STAGE`
    Stage,
    /// `FILE FORMAT`
    FileFormat,
}

impl ResourceKind {
    /// All resource kinds.
    pub const ALL: [Self; 3] = [Self::Schema, Self::Stage, Self::FileFormat];

    /// Returns the generator for this kind.
    #[must_use]
    pub fn generator(self) -> Box<dyn StatementGenerator> {
        match self {
            Self::Schema => Box::new(SchemaGenerator::new()),
            Self::Stage => Box::new(StageGenerator::new()),
            Self::FileFormat => Box::new(FileFormatGenerator::new()),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.generator().descriptor().kind().sql_name())
    }
}
