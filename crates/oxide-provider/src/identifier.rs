//! Identifier and object-kind validation.
//!
//! Names are interpolated into statements unquoted, so anything that is not a
//! plain identifier is rejected before a statement is rendered.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};

/// Validates that `name` is usable as an unquoted SQL identifier.
///
/// An identifier is valid if it is non-empty, contains only ASCII letters,
/// digits and underscores, and does not start with a digit.
pub fn validate_identifier(name: &str) -> Result<&str> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(name)
    } else {
        Err(ProviderError::InvalidIdentifier(name.to_string()))
    }
}

/// Returns whether `name` passes [`validate_identifier`].
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    validate_identifier(name).is_ok()
}

/// Validates an object-kind name against the supported kinds.
pub fn validate_object_kind(kind: &str) -> Result<ObjectKind> {
    kind.parse()
}

/// Kinds of remote objects the engine knows how to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ObjectKind {
    /// `DATABASE`
    Database,
    /// `SCHEMA`
    Schema,
    /// `TABLE`
    Table,
    /// `VIEW`
    View,
    /// `STAGE`
    Stage,
    /// `FILE FORMAT`
    FileFormat,
    /// `SEQUENCE`
    Sequence,
    /// `PIPE`
    Pipe,
    /// `STREAM`
    Stream,
    /// `TASK`
    Task,
    /// `WAREHOUSE`
    Warehouse,
    /// `ROLE`
    Role,
    /// `USER`
    User,
}

impl ObjectKind {
    /// All supported kinds.
    pub const ALL: [Self; 13] = [
        Self::Database,
        Self::Schema,
        Self::Table,
        Self::View,
        Self::Stage,
        Self::FileFormat,
        Self::Sequence,
        Self::Pipe,
        Self::Stream,
        Self::Task,
        Self::Warehouse,
        Self::Role,
        Self::User,
    ];

    /// Returns the keyword(s) used for this kind in DDL statements.
    #[must_use]
    pub const fn sql_name(self) -> &'static str {
        match self {
            Self::Database => "DATABASE",
            Self::Schema => "SCHEMA",
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Stage => "STAGE",
            Self::FileFormat => "FILE FORMAT",
            Self::Sequence => "SEQUENCE",
            Self::Pipe => "PIPE",
            Self::Stream => "STREAM",
            Self::Task => "TASK",
            Self::Warehouse => "WAREHOUSE",
            Self::Role => "ROLE",
            Self::User => "USER",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

impl FromStr for ObjectKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.sql_name() == s)
            .ok_or_else(|| ProviderError::UnsupportedObjectKind(s.to_string()))
    }
}

impl TryFrom<String> for ObjectKind {
    type Error = ProviderError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ObjectKind> for String {
    fn from(kind: ObjectKind) -> Self {
        kind.sql_name().to_string()
    }
}
