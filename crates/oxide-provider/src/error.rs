//! Error types for the provider engine.

/// Errors that can occur while creating, diffing or deleting an object.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// A required attribute is null or absent in the inputs.
    #[error("Missing required attribute '{0}'")]
    MissingRequiredAttribute(String),

    /// Neither an explicit name nor a resource name was given.
    #[error("At least one of 'name' or 'resource_name' must be provided")]
    MissingNameOrResourceName,

    /// A value is not usable as an unquoted SQL identifier.
    #[error("Invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    /// The object kind is not one of the supported kinds.
    #[error("Unsupported object kind: '{0}'")]
    UnsupportedObjectKind(String),

    /// The inputs contain a key the resource kind does not declare.
    #[error("Unknown attribute '{0}'")]
    UnknownAttribute(String),

    /// An attribute holds a value the resource kind does not accept.
    #[error("Invalid value for attribute '{field}': {value}")]
    InvalidAttributeValue {
        /// The attribute name.
        field: String,
        /// The rejected value.
        value: String,
    },

    /// Statement template failed to render.
    #[error("Failed to render statement: {0}")]
    Render(String),

    /// Database error while executing a statement.
    #[error("Execution error: {0}")]
    Execution(#[from] sqlx::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<minijinja::Error> for ProviderError {
    fn from(err: minijinja::Error) -> Self {
        Self::Render(err.to_string())
    }
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
