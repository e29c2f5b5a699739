//! Resource descriptors: the attributes a resource kind recognises.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::{ProviderError, Result};
use crate::identifier::{validate_object_kind, ObjectKind};
use crate::properties::{Properties, RESERVED_KEYS};

/// One recognised attribute of a resource kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    /// Attribute name, unique within its descriptor.
    pub name: String,
    /// Whether create fails when the attribute is null or absent.
    pub required: bool,
}

impl AttributeSpec {
    /// A required attribute.
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
        }
    }

    /// An optional attribute.
    #[must_use]
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
        }
    }
}

/// Describes one resource kind: its object kind, attributes and create flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    kind: ObjectKind,
    attributes: Vec<AttributeSpec>,
    create_flags: Vec<String>,
}

impl ResourceDescriptor {
    /// Creates a descriptor with no attributes.
    #[must_use]
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
            create_flags: Vec::new(),
        }
    }

    /// Creates a descriptor from an object-kind name such as `"STAGE"`.
    pub fn for_kind(kind: &str) -> Result<Self> {
        Ok(Self::new(validate_object_kind(kind)?))
    }

    /// Adds an attribute.
    ///
    /// # Panics
    ///
    /// Panics if the name is already declared or collides with a reserved key.
    #[must_use]
    pub fn attribute(mut self, spec: AttributeSpec) -> Self {
        assert!(
            !RESERVED_KEYS.contains(&spec.name.as_str()),
            "attribute '{}' collides with a reserved key",
            spec.name
        );
        assert!(
            self.spec(&spec.name).is_none(),
            "attribute '{}' declared twice for {}",
            spec.name,
            self.kind
        );
        self.attributes.push(spec);
        self
    }

    /// Adds a boolean attribute rendered as a bare keyword in CREATE statements.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`attribute`](Self::attribute).
    #[must_use]
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self = self.attribute(AttributeSpec::optional(name.clone()));
        self.create_flags.push(name);
        self
    }

    /// The object kind.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// All attributes in declaration order.
    #[must_use]
    pub fn attributes(&self) -> &[AttributeSpec] {
        &self.attributes
    }

    /// Names of all attributes in declaration order.
    #[must_use]
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }

    /// Names of the required attributes.
    #[must_use]
    pub fn required_attributes(&self) -> BTreeSet<&str> {
        self.attributes
            .iter()
            .filter(|a| a.required)
            .map(|a| a.name.as_str())
            .collect()
    }

    /// Names of the create flags in declaration order.
    #[must_use]
    pub fn create_flags(&self) -> &[String] {
        &self.create_flags
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn spec(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Rejects keys that are neither attributes nor reserved keys.
    pub fn check_inputs(&self, inputs: &Properties) -> Result<()> {
        match inputs
            .keys()
            .find(|key| !RESERVED_KEYS.contains(key) && self.spec(key).is_none())
        {
            Some(key) => Err(ProviderError::UnknownAttribute(key.to_string())),
            None => Ok(()),
        }
    }

    /// Returns the first required attribute missing from `inputs`.
    #[must_use]
    pub fn missing_required<'a>(&'a self, inputs: &Properties) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|a| a.required && !inputs.contains(&a.name))
            .map(|a| a.name.as_str())
    }

    /// Copies every attribute from `inputs`, using `null` for absent ones.
    #[must_use]
    pub fn echo(&self, inputs: &Properties) -> Properties {
        self.attributes
            .iter()
            .map(|a| (a.name.clone(), inputs.get(&a.name).cloned().unwrap_or(Value::Null)))
            .collect()
    }

    /// Uppercased names of the flags set to `true`, space separated.
    #[must_use]
    pub fn flag_keywords(&self, inputs: &Properties) -> String {
        self.create_flags
            .iter()
            .filter(|flag| inputs.get(flag).and_then(Value::as_bool) == Some(true))
            .map(|flag| flag.to_uppercase())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
