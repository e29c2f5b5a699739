//! `FILE FORMAT` resources.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use oxide_provider::descriptor::{AttributeSpec, ResourceDescriptor};
use oxide_provider::error::{ProviderError, Result};
use oxide_provider::identifier::ObjectKind;
use oxide_provider::properties::{Properties, DATABASE, SCHEMA};
use oxide_provider::render::render_statement;
use oxide_provider::statement::StatementGenerator;

const TYPE: &str = "type";
const FORMAT_OPTIONS: &str = "format_options";

const CREATE_TEMPLATE: &str = "\
CREATE{% if flags %} {{ flags }}{% endif %} FILE FORMAT {{ full_name }}
TYPE = {{ type }}
{%- if format_options is defined %}{% for key, value in format_options | items %}
{{ key | sql_identifier | upper }} = {{ value | sql }}
{%- endfor %}{% endif %}
{%- if comment is defined %}
COMMENT = {{ comment | sql }}
{%- endif %}";

/// Data file types a file format can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileFormatType {
    /// Delimited text.
    Csv,
    /// JSON documents.
    Json,
    /// Avro.
    Avro,
    /// ORC.
    Orc,
    /// Parquet.
    Parquet,
    /// XML documents.
    Xml,
}

impl FileFormatType {
    /// All file types.
    pub const ALL: [Self; 6] = [
        Self::Csv,
        Self::Json,
        Self::Avro,
        Self::Orc,
        Self::Parquet,
        Self::Xml,
    ];

    /// Returns the SQL keyword for this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Json => "JSON",
            Self::Avro => "AVRO",
            Self::Orc => "ORC",
            Self::Parquet => "PARQUET",
            Self::Xml => "XML",
        }
    }
}

impl fmt::Display for FileFormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileFormatType {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| invalid(TYPE, s))
    }
}

fn invalid(field: &str, value: impl fmt::Display) -> ProviderError {
    ProviderError::InvalidAttributeValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// Statement generator for file formats.
#[derive(Debug, Clone)]
pub struct FileFormatGenerator {
    descriptor: ResourceDescriptor,
}

impl FileFormatGenerator {
    /// Creates the file-format generator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptor: ResourceDescriptor::new(ObjectKind::FileFormat)
                .attribute(AttributeSpec::required(DATABASE))
                .attribute(AttributeSpec::optional(SCHEMA))
                .attribute(AttributeSpec::required(TYPE))
                .flag("temporary")
                .attribute(AttributeSpec::optional(FORMAT_OPTIONS))
                .attribute(AttributeSpec::optional("comment")),
        }
    }
}

impl Default for FileFormatGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementGenerator for FileFormatGenerator {
    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    fn render_create(&self, full_name: &str, inputs: &Properties) -> Result<String> {
        let file_type: FileFormatType = match inputs.get(TYPE) {
            Some(Value::String(s)) => s.parse()?,
            Some(other) => return Err(invalid(TYPE, other)),
            None => return Err(ProviderError::MissingRequiredAttribute(TYPE.to_string())),
        };

        if let Some(options) = inputs.get(FORMAT_OPTIONS) {
            if !options.is_object() {
                return Err(invalid(FORMAT_OPTIONS, options));
            }
        }

        let inputs = inputs.clone().with(TYPE, file_type.as_str());
        render_statement(
            CREATE_TEMPLATE,
            full_name,
            &self.descriptor.flag_keywords(&inputs),
            &inputs,
        )
    }
}
