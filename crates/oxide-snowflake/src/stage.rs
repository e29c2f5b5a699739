//! `STAGE` resources.
//!
//! Option groups such as `credentials` or `copy_options` are given as JSON
//! objects and rendered as `(KEY = value ...)` lists.

use oxide_provider::descriptor::{AttributeSpec, ResourceDescriptor};
use oxide_provider::error::Result;
use oxide_provider::identifier::ObjectKind;
use oxide_provider::properties::{Properties, DATABASE, SCHEMA};
use oxide_provider::render::render_statement;
use oxide_provider::statement::StatementGenerator;

const CREATE_TEMPLATE: &str = "\
CREATE{% if flags %} {{ flags }}{% endif %} STAGE {{ full_name }}
{%- if url is defined %}
URL = {{ url | sql }}
{%- endif %}
{%- if storage_integration is defined %}
STORAGE_INTEGRATION = {{ storage_integration | sql_identifier }}
{%- endif %}
{%- if credentials is defined %}
CREDENTIALS = {{ credentials | sql }}
{%- endif %}
{%- if encryption is defined %}
ENCRYPTION = {{ encryption | sql }}
{%- endif %}
{%- if file_format is defined %}
FILE_FORMAT = {{ file_format | sql }}
{%- endif %}
{%- if copy_options is defined %}
COPY_OPTIONS = {{ copy_options | sql }}
{%- endif %}
{%- if comment is defined %}
COMMENT = {{ comment | sql }}
{%- endif %}";

/// Statement generator for stages.
#[derive(Debug, Clone)]
pub struct StageGenerator {
    descriptor: ResourceDescriptor,
}

impl StageGenerator {
    /// Creates the stage generator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptor: ResourceDescriptor::new(ObjectKind::Stage)
                .attribute(AttributeSpec::optional(DATABASE))
                .attribute(AttributeSpec::optional(SCHEMA))
                .flag("temporary")
                .attribute(AttributeSpec::optional("url"))
                .attribute(AttributeSpec::optional("storage_integration"))
                .attribute(AttributeSpec::optional("credentials"))
                .attribute(AttributeSpec::optional("encryption"))
                .attribute(AttributeSpec::optional("file_format"))
                .attribute(AttributeSpec::optional("copy_options"))
                .attribute(AttributeSpec::optional("comment")),
        }
    }
}

impl Default for StageGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementGenerator for StageGenerator {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_provider::error::ProviderError;
    use serde_json::json;

    #[test]
    fn test_create_internal_stage() {
        let sql = StageGenerator::new()
            .render_create("DB1.PUB.LANDING", &Properties::new())
            .unwrap();
        assert_eq!(sql, "CREATE STAGE DB1.PUB.LANDING");
    }

    #[test]
    fn test_create_external_stage() {
        let inputs = Properties::new()
            .with("temporary", true)
            .with("url", "s3://bucket/path/")
            .with("storage_integration", "S3_INT")
            .with("encryption", json!({"type": "AWS_SSE_S3"}))
            .with("file_format", json!({"format_name": "DB1.PUB.CSV_FMT"}))
            .with("copy_options", json!({"on_error": "CONTINUE", "purge": true}))
            .with("comment", "Landing zone for 'raw' files");

        let sql = StageGenerator::new()
            .render_create("DB1.PUB.LANDING", &inputs)
            .unwrap();

        assert_eq!(
            sql,
            "CREATE TEMPORARY STAGE DB1.PUB.LANDING\n\
             URL = 's3://bucket/path/'\n\
             STORAGE_INTEGRATION = S3_INT\n\
             ENCRYPTION = (TYPE = 'AWS_SSE_S3')\n\
             FILE_FORMAT = (FORMAT_NAME = 'DB1.PUB.CSV_FMT')\n\
             COPY_OPTIONS = (ON_ERROR = 'CONTINUE' PURGE = TRUE)\n\
             COMMENT = 'Landing zone for ''raw'' files'"
        );
    }

    #[test]
    fn test_create_with_credentials() {
        let inputs = Properties::new()
            .with("url", "s3://bucket/")
            .with("credentials", json!({"aws_key_id": "AKIA", "aws_secret_key": "s3cr3t"}));

        let sql = StageGenerator::new().render_create("ST", &inputs).unwrap();

        assert_eq!(
            sql,
            "CREATE STAGE ST\n\
             URL = 's3://bucket/'\n\
             CREDENTIALS = (AWS_KEY_ID = 'AKIA' AWS_SECRET_KEY = 's3cr3t')"
        );
    }

    #[test]
    fn test_invalid_storage_integration() {
        let inputs = Properties::new().with("storage_integration", "S3 INT; DROP");
        assert!(matches!(
            StageGenerator::new().render_create("ST", &inputs),
            Err(ProviderError::Render(_))
        ));
    }

    #[test]
    fn test_invalid_option_key() {
        let inputs = Properties::new().with(
            "credentials",
            json!({"aws_key_id = 'a'); DROP DATABASE PROD; --": "k"}),
        );
        assert!(matches!(
            StageGenerator::new().render_create("ST", &inputs),
            Err(ProviderError::Render(_))
        ));
    }

    #[test]
    fn test_drop() {
        let sql = StageGenerator::new()
            .render_drop("DB1.PUB.MY_STAGE", &Properties::new())
            .unwrap();
        assert_eq!(sql, "DROP STAGE DB1.PUB.MY_STAGE");
    }
}
