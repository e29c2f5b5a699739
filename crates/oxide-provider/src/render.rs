//! Statement templating.
//!
//! Statements are rendered from Jinja-style templates. Besides the present
//! inputs, every template sees `full_name` and `flags` (the uppercased create
//! flags set on the resource) and two filters:
//!
//! - `sql` renders a value as a SQL literal
//! - `sql_identifier` renders a bare, validated identifier

use std::collections::BTreeMap;

use minijinja::{Environment, Error, ErrorKind, Value as TemplateValue};
use serde_json::Value;

use crate::error::Result;
use crate::identifier::{is_valid_identifier, validate_identifier};
use crate::properties::Properties;

/// Renders `template` against the present `inputs`.
pub fn render_statement(
    template: &str,
    full_name: &str,
    flags: &str,
    inputs: &Properties,
) -> Result<String> {
    let env = environment();

    let mut ctx: BTreeMap<&str, Value> = inputs.present().map(|(k, v)| (k, v.clone())).collect();
    ctx.insert("full_name", Value::from(full_name));
    ctx.insert("flags", Value::from(flags));

    Ok(env.render_str(template, &ctx)?)
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.add_filter("sql", sql_filter);
    env.add_filter("sql_identifier", sql_identifier_filter);
    env
}

/// Returns the SQL literal for a JSON value.
///
/// Strings are single-quoted with embedded quotes doubled, arrays become a
/// parenthesised list and objects a parenthesised `KEY = value` option list.
/// Object keys are written unquoted and must be valid identifiers.
pub fn sql_literal(value: &Value) -> Result<String> {
    let literal = match value {
        Value::Null => String::from("NULL"),
        Value::Bool(b) => {
            if *b {
                String::from("TRUE")
            } else {
                String::from("FALSE")
            }
        }
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            let escaped = s.replace('\'', "''");
            format!("'{escaped}'")
        }
        Value::Array(items) => {
            let items = items.iter().map(sql_literal).collect::<Result<Vec<_>>>()?;
            format!("({})", items.join(", "))
        }
        Value::Object(entries) => {
            let options = entries
                .iter()
                .map(|(k, v)| {
                    let key = validate_identifier(k)?;
                    Ok(format!("{} = {}", key.to_uppercase(), sql_literal(v)?))
                })
                .collect::<Result<Vec<_>>>()?;
            format!("({})", options.join(" "))
        }
    };
    Ok(literal)
}

fn sql_filter(value: TemplateValue) -> std::result::Result<String, Error> {
    let json = serde_json::to_value(&value).map_err(|e| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("value cannot be rendered as SQL: {e}"),
        )
    })?;
    sql_literal(&json).map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))
}

fn sql_identifier_filter(value: TemplateValue) -> std::result::Result<String, Error> {
    match value.as_str() {
        Some(ident) if is_valid_identifier(ident) => Ok(ident.to_string()),
        _ => Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("invalid identifier: {value}"),
        )),
    }
}
