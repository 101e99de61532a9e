//! Header schemas for skills and agents.
//!
//! | Kind  | Required                          | Type constraints                              |
//! |-------|-----------------------------------|-----------------------------------------------|
//! | skill | `name`, `description`, `globs`    | `globs` is a non-empty array                  |
//! | agent | `name`, `description`             | `tools`, `mcp_integrations` arrays if present |
//!
//! Every rule runs on every call so a single report lists all problems. A
//! `null` value counts as absent.

use serde_yaml::Value;

use crate::common::{SchemaKind, ValidationReport};
use crate::frontmatter::{parse, Header};

/// Validate a header against the schema for `kind`.
pub fn validate(kind: SchemaKind, header: &Header) -> ValidationReport {
    match kind {
        SchemaKind::Skill => validate_skill(header),
        SchemaKind::Agent => validate_agent(header),
    }
}

/// Validate a skill header.
pub fn validate_skill(header: &Header) -> ValidationReport {
    let mut errors = Vec::new();
    require_text(header, "name", &mut errors);
    require_text(header, "description", &mut errors);

    match field(header, "globs") {
        None => errors.push("Missing required field: globs".to_string()),
        Some(Value::Sequence(globs)) if globs.is_empty() => {
            errors.push("Invalid field: globs array cannot be empty".to_string())
        }
        Some(Value::Sequence(_)) => {}
        Some(_) => errors.push("Invalid field: globs must be an array".to_string()),
    }

    ValidationReport::from_errors(errors)
}

/// Validate an agent header.
pub fn validate_agent(header: &Header) -> ValidationReport {
    let mut errors = Vec::new();
    require_text(header, "name", &mut errors);
    require_text(header, "description", &mut errors);
    optional_array(header, "tools", &mut errors);
    optional_array(header, "mcp_integrations", &mut errors);
    ValidationReport::from_errors(errors)
}

/// Parse `content` and validate its header.
///
/// A header that cannot be decoded yields a single error describing why.
pub fn validate_document(kind: SchemaKind, content: &str) -> ValidationReport {
    match parse(content) {
        Ok(doc) => validate(kind, &doc.header),
        Err(err) => ValidationReport::from_errors(vec![format!("Invalid frontmatter: {err}")]),
    }
}

fn field<'a>(header: &'a Header, key: &str) -> Option<&'a Value> {
    header.get(key).filter(|value| !value.is_null())
}

fn require_text(header: &Header, key: &str, errors: &mut Vec<String>) {
    match field(header, key) {
        None => errors.push(format!("Missing required field: {key}")),
        Some(Value::String(text)) if text.trim().is_empty() => {
            errors.push(format!("Missing required field: {key}"))
        }
        Some(Value::String(_)) => {}
        Some(_) => errors.push(format!("Invalid field: {key} must be a string")),
    }
}

fn optional_array(header: &Header, key: &str, errors: &mut Vec<String>) {
    if let Some(value) = field(header, key) {
        if !value.is_sequence() {
            errors.push(format!("Invalid field: {key} must be an array"));
        }
    }
}
