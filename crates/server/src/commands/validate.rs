//! Handler for the `validate` command.

use crate::cli::{OutputFormat, ValidateKind};
use anyhow::{bail, Result};
use aosm_validate::{validate_config, validate_document, SchemaKind, ValidationReport};
use std::path::Path;

use super::{print_json, read_content};

/// Handle `aosm validate <kind> <file>`. Fails when the document is invalid.
pub(crate) fn handle_validate_command(
    kind: ValidateKind,
    file: &Path,
    format: OutputFormat,
) -> Result<()> {
    let content = read_content(file)?;
    let report = match kind {
        ValidateKind::Skill => validate_document(SchemaKind::Skill, &content),
        ValidateKind::Agent => validate_document(SchemaKind::Agent, &content),
        ValidateKind::Config => match serde_yaml::from_str::<serde_yaml::Value>(&content) {
            Ok(doc) => validate_config(&doc),
            Err(err) => ValidationReport::from_errors(vec![format!("Invalid YAML: {err}")]),
        },
    };

    if format.is_json() {
        print_json(&report)?;
    } else if report.valid {
        println!("{} is valid", file.display());
    } else {
        println!("{} has {} error(s):", file.display(), report.errors.len());
        for error in &report.errors {
            println!("  - {error}");
        }
    }

    if !report.valid {
        bail!("validation failed");
    }
    Ok(())
}
