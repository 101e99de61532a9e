//! Rendering for `skills diff`, `agents diff`, and `templates diff`.

use crate::cli::OutputFormat;
use anyhow::{anyhow, Result};
use aosm_store::{ResourceDiff, ResourceKind};
use serde_json::json;
use similar::TextDiff;
use std::fmt::Write;

/// Prints the global/project comparison for one resource.
pub(crate) fn print_resource_diff(
    kind: ResourceKind,
    identity: &str,
    diff: Option<ResourceDiff>,
    format: OutputFormat,
    context: usize,
) -> Result<()> {
    let diff = diff.ok_or_else(|| anyhow!("{kind} '{identity}' not found"))?;
    let identical = diff.global_content == diff.project_content;
    let rendered = match (&diff.global_content, &diff.project_content) {
        (Some(global), Some(project)) if !identical => Some(unified_diff(global, project, context)),
        _ => None,
    };

    if format.is_json() {
        return super::print_json(&json!({
            "kind": kind.label(),
            "name": identity,
            "identical": identical,
            "global_content": diff.global_content,
            "project_content": diff.project_content,
            "diff": rendered,
        }));
    }

    match (&diff.global_content, &diff.project_content, rendered) {
        (Some(_), None, _) => println!("{kind} '{identity}' is not overridden in this project."),
        (None, Some(_), _) => println!("{kind} '{identity}' exists only in the project."),
        (_, _, Some(text)) => {
            println!("--- global/{identity}");
            println!("+++ project/{identity}");
            print!("{text}");
        }
        _ => println!("Project copy of {kind} '{identity}' matches the global one."),
    }
    Ok(())
}

/// Unified line diff of `a` against `b` with `context` unchanged lines
/// around each change. Identical input renders as an empty string.
fn unified_diff(a: &str, b: &str, context: usize) -> String {
    let diff = TextDiff::from_lines(a, b);
    let mut output = String::new();
    for hunk in diff.unified_diff().context_radius(context).iter_hunks() {
        let _ = write!(output, "{hunk}");
    }
    output
}
