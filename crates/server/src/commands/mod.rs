//! CLI command handlers for the aosm application.

mod config;
mod diff;
mod paths;
mod resources;
mod serve;
mod templates;
mod validate;

pub(crate) use config::handle_config_command;
pub(crate) use paths::handle_paths_command;
pub(crate) use resources::handle_resource_command;
pub(crate) use serve::handle_serve_command;
pub(crate) use templates::handle_template_command;
pub(crate) use validate::handle_validate_command;

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Reads a document from `file`, or from stdin when `file` is `-`.
pub(crate) fn read_content(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}

/// Prints `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
