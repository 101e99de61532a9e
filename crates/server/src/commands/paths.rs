//! Handler for the `paths` command.

use crate::cli::OutputFormat;
use anyhow::Result;
use aosm_state::{env_diag, RootPaths};
use std::path::Path;

use super::print_json;

/// Handle `aosm paths`.
pub(crate) fn handle_paths_command(paths: &RootPaths, format: OutputFormat) -> Result<()> {
    if format.is_json() {
        return print_json(paths);
    }
    let diag = env_diag();
    print_row("global agent-os", Some(&paths.global_agent_root), diag);
    print_row("global claude", Some(&paths.global_claude_root), diag);
    print_row("project root", paths.project_root.as_deref(), diag);
    print_row("project agent-os", paths.project_agent_root.as_deref(), diag);
    print_row("project claude", paths.project_claude_root.as_deref(), diag);
    Ok(())
}

fn print_row(label: &str, path: Option<&Path>, diag: bool) {
    match path {
        Some(path) if diag => {
            let state = if path.is_dir() { "present" } else { "missing" };
            println!("{label:<18} {} ({state})", path.display());
        }
        Some(path) => println!("{label:<18} {}", path.display()),
        None => println!("{label:<18} -"),
    }
}
