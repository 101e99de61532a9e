//! Process entry point: logging, argument parsing, and command routing.

use anyhow::Result;
use aosm_store::Workspace;
use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::{
    handle_config_command, handle_paths_command, handle_resource_command, handle_serve_command,
    handle_template_command, handle_validate_command,
};

/// Parses the command line and runs the selected command.
///
/// Logs go to stderr, filtered by `RUST_LOG`, so stdout stays clean for
/// command output and the `serve` protocol.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    let workspace = Workspace::from_env()?;
    if let Some(project) = cli.project {
        workspace.set_project_root(Some(project));
    }

    match cli.command {
        Commands::Paths => handle_paths_command(&workspace.paths(), format),
        Commands::Skills { action } => handle_resource_command(workspace.skills(), action, format),
        Commands::Agents { action } => handle_resource_command(workspace.agents(), action, format),
        Commands::Templates { action } => {
            handle_template_command(workspace.templates(), action, format)
        }
        Commands::Config { action } => handle_config_command(workspace.config(), action, format),
        Commands::Validate { kind, file } => handle_validate_command(kind, &file, format),
        Commands::Serve => handle_serve_command(workspace),
    }
}
