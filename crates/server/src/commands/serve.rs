//! Handler for the `serve` command.

use crate::dispatch::Dispatcher;
use anyhow::Result;
use aosm_state::env_diag;
use aosm_store::Workspace;

/// Handle the `serve` command: answer JSON requests on stdin until EOF.
pub(crate) fn handle_serve_command(workspace: Workspace) -> Result<()> {
    let paths = workspace.paths();
    tracing::info!(
        project_root = ?paths.project_root,
        global_agent_root = %paths.global_agent_root.display(),
        "serving requests on stdio"
    );
    if env_diag() {
        tracing::info!(?paths, "resolved roots");
    }

    let dispatcher = Dispatcher::new(workspace);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    dispatcher.serve(stdin.lock(), stdout.lock())?;
    tracing::info!("stdin closed, shutting down");
    Ok(())
}
