//! Resolves where the global and project resource layers live on disk.
//!
//! This crate provides:
//! - Environment-driven settings (home directory, initial project root).
//! - The [`PathResolver`], which owns the session's explicit project root
//!   and computes the four base directories on demand.
//!
//! Nothing here mutates the filesystem; every lookup is an existence check.

pub mod env;
pub mod paths;

pub use env::{env_diag, home_dir, project_root_from_env};
pub use paths::{
    has_project_marker, project_agent_root, project_claude_root, PathResolver, RootPaths,
    AGENT_OS_DIR, CLAUDE_DIR, PROJECT_MARKERS,
};
