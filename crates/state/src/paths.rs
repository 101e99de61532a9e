//! Base directory resolution for the global and project layers.
//!
//! The global layer lives under the user's home directory (`~/.agent-os`,
//! `~/.claude`). The project layer lives under the nearest directory that
//! carries an `agent-os/` or `.agent-os/` marker, or under an explicit root
//! chosen for the session.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::env::{home_dir, project_root_from_env};

/// Directory names that mark a project root, in lookup order.
pub const PROJECT_MARKERS: [&str; 2] = ["agent-os", ".agent-os"];
/// Global Agent OS directory name under the home directory.
pub const AGENT_OS_DIR: &str = ".agent-os";
/// Claude directory name, used both globally and per project.
pub const CLAUDE_DIR: &str = ".claude";

/// Snapshot of the base directories for both layers.
///
/// Project entries are `None` when no project is active or when the
/// directory is absent; callers then operate in global-only mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootPaths {
    /// `~/.agent-os`, or the repository fallback when only that exists.
    pub global_agent_root: PathBuf,
    /// `<project>/agent-os` or `<project>/.agent-os`.
    pub project_agent_root: Option<PathBuf>,
    /// `~/.claude`.
    pub global_claude_root: PathBuf,
    /// `<project>/.claude`.
    pub project_claude_root: Option<PathBuf>,
    /// The active project root.
    pub project_root: Option<PathBuf>,
}

impl RootPaths {
    /// Returns true when a project root is active.
    pub fn has_project(&self) -> bool {
        self.project_root.is_some()
    }
}

/// Resolves [`RootPaths`] for one session.
///
/// The explicit project root is the only mutable state; it is set and cleared
/// through `&self` so a single resolver can be shared by every store.
#[derive(Debug)]
pub struct PathResolver {
    home: PathBuf,
    cwd: PathBuf,
    project_override: RwLock<Option<PathBuf>>,
}

impl PathResolver {
    /// Creates a resolver with an explicit home and working directory.
    pub fn new(home: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            cwd: cwd.into(),
            project_override: RwLock::new(None),
        }
    }

    /// Creates a resolver from the process environment.
    ///
    /// Uses [`home_dir`], the current working directory, and seeds the
    /// explicit project root from `AOSM_PROJECT_ROOT`.
    pub fn from_env() -> anyhow::Result<Self> {
        let resolver = Self::new(home_dir()?, std::env::current_dir()?);
        resolver.set_project_root(project_root_from_env());
        Ok(resolver)
    }

    /// Builder form of [`PathResolver::set_project_root`].
    pub fn with_project_root(self, root: Option<PathBuf>) -> Self {
        self.set_project_root(root);
        self
    }

    /// Sets or clears the explicit project root for this session.
    pub fn set_project_root(&self, root: Option<PathBuf>) {
        if let Some(ref path) = root {
            if !has_project_marker(path) {
                tracing::warn!(
                    path = %path.display(),
                    "explicit project root has no agent-os marker; falling back to directory search"
                );
            }
        }
        *self.project_override.write() = root;
    }

    /// Returns the explicit project root, if one was set.
    pub fn project_root_override(&self) -> Option<PathBuf> {
        self.project_override.read().clone()
    }

    /// Home directory this resolver was built with.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Working directory the project search starts from.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Global Agent OS root.
    ///
    /// Priority: `~/.agent-os`, then `<cwd>/../agent-os`. When neither exists
    /// the home path is still returned; a missing directory simply yields no
    /// resources.
    pub fn global_agent_root(&self) -> PathBuf {
        let home_root = self.home.join(AGENT_OS_DIR);
        if home_root.exists() {
            return home_root;
        }
        if let Some(repo_root) = self.cwd.parent().map(|p| p.join("agent-os")) {
            if repo_root.exists() {
                return repo_root;
            }
        }
        home_root
    }

    /// Global `.claude` root. Existence is not checked.
    pub fn global_claude_root(&self) -> PathBuf {
        self.home.join(CLAUDE_DIR)
    }

    /// Finds the active project root.
    ///
    /// The explicit root wins when it carries a marker; otherwise the search
    /// walks up from the working directory, stopping before the filesystem
    /// root.
    pub fn find_project_root(&self) -> Option<PathBuf> {
        if let Some(explicit) = self.project_root_override() {
            if has_project_marker(&explicit) {
                return Some(explicit);
            }
        }

        self.cwd
            .ancestors()
            .take_while(|dir| dir.parent().is_some())
            .find(|dir| has_project_marker(dir))
            .map(Path::to_path_buf)
    }

    /// Resolves every base directory.
    pub fn resolve(&self) -> RootPaths {
        let project_root = self.find_project_root();
        RootPaths {
            global_agent_root: self.global_agent_root(),
            project_agent_root: project_root.as_deref().and_then(project_agent_root),
            global_claude_root: self.global_claude_root(),
            project_claude_root: project_root.as_deref().and_then(project_claude_root),
            project_root,
        }
    }
}

/// Returns true if `dir` contains one of the [`PROJECT_MARKERS`].
pub fn has_project_marker(dir: &Path) -> bool {
    PROJECT_MARKERS
        .iter()
        .any(|marker| dir.join(marker).is_dir())
}

/// Returns the project's Agent OS directory, preferring `agent-os/` over the
/// older `.agent-os/` layout.
pub fn project_agent_root(project_root: &Path) -> Option<PathBuf> {
    PROJECT_MARKERS
        .iter()
        .map(|marker| project_root.join(marker))
        .find(|dir| dir.is_dir())
}

/// Returns the project's `.claude` directory when it exists.
pub fn project_claude_root(project_root: &Path) -> Option<PathBuf> {
    let dir = project_root.join(CLAUDE_DIR);
    dir.is_dir().then_some(dir)
}
