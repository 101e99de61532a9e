use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The layer a resource was discovered in.
///
/// Project entries always win over global entries of the same identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// User-wide defaults under the home directory.
    Global,
    /// Per-project overrides under the active project root.
    Project,
}

impl Scope {
    /// Returns a stable label for this scope.
    pub fn label(&self) -> &'static str {
        match self {
            Scope::Global => "global",
            Scope::Project => "project",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How deep below a base directory candidates are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Only files directly inside the base (`agents/*.md`).
    Flat,
    /// Files at any depth (`skills/**/*.md`).
    Recursive,
}

impl Depth {
    pub(crate) fn max_depth(self) -> usize {
        match self {
            Depth::Flat => 1,
            Depth::Recursive => usize::MAX,
        }
    }
}

/// A base directory to enumerate, tagged with its scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRoot {
    /// Base directory, e.g. `~/.claude/skills`.
    pub root: PathBuf,
    /// Scope assigned to every file found under `root`.
    pub scope: Scope,
}

impl LayerRoot {
    /// A global-scope base.
    pub fn global(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            scope: Scope::Global,
        }
    }

    /// A project-scope base.
    pub fn project(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            scope: Scope::Project,
        }
    }
}

/// A markdown file found under a [`LayerRoot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Path relative to the base, `/`-separated on every platform.
    pub relative: String,
    /// Base directory the file was found under.
    pub root: PathBuf,
    /// Scope inherited from the base.
    pub scope: Scope,
}

impl Candidate {
    /// File name without the `.md` extension.
    pub fn stem(&self) -> &str {
        let file = self.relative.rsplit('/').next().unwrap_or(&self.relative);
        file.strip_suffix(".md").unwrap_or(file)
    }

    /// Segments of the relative path.
    pub fn segments(&self) -> Vec<&str> {
        self.relative.split('/').collect()
    }
}
