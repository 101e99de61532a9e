use std::path::PathBuf;
use thiserror::Error;

use crate::resource::ResourceKind;

/// Errors surfaced by store operations.
///
/// Every variant maps to a stable [`StoreError::kind`] code so callers at the
/// process boundary can render targeted messages.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The operation needs a project layer and none is active.
    #[error("No project found. Open a project directory containing agent-os/ or .agent-os/")]
    NoProjectRoot,

    /// The identity is absent from the merged collection.
    #[error("{kind} not found: {name}")]
    NotFound {
        /// Resource kind.
        kind: ResourceKind,
        /// Identity that was looked up.
        name: String,
    },

    /// Global resources are never removed through the store.
    #[error("Cannot delete global {kind}: {name}")]
    CannotDeleteGlobal {
        /// Resource kind.
        kind: ResourceKind,
        /// Identity of the global resource.
        name: String,
    },

    /// Override requested for a resource already resolved from the project.
    #[error("{kind} is already a project override: {name}")]
    AlreadyOverridden {
        /// Resource kind.
        kind: ResourceKind,
        /// Identity of the project resource.
        name: String,
    },

    /// Header schema violations on write.
    #[error("Invalid {kind} frontmatter:\n{}", .errors.join("\n"))]
    InvalidFrontmatter {
        /// Resource kind.
        kind: ResourceKind,
        /// One message per violated rule.
        errors: Vec<String>,
    },

    /// Structural violations in the config document on write.
    #[error("Invalid config:\n{}", .0.join("\n"))]
    InvalidConfig(Vec<String>),

    /// A structured document on disk (or supplied text) is malformed.
    #[error("Failed to parse {}: {message}", .path.display())]
    Parse {
        /// Document location.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// The identity would resolve outside its base directory.
    #[error("Invalid {kind} path: {name}")]
    InvalidPath {
        /// Resource kind.
        kind: ResourceKind,
        /// Rejected identity.
        name: String,
    },

    /// Underlying filesystem failure; the original message is preserved.
    #[error("{}: {source}", .path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Original error.
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Stable machine-readable code.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::NoProjectRoot => "no_project_root",
            StoreError::NotFound { .. } => "not_found",
            StoreError::CannotDeleteGlobal { .. } => "cannot_delete_global",
            StoreError::AlreadyOverridden { .. } => "already_overridden",
            StoreError::InvalidFrontmatter { .. } => "invalid_frontmatter",
            StoreError::InvalidConfig(_) => "invalid_config",
            StoreError::Parse { .. } => "parse_error",
            StoreError::InvalidPath { .. } => "invalid_path",
            StoreError::Io { .. } => "io_failure",
        }
    }

    /// Validation messages carried by the error, if any.
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            StoreError::InvalidFrontmatter { errors, .. } | StoreError::InvalidConfig(errors) => {
                Some(errors)
            }
            _ => None,
        }
    }

    /// Returns a mapper that tags an I/O error with `path`.
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> StoreError {
        let path = path.into();
        move |source| StoreError::Io { path, source }
    }
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
