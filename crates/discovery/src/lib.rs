//! Enumeration of resource files across the global and project tiers.
//!
//! Each tier is a set of base directories; this crate only finds candidate
//! markdown files and tags them with their scope. Parsing and merging happen
//! in the store layer.
//!
//! # Examples
//!
//! ```
//! use aosm_discovery::{discover, Depth, LayerRoot, Scope};
//! use tempfile::tempdir;
//!
//! let global = tempdir().unwrap();
//! let project = tempdir().unwrap();
//! std::fs::write(global.path().join("qa.md"), "# QA").unwrap();
//! std::fs::write(project.path().join("qa.md"), "# QA (project)").unwrap();
//!
//! let layers = vec![LayerRoot::global(global.path()), LayerRoot::project(project.path())];
//! let found = discover(&layers, Depth::Flat);
//! assert_eq!(found.len(), 2);
//! assert_eq!(found[1].scope, Scope::Project);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Directory walking.
pub mod scanner;
/// Scopes, bases, and candidates.
pub mod types;

pub use scanner::{discover, relative_identity, scan_root};
pub use types::{Candidate, Depth, LayerRoot, Scope};
