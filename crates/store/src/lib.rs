//! Layered global/project stores for skills, agents, templates, and config.
//!
//! Every listing merges the global tier with the active project tier, project
//! entries replacing global ones of the same identity. Mutations only ever
//! touch project files.
//!
//! # Examples
//!
//! ```
//! use aosm_state::PathResolver;
//! use aosm_store::{Scope, Workspace};
//! use tempfile::tempdir;
//!
//! let home = tempdir().unwrap();
//! let project = tempdir().unwrap();
//! std::fs::create_dir_all(project.path().join("agent-os")).unwrap();
//!
//! let workspace = Workspace::new(PathResolver::new(home.path(), project.path()));
//! workspace
//!     .skills()
//!     .write("testing", "---\nname: testing\ndescription: d\nglobs: [\"*.ts\"]\n---\nbody")
//!     .unwrap();
//!
//! let skill = workspace.skills().read("testing").unwrap();
//! assert_eq!(skill.scope, Scope::Project);
//! assert_eq!(skill.attrs.globs, vec!["*.ts"]);
//! ```

#![deny(unsafe_code)]

pub mod agents;
pub mod config;
pub mod error;
pub mod layered;
pub mod resource;
pub mod skills;
pub mod templates;
pub mod workspace;

pub use agents::{AgentLayer, AgentStore};
pub use aosm_discovery::Scope;
pub use config::{ConfigStore, CONFIG_FILE};
pub use error::{Result, StoreError};
pub use layered::{Extracted, Layer, LayeredStore};
pub use resource::{
    Agent, AgentAttrs, ResourceDiff, ResourceKind, Resolved, Skill, SkillAttrs, Template,
    TemplateAttrs,
};
pub use skills::{SkillLayer, SkillStore};
pub use templates::{TemplateLayer, TemplateStore};
pub use workspace::{RefreshSummary, Workspace};
