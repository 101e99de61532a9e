//! Frontmatter codec and schema validation for skills, agents, and config.
//!
//! # Example
//!
//! ```rust
//! use aosm_validate::{validate_document, SchemaKind};
//!
//! let content = r#"---
//! name: my-skill
//! description: A helpful skill
//! globs: ["**/*.rs"]
//! ---
//! # My Skill
//! Content here.
//! "#;
//!
//! let report = validate_document(SchemaKind::Skill, content);
//! assert!(report.valid);
//! ```

pub mod common;
pub mod config;
pub mod frontmatter;
pub mod schema;

pub use common::{ParseSchemaKindError, SchemaKind, ValidationReport};
pub use config::validate_config;
pub use frontmatter::{
    extract_header, has_header, parse, serialize, split_frontmatter, FrontmatterError, Header,
    ParsedDocument, ResourceHeader,
};
pub use schema::{validate, validate_agent, validate_document, validate_skill};
