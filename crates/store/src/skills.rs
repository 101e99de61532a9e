//! Skills: `skills/**/*.md` keyed by the header `name`.
//!
//! Global bases are the agent-os root and the `.claude` root (in that order);
//! the project base is the project `.claude` root.

use aosm_discovery::{Candidate, Depth};
use aosm_state::{RootPaths, CLAUDE_DIR};
use aosm_validate::{parse, validate_document, ResourceHeader, SchemaKind};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::layered::{
    header_name, named_target, unrecognized, Extracted, Layer, LayeredStore,
};
use crate::resource::{ResourceKind, Resolved, SkillAttrs};

pub const SKILLS_DIR: &str = "skills";

/// Skill layer description.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillLayer;

pub type SkillStore = LayeredStore<SkillLayer>;

/// Project `.claude` root, falling back to `<project>/.claude` when the
/// project exists but has no `.claude` directory yet.
pub(crate) fn writable_claude_root(paths: &RootPaths) -> Option<PathBuf> {
    paths.project_claude_root.clone().or_else(|| {
        paths
            .project_root
            .as_ref()
            .map(|root| root.join(CLAUDE_DIR))
    })
}

/// Rejects documents failing the header schema for `kind`.
pub(crate) fn check_schema(kind: ResourceKind, schema: SchemaKind, content: &str) -> Result<()> {
    validate_document(schema, content)
        .into_result()
        .map_err(|errors| StoreError::InvalidFrontmatter { kind, errors })
}

impl Layer for SkillLayer {
    type Attrs = SkillAttrs;

    const KIND: ResourceKind = ResourceKind::Skill;
    const DEPTH: Depth = Depth::Recursive;

    fn global_bases(&self, paths: &RootPaths) -> Vec<PathBuf> {
        vec![
            paths.global_agent_root.join(SKILLS_DIR),
            paths.global_claude_root.join(SKILLS_DIR),
        ]
    }

    fn project_base(&self, paths: &RootPaths) -> Option<PathBuf> {
        paths
            .project_claude_root
            .as_ref()
            .map(|root| root.join(SKILLS_DIR))
    }

    fn writable_base(&self, paths: &RootPaths) -> Option<PathBuf> {
        writable_claude_root(paths).map(|root| root.join(SKILLS_DIR))
    }

    fn extract(
        &self,
        _candidate: &Candidate,
        content: &str,
    ) -> std::result::Result<Option<Extracted<SkillAttrs>>, String> {
        let doc = parse(content).map_err(|err| err.to_string())?;
        let typed = ResourceHeader::from_header(&doc.header);
        let Some(name) = header_name(&doc.header, typed.name) else {
            return Ok(None);
        };

        let mut consumed = vec!["name"];
        if typed.description.is_some() {
            consumed.push("description");
        }
        if typed.globs.is_some() {
            consumed.push("globs");
        }

        Ok(Some(Extracted {
            name,
            attrs: SkillAttrs {
                description: typed.description.unwrap_or_default(),
                globs: typed.globs.unwrap_or_default(),
            },
            extra: unrecognized(&doc.header, &consumed),
            body: doc.body,
        }))
    }

    fn validate(&self, content: &str) -> Result<()> {
        check_schema(Self::KIND, SchemaKind::Skill, content)
    }

    fn write_target(
        &self,
        base: &Path,
        identity: &str,
        current: Option<&Resolved<SkillAttrs>>,
    ) -> Result<PathBuf> {
        named_target(Self::KIND, base, identity, current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aosm_discovery::Scope;

    fn candidate() -> Candidate {
        Candidate {
            path: PathBuf::from("/g/skills/x.md"),
            relative: "x.md".into(),
            root: PathBuf::from("/g/skills"),
            scope: Scope::Global,
        }
    }

    #[test]
    fn extract_defaults_missing_fields() {
        let extracted = SkillLayer
            .extract(&candidate(), "---\nname: partial\n---\nbody")
            .unwrap()
            .unwrap();
        assert_eq!(extracted.name, "partial");
        assert_eq!(extracted.attrs, SkillAttrs::default());
        assert_eq!(extracted.body, "body");
    }

    #[test]
    fn extract_keeps_foreign_and_mistyped_keys() {
        let extracted = SkillLayer
            .extract(
                &candidate(),
                "---\nname: s\ndescription: d\nglobs: '*.rs'\ntools: [Read]\n---\n",
            )
            .unwrap()
            .unwrap();
        assert!(extracted.attrs.globs.is_empty());
        assert!(extracted.extra.contains_key("globs"));
        assert!(extracted.extra.contains_key("tools"));
        assert!(!extracted.extra.contains_key("description"));
    }

    #[test]
    fn extract_skips_nameless_documents() {
        assert!(SkillLayer
            .extract(&candidate(), "# no header")
            .unwrap()
            .is_none());
        assert!(SkillLayer
            .extract(&candidate(), "---\nname: ''\n---\n")
            .unwrap()
            .is_none());
    }

    #[test]
    fn extract_reports_bad_yaml() {
        assert!(SkillLayer
            .extract(&candidate(), "---\nname: [oops\n---\n")
            .is_err());
    }

    #[test]
    fn writable_base_falls_back_to_project_dot_claude() {
        let paths = RootPaths {
            global_agent_root: PathBuf::from("/h/.agent-os"),
            project_agent_root: Some(PathBuf::from("/p/agent-os")),
            global_claude_root: PathBuf::from("/h/.claude"),
            project_claude_root: None,
            project_root: Some(PathBuf::from("/p")),
        };
        assert_eq!(SkillLayer.project_base(&paths), None);
        assert_eq!(
            SkillLayer.writable_base(&paths),
            Some(PathBuf::from("/p/.claude/skills"))
        );
    }
}
