//! Templates: `templates/**/*.md` under the global and project agent-os
//! roots, keyed by path relative to `templates/`.
//!
//! `team-development/backend/api-spec.md` resolves to system
//! `team-development`, category `backend`, name `api-spec`. Files directly
//! under a system directory get category `root`. Template content is free
//! form; no header schema applies.

use aosm_discovery::{Candidate, Depth};
use aosm_state::RootPaths;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::layered::{Extracted, Layer, LayeredStore};
use crate::resource::{ResourceKind, Resolved, TemplateAttrs};

pub const TEMPLATES_DIR: &str = "templates";
pub const ROOT_CATEGORY: &str = "root";

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateLayer;

pub type TemplateStore = LayeredStore<TemplateLayer>;

/// Derives system and category from a relative template path.
pub fn classify(relative: &str) -> (String, String) {
    let parts: Vec<&str> = relative.split('/').collect();
    let system = parts[0].to_string();
    let category = if parts.len() > 2 {
        parts[1].to_string()
    } else {
        ROOT_CATEGORY.to_string()
    };
    (system, category)
}

/// Validates a caller-supplied relative path and joins it onto `base`.
///
/// Only plain `/`-separated segments ending in a `.md` file are accepted, so
/// the result always stays inside `base`.
fn confined_target(base: &Path, relative: &str) -> Result<PathBuf> {
    let invalid = || StoreError::InvalidPath {
        kind: ResourceKind::Template,
        name: relative.to_string(),
    };
    if !relative.ends_with(".md") || relative.contains(['\\', '\0']) {
        return Err(invalid());
    }
    let mut target = base.to_path_buf();
    for segment in relative.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(invalid());
        }
        target.push(segment);
    }
    Ok(target)
}

impl Layer for TemplateLayer {
    type Attrs = TemplateAttrs;

    const KIND: ResourceKind = ResourceKind::Template;
    const DEPTH: Depth = Depth::Recursive;

    fn global_bases(&self, paths: &RootPaths) -> Vec<PathBuf> {
        vec![paths.global_agent_root.join(TEMPLATES_DIR)]
    }

    fn project_base(&self, paths: &RootPaths) -> Option<PathBuf> {
        paths
            .project_agent_root
            .as_ref()
            .map(|root| root.join(TEMPLATES_DIR))
    }

    fn writable_base(&self, paths: &RootPaths) -> Option<PathBuf> {
        self.project_base(paths)
    }

    fn extract(
        &self,
        candidate: &Candidate,
        content: &str,
    ) -> std::result::Result<Option<Extracted<TemplateAttrs>>, String> {
        let (system, category) = classify(&candidate.relative);
        Ok(Some(Extracted {
            name: candidate.stem().to_string(),
            attrs: TemplateAttrs {
                relative_path: candidate.relative.clone(),
                system,
                category,
            },
            extra: Default::default(),
            body: content.trim().to_string(),
        }))
    }

    fn identity<'a>(&self, resource: &'a Resolved<TemplateAttrs>) -> &'a str {
        &resource.attrs.relative_path
    }

    fn write_target(
        &self,
        base: &Path,
        identity: &str,
        _current: Option<&Resolved<TemplateAttrs>>,
    ) -> Result<PathBuf> {
        confined_target(base, identity)
    }

    fn compare(
        &self,
        a: &Resolved<TemplateAttrs>,
        b: &Resolved<TemplateAttrs>,
    ) -> std::cmp::Ordering {
        (&a.attrs.system, &a.attrs.category, &a.name, &a.attrs.relative_path).cmp(&(
            &b.attrs.system,
            &b.attrs.category,
            &b.name,
            &b.attrs.relative_path,
        ))
    }
}
