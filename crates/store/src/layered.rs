//! Generic two-tier merge engine.
//!
//! A [`Layer`] describes one resource kind: where its files live in each
//! tier, how a file becomes a resource, how writes are validated, and where
//! they land. [`LayeredStore`] applies the same list/merge/mutate rules to
//! every kind:
//!
//! - global bases are scanned first, then the project base;
//! - later entries replace earlier ones of the same identity, so project
//!   always wins;
//! - only project files are ever written or removed.

use aosm_discovery::{discover, Candidate, Depth, LayerRoot, Scope};
use aosm_state::{PathResolver, RootPaths};
use aosm_validate::Header;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Result, StoreError};
use crate::resource::{ResourceDiff, ResourceKind, Resolved};

/// Kind-specific fields pulled out of one file.
#[derive(Debug, Clone)]
pub struct Extracted<A> {
    pub name: String,
    pub attrs: A,
    pub extra: Header,
    pub body: String,
}

/// Describes one resource kind to [`LayeredStore`].
pub trait Layer {
    /// Kind-specific attributes carried by each resource.
    type Attrs: Clone + fmt::Debug + Serialize;

    const KIND: ResourceKind;
    const DEPTH: Depth;

    /// Global bases, lowest precedence first.
    fn global_bases(&self, paths: &RootPaths) -> Vec<PathBuf>;

    /// Project base to scan, when the project tier exists.
    fn project_base(&self, paths: &RootPaths) -> Option<PathBuf>;

    /// Project base that writes land in; created on demand. `None` means no
    /// project is active.
    fn writable_base(&self, paths: &RootPaths) -> Option<PathBuf>;

    /// Turns a file into kind-specific fields. `Ok(None)` means the file
    /// carries no identity and is skipped; `Err` is a parse message.
    fn extract(
        &self,
        candidate: &Candidate,
        content: &str,
    ) -> std::result::Result<Option<Extracted<Self::Attrs>>, String>;

    /// Merge key of a resolved resource.
    fn identity<'a>(&self, resource: &'a Resolved<Self::Attrs>) -> &'a str {
        &resource.name
    }

    /// Checks a document before it is written.
    fn validate(&self, _content: &str) -> Result<()> {
        Ok(())
    }

    /// File a write of `identity` goes to. `current` is the resource resolved
    /// for that identity before the write, if any.
    fn write_target(
        &self,
        base: &Path,
        identity: &str,
        current: Option<&Resolved<Self::Attrs>>,
    ) -> Result<PathBuf>;

    /// Output order of [`LayeredStore::list`].
    fn compare(&self, a: &Resolved<Self::Attrs>, b: &Resolved<Self::Attrs>) -> Ordering {
        self.identity(a).cmp(self.identity(b))
    }
}

/// Store for one resource kind over the global and project tiers.
///
/// Holds no cache: every call re-reads the filesystem.
pub struct LayeredStore<L: Layer> {
    resolver: Arc<PathResolver>,
    layer: L,
}

impl<L: Layer> LayeredStore<L> {
    pub fn new(resolver: Arc<PathResolver>, layer: L) -> Self {
        Self { resolver, layer }
    }

    pub fn kind(&self) -> ResourceKind {
        L::KIND
    }

    /// Merged snapshot of every resource, in [`Layer::compare`] order.
    pub fn list(&self) -> Vec<Resolved<L::Attrs>> {
        self.list_in(&self.resolver.resolve())
    }

    /// Resource resolved for `identity`, if any.
    pub fn read(&self, identity: &str) -> Option<Resolved<L::Attrs>> {
        self.find_in(&self.resolver.resolve(), identity)
    }

    /// Writes `content` verbatim as the project copy of `identity`.
    ///
    /// Validation runs before anything touches the disk.
    pub fn write(&self, identity: &str, content: &str) -> Result<PathBuf> {
        let paths = self.resolver.resolve();
        let base = self
            .layer
            .writable_base(&paths)
            .ok_or(StoreError::NoProjectRoot)?;
        self.layer.validate(content)?;

        let current = self.find_in(&paths, identity);
        let target = self.layer.write_target(&base, identity, current.as_ref())?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(StoreError::io(parent))?;
        }
        fs::write(&target, content).map_err(StoreError::io(&target))?;
        tracing::info!(kind = %L::KIND, name = identity, path = %target.display(), "wrote project resource");
        Ok(target)
    }

    /// Removes the project copy of `identity`.
    pub fn delete(&self, identity: &str) -> Result<PathBuf> {
        let resource = self.require(identity)?;
        if resource.scope == Scope::Global {
            return Err(StoreError::CannotDeleteGlobal {
                kind: L::KIND,
                name: identity.to_string(),
            });
        }
        fs::remove_file(&resource.resolved_path)
            .map_err(StoreError::io(&resource.resolved_path))?;
        tracing::info!(kind = %L::KIND, name = identity, path = %resource.resolved_path.display(), "removed project resource");
        Ok(resource.resolved_path)
    }

    /// Copies the global document of `identity` into the project tier.
    pub fn override_global(&self, identity: &str) -> Result<PathBuf> {
        let resource = self.require(identity)?;
        if resource.scope == Scope::Project {
            return Err(StoreError::AlreadyOverridden {
                kind: L::KIND,
                name: identity.to_string(),
            });
        }
        let content = fs::read_to_string(&resource.resolved_path)
            .map_err(StoreError::io(&resource.resolved_path))?;
        self.write(identity, &content)
    }

    /// Drops the project copy so the global one resolves again.
    pub fn revert(&self, identity: &str) -> Result<PathBuf> {
        self.delete(identity)
    }

    /// Global and project content of `identity`; `None` when absent.
    pub fn diff(&self, identity: &str) -> Result<Option<ResourceDiff>> {
        let Some(resource) = self.read(identity) else {
            return Ok(None);
        };
        let diff = match resource.scope {
            Scope::Global => ResourceDiff {
                global_content: Some(resource.content),
                project_content: None,
            },
            Scope::Project => ResourceDiff {
                global_content: match &resource.shadowed_global_path {
                    Some(path) => read_optional(path)?,
                    None => None,
                },
                project_content: Some(resource.content),
            },
        };
        Ok(Some(diff))
    }

    fn require(&self, identity: &str) -> Result<Resolved<L::Attrs>> {
        self.read(identity).ok_or_else(|| StoreError::NotFound {
            kind: L::KIND,
            name: identity.to_string(),
        })
    }

    fn find_in(&self, paths: &RootPaths, identity: &str) -> Option<Resolved<L::Attrs>> {
        self.list_in(paths)
            .into_iter()
            .find(|resource| self.layer.identity(resource) == identity)
    }

    fn layer_roots(&self, paths: &RootPaths) -> Vec<LayerRoot> {
        let mut roots: Vec<LayerRoot> = self
            .layer
            .global_bases(paths)
            .into_iter()
            .map(LayerRoot::global)
            .collect();
        if let Some(project) = self.layer.project_base(paths) {
            roots.push(LayerRoot::project(project));
        }
        roots
    }

    fn list_in(&self, paths: &RootPaths) -> Vec<Resolved<L::Attrs>> {
        let mut merged: HashMap<String, Resolved<L::Attrs>> = HashMap::new();

        for candidate in discover(&self.layer_roots(paths), L::DEPTH) {
            let Some(mut resource) = self.load(&candidate) else {
                continue;
            };
            let identity = self.layer.identity(&resource).to_string();
            if let Some(previous) = merged.get(&identity) {
                if resource.scope == Scope::Project {
                    resource.shadowed_global_path = match previous.scope {
                        Scope::Global => Some(previous.resolved_path.clone()),
                        Scope::Project => previous.shadowed_global_path.clone(),
                    };
                }
                if previous.scope == resource.scope {
                    tracing::debug!(
                        kind = %L::KIND,
                        name = %identity,
                        kept = %resource.resolved_path.display(),
                        dropped = %previous.resolved_path.display(),
                        "duplicate identity within one tier"
                    );
                }
            }
            merged.insert(identity, resource);
        }

        let mut out: Vec<_> = merged.into_values().collect();
        out.sort_by(|a, b| self.layer.compare(a, b));
        out
    }

    fn load(&self, candidate: &Candidate) -> Option<Resolved<L::Attrs>> {
        let content = match fs::read_to_string(&candidate.path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %candidate.path.display(), error = %err, "failed to read resource; skipping");
                return None;
            }
        };
        let extracted = match self.layer.extract(candidate, &content) {
            Ok(Some(extracted)) => extracted,
            Ok(None) => {
                tracing::warn!(kind = %L::KIND, path = %candidate.path.display(), "resource header has no name; skipping");
                return None;
            }
            Err(err) => {
                tracing::warn!(path = %candidate.path.display(), error = %err, "failed to parse resource; skipping");
                return None;
            }
        };
        Some(Resolved {
            name: extracted.name,
            attrs: extracted.attrs,
            extra: extracted.extra,
            body: extracted.body,
            content,
            scope: candidate.scope,
            resolved_path: candidate.path.clone(),
            shadowed_global_path: None,
        })
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(StoreError::io(path)(err)),
    }
}

/// Header entries whose keys are not in `consumed`.
pub(crate) fn unrecognized(header: &Header, consumed: &[&str]) -> Header {
    header
        .iter()
        .filter(|(key, _)| !key.as_str().is_some_and(|key| consumed.contains(&key)))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Identity of a header-named document.
///
/// A non-blank string `name` is used as is. Numbers other than zero and
/// `true` are read back as their text, so `name: 2024` lists as `2024`.
pub(crate) fn header_name(header: &Header, lifted: Option<String>) -> Option<String> {
    if let Some(name) = lifted {
        return (!name.trim().is_empty()).then_some(name);
    }
    match header.get("name")? {
        serde_yaml::Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        serde_yaml::Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Rejects names that would escape a flat base directory.
pub(crate) fn check_file_name(kind: ResourceKind, name: &str) -> Result<()> {
    let bad = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(StoreError::InvalidPath {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Write target for header-named kinds: the existing project file when the
/// identity already resolves there, else `<base>/<name>.md`.
pub(crate) fn named_target<A>(
    kind: ResourceKind,
    base: &Path,
    name: &str,
    current: Option<&Resolved<A>>,
) -> Result<PathBuf> {
    check_file_name(kind, name)?;
    match current {
        Some(resource) if resource.scope == Scope::Project => Ok(resource.resolved_path.clone()),
        _ => Ok(base.join(format!("{name}.md"))),
    }
}
