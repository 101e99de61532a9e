use aosm_state::{PathResolver, RootPaths};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::agents::{AgentLayer, AgentStore};
use crate::config::ConfigStore;
use crate::skills::{SkillLayer, SkillStore};
use crate::templates::{TemplateLayer, TemplateStore};

/// Every store over one shared [`PathResolver`].
///
/// Changing the project root through [`Workspace::set_project_root`] is
/// visible to all stores on their next call.
pub struct Workspace {
    resolver: Arc<PathResolver>,
    skills: SkillStore,
    agents: AgentStore,
    templates: TemplateStore,
    config: ConfigStore,
}

/// Counts observed by [`Workspace::refresh`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    pub paths: RootPaths,
    pub skills: usize,
    pub agents: usize,
    pub templates: usize,
    pub config_present: bool,
}

impl Workspace {
    pub fn new(resolver: PathResolver) -> Self {
        let resolver = Arc::new(resolver);
        Self {
            skills: SkillStore::new(Arc::clone(&resolver), SkillLayer),
            agents: AgentStore::new(Arc::clone(&resolver), AgentLayer),
            templates: TemplateStore::new(Arc::clone(&resolver), TemplateLayer),
            config: ConfigStore::new(Arc::clone(&resolver)),
            resolver,
        }
    }

    /// Workspace rooted at the process environment (see [`PathResolver::from_env`]).
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(PathResolver::from_env()?))
    }

    pub fn skills(&self) -> &SkillStore {
        &self.skills
    }

    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Currently resolved base directories.
    pub fn paths(&self) -> RootPaths {
        self.resolver.resolve()
    }

    /// Sets or clears the explicit project root and returns the new paths.
    pub fn set_project_root(&self, root: Option<PathBuf>) -> RootPaths {
        self.resolver.set_project_root(root);
        let paths = self.paths();
        tracing::info!(
            project_root = ?paths.project_root.as_ref().map(|p| p.display().to_string()),
            "project root changed"
        );
        paths
    }

    /// Re-scans every tier. Stores hold no cache, so this only reports what a
    /// fresh listing sees.
    pub fn refresh(&self) -> RefreshSummary {
        let config_present = self.config.path().is_ok_and(|path| path.is_file());
        RefreshSummary {
            paths: self.paths(),
            skills: self.skills.list().len(),
            agents: self.agents.list().len(),
            templates: self.templates.list().len(),
            config_present,
        }
    }
}
