//! Agents: `agents/*.md` (one level) under the global and project `.claude`
//! roots, keyed by the header `name`.

use aosm_discovery::{Candidate, Depth};
use aosm_state::RootPaths;
use aosm_validate::{parse, ResourceHeader, SchemaKind};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::layered::{
    header_name, named_target, unrecognized, Extracted, Layer, LayeredStore,
};
use crate::resource::{AgentAttrs, ResourceKind, Resolved};
use crate::skills::{check_schema, writable_claude_root};

pub const AGENTS_DIR: &str = "agents";

#[derive(Debug, Clone, Copy, Default)]
pub struct AgentLayer;

pub type AgentStore = LayeredStore<AgentLayer>;

impl Layer for AgentLayer {
    type Attrs = AgentAttrs;

    const KIND: ResourceKind = ResourceKind::Agent;
    const DEPTH: Depth = Depth::Flat;

    fn global_bases(&self, paths: &RootPaths) -> Vec<PathBuf> {
        vec![paths.global_claude_root.join(AGENTS_DIR)]
    }

    fn project_base(&self, paths: &RootPaths) -> Option<PathBuf> {
        paths
            .project_claude_root
            .as_ref()
            .map(|root| root.join(AGENTS_DIR))
    }

    fn writable_base(&self, paths: &RootPaths) -> Option<PathBuf> {
        writable_claude_root(paths).map(|root| root.join(AGENTS_DIR))
    }

    fn extract(
        &self,
        _candidate: &Candidate,
        content: &str,
    ) -> std::result::Result<Option<Extracted<AgentAttrs>>, String> {
        let doc = parse(content).map_err(|err| err.to_string())?;
        let typed = ResourceHeader::from_header(&doc.header);
        let Some(name) = header_name(&doc.header, typed.name) else {
            return Ok(None);
        };

        let consumed: Vec<&str> = [
            ("name", true),
            ("description", typed.description.is_some()),
            ("tools", typed.tools.is_some()),
            ("color", typed.color.is_some()),
            ("mcp_integrations", typed.mcp_integrations.is_some()),
        ]
        .into_iter()
        .filter_map(|(key, lifted)| lifted.then_some(key))
        .collect();

        Ok(Some(Extracted {
            name,
            attrs: AgentAttrs {
                description: typed.description.unwrap_or_default(),
                tools: typed.tools,
                color: typed.color,
                mcp_integrations: typed.mcp_integrations,
            },
            extra: unrecognized(&doc.header, &consumed),
            body: doc.body,
        }))
    }

    fn validate(&self, content: &str) -> Result<()> {
        check_schema(Self::KIND, SchemaKind::Agent, content)
    }

    fn write_target(
        &self,
        base: &Path,
        identity: &str,
        current: Option<&Resolved<AgentAttrs>>,
    ) -> Result<PathBuf> {
        named_target(Self::KIND, base, identity, current)
    }
}
