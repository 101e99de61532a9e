use aosm_discovery::Scope;
use aosm_validate::Header;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Kinds of name-keyed resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// `skills/**/*.md`, identity from the header `name`.
    Skill,
    /// `agents/*.md`, identity from the header `name`.
    Agent,
    /// `templates/**/*.md`, identity from the relative path.
    Template,
}

impl ResourceKind {
    /// Returns a stable label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Skill => "skill",
            ResourceKind::Agent => "agent",
            ResourceKind::Template => "template",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A resource after global/project merge.
///
/// `A` carries the kind-specific attributes and is flattened when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolved<A> {
    /// Identity for skills and agents; file stem for templates.
    pub name: String,
    #[serde(flatten)]
    pub attrs: A,
    /// Header keys this kind does not recognize, kept verbatim.
    #[serde(skip_serializing_if = "Header::is_empty")]
    pub extra: Header,
    /// Content below the header, trimmed.
    pub body: String,
    /// Raw document as stored on disk.
    pub content: String,
    pub scope: Scope,
    /// File of the winning tier.
    pub resolved_path: PathBuf,
    /// Global file hidden by this project entry, if one existed at merge time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadowed_global_path: Option<PathBuf>,
}

/// Skill attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillAttrs {
    pub description: String,
    pub globs: Vec<String>,
}

/// Agent attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentAttrs {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcp_integrations: Option<Vec<String>>,
}

/// Template attributes derived from the path under `templates/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateAttrs {
    /// `/`-separated path relative to the templates root; the identity.
    pub relative_path: String,
    /// First path segment.
    pub system: String,
    /// Second path segment when nested two levels deep, else `"root"`.
    pub category: String,
}

pub type Skill = Resolved<SkillAttrs>;
pub type Agent = Resolved<AgentAttrs>;
pub type Template = Resolved<TemplateAttrs>;

/// Global and project content of one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDiff {
    pub global_content: Option<String>,
    pub project_content: Option<String>,
}
