//! Handlers for `aosm skills` and `aosm agents`.

use crate::cli::{OutputFormat, ResourceAction};
use anyhow::{anyhow, Result};
use aosm_store::{AgentAttrs, Layer, LayeredStore, Resolved, SkillAttrs, TemplateAttrs};
use serde_json::json;
use std::path::Path;

use super::diff::print_resource_diff;
use super::{print_json, read_content};

/// One-line text summary of a resource's kind-specific attributes.
pub(crate) trait Summary {
    fn summary(&self) -> String;
}

impl Summary for SkillAttrs {
    fn summary(&self) -> String {
        format!("{} [{}]", self.description, self.globs.join(", "))
    }
}

impl Summary for AgentAttrs {
    fn summary(&self) -> String {
        match &self.tools {
            Some(tools) if !tools.is_empty() => {
                format!("{} (tools: {})", self.description, tools.join(", "))
            }
            _ => self.description.clone(),
        }
    }
}

impl Summary for TemplateAttrs {
    fn summary(&self) -> String {
        format!("{}/{}", self.system, self.category)
    }
}

/// Handle `aosm skills ...` and `aosm agents ...`.
pub(crate) fn handle_resource_command<L>(
    store: &LayeredStore<L>,
    action: ResourceAction,
    format: OutputFormat,
) -> Result<()>
where
    L: Layer,
    L::Attrs: Summary,
{
    let kind = store.kind();
    match action {
        ResourceAction::List => print_listing(&store.list(), format),
        ResourceAction::Show { name } => {
            let resource = store
                .read(&name)
                .ok_or_else(|| anyhow!("{kind} '{name}' not found"))?;
            print_resource(&resource, format)
        }
        ResourceAction::Write { name, file } => {
            let content = read_content(&file)?;
            let path = store.write(&name, &content)?;
            print_mutation("wrote", &path, format)
        }
        ResourceAction::Delete { name } => {
            let path = store.delete(&name)?;
            print_mutation("deleted", &path, format)
        }
        ResourceAction::Override { name } => {
            let path = store.override_global(&name)?;
            print_mutation("overrode", &path, format)
        }
        ResourceAction::Revert { name } => {
            let path = store.revert(&name)?;
            print_mutation("reverted", &path, format)
        }
        ResourceAction::Diff { name, context } => {
            print_resource_diff(kind, &name, store.diff(&name)?, format, context)
        }
    }
}

/// Prints a merged listing, one entry per line in text mode.
pub(crate) fn print_listing<A>(resources: &[Resolved<A>], format: OutputFormat) -> Result<()>
where
    A: serde::Serialize + Summary,
{
    if format.is_json() {
        return print_json(resources);
    }
    if resources.is_empty() {
        println!("No entries found.");
        return Ok(());
    }
    for resource in resources {
        let marker = if resource.shadowed_global_path.is_some() {
            "*"
        } else {
            " "
        };
        println!(
            "{marker}{:<8} {:<28} {}",
            resource.scope.label(),
            resource.name,
            resource.attrs.summary()
        );
    }
    Ok(())
}

/// Prints a single resource: metadata then its full content.
pub(crate) fn print_resource<A>(resource: &Resolved<A>, format: OutputFormat) -> Result<()>
where
    A: serde::Serialize + Summary,
{
    if format.is_json() {
        return print_json(resource);
    }
    println!("name:   {}", resource.name);
    println!("scope:  {}", resource.scope);
    println!("path:   {}", resource.resolved_path.display());
    if let Some(shadowed) = &resource.shadowed_global_path {
        println!("shadows {}", shadowed.display());
    }
    println!("{}", resource.attrs.summary());
    println!();
    print!("{}", resource.content);
    if !resource.content.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Reports the file a mutation wrote or removed.
pub(crate) fn print_mutation(verb: &str, path: &Path, format: OutputFormat) -> Result<()> {
    if format.is_json() {
        return print_json(&json!({ "path": path }));
    }
    println!("{verb} {}", path.display());
    Ok(())
}
