//! Handler for `aosm templates`.

use crate::cli::{OutputFormat, TemplateAction};
use anyhow::{anyhow, Result};
use aosm_store::{ResourceKind, TemplateStore};

use super::diff::print_resource_diff;
use super::read_content;
use super::resources::{print_listing, print_mutation, print_resource};

/// Handle `aosm templates ...`.
pub(crate) fn handle_template_command(
    store: &TemplateStore,
    action: TemplateAction,
    format: OutputFormat,
) -> Result<()> {
    match action {
        TemplateAction::List => print_listing(&store.list(), format),
        TemplateAction::Show { path } => {
            let template = store
                .read(&path)
                .ok_or_else(|| anyhow!("template '{path}' not found"))?;
            print_resource(&template, format)
        }
        TemplateAction::Write { path, file } => {
            let content = read_content(&file)?;
            let written = store.write(&path, &content)?;
            print_mutation("wrote", &written, format)
        }
        TemplateAction::Override { path } => {
            let written = store.override_global(&path)?;
            print_mutation("overrode", &written, format)
        }
        TemplateAction::Diff { path, context } => print_resource_diff(
            ResourceKind::Template,
            &path,
            store.diff(&path)?,
            format,
            context,
        ),
    }
}
