use crate::types::{Candidate, Depth, LayerRoot};
use pathdiff::diff_paths;
use std::path::{Component, Path};
use walkdir::WalkDir;

fn is_markdown(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file()
        && entry
            .path()
            .extension()
            .is_some_and(|ext| ext == "md")
}

/// Returns `path` relative to `root` with `/` separators, or `None` when
/// `path` is not below `root`.
pub fn relative_identity(path: &Path, root: &Path) -> Option<String> {
    let rel = diff_paths(path, root)?;
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?.to_owned()),
            _ => return None,
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Collects markdown files under a single base.
///
/// A missing base yields nothing. Unreadable entries are logged and skipped
/// so one bad directory never hides the rest of the tier. Results are in
/// file-name order within each directory.
pub fn scan_root(layer: &LayerRoot, depth: Depth) -> Vec<Candidate> {
    let root = &layer.root;
    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "resource base missing; skipping");
        return Vec::new();
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(depth.max_depth())
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !is_markdown(&entry) {
            continue;
        }
        let path = entry.into_path();
        let Some(relative) = relative_identity(&path, root) else {
            tracing::warn!(path = %path.display(), "skipping file with non UTF-8 path");
            continue;
        };
        found.push(Candidate {
            path,
            relative,
            root: root.clone(),
            scope: layer.scope,
        });
    }
    found
}

/// Collects markdown files under every base, in the order the bases are given.
pub fn discover(layers: &[LayerRoot], depth: Depth) -> Vec<Candidate> {
    layers
        .iter()
        .flat_map(|layer| scan_root(layer, depth))
        .collect()
}
