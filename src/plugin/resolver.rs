//! Static resource resolution.
//!
//! Turns a plugin's declared resources of one kind into an ordered list of
//! [`Resource`]s, checking packaged entries against the static tree under
//! `<static_root>/<plugin>/<kind>/`.
//!
//! - No declaration (or an empty one): every packaged file of that kind.
//! - Only external entries: returned as declared; the tree is not consulted.
//! - A wildcard (`*`) entry: every packaged file, plus any external entries.
//!   Explicit packaged entries next to the wildcard must still exist but are
//!   not repeated.
//! - Otherwise: the declared entries in declared order. Every packaged entry
//!   must exist or resolution fails with [`PluginError::MissingResource`].

use std::collections::HashSet;
use std::path::Path;

use walkdir::WalkDir;

use super::{is_external, AssetLayout, PluginError, PluginResult, Resource, ResourceKind, WILDCARD};

/// Resolve the declared resources of `kind` for plugin `plugin`.
pub fn resolve(
    layout: &AssetLayout,
    plugin: &str,
    kind: ResourceKind,
    declared: &[String],
) -> PluginResult<Vec<Resource>> {
    let root = format!("{plugin}/{}", kind.dir_name());

    let mut wildcard = false;
    let mut internal: Vec<String> = Vec::new();
    let mut external: Vec<String> = Vec::new();
    for entry in declared {
        if is_external(entry) {
            push_unique(&mut external, entry.clone());
        } else if entry.trim() == WILDCARD {
            wildcard = true;
        } else {
            push_unique(&mut internal, normalize_entry(entry));
        }
    }

    if !declared.is_empty() && !wildcard && internal.is_empty() {
        tracing::debug!(plugin, kind = %kind, count = external.len(), "Resolved external resources");
        return Ok(external.into_iter().map(Resource::External).collect());
    }

    let discovered = discover(&layout.static_root, &root)?;
    let available: HashSet<&str> = discovered.iter().map(String::as_str).collect();

    let mut missing: Vec<String> = internal
        .iter()
        .filter(|entry| !available.contains(format!("{root}/{entry}").as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(PluginError::MissingResource { kind, root, missing });
    }

    let resources: Vec<Resource> = if wildcard || internal.is_empty() {
        discovered
            .into_iter()
            .map(Resource::Packaged)
            .chain(external.into_iter().map(Resource::External))
            .collect()
    } else {
        let mut seen = HashSet::new();
        declared
            .iter()
            .map(|entry| {
                if is_external(entry) {
                    Resource::External(entry.clone())
                } else {
                    Resource::Packaged(format!("{root}/{}", normalize_entry(entry)))
                }
            })
            .filter(|resource| seen.insert(resource.clone()))
            .collect()
    };

    tracing::debug!(plugin, kind = %kind, count = resources.len(), "Resolved resources");

    Ok(resources)
}

/// List every file under `<static_root>/<root>`, as `/`-separated paths
/// relative to the static root, in file-name order.
pub fn discover(static_root: &Path, root: &str) -> PluginResult<Vec<String>> {
    let dir = root.split('/').fold(static_root.to_path_buf(), |p, s| p.join(s));
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(static_root) else {
            continue;
        };

        let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
        match parts {
            Some(parts) => files.push(parts.join("/")),
            None => tracing::warn!(path = ?entry.path(), "Skipping static resource with a non-UTF-8 name"),
        }
    }

    Ok(files)
}

fn normalize_entry(entry: &str) -> String {
    let entry = entry.trim().replace('\\', "/");
    entry.trim_start_matches("./").trim_start_matches('/').to_string()
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}
