// src/collect/path_utils.rs

//! Path helpers for turning walked paths into embedded names.

use std::path::{Component, Path};

/// Convert `path` into a string relative to `root`, with forward slashes.
///
/// Returns `None` when `path` is not under `root`, when it is `root` itself,
/// or when any component is not valid UTF-8 (such a name could not be
/// reproduced exactly inside a string literal).
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;

    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => continue,
            _ => return None,
        }
    }

    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// The last segment of a forward-slash relative path.
pub fn file_name_of(relative: &str) -> &str {
    relative.rsplit('/').next().unwrap_or(relative)
}
