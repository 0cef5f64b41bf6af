//! Path handling
//!
//! Slash-separated path strings parsed into component lists and
//! resolved against the node tree.

use crate::error::FsError;
use crate::storage::node::Node;

/// Splits a path string into its components. Empty segments produced by
/// leading, trailing, or doubled slashes are dropped, so "/home/",
/// "home" and "//home" all parse to `["home"]`.
pub fn parse(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins components back into an absolute path string.
pub fn join(parts: &[String]) -> String {
    format!("/{}", parts.join("/"))
}

/// Walks the tree from `root` down the given components.
pub fn resolve<'a>(root: &'a Node, parts: &[String]) -> Result<&'a Node, FsError> {
    let mut current = root;
    for (depth, part) in parts.iter().enumerate() {
        let children = current
            .children()
            .ok_or_else(|| FsError::InvalidPath(join(&parts[..=depth])))?;
        current = children
            .get(part)
            .ok_or_else(|| FsError::InvalidPath(join(&parts[..=depth])))?;
    }
    Ok(current)
}

/// Mutable variant of [`resolve`].
pub fn resolve_mut<'a>(root: &'a mut Node, parts: &[String]) -> Result<&'a mut Node, FsError> {
    let mut current = root;
    for (depth, part) in parts.iter().enumerate() {
        let children = current
            .children_mut()
            .ok_or_else(|| FsError::InvalidPath(join(&parts[..=depth])))?;
        current = children
            .get_mut(part)
            .ok_or_else(|| FsError::InvalidPath(join(&parts[..=depth])))?;
    }
    Ok(current)
}
