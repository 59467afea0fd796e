//! Stable, path-derived identifiers for project tree nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::project_tree::FileNode;

/// Stable identifier of a tree node, derived from its full path.
///
/// Ids are path-qualified rather than name-qualified, so two `index.js` files
/// in different folders never collide. The codec does not check that the path
/// exists in any tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn for_path(path: &str) -> Self {
        Self(normalize_path(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn id_for(file: &FileNode) -> NodeId {
    NodeId::for_path(&file.path)
}

/// Canonical slash form: no leading `./` or `/`, no empty or `.` segments.
pub fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for segment in path.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(segment);
    }
    out
}

/// Splits a normalized path into its parent directory (if any) and leaf name.
pub fn split_parent(path: &str) -> (Option<&str>, &str) {
    match path.rsplit_once('/') {
        Some((dir, leaf)) if !dir.is_empty() => (Some(dir), leaf),
        Some((_, leaf)) => (None, leaf),
        None => (None, path),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/node_id.rs"]
mod tests;
