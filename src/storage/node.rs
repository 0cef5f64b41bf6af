//! Filesystem nodes
//!
//! The in-memory form of the partition document: a tree of directories
//! and files. The JSON layout is fixed. Directories serialize as
//! `{"type": "directory", "content": {...}}` and files as
//! `{"type": "file", "owner", "group", "permissions", "content"}`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::storage::permissions::Permissions;

/// One node of the virtual filesystem tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Directory {
        content: BTreeMap<String, Node>,
    },
    File {
        owner: String,
        group: String,
        permissions: Permissions,
        content: String,
    },
}

impl Node {
    /// An empty directory.
    pub fn directory() -> Self {
        Node::Directory {
            content: BTreeMap::new(),
        }
    }

    /// A file with the given metadata and content.
    pub fn file(
        owner: impl Into<String>,
        group: impl Into<String>,
        permissions: Permissions,
        content: impl Into<String>,
    ) -> Self {
        Node::File {
            owner: owner.into(),
            group: group.into(),
            permissions,
            content: content.into(),
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Node::File { .. })
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Node::Directory { .. })
    }

    /// The children map, if this node is a directory.
    pub fn children(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Directory { content } => Some(content),
            Node::File { .. } => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut BTreeMap<String, Node>> {
        match self {
            Node::Directory { content } => Some(content),
            Node::File { .. } => None,
        }
    }
}

/// The persisted document: the whole tree under one `filesystem.root` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionDocument {
    pub filesystem: FilesystemRoot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesystemRoot {
    pub root: Node,
}

impl PartitionDocument {
    pub fn new(root: Node) -> Self {
        PartitionDocument {
            filesystem: FilesystemRoot { root },
        }
    }
}
