//! Virtual filesystem
//!
//! The partition tree bound to its store. Every mutation is flushed to
//! the store before it returns, so the in-memory tree and the persisted
//! document never drift apart.

use log::{debug, warn};

use crate::error::FsError;
use crate::kernel::Identity;
use crate::storage::node::{Node, PartitionDocument};
use crate::storage::path;
use crate::storage::permissions::{self, DEFAULT_FILE_MODE, Permissions};
use crate::storage::store::PartitionStore;
use crate::storage::validation::validate_node_name;

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryKind {
    Directory,
    File {
        owner: String,
        group: String,
        permissions: Permissions,
    },
}

impl DirEntry {
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }
}

/// A file as seen by a particular requester. Metadata is always
/// visible; the content collapses to [`FileContent::Denied`] when the
/// requester holds no read permission.
#[derive(Debug, Clone, PartialEq)]
pub struct FileView {
    pub owner: String,
    pub group: String,
    pub permissions: Permissions,
    pub content: FileContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileContent {
    Text(String),
    Denied,
}

/// The virtual filesystem over one partition document.
pub struct Filesystem {
    root: Node,
    store: Box<dyn PartitionStore>,
}

impl Filesystem {
    /// Loads the partition from the store and wraps it.
    pub fn open(store: Box<dyn PartitionStore>) -> Result<Self, FsError> {
        let document = store.load()?;
        let root = document.filesystem.root;
        if !root.is_directory() {
            return Err(FsError::Storage(
                "partition root is not a directory".to_string(),
            ));
        }
        Ok(Filesystem { root, store })
    }

    /// Whether any node exists at the given path.
    pub fn exists(&self, parts: &[String]) -> bool {
        path::resolve(&self.root, parts).is_ok()
    }

    /// Whether the path names an existing directory.
    pub fn directory_exists(&self, parts: &[String]) -> bool {
        matches!(path::resolve(&self.root, parts), Ok(node) if node.is_directory())
    }

    /// Names of the children of a directory.
    pub fn list_children(&self, parts: &[String]) -> Result<Vec<String>, FsError> {
        let node = path::resolve(&self.root, parts)?;
        let children = node
            .children()
            .ok_or_else(|| FsError::NotADirectory(path::join(parts)))?;
        Ok(children.keys().cloned().collect())
    }

    /// Full listing of a directory. Listings are never permission
    /// gated, only file content is.
    pub fn entries(&self, parts: &[String]) -> Result<Vec<DirEntry>, FsError> {
        let node = path::resolve(&self.root, parts)?;
        let children = node
            .children()
            .ok_or_else(|| FsError::NotADirectory(path::join(parts)))?;
        Ok(children
            .iter()
            .map(|(name, child)| DirEntry {
                name: name.clone(),
                kind: match child {
                    Node::Directory { .. } => EntryKind::Directory,
                    Node::File {
                        owner,
                        group,
                        permissions,
                        ..
                    } => EntryKind::File {
                        owner: owner.clone(),
                        group: group.clone(),
                        permissions: *permissions,
                    },
                },
            })
            .collect())
    }

    /// Reads a file on behalf of the requester. A requester without
    /// read permission still gets the metadata, with the content
    /// replaced by [`FileContent::Denied`].
    pub fn read_file(&self, parts: &[String], requester: &Identity) -> Result<FileView, FsError> {
        let node = path::resolve(&self.root, parts)?;
        match node {
            Node::Directory { .. } => Err(FsError::NotAFile(path::join(parts))),
            Node::File {
                owner,
                group,
                permissions,
                content,
            } => {
                let readable = permissions::can_read(owner, group, *permissions, requester);
                if !readable {
                    debug!(
                        "Read denied on {} for user '{}'",
                        path::join(parts),
                        requester.username()
                    );
                }
                Ok(FileView {
                    owner: owner.clone(),
                    group: group.clone(),
                    permissions: *permissions,
                    content: if readable {
                        FileContent::Text(content.clone())
                    } else {
                        FileContent::Denied
                    },
                })
            }
        }
    }

    /// Writes `text` to the path. An existing writable file is
    /// replaced; a missing file is created with the default mode and
    /// the requester as owner. A write the requester is not permitted
    /// to make is dropped without an error, and the partition is
    /// flushed either way.
    pub fn write_file(
        &mut self,
        parts: &[String],
        text: &str,
        requester: &Identity,
    ) -> Result<(), FsError> {
        let (name, parent_parts) = parts
            .split_last()
            .ok_or_else(|| FsError::NotAFile("/".to_string()))?;

        {
            let parent = path::resolve_mut(&mut self.root, parent_parts)?;
            let children = parent
                .children_mut()
                .ok_or_else(|| FsError::NotADirectory(path::join(parent_parts)))?;

            match children.get_mut(name) {
                Some(Node::Directory { .. }) => {
                    return Err(FsError::NotAFile(path::join(parts)));
                }
                Some(Node::File {
                    owner,
                    group,
                    permissions,
                    content,
                }) => {
                    if permissions::can_write(owner, group, *permissions, requester) {
                        *content = text.to_string();
                        debug!(
                            "User '{}' wrote {} bytes to {}",
                            requester.username(),
                            text.len(),
                            path::join(parts)
                        );
                    } else {
                        // TODO: return PermissionDenied here once the shell
                        // reports write failures per command.
                        warn!(
                            "Write denied on {} for user '{}', content left unchanged",
                            path::join(parts),
                            requester.username()
                        );
                    }
                }
                None => {
                    validate_node_name(name)?;
                    children.insert(
                        name.clone(),
                        Node::file(
                            requester.username(),
                            requester.primary_group(),
                            DEFAULT_FILE_MODE,
                            text,
                        ),
                    );
                    debug!(
                        "User '{}' created {} via write",
                        requester.username(),
                        path::join(parts)
                    );
                }
            }
        }
        self.flush()
    }

    /// Creates a file under `parent_parts`, owned by the requester and
    /// carrying their primary group.
    pub fn create_file(
        &mut self,
        parent_parts: &[String],
        name: &str,
        permissions: Permissions,
        content: &str,
        requester: &Identity,
    ) -> Result<(), FsError> {
        validate_node_name(name)?;

        {
            let parent = path::resolve_mut(&mut self.root, parent_parts)?;
            let children = parent
                .children_mut()
                .ok_or_else(|| FsError::NotADirectory(path::join(parent_parts)))?;
            if children.contains_key(name) {
                return Err(FsError::AlreadyExists(child_path(parent_parts, name)));
            }
            children.insert(
                name.to_string(),
                Node::file(
                    requester.username(),
                    requester.primary_group(),
                    permissions,
                    content,
                ),
            );
        }
        debug!(
            "User '{}' created file {} ({})",
            requester.username(),
            child_path(parent_parts, name),
            permissions
        );
        self.flush()
    }

    /// Creates an empty directory. Directories carry no ownership, so
    /// creation is not permission gated.
    pub fn create_directory(&mut self, parent_parts: &[String], name: &str) -> Result<(), FsError> {
        validate_node_name(name)?;

        {
            let parent = path::resolve_mut(&mut self.root, parent_parts)?;
            let children = parent
                .children_mut()
                .ok_or_else(|| FsError::NotADirectory(path::join(parent_parts)))?;
            if children.contains_key(name) {
                return Err(FsError::AlreadyExists(child_path(parent_parts, name)));
            }
            children.insert(name.to_string(), Node::directory());
        }
        debug!("Created directory {}", child_path(parent_parts, name));
        self.flush()
    }

    /// Removes a file the requester may write. Directories are never
    /// writable through this call, so they come back as denied.
    pub fn remove_file(&mut self, parts: &[String], requester: &Identity) -> Result<(), FsError> {
        let (name, parent_parts) = parts
            .split_last()
            .ok_or_else(|| FsError::PermissionDenied("/".to_string()))?;

        {
            let parent = path::resolve_mut(&mut self.root, parent_parts)?;
            let children = parent
                .children_mut()
                .ok_or_else(|| FsError::NotADirectory(path::join(parent_parts)))?;
            let node = children
                .get(name)
                .ok_or_else(|| FsError::NotFound(path::join(parts)))?;

            let allowed = match node {
                Node::File {
                    owner,
                    group,
                    permissions,
                    ..
                } => permissions::can_write(owner, group, *permissions, requester),
                Node::Directory { .. } => false,
            };
            if !allowed {
                warn!(
                    "Remove denied on {} for user '{}'",
                    path::join(parts),
                    requester.username()
                );
                return Err(FsError::PermissionDenied(path::join(parts)));
            }
            children.remove(name);
        }
        debug!(
            "User '{}' removed {}",
            requester.username(),
            path::join(parts)
        );
        self.flush()
    }

    /// Removes an empty directory.
    pub fn remove_directory(&mut self, parts: &[String]) -> Result<(), FsError> {
        let (name, parent_parts) = parts.split_last().ok_or_else(|| {
            FsError::InvalidArgument("cannot remove the root directory".to_string())
        })?;

        {
            let parent = path::resolve_mut(&mut self.root, parent_parts)?;
            let children = parent
                .children_mut()
                .ok_or_else(|| FsError::NotADirectory(path::join(parent_parts)))?;
            let node = children
                .get(name)
                .ok_or_else(|| FsError::NotFound(path::join(parts)))?;

            match node {
                Node::File { .. } => return Err(FsError::NotADirectory(path::join(parts))),
                Node::Directory { content } => {
                    if !content.is_empty() {
                        return Err(FsError::NotEmpty(path::join(parts)));
                    }
                }
            }
            children.remove(name);
        }
        debug!("Removed directory {}", path::join(parts));
        self.flush()
    }

    /// Replaces the mode of a file. Only the owner may do this, root
    /// included.
    pub fn change_permissions(
        &mut self,
        parts: &[String],
        mode: Permissions,
        requester: &Identity,
    ) -> Result<(), FsError> {
        {
            let node = path::resolve_mut(&mut self.root, parts)?;
            match node {
                Node::Directory { .. } => return Err(FsError::NotAFile(path::join(parts))),
                Node::File {
                    owner, permissions, ..
                } => {
                    if owner != requester.username() {
                        warn!(
                            "Mode change denied on {} for user '{}'",
                            path::join(parts),
                            requester.username()
                        );
                        return Err(FsError::PermissionDenied(path::join(parts)));
                    }
                    *permissions = mode;
                }
            }
        }
        debug!("Mode of {} set to {}", path::join(parts), mode);
        self.flush()
    }

    /// Saves the tree through the store.
    pub fn flush(&self) -> Result<(), FsError> {
        let document = PartitionDocument::new(self.root.clone());
        self.store.save(&document)
    }

    /// Drops the in-memory tree and reads the partition again.
    pub fn reload(&mut self) -> Result<(), FsError> {
        let document = self.store.load()?;
        let root = document.filesystem.root;
        if !root.is_directory() {
            return Err(FsError::Storage(
                "partition root is not a directory".to_string(),
            ));
        }
        self.root = root;
        Ok(())
    }

    /// Raw file content, bypassing permission checks. System records
    /// are read through here no matter who is logged in.
    pub(crate) fn file_content(&self, parts: &[String]) -> Result<&str, FsError> {
        let node = path::resolve(&self.root, parts)?;
        match node {
            Node::File { content, .. } => Ok(content),
            Node::Directory { .. } => Err(FsError::NotAFile(path::join(parts))),
        }
    }

    /// Raw content replacement, bypassing permission checks.
    pub(crate) fn set_file_content(
        &mut self,
        parts: &[String],
        content: String,
    ) -> Result<(), FsError> {
        {
            let node = path::resolve_mut(&mut self.root, parts)?;
            match node {
                Node::File { content: slot, .. } => *slot = content,
                Node::Directory { .. } => return Err(FsError::NotAFile(path::join(parts))),
            }
        }
        self.flush()
    }

    /// Raw node removal, bypassing permission checks.
    pub(crate) fn remove_raw(&mut self, parts: &[String]) -> Result<(), FsError> {
        let (name, parent_parts) = parts
            .split_last()
            .ok_or_else(|| FsError::InvalidPath("/".to_string()))?;
        {
            let parent = path::resolve_mut(&mut self.root, parent_parts)?;
            let children = parent
                .children_mut()
                .ok_or_else(|| FsError::NotADirectory(path::join(parent_parts)))?;
            children
                .remove(name)
                .ok_or_else(|| FsError::NotFound(path::join(parts)))?;
        }
        self.flush()
    }
}

fn child_path(parent: &[String], name: &str) -> String {
    if parent.is_empty() {
        format!("/{}", name)
    } else {
        format!("{}/{}", path::join(parent), name)
    }
}
