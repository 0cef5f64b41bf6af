//! Storage module
//!
//! The JSON-persisted virtual filesystem: nodes, paths, permissions,
//! and the store that keeps the partition on disk.

pub mod filesystem;
pub mod node;
pub mod path;
pub mod permissions;
pub mod store;
pub mod validation;

pub use filesystem::{DirEntry, EntryKind, FileContent, FileView, Filesystem};
pub use node::{FilesystemRoot, Node, PartitionDocument};
pub use permissions::{DEFAULT_FILE_MODE, PUBLIC_FILE_MODE, Permissions, USER_FILE_MODE, can_read, can_write};
pub use store::{JsonFileStore, MemoryStore, PartitionStore};
