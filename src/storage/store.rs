//! Partition persistence
//!
//! Loading and saving the partition document. The on-disk format is a
//! single pretty-printed JSON file; saves go through a temp file and a
//! rename so a crash mid-write never truncates the partition.

use log::{debug, info};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::FsError;
use crate::storage::node::PartitionDocument;

/// Backing storage for a partition document.
pub trait PartitionStore {
    fn load(&self) -> Result<PartitionDocument, FsError>;
    fn save(&self, document: &PartitionDocument) -> Result<(), FsError>;
}

/// JSON file on the host filesystem.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a partition file already exists at this path.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl PartitionStore for JsonFileStore {
    fn load(&self) -> Result<PartitionDocument, FsError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            FsError::Storage(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        let document: PartitionDocument = serde_json::from_str(&raw).map_err(|e| {
            FsError::Storage(format!("failed to parse {}: {}", self.path.display(), e))
        })?;
        debug!("Loaded partition from {}", self.path.display());
        Ok(document)
    }

    fn save(&self, document: &PartitionDocument) -> Result<(), FsError> {
        let raw = serde_json::to_string_pretty(document)
            .map_err(|e| FsError::Storage(format!("failed to serialize partition: {}", e)))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw).map_err(|e| {
            FsError::Storage(format!("failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            FsError::Storage(format!(
                "failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })?;

        info!("Partition saved to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store used by tests. Clones share the same document, so a
/// fresh [`Filesystem`](crate::storage::Filesystem) can be opened over
/// whatever an earlier one saved.
#[derive(Clone)]
pub struct MemoryStore {
    document: Rc<RefCell<PartitionDocument>>,
}

impl MemoryStore {
    pub fn new(document: PartitionDocument) -> Self {
        MemoryStore {
            document: Rc::new(RefCell::new(document)),
        }
    }
}

impl PartitionStore for MemoryStore {
    fn load(&self) -> Result<PartitionDocument, FsError> {
        Ok(self.document.borrow().clone())
    }

    fn save(&self, document: &PartitionDocument) -> Result<(), FsError> {
        *self.document.borrow_mut() = document.clone();
        Ok(())
    }
}
