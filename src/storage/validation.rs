//! Name validation
//!
//! Checks applied to node names before they enter the tree.

use crate::error::FsError;

const MAX_NAME_LENGTH: usize = 255;

/// Validates a single node name (one path component, not a full path).
pub fn validate_node_name(name: &str) -> Result<(), FsError> {
    if name.is_empty() {
        return Err(FsError::InvalidArgument("name is empty".to_string()));
    }
    if name.contains('/') {
        return Err(FsError::InvalidArgument(format!(
            "name contains '/': {}",
            name
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(FsError::InvalidArgument(format!(
            "name contains control characters: {}",
            name
        )));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(FsError::InvalidArgument(format!(
            "name exceeds {} bytes",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}
