//! Directory creation.

use std::fs;
use std::path::Path;

use mirrorsync_core::SyncError;

/// Create `path` and any missing parents. Succeeds if it already exists.
pub fn create_directory(path: &Path) -> Result<(), SyncError> {
    fs::create_dir_all(path).map_err(|e| SyncError::io(path, e))
}
