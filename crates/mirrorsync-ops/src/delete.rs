//! File and directory-tree deletion.

use std::fs;
use std::path::Path;

use mirrorsync_core::SyncError;

/// Delete a single file. Fails if `path` is a directory.
pub fn delete_file(path: &Path) -> Result<(), SyncError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| SyncError::io(path, e))?;
    if metadata.is_dir() {
        return Err(SyncError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    fs::remove_file(path).map_err(|e| SyncError::io(path, e))
}

/// Delete a directory and everything beneath it.
///
/// Fails on the first entry that cannot be removed; entries removed before
/// that point stay removed.
pub fn delete_directory(path: &Path) -> Result<(), SyncError> {
    fs::remove_dir_all(path).map_err(|e| SyncError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_delete_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.txt");
        fs::write(&path, "x").unwrap();

        delete_file(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_delete_file_rejects_directory() {
        let temp = TempDir::new().unwrap();
        let err = delete_file(temp.path()).unwrap_err();
        assert!(matches!(err, SyncError::NotAFile { .. }));
        assert!(temp.path().is_dir());
    }

    #[test]
    fn test_delete_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let err = delete_file(&temp.path().join("nope")).unwrap_err();
        assert!(matches!(err, SyncError::NotFound { .. }));
    }

    #[test]
    fn test_delete_directory_removes_subtree() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("d");
        fs::create_dir_all(root.join("x/y")).unwrap();
        fs::write(root.join("x/y/file.txt"), "deep").unwrap();
        fs::write(root.join("top.txt"), "top").unwrap();

        delete_directory(&root).unwrap();
        assert!(!root.exists());
    }
}
