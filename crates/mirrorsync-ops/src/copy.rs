//! Copy-overwrite of a single file.

use std::fs;
use std::path::Path;

use mirrorsync_core::SyncError;

/// Copy `source` over `destination`, replacing any existing file.
///
/// Only content is carried over; timestamps are left to the filesystem.
/// Returns the number of bytes written.
pub fn copy_overwrite(source: &Path, destination: &Path) -> Result<u64, SyncError> {
    let metadata = fs::metadata(source).map_err(|e| SyncError::io(source, e))?;
    if !metadata.is_file() {
        return Err(SyncError::NotAFile {
            path: source.to_path_buf(),
        });
    }

    fs::copy(source, destination).map_err(|e| SyncError::io(destination, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_creates_destination() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("a.txt");
        let dst = temp.path().join("b.txt");
        fs::write(&src, "hello").unwrap();

        let bytes = copy_overwrite(&src, &dst).unwrap();

        assert_eq!(bytes, 5);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "hello");
    }

    #[test]
    fn test_copy_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("a.txt");
        let dst = temp.path().join("b.txt");
        fs::write(&src, "new").unwrap();
        fs::write(&dst, "old and longer").unwrap();

        copy_overwrite(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        let err = copy_overwrite(&temp.path().join("nope"), &temp.path().join("dst")).unwrap_err();
        assert!(matches!(err, SyncError::NotFound { .. }));
    }

    #[test]
    fn test_copy_onto_directory_fails() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("a.txt");
        let dst = temp.path().join("taken");
        fs::write(&src, "x").unwrap();
        fs::create_dir(&dst).unwrap();

        assert!(copy_overwrite(&src, &dst).is_err());
        assert!(dst.is_dir());
    }
}
