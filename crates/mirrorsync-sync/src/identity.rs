//! Directory identity for cycle detection.

use std::fs;
use std::path::Path;
#[cfg(not(unix))]
use std::path::PathBuf;

use mirrorsync_core::SyncError;

/// Identity of a directory on disk, independent of the path used to reach it.
///
/// On unix this is the (device, inode) pair; elsewhere the canonical path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct DirectoryId {
    #[cfg(unix)]
    device: u64,
    #[cfg(unix)]
    inode: u64,
    #[cfg(not(unix))]
    canonical: PathBuf,
}

impl DirectoryId {
    /// Resolve the identity of the directory at `path`, following links.
    #[cfg(unix)]
    pub(crate) fn of(path: &Path) -> Result<Self, SyncError> {
        use std::os::unix::fs::MetadataExt;

        let metadata = fs::metadata(path).map_err(|e| SyncError::io(path, e))?;
        Ok(Self {
            device: metadata.dev(),
            inode: metadata.ino(),
        })
    }

    /// Resolve the identity of the directory at `path`, following links.
    #[cfg(not(unix))]
    pub(crate) fn of(path: &Path) -> Result<Self, SyncError> {
        let canonical = fs::canonicalize(path).map_err(|e| SyncError::io(path, e))?;
        Ok(Self { canonical })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_same_directory_same_id() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("a")).unwrap();
        fs::create_dir(temp.path().join("b")).unwrap();

        let a = DirectoryId::of(&temp.path().join("a")).unwrap();
        assert_eq!(a, DirectoryId::of(&temp.path().join("b/../a")).unwrap());
        assert_ne!(a, DirectoryId::of(&temp.path().join("b")).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_link_shares_target_id() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("link")).unwrap();

        assert_eq!(
            DirectoryId::of(&temp.path().join("real")).unwrap(),
            DirectoryId::of(&temp.path().join("link")).unwrap()
        );
    }

    #[test]
    fn test_missing_directory_is_error() {
        let temp = TempDir::new().unwrap();
        let err = DirectoryId::of(&temp.path().join("gone")).unwrap_err();
        assert!(matches!(err, SyncError::NotFound { .. }));
    }
}
