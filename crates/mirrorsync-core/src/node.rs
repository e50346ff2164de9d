//! File and directory entry types.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// BLAKE3 content hash used for file comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub [u8; 32]);

impl ContentHash {
    /// Create a new ContentHash from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the hash as a hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// A plain file found while listing a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// File name (not full path), unique within its parent.
    pub name: OsString,
    /// Full path of the file.
    pub path: PathBuf,
    /// Size in bytes at listing time.
    pub len: u64,
}

impl FileEntry {
    /// Create a new file entry.
    pub fn new(name: impl Into<OsString>, path: impl Into<PathBuf>, len: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            len,
        }
    }

    /// File name as an `OsStr`.
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Full path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A directory found while listing its parent.
///
/// Children are never stored here; they are enumerated fresh each time the
/// directory is visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Directory name (not full path).
    pub name: OsString,
    /// Full path of the directory.
    pub path: PathBuf,
}

impl DirectoryEntry {
    /// Create a new directory entry.
    pub fn new(name: impl Into<OsString>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Directory name as an `OsStr`.
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Full path of the directory.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_hex() {
        let hash = ContentHash::new([0xab; 32]);
        assert_eq!(hash.to_hex().len(), 64);
        assert!(hash.to_hex().starts_with("abab"));
    }

    #[test]
    fn test_file_entry_creation() {
        let entry = FileEntry::new("a.txt", "/src/a.txt", 2);
        assert_eq!(entry.name(), OsStr::new("a.txt"));
        assert_eq!(entry.path(), Path::new("/src/a.txt"));
        assert_eq!(entry.len, 2);
    }

    #[test]
    fn test_directory_entry_creation() {
        let entry = DirectoryEntry::new("sub", "/src/sub");
        assert_eq!(entry.name(), OsStr::new("sub"));
        assert_eq!(entry.path(), Path::new("/src/sub"));
    }
}
