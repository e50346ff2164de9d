//! Content comparison using full-file BLAKE3 digests.
//!
//! Two files are equal iff the digests of their complete byte content match.
//! Size and modification time are never consulted, and nothing is cached:
//! every comparison re-reads both files in full.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use blake3::Hasher;

use mirrorsync_core::{ContentHash, SyncError};

/// Read buffer size for hashing.
const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// Decides whether two files hold identical content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentComparator;

impl ContentComparator {
    /// Create a new comparator.
    pub fn new() -> Self {
        Self
    }

    /// Compare the full content of two files.
    ///
    /// An unreadable file is an error, not a difference.
    pub fn equal(&self, a: &Path, b: &Path) -> Result<bool, SyncError> {
        Ok(self.digest(a)? == self.digest(b)?)
    }

    /// Compute the BLAKE3 digest of a file's full content.
    pub fn digest(&self, path: &Path) -> Result<ContentHash, SyncError> {
        let mut file = File::open(path).map_err(|e| SyncError::io(path, e))?;
        let mut hasher = Hasher::new();
        let mut buffer = vec![0u8; HASH_BUFFER_SIZE];

        loop {
            let bytes_read = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(SyncError::io(path, e)),
            };
            hasher.update(&buffer[..bytes_read]);
        }

        let hash = ContentHash::new(*hasher.finalize().as_bytes());
        tracing::trace!(path = %path.display(), hash = %hash.to_hex(), "digest");
        Ok(hash)
    }
}
