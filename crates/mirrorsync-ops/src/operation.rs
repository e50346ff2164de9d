//! Mirror operation types and the mutator that applies them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use mirrorsync_core::{SyncError, SyncEventKind};

use crate::{copy_overwrite, create_directory, delete_directory, delete_file};

/// A primitive mutation of the replica tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MirrorOperation {
    /// Copy a file over its replica counterpart.
    CopyFile {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Delete a single replica file.
    DeleteFile { path: PathBuf },
    /// Create a replica directory (and missing parents).
    CreateDirectory { path: PathBuf },
    /// Delete a replica directory and its whole subtree.
    DeleteDirectory { path: PathBuf },
}

impl MirrorOperation {
    /// Create a copy operation.
    pub fn copy(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self::CopyFile {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Create a file deletion operation.
    pub fn delete_file(path: impl Into<PathBuf>) -> Self {
        Self::DeleteFile { path: path.into() }
    }

    /// Create a directory creation operation.
    pub fn create_directory(path: impl Into<PathBuf>) -> Self {
        Self::CreateDirectory { path: path.into() }
    }

    /// Create a directory deletion operation.
    pub fn delete_directory(path: impl Into<PathBuf>) -> Self {
        Self::DeleteDirectory { path: path.into() }
    }
}

/// Result of a successfully applied operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    /// Event describing what was done.
    pub event: SyncEventKind,
    /// Bytes written (copies only).
    pub bytes: u64,
}

/// Applies mirror operations to the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mutator;

impl Mutator {
    /// Create a new mutator.
    pub fn new() -> Self {
        Self
    }

    /// Apply one operation and report it as an event.
    pub fn apply(&self, operation: MirrorOperation) -> Result<OperationOutcome, SyncError> {
        tracing::trace!(?operation, "applying");

        let (event, bytes) = match operation {
            MirrorOperation::CopyFile {
                source,
                destination,
            } => {
                let bytes = copy_overwrite(&source, &destination)?;
                (
                    SyncEventKind::FileCopied {
                        source,
                        destination,
                    },
                    bytes,
                )
            }
            MirrorOperation::DeleteFile { path } => {
                delete_file(&path)?;
                (SyncEventKind::FileDeleted { path }, 0)
            }
            MirrorOperation::CreateDirectory { path } => {
                create_directory(&path)?;
                (SyncEventKind::DirectoryCreated { path }, 0)
            }
            MirrorOperation::DeleteDirectory { path } => {
                delete_directory(&path)?;
                (SyncEventKind::DirectoryDeleted { path }, 0)
            }
        };

        Ok(OperationOutcome { event, bytes })
    }
}
