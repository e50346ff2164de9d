//! Error types for mirroring operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reconciling a directory pair.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Path was expected to be a plain file.
    #[error("Not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl SyncError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_error_io_classifies_kind() {
        let err = SyncError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, SyncError::PermissionDenied { .. }));

        let err = SyncError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, SyncError::NotFound { .. }));

        let err = SyncError::io("/test/path", std::io::Error::other("disk on fire"));
        assert!(matches!(err, SyncError::Io { .. }));
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_sync_error_messages() {
        let err = SyncError::NotAFile {
            path: PathBuf::from("/a/b"),
        };
        assert_eq!(err.to_string(), "Not a file: /a/b");
        assert_eq!(
            SyncError::invalid_config("nope").to_string(),
            "Invalid configuration: nope"
        );
    }
}
