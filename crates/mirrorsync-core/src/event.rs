//! Sync events and the sink that receives them.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A fault contained to one directory node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fault {
    /// The source directory of the node does not exist.
    SourceMissing,
    /// An I/O failure while processing the node.
    Io { message: String },
}

/// What happened, without the time it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncEventKind {
    /// A source file was copied over its replica counterpart.
    FileCopied {
        source: PathBuf,
        destination: PathBuf,
    },
    /// A replica file with no source counterpart was deleted.
    FileDeleted { path: PathBuf },
    /// A replica directory was created.
    DirectoryCreated { path: PathBuf },
    /// A replica directory with no source counterpart was deleted with its subtree.
    DirectoryDeleted { path: PathBuf },
    /// Processing of the node at `scope` failed.
    Fault { scope: PathBuf, fault: Fault },
}

impl SyncEventKind {
    /// Create a copied event.
    pub fn copied(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self::FileCopied {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Create a source-missing fault.
    pub fn source_missing(scope: impl Into<PathBuf>) -> Self {
        Self::Fault {
            scope: scope.into(),
            fault: Fault::SourceMissing,
        }
    }

    /// Create an I/O fault.
    pub fn io_fault(scope: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Fault {
            scope: scope.into(),
            fault: Fault::Io {
                message: message.into(),
            },
        }
    }
}

impl fmt::Display for SyncEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileCopied {
                source,
                destination,
            } => write!(
                f,
                "Copied file: {} to {}",
                source.display(),
                destination.display()
            ),
            Self::FileDeleted { path } => write!(f, "Deleted file: {}", path.display()),
            Self::DirectoryCreated { path } => {
                write!(f, "Created replica directory: {}", path.display())
            }
            Self::DirectoryDeleted { path } => write!(f, "Deleted directory: {}", path.display()),
            Self::Fault {
                scope,
                fault: Fault::SourceMissing,
            } => write!(f, "Source directory does not exist: {}", scope.display()),
            Self::Fault {
                fault: Fault::Io { message },
                ..
            } => write!(f, "Error: {message}"),
        }
    }
}

/// A timestamped event emitted during reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncEvent {
    /// Local time of emission.
    pub timestamp: DateTime<Local>,
    /// What happened.
    pub kind: SyncEventKind,
}

impl SyncEvent {
    /// Stamp an event kind with the current local time.
    pub fn now(kind: SyncEventKind) -> Self {
        Self {
            timestamp: Local::now(),
            kind,
        }
    }

    /// Human-readable message for this event.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Receives events as the reconciler emits them.
pub trait EventSink {
    /// Record one event.
    fn record(&mut self, event: SyncEvent);
}

impl EventSink for Vec<SyncEvent> {
    fn record(&mut self, event: SyncEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: SyncEvent) {
        (**self).record(event);
    }
}
