//! Core types and traits for mirrorsync.
//!
//! This crate provides the data structures shared by the mirroring engine:
//! directory entries, content hashes, sync events and their sink, errors,
//! and the mirror configuration.

mod config;
mod error;
mod event;
mod node;

pub use config::{
    DEFAULT_TIMESTAMP_FORMAT, MirrorConfig, MirrorConfigBuilder, NameMatching,
    is_valid_timestamp_format,
};
pub use error::SyncError;
pub use event::{EventSink, Fault, SyncEvent, SyncEventKind};
pub use node::{ContentHash, DirectoryEntry, FileEntry};
