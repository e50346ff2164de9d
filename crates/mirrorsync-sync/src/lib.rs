//! Reconciliation engine for mirrorsync.
//!
//! This crate makes a replica directory tree mirror a source tree:
//!
//! - **Content comparison** - full-file BLAKE3 digests, no metadata shortcuts
//! - **Directory listing** - fresh one-level enumeration with name matching
//! - **Cycle detection** - directory identities along each walk path
//! - **Reconciliation** - worklist-driven tree diff with per-directory fault isolation
//!
//! ```rust,ignore
//! use mirrorsync_core::SyncEvent;
//! use mirrorsync_sync::Reconciler;
//!
//! let mut events: Vec<SyncEvent> = Vec::new();
//! let report = Reconciler::new().reconcile(
//!     "/data".as_ref(),
//!     "/backup/data".as_ref(),
//!     &mut events,
//! );
//!
//! for event in &events {
//!     println!("{}", event.message());
//! }
//! println!("{}", report.summary());
//! ```
//!
//! Within one directory, file copies happen before file deletions, and both
//! happen before any subdirectory is visited or deleted. A fault stops only
//! the directory it occurred in; siblings and ancestors carry on.

mod compare;
mod identity;
mod listing;
mod reconcile;
mod report;

pub use compare::ContentComparator;
pub use listing::DirectoryListing;
pub use reconcile::Reconciler;
pub use report::{CycleReport, NodeFault};

// Re-export core types
pub use mirrorsync_core::{
    EventSink, MirrorConfig, NameMatching, SyncError, SyncEvent, SyncEventKind,
};
