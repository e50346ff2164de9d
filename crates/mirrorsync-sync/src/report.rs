//! Per-cycle outcome summary.

use std::path::PathBuf;

use mirrorsync_core::SyncEventKind;

/// A directory node whose processing stopped on a fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFault {
    /// Source path of the faulted node.
    pub scope: PathBuf,
    /// Rendered fault message.
    pub message: String,
}

/// Summary of one reconcile cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Directory nodes visited.
    pub nodes_visited: u64,
    /// Files copied over the replica.
    pub files_copied: u64,
    /// Replica files deleted.
    pub files_deleted: u64,
    /// Replica directories created.
    pub directories_created: u64,
    /// Replica directory trees deleted.
    pub directories_deleted: u64,
    /// Bytes written by copies.
    pub bytes_copied: u64,
    /// Nodes that faulted, in emission order.
    pub faults: Vec<NodeFault>,
}

impl CycleReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally one emitted event.
    pub fn record(&mut self, event: &SyncEventKind) {
        match event {
            SyncEventKind::FileCopied { .. } => self.files_copied += 1,
            SyncEventKind::FileDeleted { .. } => self.files_deleted += 1,
            SyncEventKind::DirectoryCreated { .. } => self.directories_created += 1,
            SyncEventKind::DirectoryDeleted { .. } => self.directories_deleted += 1,
            SyncEventKind::Fault { scope, .. } => self.faults.push(NodeFault {
                scope: scope.clone(),
                message: event.to_string(),
            }),
        }
    }

    /// Number of mutations applied to the replica.
    pub fn changes(&self) -> u64 {
        self.files_copied + self.files_deleted + self.directories_created + self.directories_deleted
    }

    /// Total number of events emitted, faults included.
    pub fn event_count(&self) -> u64 {
        self.changes() + self.faults.len() as u64
    }

    /// Check whether the cycle finished without any fault.
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }

    /// Get a human-readable one-line summary.
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} copied, {} deleted, {} directories created, {} directories deleted",
            self.files_copied,
            self.files_deleted,
            self.directories_created,
            self.directories_deleted
        );
        if !self.is_clean() {
            summary.push_str(&format!(", {} faulted", self.faults.len()));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_tallies_events() {
        let mut report = CycleReport::new();
        report.record(&SyncEventKind::copied("/s/a", "/r/a"));
        report.record(&SyncEventKind::copied("/s/b", "/r/b"));
        report.record(&SyncEventKind::FileDeleted { path: "/r/c".into() });
        report.record(&SyncEventKind::source_missing("/s/gone"));

        assert_eq!(report.files_copied, 2);
        assert_eq!(report.files_deleted, 1);
        assert_eq!(report.changes(), 3);
        assert_eq!(report.event_count(), 4);
        assert!(!report.is_clean());
        assert_eq!(report.faults[0].scope, PathBuf::from("/s/gone"));
        assert_eq!(
            report.faults[0].message,
            "Source directory does not exist: /s/gone"
        );
    }

    #[test]
    fn test_report_summary() {
        let mut report = CycleReport::new();
        assert_eq!(
            report.summary(),
            "0 copied, 0 deleted, 0 directories created, 0 directories deleted"
        );

        report.record(&SyncEventKind::io_fault("/s", "boom"));
        assert!(report.summary().ends_with(", 1 faulted"));
    }
}
