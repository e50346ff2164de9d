//! Tree reconciliation.
//!
//! The source and replica trees are walked with an explicit task stack
//! instead of call recursion. Each directory pair produces a `Visit` task
//! (existence checks, file copies, file deletions, scheduling children) and a
//! `Prune` task (deleting replica directories absent from source). `Prune` is
//! pushed below the children so it runs after the whole subtree, giving the
//! same event order as depth-first recursion.
//!
//! Every task returns a `Result`; an error ends that task only and becomes a
//! single fault event scoped to the node's source path.
//!
//! Each `Visit` carries the identities of the source directories above it. A
//! child directory whose identity is already on that chain (reached again
//! through symbolic links) is reported as a cycle and not descended into.

use std::path::{Path, PathBuf};

use mirrorsync_core::{EventSink, MirrorConfig, NameMatching, SyncError, SyncEvent, SyncEventKind};
use mirrorsync_ops::{MirrorOperation, Mutator};

use crate::compare::ContentComparator;
use crate::identity::DirectoryId;
use crate::listing::DirectoryListing;
use crate::report::CycleReport;

/// A source directory and the replica directory mirroring it.
#[derive(Debug, Clone)]
struct NodePair {
    source: PathBuf,
    replica: PathBuf,
}

impl NodePair {
    fn new(source: impl Into<PathBuf>, replica: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            replica: replica.into(),
        }
    }
}

#[derive(Debug)]
enum Task {
    Visit {
        pair: NodePair,
        /// Source directories from the root down to the parent of `pair`.
        ancestors: Vec<DirectoryId>,
    },
    Prune(NodePair),
}

impl Task {
    fn scope(&self) -> &Path {
        match self {
            Task::Visit { pair, .. } | Task::Prune(pair) => &pair.source,
        }
    }
}

/// Event emission plus tally for one cycle.
struct Cycle<'a, S: EventSink + ?Sized> {
    sink: &'a mut S,
    report: CycleReport,
}

impl<S: EventSink + ?Sized> Cycle<'_, S> {
    fn emit(&mut self, kind: SyncEventKind) {
        self.report.record(&kind);
        self.sink.record(SyncEvent::now(kind));
    }
}

/// One-way tree reconciler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    comparator: ContentComparator,
    mutator: Mutator,
    matching: NameMatching,
}

impl Reconciler {
    /// Create a reconciler with case-sensitive name matching.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reconciler using the policies from a config.
    pub fn from_config(config: &MirrorConfig) -> Self {
        Self::new().with_name_matching(config.name_matching)
    }

    /// Set the name matching policy.
    pub fn with_name_matching(mut self, matching: NameMatching) -> Self {
        self.matching = matching;
        self
    }

    /// Run one cycle over the roots named in `config`.
    pub fn run<S: EventSink + ?Sized>(&self, config: &MirrorConfig, sink: &mut S) -> CycleReport {
        self.reconcile(&config.source, &config.replica, sink)
    }

    /// Make `replica` mirror `source`, emitting one event per mutation or fault.
    ///
    /// Never fails as a whole: faults are reported through `sink` and listed in
    /// the returned report, and only stop the directory node they occurred in.
    pub fn reconcile<S: EventSink + ?Sized>(
        &self,
        source: &Path,
        replica: &Path,
        sink: &mut S,
    ) -> CycleReport {
        let mut cycle = Cycle {
            sink,
            report: CycleReport::new(),
        };
        let mut stack = vec![Task::Visit {
            pair: NodePair::new(source, replica),
            ancestors: Vec::new(),
        }];

        while let Some(task) = stack.pop() {
            let scope = task.scope().to_path_buf();
            let result = match task {
                Task::Visit { pair, ancestors } => {
                    self.visit(pair, ancestors, &mut stack, &mut cycle)
                }
                Task::Prune(pair) => self.prune(&pair, &mut cycle),
            };

            if let Err(err) = result {
                tracing::warn!(scope = %scope.display(), error = %err, "directory fault");
                cycle.emit(SyncEventKind::io_fault(scope, err.to_string()));
            }
        }

        cycle.report
    }

    fn visit<S: EventSink + ?Sized>(
        &self,
        pair: NodePair,
        ancestors: Vec<DirectoryId>,
        stack: &mut Vec<Task>,
        cycle: &mut Cycle<'_, S>,
    ) -> Result<(), SyncError> {
        tracing::debug!(
            source = %pair.source.display(),
            replica = %pair.replica.display(),
            "visiting directory"
        );
        cycle.report.nodes_visited += 1;

        if !pair.source.is_dir() {
            cycle.emit(SyncEventKind::source_missing(&pair.source));
            return Ok(());
        }
        let here = DirectoryId::of(&pair.source)?;

        if !pair.replica.is_dir() {
            self.apply(MirrorOperation::create_directory(&pair.replica), cycle)?;
        }

        let source = DirectoryListing::read(&pair.source, self.matching)?;
        let replica = DirectoryListing::read(&pair.replica, self.matching)?;

        // A copy onto a dangling link would write to wherever it points
        for link in replica.dangling_links() {
            self.apply(MirrorOperation::delete_file(link.path()), cycle)?;
        }

        for file in source.files() {
            let target = match replica.file(file.name()) {
                Some(existing) => {
                    if self.comparator.equal(file.path(), existing.path())? {
                        continue;
                    }
                    existing.path.clone()
                }
                None => pair.replica.join(file.name()),
            };
            self.apply(MirrorOperation::copy(file.path(), target), cycle)?;
        }

        let replica = DirectoryListing::read(&pair.replica, self.matching)?;
        for file in replica.files() {
            if !source.has_file(file.name()) {
                self.apply(MirrorOperation::delete_file(file.path()), cycle)?;
            }
        }

        let mut lineage = ancestors;
        lineage.push(here);

        let mut children = Vec::with_capacity(source.directories().len());
        let mut loops = Vec::new();
        for dir in source.directories() {
            if lineage.contains(&DirectoryId::of(dir.path())?) {
                loops.push(dir.path().to_path_buf());
                continue;
            }

            let target = replica
                .directory(dir.name())
                .map(|existing| existing.path.clone())
                .unwrap_or_else(|| pair.replica.join(dir.name()));
            children.push(NodePair::new(dir.path(), target));
        }

        for path in loops {
            let message = format!("Directory cycle detected: {}", path.display());
            cycle.emit(SyncEventKind::io_fault(path, message));
        }

        stack.push(Task::Prune(pair));
        for child in children.into_iter().rev() {
            stack.push(Task::Visit {
                pair: child,
                ancestors: lineage.clone(),
            });
        }

        Ok(())
    }

    fn prune<S: EventSink + ?Sized>(
        &self,
        pair: &NodePair,
        cycle: &mut Cycle<'_, S>,
    ) -> Result<(), SyncError> {
        let replica = DirectoryListing::read(&pair.replica, self.matching)?;
        let source = DirectoryListing::read(&pair.source, self.matching)?;

        for dir in replica.directories() {
            if !source.has_directory(dir.name()) {
                self.apply(MirrorOperation::delete_directory(dir.path()), cycle)?;
            }
        }

        Ok(())
    }

    fn apply<S: EventSink + ?Sized>(
        &self,
        operation: MirrorOperation,
        cycle: &mut Cycle<'_, S>,
    ) -> Result<(), SyncError> {
        let outcome = self.mutator.apply(operation)?;
        cycle.report.bytes_copied += outcome.bytes;
        cycle.emit(outcome.event);
        Ok(())
    }
}
