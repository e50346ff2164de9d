//! Filesystem mutations for mirrorsync.
//!
//! Four primitive, blocking operations (copy-overwrite, delete file, create
//! directory, delete directory tree). Each is atomic only at the granularity
//! of a single file or directory; there is no multi-file transaction.
//! [`Mutator::apply`] runs one operation and reports it as the event kind the
//! reconciler forwards to its sink.

mod copy;
mod create;
mod delete;
mod operation;

pub use copy::copy_overwrite;
pub use create::create_directory;
pub use delete::{delete_directory, delete_file};
pub use operation::{MirrorOperation, Mutator, OperationOutcome};
