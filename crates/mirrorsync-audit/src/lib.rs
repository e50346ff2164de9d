//! Audit log sink for mirrorsync events.
//!
//! Every event is echoed to the console and appended to a log file as
//! `"<local timestamp>: <message>"` followed by the platform line terminator.
//! Before each append the log file's read-only flag is cleared, so a file left
//! read-only by an earlier run does not block logging.

mod file;

pub use file::{LINE_ENDING, append_line, clear_readonly, render_line, validate_timestamp_format};

use std::path::{Path, PathBuf};

use mirrorsync_core::{DEFAULT_TIMESTAMP_FORMAT, EventSink, MirrorConfig, SyncError, SyncEvent};

/// Console + file event sink.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
    timestamp_format: String,
    console: bool,
    write_failures: u64,
}

impl AuditLog {
    /// Create a log appending to `path` with the default timestamp format.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            console: true,
            write_failures: 0,
        }
    }

    /// Create a log from the log settings in a config.
    pub fn from_config(config: &MirrorConfig) -> Result<Self, SyncError> {
        Ok(Self::new(&config.log_file)
            .with_timestamp_format(&config.timestamp_format)?
            .with_console(config.console))
    }

    /// Use a custom `chrono` timestamp format.
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Result<Self, SyncError> {
        let format = format.into();
        validate_timestamp_format(&format)?;
        self.timestamp_format = format;
        Ok(self)
    }

    /// Enable or disable console echo.
    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// The log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of events that could not be written to the log file.
    pub fn write_failures(&self) -> u64 {
        self.write_failures
    }

    /// Write one event to the file sink.
    pub fn append(&self, event: &SyncEvent) -> Result<(), SyncError> {
        let line = render_line(event, &self.timestamp_format)?;
        clear_readonly(&self.path)?;
        append_line(&self.path, &line)
    }
}

impl EventSink for AuditLog {
    fn record(&mut self, event: SyncEvent) {
        if self.console {
            println!("{}", event.message());
        }

        if let Err(err) = self.append(&event) {
            self.write_failures += 1;
            tracing::warn!(path = %self.path.display(), error = %err, "failed to write audit log");
        }
    }
}
