//! File sink primitives.

use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use mirrorsync_core::{SyncError, SyncEvent, is_valid_timestamp_format};

/// Line terminator appended to every log line.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Line terminator appended to every log line.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Render an event as a complete log line, terminator included.
pub fn render_line(event: &SyncEvent, timestamp_format: &str) -> Result<String, SyncError> {
    let mut line = String::new();
    write!(
        line,
        "{}: {}{}",
        event.timestamp.format(timestamp_format),
        event.message(),
        LINE_ENDING
    )
    .map_err(|_| {
        SyncError::invalid_config(format!("Timestamp format failed to render: {timestamp_format}"))
    })?;
    Ok(line)
}

/// Reject `chrono` format strings that would fail to render.
pub fn validate_timestamp_format(format: &str) -> Result<(), SyncError> {
    if !is_valid_timestamp_format(format) {
        return Err(SyncError::invalid_config(format!(
            "Invalid timestamp format: {format}"
        )));
    }
    Ok(())
}

/// Clear the read-only flag of an existing file. Missing files are left alone.
pub fn clear_readonly(path: &Path) -> Result<(), SyncError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(SyncError::io(path, e)),
    };

    let mut permissions = metadata.permissions();
    if !permissions.readonly() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Owner write only
        permissions.set_mode(permissions.mode() | 0o200);
    }
    #[cfg(not(unix))]
    permissions.set_readonly(false);

    fs::set_permissions(path, permissions).map_err(|e| SyncError::io(path, e))
}

/// Append `line` to the file at `path`, creating it and its parents if needed.
pub fn append_line(path: &Path, line: &str) -> Result<(), SyncError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| SyncError::io(path, e))?;
    file.write_all(line.as_bytes()).map_err(|e| SyncError::io(path, e))
}
