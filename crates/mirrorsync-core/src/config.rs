//! Mirror configuration types.

use std::ffi::{OsStr, OsString};
use std::fmt::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Timestamp format used for audit log lines (`10/16/2026 3:04:05 PM`).
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y %-I:%M:%S %p";

/// How entry names in source and replica are matched against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameMatching {
    /// Names match only if they are byte-for-byte identical.
    #[default]
    CaseSensitive,
    /// Names match if their Unicode lowercase forms are identical.
    CaseInsensitive,
}

impl NameMatching {
    /// Lookup key for a name under this policy.
    pub fn key(&self, name: &OsStr) -> OsString {
        match self {
            Self::CaseSensitive => name.to_os_string(),
            Self::CaseInsensitive => match name.to_str() {
                Some(s) => OsString::from(s.to_lowercase()),
                // Non-UTF-8 names cannot be folded reliably
                None => name.to_os_string(),
            },
        }
    }

    /// Check whether two names match under this policy.
    pub fn matches(&self, a: &OsStr, b: &OsStr) -> bool {
        self.key(a) == self.key(b)
    }
}

/// Configuration for a mirror job.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct MirrorConfig {
    /// Root of the tree to mirror from.
    pub source: PathBuf,

    /// Root of the tree to mirror into.
    pub replica: PathBuf,

    /// Append-only audit log file.
    pub log_file: PathBuf,

    /// Seconds to wait between the end of one cycle and the start of the next.
    #[builder(default = "60")]
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Name matching policy.
    #[builder(default)]
    #[serde(default)]
    pub name_matching: NameMatching,

    /// `chrono` format string for audit log timestamps.
    #[builder(default = "DEFAULT_TIMESTAMP_FORMAT.to_string()")]
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Echo events to the console.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub console: bool,
}

fn default_interval_secs() -> u64 {
    60
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

fn default_true() -> bool {
    true
}

impl MirrorConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        let source = required_path(&self.source, "Source path")?;
        let replica = required_path(&self.replica, "Replica path")?;
        required_path(&self.log_file, "Log file path")?;

        if source == replica {
            return Err("Source and replica must be different directories".to_string());
        }
        if replica.starts_with(source) {
            return Err("Replica cannot be inside the source tree".to_string());
        }
        if source.starts_with(replica) {
            return Err("Source cannot be inside the replica tree".to_string());
        }
        if self.interval_secs == Some(0) {
            return Err("Sync interval must be at least one second".to_string());
        }
        if let Some(format) = &self.timestamp_format {
            if !is_valid_timestamp_format(format) {
                return Err(format!("Invalid timestamp format: {format}"));
            }
        }
        Ok(())
    }
}

/// Check that a `chrono` format string renders without error.
///
/// Parse-only specifiers such as `%#z` are rejected like malformed ones.
pub fn is_valid_timestamp_format(format: &str) -> bool {
    let mut rendered = String::new();
    write!(rendered, "{}", Local::now().format(format)).is_ok()
}

fn required_path<'a>(path: &'a Option<PathBuf>, what: &str) -> Result<&'a Path, String> {
    match path {
        Some(path) if !path.as_os_str().is_empty() => Ok(path),
        Some(_) => Err(format!("{what} cannot be empty")),
        None => Err(format!("{what} is required")),
    }
}

impl MirrorConfig {
    /// Create a new mirror config builder.
    pub fn builder() -> MirrorConfigBuilder {
        MirrorConfigBuilder::default()
    }
}
