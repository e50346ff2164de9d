//! mirrorsync - one-way periodic directory mirroring.
//!
//! Usage:
//!   mirrorsync SOURCE REPLICA LOG_FILE INTERVAL   Mirror every INTERVAL seconds
//!   mirrorsync --once SOURCE REPLICA LOG_FILE     Run a single cycle and exit
//!   mirrorsync --config mirror.toml               Read settings from a TOML file
//!   mirrorsync                                    Prompt for missing settings
//!   mirrorsync --help                             Show help

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use dialoguer::Input;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use mirrorsync_audit::AuditLog;
use mirrorsync_core::{MirrorConfig, NameMatching};
use mirrorsync_sync::{CycleReport, Reconciler};

/// Environment variable holding the diagnostics filter.
const LOG_ENV: &str = "MIRRORSYNC_LOG";

#[derive(Parser)]
#[command(
    name = "mirrorsync",
    version,
    about = "One-way periodic directory mirroring",
    long_about = "mirrorsync keeps a replica directory identical to a source directory.\n\n\
                  Every INTERVAL seconds the replica is brought in line with the source: \
                  new and changed files are copied, and anything absent from the source \
                  is deleted. Every change is printed and appended to LOG_FILE."
)]
struct Cli {
    /// Directory to mirror from
    source: Option<PathBuf>,

    /// Directory to mirror into (created if missing)
    replica: Option<PathBuf>,

    /// Audit log file to append to
    log_file: Option<PathBuf>,

    /// Seconds to wait between cycles
    interval: Option<u64>,

    /// TOML file with default settings (positional arguments take precedence)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,

    /// Do not echo events to the console
    #[arg(short, long)]
    quiet: bool,

    /// Match file names ignoring case (for case-insensitive volumes)
    #[arg(long)]
    case_insensitive: bool,

    /// chrono format string for log timestamps
    #[arg(long)]
    timestamp_format: Option<String>,
}

/// Settings read from `--config`; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    source: Option<PathBuf>,
    replica: Option<PathBuf>,
    log_file: Option<PathBuf>,
    interval_secs: Option<u64>,
    name_matching: Option<NameMatching>,
    timestamp_format: Option<String>,
    console: Option<bool>,
}

impl FileSettings {
    fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Overlay command-line values on top of the file values.
    fn merge_cli(mut self, cli: &Cli) -> Self {
        if cli.source.is_some() {
            self.source = cli.source.clone();
        }
        if cli.replica.is_some() {
            self.replica = cli.replica.clone();
        }
        if cli.log_file.is_some() {
            self.log_file = cli.log_file.clone();
        }
        if cli.interval.is_some() {
            self.interval_secs = cli.interval;
        }
        if cli.case_insensitive {
            self.name_matching = Some(NameMatching::CaseInsensitive);
        }
        if cli.timestamp_format.is_some() {
            self.timestamp_format = cli.timestamp_format.clone();
        }
        if cli.quiet {
            self.console = Some(false);
        }
        self
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();

    let file = match &cli.config {
        Some(path) => FileSettings::load(path)?,
        None => FileSettings::default(),
    };
    let settings = file.merge_cli(&cli);
    let config = build_config(settings, cli.once)?;
    let log = AuditLog::from_config(&config).context("Invalid log settings")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;
    runtime.block_on(run(config, log, cli.once))
}

/// Install the stderr diagnostics subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Fill gaps by prompting, then validate.
fn build_config(settings: FileSettings, once: bool) -> Result<MirrorConfig> {
    let source = match settings.source {
        Some(path) => path,
        None => prompt_path("Source path")?,
    };
    let replica = match settings.replica {
        Some(path) => path,
        None => prompt_path("Replica path")?,
    };
    let log_file = match settings.log_file {
        Some(path) => path,
        None => prompt_path("Log file path")?,
    };
    // A single cycle never waits, so there is nothing to ask
    let interval = match settings.interval_secs {
        Some(secs) => Some(secs),
        None if once => None,
        None => Some(prompt_interval()?),
    };

    let mut builder = MirrorConfig::builder();
    builder
        .source(absolute(&source)?)
        .replica(absolute(&replica)?)
        .log_file(absolute(&log_file)?);
    if let Some(secs) = interval {
        builder.interval_secs(secs);
    }
    if let Some(matching) = settings.name_matching {
        builder.name_matching(matching);
    }
    if let Some(format) = settings.timestamp_format {
        builder.timestamp_format(format);
    }
    if let Some(console) = settings.console {
        builder.console(console);
    }

    builder.build().context("Invalid configuration")
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Invalid path {}", path.display()))
}

fn prompt_path(prompt: &str) -> Result<PathBuf> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .interact_text()
        .context("Failed to get user input")?;
    Ok(PathBuf::from(value))
}

fn prompt_interval() -> Result<u64> {
    Input::<u64>::new()
        .with_prompt("Sync interval (seconds)")
        .validate_with(|secs: &u64| {
            if *secs > 0 {
                Ok(())
            } else {
                Err("Interval must be at least one second")
            }
        })
        .interact_text()
        .context("Failed to get user input")
}

/// Run cycles until interrupted (or once).
///
/// Each cycle runs to completion on the blocking pool; Ctrl-C is honoured
/// between cycles, never in the middle of one.
async fn run(config: MirrorConfig, mut log: AuditLog, once: bool) -> Result<()> {
    let config = Arc::new(config);
    let reconciler = Reconciler::from_config(&config);
    let interval = Duration::from_secs(config.interval_secs);

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.cancel();
            }
        }
    });

    let mut cycle = 0u64;
    loop {
        cycle += 1;
        let started = Instant::now();
        let cycle_config = Arc::clone(&config);

        let (returned, report) = tokio::task::spawn_blocking(move || {
            let report = reconciler.run(&cycle_config, &mut log);
            (log, report)
        })
        .await
        .context("Sync cycle panicked")?;
        log = returned;

        report_cycle(cycle, &report, started.elapsed(), log.write_failures());

        if once || shutdown.is_cancelled() {
            break;
        }

        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    tracing::info!(cycles = cycle, "stopped");
    Ok(())
}

fn report_cycle(cycle: u64, report: &CycleReport, elapsed: Duration, write_failures: u64) {
    tracing::info!(
        cycle,
        nodes = report.nodes_visited,
        events = report.event_count(),
        bytes = report.bytes_copied,
        elapsed_ms = elapsed.as_millis() as u64,
        "cycle complete"
    );

    if !report.is_clean() {
        tracing::warn!(
            cycle,
            faults = report.faults.len(),
            "cycle finished with faults: {}",
            report.summary()
        );
    } else if report.changes() > 0 {
        tracing::info!(
            cycle,
            "{} ({})",
            report.summary(),
            format_size(report.bytes_copied)
        );
    }

    if write_failures > 0 {
        tracing::warn!(write_failures, "some events could not be written to the log file");
    }
}

/// Format bytes as human-readable size.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("mirrorsync").chain(args.iter().copied()))
    }

    #[test]
    fn test_positional_arguments() {
        let cli = cli(&["/src", "/dst", "/log/m.log", "30"]);
        assert_eq!(cli.source, Some(PathBuf::from("/src")));
        assert_eq!(cli.interval, Some(30));
        assert!(!cli.once);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file: FileSettings = toml::from_str(
            r#"
                source = "/from-file"
                replica = "/replica"
                log_file = "/log"
                interval_secs = 90
                console = true
            "#,
        )
        .unwrap();

        let settings = file.merge_cli(&cli(&["/from-cli", "--quiet", "--case-insensitive"]));

        assert_eq!(settings.source, Some(PathBuf::from("/from-cli")));
        assert_eq!(settings.replica, Some(PathBuf::from("/replica")));
        assert_eq!(settings.interval_secs, Some(90));
        assert_eq!(settings.console, Some(false));
        assert_eq!(settings.name_matching, Some(NameMatching::CaseInsensitive));
    }

    #[test]
    fn test_load_config_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("mirror.toml");
        std::fs::write(
            &path,
            r#"
                source = "/data"
                replica = "/backup"
                log_file = "/var/log/mirror.log"
                interval_secs = 15
                name_matching = "case-insensitive"
                timestamp_format = "%H:%M:%S"
            "#,
        )
        .unwrap();

        let settings = FileSettings::load(&path).unwrap();
        assert_eq!(settings.source, Some(PathBuf::from("/data")));
        assert_eq!(settings.interval_secs, Some(15));
        assert_eq!(settings.name_matching, Some(NameMatching::CaseInsensitive));
        assert_eq!(settings.timestamp_format.as_deref(), Some("%H:%M:%S"));
        assert_eq!(settings.console, None);

        let config = build_config(settings, false).unwrap();
        assert_eq!(config.interval_secs, 15);
        assert_eq!(config.replica, PathBuf::from("/backup"));
    }

    #[test]
    fn test_load_config_file_errors() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(FileSettings::load(&temp.path().join("absent.toml")).is_err());

        let path = temp.path().join("broken.toml");
        std::fs::write(&path, "interval_secs = \"soon\"").unwrap();
        let err = FileSettings::load(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_build_config_without_prompts() {
        let temp = tempfile::TempDir::new().unwrap();
        let settings = FileSettings {
            source: Some(temp.path().join("src")),
            replica: Some(temp.path().join("dst")),
            log_file: Some(temp.path().join("m.log")),
            ..Default::default()
        };

        let config = build_config(settings, true).unwrap();
        assert_eq!(config.interval_secs, 60);
        assert!(config.source.is_absolute());
    }

    #[test]
    fn test_build_config_rejects_nested_replica() {
        let temp = tempfile::TempDir::new().unwrap();
        let settings = FileSettings {
            source: Some(temp.path().to_path_buf()),
            replica: Some(temp.path().join("inside")),
            log_file: Some(temp.path().join("m.log")),
            interval_secs: Some(5),
            ..Default::default()
        };

        assert!(build_config(settings, false).is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(2048), "2 KiB");
    }
}
