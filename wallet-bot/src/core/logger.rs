//! Logging setup: one human-readable event format written to the console and appended to a file.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{
    fmt::{self, format::Writer, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Filter used when `RUST_LOG` is unset. sqlx logs every statement at info.
const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// One-shot commands print their result on stdout, so only problems are logged by default.
const ONE_SHOT_FILTER: &str = "warn";

fn env_filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// `YYYY-MM-DD HH:MM:SS` in local time.
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Opens `path` for appending, creating the file and its parent directory when missing.
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber: `LEVEL target: message key=value` lines on stdout and in
/// `log_file_path`, filtered by `RUST_LOG`. Plain text on both sinks.
pub fn init_tracing(log_file_path: &str) -> anyhow::Result<()> {
    let file = open_log_file(Path::new(log_file_path))
        .with_context(|| format!("Cannot open log file {}", log_file_path))?;

    let filter = env_filter_or(DEFAULT_FILTER);

    let console = fmt::layer()
        .with_timer(LocalTime)
        .with_target(true)
        .with_ansi(false)
        .with_writer(io::stdout);
    let logfile = fmt::layer()
        .with_timer(LocalTime)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Arc::new(file));

    Registry::default()
        .with(filter)
        .with(console)
        .with(logfile)
        .try_init()
        .context("Failed to set global subscriber")?;

    Ok(())
}

/// Installs a stderr-only subscriber for one-shot CLI commands such as `check-balance`.
/// No log file is touched.
pub fn init_stderr_tracing() -> anyhow::Result<()> {
    let console = fmt::layer()
        .with_timer(LocalTime)
        .with_target(true)
        .with_ansi(false)
        .with_writer(io::stderr);

    Registry::default()
        .with(env_filter_or(ONE_SHOT_FILTER))
        .with(console)
        .try_init()
        .context("Failed to set global subscriber")?;

    Ok(())
}
