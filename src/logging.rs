//! Logging configuration using the tracing ecosystem.
//!
//! Log output goes to stderr by default so command output on stdout stays
//! clean JSON. With a log directory, output goes to a daily rotating file
//! instead.
//!
//! # Log Levels
//!
//! Configure via the `RUST_LOG` environment variable:
//! - `RUST_LOG=jira_agile=debug` - Request and response summaries
//! - `RUST_LOG=jira_agile=trace` - Everything, including span events

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "jira_agile=info,warn";

/// File name prefix of rotated log files.
const LOG_FILE_PREFIX: &str = "jira-agile.log";

/// Initialize the logging system.
///
/// The returned guard flushes buffered log lines when dropped; keep it
/// alive until the program exits.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init(log_dir: Option<&Path>) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = writer(log_dir)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "jira-agile starting up");
    if let Some(dir) = log_dir {
        tracing::debug!(log_dir = %dir.display(), "Log directory");
    }

    Ok(guard)
}

/// Build the non-blocking writer: a daily rolling file in `log_dir`, or
/// stderr.
fn writer(log_dir: Option<&Path>) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
            Ok(tracing_appender::non_blocking(appender))
        }
        None => Ok(tracing_appender::non_blocking(std::io::stderr())),
    }
}

/// The platform-specific directory for log files.
///
/// - Linux: `~/.local/share/jira-agile/logs/`
/// - macOS: `~/Library/Application Support/jira-agile/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\jira-agile\logs\`
pub fn default_log_directory() -> Option<PathBuf> {
    dirs::data_local_dir().map(|base| base.join("jira-agile").join("logs"))
}
