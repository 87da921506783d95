//! File-backed tracing setup.
//!
//! The terminal is owned by the UI, so log lines go to `mapty.log` in the
//! data directory instead of stderr.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "mapty.log";

const DEFAULT_FILTER: &str = "mapty=info";

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered lines are flushed.
///
/// Returns `None` when the log file cannot be opened or a subscriber is
/// already installed.
pub fn init_logging(dir: &Path) -> Option<WorkerGuard> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(dir)
        .ok()?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .ok()
        .map(|_| guard)
}
