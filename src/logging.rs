//! Logging setup
//!
//! stdout carries the JSON response to Concourse, so human readable logs go to
//! stderr. A JSON copy is appended to [`log_path`] when the data directory is
//! writable. `RUST_LOG` overrides the default `info` filter.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::log_path;

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber.
///
/// The returned guards flush buffered log lines when dropped and must be
/// kept alive until the process exits. Never fails: a log file that cannot be
/// opened is skipped.
pub fn init_logging() -> Vec<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (stderr, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());
    let mut guards = vec![stderr_guard];

    let stderr_layer = fmt::layer()
        .with_writer(stderr)
        .with_target(false)
        .with_ansi(false);

    let file_layer = open_log_file().map(|appender| {
        let (writer, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);
        fmt::layer().json().with_writer(writer)
    });

    // A subscriber may already be installed, e.g. by a test harness
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    guards
}

fn open_log_file() -> Option<RollingFileAppender> {
    let path = log_path();
    let dir = path.parent()?;
    let file_name = path.file_name()?.to_str()?;

    std::fs::create_dir_all(dir).ok()?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .ok()
}
