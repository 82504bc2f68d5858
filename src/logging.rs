use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::kernel::services::adapters::ensure_log_dir;

const LOG_FILE: &str = "vibepad.log";
const DEFAULT_FILTER: &str = "vibepad=info";

/// Keeps the background writer alive. Dropping it flushes pending lines.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Installs the global subscriber: a daily-rolling file under the log
/// directory, plus stderr when `verbose`. Returns `None` if a subscriber is
/// already set or no directory is writable.
pub fn init(data_dir: Option<&Path>, verbose: bool) -> Option<LoggingGuard> {
    let log_dir = ensure_log_dir(data_dir)
        .or_else(|_| -> std::io::Result<PathBuf> {
            let dir = std::env::temp_dir().join("vibepad").join("logs");
            std::fs::create_dir_all(&dir)?;
            Ok(dir)
        })
        .ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let stderr_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .boxed()
    });

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer);

    if subscriber.try_init().is_err() {
        return None;
    }

    install_panic_hook();

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}

/// Logs panics, then hands them to the previously installed hook so the
/// message still reaches stderr.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!(panic = %panic_info, "panic");
        previous(panic_info);
    }));
}

#[cfg(test)]
#[path = "../tests/unit/logging.rs"]
mod tests;
