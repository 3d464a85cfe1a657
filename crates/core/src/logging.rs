use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// `~/.xrouter/logs`, or `./.xrouter/logs` without a home directory.
pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".xrouter/logs")
}

/// Daily rolling file named after `component` under `dir`, e.g.
/// `xrouter.log.2026-01-21`.
fn file_appender(dir: &Path, component: &str) -> Result<RollingFileAppender, String> {
    std::fs::create_dir_all(dir).map_err(|e| format!("cannot create {}: {e}", dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(component)
        .build(dir)
        .map_err(|e| format!("cannot open log file in {}: {e}", dir.display()))
}

/// Install the global subscriber: a daily rolling file named after
/// `component`, plus stderr when `to_stderr` is set.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the process. When the log directory is unusable the file layer
/// writes nowhere and the reason is printed to stderr.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let log_dir = log_dir();

    // No subscriber exists yet, so setup failures can only go to stderr.
    let (file_writer, guard) = match file_appender(&log_dir, component) {
        Ok(appender) => tracing_appender::non_blocking(appender),
        Err(reason) => {
            eprintln!("xrouter: file logging disabled, {reason}");
            tracing_appender::non_blocking(std::io::sink())
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    let installed = if to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        registry.with(stderr_layer).try_init()
    } else {
        registry.try_init()
    };

    // A second init (tests, embedding hosts) keeps the first subscriber.
    if let Err(e) = installed {
        tracing::debug!("Logging for {} not installed, keeping the existing subscriber: {}", component, e);
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_layout() {
        assert!(log_dir().ends_with(".xrouter/logs"));
    }

    #[test]
    fn test_unusable_log_dir_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("logs");
        std::fs::write(&blocker, "not a directory").unwrap();

        let reason = file_appender(&blocker, "core").unwrap_err();
        assert!(reason.contains("cannot create"));

        assert!(file_appender(&dir.path().join("ok"), "core").is_ok());
    }
}
