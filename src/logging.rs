use std::io;
use std::path::Path;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn ensure_log_dir(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)
}

/// Routes tracing output to a daily-rolling `nimbus.log` under `dir`; the
/// terminal itself is owned by the TUI. Keep the guard alive until exit.
pub fn initialize_logging(dir: &str) -> WorkerGuard {
    // Reported once the subscriber is up, otherwise the warning goes nowhere.
    let dir_result = ensure_log_dir(Path::new(dir));

    let file_appender = tracing_appender::rolling::daily(dir, "nimbus.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    if let Err(e) = dir_result {
        warn!("Could not create log directory {}: {}", dir, e);
    }
    info!("Logging initialized in {}", dir);
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_nested_log_dir() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nimbus").join("logs");
        ensure_log_dir(&dir).unwrap();
        assert!(dir.is_dir());
        // Existing directories are fine.
        ensure_log_dir(&dir).unwrap();
    }

    #[test]
    fn log_dir_under_a_file_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();
        assert!(ensure_log_dir(&file.join("logs")).is_err());
    }
}
