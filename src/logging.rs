use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Keeps the non-blocking writer alive for the lifetime of the process.
pub struct LogGuard(#[allow(dead_code)] Option<WorkerGuard>);

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub dir: Option<PathBuf>,
    pub filter: Option<String>,
}

/// Logs go to a daily rolling file; the terminal belongs to the TUI.
pub fn init(data_dir: &Path, cfg: LogConfig) -> LogGuard {
    let mut log_dir = cfg.dir.unwrap_or_else(|| data_dir.join("logs"));
    if fs::create_dir_all(&log_dir).is_err() {
        log_dir = std::env::temp_dir().join("static-tv-logs");
        let _ = fs::create_dir_all(&log_dir);
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, "static-tv.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = match cfg.filter {
        Some(s) if !s.trim().is_empty() => EnvFilter::new(s),
        _ => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
    };

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    LogGuard(Some(guard))
}
