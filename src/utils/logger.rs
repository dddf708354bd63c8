use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize logging.
///
/// Logs go to stderr filtered by `RUST_LOG` (default `info`). When
/// `VIDCOMPRESS_DEBUG` is set they go to a daily log file at debug level
/// instead, and the returned guard must be kept alive to flush it.
pub fn init_logging() -> Option<WorkerGuard> {
    if std::env::var("VIDCOMPRESS_DEBUG").is_ok() {
        let log_dir = dirs::data_local_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("vidcompress");

        let _ = std::fs::create_dir_all(&log_dir);

        let file_appender = tracing_appender::rolling::daily(&log_dir, "vidcompress.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::fmt()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .init();

        tracing::info!("vidcompress logging initialized in {}", log_dir.display());
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
        None
    }
}
