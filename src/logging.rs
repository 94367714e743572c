use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "gotodoc.log";
const DEFAULT_DIRECTIVE: &str = "gotodoc=info";

/// Keeps the non-blocking writer flushing until the process exits.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

fn log_dir() -> Option<PathBuf> {
    match gotodoc::kernel::services::adapters::ensure_log_dir() {
        Ok(dir) => Some(dir),
        Err(_) => {
            let dir = std::env::temp_dir().join("gotodoc").join("logs");
            std::fs::create_dir_all(&dir).ok()?;
            Some(dir)
        }
    }
}

/// 日志只写文件：stdout 是面板输出，stderr 是状态栏
pub fn init() -> Option<LoggingGuard> {
    let dir = log_dir()?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, LOG_FILE));

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .try_init()
        .ok()?;

    std::panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "panic");
    }));
    tracing::debug!(log_dir = %dir.display(), "logging to file");

    Some(LoggingGuard { _guard: guard })
}
