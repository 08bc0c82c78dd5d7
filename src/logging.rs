use std::env;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIR: &str = "logs";
const LOG_FILE: &str = "portfolio.log";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/**
 * daily rolling file under LOG_DIR, mirrored to stdout
 * keep the returned guard alive for the life of the process or buffered lines are lost
 */
pub fn init() -> WorkerGuard {
    let dir = env::var("LOG_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
    let file_appender = rolling::daily(dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking.and(std::io::stdout))
        .with_ansi(false)
        .with_env_filter(filter())
        .init();

    guard
}

/// Console-only logging for one-shot tools.
pub fn init_console() {
    tracing_subscriber::fmt().with_env_filter(filter()).init();
}
