//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use tracing_subscriber::EnvFilter;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
///
/// `log_level` falls back to `RUST_LOG`, then to `info`.
/// When `log_dir` points at an existing directory, a daily-rolling file
/// appender is used instead of stdout.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir is provided
    if let Some(dir) = log_dir
        && std::path::Path::new(dir).exists()
    {
        let file_appender = tracing_appender::rolling::daily(dir, "booking-server");
        subscriber.with_writer(file_appender).init();
        return;
    }

    subscriber.init();
}
