//! Logging Infrastructure
//!
//! Structured logging to stdout, or to a daily rolling file when a log
//! directory is configured.

use std::path::Path;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::EnvFilter;

/// Log file prefix inside the log directory
const LOG_FILE_PREFIX: &str = "comanda";

/// Initialize the global logger
///
/// `RUST_LOG`, when set, takes precedence over `log_level`.
pub fn init_logger(log_level: &str, json: bool, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let result = match (log_dir, json) {
        (Some(dir), true) => builder.json().with_writer(file_appender(dir)?).try_init(),
        (Some(dir), false) => builder
            .with_ansi(false)
            .with_writer(file_appender(dir)?)
            .try_init(),
        (None, true) => builder.json().try_init(),
        (None, false) => builder.try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}

fn file_appender(dir: &Path) -> std::io::Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)?;
    Ok(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
}
