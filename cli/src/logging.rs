//! # Logging
//!
//! Installs the global `tracing` subscriber: console output plus a plain-text
//! session log under the log directory.

use crate::error::{CliError, CliResult};
use chrono::Local;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Maps a configured level name to a `tracing` directive.
///
/// Accepts the usual spellings (`WARNING`, `CRITICAL`) and falls back to `info`.
pub fn level_directive(level: &str) -> &'static str {
    match level.trim().to_ascii_uppercase().as_str() {
        "TRACE" => "trace",
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" | "WARNING" => "warn",
        "ERROR" | "CRITICAL" | "FATAL" => "error",
        _ => "info",
    }
}

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},ureq=warn", level_directive(level))))
}

/// Logs to stdout and to `<log_dir>/test_<timestamp>.log`. Returns the log file path.
pub fn init(level: &str, log_dir: &Path) -> CliResult<PathBuf> {
    fs::create_dir_all(log_dir)?;
    let log_file = log_dir.join(format!("test_{}.log", Local::now().format("%Y%m%d_%H%M%S")));
    let file = File::create(&log_file)?;

    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| CliError::General(format!("Failed to install logger: {}", e)))?;

    Ok(log_file)
}

/// Logs to stderr only, leaving stdout for command output.
pub fn init_stderr(level: &str) -> CliResult<()> {
    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| CliError::General(format!("Failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("warning"), "warn");
        assert_eq!(level_directive(" Critical "), "error");
        assert_eq!(level_directive("verbose"), "info");
    }
}
