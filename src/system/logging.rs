//! Logging system initialization
//!
//! Sets up tracing according to the `[logging]` section of the config.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::rolling;

use crate::config::LoggingConfig;

/// Log file used by the TUI when none is configured, so the terminal stays clean
pub const TUI_FALLBACK_LOG_FILE: &str = "shortkeep.log";

/// Where log lines may go for the current mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// CLI: stderr unless a file is configured
    Console,
    /// TUI: the screen is owned by ratatui, always log to a file
    FileOnly,
}

/// Resolve the effective log file for a mode
pub fn resolve_log_file(config: &LoggingConfig, target: LogTarget) -> Option<String> {
    match config.file.as_deref().filter(|f| !f.is_empty()) {
        Some(file) => Some(file.to_string()),
        None if target == LogTarget::FileOnly => Some(TUI_FALLBACK_LOG_FILE.to_string()),
        None => None,
    }
}

/// Initialize logging system based on configuration
///
/// The returned `WorkerGuard` must be kept alive for the duration of the
/// program so buffered log lines are flushed.
pub fn init_logging(
    config: &LoggingConfig,
    target: LogTarget,
) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_file = resolve_log_file(config, target);

    let writer: Box<dyn std::io::Write + Send + Sync> = match log_file.as_deref() {
        Some(log_file) if config.enable_rotation => {
            let path = Path::new(log_file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let filename = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or(TUI_FALLBACK_LOG_FILE);
            let appender = rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(filename.trim_end_matches(".log"))
                .filename_suffix("log")
                .max_log_files(config.max_backups.max(1) as usize)
                .build(dir)
                .context("Failed to create rolling log appender")?;
            Box::new(appender)
        }
        Some(log_file) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
                .with_context(|| format!("Failed to open log file {}", log_file))?;
            Box::new(file)
        }
        None => Box::new(std::io::stderr()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(log_file.is_none());

    let installed = if config.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}
