//! Logging infrastructure for the neblio wallet core
//!
//! This module provides structured logging on top of the `log` facade:
//! - One-time initialisation of an `env_logger` backend
//! - Human-readable or JSON output, optionally to a file
//! - Context-tagged helpers for selection and staking events
//! - Truncation of identifiers (txids, scripts) before they are logged
//!
//! # Usage
//!
//! ```
//! use neblio_common::logging;
//! use neblio_common::logging::{LogConfig, LogLevel};
//!
//! logging::init(&LogConfig::default()).expect("Failed to initialize logging");
//!
//! logging::log_staking(LogLevel::Info, "stake attempt started", None);
//! ```

use chrono::Local;
use log::{debug, LevelFilter};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs::OpenOptions;
use std::io::Write as IoWrite;
use std::sync::Once;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// Error conditions
    Error,
    /// Warning conditions
    Warn,
    /// Informational messages
    Info,
    /// Debug-level messages
    Debug,
    /// Trace level (very verbose)
    Trace,
}

/// Log context categories for structured logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogContext {
    /// General wallet core events
    Core,
    /// Coin selection for ordinary spends
    Selection,
    /// Coinstake construction
    Staking,
    /// Configuration loading and validation
    Config,
}

/// Configuration for the logging system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default log level for all contexts
    pub level: LogLevel,
    /// Path to log file (None for console-only)
    pub log_file: Option<String>,
    /// Whether to include timestamps in log messages
    pub include_timestamps: bool,
    /// Whether to include source location in log messages
    pub include_source_location: bool,
    /// Whether to log to console
    pub console_logging: bool,
    /// Whether to use JSON format for logs (machine-readable)
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            log_file: None,
            include_timestamps: true,
            include_source_location: true,
            console_logging: true,
            json_format: false,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

static LOGGING_INIT: Once = Once::new();

/// Initialize the logging system with the given configuration
///
/// Safe to call multiple times; only the first call configures the backend.
/// An error is returned only when the first call cannot open the log file.
pub fn init(config: &LogConfig) -> Result<(), String> {
    let mut result = Ok(());

    let include_timestamps = config.include_timestamps;
    let include_source_location = config.include_source_location;
    let json_format = config.json_format;
    let log_file = config.log_file.clone();
    let level = if config.console_logging || config.log_file.is_some() {
        LevelFilter::from(config.level)
    } else {
        LevelFilter::Off
    };

    LOGGING_INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(level);

        builder.format(move |buf, record| {
            let timestamp = if include_timestamps {
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
            } else {
                String::new()
            };

            let source_location = if include_source_location {
                format!(" [{}:{}]", record.file().unwrap_or("unknown"), record.line().unwrap_or(0))
            } else {
                String::new()
            };

            if json_format {
                let json = json!({
                    "timestamp": timestamp,
                    "level": record.level().to_string(),
                    "target": record.target(),
                    "location": source_location,
                    "message": record.args().to_string(),
                });

                writeln!(buf, "{}", json)
            } else {
                if include_timestamps {
                    write!(buf, "{} ", timestamp)?;
                }

                writeln!(buf, "[{}{}] {}", record.level(), source_location, record.args())
            }
        });

        if let Some(file_path) = &log_file {
            match OpenOptions::new().create(true).append(true).open(file_path) {
                Ok(file) => {
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                }
                Err(_) => {
                    result = Err(format!("Failed to open log file: {}", file_path));
                    return;
                }
            }
        }

        // Another logger may already be installed (common in tests)
        if let Err(e) = builder.try_init() {
            debug!("Logger already initialized, using existing instance: {}", e);
        }
    });

    result
}

/// Update the log level dynamically
pub fn set_log_level(level: LogLevel) {
    log::set_max_level(level.into());
}

/// Truncate an identifier for logging, keeping the first and last 4 characters
pub fn sanitize_for_logging(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let len = input.len();
    if len <= 12 || !input.is_ascii() {
        return input.to_string();
    }

    format!("{}...{}", &input[0..4], &input[len - 4..len])
}

fn log_with_context(
    level: LogLevel,
    context: LogContext,
    message: &str,
    params: Option<serde_json::Value>,
) {
    let sanitized_params = params.map(|p| match p {
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(k, v)| {
                    let value = match v {
                        serde_json::Value::String(s) => json!(sanitize_for_logging(&s)),
                        other => other,
                    };
                    (k, value)
                })
                .collect(),
        ),
        other => other,
    });

    match sanitized_params {
        Some(params) => log::log!(level.into(), "[{:?}] {} - {}", context, message, params),
        None => log::log!(level.into(), "[{:?}] {}", context, message),
    }
}

/// Log a general core event
pub fn log_core(level: LogLevel, message: &str, params: Option<serde_json::Value>) {
    log_with_context(level, LogContext::Core, message, params);
}

/// Log a coin selection event
pub fn log_selection(level: LogLevel, message: &str, params: Option<serde_json::Value>) {
    log_with_context(level, LogContext::Selection, message, params);
}

/// Log a coinstake construction event
pub fn log_staking(level: LogLevel, message: &str, params: Option<serde_json::Value>) {
    log_with_context(level, LogContext::Staking, message, params);
}

/// Log a configuration event
pub fn log_config(level: LogLevel, message: &str, params: Option<serde_json::Value>) {
    log_with_context(level, LogContext::Config, message, params);
}
