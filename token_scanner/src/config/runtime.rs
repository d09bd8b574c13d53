// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Errors raised while loading a runtime configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("Invalid configuration TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        crate::logging::codes::system::CONFIGURATION_ERROR
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerPreferences {
    /// Whether to keep per-category token metrics while scanning
    pub collect_metrics: bool,

    /// Whether to keep the verbatim input lines for replay
    pub record_original_lines: bool,

    /// Whether to count how often each operator spelling occurs
    pub track_operator_usage: bool,

    /// Whether each ingested line is logged at debug level
    pub log_each_line: bool,
}

impl Default for ScannerPreferences {
    fn default() -> Self {
        Self {
            collect_metrics: env_bool(env_vars::SCANNER_COLLECT_METRICS, true),
            record_original_lines: env_bool(env_vars::SCANNER_RECORD_ORIGINAL, true),
            track_operator_usage: env_bool(env_vars::SCANNER_TRACK_OPERATORS, false),
            log_each_line: env_bool(env_vars::SCANNER_LOG_EACH_LINE, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayPreferences {
    /// Wrap each lexeme in `[` `]` when rendering tokens
    pub bracket_tokens: bool,

    /// Print the banner lines around rendered blocks
    pub show_boundary: bool,

    /// Render the original input before the tokens
    pub show_original: bool,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            bracket_tokens: env_bool(env_vars::DISPLAY_BRACKET, true),
            show_boundary: env_bool(env_vars::DISPLAY_BOUNDARY, true),
            show_original: env_bool(env_vars::DISPLAY_ORIGINAL, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Whether to log timing and size information for each file
    pub enable_performance_logging: bool,

    /// Whether a zero-byte file is accepted (yields an empty store)
    pub allow_empty_files: bool,

    /// Reject files that are not valid UTF-8 instead of replacing bad bytes
    pub strict_encoding: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            enable_performance_logging: env_bool(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
            allow_empty_files: env_bool(env_vars::ALLOW_EMPTY_FILES, true),
            strict_encoding: env_bool(env_vars::STRICT_ENCODING, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_bool(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_bool(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub scanner: ScannerPreferences,
    pub display: DisplayPreferences,
    pub file_processor: FileProcessorPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a configuration document; missing tables and keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration file from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Scanner
    pub const SCANNER_COLLECT_METRICS: &str = "TOKEN_SCANNER_COLLECT_METRICS";
    pub const SCANNER_RECORD_ORIGINAL: &str = "TOKEN_SCANNER_RECORD_ORIGINAL";
    pub const SCANNER_TRACK_OPERATORS: &str = "TOKEN_SCANNER_TRACK_OPERATORS";
    pub const SCANNER_LOG_EACH_LINE: &str = "TOKEN_SCANNER_LOG_EACH_LINE";

    // Display
    pub const DISPLAY_BRACKET: &str = "TOKEN_SCANNER_DISPLAY_BRACKET";
    pub const DISPLAY_BOUNDARY: &str = "TOKEN_SCANNER_DISPLAY_BOUNDARY";
    pub const DISPLAY_ORIGINAL: &str = "TOKEN_SCANNER_DISPLAY_ORIGINAL";

    // File Processor
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "TOKEN_SCANNER_ENABLE_PERFORMANCE_LOGGING";
    pub const ALLOW_EMPTY_FILES: &str = "TOKEN_SCANNER_ALLOW_EMPTY_FILES";
    pub const STRICT_ENCODING: &str = "TOKEN_SCANNER_STRICT_ENCODING";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "TOKEN_SCANNER_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "TOKEN_SCANNER_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "TOKEN_SCANNER_LOGGING_MIN_LEVEL";
}
