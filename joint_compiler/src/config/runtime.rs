// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Whether to reject sources without the .jnt extension
    pub require_jnt_extension: bool,

    /// Whether to log read duration and throughput
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_jnt_extension: env_flag(env_vars::REQUIRE_JNT_EXTENSION, false),
            enable_performance_logging: env_flag(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether to collect per-kind token metrics
    pub track_metrics: bool,

    /// Whether to emit a debug event for every token
    pub log_token_details: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            track_metrics: env_flag(env_vars::LEXICAL_TRACK_METRICS, true),
            log_token_details: env_flag(env_vars::LEXICAL_LOG_TOKEN_DETAILS, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxPreferences {
    /// Whether to emit a debug event for each grammar rule entered
    pub log_parse_steps: bool,
}

impl Default for SyntaxPreferences {
    fn default() -> Self {
        Self {
            log_parse_steps: env_flag(env_vars::SYNTAX_LOG_PARSE_STEPS, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output on stderr
    pub enable_console_logging: bool,

    /// Minimum level that reaches the configured loggers
    pub min_log_level: LogLevel,

    /// Optional file that receives every event
    pub log_file_path: Option<String>,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            log_file_path: env::var(env_vars::LOGGING_FILE_PATH)
                .ok()
                .filter(|v| !v.is_empty()),
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

    /// Convert from events::LogLevel for compatibility
    pub fn from_events_log_level(level: crate::logging::events::LogLevel) -> Self {
        match level {
            crate::logging::events::LogLevel::Error => LogLevel::Error,
            crate::logging::events::LogLevel::Warning => LogLevel::Warning,
            crate::logging::events::LogLevel::Info => LogLevel::Info,
            crate::logging::events::LogLevel::Debug => LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.trim().to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Errors raised while loading a runtime configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("Invalid configuration in '{path}': {message}")]
    Parse { path: String, message: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub syntax: SyntaxPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Build a configuration from TOML text. Missing sections and keys keep
    /// their environment-derived defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a configuration file written in TOML
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.message().to_string(),
        })
    }
}

/// Environment variable names recognised by the preference defaults
pub mod env_vars {
    pub const REQUIRE_JNT_EXTENSION: &str = "JOINT_REQUIRE_JNT_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "JOINT_ENABLE_PERFORMANCE_LOGGING";
    pub const LEXICAL_TRACK_METRICS: &str = "JOINT_LEXICAL_TRACK_METRICS";
    pub const LEXICAL_LOG_TOKEN_DETAILS: &str = "JOINT_LEXICAL_LOG_TOKEN_DETAILS";
    pub const SYNTAX_LOG_PARSE_STEPS: &str = "JOINT_SYNTAX_LOG_PARSE_STEPS";
    pub const LOGGING_USE_STRUCTURED: &str = "JOINT_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "JOINT_ENABLE_CONSOLE_LOGGING";
    pub const LOGGING_MIN_LEVEL: &str = "JOINT_LOGGING_MIN_LEVEL";
    pub const LOGGING_FILE_PATH: &str = "JOINT_LOGGING_FILE";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_log_level_accepts_names_and_digits() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("WARN"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("1"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level(" debug "), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert_eq!(
            LogLevel::from_events_log_level(LogLevel::Info.to_events_log_level()),
            LogLevel::Info
        );
    }

    #[test]
    fn test_partial_toml_overrides_only_named_keys() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [file_processor]
            require_jnt_extension = true

            [logging]
            min_log_level = "debug"
            "#,
        )
        .unwrap();

        assert!(config.file_processor.require_jnt_extension);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert_eq!(
            config.syntax.log_parse_steps,
            SyntaxPreferences::default().log_parse_steps
        );
    }

    #[test]
    fn test_load_reports_parse_errors_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nmin_log_level = 7").unwrap();

        let error = RuntimeConfig::load(file.path()).unwrap_err();
        assert_matches::assert_matches!(error, ConfigError::Parse { .. });
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = RuntimeConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert_matches::assert_matches!(error, ConfigError::Read { .. });
    }
}
