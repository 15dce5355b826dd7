use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Default `get_cwd` buffer capacity in bytes
pub const DEFAULT_CWD_CAPACITY: usize = 4096;

#[inline]
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

#[inline]
fn default_cwd_capacity() -> usize {
    DEFAULT_CWD_CAPACITY
}

/// Command-line tool configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional log file directory (if None, only console logging)
    #[serde(default)]
    pub log_directory: Option<PathBuf>,

    /// Log file rotation strategy
    #[serde(default)]
    pub log_rotation: LogRotation,

    /// Home directory used for `~` expansion instead of the environment
    #[serde(default)]
    pub home_override: Option<PathBuf>,

    /// Buffer capacity for the current working directory
    #[serde(default = "default_cwd_capacity")]
    pub cwd_capacity: usize,

    /// Send diagnostics to the log instead of stderr
    #[serde(default)]
    pub quiet_diagnostics: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_directory: None,
            log_rotation: LogRotation::default(),
            home_override: None,
            cwd_capacity: DEFAULT_CWD_CAPACITY,
            quiet_diagnostics: false,
        }
    }
}

/// Log file rotation strategy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate daily
    Daily,
    /// Rotate hourly
    Hourly,
    /// Never rotate (single file)
    #[default]
    Never,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: CliConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config: CliConfig = serde_json::from_str(
            r#"{
                "log_level": "debug",
                "log_directory": "./logs",
                "log_rotation": { "type": "hourly" },
                "home_override": "/home/tester",
                "cwd_capacity": 128,
                "quiet_diagnostics": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_directory, Some(PathBuf::from("./logs")));
        assert_eq!(config.log_rotation, LogRotation::Hourly);
        assert_eq!(config.home_override, Some(PathBuf::from("/home/tester")));
        assert_eq!(config.cwd_capacity, 128);
        assert!(config.quiet_diagnostics);
    }
}
