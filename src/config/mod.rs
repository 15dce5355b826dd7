pub mod models;

pub use models::{CliConfig, LogRotation, DEFAULT_CWD_CAPACITY};

use crate::observability::Rotation;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Environment variable naming a config file when `--config` is not given
pub const CONFIG_ENV_VAR: &str = "PORTAFS_CONFIG";

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> Result<CliConfig> {
    if !path.exists() {
        anyhow::bail!("Configuration file not found: {}", path.display());
    }

    let content = std::fs::read_to_string(path)
        .context("Failed to read config file")?;

    let config: CliConfig = serde_json::from_str(&content)
        .context("Failed to parse config file")?;

    info!("Configuration loaded from: {}", path.display());
    Ok(config)
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Daily => Rotation::Daily,
            LogRotation::Hourly => Rotation::Hourly,
            LogRotation::Never => Rotation::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("portafs.json");
        std::fs::write(&path, r#"{ "log_level": "info", "cwd_capacity": 64 }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.cwd_capacity, 64);
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Configuration file not found"));
    }

    #[test]
    fn test_load_config_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_rotation_conversion() {
        assert_eq!(Rotation::from(LogRotation::Hourly), Rotation::Hourly);
        assert_eq!(Rotation::from(LogRotation::default()), Rotation::Never);
    }
}
