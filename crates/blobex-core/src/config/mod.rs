//! Configuration management for blobex.
//!
//! Configuration is loaded from the platform config directory
//! (`~/.config/blobex/config.toml` on Linux) with defaults for every field.
//! The resulting `Config` is an immutable value handed to the row source and
//! the exporter; nothing reads configuration from global state.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for blobex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source database and table layout
    pub database: DatabaseConfig,

    /// Output directory and log file
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.blobex.blobex/config.toml
    /// - Linux: ~/.config/blobex/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\blobex\blobex\config\config.toml
    ///
    /// Falls back to ~/.blobex/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "blobex", "blobex")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".blobex").join("config.toml")
            })
    }

    /// Resolved database path (with ~ expansion).
    pub fn database_path(&self) -> PathBuf {
        expand(&self.database.path)
    }

    /// Resolved output directory (with ~ expansion).
    pub fn output_dir(&self) -> PathBuf {
        expand(&self.output.directory)
    }

    /// Resolved run log path (with ~ expansion).
    pub fn log_path(&self) -> PathBuf {
        expand(&self.output.log_file)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

fn expand(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database.table, "images");
        assert_eq!(config.database.timestamp_column, "timestamp");
        assert_eq!(config.output.log_file, PathBuf::from("export_log.txt"));
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[database]"));
        assert!(toml.contains("[output]"));
        assert!(toml.contains("[logging]"));
    }

    #[test]
    fn test_load_from_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[database]\npath = \"photos.sqlite\"\ntable = \"thumbs\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.database.path, PathBuf::from("photos.sqlite"));
        assert_eq!(config.database.table, "thumbs");
        assert_eq!(config.database.key_column, "key");
        assert_eq!(config.output.directory, PathBuf::from("exported_images"));
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn test_load_from_invalid_toml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[database\npath = 3").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_tilde_expansion() {
        if std::env::var_os("HOME").is_none() {
            return;
        }
        let mut config = Config::default();
        config.output.directory = PathBuf::from("~/exports");
        let resolved = config.output_dir();
        assert!(!resolved.to_string_lossy().starts_with('~'));
        assert!(resolved.ends_with("exports"));
    }

    #[test]
    fn test_toml_round_trip_preserves_columns() {
        let mut config = Config::default();
        config.database.image_column = "blob_data".to_string();
        let parsed: Config = toml::from_str(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.database.image_column, "blob_data");
    }
}
