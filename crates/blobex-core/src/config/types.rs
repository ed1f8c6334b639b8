//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the images live and how the table is laid out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: PathBuf,

    /// Table holding the image rows
    pub table: String,

    /// Text column used as the exported filename stem
    pub key_column: String,

    /// Nullable BLOB column with the raw image bytes
    pub image_column: String,

    /// Orderable column; rows are exported oldest first
    pub timestamp_column: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("images.db"),
            table: "images".to_string(),
            key_column: "key".to_string(),
            image_column: "image".to_string(),
            timestamp_column: "timestamp".to_string(),
        }
    }
}

/// Output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory exported images are written into (created if absent)
    pub directory: PathBuf,

    /// Run log written when `--keep-log` is given
    pub log_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("exported_images"),
            log_file: PathBuf::from("export_log.txt"),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (pretty, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
