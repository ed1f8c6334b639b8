//! Configuration validation.

use crate::error::ConfigError;

use super::Config;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["pretty", "json"];

impl Config {
    /// Validate that required names are present and enums hold known values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "database.path must not be empty".into(),
            ));
        }

        let names = [
            ("database.table", &self.database.table),
            ("database.key_column", &self.database.key_column),
            ("database.image_column", &self.database.image_column),
            ("database.timestamp_column", &self.database.timestamp_column),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{field} must not be empty"
                )));
            }
            if value.contains('\0') {
                return Err(ConfigError::ValidationError(format!(
                    "{field} must not contain NUL bytes"
                )));
            }
        }

        if self.output.directory.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "output.directory must not be empty".into(),
            ));
        }
        if self.output.log_file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "output.log_file must not be empty".into(),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be one of {}",
                LOG_FORMATS.join(", ")
            )));
        }
        Ok(())
    }
}
