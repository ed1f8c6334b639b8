//! Error types for the blobex export pipeline.
//!
//! Fatal errors (`ExportError` and the errors it wraps) abort the run.
//! Per-record errors (`DecodeError`, `ConversionError`) never leave the
//! pipeline: they are folded into an export decision and counted.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for blobex operations.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database access errors
    #[error("Database error: {0}")]
    Source(#[from] SourceError),

    /// The output directory could not be created or listed
    #[error("Cannot prepare output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing an exported image failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the run log failed
    #[error("Failed to write log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while reading records out of the database.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The database file could not be opened
    #[error("Cannot open database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A query failed (missing table, missing column, ...)
    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// The key column holds a value that cannot become a filename
    #[error("Unsupported value in key column {column}: {type_name}")]
    UnsupportedKey { column: String, type_name: String },
}

/// Raw bytes could not be decoded as an image.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct DecodeError {
    pub message: String,
}

impl From<image::ImageError> for DecodeError {
    fn from(e: image::ImageError) -> Self {
        Self {
            message: e.to_string(),
        }
    }
}

/// JPEG conversion failed for a single record.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Source bytes could not be decoded
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Re-encoding as JPEG failed
    #[error("JPEG encode failed: {message}")]
    Encode { message: String },
}

/// Convenience type alias for blobex results.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Convenience type alias for database results.
pub type SourceResult<T> = std::result::Result<T, SourceError>;
