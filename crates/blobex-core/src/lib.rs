//! blobex Core - export image BLOBs from a SQLite table to a directory.
//!
//! Each non-null image row is verified, classified by its magic bytes,
//! optionally re-encoded as JPEG, and written as `<key>.<ext>` unless the
//! target already exists.
//!
//! # Architecture
//!
//! ```text
//! RowSource → limit → IntegrityChecker → MediaKind → JpegConverter? → write → RunCounters
//! ```
//!
//! Everything runs sequentially on the calling thread. The database
//! connection is closed before the first file is written.
//!
//! # Usage
//!
//! ```rust,ignore
//! use blobex_core::{Config, ExportOptions, Exporter};
//!
//! fn main() -> blobex_core::Result<()> {
//!     let config = Config::load()?;
//!     let counters = Exporter::new(config, ExportOptions::default()).run()?;
//!     println!("Exported {}", counters.exported_count);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod media;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, ConversionError, DecodeError, ExportError, Result, SourceError};
pub use media::MediaKind;
pub use pipeline::{ExportJob, ExportOptions, Exporter, IntegrityChecker, JpegConverter};
pub use report::{SummaryFormat, SummaryWriter};
pub use source::{RowSet, RowSource};
pub use types::{ExportDecision, ImageRecord, RecordOutcome, RunCounters};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
