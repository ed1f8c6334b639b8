//! Export pipeline components.
//!
//! - **decode**: Decode raw bytes with content-based format guessing
//! - **integrity**: Corruption detection
//! - **convert**: JPEG re-encoding
//! - **snapshot**: Pre-run listing of the output directory
//! - **log**: Run log with optional file output
//! - **exporter**: Orchestrates the full per-record pass

pub mod convert;
pub mod decode;
pub mod exporter;
pub mod integrity;
pub mod log;
pub mod snapshot;

// Re-exports for convenient access
pub use convert::{JpegConverter, JPEG_QUALITY};
pub use decode::{decode_bytes, DecodeResult, DecodedImage};
pub use exporter::{ExportJob, ExportOptions, Exporter};
pub use integrity::IntegrityChecker;
pub use log::RunLog;
pub use snapshot::ExistingFiles;
