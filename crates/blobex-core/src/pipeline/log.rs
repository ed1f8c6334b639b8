//! Run log: messages shown during the run and optionally saved afterwards.

use std::path::Path;

use crate::error::ExportError;

/// Append-only message buffer.
///
/// Every message goes to `tracing` at INFO. When `keep` is set the message
/// is also buffered so it can be written to the log file once, at the end.
#[derive(Debug, Default)]
pub struct RunLog {
    keep: bool,
    lines: Vec<String>,
}

impl RunLog {
    pub fn new(keep: bool) -> Self {
        Self {
            keep,
            lines: Vec::new(),
        }
    }

    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        if self.keep {
            self.lines.push(message);
        }
    }

    /// Write the buffered lines (newline-joined) to `path`, replacing any
    /// previous file. Does nothing unless the log is being kept.
    pub fn flush_to(&self, path: &Path) -> Result<(), ExportError> {
        if !self.keep {
            return Ok(());
        }
        std::fs::write(path, self.lines.join("\n")).map_err(|source| ExportError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Run log written to {:?}", path);
        Ok(())
    }
}
