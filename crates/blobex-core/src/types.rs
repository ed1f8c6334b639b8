//! Core data types for the export pipeline.

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One non-null image row, materialized from the database.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    /// Key column value, used (sanitized) as the filename stem
    pub key: String,

    /// Raw image bytes from the BLOB column
    pub data: Vec<u8>,

    /// Ordering column value as stored
    pub timestamp: Value,
}

impl ImageRecord {
    /// Filesystem-safe filename stem for this record.
    pub fn file_stem(&self) -> String {
        sanitize_key(&self.key)
    }
}

/// Map a database key to a filename stem.
///
/// Only `/` is replaced; other characters that are illegal on some
/// filesystems pass through unchanged.
pub fn sanitize_key(key: &str) -> String {
    key.replace('/', "-")
}

/// Terminal decision reached for a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportDecision {
    /// Bytes failed integrity verification; nothing touched
    Corrupt,
    /// Target already exists and `force` is off
    SkippedExisting,
    /// Converted to JPEG and written
    ConvertAndWrite,
    /// Written with the original bytes
    WriteAsIs,
    /// Would have been written, but this is a dry run
    DryRunWouldWrite,
    /// Passed verification but JPEG conversion failed
    ConvertFailed,
}

impl ExportDecision {
    /// Counted in `exported_count`.
    pub fn is_exported(self) -> bool {
        matches!(
            self,
            Self::ConvertAndWrite | Self::WriteAsIs | Self::DryRunWouldWrite
        )
    }

    /// Counted in `corrupt_count` (verification and conversion failures share a bucket).
    pub fn is_corrupt(self) -> bool {
        matches!(self, Self::Corrupt | Self::ConvertFailed)
    }
}

/// What happened to a record, reported to the export observer.
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    /// Unsanitized database key
    pub key: String,

    /// Target path, once one was computed (absent for corrupt records)
    pub path: Option<PathBuf>,

    /// Terminal decision
    pub decision: ExportDecision,

    /// Bytes were re-encoded as JPEG (also true for dry runs)
    pub converted: bool,
}

/// Counters accumulated over one export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    /// Rows in the table, including NULL images
    pub total_in_db: u64,

    /// Rows with a non-null image
    pub non_null_count: u64,

    /// Rows considered after `limit` was applied
    pub selected_count: u64,

    /// Distinct filename stems present in the output directory before the run
    pub existing_on_disk_count: u64,

    /// Corrupt plus conversion failures
    pub corrupt_count: u64,

    /// Records skipped because the target file existed
    pub skipped_existing_count: u64,

    /// Records written (or that would have been, in a dry run)
    pub exported_count: u64,

    /// Records re-encoded as JPEG
    pub converted_count: u64,
}

impl RunCounters {
    /// Fold one record's outcome into the counters.
    pub fn record(&mut self, outcome: &RecordOutcome) {
        if outcome.decision.is_corrupt() {
            self.corrupt_count += 1;
        } else if outcome.decision == ExportDecision::SkippedExisting {
            self.skipped_existing_count += 1;
        } else if outcome.decision.is_exported() {
            self.exported_count += 1;
        }
        if outcome.converted {
            self.converted_count += 1;
        }
    }

    /// Records that reached a terminal decision.
    pub fn processed(&self) -> u64 {
        self.exported_count + self.corrupt_count + self.skipped_existing_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(decision: ExportDecision, converted: bool) -> RecordOutcome {
        RecordOutcome {
            key: "k".to_string(),
            path: None,
            decision,
            converted,
        }
    }

    #[test]
    fn test_sanitize_key_replaces_slashes() {
        assert_eq!(sanitize_key("b/x"), "b-x");
        assert_eq!(sanitize_key("a/b/c"), "a-b-c");
        assert_eq!(sanitize_key("plain"), "plain");
    }

    #[test]
    fn test_sanitize_key_leaves_other_characters() {
        assert_eq!(sanitize_key("a:b*c?"), "a:b*c?");
        assert_eq!(sanitize_key("a\\b"), "a\\b");
    }

    #[test]
    fn test_every_decision_lands_in_one_bucket() {
        let all = [
            ExportDecision::Corrupt,
            ExportDecision::SkippedExisting,
            ExportDecision::ConvertAndWrite,
            ExportDecision::WriteAsIs,
            ExportDecision::DryRunWouldWrite,
            ExportDecision::ConvertFailed,
        ];
        for decision in all {
            let mut counters = RunCounters::default();
            counters.record(&outcome(decision, false));
            assert_eq!(counters.processed(), 1, "{decision:?}");
        }
    }

    #[test]
    fn test_convert_failed_counts_as_corrupt() {
        let mut counters = RunCounters::default();
        counters.record(&outcome(ExportDecision::ConvertFailed, false));
        counters.record(&outcome(ExportDecision::Corrupt, false));
        assert_eq!(counters.corrupt_count, 2);
        assert_eq!(counters.exported_count, 0);
    }

    #[test]
    fn test_dry_run_counts_as_exported_and_converted() {
        let mut counters = RunCounters::default();
        counters.record(&outcome(ExportDecision::DryRunWouldWrite, true));
        assert_eq!(counters.exported_count, 1);
        assert_eq!(counters.converted_count, 1);
    }

    #[test]
    fn test_decision_serializes_snake_case() {
        let json = serde_json::to_string(&ExportDecision::DryRunWouldWrite).unwrap();
        assert_eq!(json, "\"dry_run_would_write\"");
    }
}
