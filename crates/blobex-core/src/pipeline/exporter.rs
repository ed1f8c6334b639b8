//! Export orchestration: wires the row source, integrity check, format
//! detection and conversion into a single sequential pass.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{ExportError, Result};
use crate::media::MediaKind;
use crate::source::RowSource;
use crate::types::{ExportDecision, ImageRecord, RecordOutcome, RunCounters};

use super::convert::JpegConverter;
use super::integrity::IntegrityChecker;
use super::log::RunLog;
use super::snapshot::ExistingFiles;

/// Options controlling write policy for one run.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Overwrite existing files instead of skipping them
    pub force: bool,
    /// Decide everything but write nothing
    pub dry_run: bool,
    /// Save the run log to the configured log file
    pub keep_log: bool,
    /// Keep the detected format instead of converting to JPEG
    pub keep_image_format: bool,
    /// Only consider the first N non-null rows (oldest first)
    pub limit: Option<usize>,
}

/// Records selected for export, plus the pre-run figures for the summary.
#[derive(Debug)]
pub struct ExportJob {
    records: Vec<ImageRecord>,
    counters: RunCounters,
    log: RunLog,
}

impl ExportJob {
    /// Number of records that will be processed.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Runs the export pipeline over a database.
pub struct Exporter {
    config: Config,
    options: ExportOptions,
}

impl Exporter {
    pub fn new(config: Config, options: ExportOptions) -> Self {
        Self { config, options }
    }

    /// Prepare and export in one go.
    pub fn run(&self) -> Result<RunCounters> {
        let job = self.prepare()?;
        self.export(job, |_| {})
    }

    /// Create the output directory, snapshot it, and load the rows to export.
    ///
    /// Every failure here is fatal.
    pub fn prepare(&self) -> Result<ExportJob> {
        let output_dir = self.config.output_dir();
        std::fs::create_dir_all(&output_dir).map_err(|source| ExportError::OutputDir {
            path: output_dir.clone(),
            source,
        })?;

        let mut log = RunLog::new(self.options.keep_log);

        let existing =
            ExistingFiles::scan(&output_dir).map_err(|source| ExportError::OutputDir {
                path: output_dir.clone(),
                source,
            })?;

        let source = RowSource::new(self.config.database_path(), &self.config.database);
        let rows = source.fetch()?;

        let mut records = rows.records;
        log.log(format!("Found {} non-null images in DB", records.len()));

        let non_null_count = records.len() as u64;
        if let Some(limit) = self.options.limit {
            records.truncate(limit);
        }

        let counters = RunCounters {
            total_in_db: rows.total_count,
            non_null_count,
            selected_count: records.len() as u64,
            existing_on_disk_count: existing.len() as u64,
            ..RunCounters::default()
        };

        Ok(ExportJob {
            records,
            counters,
            log,
        })
    }

    /// Process every record in `job`, calling `observer` after each one.
    ///
    /// Per-record problems (corrupt bytes, failed conversion) are counted and
    /// logged. A failed file write aborts the run; files already written stay.
    pub fn export<F>(&self, job: ExportJob, mut observer: F) -> Result<RunCounters>
    where
        F: FnMut(&RecordOutcome),
    {
        let ExportJob {
            records,
            mut counters,
            mut log,
        } = job;
        let output_dir = self.config.output_dir();

        for record in &records {
            let outcome = self.process_record(record, &output_dir, &mut log)?;
            tracing::debug!(
                "{} -> {:?} ({:?})",
                outcome.key,
                outcome.decision,
                outcome.path
            );
            counters.record(&outcome);
            observer(&outcome);
        }

        log.flush_to(&self.config.log_path())?;
        Ok(counters)
    }

    /// Take one record to its terminal decision.
    fn process_record(
        &self,
        record: &ImageRecord,
        output_dir: &Path,
        log: &mut RunLog,
    ) -> Result<RecordOutcome> {
        let outcome = |path: Option<PathBuf>, decision, converted| RecordOutcome {
            key: record.key.clone(),
            path,
            decision,
            converted,
        };

        if let Err(e) = IntegrityChecker::verify(&record.data) {
            tracing::debug!("{}: {}", record.key, e);
            log.log(format!("Corrupt image: {}", record.key));
            return Ok(outcome(None, ExportDecision::Corrupt, false));
        }

        let kind = MediaKind::detect(&record.data);
        let path = output_dir.join(self.target_file_name(record, kind));

        if path.exists() && !self.options.force {
            log.log(format!("Skipping existing file: {}", path.display()));
            return Ok(outcome(Some(path), ExportDecision::SkippedExisting, false));
        }

        let mut bytes = Cow::Borrowed(record.data.as_slice());
        let converted = !self.options.keep_image_format && !kind.is_jpeg();
        if converted {
            match JpegConverter::convert(&record.data) {
                Ok(jpeg) => {
                    log.log(format!("Converted {} ({}) -> JPEG", record.key, kind));
                    bytes = Cow::Owned(jpeg);
                }
                Err(e) => {
                    log.log(format!("Failed to convert {}: {}", record.key, e));
                    return Ok(outcome(Some(path), ExportDecision::ConvertFailed, false));
                }
            }
        }

        if self.options.dry_run {
            log.log(format!("[DRY-RUN] Would export: {}", path.display()));
            return Ok(outcome(
                Some(path),
                ExportDecision::DryRunWouldWrite,
                converted,
            ));
        }

        std::fs::write(&path, &bytes).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

        let decision = if converted {
            ExportDecision::ConvertAndWrite
        } else {
            ExportDecision::WriteAsIs
        };
        Ok(outcome(Some(path), decision, converted))
    }

    /// `<sanitized key>.<ext>`, where ext is the detected one when keeping
    /// the original format and `jpg` otherwise.
    fn target_file_name(&self, record: &ImageRecord, kind: MediaKind) -> String {
        let ext = if self.options.keep_image_format {
            kind
        } else {
            MediaKind::Jpeg
        };
        format!("{}.{}", record.file_stem(), ext.extension())
    }
}
