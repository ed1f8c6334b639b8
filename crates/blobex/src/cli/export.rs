//! The default command: export images from the database.

use anyhow::Context;
use blobex_core::{Config, ExportOptions, Exporter, RunCounters, SummaryFormat, SummaryWriter};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Arguments for exporting.
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Overwrite existing files instead of skipping them
    #[arg(long)]
    pub force: bool,

    /// Simulate actions without writing any files
    #[arg(long)]
    pub dry_run: bool,

    /// Save a log of all actions to the configured log file
    #[arg(long)]
    pub keep_log: bool,

    /// Preserve original image format instead of converting to JPEG
    #[arg(long)]
    pub keep_image_format: bool,

    /// Limit the number of images to export (oldest first)
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// SQLite database to read (overrides database.path)
    #[arg(long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Directory to export into (overrides output.directory)
    #[arg(long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Log file for --keep-log (overrides output.log_file)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Summary format printed to stdout
    #[arg(long, value_enum, default_value = "text")]
    pub summary: SummaryArg,
}

/// Summary format selectable on the command line.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum SummaryArg {
    /// Banner with one counter per line
    #[default]
    Text,
    /// JSON object with all counters
    Json,
}

impl From<SummaryArg> for SummaryFormat {
    fn from(arg: SummaryArg) -> Self {
        match arg {
            SummaryArg::Text => SummaryFormat::Text,
            SummaryArg::Json => SummaryFormat::Json,
        }
    }
}

impl ExportArgs {
    /// Pipeline options carried by these arguments.
    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            force: self.force,
            dry_run: self.dry_run,
            keep_log: self.keep_log,
            keep_image_format: self.keep_image_format,
            limit: self.limit,
        }
    }

    /// Apply path overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref database) = self.database {
            config.database.path = database.clone();
        }
        if let Some(ref output_dir) = self.output_dir {
            config.output.directory = output_dir.clone();
        }
        if let Some(ref log_file) = self.log_file {
            config.output.log_file = log_file.clone();
        }
    }
}

/// Execute the export.
pub fn execute(args: ExportArgs, mut config: Config) -> anyhow::Result<()> {
    args.apply_overrides(&mut config);
    config.validate()?;

    if args.dry_run {
        tracing::info!("Dry run: no files will be written");
    }

    let exporter = Exporter::new(config, args.options());
    let job = exporter.prepare().context("Export could not start")?;
    if job.is_empty() {
        tracing::warn!("No images to export");
    }

    let progress = create_progress_bar(job.len() as u64);
    let counters = exporter.export(job, |outcome| {
        progress.set_message(outcome.key.clone());
        progress.inc(1);
    });
    progress.finish_and_clear();
    let counters = counters.context("Export aborted")?;

    print_summary(&counters, args.summary.into())?;
    Ok(())
}

fn print_summary(counters: &RunCounters, format: SummaryFormat) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut writer = SummaryWriter::new(stdout.lock(), format);
    writer.write(counters)?;
    writer.flush()?;
    Ok(())
}

/// Create a progress bar for the export pass.
fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    pb.set_style(style);
    pb
}
