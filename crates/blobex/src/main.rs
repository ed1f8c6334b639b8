//! blobex CLI - export image BLOBs stored in a SQLite table.
//!
//! Every non-null image row is checked for corruption, converted to JPEG
//! (unless `--keep-image-format`), and written to the output directory as
//! `<key>.<ext>`. Existing files are skipped unless `--force` is given.
//!
//! # Usage
//!
//! ```bash
//! # Export with the configured database and output directory
//! blobex
//!
//! # Preview the first 10 exports without writing
//! blobex --dry-run --limit 10
//!
//! # Keep original formats and overwrite previous exports
//! blobex --keep-image-format --force --database photos.db
//!
//! # View configuration
//! blobex config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// blobex - export image BLOBs from a SQLite database to a directory.
#[derive(Parser, Debug)]
#[command(name = "blobex")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long = "config", global = true, env = "BLOBEX_CONFIG", value_name = "PATH")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    export: cli::export::ExportArgs,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    // Exporting needs a valid config; the config command can repair a broken one.
    let config = match (cli::load_config(cli.config_file.as_deref()), &cli.command) {
        (Ok(config), _) => config,
        (Err(e), Some(Commands::Config(_))) => {
            eprintln!("Warning: {e:#}\n  Using default configuration.");
            blobex_core::Config::default()
        }
        (Err(e), None) => return Err(e),
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("blobex v{}", blobex_core::VERSION);

    match cli.command {
        Some(Commands::Config(args)) => {
            cli::config::execute(args, config, cli.config_file.as_deref())
        }
        None => cli::export::execute(cli.export, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_exports() {
        let cli = Cli::try_parse_from(["blobex"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.export.force);
    }

    #[test]
    fn export_flags_parse() {
        let cli = Cli::try_parse_from([
            "blobex",
            "--force",
            "--dry-run",
            "--keep-log",
            "--keep-image-format",
            "--limit",
            "5",
        ])
        .unwrap();
        assert!(cli.export.force);
        assert!(cli.export.dry_run);
        assert!(cli.export.keep_log);
        assert!(cli.export.keep_image_format);
        assert_eq!(cli.export.limit, Some(5));
    }

    #[test]
    fn negative_limit_is_rejected() {
        assert!(Cli::try_parse_from(["blobex", "--limit", "-1"]).is_err());
    }

    #[test]
    fn version_flag_short_circuits() {
        let err = Cli::try_parse_from(["blobex", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn config_subcommand_parses() {
        let cli = Cli::try_parse_from(["blobex", "config", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Config(_))));
    }

    #[test]
    fn export_flags_conflict_with_subcommand() {
        assert!(Cli::try_parse_from(["blobex", "--dry-run", "config", "show"]).is_err());
    }
}
