//! octolint CLI tool.
//!
//! Usage:
//! ```bash
//! octolint check --snapshot space.json [OPTIONS]
//! octolint list-checks
//! octolint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Best-practice linter for deployment automation spaces
#[derive(Parser)]
#[command(name = "octolint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "OCTOLINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run checks against a space snapshot
    Check {
        /// JSON export of the space to analyze
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Check ids to skip (comma-separated)
        #[arg(long, value_delimiter = ',')]
        skip: Vec<String>,

        /// Only run these check ids (comma-separated)
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,

        /// Maximum concurrent fetches inside a check
        #[arg(long)]
        concurrency: Option<usize>,

        /// Abort a check on permission failures instead of skipping the project
        #[arg(long)]
        strict: bool,
    },

    /// List available checks
    ListChecks,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-result compact format.
    Compact,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            snapshot,
            format,
            skip,
            only,
            concurrency,
            strict,
        } => {
            let source = config_resolver::resolve(cli.config.as_deref());
            let options = commands::check::CheckOptions {
                snapshot,
                format,
                skip,
                only,
                concurrency,
                strict,
            };
            commands::check::run(&options, &source)
        }
        Commands::ListChecks => {
            commands::list_checks::run();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force } => {
            commands::init::run(force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
