//! Check command implementation.

use anyhow::{Context, Result};
use octolint_checks::configured_checks;
use octolint_core::{Analyzer, Config, LintReport, SnapshotClient};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Command-line options of `octolint check`.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Space snapshot to analyze.
    pub snapshot: PathBuf,
    /// Report format.
    pub format: OutputFormat,
    /// Check ids added to the skip list.
    pub skip: Vec<String>,
    /// Check ids added to the only list.
    pub only: Vec<String>,
    /// Fetch concurrency override.
    pub concurrency: Option<usize>,
    /// Use the strict error policy.
    pub strict: bool,
}

/// Runs the check command.
///
/// Exits with status 1 when any check errored or failed.
pub fn run(options: &CheckOptions, source: &ConfigSource) -> Result<ExitCode> {
    let report = analyze(options, source)?;

    super::output::print(&report, options.format)?;

    if report.has_errors() {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

fn analyze(options: &CheckOptions, source: &ConfigSource) -> Result<LintReport> {
    let mut config = source.load()?;
    apply_overrides(&mut config, options);

    let client = SnapshotClient::from_file(&options.snapshot)
        .with_context(|| format!("Failed to load snapshot: {}", options.snapshot.display()))?;

    let mut builder = Analyzer::builder()
        .client(Arc::new(client))
        .config(config.clone());
    if let Some(concurrency) = options.concurrency {
        builder = builder.concurrency(concurrency);
    }
    for check in configured_checks(&config) {
        builder = builder.check_box(check);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} checks",
        options.snapshot.display(),
        analyzer.enabled_checks().len()
    );

    analyzer.analyze().context("Analysis failed")
}

fn apply_overrides(config: &mut Config, options: &CheckOptions) {
    config.analyzer.skip.extend(options.skip.iter().cloned());
    config.analyzer.only.extend(options.only.iter().cloned());
    if options.strict {
        config.analyzer.strict_errors = true;
    }
}
