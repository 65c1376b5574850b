//! Core analyzer for orchestrating check execution.

use miette::Diagnostic;
use rayon::prelude::*;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::check::{Check, CheckBox};
use crate::client::SpaceClient;
use crate::config::Config;
use crate::context::{CheckContext, ProgressReporter, TracingReporter};
use crate::error::{CheckError, ErrorHandler, PermissiveErrorHandler, StrictErrorHandler};
use crate::types::{CheckFailure, CheckResult, LintReport};

/// Errors that can occur while setting up an analysis.
#[derive(Debug, Error, Diagnostic)]
pub enum AnalyzerError {
    /// Two registered checks share an identifier.
    #[error("Duplicate check id: {0}")]
    #[diagnostic(code(octolint::analyzer::duplicate_check))]
    DuplicateCheck(String),

    /// The check pool could not be created.
    #[error("Failed to build check pool: {0}")]
    #[diagnostic(code(octolint::analyzer::pool))]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Outcome of running one check.
enum Outcome {
    Completed(CheckResult),
    NotApplicable,
    Failed(CheckError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    client: Option<Arc<dyn SpaceClient>>,
    checks: Vec<CheckBox>,
    skip: Vec<String>,
    only: Vec<String>,
    config: Option<Config>,
    concurrency: Option<usize>,
    errors: Option<Arc<dyn ErrorHandler>>,
    reporter: Option<Arc<dyn ProgressReporter>>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the data-access client checks read through.
    #[must_use]
    pub fn client(mut self, client: Arc<dyn SpaceClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Adds a check to the analyzer.
    #[must_use]
    pub fn check<C: Check + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Adds a boxed check to the analyzer.
    #[must_use]
    pub fn check_box(mut self, check: CheckBox) -> Self {
        self.checks.push(check);
        self
    }

    /// Adds a check id to skip.
    #[must_use]
    pub fn skip(mut self, id: impl Into<String>) -> Self {
        self.skip.push(id.into());
        self
    }

    /// Adds multiple check ids to skip.
    #[must_use]
    pub fn skips<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Restricts the run to the given check ids.
    #[must_use]
    pub fn only<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the per-check fetch concurrency from the configuration.
    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    /// Overrides the error policy derived from the configuration.
    #[must_use]
    pub fn error_handler(mut self, errors: Arc<dyn ErrorHandler>) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Sets the progress reporter (default: [`TracingReporter`]).
    #[must_use]
    pub fn reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if two checks share an id.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let mut config = self.config.unwrap_or_default();

        // Merge skip/only lists from the builder into config
        config.analyzer.skip.extend(self.skip);
        config.analyzer.only.extend(self.only);

        let mut seen = std::collections::HashSet::new();
        for check in &self.checks {
            if !seen.insert(check.id()) {
                return Err(AnalyzerError::DuplicateCheck(check.id().to_string()));
            }
        }

        for id in config.analyzer.skip.iter().chain(&config.analyzer.only) {
            if !seen.contains(id.as_str()) {
                warn!("Unknown check id: {id}");
            }
        }

        let errors = self.errors.unwrap_or_else(|| {
            if config.analyzer.strict_errors {
                Arc::new(StrictErrorHandler)
            } else {
                Arc::new(PermissiveErrorHandler)
            }
        });

        let mut context = CheckContext::new()
            .with_error_handler(errors)
            .with_reporter(self.reporter.unwrap_or_else(|| Arc::new(TracingReporter)))
            .with_filter(config.project_filter())
            .with_concurrency(self.concurrency.unwrap_or(config.analyzer.concurrency));
        if let Some(client) = self.client {
            context = context.with_client(client);
        }

        Ok(Analyzer {
            checks: self.checks,
            context,
            config,
        })
    }
}

/// The main analyzer that orchestrates check execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    checks: Vec<CheckBox>,
    context: CheckContext,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered checks.
    #[must_use]
    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Returns the ids of the checks that will run.
    #[must_use]
    pub fn enabled_checks(&self) -> Vec<&'static str> {
        self.checks
            .iter()
            .map(|c| c.id())
            .filter(|id| self.config.is_check_enabled(id))
            .collect()
    }

    /// Returns the context checks are executed with.
    #[must_use]
    pub fn context(&self) -> &CheckContext {
        &self.context
    }

    /// Runs every enabled check and aggregates the outcome.
    ///
    /// A check that fails is recorded in [`LintReport::failures`]; it never
    /// prevents the remaining checks from running.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured check pool cannot be created.
    pub fn analyze(&self) -> Result<LintReport, AnalyzerError> {
        let enabled: Vec<&CheckBox> = self
            .checks
            .iter()
            .filter(|c| {
                let enabled = self.config.is_check_enabled(c.id());
                if !enabled {
                    debug!("Skipping disabled check: {}", c.id());
                }
                enabled
            })
            .collect();

        info!("Running {} checks", enabled.len());

        let outcomes: Vec<(&'static str, Outcome)> = match self.config.analyzer.parallelism {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads.max(1))
                .build()?
                .install(|| self.run_all(&enabled)),
            None => self.run_all(&enabled),
        };

        let mut report = LintReport::new();
        report.checks_run = outcomes.len();
        for (id, outcome) in outcomes {
            match outcome {
                Outcome::Completed(result) => report.results.push(result),
                Outcome::NotApplicable => report.not_applicable.push(id.to_string()),
                Outcome::Failed(error) => {
                    warn!("Check {id} failed: {error}");
                    report.failures.push(CheckFailure::new(id, error));
                }
            }
        }

        report.results.sort_by(|a, b| a.check().cmp(b.check()));
        report.failures.sort_by(|a, b| a.check.cmp(&b.check));
        report.not_applicable.sort();

        info!(
            "Analysis complete: {} results, {} failures",
            report.results.len(),
            report.failures.len()
        );

        Ok(report)
    }

    fn run_all(&self, checks: &[&CheckBox]) -> Vec<(&'static str, Outcome)> {
        checks
            .par_iter()
            .map(|check| (check.id(), self.run_one((**check).as_ref())))
            .collect()
    }

    fn run_one(&self, check: &dyn Check) -> Outcome {
        let reporter = self.context.reporter();
        reporter.started(check.id());
        let outcome = match check.execute(&self.context) {
            Ok(Some(result)) => Outcome::Completed(result),
            Ok(None) => Outcome::NotApplicable,
            Err(error) => Outcome::Failed(error),
        };
        reporter.finished(check.id());
        outcome
    }
}
