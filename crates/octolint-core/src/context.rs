//! Context handed to checks at execution time.

use std::sync::Arc;

use crate::client::{ProjectFilter, SpaceClient};
use crate::error::{CheckError, ClientError, ErrorHandler, PermissiveErrorHandler};
use crate::types::{Category, CheckResult};

/// Default bound on concurrent per-project fetches inside one check.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Receives progress notifications from running checks.
///
/// Checks never log through a global; they report through the reporter in
/// their [`CheckContext`].
pub trait ProgressReporter: Send + Sync {
    /// A check started executing.
    fn started(&self, check: &str);

    /// A check finished `done` of `total` items.
    fn progress(&self, check: &str, done: usize, total: usize);

    /// An item was skipped after a tolerated failure.
    fn skipped(&self, check: &str, item: &str, err: &ClientError);

    /// A check finished executing.
    fn finished(&self, check: &str);
}

/// Reporter emitting `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn started(&self, check: &str) {
        tracing::debug!("Starting check {check}");
    }

    #[allow(clippy::cast_precision_loss)]
    fn progress(&self, check: &str, done: usize, total: usize) {
        if total > 0 {
            let percent = done as f64 / total as f64 * 100.0;
            tracing::debug!("{check} {percent:.2}% complete");
        }
    }

    fn skipped(&self, check: &str, item: &str, err: &ClientError) {
        tracing::warn!("{check}: skipping {item}: {err}");
    }

    fn finished(&self, check: &str) {
        tracing::debug!("Ended check {check}");
    }
}

/// Everything a check needs besides its own configuration.
#[derive(Clone)]
pub struct CheckContext {
    client: Option<Arc<dyn SpaceClient>>,
    errors: Arc<dyn ErrorHandler>,
    reporter: Arc<dyn ProgressReporter>,
    filter: ProjectFilter,
    concurrency: usize,
}

impl Default for CheckContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CheckContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckContext")
            .field("has_client", &self.client.is_some())
            .field("filter", &self.filter)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl CheckContext {
    /// Creates a context without a client, using the permissive error policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: None,
            errors: Arc::new(PermissiveErrorHandler),
            reporter: Arc::new(TracingReporter),
            filter: ProjectFilter::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Attaches the data-access client.
    #[must_use]
    pub fn with_client(mut self, client: Arc<dyn SpaceClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the error policy.
    #[must_use]
    pub fn with_error_handler(mut self, errors: Arc<dyn ErrorHandler>) -> Self {
        self.errors = errors;
        self
    }

    /// Sets the progress reporter.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Sets the base project filter.
    #[must_use]
    pub fn with_filter(mut self, filter: ProjectFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the bound on concurrent fetches. Zero is treated as one.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Returns the client.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::ClientNotInitialized`] when none is attached.
    pub fn client(&self) -> Result<&dyn SpaceClient, CheckError> {
        self.client.as_deref().ok_or(CheckError::ClientNotInitialized)
    }

    /// Returns the error policy.
    #[must_use]
    pub fn errors(&self) -> &dyn ErrorHandler {
        self.errors.as_ref()
    }

    /// Returns the progress reporter.
    #[must_use]
    pub fn reporter(&self) -> &dyn ProgressReporter {
        self.reporter.as_ref()
    }

    /// Returns the project filter limited to `max` projects (0 = unlimited).
    #[must_use]
    pub fn project_filter(&self, max: usize) -> ProjectFilter {
        if max == 0 {
            self.filter.clone()
        } else {
            self.filter.with_max(max)
        }
    }

    /// Returns the concurrency bound.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Routes a failed check-level fetch through the error policy.
    ///
    /// # Errors
    ///
    /// Returns the failure when the policy treats it as fatal.
    pub fn handle_error(
        &self,
        check: &str,
        category: Category,
        err: ClientError,
    ) -> Result<Option<CheckResult>, CheckError> {
        self.errors.handle_error(check, category, err)
    }

    /// Decides what to do with a failed per-item fetch.
    ///
    /// Returns `Ok(())` when the item should be skipped, reporting the skip.
    ///
    /// # Errors
    ///
    /// Returns the failure when the policy treats it as fatal.
    pub fn skip_or_abort(&self, check: &str, item: &str, err: ClientError) -> Result<(), CheckError> {
        if self.errors.should_continue(&err) {
            self.reporter.skipped(check, item, &err);
            Ok(())
        } else {
            Err(err.into())
        }
    }
}
