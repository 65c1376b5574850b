//! Error taxonomy and the classification policy checks apply to
//! data-access failures.
//!
//! Classification happens at each fetch, not centrally: a check decides per
//! call whether a failure means "skip this project" or "give up".

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::types::{Category, CheckResult, Severity};

/// Failure reported by a [`SpaceClient`](crate::SpaceClient).
#[derive(Debug, Clone, Error, Diagnostic, PartialEq, Eq)]
pub enum ClientError {
    /// The requested entity does not exist.
    #[error("{resource} was not found")]
    #[diagnostic(code(octolint::client::not_found))]
    NotFound {
        /// Description of the requested entity.
        resource: String,
    },

    /// The credentials lack permission to read the entity.
    #[error("permission denied reading {resource} (status {status})")]
    #[diagnostic(
        code(octolint::client::permission_denied),
        help("grant the API key read access to this resource")
    )]
    PermissionDenied {
        /// Description of the requested entity.
        resource: String,
        /// Status code returned by the platform.
        status: u16,
    },

    /// Network, protocol or unexpected server failure.
    #[error("failed to read {resource}: {message}")]
    #[diagnostic(code(octolint::client::transport))]
    Transport {
        /// Description of the requested entity.
        resource: String,
        /// Underlying failure message.
        message: String,
    },
}

impl ClientError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates a permission error with the conventional 403 status.
    #[must_use]
    pub fn forbidden(resource: impl Into<String>) -> Self {
        Self::PermissionDenied {
            resource: resource.into(),
            status: 403,
        }
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Classifies this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::Transport { .. } => ErrorKind::Transient,
        }
    }
}

/// Coarse classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The entity is absent; treated as empty.
    NotFound,
    /// The entity could not be read with the current credentials.
    PermissionDenied,
    /// Anything else; fatal for the check.
    Transient,
}

/// Fatal failure of a check's execution.
#[derive(Debug, Error, Diagnostic)]
pub enum CheckError {
    /// No data-access client was attached to the context.
    #[error("the space client is not initialized")]
    #[diagnostic(
        code(octolint::check::client_not_initialized),
        help("attach a client with Analyzer::builder().client(..)")
    )]
    ClientNotInitialized,

    /// A data-access call failed and the error policy chose to abort.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Client(#[from] ClientError),
}

impl CheckError {
    /// Classifies this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ClientNotInitialized => ErrorKind::Transient,
            Self::Client(e) => e.kind(),
        }
    }
}

/// Decides how a check reacts to a data-access failure.
pub trait ErrorHandler: Send + Sync {
    /// Returns true when the caller should skip the current item (project,
    /// process, ...) and continue, false when the check must abort.
    fn should_continue(&self, err: &ClientError) -> bool;

    /// Converts a failure of a check-level fetch into the check's outcome.
    ///
    /// # Errors
    ///
    /// Returns the failure as a [`CheckError`] when it is fatal for the check.
    fn handle_error(
        &self,
        check: &str,
        category: Category,
        err: ClientError,
    ) -> Result<Option<CheckResult>, CheckError>;
}

/// Default policy: missing entities are empty, permission problems are
/// reported as [`Severity::Permission`] results, everything else aborts the
/// check.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveErrorHandler;

impl ErrorHandler for PermissiveErrorHandler {
    fn should_continue(&self, err: &ClientError) -> bool {
        matches!(
            err.kind(),
            ErrorKind::NotFound | ErrorKind::PermissionDenied
        )
    }

    fn handle_error(
        &self,
        check: &str,
        category: Category,
        err: ClientError,
    ) -> Result<Option<CheckResult>, CheckError> {
        match err.kind() {
            ErrorKind::NotFound => Ok(Some(CheckResult::new(
                check,
                Severity::Ok,
                category,
                format!("Nothing to check: {err}"),
            ))),
            ErrorKind::PermissionDenied => Ok(Some(CheckResult::new(
                check,
                Severity::Permission,
                category,
                format!("The check could not be completed: {err}"),
            ))),
            ErrorKind::Transient => Err(err.into()),
        }
    }
}

/// Fail-fast policy: only missing entities are tolerated.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictErrorHandler;

impl ErrorHandler for StrictErrorHandler {
    fn should_continue(&self, err: &ClientError) -> bool {
        err.kind() == ErrorKind::NotFound
    }

    fn handle_error(
        &self,
        check: &str,
        category: Category,
        err: ClientError,
    ) -> Result<Option<CheckResult>, CheckError> {
        if err.kind() == ErrorKind::NotFound {
            return PermissiveErrorHandler.handle_error(check, category, err);
        }
        Err(err.into())
    }
}

/// Extension for data-access results.
pub trait ResultExt<T> {
    /// Treats a not-found failure as an empty value.
    ///
    /// # Errors
    ///
    /// Passes through every other failure unchanged.
    fn missing_as_empty(self) -> Result<T, ClientError>;
}

impl<T: Default> ResultExt<T> for Result<T, ClientError> {
    fn missing_as_empty(self) -> Result<T, ClientError> {
        match self {
            Err(ClientError::NotFound { resource }) => {
                tracing::debug!("{resource} not found, treating as empty");
                Ok(T::default())
            }
            other => other,
        }
    }
}
