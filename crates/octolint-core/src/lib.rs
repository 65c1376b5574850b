//! # octolint-core
//!
//! Core framework for linting the configuration of a deployment-automation
//! space (projects, environments, variables, lifecycles, targets).
//!
//! This crate provides the foundational traits and types for building
//! best-practice checks. It includes:
//!
//! - [`Check`] trait every check implements
//! - [`SpaceClient`] trait for reading platform entities, with an offline
//!   [`SnapshotClient`]
//! - [`ErrorHandler`] policies deciding whether a failing fetch skips an item
//!   or aborts a check
//! - [`Analyzer`] for orchestrating check execution
//! - [`CheckResult`] and [`LintReport`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use octolint_core::{Analyzer, SnapshotClient};
//! use std::sync::Arc;
//!
//! let client = SnapshotClient::from_file("space.json".as_ref())?;
//! let analyzer = Analyzer::builder()
//!     .client(Arc::new(client))
//!     .check(MyCheck::new())
//!     .build()?;
//!
//! let report = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod check;
mod client;
mod concurrency;
mod config;
mod context;
mod error;
mod snapshot;
mod types;

/// Platform entity snapshots.
pub mod model;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use check::{Check, CheckBox};
pub use client::{ProjectFilter, SpaceClient};
pub use concurrency::fan_out;
pub use config::{AnalyzerConfig, CheckConfig, Config, ConfigError};
pub use context::{CheckContext, ProgressReporter, TracingReporter, DEFAULT_CONCURRENCY};
pub use error::{
    CheckError, ClientError, ErrorHandler, ErrorKind, PermissiveErrorHandler, ResultExt,
    StrictErrorHandler,
};
pub use snapshot::{SnapshotClient, SnapshotError, SpaceSnapshot};
pub use types::{Category, CheckFailure, CheckResult, LintReport, Severity, SeverityCounts};
