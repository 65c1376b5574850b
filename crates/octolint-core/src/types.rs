//! Core types for check results and lint reports.

use serde::{Deserialize, Serialize};

use crate::error::{CheckError, ErrorKind};

/// Severity of a check result.
///
/// Ordering follows how loudly a result should be reported: `Ok` is the
/// quietest, `Error` the loudest. `Permission` sits between warnings and
/// errors because the analysis could not be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The configuration follows the best practice.
    Ok,
    /// A best-practice violation that should be reviewed.
    Warning,
    /// The credentials used lacked permission to finish the check.
    Permission,
    /// The check could not run as configured (e.g. a bad regex).
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Warning => write!(f, "warning"),
            Self::Permission => write!(f, "permission"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Area of best practice a check belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// How projects, environments and variables are organized.
    Organization,
    /// Security posture of targets and credentials.
    Security,
    /// Naming conventions.
    Naming,
    /// Deployment performance.
    Performance,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Organization => write!(f, "organization"),
            Self::Security => write!(f, "security"),
            Self::Naming => write!(f, "naming"),
            Self::Performance => write!(f, "performance"),
        }
    }
}

/// Outcome of a single completed check.
///
/// Results are immutable once built; use the accessors to read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    message: String,
    check: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    link: String,
    severity: Severity,
    category: Category,
}

impl CheckResult {
    /// Creates a new result without a reference link.
    #[must_use]
    pub fn new(
        check: impl Into<String>,
        severity: Severity,
        category: Category,
        message: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            check: check.into(),
            link: String::new(),
            severity,
            category,
        }
    }

    /// Attaches a documentation link explaining the best practice.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Identifier of the check that produced this result.
    #[must_use]
    pub fn check(&self) -> &str {
        &self.check
    }

    /// Reference link, empty when the check has none.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Severity of the result.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Category of the check.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Formats the result for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{} [{}]\n", self.check, self.category);
        for (i, line) in self.message.lines().enumerate() {
            if i == 0 {
                let _ = writeln!(output, "  {}: {}", self.severity, line);
            } else {
                let _ = writeln!(output, "    {line}");
            }
        }
        if !self.link.is_empty() {
            let _ = writeln!(output, "  = see: {}", self.link);
        }
        output
    }
}

impl std::fmt::Display for CheckResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.check,
            self.severity,
            self.category,
            self.message.replace('\n', "; ")
        )?;
        if !self.link.is_empty() {
            write!(f, " (see: {})", self.link)?;
        }
        Ok(())
    }
}

/// A check that failed fatally and produced no result.
#[derive(Debug, Serialize)]
pub struct CheckFailure {
    /// Identifier of the failed check.
    pub check: String,
    /// Classification of the failure.
    pub kind: ErrorKind,
    /// Rendered error message.
    pub message: String,
    /// The underlying error, kept for diagnostic rendering.
    #[serde(skip)]
    pub error: CheckError,
}

impl CheckFailure {
    /// Creates a failure record for `check`.
    #[must_use]
    pub fn new(check: impl Into<String>, error: CheckError) -> Self {
        Self {
            check: check.into(),
            kind: error.kind(),
            message: error.to_string(),
            error,
        }
    }
}

/// Number of results per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    /// Results with [`Severity::Ok`].
    pub ok: usize,
    /// Results with [`Severity::Warning`].
    pub warnings: usize,
    /// Results with [`Severity::Permission`].
    pub permissions: usize,
    /// Results with [`Severity::Error`].
    pub errors: usize,
}

/// Aggregated outcome of running a set of checks.
#[derive(Debug, Default, Serialize)]
pub struct LintReport {
    /// Results of checks that completed.
    pub results: Vec<CheckResult>,
    /// Checks that aborted with a fatal error.
    pub failures: Vec<CheckFailure>,
    /// Checks that reported themselves as not applicable.
    pub not_applicable: Vec<String>,
    /// Number of checks that were run.
    pub checks_run: usize,
}

impl LintReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any result is an error or any check failed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty() || self.results.iter().any(|r| r.severity == Severity::Error)
    }

    /// Returns true if any result is a warning or worse.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.results.iter().any(|r| r.severity >= Severity::Warning)
    }

    /// Returns results filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&CheckResult> {
        self.results
            .iter()
            .filter(|r| r.severity == severity)
            .collect()
    }

    /// Looks up the result of a specific check.
    #[must_use]
    pub fn result_for(&self, check: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.check == check)
    }

    /// Counts results by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for result in &self.results {
            match result.severity {
                Severity::Ok => counts.ok += 1,
                Severity::Warning => counts.warnings += 1,
                Severity::Permission => counts.permissions += 1,
                Severity::Error => counts.errors += 1,
            }
        }
        counts
    }

    /// Adds results from another report.
    pub fn extend(&mut self, other: Self) {
        self.results.extend(other.results);
        self.failures.extend(other.failures);
        self.not_applicable.extend(other.not_applicable);
        self.checks_run += other.checks_run;
    }
}
