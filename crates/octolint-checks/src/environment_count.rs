//! Check for spaces with too many environments.
//!
//! A long environment list usually means environments stand in for tenants,
//! customers or projects.
//!
//! # Configuration
//!
//! - `max_environments`: Maximum number of environments (default: 20)

use octolint_core::{
    Category, Check, CheckConfig, CheckContext, CheckError, CheckResult, ResultExt, Severity,
};

/// Check id for environment-count.
pub const ID: &str = "OctoLintEnvironmentCount";

/// Documentation on structuring environments.
pub const LINK: &str = "https://octopus.com/docs/getting-started/best-practices/environments-and-deployment-targets-and-roles#environments";

const DEFAULT_MAX_ENVIRONMENTS: usize = 20;

/// Configuration for [`EnvironmentCount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentCountConfig {
    /// Number of environments above which the check warns.
    pub max_environments: usize,
}

impl Default for EnvironmentCountConfig {
    fn default() -> Self {
        Self {
            max_environments: DEFAULT_MAX_ENVIRONMENTS,
        }
    }
}

impl EnvironmentCountConfig {
    /// Reads the options from a `[checks.OctoLintEnvironmentCount]` table.
    #[must_use]
    pub fn from_check_config(config: &CheckConfig) -> Self {
        Self {
            max_environments: config.get_usize("max_environments", DEFAULT_MAX_ENVIRONMENTS),
        }
    }
}

/// Warns when a space holds more environments than recommended.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentCount {
    config: EnvironmentCountConfig,
}

impl EnvironmentCount {
    /// Creates a new check with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of environments.
    #[must_use]
    pub fn max_environments(mut self, max: usize) -> Self {
        self.config.max_environments = max;
        self
    }

    /// Creates a check with explicit settings.
    #[must_use]
    pub fn with_config(config: EnvironmentCountConfig) -> Self {
        Self { config }
    }
}

impl Check for EnvironmentCount {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Warns when the space has too many environments"
    }

    fn category(&self) -> Category {
        Category::Organization
    }

    fn execute(&self, ctx: &CheckContext) -> Result<Option<CheckResult>, CheckError> {
        let client = ctx.client()?;

        let count = match client.environments().missing_as_empty() {
            Ok(environments) => environments.len(),
            Err(err) => return ctx.handle_error(ID, self.category(), err),
        };

        let max = self.config.max_environments;
        let result = if count > max {
            CheckResult::new(
                ID,
                Severity::Warning,
                self.category(),
                format!(
                    "The recommended maximum number of environments is {max}. You have at least {count}"
                ),
            )
        } else {
            CheckResult::new(
                ID,
                Severity::Ok,
                self.category(),
                "The number of environments in the space is OK",
            )
        };
        Ok(Some(result.with_link(LINK)))
    }
}
