//! Check for deployment processes with many steps.
//!
//! Long processes are hard to reason about and often hide several
//! deployments that should be separate projects.
//!
//! # Configuration
//!
//! - `max_steps`: Step count at which a project is reported (default: 20)
//! - `max_projects`: Maximum projects to inspect (default: 0, unlimited)

use octolint_core::{
    Category, Check, CheckConfig, CheckContext, CheckError, CheckResult, ResultExt, Severity,
};

use crate::fetch::{deployment_process, per_project};

/// Check id for too-many-steps.
pub const ID: &str = "OctoLintTooManySteps";

const DEFAULT_MAX_STEPS: usize = 20;

/// Configuration for [`TooManySteps`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooManyStepsConfig {
    /// Step count at which a project is reported.
    pub max_steps: usize,
    /// Maximum number of projects to inspect; 0 means unlimited.
    pub max_projects: usize,
}

impl Default for TooManyStepsConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            max_projects: 0,
        }
    }
}

impl TooManyStepsConfig {
    /// Reads the options from a `[checks.OctoLintTooManySteps]` table.
    #[must_use]
    pub fn from_check_config(config: &CheckConfig) -> Self {
        Self {
            max_steps: config.get_usize("max_steps", DEFAULT_MAX_STEPS),
            max_projects: config.get_usize("max_projects", 0),
        }
    }
}

/// Flags projects whose deployment process is too long.
#[derive(Debug, Clone, Default)]
pub struct TooManySteps {
    config: TooManyStepsConfig,
}

impl TooManySteps {
    /// Creates a new check with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the step count at which projects are reported.
    #[must_use]
    pub fn max_steps(mut self, max: usize) -> Self {
        self.config.max_steps = max;
        self
    }

    /// Creates a check with explicit settings.
    #[must_use]
    pub fn with_config(config: TooManyStepsConfig) -> Self {
        Self { config }
    }
}

impl Check for TooManySteps {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Finds projects with too many deployment steps"
    }

    fn category(&self) -> Category {
        Category::Organization
    }

    fn execute(&self, ctx: &CheckContext) -> Result<Option<CheckResult>, CheckError> {
        let client = ctx.client()?;

        let projects = match client
            .projects(&ctx.project_filter(self.config.max_projects))
            .missing_as_empty()
        {
            Ok(projects) => projects,
            Err(err) => return ctx.handle_error(ID, self.category(), err),
        };

        let counts = per_project(ctx, ID, &projects, |project| {
            Ok(deployment_process(client, project)?.map_or(0, |p| p.steps.len()))
        })?;

        let complex: Vec<&str> = counts
            .iter()
            .filter(|(_, steps)| *steps >= self.config.max_steps)
            .map(|(project, _)| project.name.as_str())
            .collect();

        if complex.is_empty() {
            return Ok(Some(CheckResult::new(
                ID,
                Severity::Ok,
                self.category(),
                "There are no projects with too many steps",
            )));
        }

        Ok(Some(CheckResult::new(
            ID,
            Severity::Warning,
            self.category(),
            format!(
                "The following projects have {} or more steps:\n{}",
                self.config.max_steps,
                complex.join("\n")
            ),
        )))
    }
}
