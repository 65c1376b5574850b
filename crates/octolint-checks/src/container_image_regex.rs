//! Check that action container images follow a naming pattern.
//!
//! The check is not applicable until a pattern is configured. The pattern is
//! compiled once when the check is built; a pattern that does not compile is
//! reported as an error result on every run rather than aborting analysis.
//!
//! # Configuration
//!
//! - `container_image_regex`: Pattern images must match (default: empty, disabled)
//! - `max_projects`: Maximum projects to inspect (default: 0, unlimited)

use octolint_core::model::Process;
use octolint_core::{
    Category, Check, CheckConfig, CheckContext, CheckError, CheckResult, ResultExt, Severity,
};
use regex::Regex;

use crate::fetch::{deployment_process, per_project};

/// Check id for container-image-regex.
pub const ID: &str = "OctoLintProjectContainerImageName";

/// Configuration for [`ContainerImageRegex`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerImageRegexConfig {
    /// Pattern container images must match. Blank disables the check.
    pub container_image_regex: String,
    /// Maximum number of projects to inspect; 0 means unlimited.
    pub max_projects: usize,
}

impl ContainerImageRegexConfig {
    /// Reads the options from a `[checks.OctoLintProjectContainerImageName]` table.
    #[must_use]
    pub fn from_check_config(config: &CheckConfig) -> Self {
        Self {
            container_image_regex: config.get_str("container_image_regex", "").to_string(),
            max_projects: config.get_usize("max_projects", 0),
        }
    }
}

#[derive(Debug, Clone)]
enum ImagePattern {
    Disabled,
    Invalid(String),
    Valid(Regex),
}

impl ImagePattern {
    fn compile(source: &str) -> Self {
        if source.trim().is_empty() {
            return Self::Disabled;
        }
        match Regex::new(source) {
            Ok(regex) => Self::Valid(regex),
            Err(err) => {
                tracing::debug!("{ID}: invalid pattern {source}: {err}");
                Self::Invalid(source.to_string())
            }
        }
    }
}

/// Flags actions whose container image does not match a pattern.
#[derive(Debug, Clone)]
pub struct ContainerImageRegex {
    config: ContainerImageRegexConfig,
    pattern: ImagePattern,
}

impl Default for ContainerImageRegex {
    fn default() -> Self {
        Self::with_config(ContainerImageRegexConfig::default())
    }
}

impl ContainerImageRegex {
    /// Creates a check with the given pattern.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self::with_config(ContainerImageRegexConfig {
            container_image_regex: pattern.into(),
            ..ContainerImageRegexConfig::default()
        })
    }

    /// Creates a check with explicit settings.
    #[must_use]
    pub fn with_config(config: ContainerImageRegexConfig) -> Self {
        let pattern = ImagePattern::compile(&config.container_image_regex);
        Self { config, pattern }
    }
}

impl Check for ContainerImageRegex {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Finds container images that do not match the configured pattern"
    }

    fn category(&self) -> Category {
        Category::Naming
    }

    fn execute(&self, ctx: &CheckContext) -> Result<Option<CheckResult>, CheckError> {
        let client = ctx.client()?;

        let regex = match &self.pattern {
            ImagePattern::Disabled => return Ok(None),
            ImagePattern::Invalid(source) => {
                return Ok(Some(CheckResult::new(
                    ID,
                    Severity::Error,
                    self.category(),
                    format!("The supplied regex {source} does not compile"),
                )))
            }
            ImagePattern::Valid(regex) => regex,
        };

        let projects = match client
            .projects(&ctx.project_filter(self.config.max_projects))
            .missing_as_empty()
        {
            Ok(projects) => projects,
            Err(err) => return ctx.handle_error(ID, self.category(), err),
        };

        let processes = per_project(ctx, ID, &projects, |project| {
            deployment_process(client, project)
        })?;

        let mismatches: Vec<String> = processes
            .iter()
            .filter_map(|(project, process)| process.as_ref().map(|p| (project, p)))
            .flat_map(|(project, process)| {
                mismatched_images(process, regex)
                    .into_iter()
                    .map(move |(action, image)| format!("{}/{action}: {image}", project.name))
            })
            .collect();

        if mismatches.is_empty() {
            return Ok(Some(CheckResult::new(
                ID,
                Severity::Ok,
                self.category(),
                "There are no project actions with invalid container images",
            )));
        }

        Ok(Some(CheckResult::new(
            ID,
            Severity::Warning,
            self.category(),
            format!(
                "The following project actions do not match the regex {}:\n{}",
                regex.as_str(),
                mismatches.join("\n")
            ),
        )))
    }
}

/// Returns `(action name, image)` for each action whose image does not
/// match. Actions without a container are skipped.
fn mismatched_images<'p>(process: &'p Process, regex: &Regex) -> Vec<(&'p str, &'p str)> {
    process
        .steps
        .iter()
        .flat_map(|step| &step.actions)
        .filter_map(|action| action.container_image().map(|image| (action.name.as_str(), image)))
        .filter(|(_, image)| !regex.is_match(image))
        .collect()
}
