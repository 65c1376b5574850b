//! Check for an overfilled default project group.
//!
//! Every project starts in the default group. Once it holds more than a
//! handful the dashboard stops being navigable.
//!
//! # Configuration
//!
//! - `max_default_group_projects`: Projects allowed in the default group (default: 10)

use octolint_core::{
    Category, Check, CheckConfig, CheckContext, CheckError, CheckResult, ProjectFilter,
    ResultExt, Severity,
};

/// Check id for default-project-group-count.
pub const ID: &str = "OctoLintDefaultProjectGroupChildCount";

/// Name of the group new projects are created in.
pub const DEFAULT_GROUP_NAME: &str = "Default Project Group";

const DEFAULT_MAX_GROUP_PROJECTS: usize = 10;

/// Configuration for [`DefaultProjectGroupCount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultProjectGroupCountConfig {
    /// Number of projects above which the check warns.
    pub max_default_group_projects: usize,
}

impl Default for DefaultProjectGroupCountConfig {
    fn default() -> Self {
        Self {
            max_default_group_projects: DEFAULT_MAX_GROUP_PROJECTS,
        }
    }
}

impl DefaultProjectGroupCountConfig {
    /// Reads the options from a `[checks.OctoLintDefaultProjectGroupChildCount]` table.
    #[must_use]
    pub fn from_check_config(config: &CheckConfig) -> Self {
        Self {
            max_default_group_projects: config
                .get_usize("max_default_group_projects", DEFAULT_MAX_GROUP_PROJECTS),
        }
    }
}

/// Warns when the default project group holds too many projects.
#[derive(Debug, Clone, Default)]
pub struct DefaultProjectGroupCount {
    config: DefaultProjectGroupCountConfig,
}

impl DefaultProjectGroupCount {
    /// Creates a new check with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a check with explicit settings.
    #[must_use]
    pub fn with_config(config: DefaultProjectGroupCountConfig) -> Self {
        Self { config }
    }
}

impl Check for DefaultProjectGroupCount {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Warns when the default project group holds too many projects"
    }

    fn category(&self) -> Category {
        Category::Organization
    }

    fn execute(&self, ctx: &CheckContext) -> Result<Option<CheckResult>, CheckError> {
        let client = ctx.client()?;

        let not_found = || -> Result<Option<CheckResult>, CheckError> {
            Ok(Some(CheckResult::new(
                ID,
                Severity::Ok,
                self.category(),
                "The default project group was not found",
            )))
        };

        let groups = match client.project_groups().missing_as_empty() {
            Ok(groups) => groups,
            Err(err) => return ctx.handle_error(ID, self.category(), err),
        };
        let Some(group) = groups.iter().find(|g| g.name == DEFAULT_GROUP_NAME) else {
            return not_found();
        };

        // Membership counts every project in the space, unfiltered.
        let projects = match client
            .projects(&ProjectFilter::all())
            .missing_as_empty()
        {
            Ok(projects) => projects,
            Err(err) => return ctx.handle_error(ID, self.category(), err),
        };
        let count = projects
            .iter()
            .filter(|p| p.project_group_id == group.id)
            .count();

        if count > self.config.max_default_group_projects {
            return Ok(Some(CheckResult::new(
                ID,
                Severity::Warning,
                self.category(),
                format!(
                    "The default project group contains {count} projects. You may want to organize these projects into additional project groups."
                ),
            )));
        }

        Ok(Some(CheckResult::new(
            ID,
            Severity::Ok,
            self.category(),
            "The number of projects in the default project group is OK",
        )))
    }
}
