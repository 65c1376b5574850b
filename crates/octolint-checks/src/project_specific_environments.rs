//! Check for environments only one project can deploy to.
//!
//! # Rationale
//!
//! Environments are meant to be shared stages (Development, Test,
//! Production). An environment reachable from a single project is usually a
//! project name baked into the environment list, which multiplies
//! environments as projects are added.
//!
//! # Reachability
//!
//! A project reaches every environment listed in the phases of its own
//! lifecycle and of the lifecycles of the channels it owns. A lifecycle
//! without phases reaches every environment.
//!
//! # Configuration
//!
//! - `max_projects`: Maximum projects to inspect (default: 0, unlimited)

use std::collections::{BTreeSet, HashMap};

use octolint_core::model::{Channel, Environment, Lifecycle, Project};
use octolint_core::{
    Category, Check, CheckConfig, CheckContext, CheckError, CheckResult, ResultExt, Severity,
};

/// Check id for project-specific-environments.
pub const ID: &str = "OctoLintProjectSpecificEnvs";

/// Configuration for [`ProjectSpecificEnvironments`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSpecificEnvironmentsConfig {
    /// Maximum number of projects to inspect; 0 means unlimited.
    pub max_projects: usize,
}

impl ProjectSpecificEnvironmentsConfig {
    /// Reads the options from a `[checks.OctoLintProjectSpecificEnvs]` table.
    #[must_use]
    pub fn from_check_config(config: &CheckConfig) -> Self {
        Self {
            max_projects: config.get_usize("max_projects", 0),
        }
    }
}

/// Flags environments reachable from exactly one project.
#[derive(Debug, Clone, Default)]
pub struct ProjectSpecificEnvironments {
    config: ProjectSpecificEnvironmentsConfig,
}

impl ProjectSpecificEnvironments {
    /// Creates a new check with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a check with explicit settings.
    #[must_use]
    pub fn with_config(config: ProjectSpecificEnvironmentsConfig) -> Self {
        Self { config }
    }
}

impl Check for ProjectSpecificEnvironments {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Finds environments used by a single project"
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
        let lifecycles = match client.lifecycles().missing_as_empty() {
            Ok(lifecycles) => lifecycles,
            Err(err) => return ctx.handle_error(ID, self.category(), err),
        };
        let environments = match client.environments().missing_as_empty() {
            Ok(environments) => environments,
            Err(err) => return ctx.handle_error(ID, self.category(), err),
        };
        let channels = match client.channels().missing_as_empty() {
            Ok(channels) => channels,
            Err(err) => return ctx.handle_error(ID, self.category(), err),
        };

        let space = Space {
            lifecycles: &lifecycles,
            environments: &environments,
            channels: &channels,
        };
        let singles = single_project_environments(&projects, &space);

        if singles.is_empty() {
            return Ok(Some(CheckResult::new(
                ID,
                Severity::Ok,
                self.category(),
                "There are no single project environments",
            )));
        }

        let lines: Vec<String> = singles
            .iter()
            .map(|(environment, project)| format!("{environment} ({project})"))
            .collect();
        Ok(Some(CheckResult::new(
            ID,
            Severity::Warning,
            self.category(),
            format!(
                "The following environments are used by a single project:\n{}",
                lines.join("\n")
            ),
        )))
    }
}

/// The space-wide collections reachability is computed from.
#[derive(Debug, Clone, Copy)]
pub struct Space<'a> {
    /// Every lifecycle in the space.
    pub lifecycles: &'a [Lifecycle],
    /// Every environment in the space.
    pub environments: &'a [Environment],
    /// Every channel in the space.
    pub channels: &'a [Channel],
}

impl Space<'_> {
    fn lifecycle(&self, id: &str) -> Option<&Lifecycle> {
        self.lifecycles.iter().find(|l| l.id == id)
    }

    fn add_reachable<'s>(&'s self, lifecycle: &'s Lifecycle, into: &mut BTreeSet<&'s str>) {
        if lifecycle.targets_all_environments() {
            into.extend(self.environments.iter().map(|e| e.id.as_str()));
        } else {
            into.extend(lifecycle.phases.iter().flat_map(|phase| phase.environment_ids()));
        }
    }

    /// Environment ids a project can deploy to.
    #[must_use]
    pub fn reachable<'s>(&'s self, project: &'s Project) -> BTreeSet<&'s str> {
        let mut reachable = BTreeSet::new();
        if let Some(lifecycle) = self.lifecycle(&project.lifecycle_id) {
            self.add_reachable(lifecycle, &mut reachable);
        }

        for channel in self.channels.iter().filter(|c| c.project_id == project.id) {
            let id = channel
                .lifecycle_id
                .as_deref()
                .filter(|id| !id.is_empty())
                .unwrap_or(project.lifecycle_id.as_str());
            if let Some(lifecycle) = self.lifecycle(id) {
                self.add_reachable(lifecycle, &mut reachable);
            }
        }
        reachable
    }

    fn environment_name<'s>(&'s self, id: &'s str) -> &'s str {
        self.environments
            .iter()
            .find(|e| e.id == id)
            .map_or(id, |e| e.name.as_str())
    }
}

/// Returns `(environment name, project name)` for every environment exactly
/// one project reaches, ordered by environment name.
#[must_use]
pub fn single_project_environments(projects: &[Project], space: &Space<'_>) -> Vec<(String, String)> {
    let mut reached_by: HashMap<&str, Vec<&str>> = HashMap::new();
    for project in projects {
        for environment in space.reachable(project) {
            reached_by
                .entry(environment)
                .or_default()
                .push(project.name.as_str());
        }
    }

    let mut singles: Vec<(String, String)> = reached_by
        .into_iter()
        .filter_map(|(environment, projects)| match projects.as_slice() {
            [only] => Some((
                space.environment_name(environment).to_string(),
                (*only).to_string(),
            )),
            _ => None,
        })
        .collect();
    singles.sort();
    singles
}

#[cfg(test)]
mod tests {
    use super::*;
    use octolint_core::model::Phase;

    fn env(id: &str, name: &str) -> Environment {
        Environment {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn lifecycle(id: &str, phases: &[&[&str]]) -> Lifecycle {
        Lifecycle {
            id: id.to_string(),
            name: id.to_string(),
            phases: phases
                .iter()
                .map(|targets| Phase {
                    automatic_deployment_targets: targets.iter().map(ToString::to_string).collect(),
                    ..Phase::default()
                })
                .collect(),
        }
    }

    fn project(id: &str, name: &str, lifecycle_id: &str) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            lifecycle_id: lifecycle_id.to_string(),
            ..Project::default()
        }
    }

    fn environments() -> Vec<Environment> {
        vec![
            env("Env-1", "Dev"),
            env("Env-2", "Test"),
            env("Env-3", "Staging"),
        ]
    }

    #[test]
    fn shared_default_lifecycle_flags_nothing() {
        let envs = environments();
        let lifecycles = vec![lifecycle("Default", &[])];
        let space = Space {
            lifecycles: &lifecycles,
            environments: &envs,
            channels: &[],
        };
        let projects = vec![
            project("P-1", "A", "Default"),
            project("P-2", "B", "Default"),
        ];
        assert!(single_project_environments(&projects, &space).is_empty());
    }

    #[test]
    fn zero_phase_lifecycle_reaches_everything() {
        let envs = environments();
        let lifecycles = vec![lifecycle("Default", &[])];
        let space = Space {
            lifecycles: &lifecycles,
            environments: &envs,
            channels: &[],
        };
        let p = project("P-1", "A", "Default");
        let reached: Vec<&str> = space.reachable(&p).into_iter().collect();
        assert_eq!(reached, vec!["Env-1", "Env-2", "Env-3"]);
    }

    #[test]
    fn channel_lifecycle_adds_environment() {
        let envs = environments();
        let lifecycles = vec![
            lifecycle("Shared", &[&["Env-1"], &["Env-2"]]),
            lifecycle("Hotfix", &[&["Env-3"]]),
        ];
        let channels = vec![Channel {
            id: "Channels-1".to_string(),
            name: "Hotfix".to_string(),
            project_id: "P-1".to_string(),
            lifecycle_id: Some("Hotfix".to_string()),
        }];
        let space = Space {
            lifecycles: &lifecycles,
            environments: &envs,
            channels: &channels,
        };
        let projects = vec![
            project("P-1", "P", "Shared"),
            project("P-2", "Q", "Shared"),
        ];
        assert_eq!(
            single_project_environments(&projects, &space),
            vec![("Staging".to_string(), "P".to_string())]
        );
    }

    #[test]
    fn zero_phase_channel_lifecycle_reaches_everything() {
        let envs = vec![env("Env-1", "Dev"), env("Env-2", "Prod"), env("Env-3", "Hotfix")];
        let lifecycles = vec![
            lifecycle("Phased", &[&["Env-1"], &["Env-2"]]),
            lifecycle("Open", &[]),
        ];
        let channels = vec![Channel {
            id: "Channels-1".to_string(),
            name: "Anything".to_string(),
            project_id: "P-1".to_string(),
            lifecycle_id: Some("Open".to_string()),
        }];
        let space = Space {
            lifecycles: &lifecycles,
            environments: &envs,
            channels: &channels,
        };
        let projects = vec![
            project("P-1", "P", "Phased"),
            project("P-2", "Q", "Phased"),
        ];
        assert_eq!(
            single_project_environments(&projects, &space),
            vec![("Hotfix".to_string(), "P".to_string())]
        );
    }

    #[test]
    fn channel_without_override_uses_project_lifecycle() {
        let envs = environments();
        let lifecycles = vec![lifecycle("Own", &[&["Env-1"]])];
        let channels = vec![Channel {
            project_id: "P-1".to_string(),
            ..Channel::default()
        }];
        let space = Space {
            lifecycles: &lifecycles,
            environments: &envs,
            channels: &channels,
        };
        let p = project("P-1", "P", "Own");
        assert_eq!(space.reachable(&p).into_iter().collect::<Vec<_>>(), vec!["Env-1"]);
    }

    #[test]
    fn unknown_lifecycle_contributes_nothing_and_unknown_env_shows_id() {
        let envs = environments();
        let lifecycles = vec![lifecycle("Odd", &[&["Env-404"]])];
        let space = Space {
            lifecycles: &lifecycles,
            environments: &envs,
            channels: &[],
        };
        let projects = vec![
            project("P-1", "A", "Missing"),
            project("P-2", "B", "Odd"),
        ];
        assert_eq!(
            single_project_environments(&projects, &space),
            vec![("Env-404".to_string(), "B".to_string())]
        );
    }

    #[test]
    fn zero_and_many_projects_are_not_flagged() {
        let envs = environments();
        let lifecycles = vec![lifecycle("Two", &[&["Env-1", "Env-2"]])];
        let space = Space {
            lifecycles: &lifecycles,
            environments: &envs,
            channels: &[],
        };
        let projects = vec![
            project("P-1", "A", "Two"),
            project("P-2", "B", "Two"),
            project("P-3", "C", "Two"),
        ];
        // Env-3 is reached by nobody, Env-1 and Env-2 by three projects.
        assert!(single_project_environments(&projects, &space).is_empty());
    }
}
