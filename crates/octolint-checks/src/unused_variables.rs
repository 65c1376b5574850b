//! Check for project variables nothing appears to reference.
//!
//! # Detection
//!
//! A variable counts as used when its name occurs anywhere in:
//!
//! - an action property of the deployment process or any runbook process
//! - a package id or feed id of those actions
//! - the value of a variable in the same set
//!
//! This is a plain substring scan. Short names like `a` match almost any
//! script and are never reported, while names assembled at runtime are
//! reported even though they are used. Results should be reviewed before
//! deleting anything.
//!
//! # Configuration
//!
//! - `max_projects`: Maximum projects to scan (default: 0, unlimited)
//! - `ignore`: Additional variable names never reported (default: `[]`)

use octolint_core::model::{Project, Step, VariableSet};
use octolint_core::{
    Category, Check, CheckConfig, CheckContext, CheckError, CheckResult, ClientError, ResultExt,
    Severity, SpaceClient,
};

use crate::fetch::{deployment_process, per_project};
use crate::special_variables::is_special_variable;

/// Check id for unused-variables.
pub const ID: &str = "OctoLintUnusedVariables";

/// Configuration for [`UnusedVariables`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnusedVariablesConfig {
    /// Maximum number of projects to scan; 0 means unlimited.
    pub max_projects: usize,
    /// Extra names that are never reported.
    pub ignore: Vec<String>,
}

impl UnusedVariablesConfig {
    /// Reads the options from a `[checks.OctoLintUnusedVariables]` table.
    #[must_use]
    pub fn from_check_config(config: &CheckConfig) -> Self {
        Self {
            max_projects: config.get_usize("max_projects", 0),
            ignore: config.get_str_array("ignore"),
        }
    }
}

/// Flags project variables that no step or variable references.
#[derive(Debug, Clone, Default)]
pub struct UnusedVariables {
    config: UnusedVariablesConfig,
}

impl UnusedVariables {
    /// Creates a new check with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a check with explicit settings.
    #[must_use]
    pub fn with_config(config: UnusedVariablesConfig) -> Self {
        Self { config }
    }

    /// Adds a name that is never reported.
    #[must_use]
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.config.ignore.push(name.into());
        self
    }
}

impl Check for UnusedVariables {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Finds project variables not referenced by any step or variable"
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

        let scanned = per_project(ctx, ID, &projects, |project| {
            let variables = client.variable_set(&project.id).missing_as_empty()?;
            let steps = project_steps(ctx, client, project)?;
            Ok((variables, steps))
        })?;

        let mut lines: Vec<(String, String)> = scanned
            .iter()
            .flat_map(|(project, (variables, steps))| {
                find_unused(variables, steps, &self.config.ignore)
                    .into_iter()
                    .map(|name| (project.name.clone(), name.to_string()))
            })
            .collect();
        lines.sort();

        if lines.is_empty() {
            return Ok(Some(CheckResult::new(
                ID,
                Severity::Ok,
                self.category(),
                "There are no unused variables",
            )));
        }

        let lines: Vec<String> = lines
            .into_iter()
            .map(|(project, variable)| format!("{project}: {variable}"))
            .collect();
        Ok(Some(CheckResult::new(
            ID,
            Severity::Warning,
            self.category(),
            format!(
                "The following variables may be unused (note there are edge cases octolint can't detect, so double check these before deleting them): \n{}",
                lines.join("\n")
            ),
        )))
    }
}

/// Collects the steps of the deployment process and every runbook process.
///
/// A source that fails with a tolerated error is left out; any other error
/// is returned.
fn project_steps(
    ctx: &CheckContext,
    client: &dyn SpaceClient,
    project: &Project,
) -> Result<Vec<Step>, ClientError> {
    let mut steps = Vec::new();

    match deployment_process(client, project) {
        Ok(process) => steps.extend(process.into_iter().flat_map(|p| p.steps)),
        Err(err) => tolerate(ctx, project, err)?,
    }

    if !project.has_link("Runbooks") {
        return Ok(steps);
    }

    let runbooks = match client.runbooks(project) {
        Ok(runbooks) => runbooks,
        Err(err) => {
            tolerate(ctx, project, err)?;
            Vec::new()
        }
    };

    for runbook in runbooks {
        match client.runbook_process(&runbook.runbook_process_id) {
            Ok(process) => steps.extend(process.into_iter().flat_map(|p| p.steps)),
            Err(err) => tolerate(ctx, project, err)?,
        }
    }

    Ok(steps)
}

fn tolerate(ctx: &CheckContext, project: &Project, err: ClientError) -> Result<(), ClientError> {
    if ctx.errors().should_continue(&err) {
        ctx.reporter().skipped(ID, &project.name, &err);
        Ok(())
    } else {
        Err(err)
    }
}

/// Returns the names of variables in `variables` that nothing references.
///
/// Names appear once each, in set order.
#[must_use]
pub fn find_unused<'a>(variables: &'a VariableSet, steps: &[Step], ignore: &[String]) -> Vec<&'a str> {
    let mut unused: Vec<&str> = Vec::new();
    for variable in &variables.variables {
        let name = variable.name.as_str();
        if name.is_empty()
            || is_special_variable(name)
            || ignore.iter().any(|ignored| ignored == name)
            || unused.contains(&name)
        {
            continue;
        }
        if !referenced_by_steps(steps, name) && !referenced_by_values(variables, name) {
            unused.push(name);
        }
    }
    unused
}

fn referenced_by_steps(steps: &[Step], name: &str) -> bool {
    steps.iter().flat_map(|step| &step.actions).any(|action| {
        action.properties.values().any(|value| value.contains(name))
            || action
                .packages
                .iter()
                .any(|package| package.feed_id.contains(name) || package.package_id.contains(name))
    })
}

fn referenced_by_values(variables: &VariableSet, name: &str) -> bool {
    variables
        .variables
        .iter()
        .any(|variable| variable.value.contains(name))
}
