//! Data-access contract checks read platform entities through.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::model::{
    Channel, DeploymentTarget, Environment, Lifecycle, Process, Project, ProjectGroup, Runbook,
    VariableSet,
};

/// Read-only access to the entities of one space.
///
/// Implementations must be safe to share between concurrently running
/// checks. Every method returns a fresh snapshot.
pub trait SpaceClient: Send + Sync {
    /// Returns the projects selected by `filter`.
    ///
    /// A missing project collection is reported as an empty list, not as
    /// [`ClientError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns an error when the projects cannot be read.
    fn projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, ClientError>;

    /// Returns every project group.
    ///
    /// # Errors
    ///
    /// Returns an error when the project groups cannot be read.
    fn project_groups(&self) -> Result<Vec<ProjectGroup>, ClientError>;

    /// Returns the deployment process with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the process does not exist.
    fn deployment_process(&self, id: &str) -> Result<Option<Process>, ClientError>;

    /// Returns the runbooks attached to `project`.
    ///
    /// # Errors
    ///
    /// Returns an error when the runbooks cannot be read.
    fn runbooks(&self, project: &Project) -> Result<Vec<Runbook>, ClientError>;

    /// Returns the runbook process with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the process does not exist.
    fn runbook_process(&self, id: &str) -> Result<Option<Process>, ClientError>;

    /// Returns the variables owned by the project.
    ///
    /// # Errors
    ///
    /// Returns an error when the variable set cannot be read.
    fn variable_set(&self, project_id: &str) -> Result<VariableSet, ClientError>;

    /// Returns every lifecycle.
    ///
    /// # Errors
    ///
    /// Returns an error when the lifecycles cannot be read.
    fn lifecycles(&self) -> Result<Vec<Lifecycle>, ClientError>;

    /// Returns every environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the environments cannot be read.
    fn environments(&self) -> Result<Vec<Environment>, ClientError>;

    /// Returns every channel.
    ///
    /// # Errors
    ///
    /// Returns an error when the channels cannot be read.
    fn channels(&self) -> Result<Vec<Channel>, ClientError>;

    /// Returns every deployment target.
    ///
    /// # Errors
    ///
    /// Returns an error when the targets cannot be read.
    fn deployment_targets(&self) -> Result<Vec<DeploymentTarget>, ClientError>;
}

/// Selects which projects a check inspects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFilter {
    /// When non-empty, only projects with these names are kept.
    #[serde(default)]
    pub only: Vec<String>,
    /// Projects with these names are dropped.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Maximum number of projects to return; 0 means unlimited.
    #[serde(default)]
    pub max: usize,
}

impl ProjectFilter {
    /// A filter that keeps everything.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Returns a copy of this filter limited to `max` projects.
    #[must_use]
    pub fn with_max(&self, max: usize) -> Self {
        Self {
            max,
            ..self.clone()
        }
    }

    /// True when `name` passes the only/exclude lists.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let included = self.only.is_empty() || self.only.iter().any(|n| n == name);
        included && !self.exclude.iter().any(|n| n == name)
    }

    /// Applies the filter to a project list, preserving order.
    #[must_use]
    pub fn apply(&self, projects: Vec<Project>) -> Vec<Project> {
        let selected = projects.into_iter().filter(|p| self.matches(&p.name));
        if self.max > 0 {
            selected.take(self.max).collect()
        } else {
            selected.collect()
        }
    }
}
