//! Shared fixtures for check integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use octolint_core::model::{
    Channel, DeploymentTarget, Environment, Lifecycle, Process, Project, ProjectGroup, Runbook,
    VariableSet,
};
use octolint_core::{
    CheckContext, ClientError, ErrorHandler, ProjectFilter, SnapshotClient, SpaceClient,
};

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn snapshot(json: &str) -> SnapshotClient {
    SnapshotClient::parse(json).expect("fixture snapshot should parse")
}

pub fn context(client: impl SpaceClient + 'static) -> CheckContext {
    CheckContext::new()
        .with_client(Arc::new(client))
        .with_concurrency(2)
}

pub fn strict_context(
    client: impl SpaceClient + 'static,
    errors: Arc<dyn ErrorHandler>,
) -> CheckContext {
    context(client).with_error_handler(errors)
}

/// Lines of a multi-line result message after the heading.
pub fn detail_lines(message: &str) -> Vec<String> {
    message.lines().skip(1).map(ToString::to_string).collect()
}

/// A client that fails selected calls and delegates the rest to a snapshot.
#[derive(Debug, Default)]
pub struct FaultyClient {
    inner: SnapshotClient,
    projects: Option<ClientError>,
    targets: Option<ClientError>,
    environments: Option<ClientError>,
    project_groups: Option<ClientError>,
    lifecycles: Option<ClientError>,
    channels: Option<ClientError>,
    variable_sets: HashMap<String, ClientError>,
    processes: HashMap<String, ClientError>,
}

impl FaultyClient {
    pub fn new(inner: SnapshotClient) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn fail_projects(mut self, err: ClientError) -> Self {
        self.projects = Some(err);
        self
    }

    pub fn fail_targets(mut self, err: ClientError) -> Self {
        self.targets = Some(err);
        self
    }

    pub fn fail_environments(mut self, err: ClientError) -> Self {
        self.environments = Some(err);
        self
    }

    pub fn fail_project_groups(mut self, err: ClientError) -> Self {
        self.project_groups = Some(err);
        self
    }

    pub fn fail_lifecycles(mut self, err: ClientError) -> Self {
        self.lifecycles = Some(err);
        self
    }

    pub fn fail_channels(mut self, err: ClientError) -> Self {
        self.channels = Some(err);
        self
    }

    pub fn fail_variables(mut self, project_id: &str, err: ClientError) -> Self {
        self.variable_sets.insert(project_id.to_string(), err);
        self
    }

    pub fn fail_process(mut self, process_id: &str, err: ClientError) -> Self {
        self.processes.insert(process_id.to_string(), err);
        self
    }
}

fn fail(err: Option<&ClientError>) -> Result<(), ClientError> {
    match err {
        Some(err) => Err(err.clone()),
        None => Ok(()),
    }
}

impl SpaceClient for FaultyClient {
    fn projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, ClientError> {
        fail(self.projects.as_ref())?;
        self.inner.projects(filter)
    }

    fn project_groups(&self) -> Result<Vec<ProjectGroup>, ClientError> {
        fail(self.project_groups.as_ref())?;
        self.inner.project_groups()
    }

    fn deployment_process(&self, id: &str) -> Result<Option<Process>, ClientError> {
        fail(self.processes.get(id))?;
        self.inner.deployment_process(id)
    }

    fn runbooks(&self, project: &Project) -> Result<Vec<Runbook>, ClientError> {
        self.inner.runbooks(project)
    }

    fn runbook_process(&self, id: &str) -> Result<Option<Process>, ClientError> {
        fail(self.processes.get(id))?;
        self.inner.runbook_process(id)
    }

    fn variable_set(&self, project_id: &str) -> Result<VariableSet, ClientError> {
        fail(self.variable_sets.get(project_id))?;
        self.inner.variable_set(project_id)
    }

    fn lifecycles(&self) -> Result<Vec<Lifecycle>, ClientError> {
        fail(self.lifecycles.as_ref())?;
        self.inner.lifecycles()
    }

    fn environments(&self) -> Result<Vec<Environment>, ClientError> {
        fail(self.environments.as_ref())?;
        self.inner.environments()
    }

    fn channels(&self) -> Result<Vec<Channel>, ClientError> {
        fail(self.channels.as_ref())?;
        self.inner.channels()
    }

    fn deployment_targets(&self) -> Result<Vec<DeploymentTarget>, ClientError> {
        fail(self.targets.as_ref())?;
        self.inner.deployment_targets()
    }
}
