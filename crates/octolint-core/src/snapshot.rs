//! A [`SpaceClient`] backed by an exported snapshot of a space.
//!
//! The snapshot is a single JSON document holding every collection the
//! checks read. It lets the analyzer run offline and gives tests a client
//! with fully controlled data.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::client::{ProjectFilter, SpaceClient};
use crate::error::ClientError;
use crate::model::{
    Channel, DeploymentTarget, Environment, Lifecycle, Process, Project, ProjectGroup, Runbook,
    VariableSet,
};

/// Errors loading a snapshot file.
#[derive(Debug, Error, Diagnostic)]
pub enum SnapshotError {
    /// IO error reading the snapshot.
    #[error("Failed to read snapshot {path}: {source}")]
    #[diagnostic(code(octolint::snapshot::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON for the expected layout.
    #[error("Failed to parse snapshot: {message}")]
    #[diagnostic(
        code(octolint::snapshot::parse),
        help("a snapshot is a JSON object with Projects, Environments, Lifecycles, ... arrays")
    )]
    Parse {
        /// Parse error message.
        message: String,
    },
}

/// All entities of one space.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SpaceSnapshot {
    /// Projects.
    pub projects: Vec<Project>,
    /// Project groups.
    pub project_groups: Vec<ProjectGroup>,
    /// Deployment processes.
    pub deployment_processes: Vec<Process>,
    /// Runbooks.
    pub runbooks: Vec<Runbook>,
    /// Runbook processes.
    pub runbook_processes: Vec<Process>,
    /// Project variable sets, matched to projects by owner id.
    pub variable_sets: Vec<VariableSet>,
    /// Lifecycles.
    pub lifecycles: Vec<Lifecycle>,
    /// Environments.
    pub environments: Vec<Environment>,
    /// Channels.
    pub channels: Vec<Channel>,
    /// Deployment targets.
    pub deployment_targets: Vec<DeploymentTarget>,
}

/// In-memory [`SpaceClient`] over a [`SpaceSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotClient {
    snapshot: SpaceSnapshot,
}

impl SnapshotClient {
    /// Wraps an already-built snapshot.
    #[must_use]
    pub fn new(snapshot: SpaceSnapshot) -> Self {
        Self { snapshot }
    }

    /// Loads a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses a snapshot from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn parse(content: &str) -> Result<Self, SnapshotError> {
        let snapshot = serde_json::from_str(content).map_err(|e| SnapshotError::Parse {
            message: e.to_string(),
        })?;
        Ok(Self::new(snapshot))
    }

    /// Returns the underlying snapshot.
    #[must_use]
    pub fn snapshot(&self) -> &SpaceSnapshot {
        &self.snapshot
    }
}

fn find_process(processes: &[Process], id: &str, kind: &str) -> Result<Option<Process>, ClientError> {
    processes
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Some)
        .ok_or_else(|| ClientError::not_found(format!("{kind} {id}")))
}

impl SpaceClient for SnapshotClient {
    fn projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, ClientError> {
        Ok(filter.apply(self.snapshot.projects.clone()))
    }

    fn project_groups(&self) -> Result<Vec<ProjectGroup>, ClientError> {
        Ok(self.snapshot.project_groups.clone())
    }

    fn deployment_process(&self, id: &str) -> Result<Option<Process>, ClientError> {
        find_process(&self.snapshot.deployment_processes, id, "deployment process")
    }

    fn runbooks(&self, project: &Project) -> Result<Vec<Runbook>, ClientError> {
        Ok(self
            .snapshot
            .runbooks
            .iter()
            .filter(|r| r.project_id == project.id)
            .cloned()
            .collect())
    }

    fn runbook_process(&self, id: &str) -> Result<Option<Process>, ClientError> {
        find_process(&self.snapshot.runbook_processes, id, "runbook process")
    }

    fn variable_set(&self, project_id: &str) -> Result<VariableSet, ClientError> {
        self.snapshot
            .variable_sets
            .iter()
            .find(|v| v.owner_id == project_id)
            .cloned()
            .ok_or_else(|| ClientError::not_found(format!("variable set of {project_id}")))
    }

    fn lifecycles(&self) -> Result<Vec<Lifecycle>, ClientError> {
        Ok(self.snapshot.lifecycles.clone())
    }

    fn environments(&self) -> Result<Vec<Environment>, ClientError> {
        Ok(self.snapshot.environments.clone())
    }

    fn channels(&self) -> Result<Vec<Channel>, ClientError> {
        Ok(self.snapshot.channels.clone())
    }

    fn deployment_targets(&self) -> Result<Vec<DeploymentTarget>, ClientError> {
        Ok(self.snapshot.deployment_targets.clone())
    }
}
