//! Snapshots of the platform entities checks inspect.
//!
//! Field names follow the platform's REST representation (PascalCase), so a
//! space exported from the API deserializes directly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A deployable project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Project {
    /// Project identifier (e.g. `Projects-1`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Identifier of the deployment process, absent for config-as-code projects.
    pub deployment_process_id: Option<String>,
    /// Identifier of the default lifecycle.
    pub lifecycle_id: String,
    /// Identifier of the owning project group.
    pub project_group_id: String,
    /// Named links to related collections.
    pub links: HashMap<String, String>,
}

impl Project {
    /// True when the project advertises the named link collection.
    ///
    /// Projects stored in version control have no `Runbooks` link, so the
    /// link's presence decides whether runbooks can be listed.
    #[must_use]
    pub fn has_link(&self, name: &str) -> bool {
        self.links.get(name).is_some_and(|link| !link.is_empty())
    }
}

/// A group of projects on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProjectGroup {
    /// Group identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Declared type of a variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableType {
    /// Plain text.
    #[default]
    String,
    /// Secret value; never returned by the API.
    Sensitive,
    /// Reference to a certificate.
    Certificate,
    /// Reference to a worker pool.
    WorkerPool,
    /// Reference to an AWS account.
    AmazonWebServicesAccount,
    /// Reference to an Azure account.
    AzureAccount,
    /// Reference to a Google Cloud account.
    GoogleCloudAccount,
    /// Any type this tool does not distinguish.
    #[serde(other)]
    Other,
}

/// A single variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Variable {
    /// Variable identifier.
    pub id: String,
    /// Variable name as referenced in `#{...}` expressions.
    pub name: String,
    /// Raw value, empty when unset or sensitive.
    #[serde(deserialize_with = "null_as_empty")]
    pub value: String,
    /// Declared type.
    #[serde(rename = "Type")]
    pub kind: VariableType,
}

impl Variable {
    /// Creates a plain string variable.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: format!("var-{name}"),
            name,
            value: value.into(),
            kind: VariableType::String,
        }
    }
}

/// The variables owned by one project or library variable set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VariableSet {
    /// Variable set identifier.
    pub id: String,
    /// Identifier of the project or library set owning the variables.
    pub owner_id: String,
    /// Ordered variables.
    pub variables: Vec<Variable>,
}

/// A deployment environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Environment {
    /// Environment identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// One phase of a lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Phase {
    /// Phase name.
    pub name: String,
    /// Environments deployed to automatically.
    pub automatic_deployment_targets: Vec<String>,
    /// Environments that may be deployed to manually.
    pub optional_deployment_targets: Vec<String>,
}

impl Phase {
    /// Iterates over every environment id this phase targets.
    pub fn environment_ids(&self) -> impl Iterator<Item = &str> {
        self.automatic_deployment_targets
            .iter()
            .chain(&self.optional_deployment_targets)
            .map(String::as_str)
    }
}

/// An ordered sequence of phases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Lifecycle {
    /// Lifecycle identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Ordered phases. Empty means every environment is reachable.
    #[serde(deserialize_with = "null_as_empty")]
    pub phases: Vec<Phase>,
}

impl Lifecycle {
    /// True for a lifecycle without phases, which targets every environment.
    #[must_use]
    pub fn targets_all_environments(&self) -> bool {
        self.phases.is_empty()
    }
}

/// A project-scoped release pathway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Channel {
    /// Channel identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Owning project.
    pub project_id: String,
    /// Lifecycle overriding the project's, if any.
    pub lifecycle_id: Option<String>,
}

/// Container an action runs in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Container {
    /// Image reference (e.g. `octopusdeploy/worker-tools:6.0.0-ubuntu.22.04`).
    pub image: Option<String>,
    /// Feed the image is pulled from.
    pub feed_id: Option<String>,
}

/// Package consumed by an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PackageReference {
    /// Package name within the feed.
    pub package_id: String,
    /// Feed identifier.
    pub feed_id: String,
}

/// A unit of work inside a step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Action {
    /// Action name.
    pub name: String,
    /// Execution container, if the action runs in one.
    pub container: Option<Container>,
    /// Free-text action properties (scripts, templates, settings).
    pub properties: HashMap<String, String>,
    /// Packages and feeds referenced by the action.
    pub packages: Vec<PackageReference>,
}

impl Action {
    /// Returns the non-blank container image reference, if any.
    #[must_use]
    pub fn container_image(&self) -> Option<&str> {
        self.container
            .as_ref()
            .and_then(|c| c.image.as_deref())
            .filter(|image| !image.trim().is_empty())
    }
}

/// A named step of a process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Step {
    /// Step name.
    pub name: String,
    /// Ordered actions.
    pub actions: Vec<Action>,
}

/// A deployment or runbook process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Process {
    /// Process identifier.
    pub id: String,
    /// Ordered steps.
    pub steps: Vec<Step>,
}

/// An operational process attached to a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Runbook {
    /// Runbook identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Owning project.
    pub project_id: String,
    /// Identifier of the runbook's process.
    pub runbook_process_id: String,
}

/// Connection details of a Kubernetes cluster target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct KubernetesEndpoint {
    /// Cluster API URL.
    pub cluster_url: Option<String>,
    /// Whether TLS certificate verification is disabled.
    pub skip_tls_verification: bool,
}

/// How the platform reaches a deployment target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "CommunicationStyle")]
pub enum Endpoint {
    /// Kubernetes cluster.
    Kubernetes(KubernetesEndpoint),
    /// Listening tentacle.
    TentaclePassive {
        /// Tentacle URI.
        #[serde(rename = "Uri", default)]
        uri: String,
    },
    /// Polling tentacle.
    TentacleActive {
        /// Subscription URI.
        #[serde(rename = "Uri", default)]
        uri: String,
    },
    /// SSH connection.
    Ssh {
        /// Host name.
        #[serde(rename = "Host", default)]
        host: String,
        /// Port.
        #[serde(rename = "Port", default)]
        port: u16,
    },
    /// Cloud region or other target without a transport.
    None,
    /// Any style this tool does not inspect.
    #[serde(other)]
    Other,
}

/// A machine or cluster deployments run against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentTarget {
    /// Target identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Transport endpoint.
    pub endpoint: Endpoint,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
