//! Check for Kubernetes targets with weakened transport security.
//!
//! Flags cluster targets that skip TLS certificate verification or whose
//! cluster URL uses plain `http`.

use octolint_core::model::{DeploymentTarget, Endpoint, KubernetesEndpoint};
use octolint_core::{
    Category, Check, CheckContext, CheckError, CheckResult, ResultExt, Severity,
};
use url::Url;

/// Check id for insecure-k8s-targets.
pub const ID: &str = "OctoLintInsecureK8sTargets";

/// Flags insecure Kubernetes deployment targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsecureK8sTargets;

impl InsecureK8sTargets {
    /// Creates a new check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for InsecureK8sTargets {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Finds Kubernetes targets that skip TLS validation or use HTTP"
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn execute(&self, ctx: &CheckContext) -> Result<Option<CheckResult>, CheckError> {
        let client = ctx.client()?;

        let targets = match client.deployment_targets().missing_as_empty() {
            Ok(targets) => targets,
            Err(err) => return ctx.handle_error(ID, self.category(), err),
        };

        let insecure = insecure_targets(&targets);
        if insecure.is_empty() {
            return Ok(Some(CheckResult::new(
                ID,
                Severity::Ok,
                self.category(),
                "There are no insecure Kubernetes targets",
            )));
        }

        Ok(Some(CheckResult::new(
            ID,
            Severity::Warning,
            self.category(),
            format!(
                "The following Kubernetes skip TLS validation or use an insecure HTTP endpoint:\n{}",
                insecure.join("\n")
            ),
        )))
    }
}

/// Names of the Kubernetes targets that are insecure, in input order.
#[must_use]
pub fn insecure_targets(targets: &[DeploymentTarget]) -> Vec<&str> {
    targets
        .iter()
        .filter(|target| match &target.endpoint {
            Endpoint::Kubernetes(endpoint) => is_insecure(endpoint),
            Endpoint::TentaclePassive { .. }
            | Endpoint::TentacleActive { .. }
            | Endpoint::Ssh { .. }
            | Endpoint::None
            | Endpoint::Other => false,
        })
        .map(|target| target.name.as_str())
        .collect()
}

/// True when the endpoint skips TLS verification or talks plain HTTP.
#[must_use]
pub fn is_insecure(endpoint: &KubernetesEndpoint) -> bool {
    if endpoint.skip_tls_verification {
        return true;
    }
    let Some(raw) = endpoint.cluster_url.as_deref() else {
        return false;
    };
    match Url::parse(raw.trim()) {
        Ok(url) => url.scheme() == "http",
        Err(err) => {
            tracing::debug!("{ID}: cannot parse cluster URL {raw}: {err}");
            false
        }
    }
}
