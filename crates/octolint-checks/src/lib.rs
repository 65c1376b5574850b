//! # octolint-checks
//!
//! Built-in best-practice checks for octolint.
//!
//! ## Available Checks
//!
//! | Id | Category | Description |
//! |----|----------|-------------|
//! | `OctoLintDuplicatedVariables` | Organization | Same value in variables of different projects |
//! | `OctoLintUnusedVariables` | Organization | Project variables nothing references |
//! | `OctoLintProjectSpecificEnvs` | Organization | Environments only one project reaches |
//! | `OctoLintEnvironmentCount` | Organization | Too many environments in the space |
//! | `OctoLintTooManySteps` | Organization | Deployment processes with too many steps |
//! | `OctoLintDefaultProjectGroupChildCount` | Organization | Too many projects in the default group |
//! | `OctoLintProjectContainerImageName` | Naming | Container images not matching a pattern |
//! | `OctoLintInsecureK8sTargets` | Security | Kubernetes targets without TLS verification or on HTTP |
//!
//! ## Usage
//!
//! ```ignore
//! use octolint_checks::{DuplicatedVariables, InsecureK8sTargets};
//! use octolint_core::{Analyzer, SnapshotClient};
//!
//! let analyzer = Analyzer::builder()
//!     .client(Arc::new(SnapshotClient::from_file(path)?))
//!     .check(DuplicatedVariables::new())
//!     .check(InsecureK8sTargets::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fetch;
mod presets;
mod special_variables;

pub mod container_image_regex;
pub mod default_project_group_count;
pub mod duplicated_variables;
pub mod environment_count;
pub mod insecure_k8s;
pub mod project_specific_environments;
pub mod too_many_steps;
pub mod unused_variables;

pub use container_image_regex::{ContainerImageRegex, ContainerImageRegexConfig};
pub use default_project_group_count::{DefaultProjectGroupCount, DefaultProjectGroupCountConfig};
pub use duplicated_variables::{DuplicatedVariables, DuplicatedVariablesConfig};
pub use environment_count::{EnvironmentCount, EnvironmentCountConfig};
pub use insecure_k8s::InsecureK8sTargets;
pub use presets::{all_checks, check_ids, configured_checks, Preset};
pub use project_specific_environments::{
    ProjectSpecificEnvironments, ProjectSpecificEnvironmentsConfig,
};
pub use special_variables::{is_special_variable, SPECIAL_VARIABLES};
pub use too_many_steps::{TooManySteps, TooManyStepsConfig};
pub use unused_variables::{UnusedVariables, UnusedVariablesConfig};

/// Re-export core types for convenience.
pub use octolint_core::{Check, CheckResult, Severity};
