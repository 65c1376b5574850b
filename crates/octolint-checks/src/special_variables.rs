//! Variables the platform itself consumes.
//!
//! These are set to tune deployments rather than referenced by steps, so
//! they are neither "unused" nor meaningful duplicates.

/// Names of well-known system variables.
pub const SPECIAL_VARIABLES: &[&str] = &[
    "OctopusPrintVariables",
    "OctopusPrintEvaluatedVariables",
    "OctopusBypassDeploymentMutex",
    "OctopusSuppressNestedScriptWarning",
    "OctopusDeleteScriptsOnCleanup",
    "OctopusTreatWarningsAsErrors",
    "Octopus.Acquire.MaxParallelism",
    "Octopus.Action.MaxParallelism",
    "Octopus.Action.Package.DownloadOnTentacle",
    "Octopus.Action.Script.SuppressEnvironmentLogging",
    "Octopus.Calamari.CopyWorkingDirectoryIncludingKeyTo",
    "Octopus.Task.ConcurrencyTag",
];

/// True when `name` is a system variable.
#[must_use]
pub fn is_special_variable(name: &str) -> bool {
    SPECIAL_VARIABLES.contains(&name)
}
