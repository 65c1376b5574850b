//! Check presets and the registry of built-in checks.

use octolint_core::{Category, CheckBox, Config};

use crate::{
    container_image_regex, default_project_group_count, duplicated_variables, environment_count,
    project_specific_environments, too_many_steps, unused_variables, ContainerImageRegex,
    DefaultProjectGroupCount, DuplicatedVariables, EnvironmentCount, InsecureK8sTargets,
    ProjectSpecificEnvironments, TooManySteps, UnusedVariables,
};

/// Preset selections of the built-in checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Every built-in check.
    All,
    /// Checks about how projects, environments and variables are organized.
    Organization,
    /// Checks about insecure configuration.
    Security,
}

impl Preset {
    /// Looks up a preset by its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "organization" => Some(Self::Organization),
            "security" => Some(Self::Security),
            _ => None,
        }
    }

    /// Returns the checks in this preset, configured from `config`.
    #[must_use]
    pub fn checks(self, config: &Config) -> Vec<CheckBox> {
        let checks = all_checks(config);
        match self {
            Self::All => checks,
            Self::Organization => by_category(checks, Category::Organization),
            Self::Security => by_category(checks, Category::Security),
        }
    }
}

fn by_category(checks: Vec<CheckBox>, category: Category) -> Vec<CheckBox> {
    checks
        .into_iter()
        .filter(|c| c.category() == category)
        .collect()
}

/// Returns every built-in check, configured from its `[checks.<id>]` table.
#[must_use]
pub fn all_checks(config: &Config) -> Vec<CheckBox> {
    vec![
        Box::new(DuplicatedVariables::with_config(
            duplicated_variables::DuplicatedVariablesConfig::from_check_config(
                &config.check(duplicated_variables::ID),
            ),
        )),
        Box::new(UnusedVariables::with_config(
            unused_variables::UnusedVariablesConfig::from_check_config(
                &config.check(unused_variables::ID),
            ),
        )),
        Box::new(ProjectSpecificEnvironments::with_config(
            project_specific_environments::ProjectSpecificEnvironmentsConfig::from_check_config(
                &config.check(project_specific_environments::ID),
            ),
        )),
        Box::new(EnvironmentCount::with_config(
            environment_count::EnvironmentCountConfig::from_check_config(
                &config.check(environment_count::ID),
            ),
        )),
        Box::new(TooManySteps::with_config(
            too_many_steps::TooManyStepsConfig::from_check_config(
                &config.check(too_many_steps::ID),
            ),
        )),
        Box::new(ContainerImageRegex::with_config(
            container_image_regex::ContainerImageRegexConfig::from_check_config(
                &config.check(container_image_regex::ID),
            ),
        )),
        Box::new(DefaultProjectGroupCount::with_config(
            default_project_group_count::DefaultProjectGroupCountConfig::from_check_config(
                &config.check(default_project_group_count::ID),
            ),
        )),
        Box::new(InsecureK8sTargets::new()),
    ]
}

/// Returns the checks selected by the config's `preset`, defaulting to all.
#[must_use]
pub fn configured_checks(config: &Config) -> Vec<CheckBox> {
    let preset = match config.preset.as_deref() {
        None => Preset::All,
        Some(name) => Preset::from_name(name).unwrap_or_else(|| {
            tracing::warn!("Unknown preset '{name}', using all checks");
            Preset::All
        }),
    };
    preset.checks(config)
}

/// Ids of every built-in check, in registry order.
#[must_use]
pub fn check_ids() -> Vec<&'static str> {
    all_checks(&Config::default())
        .iter()
        .map(|c| c.id())
        .collect()
}
