//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# octolint configuration

# Check selection: "all", "organization" or "security"
# preset = "all"

[analyzer]
# Concurrent fetches inside one check
concurrency = 10

# Checks running in parallel (default: one per CPU)
# parallelism = 4

# Abort a check when a project cannot be read instead of skipping it
strict_errors = false

# Check ids to skip, or to run exclusively
skip = []
only = []

# Project names left out of every check
exclude_projects = []
# When set, every project except these is left out
exclude_projects_except = []

[checks.OctoLintEnvironmentCount]
max_environments = 20

[checks.OctoLintTooManySteps]
max_steps = 20

[checks.OctoLintDefaultProjectGroupChildCount]
max_default_group_projects = 10

[checks.OctoLintDuplicatedVariables]
# max_projects = 0     # 0 means every project
# max_duplicates = 0   # 0 lists every pair

[checks.OctoLintUnusedVariables]
# ignore = ["LegacyVariable"]

# [checks.OctoLintProjectContainerImageName]
# container_image_regex = "^octopusdeploy/"
"#;

const CONFIG_NAME: &str = "octolint.toml";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_NAME), force)?;

    println!("Created {CONFIG_NAME}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to configure checks");
    println!("  2. Run: octolint check --snapshot space.json");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))
}
