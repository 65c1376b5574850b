//! Configuration file resolution with global fallback.
//!
//! Resolution order:
//!
//! 1. `--config` flag or `$OCTOLINT_CONFIG`
//! 2. `octolint.toml` or `.octolint.toml` in the working directory
//! 3. `config.toml` in `$OCTOLINT_CONFIG_DIR`, else `~/.octolint/`
//! 4. Built-in defaults

use anyhow::{Context, Result};
use octolint_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found in the working directory.
    Local(PathBuf),
    /// Found in the user's global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Local(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration this source points to.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No config file found, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

const LOCAL_NAMES: &[&str] = &["octolint.toml", ".octolint.toml"];
const GLOBAL_NAME: &str = "config.toml";

/// Places searched for a configuration file.
#[derive(Debug, Clone)]
struct SearchPath {
    local_dir: PathBuf,
    global_dir: Option<PathBuf>,
}

impl SearchPath {
    fn from_env() -> Self {
        Self {
            local_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            global_dir: global_config_dir(),
        }
    }

    fn resolve(&self, explicit: Option<&Path>) -> ConfigSource {
        if let Some(path) = explicit {
            return ConfigSource::Explicit(path.to_path_buf());
        }

        if let Some(path) = LOCAL_NAMES
            .iter()
            .map(|name| self.local_dir.join(name))
            .find(|candidate| candidate.is_file())
        {
            tracing::debug!("Found local config: {}", path.display());
            return ConfigSource::Local(path);
        }

        self.global_dir
            .as_ref()
            .map(|dir| dir.join(GLOBAL_NAME))
            .filter(|candidate| candidate.is_file())
            .map_or(ConfigSource::Default, ConfigSource::Global)
    }
}

/// Resolves the configuration file for this invocation.
#[must_use]
pub fn resolve(explicit: Option<&Path>) -> ConfigSource {
    SearchPath::from_env().resolve(explicit)
}

/// Returns the global config directory: `$OCTOLINT_CONFIG_DIR` or `~/.octolint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("OCTOLINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".octolint"))
}
