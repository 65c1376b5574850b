//! Configuration types for octolint.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::client::ProjectFilter;
use crate::context::DEFAULT_CONCURRENCY;

/// Top-level configuration for octolint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "all", "organization", "security").
    #[serde(default)]
    pub preset: Option<String>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-check configurations, keyed by check id.
    #[serde(default)]
    pub checks: HashMap<String, CheckConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a check is enabled by its own table and the skip/only lists.
    #[must_use]
    pub fn is_check_enabled(&self, id: &str) -> bool {
        let enabled = self
            .checks
            .get(id)
            .map_or(true, |c| c.enabled.unwrap_or(true));
        let selected = self.analyzer.only.is_empty() || self.analyzer.only.iter().any(|o| o == id);
        enabled && selected && !self.analyzer.skip.iter().any(|s| s == id)
    }

    /// Returns the options of a check, empty when it has no table.
    #[must_use]
    pub fn check(&self, id: &str) -> CheckConfig {
        self.checks.get(id).cloned().unwrap_or_default()
    }

    /// Builds the base project filter from the analyzer section.
    #[must_use]
    pub fn project_filter(&self) -> ProjectFilter {
        ProjectFilter {
            only: self.analyzer.exclude_projects_except.clone(),
            exclude: self.analyzer.exclude_projects.clone(),
            max: 0,
        }
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Maximum number of concurrent fetches inside one check.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Maximum number of checks running in parallel.
    #[serde(default)]
    pub parallelism: Option<usize>,

    /// Abort checks on permission errors instead of reporting them.
    #[serde(default)]
    pub strict_errors: bool,

    /// Check ids to skip.
    #[serde(default)]
    pub skip: Vec<String>,

    /// When non-empty, only these check ids run.
    #[serde(default)]
    pub only: Vec<String>,

    /// Project names excluded from every check.
    #[serde(default)]
    pub exclude_projects: Vec<String>,

    /// When non-empty, every project except these is excluded.
    #[serde(default)]
    pub exclude_projects_except: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            parallelism: None,
            strict_errors: false,
            skip: Vec::new(),
            only: Vec::new(),
            exclude_projects: Vec::new(),
            exclude_projects_except: Vec::new(),
        }
    }
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

/// Per-check configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Whether this check is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Check-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl CheckConfig {
    /// Gets a non-negative count option; negative values fall back to `default`.
    #[must_use]
    pub fn get_usize(&self, key: &str, default: usize) -> usize {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(default)
    }

    /// Gets a string option with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
    }

    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.options
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(octolint::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(octolint::config::parse))]
    Parse {
        /// Parse error message.
        message: String,
    },
}
