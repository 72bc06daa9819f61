//! Configuration handling for Cue
//!
//! Configuration is read from `~/.config/cue/config.toml` (or the platform
//! equivalent), or from the file given with `--config`. Command-line flags
//! override anything set here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default store file name inside the data directory
const STORE_FILE: &str = "modes.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Could not determine a data directory; pass --store explicitly")]
    NoDataDir,
}

/// Output format for commands
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Mode store file (defaults to the platform data directory)
    pub store_path: Option<PathBuf>,

    /// Program and leading arguments used to run commands, e.g. `["bash", "-c"]`
    pub shell: Option<Vec<String>>,

    /// Browser program for URLs (defaults to the system handler)
    pub browser: Option<String>,

    /// Default output format (text or json)
    pub default_format: Option<OutputFormat>,
}

impl Config {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "cue", "cue")
    }

    /// Returns the default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads configuration from `path`, or from the default location
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Loads configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parses and validates TOML configuration
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if let Some(shell) = &config.shell {
            if shell.first().map_or(true, |program| program.trim().is_empty()) {
                return Err(ConfigError::Invalid(
                    "shell must name a program, e.g. [\"sh\", \"-c\"]".to_string(),
                ));
            }
        }

        Ok(config)
    }

    /// Resolves the mode store path
    pub fn resolve_store_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.store_path {
            return Ok(path.clone());
        }

        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join(STORE_FILE))
            .ok_or(ConfigError::NoDataDir)
    }

    /// Resolves the shell used to run command entries
    pub fn shell_command(&self) -> Vec<String> {
        self.shell.clone().unwrap_or_else(default_shell)
    }
}

#[cfg(windows)]
fn default_shell() -> Vec<String> {
    vec!["cmd".to_string(), "/C".to_string()]
}

#[cfg(not(windows))]
fn default_shell() -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string()]
}
