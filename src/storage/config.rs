//! Configuration handling for mdtasks
//!
//! Configuration is read from `.mdtasks.toml` (project, nearest ancestor of
//! the working directory) and `~/.config/mdtasks/config.toml` (global).
//! Command-line flags override both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parser::DEFAULT_HEADING;

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = ".mdtasks.toml";

/// Document read when nothing else is configured
pub const DEFAULT_FILE: &str = "README.md";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    /// Markdown document holding the tasks, relative to the project root
    pub file: Option<PathBuf>,

    /// Title of the tasks section
    pub heading: Option<String>,
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Fallback document name
    pub file: Option<PathBuf>,

    /// Fallback section title
    pub heading: Option<String>,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration, searching for a project config from `start` upward
    pub fn load_from(start: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project_root = Self::find_project_root(start);
        let project = match &project_root {
            Some(root) => Self::load_project_config(root)?,
            None => ProjectConfig::default(),
        };

        let config = Self {
            project,
            global,
            project_root,
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "mdtasks", "mdtasks").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_path = match Self::global_config_dir() {
            Some(dir) => dir.join("config.toml"),
            None => return Ok(GlobalConfig::default()),
        };

        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        read_toml(&config_path).context("Failed to parse global config")
    }

    /// Loads project configuration from a specific root
    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(PROJECT_CONFIG_FILE);

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        read_toml(&config_path).context("Failed to parse project config")
    }

    /// Finds the nearest ancestor of `start` containing `.mdtasks.toml`
    pub fn find_project_root(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join(PROJECT_CONFIG_FILE).is_file())
            .map(Path::to_path_buf)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let headings = [&self.project.heading, &self.global.heading];
        if headings.into_iter().flatten().any(|h| h.trim().is_empty()) {
            return Err(ConfigError::Invalid("heading must not be empty".to_string()));
        }

        let files = [&self.project.file, &self.global.file];
        if files.into_iter().flatten().any(|f| f.as_os_str().is_empty()) {
            return Err(ConfigError::Invalid("file must not be empty".to_string()));
        }

        Ok(())
    }

    /// Effective document path (project, then global, then `README.md`)
    pub fn file(&self) -> PathBuf {
        self.project
            .file
            .clone()
            .or_else(|| self.global.file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE))
    }

    /// Effective section title (project, then global, then `Tasks`)
    pub fn heading(&self) -> String {
        self.project
            .heading
            .clone()
            .or_else(|| self.global.heading.clone())
            .unwrap_or_else(|| DEFAULT_HEADING.to_string())
    }

    /// Directory to start looking for the document from
    pub fn search_root(&self, cwd: &Path) -> PathBuf {
        self.project_root
            .clone()
            .unwrap_or_else(|| cwd.to_path_buf())
    }
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;

    toml::from_str(&content)
        .map_err(|e| ConfigError::Parse(e.to_string()))
        .with_context(|| format!("Invalid config file: {}", path.display()))
}
