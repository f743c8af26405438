//! # Storage Layer
//!
//! Finding and reading the task document, and the configuration that says
//! where it is.
//!
//! ## Configuration Files
//!
//! | Scope | Location | Keys |
//! |-------|----------|------|
//! | Project | `.mdtasks.toml` (nearest ancestor) | `file`, `heading` |
//! | Global | `~/.config/mdtasks/config.toml` | `default_format`, `file`, `heading` |
//!
//! ## Key Types
//!
//! - [`Config`] - Project and global configuration
//! - [`Document`] - A located markdown document that tasks are parsed from

mod config;
mod document;

pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig, DEFAULT_FILE, PROJECT_CONFIG_FILE};
pub use document::{Document, DocumentError};
