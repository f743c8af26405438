//! Task document lookup and loading

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::domain::Tasks;
use crate::parser::Parser;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Task document not found: {0}")]
    NotFound(PathBuf),
}

/// A markdown document that declares tasks
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
}

impl Document {
    /// Opens the document at an exact path
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DocumentError> {
        let path = path.into();
        if !path.is_file() {
            return Err(DocumentError::NotFound(path));
        }

        Ok(Self { path })
    }

    /// Locates `file` relative to `start`, then each parent of `start`.
    /// Absolute paths are used as given.
    pub fn locate(file: &Path, start: &Path) -> Result<Self, DocumentError> {
        if file.is_absolute() {
            return Self::open(file);
        }

        start
            .ancestors()
            .map(|dir| dir.join(file))
            .find(|candidate| candidate.is_file())
            .map(|path| Self { path })
            .ok_or_else(|| DocumentError::NotFound(start.join(file)))
    }

    /// Path of the document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the tasks under the section titled `heading`
    pub fn load_tasks(&self, heading: &str) -> Result<Tasks> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open task document: {}", self.path.display()))?;

        Parser::with_heading(BufReader::new(file), heading)
            .and_then(Parser::parse)
            .with_context(|| format!("Failed to parse tasks from {}", self.path.display()))
    }
}
