//! Diagram folder service
//!
//! Owns the diagram directory: creates it at startup, derives placeholder
//! paths for submissions and searches file names. Nothing is cached; every
//! search reads the directory again.

use crate::config::DiagramConfig;
use crate::error::AppError;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Replace every space with an underscore
///
/// Only U+0020 is touched; tabs, newlines and other characters pass through.
pub fn slugify(input: &str) -> String {
    input.replace(' ', "_")
}

/// Diagram directory and the naming rules around it
#[derive(Debug, Clone)]
pub struct DiagramStore {
    dir: PathBuf,
    public_prefix: String,
    placeholder_prefix: String,
    suffix: String,
}

impl DiagramStore {
    /// Create a store from configuration; the directory is not touched
    pub fn new(config: &DiagramConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            public_prefix: config.public_prefix.trim_end_matches('/').to_string(),
            placeholder_prefix: config.placeholder_prefix.clone(),
            suffix: format!(".{}", config.extension),
        }
    }

    /// Directory on disk
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// URL prefix the directory is served under
    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Create the directory (and parents) if it does not exist yet
    pub async fn ensure_directory(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::DirectoryUnavailable(format!(
                "Failed to create {}: {}",
                self.dir.display(),
                e
            ))
        })?;
        tracing::debug!(dir = %self.dir.display(), "Diagram directory ready");
        Ok(())
    }

    /// Path a diagram for this submission would live at
    ///
    /// Nothing is created or checked at this path.
    pub fn placeholder_path(&self, submission: &str) -> String {
        format!(
            "{}{}{}",
            self.placeholder_prefix,
            slugify(submission),
            self.suffix
        )
    }

    /// Public URL of a file in the directory
    pub fn public_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.public_prefix, file_name)
    }

    /// Whether a file name is a diagram that matches the lowercased term
    fn matches(&self, file_name: &str, term_lower: &str) -> bool {
        file_name.ends_with(&self.suffix) && file_name.to_lowercase().contains(term_lower)
    }

    /// Public paths of diagrams whose name contains `term`, ignoring case
    ///
    /// Returns an empty list for an absent or empty term without reading the
    /// directory. Results follow directory listing order.
    pub async fn search(&self, term: Option<&str>) -> Result<Vec<String>, AppError> {
        let term = match term {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => return Ok(Vec::new()),
        };

        let mut entries = fs::read_dir(&self.dir).await.map_err(|e| {
            AppError::DirectoryUnavailable(format!(
                "Failed to read {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let mut results = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            AppError::DirectoryUnavailable(format!(
                "Failed to read entry in {}: {}",
                self.dir.display(),
                e
            ))
        })? {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if self.matches(name, &term) {
                results.push(self.public_path(name));
            }
        }

        tracing::debug!(term = %term, matches = results.len(), "Diagram search finished");
        Ok(results)
    }
}
