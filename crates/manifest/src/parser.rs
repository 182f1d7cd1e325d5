//! Manifest parser implementation

use crate::document::ManifestDocument;
use crate::error::{ManifestError, ManifestResult};
use glob::Pattern;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Documents collected from a directory, plus the files that could not be
/// parsed
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub documents: Vec<ManifestDocument>,
    pub failures: Vec<(PathBuf, ManifestError)>,
}

pub struct ManifestParser;

impl Default for ManifestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse manifests from a file or directory, applying filters
    pub fn parse_path(&self, path: &Path, filters: &[String]) -> ParseOutcome {
        if path.is_dir() {
            return self.parse_from_directory(path, filters);
        }

        let mut outcome = ParseOutcome::default();
        match self.parse_file(path) {
            Ok(mut documents) => {
                documents.retain(|doc| self.matches_filters(doc, filters));
                outcome.documents = documents;
            }
            Err(e) => outcome.failures.push((path.to_path_buf(), e)),
        }
        outcome
    }

    /// Parse every YAML file below a directory, applying filters
    pub fn parse_from_directory(&self, dir_path: &Path, filters: &[String]) -> ParseOutcome {
        info!("Parsing manifests from directory: {:?}", dir_path);

        let mut outcome = ParseOutcome::default();

        for entry in WalkDir::new(dir_path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();

            // Check if it's a YAML file
            match path.extension() {
                Some(ext) if ext == "yaml" || ext == "yml" => {}
                _ => continue,
            }

            match self.parse_file(path) {
                Ok(mut documents) => {
                    documents.retain(|doc| self.matches_filters(doc, filters));
                    outcome.documents.extend(documents);
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    outcome.failures.push((path.to_path_buf(), e));
                }
            }
        }

        info!(
            "Found {} documents after filtering ({} unreadable files)",
            outcome.documents.len(),
            outcome.failures.len()
        );
        outcome
    }

    /// Parse a single, possibly multi-document, manifest file
    pub fn parse_file(&self, path: &Path) -> ManifestResult<Vec<ManifestDocument>> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.parse_str(&content, Some(path))
    }

    /// Parse manifest text. Empty documents are skipped.
    pub fn parse_str(
        &self,
        content: &str,
        source_path: Option<&Path>,
    ) -> ManifestResult<Vec<ManifestDocument>> {
        let mut documents = Vec::new();

        for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
            let value = serde_yaml::Value::deserialize(document)?;
            if value.is_null() {
                debug!("Skipping empty document {}", index);
                continue;
            }

            let json = serde_json::to_value(&value)?;
            if !json.is_object() {
                return Err(ManifestError::InvalidDocument {
                    index,
                    reason: "top level value is not a mapping".to_string(),
                });
            }

            documents.push(ManifestDocument::from_value(
                json,
                source_path.map(Path::to_path_buf),
                index,
            ));
        }

        Ok(documents)
    }

    /// Check if a document matches any of the given filters
    pub fn matches_filters(&self, document: &ManifestDocument, filters: &[String]) -> bool {
        if filters.is_empty() {
            return true;
        }

        filters
            .iter()
            .any(|filter| self.matches_filter(document, filter))
    }

    /// Check if a document's apiVersion matches a glob pattern
    fn matches_filter(&self, document: &ManifestDocument, filter: &str) -> bool {
        let pattern = match Pattern::new(filter) {
            Ok(p) => p,
            Err(_) => return false,
        };

        pattern.matches(&document.api_version)
    }
}
