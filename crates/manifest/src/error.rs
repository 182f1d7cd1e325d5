//! Manifest error types

use kubetalk_scheme::SchemeError;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document {index} is not a manifest: {reason}")]
    InvalidDocument { index: usize, reason: String },

    #[error("invalid CustomResourceDefinition: {0}")]
    InvalidCrd(String),

    #[error(transparent)]
    Scheme(#[from] SchemeError),
}

pub type ManifestResult<T> = Result<T, ManifestError>;
