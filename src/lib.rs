//! Kubetalk: the `kubetalk.io/v1alpha1` API types plus tooling to render
//! their CustomResourceDefinition, produce sample resources and validate
//! manifests.

pub mod cli;
pub mod config;
pub mod utils;

pub use config::{Config, OutputConfig, OutputFormat, SampleConfig, ValidationConfig};
pub use kubetalk_api::{Kubetalk, KubetalkList, KubetalkSpec, KubetalkStatus};
pub use kubetalk_manifest::{CustomResourceDefinition, ManifestParser, ValidationReport};
pub use kubetalk_scheme::{GroupVersionKind, Scheme};

use anyhow::Result;
use kubetalk_api::v1alpha1;
use kubetalk_manifest::{ManifestError, ManifestValidator};
use kubetalk_scheme::SchemeError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main application context
pub struct KubetalkApp {
    config: Config,
    scheme: &'static Scheme,
}

impl KubetalkApp {
    /// Create a new instance bound to the process-wide scheme
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scheme: kubetalk_api::scheme(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scheme(&self) -> &'static Scheme {
        self.scheme
    }

    /// Every registered kind with the Rust type backing it, sorted by kind
    pub fn kinds(&self) -> Vec<(GroupVersionKind, &'static str)> {
        self.scheme
            .known_kinds()
            .into_iter()
            .filter_map(|gvk| self.scheme.descriptor(gvk))
            .map(|descriptor| (descriptor.gvk().clone(), descriptor.type_name()))
            .collect()
    }

    pub fn generate_crd(&self) -> KubetalkResult<CustomResourceDefinition> {
        Ok(v1alpha1::crd()?)
    }

    pub fn render_crd(&self, format: OutputFormat) -> Result<String> {
        let crd = self.generate_crd()?;
        Ok(format.render(&crd)?)
    }

    /// Write the CRD manifest into `dir` and return the file written
    pub async fn write_crd(&self, dir: &Path, format: OutputFormat) -> KubetalkResult<PathBuf> {
        let rendered = format.render(&self.generate_crd()?)?;

        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(utils::crd_file_name(
            v1alpha1::GROUP,
            v1alpha1::PLURAL,
            format,
        ));
        tokio::fs::write(&path, rendered).await?;

        info!("Wrote CRD manifest to {:?}", path);
        Ok(path)
    }

    /// Build a sample Kubetalk from the given settings
    pub fn build_sample(&self, sample: &SampleConfig) -> KubetalkResult<Kubetalk> {
        sample
            .validate()
            .map_err(|e| KubetalkError::Config(e.to_string()))?;

        let mut kubetalk = Kubetalk::new(
            &sample.name,
            KubetalkSpec {
                foo: sample.foo.clone(),
            },
        );
        if let Some(namespace) = &sample.namespace {
            kubetalk = kubetalk.in_namespace(namespace);
        }
        if !sample.labels.is_empty() {
            kubetalk.metadata.labels = Some(sample.labels.clone());
        }

        debug!("Built sample {}", sample.name);
        Ok(kubetalk)
    }

    /// Render a sample through the scheme so the type meta is always stamped
    pub fn render_sample(&self, sample: &SampleConfig, format: OutputFormat) -> Result<String> {
        let kubetalk = self.build_sample(sample)?;
        let document = self.scheme.encode(&kubetalk)?;
        Ok(format.render(&document)?)
    }

    /// Validate every manifest below `paths` whose apiVersion matches one of
    /// `filters`
    pub fn validate_paths(
        &self,
        paths: &[PathBuf],
        filters: &[String],
    ) -> KubetalkResult<ValidationSummary> {
        let crd = self.generate_crd()?;
        let validator = ManifestValidator::new(self.scheme).with_crd(&crd)?;
        let parser = ManifestParser::new();

        let mut summary = ValidationSummary::default();
        for path in paths {
            let outcome = parser.parse_path(path, filters);
            debug!(
                "Parsed {} documents from {:?}",
                outcome.documents.len(),
                path
            );
            summary
                .reports
                .extend(validator.validate_all(&outcome.documents));
            summary.unreadable.extend(
                outcome
                    .failures
                    .into_iter()
                    .map(|(path, err)| (path, err.to_string())),
            );
        }

        info!(
            "Validated {} documents, {} invalid",
            summary.reports.len(),
            summary.invalid_count()
        );
        Ok(summary)
    }
}

/// Reports gathered by a validation run
#[derive(Debug, Default)]
pub struct ValidationSummary {
    pub reports: Vec<ValidationReport>,
    pub unreadable: Vec<(PathBuf, String)>,
}

impl ValidationSummary {
    pub fn invalid_count(&self) -> usize {
        self.reports.iter().filter(|r| !r.is_valid()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.reports.iter().filter(|r| r.has_warnings()).count()
    }

    /// Whether the run succeeded; in strict mode warnings count as failures
    pub fn passed(&self, strict: bool) -> bool {
        self.unreadable.is_empty()
            && self.invalid_count() == 0
            && (!strict || self.warning_count() == 0)
    }

    /// Turn a failed run into an error
    pub fn into_result(self, strict: bool) -> KubetalkResult<Self> {
        if self.passed(strict) {
            return Ok(self);
        }
        let mut failed = self.invalid_count();
        if strict {
            failed = self
                .reports
                .iter()
                .filter(|r| !r.is_valid() || r.has_warnings())
                .count();
        }
        Err(KubetalkError::Validation {
            failed,
            unreadable: self.unreadable.len(),
        })
    }
}

/// Error types for Kubetalk
#[derive(thiserror::Error, Debug)]
pub enum KubetalkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scheme error: {0}")]
    Scheme(#[from] SchemeError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Validation failed: {failed} documents rejected, {unreadable} files unreadable")]
    Validation { failed: usize, unreadable: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for Kubetalk operations
pub type KubetalkResult<T> = std::result::Result<T, KubetalkError>;
