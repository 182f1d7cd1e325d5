//! Manifest validation settings

use anyhow::{anyhow, Result};
use kubetalk_api::v1alpha1::GROUP;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// apiVersion glob patterns; documents matching none are skipped.
    /// Empty means every document is checked.
    #[serde(default = "default_filters")]
    pub filters: Vec<String>,

    /// Treat warnings as failures
    #[serde(default)]
    pub strict: bool,
}

impl ValidationConfig {
    pub fn validate(&self) -> Result<()> {
        for filter in &self.filters {
            glob::Pattern::new(filter)
                .map_err(|e| anyhow!("Invalid validation filter {:?}: {}", filter, e))?;
        }
        Ok(())
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            filters: default_filters(),
            strict: false,
        }
    }
}

fn default_filters() -> Vec<String> {
    vec![format!("{GROUP}/*")]
}
