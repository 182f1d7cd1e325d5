//! Output settings

use crate::KubetalkResult;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Document format for generated manifests
    #[serde(default)]
    pub format: OutputFormat,

    /// Directory the CRD manifest is written to
    pub crd_path: PathBuf,
}

impl OutputConfig {
    pub fn validate(&self) -> Result<()> {
        if self.crd_path.as_os_str().is_empty() {
            return Err(anyhow!("CRD output path cannot be empty"));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Yaml,
            crd_path: PathBuf::from("./config/crd/bases"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Yaml => "yaml",
            OutputFormat::Json => "json",
        }
    }

    /// Render any serializable document in this format
    pub fn render<T: Serialize>(&self, document: &T) -> KubetalkResult<String> {
        let rendered = match self {
            OutputFormat::Yaml => serde_yaml::to_string(document)?,
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(document)?;
                json.push('\n');
                json
            }
        };
        Ok(rendered)
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(anyhow!("Unknown output format: {}", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
