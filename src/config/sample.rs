//! Sample resource defaults

use anyhow::{anyhow, Result};
use kubetalk_manifest::is_dns1123_subdomain;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Defaults used by the `sample` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Resource name
    pub name: String,

    /// Target namespace, left unset when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Value of `spec.foo`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub foo: String,

    /// Labels added to the resource metadata
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl SampleConfig {
    pub fn validate(&self) -> Result<()> {
        if !is_dns1123_subdomain(&self.name) {
            return Err(anyhow!(
                "Sample name {:?} must be a lowercase RFC 1123 subdomain",
                self.name
            ));
        }

        if let Some(namespace) = &self.namespace {
            if namespace.is_empty() {
                return Err(anyhow!("Sample namespace cannot be empty when set"));
            }
        }

        Ok(())
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        let mut labels = BTreeMap::new();
        labels.insert(
            "app.kubernetes.io/name".to_string(),
            "kubetalk".to_string(),
        );

        Self {
            name: "kubetalk-sample".to_string(),
            namespace: None,
            foo: String::new(),
            labels,
        }
    }
}
