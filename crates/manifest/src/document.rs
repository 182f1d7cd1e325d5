//! A single parsed manifest document

use kubetalk_scheme::{GroupVersionKind, SchemeError};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// One YAML document from a manifest file, converted to JSON
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDocument {
    /// File the document came from, if any
    pub source_path: Option<PathBuf>,

    /// Position of the document within its file
    pub index: usize,

    pub api_version: String,
    pub kind: String,
    pub name: Option<String>,
    pub namespace: Option<String>,

    /// Full document content
    pub content: Value,
}

impl ManifestDocument {
    pub fn from_value(content: Value, source_path: Option<PathBuf>, index: usize) -> Self {
        let text = |v: Option<&Value>| v.and_then(Value::as_str).map(str::to_string);

        let metadata = content.get("metadata");

        Self {
            source_path,
            index,
            api_version: text(content.get("apiVersion")).unwrap_or_default(),
            kind: text(content.get("kind")).unwrap_or_default(),
            name: text(metadata.and_then(|m| m.get("name"))),
            namespace: text(metadata.and_then(|m| m.get("namespace"))),
            content,
        }
    }

    pub fn gvk(&self) -> Result<GroupVersionKind, SchemeError> {
        if self.api_version.is_empty() {
            return Err(SchemeError::MissingTypeMeta("apiVersion"));
        }
        GroupVersionKind::from_type_meta(&self.api_version, &self.kind)
    }

    /// Where the document came from, for diagnostics
    pub fn location(&self) -> String {
        match &self.source_path {
            Some(path) => format!("{}#{}", path.display(), self.index),
            None => format!("<input>#{}", self.index),
        }
    }
}

impl fmt::Display for ManifestDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.kind.is_empty() { "<unknown>" } else { &self.kind };
        match (&self.namespace, &self.name) {
            (Some(ns), Some(name)) => write!(f, "{} {}/{}", kind, ns, name),
            (None, Some(name)) => write!(f, "{} {}", kind, name),
            _ => write!(f, "{} ({})", kind, self.location()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_reads_identity() {
        let doc = ManifestDocument::from_value(
            json!({
                "apiVersion": "kubetalk.io/v1alpha1",
                "kind": "Kubetalk",
                "metadata": {"name": "demo", "namespace": "default"}
            }),
            Some(PathBuf::from("demo.yaml")),
            1,
        );

        assert_eq!(doc.api_version, "kubetalk.io/v1alpha1");
        assert_eq!(doc.kind, "Kubetalk");
        assert_eq!(doc.name.as_deref(), Some("demo"));
        assert_eq!(doc.namespace.as_deref(), Some("default"));
        assert_eq!(doc.location(), "demo.yaml#1");
        assert_eq!(doc.to_string(), "Kubetalk default/demo");
        assert_eq!(doc.gvk().unwrap().version, "v1alpha1");
    }

    #[test]
    fn test_missing_api_version() {
        let doc = ManifestDocument::from_value(json!({"kind": "Kubetalk"}), None, 0);
        assert!(doc.gvk().is_err());
        assert_eq!(doc.to_string(), "Kubetalk (<input>#0)");
    }
}
