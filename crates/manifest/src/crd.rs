//! CustomResourceDefinition generation

use crate::error::{ManifestError, ManifestResult};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use tracing::debug;

const API_VERSION_DESCRIPTION: &str = "APIVersion defines the versioned schema of this representation of an object. Servers should convert recognized schemas to the latest internal value, and may reject unrecognized values. More info: https://git.k8s.io/community/contributors/devel/sig-architecture/api-conventions.md#resources";

const KIND_DESCRIPTION: &str = "Kind is a string value representing the REST resource this object represents. Servers may infer this from the endpoint the client submits requests to. Cannot be updated. In CamelCase. More info: https://git.k8s.io/community/contributors/devel/sig-architecture/api-conventions.md#types-kinds";

/// Generate the OpenAPI v3 schema of `T` with every subschema inlined, as
/// required for structural CRD schemas
pub fn openapi_schema<T: JsonSchema>() -> ManifestResult<Value> {
    let generator = SchemaSettings::openapi3()
        .with(|settings| {
            settings.inline_subschemas = true;
            settings.meta_schema = None;
        })
        .into_generator();

    let root = generator.into_root_schema_for::<T>();
    let mut schema = serde_json::to_value(root.schema)?;

    // The type name is not part of the API surface
    if let Some(fields) = schema.as_object_mut() {
        fields.remove("title");
    }

    Ok(schema)
}

/// Resource names of a CRD
#[derive(Debug, Clone, PartialEq)]
pub struct CrdNames {
    pub kind: String,
    pub list_kind: String,
    pub plural: String,
    pub singular: String,
    pub short_names: Vec<String>,
    pub categories: Vec<String>,
}

impl CrdNames {
    /// Derive the conventional names from a kind
    pub fn from_kind(kind: &str) -> Self {
        let singular = kind.to_lowercase();
        Self {
            kind: kind.to_string(),
            list_kind: format!("{kind}List"),
            plural: format!("{singular}s"),
            singular,
            short_names: Vec::new(),
            categories: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrdScope {
    Namespaced,
    Cluster,
}

impl CrdScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrdScope::Namespaced => "Namespaced",
            CrdScope::Cluster => "Cluster",
        }
    }
}

/// One served version of a CRD
#[derive(Debug, Clone)]
pub struct CrdVersion {
    pub name: String,
    pub served: bool,
    pub storage: bool,
    pub status_subresource: bool,
    spec_schema: Value,
    status_schema: Option<Value>,
}

impl CrdVersion {
    /// A served version whose spec schema is generated from `Spec`
    pub fn new<Spec: JsonSchema>(name: impl Into<String>) -> ManifestResult<Self> {
        Ok(Self {
            name: name.into(),
            served: true,
            storage: false,
            status_subresource: false,
            spec_schema: openapi_schema::<Spec>()?,
            status_schema: None,
        })
    }

    /// Add a status schema generated from `Status` and enable the status
    /// subresource
    pub fn with_status<Status: JsonSchema>(mut self) -> ManifestResult<Self> {
        self.status_schema = Some(openapi_schema::<Status>()?);
        self.status_subresource = true;
        Ok(self)
    }

    pub fn storage(mut self, storage: bool) -> Self {
        self.storage = storage;
        self
    }

    pub fn served(mut self, served: bool) -> Self {
        self.served = served;
        self
    }

    fn root_schema(&self, description: &str) -> Value {
        let mut properties = Map::new();
        properties.insert(
            "apiVersion".to_string(),
            json!({"description": API_VERSION_DESCRIPTION, "type": "string"}),
        );
        properties.insert(
            "kind".to_string(),
            json!({"description": KIND_DESCRIPTION, "type": "string"}),
        );
        properties.insert("metadata".to_string(), json!({"type": "object"}));
        properties.insert("spec".to_string(), self.spec_schema.clone());
        if let Some(status) = &self.status_schema {
            properties.insert("status".to_string(), status.clone());
        }

        json!({
            "description": description,
            "type": "object",
            "properties": properties,
        })
    }

    fn to_value(&self, description: &str) -> Value {
        let mut version = json!({
            "name": self.name,
            "served": self.served,
            "storage": self.storage,
            "schema": {
                "openAPIV3Schema": self.root_schema(description),
            },
        });

        if self.status_subresource {
            version["subresources"] = json!({"status": {}});
        }

        version
    }
}

/// Builder for `apiextensions.k8s.io/v1` CustomResourceDefinitions
#[derive(Debug, Clone)]
pub struct CrdBuilder {
    group: String,
    names: CrdNames,
    scope: CrdScope,
    description: Option<String>,
    versions: Vec<CrdVersion>,
}

impl CrdBuilder {
    pub fn new(group: impl Into<String>, kind: &str) -> Self {
        Self {
            group: group.into(),
            names: CrdNames::from_kind(kind),
            scope: CrdScope::Namespaced,
            description: None,
            versions: Vec::new(),
        }
    }

    pub fn plural(mut self, plural: impl Into<String>) -> Self {
        self.names.plural = plural.into();
        self
    }

    pub fn short_name(mut self, short_name: impl Into<String>) -> Self {
        self.names.short_names.push(short_name.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.names.categories.push(category.into());
        self
    }

    pub fn scope(mut self, scope: CrdScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn version(mut self, version: CrdVersion) -> Self {
        self.versions.push(version);
        self
    }

    pub fn names(&self) -> &CrdNames {
        &self.names
    }

    /// `<plural>.<group>`
    pub fn crd_name(&self) -> String {
        format!("{}.{}", self.names.plural, self.group)
    }

    fn validate(&self) -> ManifestResult<()> {
        if self.group.is_empty() {
            return Err(ManifestError::InvalidCrd("group cannot be empty".to_string()));
        }

        if self.versions.is_empty() {
            return Err(ManifestError::InvalidCrd(
                "at least one version is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for version in &self.versions {
            if !seen.insert(version.name.as_str()) {
                return Err(ManifestError::InvalidCrd(format!(
                    "version {} is declared twice",
                    version.name
                )));
            }
        }

        let storage_versions = self.versions.iter().filter(|v| v.storage).count();
        if storage_versions != 1 {
            return Err(ManifestError::InvalidCrd(format!(
                "exactly one storage version is required, found {storage_versions}"
            )));
        }

        Ok(())
    }

    pub fn build(&self) -> ManifestResult<CustomResourceDefinition> {
        self.validate()?;

        let description = self.description.clone().unwrap_or_else(|| {
            format!(
                "{} is the Schema for the {} API",
                self.names.kind, self.names.plural
            )
        });

        let mut names = json!({
            "kind": self.names.kind,
            "listKind": self.names.list_kind,
            "plural": self.names.plural,
            "singular": self.names.singular,
        });
        if !self.names.short_names.is_empty() {
            names["shortNames"] = json!(self.names.short_names);
        }
        if !self.names.categories.is_empty() {
            names["categories"] = json!(self.names.categories);
        }

        let versions: Vec<Value> = self
            .versions
            .iter()
            .map(|v| v.to_value(&description))
            .collect();

        let document = json!({
            "apiVersion": "apiextensions.k8s.io/v1",
            "kind": "CustomResourceDefinition",
            "metadata": {
                "name": self.crd_name(),
            },
            "spec": {
                "group": self.group,
                "names": names,
                "scope": self.scope.as_str(),
                "versions": versions,
            },
        });

        debug!("Built CRD {}", self.crd_name());
        Ok(serde_json::from_value(document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    /// Example spec
    #[derive(Serialize, Deserialize, JsonSchema)]
    struct ExampleSpec {
        /// A required label
        label: String,
        #[serde(default)]
        count: Option<i32>,
    }

    #[derive(Serialize, Deserialize, JsonSchema)]
    struct ExampleStatus {
        #[serde(default)]
        ready: bool,
    }

    #[test]
    fn test_openapi_schema_is_inlined() {
        let schema = openapi_schema::<ExampleSpec>().unwrap();

        assert_eq!(schema["type"], "object");
        assert!(schema.get("title").is_none());
        assert!(schema.get("$schema").is_none());
        assert_eq!(schema["properties"]["label"]["type"], "string");
        assert_eq!(schema["required"], json!(["label"]));
    }

    #[test]
    fn test_names_from_kind() {
        let names = CrdNames::from_kind("Example");
        assert_eq!(names.list_kind, "ExampleList");
        assert_eq!(names.singular, "example");
        assert_eq!(names.plural, "examples");
    }

    #[test]
    fn test_build_crd() {
        let crd = CrdBuilder::new("test.example.com", "Example")
            .short_name("ex")
            .version(
                CrdVersion::new::<ExampleSpec>("v1")
                    .unwrap()
                    .with_status::<ExampleStatus>()
                    .unwrap()
                    .storage(true),
            )
            .build()
            .unwrap();

        assert_eq!(crd.metadata.name.as_deref(), Some("examples.test.example.com"));
        assert_eq!(crd.spec.group, "test.example.com");
        assert_eq!(crd.spec.scope, "Namespaced");
        assert_eq!(crd.spec.versions.len(), 1);

        let doc = serde_json::to_value(&crd).unwrap();
        let version = &doc["spec"]["versions"][0];
        assert_eq!(doc["spec"]["names"]["shortNames"], json!(["ex"]));
        assert_eq!(version["subresources"]["status"], json!({}));

        let root = &version["schema"]["openAPIV3Schema"];
        assert_eq!(root["description"], "Example is the Schema for the examples API");
        assert_eq!(root["properties"]["spec"]["properties"]["label"]["type"], "string");
        assert_eq!(root["properties"]["status"]["properties"]["ready"]["type"], "boolean");
    }

    #[test]
    fn test_build_requires_single_storage_version() {
        let builder = CrdBuilder::new("test.example.com", "Example")
            .version(CrdVersion::new::<ExampleSpec>("v1").unwrap())
            .version(CrdVersion::new::<ExampleSpec>("v2").unwrap());

        assert!(matches!(builder.build(), Err(ManifestError::InvalidCrd(_))));
    }

    #[test]
    fn test_build_rejects_duplicate_versions() {
        let builder = CrdBuilder::new("test.example.com", "Example")
            .version(CrdVersion::new::<ExampleSpec>("v1").unwrap().storage(true))
            .version(CrdVersion::new::<ExampleSpec>("v1").unwrap());

        assert!(matches!(builder.build(), Err(ManifestError::InvalidCrd(_))));
    }

    #[test]
    fn test_build_requires_versions() {
        let builder = CrdBuilder::new("test.example.com", "Example");
        assert!(builder.build().is_err());
    }
}
