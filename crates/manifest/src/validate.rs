//! Validation of manifest documents against a scheme and CRD schemas

use crate::document::ManifestDocument;
use crate::error::ManifestResult;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kubetalk_scheme::{GroupVersionKind, Scheme};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

const MAX_NAME_LENGTH: usize = 253;

/// Outcome of validating one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub document: String,
    pub gvk: Option<GroupVersionKind>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn new(document: &ManifestDocument) -> Self {
        Self {
            document: document.to_string(),
            ..Default::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_valid() { "ok" } else { "invalid" };
        writeln!(f, "{}: {}", self.document, verdict)?;
        for error in &self.errors {
            writeln!(f, "  error: {error}")?;
        }
        for warning in &self.warnings {
            writeln!(f, "  warning: {warning}")?;
        }
        Ok(())
    }
}

/// Validates documents the way an API server would on create: the kind must
/// be known, the document must decode, and its fields must fit the
/// structural schema
pub struct ManifestValidator<'a> {
    scheme: &'a Scheme,
    schemas: HashMap<GroupVersionKind, Value>,
    list_items: HashMap<GroupVersionKind, GroupVersionKind>,
}

impl<'a> ManifestValidator<'a> {
    pub fn new(scheme: &'a Scheme) -> Self {
        Self {
            scheme,
            schemas: HashMap::new(),
            list_items: HashMap::new(),
        }
    }

    /// Check documents against the schemas of every version of `crd`
    pub fn with_crd(mut self, crd: &CustomResourceDefinition) -> ManifestResult<Self> {
        let doc = serde_json::to_value(crd)?;
        let spec = &doc["spec"];

        let group = spec["group"].as_str().unwrap_or_default();
        let kind = spec["names"]["kind"].as_str().unwrap_or_default();
        let list_kind = spec["names"]["listKind"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{kind}List"));

        for version in spec["versions"].as_array().into_iter().flatten() {
            let Some(name) = version["name"].as_str() else {
                continue;
            };

            let gvk = GroupVersionKind::new(group, name, kind);
            let list_gvk = GroupVersionKind::new(group, name, list_kind.as_str());

            if let Some(schema) = version["schema"].get("openAPIV3Schema") {
                debug!("Loaded schema for {}", gvk);
                self.schemas.insert(gvk.clone(), schema.clone());
            }
            self.list_items.insert(list_gvk, gvk);
        }

        Ok(self)
    }

    pub fn validate(&self, document: &ManifestDocument) -> ValidationReport {
        let mut report = ValidationReport::new(document);
        report.gvk = self.validate_object(&document.content, "", &mut report);
        report
    }

    pub fn validate_all(&self, documents: &[ManifestDocument]) -> Vec<ValidationReport> {
        documents.iter().map(|doc| self.validate(doc)).collect()
    }

    fn validate_object(
        &self,
        value: &Value,
        prefix: &str,
        report: &mut ValidationReport,
    ) -> Option<GroupVersionKind> {
        let gvk = match Scheme::type_meta(value) {
            Ok(gvk) => gvk,
            Err(e) => {
                report.errors.push(format!("{prefix}{e}"));
                return None;
            }
        };

        if !self.scheme.recognizes(&gvk) {
            report
                .errors
                .push(format!("{prefix}no kind {gvk} is registered"));
            return Some(gvk);
        }

        // Items are decoded one by one so a bad item does not hide the others
        if let Some(item_gvk) = self.list_item_kind(&gvk) {
            match value.get("items") {
                None | Some(Value::Null) | Some(Value::Array(_)) => {}
                Some(other) => report.errors.push(format!(
                    "{prefix}items: expected array, found {}",
                    json_type_name(other)
                )),
            }
            self.validate_items(value, &item_gvk, prefix, report);
            return Some(gvk);
        }

        let decoded = self.scheme.decode(value.clone());

        self.validate_metadata(value, prefix, report);

        let before_schema = report.errors.len();
        if let Some(schema) = self.schemas.get(&gvk) {
            for field in ["spec", "status"] {
                if let (Some(field_value), Some(field_schema)) =
                    (value.get(field), schema["properties"].get(field))
                {
                    check_schema(
                        field_value,
                        field_schema,
                        &format!("{prefix}{field}"),
                        report,
                    );
                }
            }
        }

        // A schema error already names the offending field
        if let Err(e) = decoded {
            if report.errors.len() == before_schema {
                report.errors.push(format!("{prefix}{e}"));
            }
        }

        if value
            .get("status")
            .and_then(Value::as_object)
            .is_some_and(|status| !status.is_empty())
        {
            report.warnings.push(format!(
                "{prefix}status is ignored on create and is only written through the status subresource"
            ));
        }

        Some(gvk)
    }

    /// The element kind of a list document, if `gvk` is a list
    fn list_item_kind(&self, gvk: &GroupVersionKind) -> Option<GroupVersionKind> {
        if let Some(item) = self.list_items.get(gvk) {
            return Some(item.clone());
        }

        let item_kind = gvk.kind.strip_suffix("List")?;
        let item = gvk.group_version().with_kind(item_kind);
        self.scheme.recognizes(&item).then_some(item)
    }

    fn validate_items(
        &self,
        list: &Value,
        item_gvk: &GroupVersionKind,
        prefix: &str,
        report: &mut ValidationReport,
    ) {
        let items = list["items"].as_array().map(Vec::as_slice).unwrap_or_default();

        for (i, item) in items.iter().enumerate() {
            let item_prefix = format!("{prefix}items[{i}]: ");

            // Items of a typed list may leave out their own type information
            let mut item = item.clone();
            if let Some(fields) = item.as_object_mut() {
                fields
                    .entry("apiVersion")
                    .or_insert_with(|| Value::String(item_gvk.api_version()));
                fields
                    .entry("kind")
                    .or_insert_with(|| Value::String(item_gvk.kind.clone()));
            }

            self.validate_object(&item, &item_prefix, report);
        }
    }

    fn validate_metadata(&self, value: &Value, prefix: &str, report: &mut ValidationReport) {
        let metadata = value.get("metadata");
        let name = metadata.and_then(|m| m.get("name")).and_then(Value::as_str);
        let generate_name = metadata
            .and_then(|m| m.get("generateName"))
            .and_then(Value::as_str);

        match (name, generate_name) {
            (Some(name), _) => {
                if !is_dns1123_subdomain(name) {
                    report.errors.push(format!(
                        "{prefix}metadata.name {name:?} must be a lowercase RFC 1123 subdomain"
                    ));
                }
            }
            (None, Some(_)) => {}
            (None, None) => report
                .errors
                .push(format!("{prefix}metadata.name is required")),
        }
    }
}

/// Check `value` against a structural schema node
fn check_schema(value: &Value, schema: &Value, path: &str, report: &mut ValidationReport) {
    if value.is_null() {
        if !schema["nullable"].as_bool().unwrap_or(false) {
            report
                .warnings
                .push(format!("null value at {path:?} would be pruned"));
        }
        return;
    }

    if let Some(expected) = schema["type"].as_str() {
        if !matches_type(value, expected) {
            report.errors.push(format!(
                "{path}: expected {expected}, found {}",
                json_type_name(value)
            ));
            return;
        }
    }

    if let Some(allowed) = schema["enum"].as_array() {
        if !allowed.contains(value) {
            report
                .errors
                .push(format!("{path}: {value} is not one of the allowed values"));
        }
    }

    match value {
        Value::Object(fields) => {
            for required in schema["required"].as_array().into_iter().flatten() {
                if let Some(required) = required.as_str() {
                    if !fields.contains_key(required) {
                        report.errors.push(format!("{path}.{required}: required"));
                    }
                }
            }

            let preserve_unknown = schema["x-kubernetes-preserve-unknown-fields"]
                .as_bool()
                .unwrap_or(false);
            let additional = schema.get("additionalProperties").filter(|a| a.is_object());

            for (key, field) in fields {
                let field_path = format!("{path}.{key}");
                if let Some(field_schema) = schema["properties"].get(key) {
                    check_schema(field, field_schema, &field_path, report);
                } else if let Some(additional) = additional {
                    check_schema(field, additional, &field_path, report);
                } else if !preserve_unknown {
                    report
                        .warnings
                        .push(format!("unknown field {field_path:?} would be pruned"));
                }
            }
        }
        Value::Array(items) => {
            if let Some(item_schema) = schema.get("items") {
                for (i, item) in items.iter().enumerate() {
                    check_schema(item, item_schema, &format!("{path}[{i}]"), report);
                }
            }
        }
        _ => {}
    }
}

fn matches_type(value: &Value, expected: &str) -> bool {
    match expected {
        "object" => value.is_object(),
        "array" => value.is_array(),
        "string" => value.is_string(),
        "boolean" => value.is_boolean(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        _ => true,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Lowercase RFC 1123 subdomain, the format required of object names
pub fn is_dns1123_subdomain(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_NAME_LENGTH {
        return false;
    }

    name.split('.').all(|label| {
        let bytes = label.as_bytes();
        match (bytes.first(), bytes.last()) {
            (Some(first), Some(last)) => {
                first.is_ascii_alphanumeric()
                    && last.is_ascii_alphanumeric()
                    && bytes
                        .iter()
                        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
            }
            _ => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubetalk_scheme::{GroupVersion, Object};
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Gadget {
        #[serde(default)]
        metadata: Value,
        #[serde(default)]
        spec: GadgetSpec,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct GadgetSpec {
        #[serde(default)]
        size: String,
    }

    impl Object for Gadget {
        const KIND: &'static str = "Gadget";
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct GadgetList {
        #[serde(default)]
        items: Vec<Gadget>,
    }

    impl Object for GadgetList {
        const KIND: &'static str = "GadgetList";
    }

    fn gadget_scheme() -> Scheme {
        let gv = GroupVersion::new("example.io", "v1");
        let mut scheme = Scheme::new();
        scheme.add_known_type::<Gadget>(&gv).unwrap();
        scheme.add_known_type::<GadgetList>(&gv).unwrap();
        scheme
    }

    fn report_for(scheme: &Scheme, content: Value) -> ValidationReport {
        let document = ManifestDocument::from_value(content, None, 0);
        ManifestValidator::new(scheme).validate(&document)
    }

    #[test]
    fn test_list_reports_every_bad_item() {
        let scheme = gadget_scheme();
        let report = report_for(
            &scheme,
            json!({
                "apiVersion": "example.io/v1",
                "kind": "GadgetList",
                "items": [
                    {"metadata": {"name": "Bad_Name"}},
                    {"metadata": {}},
                    {"metadata": {"name": "typed"}, "spec": {"size": 42}},
                    {"metadata": {"name": "fine"}, "spec": {"size": "s"}}
                ]
            }),
        );

        assert_eq!(report.errors.len(), 3, "{report}");
        assert!(report.errors[0].starts_with("items[0]: metadata.name"));
        assert_eq!(report.errors[1], "items[1]: metadata.name is required");
        assert!(report.errors[2].starts_with("items[2]: failed to decode"));
    }

    #[test]
    fn test_list_with_null_items_is_valid() {
        let scheme = gadget_scheme();
        let report = report_for(
            &scheme,
            json!({"apiVersion": "example.io/v1", "kind": "GadgetList", "items": null}),
        );
        assert!(report.is_valid(), "{report}");

        let report = report_for(
            &scheme,
            json!({"apiVersion": "example.io/v1", "kind": "GadgetList", "items": "nope"}),
        );
        assert_eq!(report.errors, vec!["items: expected array, found string"]);
    }

    #[test]
    fn test_decode_failure_keeps_metadata_checks() {
        let scheme = gadget_scheme();
        let report = report_for(
            &scheme,
            json!({
                "apiVersion": "example.io/v1",
                "kind": "Gadget",
                "spec": {"size": 42}
            }),
        );

        assert_eq!(report.errors.len(), 2, "{report}");
        assert_eq!(report.errors[0], "metadata.name is required");
        assert!(report.errors[1].starts_with("failed to decode"));
    }

    #[test]
    fn test_dns1123_subdomain() {
        assert!(is_dns1123_subdomain("demo"));
        assert!(is_dns1123_subdomain("demo-1.example"));
        assert!(!is_dns1123_subdomain(""));
        assert!(!is_dns1123_subdomain("Demo"));
        assert!(!is_dns1123_subdomain("-demo"));
        assert!(!is_dns1123_subdomain("demo."));
        assert!(!is_dns1123_subdomain("demo_1"));
        assert!(!is_dns1123_subdomain(&"a".repeat(254)));
    }

    #[test]
    fn test_check_schema_type_mismatch() {
        let schema = json!({
            "type": "object",
            "properties": {"foo": {"type": "string"}}
        });

        let mut report = ValidationReport::default();
        check_schema(&json!({"foo": 3}), &schema, "spec", &mut report);
        assert_eq!(report.errors, vec!["spec.foo: expected string, found integer"]);
    }

    #[test]
    fn test_check_schema_unknown_field_warns() {
        let schema = json!({
            "type": "object",
            "properties": {"foo": {"type": "string"}}
        });

        let mut report = ValidationReport::default();
        check_schema(&json!({"foo": "x", "bar": 1}), &schema, "spec", &mut report);
        assert!(report.is_valid());
        assert_eq!(report.warnings, vec!["unknown field \"spec.bar\" would be pruned"]);
    }

    #[test]
    fn test_check_schema_preserve_unknown_fields() {
        let schema = json!({"type": "object", "x-kubernetes-preserve-unknown-fields": true});

        let mut report = ValidationReport::default();
        check_schema(&json!({"anything": [1, 2]}), &schema, "spec", &mut report);
        assert!(report.is_valid());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_check_schema_required_and_enum() {
        let schema = json!({
            "type": "object",
            "required": ["mode"],
            "properties": {
                "mode": {"type": "string", "enum": ["fast", "slow"]},
                "tags": {"type": "array", "items": {"type": "string"}}
            }
        });

        let mut report = ValidationReport::default();
        check_schema(&json!({"tags": ["a", 1]}), &schema, "spec", &mut report);
        assert_eq!(
            report.errors,
            vec![
                "spec.mode: required",
                "spec.tags[1]: expected string, found integer"
            ]
        );

        let mut report = ValidationReport::default();
        check_schema(&json!({"mode": "medium"}), &schema, "spec", &mut report);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_nullable() {
        let mut report = ValidationReport::default();
        check_schema(&Value::Null, &json!({"type": "string", "nullable": true}), "x", &mut report);
        assert!(report.is_valid());

        check_schema(&Value::Null, &json!({"type": "string"}), "x", &mut report);
        assert!(report.is_valid());
        assert_eq!(report.warnings, vec!["null value at \"x\" would be pruned"]);
    }
}
