//! Kubetalk resource types

use super::{API_VERSION, GROUP, KIND, LIST_KIND, PLURAL, VERSION};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ListMeta, ObjectMeta};
use k8s_openapi::NamespaceResourceScope;
use kubetalk_scheme::Object;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// KubetalkSpec defines the desired state of Kubetalk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct KubetalkSpec {
    /// Foo is a free-form label. Omitted when empty.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub foo: String,
}

/// KubetalkStatus defines the observed state of Kubetalk
///
/// Written only through the status subresource. Declares no fields yet but is
/// always present on a decoded resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct KubetalkStatus {}

/// Kubetalk is the Schema for the kubetalks API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kubetalk {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,

    #[serde(default, deserialize_with = "null_as_default")]
    pub spec: KubetalkSpec,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: KubetalkStatus,
}

impl Kubetalk {
    pub fn new(name: &str, spec: KubetalkSpec) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            spec,
            status: KubetalkStatus::default(),
        }
    }

    pub fn in_namespace(mut self, namespace: &str) -> Self {
        self.metadata.namespace = Some(namespace.to_string());
        self
    }
}

impl Object for Kubetalk {
    const KIND: &'static str = KIND;
}

impl k8s_openapi::Resource for Kubetalk {
    const API_VERSION: &'static str = API_VERSION;
    const GROUP: &'static str = GROUP;
    const KIND: &'static str = KIND;
    const VERSION: &'static str = VERSION;
    const URL_PATH_SEGMENT: &'static str = PLURAL;
    type Scope = NamespaceResourceScope;
}

impl k8s_openapi::ListableResource for Kubetalk {
    const LIST_KIND: &'static str = LIST_KIND;
}

impl k8s_openapi::Metadata for Kubetalk {
    type Ty = ObjectMeta;

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

/// KubetalkList contains a list of Kubetalk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubetalkList {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ListMeta,

    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Kubetalk>,
}

impl KubetalkList {
    pub fn new(items: Vec<Kubetalk>) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: LIST_KIND.to_string(),
            metadata: ListMeta::default(),
            items,
        }
    }
}

impl FromIterator<Kubetalk> for KubetalkList {
    fn from_iter<I: IntoIterator<Item = Kubetalk>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Object for KubetalkList {
    const KIND: &'static str = LIST_KIND;
}

/// Explicit `null` decodes to the zero value, matching how Kubernetes clients
/// write empty fields
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
