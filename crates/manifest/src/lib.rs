//! CustomResourceDefinition generation and manifest validation

pub mod crd;
pub mod document;
pub mod error;
pub mod parser;
pub mod validate;

pub use crd::{openapi_schema, CrdBuilder, CrdNames, CrdScope, CrdVersion};
pub use document::ManifestDocument;
pub use error::{ManifestError, ManifestResult};
pub use parser::{ManifestParser, ParseOutcome};
pub use validate::{is_dns1123_subdomain, ManifestValidator, ValidationReport};

pub use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
