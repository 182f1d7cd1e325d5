//! Group, version and kind identifiers

use crate::error::SchemeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An API group paired with a version, e.g. `kubetalk.io/v1alpha1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupVersion {
    pub group: String,
    pub version: String,
}

impl GroupVersion {
    pub fn new(group: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
        }
    }

    /// Parse the value of an `apiVersion` field.
    ///
    /// Core group versions carry no group (`v1`), everything else is
    /// `group/version`.
    pub fn parse(api_version: &str) -> Result<Self, SchemeError> {
        let invalid = || SchemeError::InvalidApiVersion(api_version.to_string());

        match api_version.split_once('/') {
            None if !api_version.is_empty() => Ok(Self::new("", api_version)),
            None => Err(invalid()),
            Some((group, version)) => {
                if group.is_empty() || version.is_empty() || version.contains('/') {
                    return Err(invalid());
                }
                Ok(Self::new(group, version))
            }
        }
    }

    /// Render as the value of an `apiVersion` field
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    pub fn with_kind(&self, kind: impl Into<String>) -> GroupVersionKind {
        GroupVersionKind {
            group: self.group.clone(),
            version: self.version.clone(),
            kind: kind.into(),
        }
    }
}

impl fmt::Display for GroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.api_version())
    }
}

/// Fully qualified type identifier used as the scheme key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// Build from the `apiVersion` and `kind` fields of a document
    pub fn from_type_meta(api_version: &str, kind: &str) -> Result<Self, SchemeError> {
        if kind.is_empty() {
            return Err(SchemeError::MissingTypeMeta("kind"));
        }
        Ok(GroupVersion::parse(api_version)?.with_kind(kind))
    }

    pub fn group_version(&self) -> GroupVersion {
        GroupVersion::new(self.group.clone(), self.version.clone())
    }

    pub fn api_version(&self) -> String {
        self.group_version().api_version()
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.api_version(), self.kind)
    }
}
