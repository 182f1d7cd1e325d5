//! Scheme error types

use crate::gvk::GroupVersionKind;

#[derive(thiserror::Error, Debug)]
pub enum SchemeError {
    #[error("kind {gvk} is already registered to {existing}, refusing to register {attempted}")]
    DuplicateKind {
        gvk: GroupVersionKind,
        existing: &'static str,
        attempted: &'static str,
    },

    #[error("type {type_name} is already registered as {gvk}")]
    DuplicateType {
        type_name: &'static str,
        gvk: GroupVersionKind,
    },

    #[error("no kind {0} is registered in the scheme")]
    NotRegistered(GroupVersionKind),

    #[error("type {0} is not registered in the scheme")]
    UnregisteredType(&'static str),

    #[error("document is missing the {0} field")]
    MissingTypeMeta(&'static str),

    #[error("invalid apiVersion: {0:?}")]
    InvalidApiVersion(String),

    #[error("document is not an object")]
    NotAnObject,

    #[error("expected kind {expected}, found {found}")]
    KindMismatch {
        expected: GroupVersionKind,
        found: GroupVersionKind,
    },

    #[error("failed to decode {gvk}: {source}")]
    Decode {
        gvk: GroupVersionKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {gvk}: {source}")]
    Encode {
        gvk: GroupVersionKind,
        #[source]
        source: serde_json::Error,
    },
}

pub type SchemeResult<T> = Result<T, SchemeError>;
