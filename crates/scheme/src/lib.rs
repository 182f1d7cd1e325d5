//! Runtime type scheme for API objects
//!
//! Maps group/version/kind identifiers to concrete Rust types so generic
//! code can encode and decode objects without a compile-time dependency on
//! the API packages that define them.

pub mod builder;
pub mod error;
pub mod gvk;
pub mod scheme;

pub use builder::SchemeBuilder;
pub use error::{SchemeError, SchemeResult};
pub use gvk::{GroupVersion, GroupVersionKind};
pub use scheme::{DecodedObject, Object, Scheme, TypeDescriptor};
