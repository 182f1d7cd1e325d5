//! Kubetalk custom resource API types

pub mod global;
pub mod v1alpha1;

pub use global::{build_scheme, scheme};
pub use v1alpha1::{Kubetalk, KubetalkList, KubetalkSpec, KubetalkStatus};
