//! Deferred registration of the types of one group version

use crate::error::SchemeResult;
use crate::gvk::GroupVersion;
use crate::scheme::{Object, Scheme};
use std::fmt;
use tracing::info;

type RegisterFn = fn(&mut Scheme, &GroupVersion) -> SchemeResult<()>;

fn register_type<T: Object>(scheme: &mut Scheme, gv: &GroupVersion) -> SchemeResult<()> {
    scheme.add_known_type::<T>(gv)
}

/// Collects the types of an API group version so they can be added to any
/// number of schemes later
#[derive(Clone)]
pub struct SchemeBuilder {
    group_version: GroupVersion,
    registrations: Vec<RegisterFn>,
}

impl fmt::Debug for SchemeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemeBuilder")
            .field("group_version", &self.group_version)
            .field("registrations", &self.registrations.len())
            .finish()
    }
}

impl SchemeBuilder {
    pub fn new(group_version: GroupVersion) -> Self {
        Self {
            group_version,
            registrations: Vec::new(),
        }
    }

    pub fn group_version(&self) -> &GroupVersion {
        &self.group_version
    }

    pub fn register<T: Object>(mut self) -> Self {
        self.registrations.push(register_type::<T>);
        self
    }

    /// Add every recorded type to `scheme`, stopping at the first failure
    pub fn add_to_scheme(&self, scheme: &mut Scheme) -> SchemeResult<()> {
        for register in &self.registrations {
            register(scheme, &self.group_version)?;
        }

        info!(
            "Registered {} kinds for {}",
            self.registrations.len(),
            self.group_version
        );
        Ok(())
    }

    /// Build a fresh scheme holding only this group version
    pub fn build(&self) -> SchemeResult<Scheme> {
        let mut scheme = Scheme::new();
        self.add_to_scheme(&mut scheme)?;
        Ok(scheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemeError;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Gadget {}

    impl Object for Gadget {
        const KIND: &'static str = "Gadget";
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct GadgetList {
        items: Vec<Gadget>,
    }

    impl Object for GadgetList {
        const KIND: &'static str = "GadgetList";
    }

    #[test]
    fn test_build_registers_all_types() {
        let builder = SchemeBuilder::new(GroupVersion::new("test.example.com", "v1"))
            .register::<Gadget>()
            .register::<GadgetList>();

        let scheme = builder.build().unwrap();
        assert_eq!(scheme.len(), 2);
        assert_eq!(scheme.object_kind::<GadgetList>().unwrap().kind, "GadgetList");
    }

    #[test]
    fn test_add_to_scheme_twice_fails() {
        let builder =
            SchemeBuilder::new(GroupVersion::new("test.example.com", "v1")).register::<Gadget>();

        let mut scheme = Scheme::new();
        builder.add_to_scheme(&mut scheme).unwrap();

        let err = builder.add_to_scheme(&mut scheme).unwrap_err();
        assert!(matches!(err, SchemeError::DuplicateKind { .. }));
    }

    #[test]
    fn test_same_type_registered_twice_in_builder() {
        let builder = SchemeBuilder::new(GroupVersion::new("test.example.com", "v1"))
            .register::<Gadget>()
            .register::<Gadget>();

        assert!(builder.build().is_err());
    }
}
