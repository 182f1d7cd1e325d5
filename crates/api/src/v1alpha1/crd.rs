use super::{KubetalkSpec, KubetalkStatus, GROUP, KIND, PLURAL, VERSION};
use kubetalk_manifest::{CrdBuilder, CrdScope, CrdVersion, CustomResourceDefinition, ManifestResult};

/// The CustomResourceDefinition that serves Kubetalk: namespaced, with a
/// status subresource and `v1alpha1` as the storage version
pub fn crd() -> ManifestResult<CustomResourceDefinition> {
    CrdBuilder::new(GROUP, KIND)
        .plural(PLURAL)
        .scope(CrdScope::Namespaced)
        .version(
            CrdVersion::new::<KubetalkSpec>(VERSION)?
                .with_status::<KubetalkStatus>()?
                .storage(true),
        )
        .build()
}
