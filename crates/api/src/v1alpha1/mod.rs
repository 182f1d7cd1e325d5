//! `kubetalk.io/v1alpha1` API group version

mod crd;
mod types;

pub use crd::crd;
pub use types::{Kubetalk, KubetalkList, KubetalkSpec, KubetalkStatus};

use kubetalk_scheme::{GroupVersion, Scheme, SchemeBuilder, SchemeResult};

pub const GROUP: &str = "kubetalk.io";
pub const VERSION: &str = "v1alpha1";
pub const API_VERSION: &str = "kubetalk.io/v1alpha1";

pub const KIND: &str = "Kubetalk";
pub const LIST_KIND: &str = "KubetalkList";
pub const PLURAL: &str = "kubetalks";

pub fn group_version() -> GroupVersion {
    GroupVersion::new(GROUP, VERSION)
}

/// Registrations for every type of this group version
pub fn scheme_builder() -> SchemeBuilder {
    SchemeBuilder::new(group_version())
        .register::<Kubetalk>()
        .register::<KubetalkList>()
}

pub fn add_to_scheme(scheme: &mut Scheme) -> SchemeResult<()> {
    scheme_builder().add_to_scheme(scheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_version_matches_group_version() {
        assert_eq!(group_version().api_version(), API_VERSION);
    }

    #[test]
    fn test_add_to_scheme() {
        let mut scheme = Scheme::new();
        add_to_scheme(&mut scheme).unwrap();

        assert!(scheme.recognizes(&group_version().with_kind(KIND)));
        assert!(scheme.recognizes(&group_version().with_kind(LIST_KIND)));
        assert_eq!(scheme.len(), 2);
    }
}
