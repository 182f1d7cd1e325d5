//! Process-wide scheme holding every API type of this crate

use crate::v1alpha1;
use kubetalk_scheme::{Scheme, SchemeResult};
use std::sync::OnceLock;
use tracing::info;

static SCHEME: OnceLock<Scheme> = OnceLock::new();

/// Build a scheme with every group version registered
pub fn build_scheme() -> SchemeResult<Scheme> {
    let mut scheme = Scheme::new();
    v1alpha1::add_to_scheme(&mut scheme)?;
    Ok(scheme)
}

/// The shared scheme, registered on first access and read-only afterwards.
///
/// # Panics
///
/// Panics if registration fails, e.g. when two types claim the same kind.
/// Binaries call this during startup so a bad registration aborts before
/// any work is done.
pub fn scheme() -> &'static Scheme {
    SCHEME.get_or_init(|| match build_scheme() {
        Ok(scheme) => {
            info!("Initialized scheme with {} kinds", scheme.len());
            scheme
        }
        Err(err) => panic!("failed to register API types: {err}"),
    })
}
