//! Fragment Registry
//!
//! The reserved discovery namespace. Generated fragments register
//! themselves into [`ROUTE_FRAGMENTS`] at link time via `linkme`, and the
//! router enumerates only this slice instead of walking every type in the
//! process.
//!
//! ## Registering a Fragment (what the generator macros emit)
//!
//! ```ignore
//! use waymark_application::ports::registry::{FragmentCtor, RouteFragment, ROUTE_FRAGMENTS};
//!
//! #[linkme::distributed_slice(ROUTE_FRAGMENTS)]
//! static ROOT: RouteFragment = RouteFragment {
//!     name: "waymark.generated.Waymark_Root_app",
//!     ctor: FragmentCtor::Root(|| Ok(Box::new(AppRoot))),
//! };
//! ```

use std::any::TypeId;

use waymark_domain::ExtraInjector;
use waymark_domain::constants::{
    DISCOVERY_NAMESPACE, EXTRA_FRAGMENT_SUFFIX, GROUP_FRAGMENT_PREFIX, ROOT_FRAGMENT_PREFIX,
};

use super::fragments::{RouteGroup, RouteRoot};

/// Zero-argument constructor of a group fragment
pub type GroupAccessor = fn() -> Box<dyn RouteGroup>;

/// How to instantiate a fragment
#[derive(Clone, Copy)]
pub enum FragmentCtor {
    /// Root fragment; construction may fail
    Root(fn() -> Result<Box<dyn RouteRoot>, String>),
    /// Group fragment
    Group(GroupAccessor),
    /// Injector fragment for one target type
    Extra {
        /// Type the injector fills
        target: fn() -> TypeId,
        /// Generates the injector plan, rejecting unsupported field shapes
        build: fn() -> waymark_domain::Result<Box<dyn ExtraInjector>>,
    },
}

impl FragmentCtor {
    pub fn kind(&self) -> FragmentKind {
        match self {
            Self::Root(_) => FragmentKind::Root,
            Self::Group(_) => FragmentKind::Group,
            Self::Extra { .. } => FragmentKind::Extra,
        }
    }
}

/// Category of a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Root,
    Group,
    Extra,
}

/// Registry entry for one generated fragment
pub struct RouteFragment {
    /// Fully qualified name: `<namespace>.<fragment name>`
    pub name: &'static str,
    pub ctor: FragmentCtor,
}

#[linkme::distributed_slice]
pub static ROUTE_FRAGMENTS: [RouteFragment] = [..];

/// Classify a fully qualified entry name by naming convention
///
/// Returns `None` for names outside the discovery namespace or matching no
/// convention.
pub fn classify(name: &str) -> Option<(FragmentKind, &str)> {
    let local = name
        .strip_prefix(DISCOVERY_NAMESPACE)
        .and_then(|rest| rest.strip_prefix('.'))?;
    if let Some(module) = local.strip_prefix(ROOT_FRAGMENT_PREFIX) {
        return Some((FragmentKind::Root, module));
    }
    if let Some(group) = local.strip_prefix(GROUP_FRAGMENT_PREFIX) {
        return Some((FragmentKind::Group, group));
    }
    local
        .strip_suffix(EXTRA_FRAGMENT_SUFFIX)
        .map(|target| (FragmentKind::Extra, target))
}

/// List all linked fragments
///
/// Returns `(name, kind)` pairs in link order. Useful for CLI output.
pub fn list_route_fragments() -> Vec<(&'static str, FragmentKind)> {
    ROUTE_FRAGMENTS
        .iter()
        .map(|fragment| (fragment.name, fragment.ctor.kind()))
        .collect()
}
