//! Application Layer - Waymark
//!
//! Discovery, the two-tier registry and the resolution engine.
//!
//! ## Architecture
//!
//! - `ports`: the `linkme` discovery namespace, compiled artifacts and the
//!   root/group fragment contracts
//! - `domain_services`: root index, group tables, injector registry,
//!   service cache, discovery pass
//! - `use_cases`: the [`Router`] and [`Navigation`] builder
//!
//! Fragments are declared with [`route_module!`] and [`route_extras!`].
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `waymark-domain`: descriptors, parameters, injection shapes, errors
//! - `linkme`, `once_cell`, `dashmap` for registration and first-access guards

pub mod domain_services;
pub mod generated;
mod macros;
pub mod ports;
pub mod use_cases;

pub use domain_services::{DiscoveryReport, GroupConflict, Skipped};
pub use ports::{Artifact, CompiledEntry, LinkedArtifact, StaticArtifact};
pub use use_cases::{GroupInfo, Navigation, Router, RouterOptions};

/// Paths used by the generator macros
#[doc(hidden)]
pub mod __private {
    pub use waymark_domain::{ExtraInjector, InjectorPlan, Result, ServiceBinding, TargetType};
}
