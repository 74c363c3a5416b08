//! Port Interfaces
//!
//! - [`registry`]: the `linkme` discovery namespace
//! - [`artifact`]: compiled units discovery scans
//! - [`fragments`]: root and group fragment contracts

pub mod artifact;
pub mod fragments;
pub mod registry;

pub use artifact::{Artifact, CompiledEntry, LinkedArtifact, StaticArtifact};
pub use fragments::{RouteGroup, RouteRoot};
pub use registry::{
    FragmentCtor, FragmentKind, GroupAccessor, ROUTE_FRAGMENTS, RouteFragment, classify,
    list_route_fragments,
};
