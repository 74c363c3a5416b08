//! Value objects
//!
//! Immutable data shared between discovery, resolution and injection.

pub mod extras;
pub mod path;
pub mod route;
pub mod target;

pub use extras::{ExtraValue, Extras};
pub use path::RoutePath;
pub use route::{
    AnyTarget, RouteDescriptor, RouteKind, RouteSummary, ServiceBinding, SharedService,
    TargetType, contract_of, simple_type_name,
};
pub use target::{Instance, Target};
