//! # Waymark Domain
//!
//! Core types of the symbolic-path registry: route descriptors and the path
//! grammar, caller parameters, the error taxonomy, and the field-shape
//! dispatch used by parameter injection.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | Paths, descriptors, parameters, resolved targets |
//! | [`injection`] | Field shapes, extraction, injector plans |
//! | [`ports`] | Service locator and injector contracts |
//! | [`error`] | `RouterError` and `Result` |
//! | [`constants`] | Discovery naming conventions |

pub mod constants;
pub mod error;
pub mod injection;
pub mod ports;
pub mod value_objects;

pub use error::{Result, RouterError};
pub use injection::{ExtraField, FieldShape, FieldSpec, InjectionContext, InjectorPlan, Transferable};
pub use ports::{ExtraInjector, ServiceLocator};
pub use value_objects::{
    ExtraValue, Extras, Instance, RouteDescriptor, RouteKind, RoutePath, RouteSummary,
    ServiceBinding, SharedService, Target, TargetType,
};
