//! Domain Services
//!
//! The registry structures behind the router:
//!
//! | Service | Responsibility |
//! |---------|----------------|
//! | [`discovery`] | Scan artifacts, build the root index |
//! | [`root_index`] | Group → accessor, per-group materialization guard |
//! | [`group_table`] | Materialized path → descriptor tables |
//! | [`injector_registry`] | Type handle → injector plan |
//! | [`service_cache`] | Contract → singleton |

pub mod discovery;
pub mod group_table;
pub mod injector_registry;
pub mod root_index;
pub mod service_cache;

pub use discovery::{Discovered, DiscoveryReport, Skipped, discover};
pub use group_table::{GroupEntries, GroupTable};
pub use injector_registry::{Indexed, InjectorRegistry};
pub use root_index::{GroupConflict, GroupSlot, RootIndex, RootRegistrar};
pub use service_cache::{ServiceCache, ServiceKey};
