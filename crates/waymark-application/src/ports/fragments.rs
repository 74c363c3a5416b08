//! Fragment contracts
//!
//! What the generator emits per compiled module: at most one root fragment
//! listing the module's groups, and one group fragment per group.

use crate::domain_services::group_table::GroupEntries;
use crate::domain_services::root_index::RootRegistrar;

/// Root fragment: registers `group → accessor` pairs
pub trait RouteRoot: Send + Sync {
    fn register_into(&self, registrar: &mut RootRegistrar<'_>);
}

/// Group fragment: inserts every descriptor of one group in one pass
pub trait RouteGroup: Send + Sync {
    fn load_into(&self, entries: &mut GroupEntries);
}
