//! Runtime side of the generator macros
//!
//! [`route_module!`](crate::route_module) and
//! [`route_extras!`](crate::route_extras) expand to fragments built from
//! these types; nothing here is meant to be named by hand.

use crate::domain_services::GroupEntries;
use crate::ports::{GroupAccessor, RouteGroup, RouteRoot};

/// Root fragment emitted by `route_module!`
pub struct GeneratedRoot {
    groups: &'static [(&'static str, GroupAccessor)],
}

impl GeneratedRoot {
    pub const fn new(groups: &'static [(&'static str, GroupAccessor)]) -> Self {
        Self { groups }
    }

    /// Boxed form used by the fragment constructor
    pub fn boxed(
        groups: &'static [(&'static str, GroupAccessor)],
    ) -> Result<Box<dyn RouteRoot>, String> {
        let root: Box<dyn RouteRoot> = Box::new(Self::new(groups));
        Ok(root)
    }
}

impl RouteRoot for GeneratedRoot {
    fn register_into(&self, registrar: &mut crate::domain_services::RootRegistrar<'_>) {
        for (group, accessor) in self.groups {
            registrar.register(group, *accessor);
        }
    }
}

/// Group fragment emitted by `route_module!`
pub struct GeneratedGroup {
    loader: fn(&mut GroupEntries),
}

impl GeneratedGroup {
    pub fn boxed(loader: fn(&mut GroupEntries)) -> Box<dyn RouteGroup> {
        Box::new(Self { loader })
    }
}

impl RouteGroup for GeneratedGroup {
    fn load_into(&self, entries: &mut GroupEntries) {
        (self.loader)(entries);
    }
}
