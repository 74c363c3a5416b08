//! Root index
//!
//! Maps group names to the accessor that materializes them. Populated once
//! by discovery, read-only afterwards. Each slot also owns its group's
//! materialized-or-not state.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::error;

use super::group_table::{GroupEntries, GroupTable};
use crate::ports::GroupAccessor;

/// A group that lost a duplicate registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupConflict {
    pub group: String,
    /// Root fragment that registered the group first
    pub kept: String,
    /// Root fragment whose registration was dropped
    pub rejected: String,
}

/// One group: its accessor and, once loaded, its table
pub struct GroupSlot {
    origin: String,
    accessor: GroupAccessor,
    table: OnceCell<Arc<GroupTable>>,
}

impl GroupSlot {
    /// Root fragment that registered this group
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The table, if already materialized
    pub fn table(&self) -> Option<&Arc<GroupTable>> {
        self.table.get()
    }

    /// Materialize at most once
    ///
    /// Concurrent first callers block on the cell; `on_load` runs only for
    /// the call that actually loads.
    pub fn materialize(&self, name: &str, on_load: impl FnOnce(&GroupTable)) -> &Arc<GroupTable> {
        self.table.get_or_init(|| {
            let group = (self.accessor)();
            let mut entries = GroupEntries::new(name);
            group.load_into(&mut entries);
            let table = entries.finish();
            on_load(&table);
            Arc::new(table)
        })
    }
}

/// Group name → accessor
#[derive(Default)]
pub struct RootIndex {
    groups: HashMap<String, GroupSlot>,
    conflicts: Vec<GroupConflict>,
}

impl RootIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrar for one root fragment
    pub fn registrar<'a>(&'a mut self, origin: &'a str) -> RootRegistrar<'a> {
        RootRegistrar {
            index: self,
            origin,
            registered: 0,
        }
    }

    pub fn get(&self, group: &str) -> Option<&GroupSlot> {
        self.groups.get(group)
    }

    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupSlot)> {
        self.groups.iter().map(|(name, slot)| (name.as_str(), slot))
    }

    /// Duplicate-group events seen during discovery
    pub fn conflicts(&self) -> &[GroupConflict] {
        &self.conflicts
    }
}

/// Handed to [`RouteRoot::register_into`](crate::ports::RouteRoot::register_into)
pub struct RootRegistrar<'a> {
    index: &'a mut RootIndex,
    origin: &'a str,
    registered: usize,
}

impl RootRegistrar<'_> {
    /// Register `group`; the first registrant of a name wins
    pub fn register(&mut self, group: &str, accessor: GroupAccessor) -> &mut Self {
        if group.is_empty() {
            error!(origin = self.origin, "Root fragment registered an empty group name");
            return self;
        }
        if let Some(existing) = self.index.groups.get(group) {
            error!(
                group,
                kept = existing.origin.as_str(),
                rejected = self.origin,
                "Duplicate group registration, keeping the first registrant"
            );
            let conflict = GroupConflict {
                group: group.to_string(),
                kept: existing.origin.clone(),
                rejected: self.origin.to_string(),
            };
            self.index.conflicts.push(conflict);
            return self;
        }
        self.index.groups.insert(
            group.to_string(),
            GroupSlot {
                origin: self.origin.to_string(),
                accessor,
                table: OnceCell::new(),
            },
        );
        self.registered += 1;
        self
    }

    /// Groups this registrar inserted
    pub fn registered(&self) -> usize {
        self.registered
    }
}
