//! Group tables
//!
//! A group fragment fills a [`GroupEntries`] in one pass; the result is
//! frozen into an immutable [`GroupTable`] that lives for the rest of the
//! process.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;
use waymark_domain::{RouteDescriptor, RouteSummary, ServiceBinding, TargetType};

/// Collector handed to [`RouteGroup::load_into`](crate::ports::RouteGroup::load_into)
#[derive(Debug)]
pub struct GroupEntries {
    group: String,
    entries: HashMap<String, Arc<RouteDescriptor>>,
    rejected: Vec<String>,
}

impl GroupEntries {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            entries: HashMap::new(),
            rejected: Vec::new(),
        }
    }

    /// Group being loaded
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Insert a descriptor
    ///
    /// Rejects descriptors of another group and duplicate paths (the first
    /// registration is kept). Returns whether the descriptor was inserted.
    pub fn insert(&mut self, descriptor: RouteDescriptor) -> bool {
        let path = descriptor.path().as_str();
        if descriptor.group() != self.group {
            self.reject(format!(
                "{path}: belongs to group '{}', not '{}'",
                descriptor.group(),
                self.group
            ));
            return false;
        }
        if self.entries.contains_key(path) {
            self.reject(format!("{path}: registered twice"));
            return false;
        }
        self.entries
            .insert(path.to_string(), Arc::new(descriptor));
        true
    }

    /// Register a screen target
    pub fn add_screen(&mut self, path: &str, target: TargetType) -> &mut Self {
        match RouteDescriptor::screen(path, target) {
            Ok(descriptor) => {
                self.insert(descriptor);
            }
            Err(e) => self.reject(e.to_string()),
        }
        self
    }

    /// Register a service target published through `binding`
    pub fn add_service(
        &mut self,
        path: &str,
        target: TargetType,
        binding: ServiceBinding,
    ) -> &mut Self {
        match RouteDescriptor::service(path, target, binding) {
            Ok(descriptor) => {
                self.insert(descriptor);
            }
            Err(e) => self.reject(e.to_string()),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reasons for every rejected registration
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    fn reject(&mut self, reason: String) {
        warn!(group = %self.group, %reason, "Rejected route registration");
        self.rejected.push(reason);
    }

    /// Freeze into an immutable table
    pub fn finish(self) -> GroupTable {
        GroupTable {
            name: self.group,
            entries: self.entries,
        }
    }
}

/// Materialized, immutable path → descriptor mapping of one group
#[derive(Debug)]
pub struct GroupTable {
    name: String,
    entries: HashMap<String, Arc<RouteDescriptor>>,
}

impl GroupTable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, path: &str) -> Option<&Arc<RouteDescriptor>> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &Arc<RouteDescriptor>> {
        self.entries.values()
    }

    /// Summaries sorted by path
    pub fn summaries(&self) -> Vec<RouteSummary> {
        let mut summaries: Vec<RouteSummary> = self
            .entries
            .values()
            .map(|descriptor| RouteSummary::from(descriptor.as_ref()))
            .collect();
        summaries.sort_by(|a, b| a.path.cmp(&b.path));
        summaries
    }
}
