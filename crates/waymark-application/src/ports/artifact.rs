//! Compiled artifacts
//!
//! An [`Artifact`] is an opaque handle to one compiled unit that can list
//! its entries. Discovery only looks at names; the artifact decides where
//! the entries come from.

use std::fmt;

use super::registry::{FragmentCtor, ROUTE_FRAGMENTS, RouteFragment};

/// One enumerated entry of an artifact
#[derive(Clone)]
pub struct CompiledEntry {
    /// Fully qualified entry name
    pub name: String,
    pub ctor: FragmentCtor,
}

impl CompiledEntry {
    pub fn new(name: impl Into<String>, ctor: FragmentCtor) -> Self {
        Self {
            name: name.into(),
            ctor,
        }
    }
}

impl From<&RouteFragment> for CompiledEntry {
    fn from(fragment: &RouteFragment) -> Self {
        Self::new(fragment.name, fragment.ctor)
    }
}

impl fmt::Debug for CompiledEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledEntry")
            .field("name", &self.name)
            .field("kind", &self.ctor.kind())
            .finish()
    }
}

/// A compiled unit whose entries can be enumerated
pub trait Artifact: Send + Sync {
    /// Name used in logs and the discovery report
    fn name(&self) -> &str;

    /// Enumerate entries; an error skips the whole artifact
    fn open(&self) -> Result<Vec<CompiledEntry>, String>;
}

/// Every fragment linked into the current binary
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedArtifact;

impl Artifact for LinkedArtifact {
    fn name(&self) -> &str {
        "linked"
    }

    fn open(&self) -> Result<Vec<CompiledEntry>, String> {
        Ok(ROUTE_FRAGMENTS.iter().map(CompiledEntry::from).collect())
    }
}

/// Fixed list of entries, built in code
#[derive(Debug, Clone)]
pub struct StaticArtifact {
    name: String,
    entries: Vec<CompiledEntry>,
}

impl StaticArtifact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn with_entry(mut self, name: impl Into<String>, ctor: FragmentCtor) -> Self {
        self.entries.push(CompiledEntry::new(name, ctor));
        self
    }
}

impl Artifact for StaticArtifact {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> Result<Vec<CompiledEntry>, String> {
        Ok(self.entries.clone())
    }
}
