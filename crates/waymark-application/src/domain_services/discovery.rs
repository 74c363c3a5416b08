//! Discovery protocol
//!
//! Scans artifacts for fragments in the reserved namespace and builds the
//! root index and injector registry. A broken artifact or fragment is
//! logged and skipped; discovery itself never fails. Injector plans are
//! generated here, so a rejected field shape is reported before any
//! route resolves.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::injector_registry::{Indexed, InjectorRegistry};
use super::root_index::{GroupConflict, RootIndex};
use crate::ports::{Artifact, CompiledEntry, FragmentCtor, FragmentKind, classify};

/// Something discovery skipped, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    pub name: String,
    pub reason: String,
}

/// Outcome of one discovery pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryReport {
    /// Artifacts successfully opened
    pub artifacts_scanned: usize,
    /// Artifacts that could not be opened
    pub artifacts_skipped: Vec<Skipped>,
    /// Root fragments that registered, by fully qualified name
    pub roots_loaded: Vec<String>,
    /// Groups in the root index
    pub groups_indexed: usize,
    /// Group fragments seen (they load lazily through their root)
    pub group_fragments_seen: usize,
    /// Injector plans generated successfully
    pub injectors_indexed: usize,
    /// Fragments that could not be instantiated or were malformed
    pub fragments_skipped: Vec<Skipped>,
    /// Duplicate group registrations
    pub conflicts: Vec<GroupConflict>,
}

impl DiscoveryReport {
    /// True when nothing was skipped and no group conflicted
    pub fn is_clean(&self) -> bool {
        self.artifacts_skipped.is_empty()
            && self.fragments_skipped.is_empty()
            && self.conflicts.is_empty()
    }
}

/// Everything discovery produces
pub struct Discovered {
    pub roots: RootIndex,
    pub injectors: InjectorRegistry,
    pub report: DiscoveryReport,
}

/// Run one discovery pass over `artifacts`
pub fn discover(artifacts: &[&dyn Artifact]) -> Discovered {
    let mut scan = Scan::default();
    for artifact in artifacts {
        match artifact.open() {
            Ok(entries) => {
                debug!(artifact = artifact.name(), entries = entries.len(), "Scanning artifact");
                scan.report.artifacts_scanned += 1;
                for entry in entries {
                    scan.visit(entry);
                }
            }
            Err(reason) => {
                warn!(artifact = artifact.name(), %reason, "Skipping artifact that cannot be opened");
                scan.report.artifacts_skipped.push(Skipped {
                    name: artifact.name().to_string(),
                    reason,
                });
            }
        }
    }

    let Scan {
        roots,
        injectors,
        mut report,
    } = scan;
    report.groups_indexed = roots.len();
    report.injectors_indexed = injectors.ready();
    report.conflicts = roots.conflicts().to_vec();
    info!(
        artifacts = report.artifacts_scanned,
        roots = report.roots_loaded.len(),
        groups = report.groups_indexed,
        injectors = report.injectors_indexed,
        skipped = report.fragments_skipped.len(),
        conflicts = report.conflicts.len(),
        "Route discovery complete"
    );
    Discovered {
        roots,
        injectors,
        report,
    }
}

#[derive(Default)]
struct Scan {
    roots: RootIndex,
    injectors: InjectorRegistry,
    report: DiscoveryReport,
}

impl Scan {
    fn visit(&mut self, entry: CompiledEntry) {
        let Some((kind, _)) = classify(&entry.name) else {
            return;
        };
        match (kind, entry.ctor) {
            (FragmentKind::Root, FragmentCtor::Root(ctor)) => match ctor() {
                Ok(root) => {
                    let mut registrar = self.roots.registrar(&entry.name);
                    root.register_into(&mut registrar);
                    debug!(fragment = %entry.name, groups = registrar.registered(), "Loaded root fragment");
                    self.report.roots_loaded.push(entry.name);
                }
                Err(reason) => self.skip(entry.name, reason),
            },
            (FragmentKind::Group, FragmentCtor::Group(_)) => {
                self.report.group_fragments_seen += 1;
            }
            (FragmentKind::Extra, FragmentCtor::Extra { target, build }) => {
                match self.injectors.index(&entry.name, target(), build) {
                    Indexed::Ready => {}
                    Indexed::Rejected(reason) => self.skip(entry.name, reason),
                    Indexed::Duplicate => {
                        self.skip(entry.name, "duplicate injector for target type".to_string());
                    }
                }
            }
            (kind, ctor) => {
                let reason = format!(
                    "named as a {kind:?} fragment but built as a {:?} fragment",
                    ctor.kind()
                );
                self.skip(entry.name, reason);
            }
        }
    }

    fn skip(&mut self, name: String, reason: String) {
        warn!(fragment = %name, %reason, "Skipping fragment");
        self.report.fragments_skipped.push(Skipped { name, reason });
    }
}
