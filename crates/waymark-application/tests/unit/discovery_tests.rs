//! Unit tests for the discovery protocol

use waymark_application::domain_services::{GroupEntries, RootRegistrar};
use waymark_application::ports::{Artifact, CompiledEntry, FragmentCtor, RouteGroup, RouteRoot};
use waymark_application::{Router, StaticArtifact};
use waymark_domain::{Extras, RouterError, TargetType};

use crate::fixtures::{Home, app_artifact, misrouted_artifact};

struct Unreadable;

impl Artifact for Unreadable {
    fn name(&self) -> &str {
        "unreadable"
    }

    fn open(&self) -> Result<Vec<CompiledEntry>, String> {
        Err("archive truncated".to_string())
    }
}

struct OtherGroup;

impl RouteGroup for OtherGroup {
    fn load_into(&self, entries: &mut GroupEntries) {
        entries.add_screen("/app/Imposter", TargetType::of::<Home>());
    }
}

struct ClashingRoot;

impl RouteRoot for ClashingRoot {
    fn register_into(&self, registrar: &mut RootRegistrar<'_>) {
        registrar.register("app", || Box::new(OtherGroup));
    }
}

#[test]
fn test_report_counts_fragments() {
    let router = Router::new();
    let report = router.initialize(&[&app_artifact()]);

    assert_eq!(report.artifacts_scanned, 1);
    assert_eq!(report.roots_loaded, vec!["waymark.generated.Waymark_Root_app"]);
    assert_eq!(report.groups_indexed, 1);
    assert_eq!(report.group_fragments_seen, 1);
    assert_eq!(report.injectors_indexed, 1);
    assert!(report.is_clean());
}

#[test]
fn test_rejected_injector_reported_at_initialize() {
    let router = Router::new();
    let report = router.initialize(&[&app_artifact(), &misrouted_artifact()]);

    assert_eq!(report.injectors_indexed, 1);
    assert_eq!(report.fragments_skipped.len(), 1);
    let skipped = &report.fragments_skipped[0];
    assert_eq!(skipped.name, "waymark.generated.Misrouted_Extra");
    assert!(skipped.reason.contains("Misrouted.greeter"), "{}", skipped.reason);
    assert!(!report.is_clean());
    assert_eq!(router.materialization_count(), 0);
}

#[test]
fn test_discovery_does_not_materialize() {
    let router = Router::new();
    router.initialize(&[&app_artifact()]);

    assert_eq!(router.materialization_count(), 0);
    let groups = router.groups().expect("initialized");
    assert_eq!(groups.len(), 1);
    assert!(!groups[0].materialized);
    assert_eq!(groups[0].routes, None);
}

#[test]
fn test_unreadable_artifact_is_skipped() {
    let router = Router::new();
    let report = router.initialize(&[&Unreadable, &app_artifact()]);

    assert_eq!(report.artifacts_scanned, 1);
    assert_eq!(report.artifacts_skipped.len(), 1);
    assert_eq!(report.artifacts_skipped[0].reason, "archive truncated");
    assert!(router.resolve("/app/Home", &Extras::new()).is_ok());
}

#[test]
fn test_failing_root_fragment_is_skipped() {
    let artifact = StaticArtifact::new("broken").with_entry(
        "waymark.generated.Waymark_Root_broken",
        FragmentCtor::Root(|| Err("constructor panicked".to_string())),
    );
    let router = Router::new();
    let report = router.initialize(&[&artifact, &app_artifact()]);

    assert_eq!(report.fragments_skipped.len(), 1);
    assert_eq!(report.roots_loaded.len(), 1);
    assert!(!report.is_clean());
}

#[test]
fn test_misnamed_fragment_is_skipped() {
    let artifact = StaticArtifact::new("odd").with_entry(
        "waymark.generated.Waymark_Root_odd",
        FragmentCtor::Group(|| Box::new(OtherGroup)),
    );
    let router = Router::new();
    let report = router.initialize(&[&artifact]);

    assert_eq!(report.fragments_skipped.len(), 1);
    assert!(report.fragments_skipped[0].reason.contains("Root"));
    assert_eq!(report.groups_indexed, 0);
}

#[test]
fn test_entries_outside_namespace_are_ignored() {
    let artifact = StaticArtifact::new("foreign").with_entry(
        "vendor.generated.Waymark_Root_app",
        FragmentCtor::Root(|| Ok(Box::new(ClashingRoot))),
    );
    let router = Router::new();
    let report = router.initialize(&[&artifact]);

    assert!(report.roots_loaded.is_empty());
    assert!(report.is_clean());
    let err = router.resolve("/app/Home", &Extras::new()).expect_err("no groups");
    assert!(matches!(err, RouterError::GroupNotFound { .. }));
}

#[test]
fn test_duplicate_group_keeps_first_registrant() {
    let clashing = StaticArtifact::new("clashing").with_entry(
        "waymark.generated.Waymark_Root_clashing",
        FragmentCtor::Root(|| Ok(Box::new(ClashingRoot))),
    );
    let router = Router::new();
    let report = router.initialize(&[&app_artifact(), &clashing]);

    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(report.conflicts[0].group, "app");
    assert_eq!(report.conflicts[0].kept, "waymark.generated.Waymark_Root_app");
    assert_eq!(report.conflicts[0].rejected, "waymark.generated.Waymark_Root_clashing");

    assert!(router.resolve("/app/Home", &Extras::new()).is_ok());
    let err = router
        .resolve("/app/Imposter", &Extras::new())
        .expect_err("second registrant dropped");
    assert!(matches!(err, RouterError::RouteNotFound { .. }));
}

#[test]
fn test_initialize_is_idempotent() {
    let router = Router::new();
    let first = router.initialize(&[&app_artifact()]).groups_indexed;
    let second = router.initialize(&[&Unreadable]);

    assert_eq!(second.groups_indexed, first);
    assert!(second.artifacts_skipped.is_empty());
}
