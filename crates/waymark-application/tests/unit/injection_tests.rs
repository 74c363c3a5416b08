//! Unit tests for parameter injection through the router

use std::any::TypeId;
use std::sync::Arc;

use waymark_application::domain_services::{GroupEntries, RootRegistrar};
use waymark_application::ports::{FragmentCtor, RouteGroup, RouteRoot};
use waymark_application::{Router, RouterOptions, StaticArtifact};
use waymark_domain::{
    ExtraInjector, Extras, InjectorPlan, Result, RouterError, ServiceBinding, TargetType,
};

use crate::fixtures::{Greeter, Home, Profile, app_artifact, app_router, misrouted_artifact};

#[test]
fn test_age_injected() {
    let router = app_router();
    let target = router
        .resolve("/app/Profile", &Extras::new().with("age", 42_i32))
        .expect("resolves");
    let profile = target.into_screen::<Profile>().ok().expect("is a Profile");
    assert_eq!(profile.age, 42);
}

#[test]
fn test_absent_age_keeps_default() {
    let router = app_router();
    let target = router.resolve("/app/Profile", &Extras::new()).expect("resolves");
    let profile = target.screen_ref::<Profile>().expect("is a Profile");
    assert_eq!(profile.age, 0);
    assert!(profile.name.is_none());
}

#[test]
fn test_service_field_resolved_through_router() {
    let router = app_router();
    let target = router
        .build("/app/Profile")
        .with("name", "zhao")
        .navigate()
        .expect("resolves");
    let profile = target.screen_ref::<Profile>().expect("is a Profile");
    let greeter = profile.greeter.as_ref().expect("greeter injected");

    assert_eq!(profile.name.as_deref(), Some("zhao"));
    assert_eq!(greeter.greet(), "hello");
    let shared = router.service::<dyn Greeter>("/app/Greeter").expect("resolves");
    assert!(Arc::ptr_eq(greeter, &shared));
}

#[test]
fn test_rejected_injector_fails_every_resolution() {
    let router = Router::new();
    router.initialize(&[&app_artifact(), &misrouted_artifact()]);

    for _ in 0..2 {
        match router.resolve("/bad/Misrouted", &Extras::new()) {
            Err(RouterError::UnsupportedExtraType { target, field, .. }) => {
                assert_eq!(target, "Misrouted");
                assert_eq!(field, "greeter");
            }
            Err(other) => panic!("Expected UnsupportedExtraType, got {other}"),
            Ok(_) => panic!("Expected UnsupportedExtraType, got a target"),
        }
    }
    // Unrelated routes keep working.
    assert!(router.resolve("/app/Profile", &Extras::new()).is_ok());
}

#[test]
fn test_inject_external_instance() {
    let router = app_router();
    let mut profile = Profile {
        age: 7,
        ..Profile::default()
    };
    let injected = router
        .inject(&mut profile, &Extras::new().with("name", "li"))
        .expect("injects");

    assert!(injected);
    assert_eq!(profile.age, 7);
    assert_eq!(profile.name.as_deref(), Some("li"));
    assert!(profile.greeter.is_some());
}

#[test]
fn test_inject_without_injector() {
    let router = app_router();
    let mut home = Home;
    assert!(!router.inject(&mut home, &Extras::new()).expect("no-op"));
}

// Services that depend on each other through injected fields.

#[derive(Default)]
struct Alpha {
    beta: Option<Arc<Beta>>,
}

#[derive(Default)]
struct Beta {
    alpha: Option<Arc<Alpha>>,
}

#[derive(Default)]
struct Leaf;

#[derive(Default)]
struct Branch {
    leaf: Option<Arc<Leaf>>,
    label: Option<String>,
}

struct GraphGroup;

impl RouteGroup for GraphGroup {
    fn load_into(&self, entries: &mut GroupEntries) {
        entries
            .add_service("/graph/Alpha", TargetType::of::<Alpha>(), ServiceBinding::concrete::<Alpha>())
            .add_service("/graph/Beta", TargetType::of::<Beta>(), ServiceBinding::concrete::<Beta>())
            .add_service("/graph/Leaf", TargetType::of::<Leaf>(), ServiceBinding::concrete::<Leaf>())
            .add_service(
                "/graph/Branch",
                TargetType::of::<Branch>(),
                ServiceBinding::concrete::<Branch>(),
            );
    }
}

struct GraphRoot;

impl RouteRoot for GraphRoot {
    fn register_into(&self, registrar: &mut RootRegistrar<'_>) {
        registrar.register("graph", || Box::new(GraphGroup));
    }
}

fn alpha_injector() -> Result<Box<dyn ExtraInjector>> {
    let plan = InjectorPlan::<Alpha>::builder("Alpha")
        .field("beta", Some("/graph/Beta"), |a: &mut Alpha| &mut a.beta)
        .build()?;
    Ok(Box::new(plan))
}

fn beta_injector() -> Result<Box<dyn ExtraInjector>> {
    let plan = InjectorPlan::<Beta>::builder("Beta")
        .field("alpha", Some("/graph/Alpha"), |b: &mut Beta| &mut b.alpha)
        .build()?;
    Ok(Box::new(plan))
}

fn branch_injector() -> Result<Box<dyn ExtraInjector>> {
    let plan = InjectorPlan::<Branch>::builder("Branch")
        .field("leaf", Some("/graph/Leaf"), |b: &mut Branch| &mut b.leaf)
        .field("label", None, |b: &mut Branch| &mut b.label)
        .build()?;
    Ok(Box::new(plan))
}

fn graph_router(options: RouterOptions) -> Router {
    let artifact = StaticArtifact::new("graph")
        .with_entry(
            "waymark.generated.Waymark_Root_graph",
            FragmentCtor::Root(|| Ok(Box::new(GraphRoot))),
        )
        .with_entry(
            "waymark.generated.Alpha_Extra",
            FragmentCtor::Extra {
                target: || TypeId::of::<Alpha>(),
                build: alpha_injector,
            },
        )
        .with_entry(
            "waymark.generated.Beta_Extra",
            FragmentCtor::Extra {
                target: || TypeId::of::<Beta>(),
                build: beta_injector,
            },
        )
        .with_entry(
            "waymark.generated.Branch_Extra",
            FragmentCtor::Extra {
                target: || TypeId::of::<Branch>(),
                build: branch_injector,
            },
        );
    let router = Router::with_options(options);
    router.initialize(&[&artifact]);
    router
}

#[test]
fn test_dependency_cycle_detected() {
    let router = graph_router(RouterOptions::default());
    let err = router
        .resolve("/graph/Alpha", &Extras::new())
        .expect_err("cycle");
    match &err {
        RouterError::TargetConstructionFailed { reason, .. } => {
            assert!(reason.contains("cycle"), "unexpected reason: {reason}");
        }
        other => panic!("Expected TargetConstructionFailed, got {other}"),
    }
    assert_eq!(router.services_constructed(), 0);
}

#[test]
fn test_nested_dependency_resolved() {
    let router = graph_router(RouterOptions::default());
    let branch = router.service::<Branch>("/graph/Branch").expect("resolves");
    let leaf = router.service::<Leaf>("/graph/Leaf").expect("resolves");

    let injected = branch.leaf.as_ref().expect("leaf injected");
    assert!(Arc::ptr_eq(injected, &leaf));
    assert_eq!(router.services_constructed(), 2);
}

#[test]
fn test_service_injected_once_at_first_construction() {
    let router = graph_router(RouterOptions::default());
    let first = router
        .resolve("/graph/Branch", &Extras::new().with("label", "first"))
        .expect("resolves");
    let second = router
        .resolve("/graph/Branch", &Extras::new().with("label", "second"))
        .expect("resolves");

    let branch = second.service_as::<Branch>().expect("published concretely");
    assert_eq!(branch.label.as_deref(), Some("first"));
    assert!(first.same_instance(&second));
}

#[test]
fn test_dependency_depth_limit() {
    let router = graph_router(RouterOptions::default().with_max_dependency_depth(1));
    let err = router
        .resolve("/graph/Branch", &Extras::new())
        .expect_err("too deep");
    match &err {
        RouterError::TargetConstructionFailed { path, reason, .. } => {
            assert_eq!(path, "/graph/Leaf");
            assert!(reason.contains("deeper"));
        }
        other => panic!("Expected TargetConstructionFailed, got {other}"),
    }
    assert!(router.service::<Leaf>("/graph/Leaf").is_ok());
}
