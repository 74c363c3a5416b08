//! Unit tests for path resolution

use std::sync::Arc;

use waymark_application::{Router, RouterOptions};
use waymark_domain::{Extras, RouteKind, RouterError};

use crate::fixtures::{
    English, Farewell, Greeter, Home, app_artifact, app_router, app_router_with,
};

#[test]
fn test_resolve_before_initialize() {
    let router = Router::new();
    let err = router.resolve("/app/Home", &Extras::new()).expect_err("not initialized");
    assert!(matches!(err, RouterError::NotInitialized));
    assert!(router.report().is_err());
    assert_eq!(router.materialization_count(), 0);
}

#[test]
fn test_malformed_path() {
    let router = app_router();
    let err = router
        .resolve("no-leading-slash", &Extras::new())
        .expect_err("malformed");
    assert!(matches!(err, RouterError::MalformedPath { .. }));
}

#[test]
fn test_missing_group() {
    let router = app_router();
    let err = router.resolve("/Home", &Extras::new()).expect_err("no group");
    assert!(matches!(err, RouterError::MissingGroup { .. }));
}

#[test]
fn test_unknown_group() {
    let router = app_router();
    let err = router
        .resolve("/unknownGroup/x", &Extras::new())
        .expect_err("unknown group");
    match err {
        RouterError::GroupNotFound { group, path } => {
            assert_eq!(group, "unknownGroup");
            assert_eq!(path, "/unknownGroup/x");
        }
        other => panic!("Expected GroupNotFound, got {other}"),
    }
}

#[test]
fn test_unknown_route_in_known_group() {
    let router = app_router();
    let err = router
        .resolve("/app/Known", &Extras::new())
        .expect_err("unknown route");
    assert!(matches!(err, RouterError::RouteNotFound { ref group, .. } if group == "app"));
    assert!(err.is_not_found());
}

#[test]
fn test_screen_resolves_to_registered_type() {
    let router = app_router();
    let target = router.resolve("/app/Home", &Extras::new()).expect("resolves");

    assert_eq!(target.kind(), RouteKind::Screen);
    assert!(target.is::<Home>());
    assert_eq!(target.descriptor().group(), "app");
    assert!(target.into_screen::<Home>().is_ok());
}

#[test]
fn test_screens_are_fresh_instances() {
    let router = app_router();
    let first = router.resolve("/app/Home", &Extras::new()).expect("resolves");
    let second = router.resolve("/app/Home", &Extras::new()).expect("resolves");
    assert!(!first.same_instance(&second));
}

#[test]
fn test_group_materialized_once() {
    let router = app_router();
    router.resolve("/app/Home", &Extras::new()).expect("resolves");
    let before = router.routes("app").expect("group exists");
    router.resolve("/app/Profile", &Extras::new()).expect("resolves");
    let after = router.routes("app").expect("group exists");

    assert_eq!(router.materialization_count(), 1);
    assert_eq!(before.len(), after.len());
    let paths: Vec<&str> = after.iter().map(|route| route.path.as_str()).collect();
    assert!(paths.contains(&"/app/Greeter"));
    assert!(paths.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_service_resolves_to_same_instance() {
    let router = app_router();
    let first = router.resolve("/app/Greeter", &Extras::new()).expect("resolves");
    let second = router.resolve("/app/Greeter", &Extras::new()).expect("resolves");

    assert_eq!(first.kind(), RouteKind::Service);
    assert!(first.is::<English>());
    assert!(first.same_instance(&second));
    assert_eq!(router.services_constructed(), 1);
}

#[test]
fn test_distinct_contracts_never_share() {
    let router = app_router();
    let greeter = router.resolve("/app/Greeter", &Extras::new()).expect("resolves");
    let farewell = router.resolve("/app/Farewell", &Extras::new()).expect("resolves");

    assert!(!greeter.same_instance(&farewell));
    assert!(farewell.service_as::<dyn Greeter>().is_none());
    assert_eq!(router.services_constructed(), 2);
}

#[test]
fn test_typed_service_lookup() {
    let router = app_router();
    let greeter = router.service::<dyn Greeter>("/app/Greeter").expect("resolves");
    let again = router.service::<dyn Greeter>("/app/Greeter").expect("resolves");

    assert_eq!(greeter.greet(), "hello");
    assert!(Arc::ptr_eq(&greeter, &again));
    let farewell = router.service::<dyn Farewell>("/app/Farewell").expect("resolves");
    assert_eq!(farewell.bye(), "au revoir");
}

#[test]
fn test_typed_service_lookup_rejects_wrong_contract() {
    let router = app_router();
    let err = router
        .service::<dyn Farewell>("/app/Greeter")
        .err()
        .expect("wrong contract");
    assert!(matches!(err, RouterError::TargetConstructionFailed { .. }));
}

#[test]
fn test_typed_service_lookup_rejects_screen() {
    let router = app_router();
    let err = router
        .service::<dyn Greeter>("/app/Home")
        .err()
        .expect("a screen is not a service");
    assert!(matches!(err, RouterError::TargetConstructionFailed { .. }));
}

#[test]
fn test_construction_failure_is_distinct_from_not_found() {
    let router = app_router();
    let err = router
        .resolve("/app/Broken", &Extras::new())
        .expect_err("cannot construct");
    match &err {
        RouterError::TargetConstructionFailed { path, reason, .. } => {
            assert_eq!(path, "/app/Broken");
            assert!(reason.contains("database"));
        }
        other => panic!("Expected TargetConstructionFailed, got {other}"),
    }
    assert!(!err.is_not_found());
}

#[test]
fn test_preload_from_options() {
    let options = RouterOptions::default().with_preload_groups(["app", "missing"]);
    let router = app_router_with(options);

    assert_eq!(router.materialization_count(), 1);
    let groups = router.groups().expect("initialized");
    assert!(groups[0].materialized);
    assert_eq!(groups[0].routes, Some(6));
}

#[test]
fn test_explicit_preload() {
    let router = Router::new();
    router.initialize(&[&app_artifact()]);

    assert_eq!(router.preload(&["app"]).expect("group exists"), 6);
    assert!(matches!(
        router.preload(&["nope"]),
        Err(RouterError::GroupNotFound { .. })
    ));
    assert_eq!(router.materialization_count(), 1);
}

#[test]
fn test_navigation_builder() {
    let router = app_router();
    let navigation = router.build("/app/Home").with("unused", 1_i32);
    assert_eq!(navigation.path(), "/app/Home");
    assert_eq!(navigation.extras().len(), 1);
    let target = navigation.navigate().expect("resolves");
    assert!(target.is::<Home>());
}
