//! Hand-written fragments shared by the unit tests

use std::any::TypeId;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use waymark_application::domain_services::{GroupEntries, RootRegistrar};
use waymark_application::ports::{FragmentCtor, RouteGroup, RouteRoot};
use waymark_application::{Router, RouterOptions, StaticArtifact};
use waymark_domain::{ExtraInjector, InjectorPlan, Result, ServiceBinding, TargetType};

pub trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

pub trait Farewell: Send + Sync {
    fn bye(&self) -> String;
}

#[derive(Default)]
pub struct English;

impl Greeter for English {
    fn greet(&self) -> String {
        "hello".to_string()
    }
}

#[derive(Default)]
pub struct French;

impl Farewell for French {
    fn bye(&self) -> String {
        "au revoir".to_string()
    }
}

#[derive(Default)]
pub struct Home;

#[derive(Default)]
pub struct Profile {
    pub age: i32,
    pub name: Option<String>,
    pub greeter: Option<Arc<dyn Greeter>>,
}

/// Service reference that is not a route path
#[derive(Default)]
pub struct Misrouted {
    pub greeter: Option<Arc<dyn Greeter>>,
}

pub struct Broken;

fn broken() -> std::result::Result<Broken, String> {
    Err("requires a database handle".to_string())
}

struct AppGroup;

impl RouteGroup for AppGroup {
    fn load_into(&self, entries: &mut GroupEntries) {
        entries
            .add_screen("/app/Home", TargetType::of::<Home>())
            .add_screen("/app/Profile", TargetType::of::<Profile>())
            .add_screen("/app/Broken", TargetType::with_ctor::<Broken>(broken))
            .add_service(
                "/app/Greeter",
                TargetType::of::<English>(),
                ServiceBinding::new::<English, dyn Greeter>(|service| service),
            )
            .add_service(
                "/app/Farewell",
                TargetType::of::<French>(),
                ServiceBinding::new::<French, dyn Farewell>(|service| service),
            );
    }
}

struct AppRoot;

impl RouteRoot for AppRoot {
    fn register_into(&self, registrar: &mut RootRegistrar<'_>) {
        registrar.register("app", || Box::new(AppGroup));
    }
}

fn profile_injector() -> Result<Box<dyn ExtraInjector>> {
    let plan = InjectorPlan::<Profile>::builder("Profile")
        .field("age", None, |p: &mut Profile| &mut p.age)
        .field("name", None, |p: &mut Profile| &mut p.name)
        .field("greeter", Some("/app/Greeter"), |p: &mut Profile| &mut p.greeter)
        .build()?;
    Ok(Box::new(plan))
}

/// Module `app`: screens, two services, one injector
pub fn app_artifact() -> StaticArtifact {
    StaticArtifact::new("app")
        .with_entry(
            "waymark.generated.Waymark_Root_app",
            FragmentCtor::Root(|| Ok(Box::new(AppRoot))),
        )
        .with_entry(
            "waymark.generated.Waymark_Group_app",
            FragmentCtor::Group(|| Box::new(AppGroup)),
        )
        .with_entry(
            "waymark.generated.Profile_Extra",
            FragmentCtor::Extra {
                target: || TypeId::of::<Profile>(),
                build: profile_injector,
            },
        )
}

pub fn app_router() -> Router {
    app_router_with(RouterOptions::default())
}

pub fn app_router_with(options: RouterOptions) -> Router {
    let router = Router::with_options(options);
    router.initialize(&[&app_artifact()]);
    router
}

struct BadGroup;

impl RouteGroup for BadGroup {
    fn load_into(&self, entries: &mut GroupEntries) {
        entries.add_screen("/bad/Misrouted", TargetType::of::<Misrouted>());
    }
}

struct BadRoot;

impl RouteRoot for BadRoot {
    fn register_into(&self, registrar: &mut RootRegistrar<'_>) {
        registrar.register("bad", || Box::new(BadGroup));
    }
}

fn misrouted_injector() -> Result<Box<dyn ExtraInjector>> {
    let plan = InjectorPlan::<Misrouted>::builder("Misrouted")
        .field("greeter", Some("app.Greeter"), |m: &mut Misrouted| {
            &mut m.greeter
        })
        .build()?;
    Ok(Box::new(plan))
}

/// Module `bad`: one screen whose injector fails generation
pub fn misrouted_artifact() -> StaticArtifact {
    StaticArtifact::new("bad")
        .with_entry(
            "waymark.generated.Waymark_Root_bad",
            FragmentCtor::Root(|| Ok(Box::new(BadRoot))),
        )
        .with_entry(
            "waymark.generated.Misrouted_Extra",
            FragmentCtor::Extra {
                target: || TypeId::of::<Misrouted>(),
                build: misrouted_injector,
            },
        )
}

pub trait Ping: Send + Sync {}

pub trait Pong: Send + Sync {}

/// Service that takes a while to construct and depends on `/cyc/B`
#[derive(Default)]
pub struct Alpha {
    pub pong: Option<Arc<dyn Pong>>,
}

impl Ping for Alpha {}

/// Service that takes a while to construct and depends on `/cyc/A`
#[derive(Default)]
pub struct Beta {
    pub ping: Option<Arc<dyn Ping>>,
}

impl Pong for Beta {}

pub const SLOW_CTOR: Duration = Duration::from_millis(200);

fn slow_alpha() -> std::result::Result<Alpha, String> {
    thread::sleep(SLOW_CTOR);
    Ok(Alpha::default())
}

fn slow_beta() -> std::result::Result<Beta, String> {
    thread::sleep(SLOW_CTOR);
    Ok(Beta::default())
}

struct CycleGroup;

impl RouteGroup for CycleGroup {
    fn load_into(&self, entries: &mut GroupEntries) {
        entries
            .add_service(
                "/cyc/A",
                TargetType::with_ctor::<Alpha>(slow_alpha),
                ServiceBinding::new::<Alpha, dyn Ping>(|service| service),
            )
            .add_service(
                "/cyc/B",
                TargetType::with_ctor::<Beta>(slow_beta),
                ServiceBinding::new::<Beta, dyn Pong>(|service| service),
            );
    }
}

struct CycleRoot;

impl RouteRoot for CycleRoot {
    fn register_into(&self, registrar: &mut RootRegistrar<'_>) {
        registrar.register("cyc", || Box::new(CycleGroup));
    }
}

fn alpha_injector() -> Result<Box<dyn ExtraInjector>> {
    let plan = InjectorPlan::<Alpha>::builder("Alpha")
        .field("pong", Some("/cyc/B"), |a: &mut Alpha| &mut a.pong)
        .build()?;
    Ok(Box::new(plan))
}

fn beta_injector() -> Result<Box<dyn ExtraInjector>> {
    let plan = InjectorPlan::<Beta>::builder("Beta")
        .field("ping", Some("/cyc/A"), |b: &mut Beta| &mut b.ping)
        .build()?;
    Ok(Box::new(plan))
}

/// Module `cyc`: two slow services that depend on each other
pub fn cycle_artifact() -> StaticArtifact {
    StaticArtifact::new("cyc")
        .with_entry(
            "waymark.generated.Waymark_Root_cyc",
            FragmentCtor::Root(|| Ok(Box::new(CycleRoot))),
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
}

/// Loads of the `counted` group, across every router in this binary
pub static COUNTED_LOADS: AtomicUsize = AtomicUsize::new(0);

pub const COUNTED_PATHS: [&str; 8] = [
    "/counted/A",
    "/counted/B",
    "/counted/C",
    "/counted/D",
    "/counted/E",
    "/counted/F",
    "/counted/G",
    "/counted/H",
];

struct CountedGroup;

impl RouteGroup for CountedGroup {
    fn load_into(&self, entries: &mut GroupEntries) {
        COUNTED_LOADS.fetch_add(1, Ordering::SeqCst);
        for path in COUNTED_PATHS {
            entries.add_screen(path, TargetType::of::<Home>());
        }
    }
}

struct CountedRoot;

impl RouteRoot for CountedRoot {
    fn register_into(&self, registrar: &mut RootRegistrar<'_>) {
        registrar.register("counted", || Box::new(CountedGroup));
    }
}

/// Module `counted`: one group whose loads are counted
pub fn counted_artifact() -> StaticArtifact {
    StaticArtifact::new("counted").with_entry(
        "waymark.generated.Waymark_Root_counted",
        FragmentCtor::Root(|| Ok(Box::new(CountedRoot))),
    )
}
