//! Resolution engine
//!
//! [`Router`] owns the root index, the materialized group tables, the
//! injector registry and the service cache behind an explicit
//! initialization lifecycle. Nothing here is global: two routers share
//! nothing but the fragments they discover.

use std::any::{Any, TypeId, type_name};
use std::cell::RefCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::{debug, info, warn};
use waymark_domain::constants::DEFAULT_MAX_DEPENDENCY_DEPTH;
use waymark_domain::value_objects::AnyTarget;
use waymark_domain::{
    Extras, InjectionContext, Result, RouteDescriptor, RoutePath, RouteSummary,
    RouterError, ServiceBinding, ServiceLocator, SharedService, Target,
};

use super::navigation::Navigation;
use crate::domain_services::{
    DiscoveryReport, GroupTable, InjectorRegistry, RootIndex, ServiceCache, ServiceKey, discover,
};
use crate::ports::{Artifact, LinkedArtifact};

/// Router tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterOptions {
    /// Groups materialized right after discovery
    pub preload_groups: Vec<String>,
    /// Maximum nesting of service construction on one thread
    pub max_dependency_depth: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            preload_groups: Vec::new(),
            max_dependency_depth: DEFAULT_MAX_DEPENDENCY_DEPTH,
        }
    }
}

impl RouterOptions {
    pub fn with_preload_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preload_groups = groups.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_dependency_depth(mut self, depth: usize) -> Self {
        self.max_dependency_depth = depth;
        self
    }
}

/// Introspection view of one indexed group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupInfo {
    pub name: String,
    /// Root fragment that registered the group
    pub origin: String,
    pub materialized: bool,
    /// Route count, known once materialized
    pub routes: Option<usize>,
}

/// The resolution engine
#[derive(Default)]
pub struct Router {
    options: RouterOptions,
    state: OnceCell<Engine>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RouterOptions) -> Self {
        Self {
            options,
            state: OnceCell::new(),
        }
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Run discovery over `artifacts`
    ///
    /// Only the first call scans; later calls return the first report.
    pub fn initialize(&self, artifacts: &[&dyn Artifact]) -> &DiscoveryReport {
        let engine = self.state.get_or_init(|| {
            let discovered = discover(artifacts);
            let engine = Engine {
                roots: discovered.roots,
                injectors: discovered.injectors,
                services: ServiceCache::new(),
                report: discovered.report,
                materializations: AtomicUsize::new(0),
                max_depth: self.options.max_dependency_depth,
            };
            for group in &self.options.preload_groups {
                if let Err(e) = engine.materialize(group) {
                    warn!(group = group.as_str(), error = %e, "Cannot preload group");
                }
            }
            engine
        });
        &engine.report
    }

    /// Run discovery over every fragment linked into this binary
    pub fn initialize_linked(&self) -> &DiscoveryReport {
        self.initialize(&[&LinkedArtifact])
    }

    pub fn is_initialized(&self) -> bool {
        self.state.get().is_some()
    }

    fn engine(&self) -> Result<&Engine> {
        self.state.get().ok_or(RouterError::NotInitialized)
    }

    /// Resolve `path` into a live target, injecting `extras`
    pub fn resolve(&self, path: &str, extras: &Extras) -> Result<Target> {
        self.engine()?.resolve(path, extras)
    }

    /// Start a fluent resolution of `path`
    pub fn build(&self, path: impl Into<String>) -> Navigation<'_> {
        Navigation::new(self, path.into())
    }

    /// Resolve a service and return it under contract `C`
    pub fn service<C: ?Sized + Send + Sync + 'static>(&self, path: &str) -> Result<Arc<C>> {
        let engine = self.engine()?;
        let descriptor = engine.lookup(path)?;
        let shared = engine.service_instance(&descriptor, &Extras::new())?;
        waymark_domain::value_objects::contract_of::<C>(&shared).ok_or_else(|| {
            RouterError::construction_failed(
                path,
                descriptor.target().type_name(),
                format!("service is not published as {}", type_name::<C>()),
            )
        })
    }

    /// Inject `extras` into an instance the caller constructed
    ///
    /// Returns `false` when `T` has no registered injector.
    pub fn inject<T: Any + Send + Sync>(&self, target: &mut T, extras: &Extras) -> Result<bool> {
        self.engine()?
            .inject(target, TypeId::of::<T>(), extras)
    }

    /// Materialize the named groups now
    pub fn preload<S: AsRef<str>>(&self, groups: &[S]) -> Result<usize> {
        let engine = self.engine()?;
        let mut routes = 0;
        for group in groups {
            routes += engine.materialize(group.as_ref())?.len();
        }
        Ok(routes)
    }

    /// Every indexed group, sorted by name
    pub fn groups(&self) -> Result<Vec<GroupInfo>> {
        let engine = self.engine()?;
        let mut groups: Vec<GroupInfo> = engine
            .roots
            .iter()
            .map(|(name, slot)| GroupInfo {
                name: name.to_string(),
                origin: slot.origin().to_string(),
                materialized: slot.table().is_some(),
                routes: slot.table().map(|table| table.len()),
            })
            .collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }

    /// Routes of `group`, materializing it if needed
    pub fn routes(&self, group: &str) -> Result<Vec<RouteSummary>> {
        Ok(self.engine()?.materialize(group)?.summaries())
    }

    pub fn report(&self) -> Result<&DiscoveryReport> {
        Ok(&self.engine()?.report)
    }

    /// How many group tables have been loaded so far
    pub fn materialization_count(&self) -> usize {
        self.state
            .get()
            .map_or(0, |engine| engine.materializations.load(Ordering::Acquire))
    }

    /// How many service singletons have been constructed so far
    pub fn services_constructed(&self) -> usize {
        self.state
            .get()
            .map_or(0, |engine| engine.services.constructed())
    }
}

struct Engine {
    roots: RootIndex,
    injectors: InjectorRegistry,
    services: ServiceCache,
    report: DiscoveryReport,
    materializations: AtomicUsize,
    max_depth: usize,
}

impl Engine {
    fn materialize(&self, group: &str) -> Result<&Arc<GroupTable>> {
        self.table(group, &format!("/{group}/"))
    }

    /// The group's table, loading it on first access
    fn table(&self, group: &str, path: &str) -> Result<&Arc<GroupTable>> {
        let slot = self
            .roots
            .get(group)
            .ok_or_else(|| RouterError::group_not_found(group, path))?;
        Ok(slot.materialize(group, |table| {
            self.materializations.fetch_add(1, Ordering::AcqRel);
            info!(group, routes = table.len(), "Materialized group");
        }))
    }

    fn lookup(&self, path: &str) -> Result<Arc<RouteDescriptor>> {
        let route = RoutePath::parse(path)?;
        self.table(route.group(), path)?
            .get(path)
            .cloned()
            .ok_or_else(|| RouterError::route_not_found(route.group(), path))
    }

    fn resolve(&self, path: &str, extras: &Extras) -> Result<Target> {
        let descriptor = self.lookup(path)?;
        match descriptor.service_binding() {
            None => {
                let instance = self.build_instance(&descriptor, extras)?;
                debug!(path, target = descriptor.target().simple_name(), "Resolved screen");
                Ok(Target::screen(descriptor, instance))
            }
            Some(_) => {
                let shared = self.service_instance(&descriptor, extras)?;
                Ok(Target::service(descriptor, shared))
            }
        }
    }

    /// Construct a fresh instance and run its injector
    fn build_instance(&self, descriptor: &RouteDescriptor, extras: &Extras) -> Result<AnyTarget> {
        let target = descriptor.target();
        let mut instance = target.construct().map_err(|reason| {
            RouterError::construction_failed(descriptor.path().as_str(), target.type_name(), reason)
        })?;
        let instance_ref: &mut dyn Any = &mut *instance;
        self.inject(instance_ref, target.type_id(), extras)?;
        Ok(instance)
    }

    fn inject(&self, target: &mut dyn Any, type_id: TypeId, extras: &Extras) -> Result<bool> {
        let Some(injector) = self.injectors.get(type_id)? else {
            return Ok(false);
        };
        injector.inject(target, &InjectionContext::new(extras, self))?;
        Ok(true)
    }

    fn service_instance(
        &self,
        descriptor: &Arc<RouteDescriptor>,
        extras: &Extras,
    ) -> Result<SharedService> {
        let path = descriptor.path().as_str();
        let Some(binding) = descriptor.service_binding() else {
            return Err(RouterError::construction_failed(
                path,
                descriptor.target().type_name(),
                "route is a screen, not a service",
            ));
        };
        let key = ServiceKey {
            contract: binding.contract_id(),
            implementation: descriptor.target().type_id(),
        };
        if let Some(shared) = self.services.get(key) {
            return Ok(shared);
        }

        let target = descriptor.target().type_name();
        let _guard = ResolutionGuard::enter(path, target, self.max_depth)?;
        self.services.get_or_try_init(
            key,
            || {
                let instance = self.build_instance(descriptor, extras)?;
                let shared = publish(binding, instance, descriptor)?;
                debug!(
                    path,
                    contract = binding.contract_name(),
                    "Constructed service singleton"
                );
                Ok(shared)
            },
            || {
                RouterError::construction_failed(
                    path,
                    target,
                    "dependency cycle across threads: construction waits on itself",
                )
            },
        )
    }
}

fn publish(
    binding: &ServiceBinding,
    instance: AnyTarget,
    descriptor: &RouteDescriptor,
) -> Result<SharedService> {
    binding.publish(instance).map_err(|reason| {
        RouterError::construction_failed(
            descriptor.path().as_str(),
            descriptor.target().type_name(),
            reason,
        )
    })
}

impl ServiceLocator for Engine {
    fn locate_service(&self, path: &str) -> Result<SharedService> {
        let descriptor = self.lookup(path)?;
        // Nested dependencies never see the caller's parameters.
        self.service_instance(&descriptor, &Extras::new())
    }
}

thread_local! {
    static RESOLVING: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Marks a service under construction on this thread
struct ResolutionGuard;

impl ResolutionGuard {
    fn enter(path: &str, target: &str, max_depth: usize) -> Result<Self> {
        RESOLVING.with_borrow_mut(|stack| {
            if stack.iter().any(|pending| pending == path) {
                let chain = stack.join(" -> ");
                return Err(RouterError::construction_failed(
                    path,
                    target,
                    format!("dependency cycle: {chain} -> {path}"),
                ));
            }
            if stack.len() >= max_depth {
                return Err(RouterError::construction_failed(
                    path,
                    target,
                    format!("service dependencies nested deeper than {max_depth}"),
                ));
            }
            stack.push(path.to_string());
            Ok(Self)
        })
    }
}

impl Drop for ResolutionGuard {
    fn drop(&mut self) {
        RESOLVING.with_borrow_mut(|stack| {
            stack.pop();
        });
    }
}
