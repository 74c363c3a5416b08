//! Route descriptors
//!
//! A [`RouteDescriptor`] is the immutable record of one registered target.
//! The concrete type is carried as a [`TargetType`] handle that knows how to
//! build a fresh instance with zero arguments.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::path::RoutePath;
use crate::error::Result;

/// A type-erased target instance, freshly constructed
pub type AnyTarget = Box<dyn Any + Send + Sync>;

/// A published service: an `Arc<C>` for the service contract `C`, erased
pub type SharedService = Arc<dyn Any + Send + Sync>;

type Constructor = dyn Fn() -> std::result::Result<AnyTarget, String> + Send + Sync;
type Publisher = dyn Fn(AnyTarget) -> std::result::Result<SharedService, String> + Send + Sync;

/// Kind of target a route points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// One-shot target, a fresh instance per resolution
    Screen,
    /// Long-lived singleton, cached by contract
    Service,
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Screen => f.pad("screen"),
            Self::Service => f.pad("service"),
        }
    }
}

/// Opaque handle to a concrete implementation type
#[derive(Clone)]
pub struct TargetType {
    type_id: TypeId,
    type_name: &'static str,
    construct: Arc<Constructor>,
}

impl TargetType {
    /// Handle for a type built through `Default`
    pub fn of<T: Default + Send + Sync + 'static>() -> Self {
        Self::with_ctor::<T>(|| Ok(T::default()))
    }

    /// Handle for a type with a fallible zero-argument constructor
    pub fn with_ctor<T: Send + Sync + 'static>(ctor: fn() -> std::result::Result<T, String>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            construct: Arc::new(move || ctor().map(|target| Box::new(target) as AnyTarget)),
        }
    }

    /// Build a fresh instance
    pub fn construct(&self) -> std::result::Result<AnyTarget, String> {
        (self.construct)()
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified type name
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type name without its module path
    pub fn simple_name(&self) -> &'static str {
        simple_type_name(self.type_name)
    }

    /// True when this handle refers to `T`
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl fmt::Debug for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetType")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// How a service instance is exposed under its contract
#[derive(Clone)]
pub struct ServiceBinding {
    contract_id: TypeId,
    contract_name: &'static str,
    publish: Arc<Publisher>,
}

impl ServiceBinding {
    /// Bind concrete service `S` under contract `C` (usually `dyn Trait`)
    pub fn new<S, C>(upcast: fn(Arc<S>) -> Arc<C>) -> Self
    where
        S: Send + Sync + 'static,
        C: ?Sized + Send + Sync + 'static,
    {
        Self {
            contract_id: TypeId::of::<C>(),
            contract_name: type_name::<C>(),
            publish: Arc::new(
                move |instance: AnyTarget| -> std::result::Result<SharedService, String> {
                    let concrete = instance
                        .downcast::<S>()
                        .map_err(|_| format!("instance is not a {}", type_name::<S>()))?;
                    let contract: Arc<C> = upcast(Arc::from(concrete));
                    Ok(Arc::new(contract) as SharedService)
                },
            ),
        }
    }

    /// Bind `S` under its own concrete type
    pub fn concrete<S: Send + Sync + 'static>() -> Self {
        Self::new::<S, S>(|service| service)
    }

    /// Wrap a constructed instance as its contract
    pub fn publish(&self, instance: AnyTarget) -> std::result::Result<SharedService, String> {
        (self.publish)(instance)
    }

    /// Service cache key
    pub fn contract_id(&self) -> TypeId {
        self.contract_id
    }

    pub fn contract_name(&self) -> &'static str {
        self.contract_name
    }
}

impl fmt::Debug for ServiceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceBinding")
            .field("contract", &self.contract_name)
            .finish_non_exhaustive()
    }
}

/// Recover the typed contract from a published service
pub fn contract_of<C: ?Sized + Send + Sync + 'static>(shared: &SharedService) -> Option<Arc<C>> {
    shared.downcast_ref::<Arc<C>>().cloned()
}

/// Immutable metadata for one registered target
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    path: RoutePath,
    group: String,
    target: TargetType,
    service: Option<ServiceBinding>,
}

impl RouteDescriptor {
    /// Describe a screen target
    pub fn screen(path: &str, target: TargetType) -> Result<Self> {
        let path = RoutePath::parse(path)?;
        Ok(Self {
            group: path.group().to_string(),
            path,
            target,
            service: None,
        })
    }

    /// Describe a service target exposed through `binding`
    pub fn service(path: &str, target: TargetType, binding: ServiceBinding) -> Result<Self> {
        let path = RoutePath::parse(path)?;
        Ok(Self {
            group: path.group().to_string(),
            path,
            target,
            service: Some(binding),
        })
    }

    pub fn path(&self) -> &RoutePath {
        &self.path
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn kind(&self) -> RouteKind {
        if self.service.is_some() {
            RouteKind::Service
        } else {
            RouteKind::Screen
        }
    }

    pub fn target(&self) -> &TargetType {
        &self.target
    }

    /// Contract binding, present for services only
    pub fn service_binding(&self) -> Option<&ServiceBinding> {
        self.service.as_ref()
    }
}

/// Serializable view of a descriptor for listings
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub path: String,
    pub group: String,
    pub kind: RouteKind,
    pub target: &'static str,
    pub contract: Option<&'static str>,
}

impl From<&RouteDescriptor> for RouteSummary {
    fn from(descriptor: &RouteDescriptor) -> Self {
        Self {
            path: descriptor.path().to_string(),
            group: descriptor.group().to_string(),
            kind: descriptor.kind(),
            target: descriptor.target().type_name(),
            contract: descriptor.service_binding().map(ServiceBinding::contract_name),
        }
    }
}

/// Strip the module path from a type name, keeping generic arguments intact
pub fn simple_type_name(full: &'static str) -> &'static str {
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
