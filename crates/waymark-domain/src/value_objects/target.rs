//! Resolved targets

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::route::{AnyTarget, RouteDescriptor, RouteKind, SharedService, contract_of};

/// The live instance behind a resolution
pub enum Instance {
    /// Freshly constructed, owned by the caller
    Screen(AnyTarget),
    /// Process-wide singleton published under its contract
    Service(SharedService),
}

/// Result of resolving a path: the descriptor plus its live instance
pub struct Target {
    descriptor: Arc<RouteDescriptor>,
    instance: Instance,
}

impl Target {
    pub fn screen(descriptor: Arc<RouteDescriptor>, instance: AnyTarget) -> Self {
        Self {
            descriptor,
            instance: Instance::Screen(instance),
        }
    }

    pub fn service(descriptor: Arc<RouteDescriptor>, instance: SharedService) -> Self {
        Self {
            descriptor,
            instance: Instance::Service(instance),
        }
    }

    pub fn descriptor(&self) -> &Arc<RouteDescriptor> {
        &self.descriptor
    }

    pub fn kind(&self) -> RouteKind {
        self.descriptor.kind()
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// True when the concrete type behind this target is `T`
    pub fn is<T: 'static>(&self) -> bool {
        match &self.instance {
            Instance::Screen(screen) => screen.is::<T>(),
            Instance::Service(_) => self.descriptor.target().is::<T>(),
        }
    }

    /// Borrow a screen as its concrete type
    pub fn screen_ref<T: 'static>(&self) -> Option<&T> {
        match &self.instance {
            Instance::Screen(screen) => screen.downcast_ref::<T>(),
            Instance::Service(_) => None,
        }
    }

    /// Take ownership of a screen as its concrete type
    ///
    /// Gives the target back unchanged when it is a service or not a `T`.
    pub fn into_screen<T: 'static>(self) -> Result<Box<T>, Self> {
        let Self {
            descriptor,
            instance,
        } = self;
        match instance {
            Instance::Screen(screen) => screen.downcast::<T>().map_err(|screen| Self {
                descriptor,
                instance: Instance::Screen(screen),
            }),
            service @ Instance::Service(_) => Err(Self {
                descriptor,
                instance: service,
            }),
        }
    }

    /// The service under contract `C`
    pub fn service_as<C: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<C>> {
        match &self.instance {
            Instance::Service(shared) => contract_of::<C>(shared),
            Instance::Screen(_) => None,
        }
    }

    /// The erased service handle
    pub fn shared(&self) -> Option<&SharedService> {
        match &self.instance {
            Instance::Service(shared) => Some(shared),
            Instance::Screen(_) => None,
        }
    }

    /// True when both targets are the same service singleton
    pub fn same_instance(&self, other: &Target) -> bool {
        match (&self.instance, &other.instance) {
            (Instance::Service(a), Instance::Service(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("path", &self.descriptor.path().as_str())
            .field("kind", &self.descriptor.kind())
            .field("target", &self.descriptor.target().type_name())
            .finish()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let any: &dyn Any = match self {
            Self::Screen(screen) => screen.as_ref(),
            Self::Service(shared) => shared.as_ref(),
        };
        f.debug_tuple(match self {
            Self::Screen(_) => "Screen",
            Self::Service(_) => "Service",
        })
        .field(&any.type_id())
        .finish()
    }
}
