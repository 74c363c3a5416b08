//! Injector registry
//!
//! Type-handle keyed index of injector fragments. Each plan is generated
//! when its fragment is indexed, so a rejected field shape surfaces during
//! discovery. A rejected plan stays in the index and every later resolution
//! of its target reports the rejection.

use std::any::TypeId;
use std::collections::HashMap;

use tracing::{error, warn};
use waymark_domain::{ExtraInjector, Result, RouterError};

type BuildFn = fn() -> Result<Box<dyn ExtraInjector>>;

/// Why a plan could not be generated
#[derive(Debug, Clone)]
struct Rejection {
    target: String,
    field: String,
    detail: String,
}

impl Rejection {
    fn from_error(origin: &str, error: RouterError) -> Self {
        match error {
            RouterError::UnsupportedExtraType {
                target,
                field,
                detail,
            } => Self {
                target,
                field,
                detail,
            },
            other => Self {
                target: origin.to_string(),
                field: "*".to_string(),
                detail: other.to_string(),
            },
        }
    }

    fn to_error(&self) -> RouterError {
        RouterError::unsupported_extra(&self.target, &self.field, &self.detail)
    }
}

/// Outcome of indexing one injector fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indexed {
    /// The plan generated and serves its target type
    Ready,
    /// The plan was rejected; carries the rendered reason
    Rejected(String),
    /// Another fragment already serves the target type
    Duplicate,
}

struct InjectorSlot {
    origin: String,
    plan: std::result::Result<Box<dyn ExtraInjector>, Rejection>,
}

/// TypeId → injector plan
#[derive(Default)]
pub struct InjectorRegistry {
    slots: HashMap<TypeId, InjectorSlot>,
}

impl InjectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a fragment, generating its plan
    pub fn index(&mut self, origin: &str, target: TypeId, build: BuildFn) -> Indexed {
        if let Some(existing) = self.slots.get(&target) {
            error!(
                kept = existing.origin.as_str(),
                rejected = origin,
                "Duplicate injector fragment for the same target type"
            );
            return Indexed::Duplicate;
        }
        let plan = build().map_err(|e| Rejection::from_error(origin, e));
        let outcome = match &plan {
            Ok(_) => Indexed::Ready,
            Err(rejection) => {
                warn!(
                    origin,
                    field = rejection.field.as_str(),
                    detail = rejection.detail.as_str(),
                    "Injector generation rejected target"
                );
                Indexed::Rejected(rejection.to_error().to_string())
            }
        };
        self.slots.insert(
            target,
            InjectorSlot {
                origin: origin.to_string(),
                plan,
            },
        );
        outcome
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of indexed plans that generated successfully
    pub fn ready(&self) -> usize {
        self.slots.values().filter(|slot| slot.plan.is_ok()).count()
    }

    pub fn contains(&self, target: TypeId) -> bool {
        self.slots.contains_key(&target)
    }

    /// The injector for `target`
    ///
    /// `Ok(None)` when the type declares no injectable fields.
    pub fn get(&self, target: TypeId) -> Result<Option<&dyn ExtraInjector>> {
        match self.slots.get(&target).map(|slot| &slot.plan) {
            None => Ok(None),
            Some(Ok(injector)) => Ok(Some(injector.as_ref())),
            Some(Err(rejection)) => Err(rejection.to_error()),
        }
    }
}
