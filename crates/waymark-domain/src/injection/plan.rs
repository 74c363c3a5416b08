//! Injector plans
//!
//! An [`InjectorPlan`] is the generated dispatch table for one target type:
//! one binding per declared field, each carrying its [`FieldShape`]. The
//! plan is validated as a whole when it is built; a target with any
//! rejected field gets no injector at all.
//!
//! Application is two-phase. Every binding computes its value first, and
//! only when all of them succeeded are the values written, so a failing
//! field never leaves the target half-injected.

use std::any::{Any, TypeId};
use std::marker::PhantomData;

use serde::Serialize;

use super::field::{ExtraField, ExtractError, Extracted, InjectionContext};
use super::shape::FieldShape;
use crate::error::{Result, RouterError};
use crate::ports::ExtraInjector;
use crate::value_objects::RoutePath;

type Apply<T> = Box<dyn FnOnce(&mut T) + Send>;

/// Declared field of an injection target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Rust field name
    pub field: &'static str,
    /// Parameter name (or service path) read for this field
    pub key: &'static str,
    pub shape: FieldShape,
}

trait ErasedBinding<T>: Send + Sync {
    fn spec(&self) -> &FieldSpec;

    fn compute(&self, cx: &InjectionContext<'_>) -> std::result::Result<Option<Apply<T>>, ExtractError>;
}

struct Binding<T, F, M> {
    spec: FieldSpec,
    access: fn(&mut T) -> &mut F,
    _marker: PhantomData<fn() -> M>,
}

impl<T, F, M> ErasedBinding<T> for Binding<T, F, M>
where
    T: 'static,
    F: ExtraField<M>,
    M: 'static,
{
    fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    fn compute(&self, cx: &InjectionContext<'_>) -> std::result::Result<Option<Apply<T>>, ExtractError> {
        match F::extract(self.spec.key, cx)? {
            Extracted::Keep => Ok(None),
            Extracted::Set(value) => {
                let access = self.access;
                let apply: Apply<T> = Box::new(move |target: &mut T| *access(target) = value);
                Ok(Some(apply))
            }
        }
    }
}

/// Builder collecting field bindings for `T`
pub struct InjectorPlanBuilder<T> {
    target: &'static str,
    bindings: Vec<Box<dyn ErasedBinding<T>>>,
}

impl<T: Send + Sync + 'static> InjectorPlanBuilder<T> {
    /// Declare a field; `key` overrides the parameter name
    pub fn field<F, M>(
        mut self,
        field: &'static str,
        key: Option<&'static str>,
        access: fn(&mut T) -> &mut F,
    ) -> Self
    where
        F: ExtraField<M>,
        M: 'static,
    {
        self.bindings.push(Box::new(Binding::<T, F, M> {
            spec: FieldSpec {
                field,
                key: key.unwrap_or(field),
                shape: F::SHAPE,
            },
            access,
            _marker: PhantomData,
        }));
        self
    }

    /// Validate every declared field and produce the plan
    pub fn build(self) -> Result<InjectorPlan<T>> {
        for binding in &self.bindings {
            let spec = binding.spec();
            spec.shape
                .check()
                .map_err(|detail| RouterError::unsupported_extra(self.target, spec.field, detail))?;
            if spec.shape == FieldShape::Service && RoutePath::parse(spec.key).is_err() {
                return Err(RouterError::unsupported_extra(
                    self.target,
                    spec.field,
                    format!("service reference '{}' is not a route path", spec.key),
                ));
            }
        }
        Ok(InjectorPlan {
            target: self.target,
            bindings: self.bindings,
        })
    }
}

/// Validated dispatch table for one target type
pub struct InjectorPlan<T> {
    target: &'static str,
    bindings: Vec<Box<dyn ErasedBinding<T>>>,
}

impl<T: Send + Sync + 'static> InjectorPlan<T> {
    pub fn builder(target: &'static str) -> InjectorPlanBuilder<T> {
        InjectorPlanBuilder {
            target,
            bindings: Vec::new(),
        }
    }

    /// Fill the declared fields of `target` from `cx`
    pub fn apply(&self, target: &mut T, cx: &InjectionContext<'_>) -> Result<()> {
        let mut staged = Vec::with_capacity(self.bindings.len());
        for binding in &self.bindings {
            match binding.compute(cx) {
                Ok(Some(apply)) => staged.push(apply),
                Ok(None) => {}
                Err(ExtractError::Conversion(detail)) => {
                    return Err(RouterError::unsupported_extra(
                        self.target,
                        binding.spec().field,
                        detail,
                    ));
                }
                Err(ExtractError::Resolution(err)) => return Err(err),
            }
        }
        for apply in staged {
            apply(target);
        }
        Ok(())
    }
}

impl<T: Send + Sync + 'static> ExtraInjector for InjectorPlan<T> {
    fn target_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn target_name(&self) -> &str {
        self.target
    }

    fn fields(&self) -> Vec<FieldSpec> {
        self.bindings.iter().map(|binding| *binding.spec()).collect()
    }

    fn inject(&self, target: &mut dyn Any, cx: &InjectionContext<'_>) -> Result<()> {
        let Some(target) = target.downcast_mut::<T>() else {
            return Err(RouterError::unsupported_extra(
                self.target,
                "*",
                "injector applied to an instance of another type",
            ));
        };
        self.apply(target, cx)
    }
}
