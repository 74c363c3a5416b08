//! Injector fragment port

use std::any::{Any, TypeId};

use crate::error::Result;
use crate::injection::{FieldSpec, InjectionContext};

/// Generated per declaring type; copies parameters into a target's fields
pub trait ExtraInjector: Send + Sync {
    /// Type this injector fills
    fn target_type(&self) -> TypeId;

    fn target_name(&self) -> &str;

    /// Declared fields, in declaration order
    fn fields(&self) -> Vec<FieldSpec>;

    fn inject(&self, target: &mut dyn Any, cx: &InjectionContext<'_>) -> Result<()>;
}
