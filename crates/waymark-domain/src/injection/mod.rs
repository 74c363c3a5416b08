//! Parameter injection
//!
//! Field shapes, type-directed extraction and the per-target dispatch
//! table built from them.

pub mod field;
pub mod plan;
pub mod shape;

pub use field::{
    ArrayElement, ExtraField, ExtractError, Extracted, InjectionContext, SequenceElement,
    Transferable, marker,
};
pub use plan::{FieldSpec, InjectorPlan, InjectorPlanBuilder};
pub use shape::{ElementKind, FieldShape, ScalarKind};
