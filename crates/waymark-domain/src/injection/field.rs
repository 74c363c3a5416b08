//! Type-directed extraction
//!
//! [`ExtraField`] is implemented once per supported field shape. The marker
//! parameter `M` keeps the impls disjoint: for any concrete field type
//! exactly one marker applies, so it is inferred at the declaration site.
//! A field type with no impl does not compile, which is how unsupported
//! shapes are rejected before an injector can exist.

use std::any::type_name;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::shape::{ElementKind, FieldShape, ScalarKind};
use crate::error::RouterError;
use crate::ports::ServiceLocator;
use crate::value_objects::{ExtraValue, Extras, contract_of};

/// Structured value type that crosses the injection boundary by copy
pub trait Transferable: Serialize + DeserializeOwned + Send + Sync + 'static {}

/// Shape markers
pub mod marker {
    pub struct Scalar;
    pub struct Array;
    pub struct TransferableArray;
    pub struct Str;
    pub struct Structured;
    pub struct Service;
    pub struct Sequence;
    pub struct TransferableSequence;
}

/// What extraction decided for one field
pub enum Extracted<T> {
    /// Leave the field as it is
    Keep,
    /// Overwrite the field
    Set(T),
}

/// Why a field could not be extracted
#[derive(Debug)]
pub enum ExtractError {
    /// The value is present but does not convert to the declared type
    Conversion(String),
    /// Resolving a service dependency failed
    Resolution(RouterError),
}

/// Everything a field extraction can read
pub struct InjectionContext<'a> {
    extras: &'a Extras,
    locator: &'a dyn ServiceLocator,
}

impl<'a> InjectionContext<'a> {
    pub fn new(extras: &'a Extras, locator: &'a dyn ServiceLocator) -> Self {
        Self { extras, locator }
    }

    pub fn extras(&self) -> &'a Extras {
        self.extras
    }

    pub fn locator(&self) -> &'a dyn ServiceLocator {
        self.locator
    }
}

/// A field type the injector knows how to fill
pub trait ExtraField<M>: Sized + Send + 'static {
    /// Dispatch category of this field type
    const SHAPE: FieldShape;

    /// Read the value stored under `key`
    fn extract(key: &str, cx: &InjectionContext<'_>) -> Result<Extracted<Self>, ExtractError>;
}

macro_rules! scalar_field {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl ExtraField<marker::Scalar> for $ty {
                const SHAPE: FieldShape = FieldShape::Scalar(ScalarKind::$kind);

                fn extract(
                    key: &str,
                    cx: &InjectionContext<'_>,
                ) -> Result<Extracted<Self>, ExtractError> {
                    Ok(match cx.extras().get(key) {
                        Some(ExtraValue::$kind(value)) => Extracted::Set(*value),
                        _ => Extracted::Keep,
                    })
                }
            }
        )*
    };
}

scalar_field!(
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
);

/// Element type of primitive/string arrays and sequences
pub trait ArrayElement: Clone + Send + Sync + 'static {
    const KIND: ElementKind;

    /// Borrow the array stored in `value`, if it has this element type
    fn array(value: &ExtraValue) -> Option<&[Self]>;
}

/// Element type a list field may declare
///
/// Only strings and ints have list carriers, so a list of any other
/// primitive has no [`ExtraField`] impl and fails to compile.
pub trait SequenceElement: ArrayElement {
    /// Borrow the list stored in `value`, if it has this element type
    fn list(value: &ExtraValue) -> Option<&[Self]>;
}

macro_rules! array_element {
    ($($ty:ty => $kind:ident, $variant:ident $(, $list:ident)?);* $(;)?) => {
        $(
            impl ArrayElement for $ty {
                const KIND: ElementKind = ElementKind::$kind;

                fn array(value: &ExtraValue) -> Option<&[Self]> {
                    match value {
                        ExtraValue::$variant(items) => Some(&items[..]),
                        _ => None,
                    }
                }
            }

            $(
                impl SequenceElement for $ty {
                    fn list(value: &ExtraValue) -> Option<&[Self]> {
                        match value {
                            ExtraValue::$list(items) => Some(&items[..]),
                            _ => None,
                        }
                    }
                }
            )?
        )*
    };
}

array_element!(
    bool => Bool, BoolArray;
    i8 => Byte, ByteArray;
    i16 => Short, ShortArray;
    i32 => Int, IntArray, IntList;
    i64 => Long, LongArray;
    f32 => Float, FloatArray;
    f64 => Double, DoubleArray;
    char => Char, CharArray;
    String => Str, StrArray, StrList;
);

impl<E: ArrayElement> ExtraField<marker::Array> for Option<Box<[E]>> {
    const SHAPE: FieldShape = FieldShape::Array(E::KIND);

    fn extract(key: &str, cx: &InjectionContext<'_>) -> Result<Extracted<Self>, ExtractError> {
        Ok(Extracted::Set(
            cx.extras().get(key).and_then(E::array).map(Box::from),
        ))
    }
}

impl<E: SequenceElement> ExtraField<marker::Sequence> for Option<Vec<E>> {
    const SHAPE: FieldShape = FieldShape::Sequence(E::KIND);

    fn extract(key: &str, cx: &InjectionContext<'_>) -> Result<Extracted<Self>, ExtractError> {
        Ok(Extracted::Set(
            cx.extras().get(key).and_then(E::list).map(<[E]>::to_vec),
        ))
    }
}

impl ExtraField<marker::Str> for Option<String> {
    const SHAPE: FieldShape = FieldShape::Str;

    fn extract(key: &str, cx: &InjectionContext<'_>) -> Result<Extracted<Self>, ExtractError> {
        Ok(Extracted::Set(match cx.extras().get(key) {
            Some(ExtraValue::Str(value)) => Some(value.clone()),
            _ => None,
        }))
    }
}

impl<T: Transferable> ExtraField<marker::Structured> for Option<T> {
    const SHAPE: FieldShape = FieldShape::Transferable;

    fn extract(key: &str, cx: &InjectionContext<'_>) -> Result<Extracted<Self>, ExtractError> {
        match cx.extras().get(key) {
            Some(ExtraValue::Transferable(value)) => convert::<T>(value)
                .map(|value| Extracted::Set(Some(value)))
                .map_err(ExtractError::Conversion),
            _ => Ok(Extracted::Set(None)),
        }
    }
}

impl<T: Transferable> ExtraField<marker::TransferableArray> for Option<Box<[T]>> {
    const SHAPE: FieldShape = FieldShape::TransferableArray;

    fn extract(key: &str, cx: &InjectionContext<'_>) -> Result<Extracted<Self>, ExtractError> {
        match cx.extras().get(key) {
            Some(ExtraValue::TransferableArray(items)) => convert_all::<T>(items)
                .map(|items| Extracted::Set(Some(items.into_boxed_slice())))
                .map_err(ExtractError::Conversion),
            _ => Ok(Extracted::Set(None)),
        }
    }
}

impl<T: Transferable> ExtraField<marker::TransferableSequence> for Option<Vec<T>> {
    const SHAPE: FieldShape = FieldShape::Sequence(ElementKind::Transferable);

    fn extract(key: &str, cx: &InjectionContext<'_>) -> Result<Extracted<Self>, ExtractError> {
        match cx.extras().get(key) {
            Some(ExtraValue::TransferableList(items)) => convert_all::<T>(items)
                .map(|items| Extracted::Set(Some(items)))
                .map_err(ExtractError::Conversion),
            _ => Ok(Extracted::Set(None)),
        }
    }
}

impl<C: ?Sized + Send + Sync + 'static> ExtraField<marker::Service> for Option<Arc<C>> {
    const SHAPE: FieldShape = FieldShape::Service;

    fn extract(key: &str, cx: &InjectionContext<'_>) -> Result<Extracted<Self>, ExtractError> {
        let shared = cx
            .locator()
            .locate_service(key)
            .map_err(ExtractError::Resolution)?;
        contract_of::<C>(&shared)
            .map(|service| Extracted::Set(Some(service)))
            .ok_or_else(|| {
                ExtractError::Conversion(format!(
                    "service at '{key}' is not published as {}",
                    type_name::<C>()
                ))
            })
    }
}

fn convert<T: Transferable>(value: &Value) -> Result<T, String> {
    T::deserialize(value).map_err(|e| format!("value is not a {}: {e}", type_name::<T>()))
}

fn convert_all<T: Transferable>(items: &[Value]) -> Result<Vec<T>, String> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::deserialize(item)
                .map_err(|e| format!("element {index} is not a {}: {e}", type_name::<T>()))
        })
        .collect()
}
