//! Caller-supplied parameters
//!
//! [`Extras`] is the named, typed parameter bag handed to `resolve`.
//! The injector extracts from it by name and variant; a value stored under
//! the right name but with the wrong variant is treated as absent.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, RouterError};
use crate::injection::Transferable;

/// One typed parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ExtraValue {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    Str(String),
    BoolArray(Box<[bool]>),
    ByteArray(Box<[i8]>),
    ShortArray(Box<[i16]>),
    IntArray(Box<[i32]>),
    LongArray(Box<[i64]>),
    FloatArray(Box<[f32]>),
    DoubleArray(Box<[f64]>),
    CharArray(Box<[char]>),
    StrArray(Box<[String]>),
    IntList(Vec<i32>),
    StrList(Vec<String>),
    /// Structured payload of a transferable type
    Transferable(Value),
    TransferableArray(Vec<Value>),
    TransferableList(Vec<Value>),
}

impl ExtraValue {
    /// Encode a transferable value
    pub fn transferable<T: Transferable>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Self::Transferable)
            .map_err(|e| RouterError::configuration_with_source("transferable encoding failed", e))
    }

    /// Encode a slice of transferable values as an array
    pub fn transferable_array<T: Transferable>(values: &[T]) -> Result<Self> {
        encode_all(values).map(Self::TransferableArray)
    }

    /// Encode a slice of transferable values as a list
    pub fn transferable_list<T: Transferable>(values: &[T]) -> Result<Self> {
        encode_all(values).map(Self::TransferableList)
    }

    /// Variant name, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Byte(_) => "byte",
            Self::Short(_) => "short",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Char(_) => "char",
            Self::Str(_) => "string",
            Self::BoolArray(_) => "bool[]",
            Self::ByteArray(_) => "byte[]",
            Self::ShortArray(_) => "short[]",
            Self::IntArray(_) => "int[]",
            Self::LongArray(_) => "long[]",
            Self::FloatArray(_) => "float[]",
            Self::DoubleArray(_) => "double[]",
            Self::CharArray(_) => "char[]",
            Self::StrArray(_) => "string[]",
            Self::IntList(_) => "list<int>",
            Self::StrList(_) => "list<string>",
            Self::Transferable(_) => "transferable",
            Self::TransferableArray(_) => "transferable[]",
            Self::TransferableList(_) => "list<transferable>",
        }
    }
}

fn encode_all<T: Transferable>(values: &[T]) -> Result<Vec<Value>> {
    values
        .iter()
        .map(|value| {
            serde_json::to_value(value).map_err(|e| {
                RouterError::configuration_with_source("transferable encoding failed", e)
            })
        })
        .collect()
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ExtraValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

impl_from!(
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    String => Str,
    &str => Str,
    Box<[bool]> => BoolArray,
    Box<[i8]> => ByteArray,
    Box<[i16]> => ShortArray,
    Box<[i32]> => IntArray,
    Box<[i64]> => LongArray,
    Box<[f32]> => FloatArray,
    Box<[f64]> => DoubleArray,
    Box<[char]> => CharArray,
    Box<[String]> => StrArray,
    Vec<i32> => IntList,
    Vec<String> => StrList,
);

/// Named parameters for one resolution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Extras {
    values: HashMap<String, ExtraValue>,
}

impl Extras {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ExtraValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, returning the previous one under the same name
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ExtraValue>,
    ) -> Option<ExtraValue> {
        self.values.insert(key.into(), value.into())
    }

    /// Insert a transferable value
    pub fn insert_transferable<T: Transferable>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<()> {
        self.values
            .insert(key.into(), ExtraValue::transferable(value)?);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&ExtraValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ExtraValue> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtraValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<ExtraValue>> FromIterator<(K, V)> for Extras {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut extras = Self::new();
        for (key, value) in iter {
            extras.insert(key, value);
        }
        extras
    }
}

impl IntoIterator for Extras {
    type Item = (String, ExtraValue);
    type IntoIter = std::collections::hash_map::IntoIter<String, ExtraValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<K: Into<String>, V: Into<ExtraValue>> Extend<(K, V)> for Extras {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
