//! Field shape categories
//!
//! Every injectable field maps to exactly one [`FieldShape`]. The shape is a
//! compile-time constant of the field's type, so the dispatch table of an
//! injector is fixed when the injector is generated.

use std::fmt;

use serde::Serialize;

/// Primitive scalar kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
}

/// Element kinds of arrays and sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Str,
    Transferable,
}

/// Field-shape category driving extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "shape", content = "element", rename_all = "snake_case")]
pub enum FieldShape {
    /// Primitive value; absent parameter keeps the current value
    Scalar(ScalarKind),
    /// Array of primitives or strings
    Array(ElementKind),
    /// Array of a transferable type, converted element by element
    TransferableArray,
    /// Direct string extraction
    Str,
    /// Direct structured extraction
    Transferable,
    /// Resolved through the router instead of read from parameters
    Service,
    /// List with a declared element type
    Sequence(ElementKind),
}

impl FieldShape {
    /// Reject shapes that have a Rust type but no injection rule
    pub fn check(&self) -> Result<(), String> {
        match self {
            Self::Sequence(ElementKind::Str | ElementKind::Int | ElementKind::Transferable) => {
                Ok(())
            }
            Self::Sequence(other) => Err(format!(
                "sequence of {other} is not injectable (supported elements: string, int, transferable)"
            )),
            Self::Array(ElementKind::Transferable) => {
                Err("transferable elements require the transferable array shape".to_string())
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Char => "char",
            Self::Str => "string",
            Self::Transferable => "transferable",
        };
        f.write_str(name)
    }
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "scalar<{kind:?}>"),
            Self::Array(kind) => write!(f, "array<{kind}>"),
            Self::TransferableArray => f.write_str("array<transferable>"),
            Self::Str => f.write_str("string"),
            Self::Transferable => f.write_str("transferable"),
            Self::Service => f.write_str("service"),
            Self::Sequence(kind) => write!(f, "sequence<{kind}>"),
        }
    }
}
