//! # Primitive Types
//!
//! Defines [`PrimitiveType`], the 11 names accepted by the `type` schema
//! form, and the runtime check each one applies to an instance value.
//!
//! Integer types accept any JSON number with a zero fractional part inside
//! the type's inclusive range, so `3.0` is a valid `uint8`. Float types
//! accept any number. `timestamp` accepts strings that parse as RFC 3339.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::MalformedSchema;
use crate::temporal;

/// The primitive types of the `type` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    /// JSON `true` or `false`.
    Boolean,
    /// Any JSON number.
    Float32,
    /// Any JSON number.
    Float64,
    /// Integer in [-128, 127].
    Int8,
    /// Integer in [0, 255].
    Uint8,
    /// Integer in [-32768, 32767].
    Int16,
    /// Integer in [0, 65535].
    Uint16,
    /// Integer in [-2147483648, 2147483647].
    Int32,
    /// Integer in [0, 4294967295].
    Uint32,
    /// Any JSON string.
    String,
    /// A JSON string holding an RFC 3339 timestamp.
    Timestamp,
}

/// Total number of primitive types.
pub const PRIMITIVE_TYPE_COUNT: usize = 11;

impl PrimitiveType {
    /// Returns all primitive types in documentation order.
    pub fn all() -> &'static [PrimitiveType] {
        &[
            Self::Boolean,
            Self::Float32,
            Self::Float64,
            Self::Int8,
            Self::Uint8,
            Self::Int16,
            Self::Uint16,
            Self::Int32,
            Self::Uint32,
            Self::String,
            Self::Timestamp,
        ]
    }

    /// Returns the name used for this type in schemas.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Int16 => "int16",
            Self::Uint16 => "uint16",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::String => "string",
            Self::Timestamp => "timestamp",
        }
    }

    /// Inclusive bounds for the integer types, `None` for the others.
    pub fn integer_range(&self) -> Option<(i64, i64)> {
        match self {
            Self::Int8 => Some((i8::MIN.into(), i8::MAX.into())),
            Self::Uint8 => Some((u8::MIN.into(), u8::MAX.into())),
            Self::Int16 => Some((i16::MIN.into(), i16::MAX.into())),
            Self::Uint16 => Some((u16::MIN.into(), u16::MAX.into())),
            Self::Int32 => Some((i32::MIN.into(), i32::MAX.into())),
            Self::Uint32 => Some((u32::MIN.into(), u32::MAX.into())),
            _ => None,
        }
    }

    /// Returns true if `instance` has the runtime shape this type names.
    pub fn accepts(&self, instance: &Value) -> bool {
        match self {
            Self::Boolean => instance.is_boolean(),
            Self::Float32 | Self::Float64 => instance.is_number(),
            Self::String => instance.is_string(),
            Self::Timestamp => instance.as_str().is_some_and(temporal::is_rfc3339),
            Self::Int8
            | Self::Uint8
            | Self::Int16
            | Self::Uint16
            | Self::Int32
            | Self::Uint32 => match (instance.as_f64(), self.integer_range()) {
                (Some(n), Some((min, max))) => {
                    n.fract() == 0.0 && n >= min as f64 && n <= max as f64
                }
                _ => false,
            },
        }
    }
}

impl std::fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimitiveType {
    type Err = MalformedSchema;

    /// Parse a primitive type from its schema name.
    ///
    /// The returned error has an empty `path`; schema construction
    /// replaces it with the location of the offending node.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| MalformedSchema::UnknownType {
                path: String::new(),
                value: s.to_string(),
            })
    }
}
