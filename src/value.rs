//! Core value types for widestore
//!
//! Includes the runtime value sum type, the wire-level cell value, and the
//! declared column type used on field descriptors.

use serde::{Deserialize, Serialize};

// ============================================================================
// Declared column types
// ============================================================================

/// Declared logical type of a field, as written on its descriptor.
///
/// `None` means "infer the wire type from the runtime value kind".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// UTF-8 string (maps to a STRING cell)
    String,

    /// 64-bit signed integer (maps to an INTEGER cell)
    Integer,

    /// Boolean (maps to a BOOLEAN cell)
    Boolean,

    /// 64-bit float (maps to a DOUBLE cell)
    Double,

    /// Byte array (maps to a BINARY cell)
    Binary,

    /// No declared type; the wire type follows the runtime value
    None,
}

// ============================================================================
// Runtime values
// ============================================================================

/// A runtime field value.
///
/// This is the closed set of value kinds the coercion engine accepts. Every
/// application value becomes exactly one of these before it is encoded, and
/// every stored cell decodes back into exactly one of them. Structured values
/// (lists, maps, nested objects) ride through JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Signed integer (all integral widths normalize to i64)
    Integer(i64),
    /// Floating point (f32 widens to f64)
    Float(f64),
    /// Boolean
    Boolean(bool),
    /// UTF-8 string
    String(String),
    /// Structured value, serialized as JSON when stored
    Structured(serde_json::Value),
}

impl FieldValue {
    /// Build a structured value from anything serde can serialize.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(FieldValue::Structured(serde_json::to_value(value)?))
    }

    /// Short human-readable kind name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Bytes(_) => "bytes",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::String(_) => "string",
            FieldValue::Structured(_) => "structured",
        }
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(value: Vec<u8>) -> Self {
        FieldValue::Bytes(value)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(value: &[u8]) -> Self {
        FieldValue::Bytes(value.to_vec())
    }
}

impl From<i16> for FieldValue {
    fn from(value: i16) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float(value as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        FieldValue::Structured(value)
    }
}

// ============================================================================
// Wire-level cells
// ============================================================================

/// A wire-level cell value, one of the five logical types the remote store
/// understands.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Binary(Vec<u8>),
    Integer(i64),
    Boolean(bool),
    Double(f64),
    String(String),
}

impl CellValue {
    /// Logical type of this cell. Never `ColumnType::None`.
    pub fn column_type(&self) -> ColumnType {
        match self {
            CellValue::Binary(_) => ColumnType::Binary,
            CellValue::Integer(_) => ColumnType::Integer,
            CellValue::Boolean(_) => ColumnType::Boolean,
            CellValue::Double(_) => ColumnType::Double,
            CellValue::String(_) => ColumnType::String,
        }
    }

    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            CellValue::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CellValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            CellValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }
}
