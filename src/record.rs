//! Dynamic records
//!
//! A [`Record`] is the unit the facade reads and writes: a map of schema
//! fields keyed by stored column name, plus an explicit side-map of dynamic
//! extra columns for tables that allow them. Typed getters narrow values on
//! the way out; string values parse into the requested primitive, anything
//! else mismatched returns `None` rather than guessing.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::codec;
use crate::error::Result;
use crate::value::{CellValue, FieldValue};

/// A single row's worth of application data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    columns: BTreeMap<String, FieldValue>,
    extras: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Schema fields
    // =========================================================================

    /// Set a field by stored column name. Overwrites any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> &mut Self {
        self.columns.insert(name.into(), value.into());
        self
    }

    /// Remove a field. On an update with delete-on-null enabled, an absent
    /// writable field becomes a column delete.
    pub fn unset(&mut self, name: &str) -> Option<FieldValue> {
        self.columns.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.columns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    // -------------------------------------------------------------------------
    // Typed field getters
    // -------------------------------------------------------------------------

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            FieldValue::Integer(v) => Some(*v),
            FieldValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn get_i32(&self, name: &str) -> Option<i32> {
        self.get_i64(name).and_then(|v| i32::try_from(v).ok())
    }

    pub fn get_i16(&self, name: &str) -> Option<i16> {
        self.get_i64(name).and_then(|v| i16::try_from(v).ok())
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn get_f32(&self, name: &str) -> Option<f32> {
        self.get_f64(name).map(|v| v as f32)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            FieldValue::Boolean(v) => Some(*v),
            FieldValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn get_bytes(&self, name: &str) -> Option<&[u8]> {
        match self.get(name)? {
            FieldValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Deserialize a structured or JSON-string field into a concrete type.
    ///
    /// `Ok(None)` means the field is absent or not a JSON-bearing kind; a
    /// present but malformed payload is an error.
    pub fn get_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.get(name) {
            Some(FieldValue::Structured(v)) => Ok(Some(serde_json::from_value(v.clone())?)),
            Some(FieldValue::String(s)) => Ok(Some(serde_json::from_str(s)?)),
            _ => Ok(None),
        }
    }

    // =========================================================================
    // Dynamic extras
    // =========================================================================

    /// Add a dynamic extra column. The wire type is inferred from the value
    /// kind; no declared-type coercion or compression applies.
    pub fn set_extra(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> &mut Self {
        self.extras.insert(name.into(), codec::infer_cell(&value.into()));
        self
    }

    pub(crate) fn set_extra_cell(&mut self, name: impl Into<String>, cell: CellValue) {
        self.extras.insert(name.into(), cell);
    }

    pub fn extra(&self, name: &str) -> Option<&CellValue> {
        self.extras.get(name)
    }

    pub fn extras(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.extras.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn has_extras(&self) -> bool {
        !self.extras.is_empty()
    }

    // -------------------------------------------------------------------------
    // Typed extra getters
    // -------------------------------------------------------------------------

    pub fn extra_i64(&self, name: &str) -> Option<i64> {
        match self.extra(name)? {
            CellValue::Integer(v) => Some(*v),
            CellValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn extra_i32(&self, name: &str) -> Option<i32> {
        self.extra_i64(name).and_then(|v| i32::try_from(v).ok())
    }

    pub fn extra_i16(&self, name: &str) -> Option<i16> {
        self.extra_i64(name).and_then(|v| i16::try_from(v).ok())
    }

    pub fn extra_f64(&self, name: &str) -> Option<f64> {
        match self.extra(name)? {
            CellValue::Double(v) => Some(*v),
            CellValue::Integer(v) => Some(*v as f64),
            CellValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn extra_f32(&self, name: &str) -> Option<f32> {
        self.extra_f64(name).map(|v| v as f32)
    }

    pub fn extra_bool(&self, name: &str) -> Option<bool> {
        match self.extra(name)? {
            CellValue::Boolean(v) => Some(*v),
            CellValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn extra_str(&self, name: &str) -> Option<&str> {
        self.extra(name)?.as_string()
    }

    pub fn extra_bytes(&self, name: &str) -> Option<&[u8]> {
        self.extra(name)?.as_binary()
    }

    /// Deserialize a string-typed extra as JSON.
    pub fn extra_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.extra_str(name) {
            Some(s) => Ok(Some(serde_json::from_str(s)?)),
            None => Ok(None),
        }
    }
}
