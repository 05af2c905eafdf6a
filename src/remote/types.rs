//! Row, key, and condition types exchanged with the remote store

use serde::{Deserialize, Serialize};

use crate::value::CellValue;

// ============================================================================
// Primary keys
// ============================================================================

/// A single primary-key component value.
///
/// `InfMin`/`InfMax` are the open range-scan boundary sentinels;
/// `AutoIncrement` asks the store to assign the key on insert. The variant
/// order gives the sentinels their natural comparison extremes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimaryKeyValue {
    /// Negative-infinity boundary sentinel
    InfMin,
    Integer(i64),
    String(String),
    Binary(Vec<u8>),
    /// "Assign on insert" sentinel for auto-increment keys
    AutoIncrement,
    /// Positive-infinity boundary sentinel
    InfMax,
}

impl PrimaryKeyValue {
    /// Whether this is one of the boundary/assignment sentinels rather than a
    /// concrete value.
    pub fn is_sentinel(&self) -> bool {
        matches!(
            self,
            PrimaryKeyValue::InfMin | PrimaryKeyValue::InfMax | PrimaryKeyValue::AutoIncrement
        )
    }
}

/// An ordered sequence of named primary-key components.
///
/// The order is schema-determined and never rearranged by this layer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PrimaryKey {
    columns: Vec<(String, PrimaryKeyValue)>,
}

impl PrimaryKey {
    pub fn new(columns: Vec<(String, PrimaryKeyValue)>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[(String, PrimaryKeyValue)] {
        &self.columns
    }

    pub fn get(&self, name: &str) -> Option<&PrimaryKeyValue> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ============================================================================
// Rows
// ============================================================================

/// A named cell within a row.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub value: CellValue,
}

impl Column {
    pub fn new(name: impl Into<String>, value: CellValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A row as returned by the remote store.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub primary_key: PrimaryKey,
    pub columns: Vec<Column>,
}

impl Row {
    pub fn new(primary_key: PrimaryKey, columns: Vec<Column>) -> Self {
        Self {
            primary_key,
            columns,
        }
    }

    /// Latest cell stored under the given column name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

// ============================================================================
// Conditions
// ============================================================================

/// Row-existence expectation checked server-side before a mutation applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowExistence {
    #[default]
    Ignore,
    ExpectExist,
    ExpectNotExist,
}

/// Optimistic-concurrency predicate attached to a mutation.
///
/// The optional column condition is an opaque payload forwarded to the server
/// unmodified; this layer neither builds nor inspects it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Condition {
    pub row_existence: RowExistence,
    pub column_condition: Option<serde_json::Value>,
}

impl Condition {
    pub fn ignore() -> Self {
        Self::default()
    }

    pub fn expect_exist() -> Self {
        Self {
            row_existence: RowExistence::ExpectExist,
            column_condition: None,
        }
    }

    pub fn expect_not_exist() -> Self {
        Self {
            row_existence: RowExistence::ExpectNotExist,
            column_condition: None,
        }
    }

    /// Attach an opaque column predicate.
    pub fn with_column_condition(mut self, condition: serde_json::Value) -> Self {
        self.column_condition = Some(condition);
        self
    }
}

// ============================================================================
// Scan direction and table metadata
// ============================================================================

/// Range-scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Wire-level primary-key column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryKeyType {
    Integer,
    String,
    Binary,
}

/// One primary-key column in a table's key schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMeta {
    pub name: String,
    pub key_type: PrimaryKeyType,
    #[serde(default)]
    pub auto_increment: bool,
}

/// Table definition sent on create and returned on describe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMeta {
    pub name: String,
    pub keys: Vec<KeyMeta>,
}

/// Server-side view of an existing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescription {
    pub meta: TableMeta,
}

/// Capacity units consumed by an operation, as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CapacityUnit {
    pub read: i64,
    pub write: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // PrimaryKeyValue Ordering Tests
    // =========================================================================

    #[test]
    fn test_sentinel_ordering() {
        let min = PrimaryKeyValue::InfMin;
        let max = PrimaryKeyValue::InfMax;
        let seven = PrimaryKeyValue::Integer(7);
        assert!(min < seven);
        assert!(seven < max);
        assert!(min < max);
    }

    #[test]
    fn test_integer_key_ordering() {
        assert!(PrimaryKeyValue::Integer(1) < PrimaryKeyValue::Integer(2));
        assert!(
            PrimaryKeyValue::String("a".to_string()) < PrimaryKeyValue::String("b".to_string())
        );
    }

    #[test]
    fn test_is_sentinel() {
        assert!(PrimaryKeyValue::InfMin.is_sentinel());
        assert!(PrimaryKeyValue::InfMax.is_sentinel());
        assert!(PrimaryKeyValue::AutoIncrement.is_sentinel());
        assert!(!PrimaryKeyValue::Integer(0).is_sentinel());
    }

    // =========================================================================
    // PrimaryKey Tests
    // =========================================================================

    #[test]
    fn test_primary_key_preserves_order() {
        let key = PrimaryKey::new(vec![
            ("b".to_string(), PrimaryKeyValue::Integer(1)),
            ("a".to_string(), PrimaryKeyValue::Integer(2)),
        ]);
        assert_eq!(key.columns()[0].0, "b");
        assert_eq!(key.columns()[1].0, "a");
        assert_eq!(key.get("a"), Some(&PrimaryKeyValue::Integer(2)));
        assert_eq!(key.get("c"), None);
        assert_eq!(key.len(), 2);
    }

    // =========================================================================
    // Row and Condition Tests
    // =========================================================================

    #[test]
    fn test_row_column_lookup() {
        let row = Row::new(
            PrimaryKey::new(vec![("id".to_string(), PrimaryKeyValue::Integer(1))]),
            vec![Column::new("name", crate::value::CellValue::String("a".to_string()))],
        );
        assert!(row.column("name").is_some());
        assert!(row.column("missing").is_none());
    }

    #[test]
    fn test_condition_constructors() {
        assert_eq!(Condition::ignore().row_existence, RowExistence::Ignore);
        assert_eq!(
            Condition::expect_exist().row_existence,
            RowExistence::ExpectExist
        );
        assert_eq!(
            Condition::expect_not_exist().row_existence,
            RowExistence::ExpectNotExist
        );

        let cond = Condition::ignore()
            .with_column_condition(serde_json::json!({"field": "v", "op": "=", "value": 1}));
        assert!(cond.column_condition.is_some());
    }
}
