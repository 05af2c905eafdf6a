//! Record to row translation
//!
//! Builds the wire-level mutations and keys for a record under its table
//! schema, and rebuilds records from rows coming back. All schema-driven
//! coercion happens in [`crate::codec`]; this module decides which fields
//! participate and in what role.

use crate::codec;
use crate::error::{Result, StoreError};
use crate::record::Record;
use crate::remote::client::{RowDeleteChange, RowPutChange, RowUpdateChange};
use crate::remote::types::{Column, Condition, Direction, PrimaryKey, PrimaryKeyValue, Row};
use crate::schema::{validate_name, TableSchema};

/// Which end of a range scan a boundary key describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

// ============================================================================
// Keys
// ============================================================================

fn key_components(
    schema: &TableSchema,
    record: &Record,
    allow_auto: bool,
) -> Result<PrimaryKey> {
    let mut columns = Vec::new();
    for field in schema.key_fields() {
        match record.get(&field.name) {
            Some(value) => columns.push((field.name.clone(), codec::encode_key(value, field)?)),
            None if allow_auto && field.auto_increment => {
                columns.push((field.name.clone(), PrimaryKeyValue::AutoIncrement));
            }
            None => {
                return Err(StoreError::config(format!(
                    "primary key field '{}' missing on table '{}'",
                    field.name, schema.name
                )));
            }
        }
    }
    Ok(PrimaryKey::new(columns))
}

/// Full primary key of a record. Every key component must be present; an
/// unassigned auto-increment key is an error here because point reads and
/// deletes need a concrete key.
pub fn primary_key(schema: &TableSchema, record: &Record) -> Result<PrimaryKey> {
    key_components(schema, record, false)
}

/// Range-scan boundary key. Key components present on the record are used as
/// given; absent components become the open sentinel for that end of the scan
/// in the given direction.
pub fn boundary_key(
    schema: &TableSchema,
    record: &Record,
    bound: Bound,
    direction: Direction,
) -> Result<PrimaryKey> {
    let sentinel = match (bound, direction) {
        (Bound::Start, Direction::Forward) | (Bound::End, Direction::Backward) => {
            PrimaryKeyValue::InfMin
        }
        (Bound::Start, Direction::Backward) | (Bound::End, Direction::Forward) => {
            PrimaryKeyValue::InfMax
        }
    };
    let mut columns = Vec::new();
    for field in schema.key_fields() {
        match record.get(&field.name) {
            Some(value) => columns.push((field.name.clone(), codec::encode_key(value, field)?)),
            None => columns.push((field.name.clone(), sentinel.clone())),
        }
    }
    Ok(PrimaryKey::new(columns))
}

// ============================================================================
// Mutations
// ============================================================================

fn data_columns(schema: &TableSchema, record: &Record) -> Result<Vec<Column>> {
    let mut columns = Vec::new();
    for field in &schema.fields {
        if field.primary_key || !field.writable {
            continue;
        }
        if let Some(value) = record.get(&field.name) {
            if let Some(cell) = codec::encode_column(value, field)? {
                columns.push(Column::new(field.name.clone(), cell));
            }
        }
    }
    for (name, cell) in record.extras() {
        if !schema.extensible {
            return Err(StoreError::config(format!(
                "table '{}' does not accept dynamic columns",
                schema.name
            )));
        }
        validate_name(name)?;
        if schema.field(name).is_some() {
            tracing::warn!(
                table = %schema.name,
                column = %name,
                "dynamic column shadows a declared field, ignoring"
            );
            continue;
        }
        columns.push(Column::new(name, cell.clone()));
    }
    Ok(columns)
}

/// Build a full-row put for a record. An absent auto-increment key asks the
/// store to assign one.
pub fn put_change(
    schema: &TableSchema,
    record: &Record,
    condition: Condition,
) -> Result<RowPutChange> {
    Ok(RowPutChange {
        table: schema.name.clone(),
        primary_key: key_components(schema, record, true)?,
        columns: data_columns(schema, record)?,
        condition,
    })
}

/// Build a sparse update for a record.
///
/// Present writable fields become puts. With `delete_null` set, writable
/// non-key fields absent from the record become column deletes; otherwise
/// absent fields are left untouched. Dynamic extras are always puts.
pub fn update_change(
    schema: &TableSchema,
    record: &Record,
    delete_null: bool,
    condition: Condition,
) -> Result<RowUpdateChange> {
    let puts = data_columns(schema, record)?;
    let mut deletes = Vec::new();
    if delete_null {
        for field in &schema.fields {
            if field.primary_key || !field.writable {
                continue;
            }
            if record.get(&field.name).is_none() {
                deletes.push(field.name.clone());
            }
        }
    }
    Ok(RowUpdateChange {
        table: schema.name.clone(),
        primary_key: primary_key(schema, record)?,
        puts,
        deletes,
        condition,
    })
}

/// Build a row delete keyed by the record's primary key.
pub fn delete_change(
    schema: &TableSchema,
    record: &Record,
    condition: Condition,
) -> Result<RowDeleteChange> {
    Ok(RowDeleteChange {
        table: schema.name.clone(),
        primary_key: primary_key(schema, record)?,
        condition,
    })
}

// ============================================================================
// Rows back to records
// ============================================================================

/// Rebuild a record from a stored row.
///
/// Undecodable cells null their field and never fail the row. Columns with no
/// descriptor land in the record's extras on extensible tables and are
/// dropped otherwise. Write-only fields are skipped.
pub fn build_record(schema: &TableSchema, row: &Row) -> Record {
    let mut record = Record::new();
    for (name, key_value) in row.primary_key.columns() {
        let Some(value) = codec::decode_key(key_value) else {
            continue;
        };
        match schema.field(name) {
            Some(field) => {
                if field.readable {
                    record.set(name.clone(), value);
                }
            }
            None => {
                if schema.extensible {
                    record.set_extra_cell(name.clone(), codec::infer_cell(&value));
                } else {
                    tracing::warn!(
                        table = %schema.name,
                        column = %name,
                        "dropping key column with no descriptor"
                    );
                }
            }
        }
    }
    for column in &row.columns {
        match schema.field(&column.name) {
            Some(field) => {
                if !field.readable {
                    continue;
                }
                if let Some(value) = codec::decode_column(&column.value, field) {
                    record.set(field.name.clone(), value);
                }
            }
            None => {
                if schema.extensible {
                    record.set_extra_cell(column.name.clone(), column.value.clone());
                } else {
                    tracing::warn!(
                        table = %schema.name,
                        column = %column.name,
                        "dropping column with no descriptor"
                    );
                }
            }
        }
    }
    record
}
