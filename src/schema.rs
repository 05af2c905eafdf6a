//! Table and field descriptors plus the schema registry
//!
//! Descriptors are built once, up front, through an explicit registration
//! step. After `SchemaRegistry` construction everything here is immutable and
//! safe to share across threads.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::compress::{Compressor, NoCompression};
use crate::error::{Result, StoreError};
use crate::value::ColumnType;

/// Validate a table, index, or column name.
///
/// Rules follow the remote store's identifier conventions: start with a
/// letter or underscore, then letters, digits, and underscores, at most 255
/// characters.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(StoreError::config("name cannot be blank"));
    }
    if name.len() > 255 {
        return Err(StoreError::config(format!(
            "name '{}...' exceeds 255 characters",
            &name[..32]
        )));
    }
    let re = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
    if !re.is_match(name) {
        return Err(StoreError::config(format!(
            "name '{}' is invalid: must start with a letter or underscore and \
             contain only letters, digits, and underscores",
            name
        )));
    }
    Ok(())
}

/// Convert a lowerCamelCase field name to the lower_snake_case stored name
/// used when no explicit column name is given.
pub fn stored_name(field_name: &str) -> String {
    let mut out = String::with_capacity(field_name.len() + 4);
    for ch in field_name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

// ============================================================================
// Field descriptors
// ============================================================================

/// Per-field mapping metadata.
///
/// Immutable once built. Defaults: not a primary key, not auto-increment,
/// readable and writable, declared type `None` (infer from the runtime
/// value), identity compression.
#[derive(Clone)]
pub struct FieldSchema {
    /// Stored column name
    pub name: String,
    /// Declared logical type
    pub column_type: ColumnType,
    /// Whether this field is a primary key component
    pub primary_key: bool,
    /// Whether the store assigns this key on insert when absent
    pub auto_increment: bool,
    /// Whether the field is populated on read
    pub readable: bool,
    /// Whether the field is sent on write
    pub writable: bool,
    /// Compression strategy applied on the binary path
    pub compressor: Arc<dyn Compressor>,
}

impl FieldSchema {
    /// Create a field descriptor from a field name. The stored column name is
    /// the lower_snake_case conversion of the given name.
    pub fn new(field_name: impl AsRef<str>, column_type: ColumnType) -> Self {
        Self {
            name: stored_name(field_name.as_ref()),
            column_type,
            primary_key: false,
            auto_increment: false,
            readable: true,
            writable: true,
            compressor: Arc::new(NoCompression),
        }
    }

    /// Override the stored column name.
    pub fn stored_as(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Mark this field as a primary key component.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark this key as assigned by the store on insert.
    pub fn auto_increment(mut self) -> Self {
        self.primary_key = true;
        self.auto_increment = true;
        self
    }

    /// Exclude the field from writes.
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Exclude the field from reads.
    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }

    /// Set the compression strategy.
    pub fn compress(mut self, compressor: impl Compressor + 'static) -> Self {
        self.compressor = Arc::new(compressor);
        self
    }
}

impl fmt::Debug for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSchema")
            .field("name", &self.name)
            .field("column_type", &self.column_type)
            .field("primary_key", &self.primary_key)
            .field("auto_increment", &self.auto_increment)
            .field("readable", &self.readable)
            .field("writable", &self.writable)
            .field("compressor", &self.compressor.name())
            .finish()
    }
}

// ============================================================================
// Table descriptors
// ============================================================================

/// Per-table mapping metadata: table name, optional search index, ordered
/// field descriptors, and whether the table accepts dynamic extra columns.
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub name: String,
    pub index: Option<String>,
    pub fields: Vec<FieldSchema>,
    pub extensible: bool,
}

impl TableSchema {
    /// Start building a schema for the given table name.
    pub fn builder(table_name: impl Into<String>) -> TableSchemaBuilder {
        TableSchemaBuilder {
            name: table_name.into(),
            index: None,
            fields: Vec::new(),
            extensible: false,
        }
    }

    /// Primary key components in declared order.
    pub fn key_fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter().filter(|f| f.primary_key)
    }

    /// Look up a field descriptor by stored column name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Search index name, or a configuration error if absent/blank.
    pub fn index_name(&self) -> Result<&str> {
        match self.index.as_deref() {
            Some(index) if !index.trim().is_empty() => Ok(index),
            _ => Err(StoreError::config(format!(
                "table '{}' has no search index configured",
                self.name
            ))),
        }
    }
}

/// Builder for [`TableSchema`]
#[derive(Debug)]
pub struct TableSchemaBuilder {
    name: String,
    index: Option<String>,
    fields: Vec<FieldSchema>,
    extensible: bool,
}

impl TableSchemaBuilder {
    /// Set the search index name.
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Add a field descriptor. When two fields resolve to the same stored
    /// name, the first one added wins and later ones are ignored.
    pub fn field(mut self, field: FieldSchema) -> Self {
        if !self.fields.iter().any(|f| f.name == field.name) {
            self.fields.push(field);
        }
        self
    }

    /// Allow dynamic extra columns on records of this table.
    pub fn extensible(mut self) -> Self {
        self.extensible = true;
        self
    }

    /// Validate and build the schema.
    pub fn build(self) -> Result<TableSchema> {
        validate_name(&self.name)?;
        if let Some(index) = &self.index {
            validate_name(index)?;
        }
        for field in &self.fields {
            validate_name(&field.name)?;
        }
        if !self.fields.iter().any(|f| f.primary_key) {
            return Err(StoreError::config(format!(
                "table '{}' declares no primary key field",
                self.name
            )));
        }
        Ok(TableSchema {
            name: self.name,
            index: self.index,
            fields: self.fields,
            extensible: self.extensible,
        })
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Eagerly built map from table name to schema.
///
/// Built once at startup; read-only afterwards, so shared references are safe
/// across threads without locking.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<TableSchema>>,
}

impl SchemaRegistry {
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder {
            schemas: HashMap::new(),
        }
    }

    /// Resolve a schema, or fail with a configuration error.
    pub fn get(&self, table: &str) -> Result<&Arc<TableSchema>> {
        self.schemas.get(table).ok_or_else(|| {
            StoreError::config(format!("no schema registered for table '{}'", table))
        })
    }

    pub fn contains(&self, table: &str) -> bool {
        self.schemas.contains_key(table)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Builder for [`SchemaRegistry`]
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    schemas: HashMap<String, Arc<TableSchema>>,
}

impl SchemaRegistryBuilder {
    /// Register a schema under its table name. Duplicate registration is a
    /// configuration error.
    pub fn register(mut self, schema: TableSchema) -> Result<Self> {
        if self.schemas.contains_key(&schema.name) {
            return Err(StoreError::config(format!(
                "table '{}' registered twice",
                schema.name
            )));
        }
        self.schemas.insert(schema.name.clone(), Arc::new(schema));
        Ok(self)
    }

    pub fn build(self) -> SchemaRegistry {
        SchemaRegistry {
            schemas: self.schemas,
        }
    }
}
