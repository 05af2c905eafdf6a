//! The table store facade
//!
//! One type ties the layer together: resolve the schema, build the wire
//! request through [`crate::row`], make exactly one client call per
//! operation (range scans page, but each page is one call), and decode the
//! response back into records.

use std::sync::Arc;

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::query::{
    BatchFailure, BatchGetQuery, BatchGetReply, BatchWriteReply, RangeGetQuery, RangeGetReply,
    SearchQuery, SearchReply,
};
use crate::record::Record;
use crate::remote::client::{
    BatchWriteRequest, MultiRowQuery, RangeQuery, SearchRequest, SingleRowQuery, StoreClient,
    WriteChange,
};
use crate::remote::types::{
    Condition, KeyMeta, PrimaryKey, PrimaryKeyType, Row, TableDescription, TableMeta,
};
use crate::row::{self, Bound};
use crate::schema::{SchemaRegistry, TableSchema};
use crate::value::ColumnType;

/// Schema-driven store facade over a [`StoreClient`].
///
/// Not `Clone`; share one instance behind an `Arc`.
pub struct TableStore<C: StoreClient> {
    client: C,
    registry: SchemaRegistry,
    config: StoreConfig,
}

impl<C: StoreClient> TableStore<C> {
    pub fn new(client: C, registry: SchemaRegistry, config: StoreConfig) -> Self {
        Self {
            client,
            registry,
            config,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn schema(&self, table: &str) -> Result<Arc<TableSchema>> {
        Ok(Arc::clone(self.registry.get(table)?))
    }

    // =========================================================================
    // Single-row operations
    // =========================================================================

    /// Write a full row, replacing any stored columns.
    pub fn put(&self, table: &str, record: &Record) -> Result<()> {
        self.put_with_condition(table, record, Condition::ignore())
    }

    /// Write a full row under an optimistic-lock condition, forwarded to the
    /// server unmodified.
    pub fn put_with_condition(
        &self,
        table: &str,
        record: &Record,
        condition: Condition,
    ) -> Result<()> {
        let schema = self.schema(table)?;
        let change = row::put_change(&schema, record, condition)?;
        tracing::debug!(table, "put row");
        self.client.put_row(change)?;
        Ok(())
    }

    /// Merge a sparse row. With `delete_null`, writable non-key fields absent
    /// from the record are deleted from the stored row.
    pub fn update(&self, table: &str, record: &Record, delete_null: bool) -> Result<()> {
        self.update_with_condition(table, record, delete_null, Condition::ignore())
    }

    /// Merge a sparse row under an optimistic-lock condition.
    pub fn update_with_condition(
        &self,
        table: &str,
        record: &Record,
        delete_null: bool,
        condition: Condition,
    ) -> Result<()> {
        let schema = self.schema(table)?;
        let change = row::update_change(&schema, record, delete_null, condition)?;
        tracing::debug!(table, delete_null, "update row");
        self.client.update_row(change)?;
        Ok(())
    }

    /// Delete the row keyed by the record's primary key.
    pub fn delete(&self, table: &str, record: &Record) -> Result<()> {
        self.delete_with_condition(table, record, Condition::ignore())
    }

    /// Delete a row under an optimistic-lock condition.
    pub fn delete_with_condition(
        &self,
        table: &str,
        record: &Record,
        condition: Condition,
    ) -> Result<()> {
        let schema = self.schema(table)?;
        let change = row::delete_change(&schema, record, condition)?;
        tracing::debug!(table, "delete row");
        self.client.delete_row(change)?;
        Ok(())
    }

    /// Point read. `Ok(None)` when no row is stored under the key.
    pub fn get(&self, table: &str, key: &Record) -> Result<Option<Record>> {
        let schema = self.schema(table)?;
        let query = SingleRowQuery {
            table: schema.name.clone(),
            primary_key: row::primary_key(&schema, key)?,
            columns_to_get: Vec::new(),
            max_versions: 1,
        };
        tracing::debug!(table, "get row");
        let response = self.client.get_row(query)?;
        Ok(response.row.map(|r| row::build_record(&schema, &r)))
    }

    // =========================================================================
    // Batch operations
    // =========================================================================

    /// Put many rows in one batch call. Per-row failures come back keyed by
    /// primary key; rows that fail to encode fail the whole call before
    /// anything is sent.
    pub fn batch_put(&self, table: &str, records: &[Record]) -> Result<BatchWriteReply> {
        let schema = self.schema(table)?;
        let changes = records
            .iter()
            .map(|record| {
                row::put_change(&schema, record, Condition::ignore()).map(WriteChange::Put)
            })
            .collect::<Result<Vec<_>>>()?;
        self.batch_write(&schema, changes)
    }

    /// Update many rows in one batch call.
    pub fn batch_update(
        &self,
        table: &str,
        records: &[Record],
        delete_null: bool,
    ) -> Result<BatchWriteReply> {
        let schema = self.schema(table)?;
        let changes = records
            .iter()
            .map(|record| {
                row::update_change(&schema, record, delete_null, Condition::ignore())
                    .map(WriteChange::Update)
            })
            .collect::<Result<Vec<_>>>()?;
        self.batch_write(&schema, changes)
    }

    fn batch_write(
        &self,
        schema: &TableSchema,
        changes: Vec<WriteChange>,
    ) -> Result<BatchWriteReply> {
        if changes.is_empty() {
            return Ok(BatchWriteReply::default());
        }
        tracing::debug!(table = %schema.name, rows = changes.len(), "batch write");
        let response = self.client.batch_write_row(BatchWriteRequest { changes })?;
        let failed = response
            .results
            .into_iter()
            .filter_map(|result| {
                result.error.map(|error| BatchFailure {
                    key: key_record(schema, &result.primary_key),
                    error,
                })
            })
            .collect();
        Ok(BatchWriteReply { failed })
    }

    /// Read many rows by key in one batch call. Keys with no stored row are
    /// simply absent from the reply.
    pub fn batch_get(&self, table: &str, query: BatchGetQuery) -> Result<BatchGetReply> {
        let schema = self.schema(table)?;
        if query.keys.is_empty() {
            return Ok(BatchGetReply::default());
        }
        let primary_keys = query
            .keys
            .iter()
            .map(|key| row::primary_key(&schema, key))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(table, rows = primary_keys.len(), "batch get");
        let response = self.client.batch_get_row(MultiRowQuery {
            table: schema.name.clone(),
            primary_keys,
            columns_to_get: query.columns_to_get,
            max_versions: 1,
        })?;
        Ok(BatchGetReply {
            records: response
                .rows
                .iter()
                .map(|r| row::build_record(&schema, r))
                .collect(),
            failed: response
                .failed
                .into_iter()
                .map(|(key, error)| BatchFailure {
                    key: key_record(&schema, &key),
                    error,
                })
                .collect(),
        })
    }

    // =========================================================================
    // Range scans
    // =========================================================================

    /// Scan a primary-key range, paging until the caller's limit is met or
    /// the range is exhausted.
    ///
    /// The first page is small and later pages grow to the configured cap, so
    /// short scans stay cheap. When the scan stops at the limit, the reply
    /// carries the continuation key to resume from.
    pub fn range_get(&self, table: &str, query: RangeGetQuery) -> Result<RangeGetReply> {
        let schema = self.schema(table)?;
        let mut start = row::boundary_key(&schema, &query.start, Bound::Start, query.direction)?;
        let end = row::boundary_key(&schema, &query.end, Bound::End, query.direction)?;

        let unbounded = query.limit <= 0;
        let mut remaining = if unbounded { i32::MAX } else { query.limit };
        let mut page = self.config.first_range_page.min(remaining);
        let mut records = Vec::new();

        loop {
            tracing::debug!(table, page, "range page");
            let response = self.client.get_range(RangeQuery {
                table: schema.name.clone(),
                start,
                end: end.clone(),
                direction: query.direction,
                limit: Some(page),
                columns_to_get: query.columns_to_get.clone(),
                max_versions: 1,
            })?;
            remaining -= response.rows.len() as i32;
            records.extend(response.rows.iter().map(|r| row::build_record(&schema, r)));

            match response.next_start {
                None => {
                    return Ok(RangeGetReply {
                        records,
                        next_start: None,
                    });
                }
                Some(next) if !unbounded && remaining <= 0 => {
                    return Ok(RangeGetReply {
                        records,
                        next_start: Some(key_record(&schema, &next)),
                    });
                }
                Some(next) => {
                    start = next;
                    page = self.config.max_range_page.min(remaining);
                }
            }
        }
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Query the table's search index. Fails with a configuration error when
    /// the schema declares no index.
    pub fn search(&self, table: &str, query: SearchQuery) -> Result<SearchReply> {
        let schema = self.schema(table)?;
        let index = schema.index_name()?.to_string();
        tracing::debug!(table, index = %index, "search");
        let response = self.client.search(SearchRequest {
            table: schema.name.clone(),
            index,
            query: query.query,
            offset: query.offset,
            limit: query.limit,
            get_total_count: query.get_total_count,
            sort: query.sort,
            columns_to_get: query.columns_to_get,
        })?;
        Ok(SearchReply {
            records: response
                .rows
                .iter()
                .map(|r| row::build_record(&schema, r))
                .collect(),
            total_count: response.total_count,
            all_success: response.all_success,
        })
    }

    // =========================================================================
    // Table lifecycle
    // =========================================================================

    /// Create the table from its registered schema. Primary-key fields must
    /// declare an explicit key-capable type.
    pub fn create_table(&self, table: &str) -> Result<()> {
        let schema = self.schema(table)?;
        let mut keys = Vec::new();
        for field in schema.key_fields() {
            let key_type = match field.column_type {
                ColumnType::Integer => PrimaryKeyType::Integer,
                ColumnType::String => PrimaryKeyType::String,
                ColumnType::Binary => PrimaryKeyType::Binary,
                other => {
                    return Err(StoreError::config(format!(
                        "primary key field '{}' needs an explicit key type, has {:?}",
                        field.name, other
                    )));
                }
            };
            keys.push(KeyMeta {
                name: field.name.clone(),
                key_type,
                auto_increment: field.auto_increment,
            });
        }
        tracing::debug!(table, "create table");
        self.client.create_table(TableMeta {
            name: schema.name.clone(),
            keys,
        })?;
        Ok(())
    }

    pub fn describe_table(&self, table: &str) -> Result<TableDescription> {
        let schema = self.schema(table)?;
        Ok(self.client.describe_table(&schema.name)?)
    }

    pub fn delete_table(&self, table: &str) -> Result<()> {
        let schema = self.schema(table)?;
        self.client.delete_table(&schema.name)?;
        Ok(())
    }
}

/// Rebuild a key-only record from a primary key, for continuation keys and
/// failure reporting.
fn key_record(schema: &TableSchema, key: &PrimaryKey) -> Record {
    row::build_record(schema, &Row::new(key.clone(), Vec::new()))
}
