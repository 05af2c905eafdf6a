//! The store client trait and its request/response shapes
//!
//! One method per remote operation, each a single synchronous
//! request/response exchange. Implementations own connection pooling, retry,
//! and timeout policy; this layer deliberately has none of the three.

use crate::error::RemoteError;
use crate::remote::types::{
    CapacityUnit, Column, Condition, Direction, PrimaryKey, Row, TableDescription, TableMeta,
};

// ============================================================================
// Row mutations
// ============================================================================

/// Full-row replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct RowPutChange {
    pub table: String,
    pub primary_key: PrimaryKey,
    pub columns: Vec<Column>,
    pub condition: Condition,
}

/// Sparse merge: put the listed cells, delete the listed column names.
#[derive(Debug, Clone, PartialEq)]
pub struct RowUpdateChange {
    pub table: String,
    pub primary_key: PrimaryKey,
    pub puts: Vec<Column>,
    pub deletes: Vec<String>,
    pub condition: Condition,
}

/// Row deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDeleteChange {
    pub table: String,
    pub primary_key: PrimaryKey,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PutRowResponse {
    pub consumed: CapacityUnit,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateRowResponse {
    pub consumed: CapacityUnit,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteRowResponse {
    pub consumed: CapacityUnit,
}

// ============================================================================
// Reads
// ============================================================================

/// Point read of a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleRowQuery {
    pub table: String,
    pub primary_key: PrimaryKey,
    /// Empty means all columns
    pub columns_to_get: Vec<String>,
    pub max_versions: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetRowResponse {
    pub row: Option<Row>,
    pub consumed: CapacityUnit,
}

/// Batched point reads against one table.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiRowQuery {
    pub table: String,
    pub primary_keys: Vec<PrimaryKey>,
    pub columns_to_get: Vec<String>,
    pub max_versions: u32,
}

/// Batched read reply; failures are per-row, keyed by primary key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchGetResponse {
    pub rows: Vec<Row>,
    pub failed: Vec<(PrimaryKey, RemoteError)>,
}

/// Range scan over primary keys, start inclusive, end exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery {
    pub table: String,
    pub start: PrimaryKey,
    pub end: PrimaryKey,
    pub direction: Direction,
    /// None means server default page size
    pub limit: Option<i32>,
    pub columns_to_get: Vec<String>,
    pub max_versions: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeResponse {
    pub rows: Vec<Row>,
    /// Absent when the scan is exhausted
    pub next_start: Option<PrimaryKey>,
}

// ============================================================================
// Batch writes
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum WriteChange {
    Put(RowPutChange),
    Update(RowUpdateChange),
}

impl WriteChange {
    pub fn primary_key(&self) -> &PrimaryKey {
        match self {
            WriteChange::Put(change) => &change.primary_key,
            WriteChange::Update(change) => &change.primary_key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchWriteRequest {
    pub changes: Vec<WriteChange>,
}

/// Per-row outcome of a batch write.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteResult {
    pub primary_key: PrimaryKey,
    pub error: Option<RemoteError>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchWriteResponse {
    pub results: Vec<WriteResult>,
}

// ============================================================================
// Search
// ============================================================================

/// Search-index query. The query body and sort are opaque payloads in the
/// server's search DSL, forwarded unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub table: String,
    pub index: String,
    pub query: serde_json::Value,
    pub offset: i32,
    pub limit: i32,
    pub get_total_count: bool,
    pub sort: Option<serde_json::Value>,
    /// None means return all columns
    pub columns_to_get: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResponse {
    pub rows: Vec<Row>,
    /// Approximate match count; meaningful only when requested
    pub total_count: i64,
    /// False when the server answered from an incomplete index
    pub all_success: bool,
}

// ============================================================================
// Client trait
// ============================================================================

/// Synchronous client for the remote wide-column store.
///
/// Treated as an opaque collaborator: every facade operation maps to exactly
/// one call on this trait.
pub trait StoreClient {
    fn put_row(&self, change: RowPutChange) -> Result<PutRowResponse, RemoteError>;

    fn update_row(&self, change: RowUpdateChange) -> Result<UpdateRowResponse, RemoteError>;

    fn delete_row(&self, change: RowDeleteChange) -> Result<DeleteRowResponse, RemoteError>;

    fn get_row(&self, query: SingleRowQuery) -> Result<GetRowResponse, RemoteError>;

    fn batch_write_row(
        &self,
        request: BatchWriteRequest,
    ) -> Result<BatchWriteResponse, RemoteError>;

    fn batch_get_row(&self, query: MultiRowQuery) -> Result<BatchGetResponse, RemoteError>;

    fn get_range(&self, query: RangeQuery) -> Result<RangeResponse, RemoteError>;

    fn search(&self, request: SearchRequest) -> Result<SearchResponse, RemoteError>;

    fn create_table(&self, meta: TableMeta) -> Result<(), RemoteError>;

    fn describe_table(&self, table: &str) -> Result<TableDescription, RemoteError>;

    fn delete_table(&self, table: &str) -> Result<(), RemoteError>;
}
