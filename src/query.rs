//! Facade-level queries and replies
//!
//! These are the record-oriented counterparts of the wire shapes in
//! [`crate::remote`]: callers describe reads in terms of records and get
//! records back, never rows or cells.

use crate::error::RemoteError;
use crate::record::Record;
use crate::remote::types::Direction;

// ============================================================================
// Range scans
// ============================================================================

/// A primary-key range scan.
///
/// `start` and `end` carry key components only; absent components open that
/// end of the range. `limit` of zero means scan to exhaustion.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeGetQuery {
    pub start: Record,
    pub end: Record,
    pub direction: Direction,
    pub limit: i32,
    /// Empty means all columns
    pub columns_to_get: Vec<String>,
}

impl RangeGetQuery {
    pub fn new(start: Record, end: Record) -> Self {
        Self {
            start,
            end,
            direction: Direction::Forward,
            limit: 0,
            columns_to_get: Vec::new(),
        }
    }

    pub fn backward(mut self) -> Self {
        self.direction = Direction::Backward;
        self
    }

    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = limit;
        self
    }

    pub fn columns(mut self, columns: Vec<String>) -> Self {
        self.columns_to_get = columns;
        self
    }
}

/// Result of a range scan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeGetReply {
    pub records: Vec<Record>,
    /// Continuation key when the scan stopped at the limit; `None` when the
    /// range is exhausted.
    pub next_start: Option<Record>,
}

// ============================================================================
// Batch reads
// ============================================================================

/// Batched point reads. Each record supplies a full primary key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchGetQuery {
    pub keys: Vec<Record>,
    /// Empty means all columns
    pub columns_to_get: Vec<String>,
}

impl BatchGetQuery {
    pub fn new(keys: Vec<Record>) -> Self {
        Self {
            keys,
            columns_to_get: Vec::new(),
        }
    }

    pub fn columns(mut self, columns: Vec<String>) -> Self {
        self.columns_to_get = columns;
        self
    }
}

/// Per-key failure inside a batch operation.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    /// The key components of the row that failed
    pub key: Record,
    pub error: RemoteError,
}

/// Result of a batch read: found records plus per-key failures. Keys with no
/// stored row appear in neither list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchGetReply {
    pub records: Vec<Record>,
    pub failed: Vec<BatchFailure>,
}

impl BatchGetReply {
    pub fn is_all_success(&self) -> bool {
        self.failed.is_empty()
    }
}

// ============================================================================
// Batch writes
// ============================================================================

/// Result of a batch write: one failure entry per rejected row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchWriteReply {
    pub failed: Vec<BatchFailure>,
}

impl BatchWriteReply {
    pub fn is_all_success(&self) -> bool {
        self.failed.is_empty()
    }
}

// ============================================================================
// Search
// ============================================================================

/// A search-index query against a table's configured index.
///
/// The query body and sort are opaque payloads in the store's search DSL.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub query: serde_json::Value,
    pub offset: i32,
    pub limit: i32,
    pub get_total_count: bool,
    pub sort: Option<serde_json::Value>,
    /// None means all columns
    pub columns_to_get: Option<Vec<String>>,
}

impl SearchQuery {
    pub fn new(query: serde_json::Value) -> Self {
        Self {
            query,
            offset: 0,
            limit: 10,
            get_total_count: false,
            sort: None,
            columns_to_get: None,
        }
    }

    pub fn offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_total_count(mut self) -> Self {
        self.get_total_count = true;
        self
    }

    pub fn sort(mut self, sort: serde_json::Value) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn columns(mut self, columns: Vec<String>) -> Self {
        self.columns_to_get = Some(columns);
        self
    }
}

/// Result of a search query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchReply {
    pub records: Vec<Record>,
    /// Total match count; meaningful only when the query asked for it
    pub total_count: i64,
    /// False when the index answered from incomplete data
    pub all_success: bool,
}
