//! Remote store boundary
//!
//! The request/response vocabulary of the wide-column store and the client
//! trait this layer dispatches through. Nothing here opens sockets or parses
//! wire bytes; transport, pooling, and retries live inside the client
//! implementation.

pub mod client;
pub mod types;

pub use client::{
    BatchGetResponse, BatchWriteRequest, BatchWriteResponse, DeleteRowResponse, GetRowResponse,
    MultiRowQuery, PutRowResponse, RangeQuery, RangeResponse, RowDeleteChange, RowPutChange,
    RowUpdateChange, SearchRequest, SearchResponse, SingleRowQuery, StoreClient,
    UpdateRowResponse, WriteChange, WriteResult,
};
pub use types::{
    CapacityUnit, Column, Condition, Direction, KeyMeta, PrimaryKey, PrimaryKeyType,
    PrimaryKeyValue, Row, RowExistence, TableDescription, TableMeta,
};
