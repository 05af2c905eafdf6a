//! # widestore
//!
//! Schema-driven object mapping for wide-column NoSQL stores.
//!
//! widestore sits between application records and a remote wide-column
//! table store. Each table gets a [`TableSchema`] describing its fields:
//! stored column name, declared logical type, primary-key role, read/write
//! visibility, and an optional compression strategy for binary payloads.
//! The facade translates [`Record`]s to wire rows and back through a closed
//! coercion table, and dispatches every operation as exactly one call on a
//! pluggable [`StoreClient`].
//!
//! ## Features
//!
//! - **Declarative schemas**: field descriptors built once, validated at
//!   registration, immutable afterwards
//! - **Type coercion**: runtime values encode against the declared column
//!   type; illegal pairings fail fast, undecodable cells degrade to null
//!   instead of failing the row
//! - **Compression hooks**: per-field gzip, deflate, or snappy on the
//!   binary path
//! - **Dynamic columns**: extensible tables carry extra columns with
//!   inferred wire types alongside the declared fields
//! - **Full surface**: point and batch reads/writes, paged range scans with
//!   continuation keys, search-index queries, table lifecycle
//!
//! ## Quick Start
//!
//! ```
//! use widestore::{
//!     ColumnType, FieldSchema, Gzip, Record, SchemaRegistry, StoreConfig, TableSchema,
//! };
//!
//! # fn main() -> widestore::Result<()> {
//! // Describe a table once, up front.
//! let orders = TableSchema::builder("orders")
//!     .field(FieldSchema::new("id", ColumnType::Integer).primary_key())
//!     .field(FieldSchema::new("name", ColumnType::String))
//!     .field(FieldSchema::new("payload", ColumnType::Binary).compress(Gzip))
//!     .build()?;
//!
//! let registry = SchemaRegistry::builder().register(orders)?.build();
//!
//! let config = StoreConfig::builder()
//!     .endpoint("https://inst.region.ots.example.com")
//!     .instance("inst")
//!     .access_key_id("ak")
//!     .access_key_secret("sk")
//!     .build()?;
//!
//! // Records are plain maps of stored column name to value.
//! let mut order = Record::new();
//! order.set("id", 7i64);
//! order.set("name", "a");
//! order.set("payload", b"large blob".to_vec());
//! # let _ = (registry, config, order);
//! # Ok(())
//! # }
//! ```
//!
//! Wire the registry and config into a [`TableStore`] together with a
//! [`StoreClient`] implementation, then read and write records:
//! `store.put("orders", &order)?` stores the row with the payload
//! gzip-compressed, and `store.get("orders", &key)?` decodes it back.
//!
//! ## Architecture
//!
//! - [`value`]: runtime values, wire cells, declared column types
//! - [`schema`]: field/table descriptors and the schema registry
//! - [`codec`]: the coercion engine between the two value worlds
//! - [`compress`]: the compression strategies
//! - [`record`]: the dynamic record and its typed getters
//! - [`row`]: record-to-mutation and row-to-record translation
//! - [`query`]: record-oriented request/reply models
//! - [`remote`]: the client trait and wire vocabulary
//! - [`store`]: the facade tying it all together

pub mod codec;
pub mod compress;
pub mod config;
pub mod error;
pub mod query;
pub mod record;
pub mod remote;
pub mod row;
pub mod schema;
pub mod store;
pub mod value;

pub use compress::{Compressor, Deflate, Gzip, NoCompression, Snappy};
pub use config::{StoreConfig, StoreConfigBuilder};
pub use error::{RemoteError, Result, StoreError, RETRYABLE_ERROR_CODES};
pub use query::{
    BatchFailure, BatchGetQuery, BatchGetReply, BatchWriteReply, RangeGetQuery, RangeGetReply,
    SearchQuery, SearchReply,
};
pub use record::Record;
pub use remote::client::StoreClient;
pub use remote::types::{Condition, Direction, PrimaryKey, PrimaryKeyValue, RowExistence};
pub use schema::{FieldSchema, SchemaRegistry, TableSchema, TableSchemaBuilder};
pub use store::TableStore;
pub use value::{CellValue, ColumnType, FieldValue};
