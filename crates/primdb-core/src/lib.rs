//! # PrimDB Core
//!
//! Core types and the typed CRUD engine for PrimDB.
//!
//! ## ⚠️ Internal Implementation Detail
//!
//! Users should depend on the main `primdb` crate, which wires these pieces
//! to persistence and exposes the command interface.
//!
//! ## Layout
//!
//! - [`value`]: typed values, strict and inferred coercion
//! - [`query`]: command parser, filter and assignment clauses
//! - [`schema`]: the schema registry
//! - [`store`]: insert/select/update/delete over a row collection
//! - [`cache`]: the select result cache
//! - [`storage`]: the persistence trait and an in-memory store

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod error;
pub mod query;
pub mod row;
pub mod schema;
pub mod security;
pub mod storage;
pub mod store;
pub mod value;

pub use cache::{CachePolicy, CacheStats, Fingerprint, ResultCache};
pub use error::{Error, Result};
pub use query::{Assignments, FilterClause, Parser, Statement};
pub use row::{Row, ID_COLUMN};
pub use schema::{ColumnDef, Schema, SchemaRegistry, TableList, TableSchema};
pub use storage::{MemoryStore, TableStore};
pub use store::{Inserted, RecordStore};
pub use value::{DataType, Value};
