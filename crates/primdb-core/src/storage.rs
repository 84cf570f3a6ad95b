//! Persistence seam.
//!
//! The core never performs I/O itself. Callers load a table's rows and the
//! schema document through a [`TableStore`], run record-store operations on
//! them, and save the results back.

use crate::row::Row;
use crate::schema::Schema;
use std::collections::HashMap;

/// Blob store keyed by table name.
pub trait TableStore {
    /// Load a table's rows; a table never saved yields no rows
    fn load(&self, table: &str) -> crate::Result<Vec<Row>>;

    /// Replace a table's rows
    fn save(&mut self, table: &str, rows: &[Row]) -> crate::Result<()>;

    /// Load the schema document; a fresh store yields an empty schema
    fn load_metadata(&self) -> crate::Result<Schema>;

    /// Replace the schema document
    fn save_metadata(&mut self, schema: &Schema) -> crate::Result<()>;

    /// Forget a table's rows
    fn remove(&mut self, table: &str) -> crate::Result<()> {
        self.save(table, &[])
    }
}

/// In-memory store
///
/// Nothing survives the process. Useful for tests and scratch databases.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: HashMap<String, Vec<Row>>,
    schema: Schema,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TableStore for MemoryStore {
    fn load(&self, table: &str) -> crate::Result<Vec<Row>> {
        Ok(self.tables.get(table).cloned().unwrap_or_default())
    }

    fn save(&mut self, table: &str, rows: &[Row]) -> crate::Result<()> {
        self.tables.insert(table.to_string(), rows.to_vec());
        Ok(())
    }

    fn load_metadata(&self) -> crate::Result<Schema> {
        Ok(self.schema.clone())
    }

    fn save_metadata(&mut self, schema: &Schema) -> crate::Result<()> {
        self.schema = schema.clone();
        Ok(())
    }

    fn remove(&mut self, table: &str) -> crate::Result<()> {
        self.tables.remove(table);
        Ok(())
    }
}
