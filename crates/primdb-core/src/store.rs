//! Record store: typed CRUD over one table's row collection.
//!
//! Row collections are loaned in by the caller for the length of one
//! operation and handed back (or mutated in place) for persistence. The
//! store itself never touches the disk. Selects go through the
//! [`ResultCache`]; every write calls the cache's write hook for its table.

use crate::cache::{CachePolicy, CacheStats, Fingerprint, ResultCache};
use crate::error::{Error, Result};
use crate::query::{Assignments, FilterClause};
use crate::row::{Row, ID_COLUMN};
use crate::schema::Schema;
use crate::value::{coerce, Value};
use std::fmt;
use tracing::debug;

/// Outcome of a successful insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inserted {
    /// Table the row went into
    pub table: String,
    /// ID assigned to the new row
    pub id: i64,
}

impl fmt::Display for Inserted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Record with ID={} added to table \"{}\".",
            self.id, self.table
        )
    }
}

/// Next free ID: one past the current maximum, or 1 for an empty table.
///
/// Fails with `Error::InvalidInput` once the maximum is `i64::MAX`.
pub fn next_id(rows: &[Row]) -> Result<i64> {
    rows.iter()
        .filter_map(Row::id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| Error::InvalidInput("ID space exhausted".to_string()))
}

/// Typed CRUD engine.
#[derive(Debug, Default)]
pub struct RecordStore {
    cache: ResultCache,
}

impl RecordStore {
    /// Creates a store whose select cache follows `policy`.
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            cache: ResultCache::new(policy),
        }
    }

    /// Coerces `raw_values` against the table's columns, assigns the next
    /// ID and appends the row.
    pub fn insert<S: AsRef<str>>(
        &mut self,
        schema: &Schema,
        table: &str,
        rows: &mut Vec<Row>,
        raw_values: &[S],
    ) -> Result<Inserted> {
        let table_schema = schema
            .get(table)
            .ok_or_else(|| Error::TableNotFound(table.to_string()))?;
        let columns = table_schema.user_columns();

        if raw_values.len() != columns.len() {
            return Err(Error::ArityMismatch {
                expected: columns.len(),
                found: raw_values.len(),
            });
        }

        let id = next_id(rows)?;
        let mut row = Row::new();
        row.insert(ID_COLUMN, Value::Integer(id));
        for (column, raw) in columns.iter().zip(raw_values) {
            let raw = raw.as_ref();
            let value = coerce(raw, column.data_type).map_err(|_| Error::TypeMismatch {
                value: raw.to_string(),
                column: Some(column.name.clone()),
                expected: column.data_type,
            })?;
            row.insert(column.name.clone(), value);
        }

        rows.push(row);
        self.cache.on_write(table);
        debug!(table, id, "inserted row");
        Ok(Inserted {
            table: table.to_string(),
            id,
        })
    }

    /// Rows matching `filter` in stored order; all rows when there is no
    /// filter. Answered from the cache when possible.
    pub fn select(&mut self, table: &str, rows: &[Row], filter: Option<&FilterClause>) -> Vec<Row> {
        let fingerprint = Fingerprint::new(rows.len(), filter);
        self.cache.get(table, fingerprint, || scan(rows, filter))
    }

    /// Applies `assignments` to every matching row and returns how many
    /// rows matched. Assignments to columns a row lacks are skipped.
    ///
    /// `ID` is assigned like any other column, so IDs are only unique as
    /// long as no update rewrites them. A non-integer `ID` is ignored when
    /// the next ID is chosen.
    pub fn update(
        &mut self,
        table: &str,
        rows: &mut [Row],
        assignments: &Assignments,
        filter: &FilterClause,
    ) -> usize {
        let mut updated = 0;
        for row in rows.iter_mut().filter(|row| filter.matches(row)) {
            assignments.apply(row);
            updated += 1;
        }
        self.cache.on_write(table);
        debug!(table, updated, "updated rows");
        updated
    }

    /// Returns the rows that do not match `filter`.
    pub fn delete(&mut self, table: &str, rows: Vec<Row>, filter: &FilterClause) -> Vec<Row> {
        let before = rows.len();
        let remaining: Vec<Row> = rows.into_iter().filter(|row| !filter.matches(row)).collect();
        self.cache.on_write(table);
        debug!(table, deleted = before - remaining.len(), "deleted rows");
        remaining
    }

    /// Describes a table's columns and row count.
    pub fn info(&self, schema: &Schema, table: &str, rows: &[Row]) -> Result<String> {
        let table_schema = schema
            .get(table)
            .ok_or_else(|| Error::TableNotFound(table.to_string()))?;
        Ok(format!(
            "Table: {}\nColumns: {}\nRecord count: {}",
            table,
            table_schema.describe_columns(),
            rows.len()
        ))
    }

    /// Write hook for changes made outside the row operations, such as
    /// creating or dropping the table itself.
    pub fn table_changed(&mut self, table: &str) {
        self.cache.invalidate(table);
    }

    /// Select cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// The select cache policy.
    pub fn cache_policy(&self) -> CachePolicy {
        self.cache.policy()
    }
}

fn scan(rows: &[Row], filter: Option<&FilterClause>) -> Vec<Row> {
    match filter {
        None => rows.to_vec(),
        Some(filter) => rows.iter().filter(|row| filter.matches(row)).cloned().collect(),
    }
}
