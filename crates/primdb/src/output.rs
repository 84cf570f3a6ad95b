//! Command results and their text rendering.

use primdb_core::{Result, Row, TableList};
use std::fmt;

/// Rendered when a select matches nothing
pub const NO_RECORDS: &str = "No records found.";

/// Rendered when a destructive command is declined
pub const CANCELLED: &str = "Operation cancelled.";

/// Result of one executed command
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Informational message from create, drop, insert or info
    Message(String),
    /// Rows returned by a select
    Rows(Vec<Row>),
    /// Table names from list_tables
    Tables(TableList),
    /// Rows matched by an update
    Updated {
        /// Target table
        table: String,
        /// Number of matched rows
        count: usize,
    },
    /// Rows removed by a delete
    Deleted {
        /// Target table
        table: String,
        /// Number of removed rows
        count: usize,
    },
    /// A destructive command was declined
    Cancelled,
}

impl Output {
    /// Rows of a select, if this is one
    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            Output::Rows(rows) => Some(rows),
            _ => None,
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Message(message) => f.write_str(message),
            Output::Rows(rows) if rows.is_empty() => f.write_str(NO_RECORDS),
            Output::Rows(rows) => {
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", row)?;
                }
                Ok(())
            }
            Output::Tables(tables) => write!(f, "{}", tables),
            Output::Updated { table, count } => {
                write!(f, "Updated {} record(s) in table \"{}\".", count, table)
            }
            Output::Deleted { table, count } => {
                write!(f, "Deleted {} record(s) from table \"{}\".", count, table)
            }
            Output::Cancelled => f.write_str(CANCELLED),
        }
    }
}

/// Text a shell prints for a command result. Errors become a single
/// `Error: <message>` line.
pub fn render(result: &Result<Output>) -> String {
    match result {
        Ok(output) => output.to_string(),
        Err(e) => format!("Error: {}", e),
    }
}
