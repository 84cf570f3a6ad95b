//! Parsed commands of the PrimDB command language

use super::clause::{Assignments, FilterClause};
use std::fmt;

/// A single command
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// create_table <name> <col:type> ...
    CreateTable { name: String, columns: Vec<String> },
    /// drop_table <name>
    DropTable { name: String },
    /// list_tables
    ListTables,
    /// insert into <name> values (<v1>, ...)
    Insert { table: String, values: Vec<String> },
    /// select from <name> [where <col>=<value>]
    Select {
        table: String,
        filter: Option<FilterClause>,
    },
    /// update <name> set <assignments> where <col>=<value>
    Update {
        table: String,
        assignments: Assignments,
        filter: FilterClause,
    },
    /// delete from <name> where <col>=<value>
    Delete { table: String, filter: FilterClause },
    /// info <name>
    Info { table: String },
}

impl Statement {
    /// Name of the action to confirm before running a statement that
    /// destroys data, or `None` for everything else
    pub fn destructive_action(&self) -> Option<&'static str> {
        match self {
            Statement::Delete { .. } => Some("delete records"),
            Statement::DropTable { .. } => Some("drop table"),
            _ => None,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::CreateTable { name, columns } => {
                write!(f, "create_table {}", name)?;
                for column in columns {
                    write!(f, " {}", column)?;
                }
                Ok(())
            }
            Statement::DropTable { name } => write!(f, "drop_table {}", name),
            Statement::ListTables => write!(f, "list_tables"),
            Statement::Insert { table, values } => {
                write!(f, "insert into {} values ({})", table, values.join(", "))
            }
            Statement::Select { table, filter } => {
                write!(f, "select from {}", table)?;
                if let Some(filter) = filter {
                    write!(f, " where {}", filter)?;
                }
                Ok(())
            }
            Statement::Update {
                table,
                assignments,
                filter,
            } => {
                write!(f, "update {} set ", table)?;
                for (i, (column, value)) in assignments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", column, value)?;
                }
                write!(f, " where {}", filter)
            }
            Statement::Delete { table, filter } => {
                write!(f, "delete from {} where {}", table, filter)
            }
            Statement::Info { table } => write!(f, "info {}", table),
        }
    }
}
