//! Error types for PrimDB.

use crate::value::DataType;
use std::fmt;

/// The main error type for PrimDB operations.
#[derive(Debug)]
pub enum Error {
    /// The named table is not registered
    TableNotFound(String),

    /// A table with this name already exists
    DuplicateTable(String),

    /// A column name repeats `ID` or an earlier column
    DuplicateColumn(String),

    /// A column spec is missing the `name:type` separator
    MalformedColumnSpec(String),

    /// A column spec has a blank name
    EmptyColumnName,

    /// A column spec names a type outside `int`, `str`, `bool`
    UnsupportedType(String),

    /// Wrong number of values for an insert (ID excluded)
    ArityMismatch {
        /// Number of user columns
        expected: usize,
        /// Number of values supplied
        found: usize,
    },

    /// A value could not be coerced to its column's declared type
    TypeMismatch {
        /// The raw value as written
        value: String,
        /// Offending column, when known
        column: Option<String>,
        /// Declared type of the column
        expected: DataType,
    },

    /// A filter clause without `=`
    MalformedFilter(String),

    /// An assignment segment without `=`
    MalformedAssignment(String),

    /// The command verb is not part of the language
    UnknownCommand(String),

    /// The command verb is known but its arguments are not
    InvalidCommand(String),

    /// Input rejected by validation limits
    InvalidInput(String),

    /// I/O error
    Io(std::io::Error),

    /// Serialization/deserialization error
    Serialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TableNotFound(name) => write!(f, "Table \"{}\" does not exist", name),
            Error::DuplicateTable(name) => write!(f, "Table \"{}\" already exists", name),
            Error::DuplicateColumn(name) => {
                write!(f, "Column \"{}\" is already defined in the table", name)
            }
            Error::MalformedColumnSpec(spec) => write!(
                f,
                "Invalid column spec: {}. Use the \"column:type\" format",
                spec
            ),
            Error::EmptyColumnName => write!(f, "Column name cannot be empty"),
            Error::UnsupportedType(ty) => write!(
                f,
                "Unsupported type: {}. Supported types: int, str, bool",
                ty
            ),
            Error::ArityMismatch { expected, found } => {
                write!(f, "Expected {} values, got {}", expected, found)
            }
            Error::TypeMismatch {
                value,
                column: Some(column),
                expected,
            } => write!(
                f,
                "Value '{}' does not match type '{}' of column '{}'",
                value, expected, column
            ),
            Error::TypeMismatch {
                value,
                column: None,
                expected,
            } => write!(f, "Value '{}' does not match type '{}'", value, expected),
            Error::MalformedFilter(text) => {
                write!(f, "Invalid filter: '{}'. Use \"column=value\"", text)
            }
            Error::MalformedAssignment(text) => {
                write!(f, "Invalid assignment: '{}'. Use \"column=value\"", text)
            }
            Error::UnknownCommand(cmd) => write!(f, "Unknown command: {}", cmd),
            Error::InvalidCommand(msg) => write!(f, "Invalid command: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// A specialized `Result` type for PrimDB operations.
pub type Result<T> = std::result::Result<T, Error>;
