//! Command language module
//!
//! Command parsing plus the filter and assignment clause grammars.

/// Parsed command types
#[allow(missing_docs)]
pub mod ast;
/// Filter and assignment clauses
#[allow(missing_docs)]
pub mod clause;
/// Command parser
pub mod parser;
/// Quote-aware character scanning
pub mod scanner;

// Re-export main types
pub use ast::Statement;
pub use clause::{parse_assignments, parse_filter, Assignments, FilterClause};
pub use parser::Parser;
