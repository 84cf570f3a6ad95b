//! Filter and assignment clauses
//!
//! `column=value` equality filters and `column=value, ...` assignment
//! lists. Literal values are typed by inference.

use super::scanner::split_unquoted;
use crate::error::{Error, Result};
use crate::row::Row;
use crate::value::{infer, Value};
use std::fmt;

/// Single equality predicate
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub column: String,
    pub value: Value,
}

impl FilterClause {
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// True if the row's value for the column equals the filter value when
    /// both are rendered as text. Rows without the column never match.
    pub fn matches(&self, row: &Row) -> bool {
        row.get(&self.column)
            .is_some_and(|value| value.text_eq(&self.value))
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.column, self.value)
    }
}

/// Ordered column assignments applied by update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignments {
    pairs: Vec<(String, Value)>,
}

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment; a repeated column replaces the earlier value in place.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.pairs.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.pairs
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.pairs.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Applies every assignment whose column exists on the row.
    pub fn apply(&self, row: &mut Row) {
        for (column, value) in &self.pairs {
            row.set(column, value.clone());
        }
    }
}

/// Parses a `column=value` filter. Blank input means no filter.
pub fn parse_filter(text: &str) -> Result<Option<FilterClause>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let (column, literal) = text
        .split_once('=')
        .ok_or_else(|| Error::MalformedFilter(text.to_string()))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(Error::MalformedFilter(text.to_string()));
    }

    Ok(Some(FilterClause::new(column, infer(literal.trim()))))
}

/// Parses a comma-separated assignment list. Commas inside quotes do not
/// split. Blank input yields no assignments.
pub fn parse_assignments(text: &str) -> Result<Assignments> {
    let mut assignments = Assignments::new();
    if text.trim().is_empty() {
        return Ok(assignments);
    }

    for segment in split_unquoted(text, ',') {
        let (column, literal) = segment
            .split_once('=')
            .ok_or_else(|| Error::MalformedAssignment(segment.trim().to_string()))?;
        let column = column.trim();
        if column.is_empty() {
            return Err(Error::MalformedAssignment(segment.trim().to_string()));
        }
        assignments.push(column, infer(literal.trim()));
    }

    Ok(assignments)
}
