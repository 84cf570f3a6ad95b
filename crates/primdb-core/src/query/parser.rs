//! Parser for the PrimDB command language
//!
//! Turns one command line into a [`Statement`]. Verbs and keywords are
//! case-insensitive; filter and assignment text is handed to the clause
//! parser.

use super::ast::Statement;
use super::clause::{parse_assignments, parse_filter, FilterClause};
use super::scanner::{find_unquoted_keyword, split_unquoted, Scanner};
use crate::error::{Error, Result};

const WHERE: &str = "where";

/// Command parser
pub struct Parser {
    scanner: Scanner,
}

impl Parser {
    /// Create a new parser over one command line
    pub fn new(input: &str) -> Self {
        Self {
            scanner: Scanner::new(input),
        }
    }

    /// Parse the command into a statement
    pub fn parse(&mut self) -> Result<Statement> {
        let verb = self
            .scanner
            .next_word()
            .ok_or_else(|| Error::InvalidCommand("empty command".to_string()))?;

        match verb.to_lowercase().as_str() {
            "create_table" => self.parse_create_table(),
            "drop_table" => {
                let name = self.expect_name()?;
                self.expect_end()?;
                Ok(Statement::DropTable { name })
            }
            "list_tables" => {
                self.expect_end()?;
                Ok(Statement::ListTables)
            }
            "insert" => self.parse_insert(),
            "select" => self.parse_select(),
            "update" => self.parse_update(),
            "delete" => self.parse_delete(),
            "info" => {
                let table = self.expect_name()?;
                self.expect_end()?;
                Ok(Statement::Info { table })
            }
            _ => Err(Error::UnknownCommand(verb)),
        }
    }

    fn parse_create_table(&mut self) -> Result<Statement> {
        let name = self.expect_name()?;
        let mut columns = Vec::new();
        while let Some(spec) = self.scanner.next_word() {
            columns.push(spec);
        }
        self.expect_end()?;
        Ok(Statement::CreateTable { name, columns })
    }

    fn parse_insert(&mut self) -> Result<Statement> {
        self.expect_keyword("into")?;
        let table = self.expect_name()?;
        self.expect_keyword("values")?;

        let rest = self.scanner.rest();
        let inner = rest
            .strip_prefix('(')
            .and_then(|r| r.strip_suffix(')'))
            .ok_or_else(|| {
                Error::InvalidCommand("values must be enclosed in parentheses".to_string())
            })?;

        let values = if inner.trim().is_empty() {
            Vec::new()
        } else {
            split_unquoted(inner, ',')
                .into_iter()
                .map(|v| v.trim().to_string())
                .collect()
        };

        Ok(Statement::Insert { table, values })
    }

    fn parse_select(&mut self) -> Result<Statement> {
        self.expect_keyword("from")?;
        let table = self.expect_name()?;

        if self.scanner.is_at_end() {
            return Ok(Statement::Select {
                table,
                filter: None,
            });
        }

        self.expect_keyword(WHERE)?;
        let filter = self.expect_filter()?;
        Ok(Statement::Select {
            table,
            filter: Some(filter),
        })
    }

    fn parse_update(&mut self) -> Result<Statement> {
        let table = self.expect_name()?;
        self.expect_keyword("set")?;

        let rest = self.scanner.rest();
        let split = find_unquoted_keyword(&rest, WHERE).ok_or_else(|| {
            Error::InvalidCommand("update requires a WHERE clause".to_string())
        })?;
        let (set_text, where_text) = rest.split_at(split);

        let assignments = parse_assignments(set_text)?;
        if assignments.is_empty() {
            return Err(Error::InvalidCommand(
                "update requires at least one assignment".to_string(),
            ));
        }
        let filter = required_filter(&where_text[WHERE.len()..])?;

        Ok(Statement::Update {
            table,
            assignments,
            filter,
        })
    }

    fn parse_delete(&mut self) -> Result<Statement> {
        self.expect_keyword("from")?;
        let table = self.expect_name()?;
        if !self.scanner.eat_keyword(WHERE) {
            return Err(Error::InvalidCommand(
                "delete requires a WHERE clause".to_string(),
            ));
        }
        let filter = self.expect_filter()?;
        Ok(Statement::Delete { table, filter })
    }

    fn expect_filter(&mut self) -> Result<FilterClause> {
        let text = self.scanner.rest();
        required_filter(&text)
    }

    fn expect_name(&mut self) -> Result<String> {
        self.scanner
            .next_word()
            .ok_or_else(|| Error::InvalidCommand("expected a table name".to_string()))
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        if self.scanner.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(Error::InvalidCommand(format!(
                "expected {}",
                keyword.to_uppercase()
            )))
        }
    }

    fn expect_end(&mut self) -> Result<()> {
        if self.scanner.is_at_end() {
            Ok(())
        } else {
            Err(Error::InvalidCommand(format!(
                "unexpected input: {}",
                self.scanner.rest()
            )))
        }
    }
}

fn required_filter(text: &str) -> Result<FilterClause> {
    parse_filter(text)?.ok_or_else(|| Error::MalformedFilter(text.trim().to_string()))
}
