//! Compiled statements and their FIFO container.

use std::collections::{BTreeMap, VecDeque};

use serde::Serialize;

use crate::dialect::{Dialect, MySqlDialect};
use crate::error::{Error, Result};
use crate::value::Arguments;

/// SQL text paired with the arguments bound to its placeholders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    sql: String,
    arguments: Arguments,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    options: BTreeMap<String, String>,
}

impl Statement {
    /// Creates a statement.
    ///
    /// Fails when the number of `?` placeholders in `sql` differs from the
    /// number of arguments.
    pub fn new(sql: impl Into<String>, arguments: Arguments) -> Result<Self> {
        let sql = sql.into();
        let placeholders = MySqlDialect.count_placeholders(&sql);
        if placeholders != arguments.len() {
            return Err(Error::PlaceholderMismatch {
                placeholders,
                arguments: arguments.len(),
            });
        }
        Ok(Self {
            sql,
            arguments,
            options: BTreeMap::new(),
        })
    }

    /// Attaches a free-form option, e.g. a dialect hint for the executor.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Returns the SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the bound arguments.
    #[must_use]
    pub const fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// Returns the attached options.
    #[must_use]
    pub const fn options(&self) -> &BTreeMap<String, String> {
        &self.options
    }

    /// Returns a single option.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Consumes the statement and returns the SQL and arguments.
    #[must_use]
    pub fn into_parts(self) -> (String, Arguments) {
        (self.sql, self.arguments)
    }
}

/// An ordered queue of statements handed to an executor as one unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StatementContainer {
    statements: VecDeque<Statement>,
}

impl StatementContainer {
    /// Creates an empty container.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            statements: VecDeque::new(),
        }
    }

    /// Appends a statement.
    pub fn push(&mut self, statement: Statement) -> &mut Self {
        self.statements.push_back(statement);
        self
    }

    /// Removes and returns the oldest statement.
    pub fn pop(&mut self) -> Result<Statement> {
        self.statements
            .pop_front()
            .ok_or(Error::NoStatementAvailable)
    }

    /// Number of queued statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns true if no statement is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Iterates over the statements in queue order.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, Statement> {
        self.statements.iter()
    }
}

impl From<Statement> for StatementContainer {
    fn from(statement: Statement) -> Self {
        let mut container = Self::new();
        container.push(statement);
        container
    }
}

impl FromIterator<Statement> for StatementContainer {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        Self {
            statements: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for StatementContainer {
    type Item = Statement;
    type IntoIter = std::collections::vec_deque::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a StatementContainer {
    type Item = &'a Statement;
    type IntoIter = std::collections::vec_deque::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
