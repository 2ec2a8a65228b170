//! Database and table context shared by every grammar.
//!
//! A [`Table`] names where a statement runs and, optionally, which columns
//! callers are allowed to touch. When no fields are declared any column is
//! accepted and quoted on the fly.

use std::collections::BTreeMap;

use crate::dialect::{Dialect, MySqlDialect, quote_identifier};
use crate::error::{Error, Result};

/// A database name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    name: String,
}

impl Database {
    /// Creates a database handle.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the raw database name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name as it appears in SQL text.
    #[must_use]
    pub fn quoted_name(&self) -> String {
        MySqlDialect.quote_identifier_if_needed(&self.name)
    }

    /// Creates a table in this database.
    #[must_use]
    pub fn table(&self, name: impl Into<String>) -> Table {
        Table::new(self.clone(), name)
    }
}

/// A table, with an optional whitelist of allowed columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    database: Database,
    name: String,
    fields: BTreeMap<String, String>,
}

impl Table {
    /// Creates a table without declared fields.
    #[must_use]
    pub fn new(database: Database, name: impl Into<String>) -> Self {
        Self {
            database,
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Declares the allowed columns. Each is quoted with backticks.
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in fields {
            let field = field.into();
            let quoted = quote_identifier(&field);
            self.fields.insert(field, quoted);
        }
        self
    }

    /// Declares one allowed column with an explicit SQL spelling.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, quoted: impl Into<String>) -> Self {
        self.fields.insert(name.into(), quoted.into());
        self
    }

    /// Returns the database this table belongs to.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }

    /// Returns the raw table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the `database.table` prefix used in SQL text.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!(
            "{}.{}",
            self.database.quoted_name(),
            MySqlDialect.quote_identifier_if_needed(&self.name)
        )
    }

    /// Returns the declared fields (name to quoted name).
    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Returns true if a whitelist is declared.
    #[must_use]
    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Resolves a column to its quoted SQL spelling.
    ///
    /// Fails when fields are declared and `column` is not one of them.
    pub fn quote_column(&self, column: &str) -> Result<String> {
        if !self.has_fields() {
            return Ok(quote_identifier(column));
        }
        self.fields
            .get(column)
            .cloned()
            .ok_or_else(|| Error::UnknownColumn {
                table: self.qualified_name(),
                column: String::from(column),
            })
    }

    /// Resolves every column and stitches them into `` `a`,`b`,... ``.
    pub fn quote_columns<I, S>(&self, columns: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(columns
            .into_iter()
            .map(|column| self.quote_column(column.as_ref()))
            .collect::<Result<Vec<_>>>()?
            .join(","))
    }
}
