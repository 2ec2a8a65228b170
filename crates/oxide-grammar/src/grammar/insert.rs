//! INSERT grammar.
//!
//! Values are collected per column and turned into rows at compile time:
//! every column shorter than the longest one repeats its last value, so a
//! column set once acts as a constant for every row. Each row becomes its
//! own single-row statement sharing one SQL template.

use tracing::debug;

use super::Grammar;
use crate::dialect::placeholders;
use crate::error::{Error, Result};
use crate::matrix::{ColumnMatrix, matrixize, transpose};
use crate::schema::Table;
use crate::statement::{Statement, StatementContainer};
use crate::value::{Argument, Arguments, Value};

/// Compiles `INSERT INTO <table> (<columns>) VALUES (?, ...)`, one
/// statement per row.
#[derive(Debug, Clone)]
pub struct InsertGrammar<'t> {
    table: &'t Table,
    columns: ColumnMatrix,
}

impl<'t> InsertGrammar<'t> {
    /// Creates an INSERT grammar for `table`.
    #[must_use]
    pub fn new(table: &'t Table) -> Self {
        Self {
            table,
            columns: ColumnMatrix::new(),
        }
    }

    /// Appends values to a column. A list contributes one value per row.
    pub fn set_column(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.columns.set_column(name, value);
        self
    }

    /// Builder-style variant of [`InsertGrammar::set_column`].
    #[must_use]
    pub fn column(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.columns.set_column(name, value);
        self
    }

    /// Returns the collected column data.
    #[must_use]
    pub const fn columns(&self) -> &ColumnMatrix {
        &self.columns
    }
}

impl Grammar for InsertGrammar<'_> {
    fn table(&self) -> &Table {
        self.table
    }

    fn compile(&self) -> Result<StatementContainer> {
        if self.columns.is_empty() {
            return Err(Error::EmptyInsertData);
        }

        let columns = self.table.quote_columns(self.columns.names())?;
        let table = self.table_name();
        let sql = format!(
            "INSERT INTO {table} ({columns}) VALUES ({})",
            placeholders(self.columns.len())
        );

        let rows = transpose(&matrixize(self.columns.columns()));
        if rows.is_empty() {
            return Err(Error::EmptyInsertData);
        }

        let mut container = StatementContainer::new();
        for row in rows {
            let mut arguments = Arguments::new();
            for value in row {
                arguments.push_argument(Argument::try_from(value)?);
            }
            container.push(Statement::new(sql.as_str(), arguments)?);
        }

        debug!(table = %table, sql = %sql, statements = container.len(), "Compiled INSERT");
        Ok(container)
    }
}
