//! SELECT grammar.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::{Grammar, push_limit, push_where};
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::fragment::Fragments;
use crate::schema::Table;
use crate::statement::{Statement, StatementContainer};
use crate::value::Arguments;

/// Sort direction of an ORDER BY term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl Order {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for Order {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(Error::InvalidOrder(String::from(token)))
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiles `SELECT <columns> FROM <table> [WHERE ...] [ORDER BY ...]
/// [LIMIT n [OFFSET m]]`.
#[derive(Debug, Clone)]
pub struct SelectGrammar<'t> {
    table: &'t Table,
    columns: Vec<String>,
    filter: Filter,
    order_by: Vec<(String, Order)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl<'t> SelectGrammar<'t> {
    /// Creates a SELECT grammar for `table`, selecting `*`.
    #[must_use]
    pub fn new(table: &'t Table) -> Self {
        Self {
            table,
            columns: Vec::new(),
            filter: Filter::default(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Selects specific columns.
    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Replaces the WHERE filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Returns the WHERE filter for in-place building.
    pub fn filter_mut(&mut self) -> &mut Filter {
        &mut self.filter
    }

    /// Adds an ORDER BY term.
    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, order: Order) -> Self {
        self.order_by.push((column.into(), order));
        self
    }

    /// Caps the number of returned rows.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips the first `offset` rows.
    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl Grammar for SelectGrammar<'_> {
    fn table(&self) -> &Table {
        self.table
    }

    fn compile(&self) -> Result<StatementContainer> {
        let table = self.table_name();
        let mut fragments = Fragments::new();
        let mut arguments = Arguments::new();

        let columns = if self.columns.is_empty() {
            String::from("*")
        } else {
            self.table.quote_columns(&self.columns)?
        };

        fragments
            .push("SELECT")
            .push(columns)
            .push("FROM")
            .push(table.as_str());
        push_where(&mut fragments, &self.filter, &mut arguments);

        if !self.order_by.is_empty() {
            let terms = self
                .order_by
                .iter()
                .map(|(column, order)| {
                    self.table
                        .quote_column(column)
                        .map(|quoted| format!("{quoted} {order}"))
                })
                .collect::<Result<Vec<_>>>()?;
            fragments.push("ORDER BY").push(terms.join(", "));
        }
        push_limit(&mut fragments, self.limit, self.offset);

        let sql = fragments.assemble();
        debug!(table = %table, sql = %sql, arguments = ?arguments, "Compiled SELECT");
        Ok(StatementContainer::from(Statement::new(sql, arguments)?))
    }
}
