//! DELETE grammar.

use tracing::debug;

use super::{Grammar, push_limit, push_where};
use crate::error::Result;
use crate::filter::Filter;
use crate::fragment::Fragments;
use crate::schema::Table;
use crate::statement::{Statement, StatementContainer};
use crate::value::Arguments;

/// Compiles `DELETE FROM <table> [WHERE ...] [LIMIT n]`.
///
/// **Warning**: without a filter every row of the table is deleted.
#[derive(Debug, Clone)]
pub struct DeleteGrammar<'t> {
    table: &'t Table,
    filter: Filter,
    limit: Option<u64>,
}

impl<'t> DeleteGrammar<'t> {
    /// Creates a DELETE grammar for `table`.
    #[must_use]
    pub fn new(table: &'t Table) -> Self {
        Self {
            table,
            filter: Filter::default(),
            limit: None,
        }
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

    /// Caps the number of deleted rows.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Grammar for DeleteGrammar<'_> {
    fn table(&self) -> &Table {
        self.table
    }

    fn compile(&self) -> Result<StatementContainer> {
        let table = self.table_name();
        let mut fragments = Fragments::new();
        let mut arguments = Arguments::new();

        fragments.push("DELETE FROM").push(table.as_str());
        push_where(&mut fragments, &self.filter, &mut arguments);
        push_limit(&mut fragments, self.limit, None);

        let sql = fragments.assemble();
        debug!(table = %table, sql = %sql, arguments = ?arguments, "Compiled DELETE");
        Ok(StatementContainer::from(Statement::new(sql, arguments)?))
    }
}
