//! UPDATE grammar.

use tracing::debug;

use super::{Grammar, push_limit, push_where};
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::fragment::Fragments;
use crate::schema::Table;
use crate::statement::{Statement, StatementContainer};
use crate::value::{Argument, Arguments, Value};

/// Compiles `UPDATE <table> SET `a` = ?, ... [WHERE ...] [LIMIT n]`.
#[derive(Debug, Clone)]
pub struct UpdateGrammar<'t> {
    table: &'t Table,
    assignments: Vec<(String, Argument)>,
    filter: Filter,
    limit: Option<u64>,
}

impl<'t> UpdateGrammar<'t> {
    /// Creates an UPDATE grammar for `table`.
    #[must_use]
    pub fn new(table: &'t Table) -> Self {
        Self {
            table,
            assignments: Vec::new(),
            filter: Filter::default(),
            limit: None,
        }
    }

    /// Assigns a value to a column. Setting the same column twice keeps the
    /// first position and the last value.
    ///
    /// Only strings, numbers, booleans and null can be assigned.
    pub fn set_column(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        let name = name.into();
        let value = value.into();
        if !(value.is_scalar() || value == Value::Null) {
            return Err(Error::InvalidUpdateValue(name));
        }
        let argument = Argument::try_from(value)?;
        match self.assignments.iter_mut().find(|(column, _)| *column == name) {
            Some((_, existing)) => *existing = argument,
            None => self.assignments.push((name, argument)),
        }
        Ok(self)
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

    /// Caps the number of updated rows.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Grammar for UpdateGrammar<'_> {
    fn table(&self) -> &Table {
        self.table
    }

    fn compile(&self) -> Result<StatementContainer> {
        if self.assignments.is_empty() {
            return Err(Error::EmptyUpdateData);
        }

        let table = self.table_name();
        let mut fragments = Fragments::new();
        let mut arguments = Arguments::new();

        let mut assignments = Vec::with_capacity(self.assignments.len());
        for (column, value) in &self.assignments {
            assignments.push(format!("{} = ?", self.table.quote_column(column)?));
            arguments.push_argument(value.clone());
        }

        fragments
            .push("UPDATE")
            .push(table.as_str())
            .push("SET")
            .push(assignments.join(", "));
        push_where(&mut fragments, &self.filter, &mut arguments);
        push_limit(&mut fragments, self.limit, None);

        let sql = fragments.assemble();
        debug!(table = %table, sql = %sql, arguments = ?arguments, "Compiled UPDATE");
        Ok(StatementContainer::from(Statement::new(sql, arguments)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Database;

    #[test]
    fn test_update_with_filter() {
        let table = Database::new("db").table("users");
        let mut update = UpdateGrammar::new(&table).limit(1);
        update
            .set_column("name", "Bob")
            .unwrap()
            .set_column("active", false)
            .unwrap();
        update.filter_mut().add_column_filter("id", 7).unwrap();

        let stmt = update.compile().unwrap().pop().unwrap();
        assert_eq!(
            stmt.sql(),
            "UPDATE db.users SET `name` = ?, `active` = ? WHERE `id` = ? LIMIT 1"
        );
        // SET values come before filter values
        assert_eq!(
            stmt.arguments().as_slice(),
            &[Argument::from("Bob"), Argument::Int(0), Argument::Int(7)]
        );
    }

    #[test]
    fn test_update_overwrites_existing_assignment() {
        let table = Database::new("db").table("users");
        let mut update = UpdateGrammar::new(&table);
        update
            .set_column("a", 1)
            .unwrap()
            .set_column("b", 2)
            .unwrap()
            .set_column("a", 3)
            .unwrap();

        let stmt = update.compile().unwrap().pop().unwrap();
        assert_eq!(stmt.sql(), "UPDATE db.users SET `a` = ?, `b` = ?");
        assert_eq!(
            stmt.arguments().as_slice(),
            &[Argument::Int(3), Argument::Int(2)]
        );
    }

    #[test]
    fn test_update_null_becomes_empty_string() {
        let table = Database::new("db").table("users");
        let mut update = UpdateGrammar::new(&table);
        update.set_column("note", Value::Null).unwrap();

        let stmt = update.compile().unwrap().pop().unwrap();
        assert_eq!(stmt.arguments().as_slice(), &[Argument::Text(String::new())]);
    }

    #[test]
    fn test_update_errors() {
        let table = Database::new("db").table("users").with_fields(["name"]);
        assert_eq!(
            UpdateGrammar::new(&table).compile(),
            Err(Error::EmptyUpdateData)
        );

        let mut update = UpdateGrammar::new(&table);
        assert_eq!(
            update.set_column("name", vec![1, 2]).map(|_| ()),
            Err(Error::InvalidUpdateValue(String::from("name")))
        );

        update.set_column("role", "admin").unwrap();
        assert!(matches!(
            update.compile(),
            Err(Error::UnknownColumn { column, .. }) if column == "role"
        ));
    }
}
