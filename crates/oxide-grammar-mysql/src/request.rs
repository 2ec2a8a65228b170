//! JSON-described grammar requests.
//!
//! A [`Request`] carries everything needed to build one grammar from loose
//! input such as command-line flags: the target table, optional field
//! whitelist, column data, equality filters and paging.

use oxide_grammar::{
    Database, DeleteGrammar, Filter, Grammar, InsertGrammar, Order, SelectGrammar,
    StatementContainer, Table, UpdateGrammar,
};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ExecuteError, Result};

/// The kind of statement a request compiles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    /// `INSERT`, one statement per row.
    Insert,
    /// `DELETE`
    Delete,
    /// `UPDATE`
    Update,
    /// `SELECT`
    Select,
}

/// A grammar described by plain data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Request {
    /// Database name.
    pub database: String,
    /// Table name.
    pub table: String,
    /// Allowed columns; empty means unrestricted.
    pub fields: Vec<String>,
    /// Column data for INSERT and UPDATE.
    pub data: Map<String, Value>,
    /// Conditions: scalar compares, list tests membership, null tests NULL.
    pub filter: Map<String, Value>,
    /// Selected columns for SELECT; empty means `*`.
    pub columns: Vec<String>,
    /// ORDER BY terms as `column` or `column:desc`.
    pub order_by: Vec<String>,
    /// Row limit.
    pub limit: Option<u64>,
    /// Row offset for SELECT.
    pub offset: Option<u64>,
}

impl Request {
    /// Parses a JSON object into a column map.
    pub fn parse_object(json: &str) -> Result<Map<String, Value>> {
        match serde_json::from_str(json)? {
            Value::Object(map) => Ok(map),
            other => Err(ExecuteError::InvalidRequest(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    /// Returns the table this request targets.
    ///
    /// Fails when the database or table name is missing.
    pub fn table(&self) -> Result<Table> {
        if self.database.is_empty() {
            return Err(ExecuteError::InvalidRequest(String::from(
                "database name can not be empty",
            )));
        }
        if self.table.is_empty() {
            return Err(ExecuteError::InvalidRequest(String::from(
                "table name can not be empty",
            )));
        }
        let table = Database::new(self.database.as_str()).table(self.table.as_str());
        if self.fields.is_empty() {
            Ok(table)
        } else {
            Ok(table.with_fields(self.fields.iter().map(String::as_str)))
        }
    }

    /// Names the fields set on this request that `kind` has no use for.
    fn unused_fields(&self, kind: RequestKind) -> Vec<&'static str> {
        let (data, filter, limit, select) = match kind {
            RequestKind::Insert => (true, false, false, false),
            RequestKind::Delete => (false, true, true, false),
            RequestKind::Update => (true, true, true, false),
            RequestKind::Select => (false, true, true, true),
        };
        let mut unused = Vec::new();
        if !data && !self.data.is_empty() {
            unused.push("data");
        }
        if !filter && !self.filter.is_empty() {
            unused.push("filter");
        }
        if !limit && self.limit.is_some() {
            unused.push("limit");
        }
        if !select {
            if !self.columns.is_empty() {
                unused.push("columns");
            }
            if !self.order_by.is_empty() {
                unused.push("order_by");
            }
            if self.offset.is_some() {
                unused.push("offset");
            }
        }
        unused
    }

    fn build_filter(&self) -> Result<Filter> {
        let mut filter = Filter::default();
        filter.add_column_filters(self.filter.clone(), true, None)?;
        Ok(filter)
    }

    fn order_terms(&self) -> Result<Vec<(String, Order)>> {
        self.order_by
            .iter()
            .map(|term| match term.split_once(':') {
                Some((column, order)) => Ok((String::from(column), order.parse()?)),
                None => Ok((term.clone(), Order::Asc)),
            })
            .collect()
    }

    /// Compiles the request into statements.
    ///
    /// Fields that `kind` would ignore are rejected rather than dropped.
    pub fn compile(&self, kind: RequestKind) -> Result<StatementContainer> {
        let unused = self.unused_fields(kind);
        if !unused.is_empty() {
            return Err(ExecuteError::InvalidRequest(format!(
                "{kind:?} does not accept: {}",
                unused.join(", ")
            )));
        }
        let table = self.table()?;
        let container = match kind {
            RequestKind::Insert => {
                let mut insert = InsertGrammar::new(&table);
                for (column, value) in &self.data {
                    insert.set_column(column.as_str(), value.clone());
                }
                insert.compile()?
            }
            RequestKind::Delete => {
                let mut delete = DeleteGrammar::new(&table).filter(self.build_filter()?);
                if let Some(limit) = self.limit {
                    delete = delete.limit(limit);
                }
                delete.compile()?
            }
            RequestKind::Update => {
                let mut update = UpdateGrammar::new(&table).filter(self.build_filter()?);
                for (column, value) in &self.data {
                    update.set_column(column.as_str(), value.clone())?;
                }
                if let Some(limit) = self.limit {
                    update = update.limit(limit);
                }
                update.compile()?
            }
            RequestKind::Select => {
                let mut select = SelectGrammar::new(&table)
                    .columns(self.columns.iter().map(String::as_str))
                    .filter(self.build_filter()?);
                for (column, order) in self.order_terms()? {
                    select = select.order_by(column, order);
                }
                if let Some(limit) = self.limit {
                    select = select.limit(limit);
                }
                if let Some(offset) = self.offset {
                    select = select.offset(offset);
                }
                select.compile()?
            }
        };
        Ok(container)
    }
}
