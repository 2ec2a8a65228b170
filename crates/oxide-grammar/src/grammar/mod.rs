//! Grammars: builders that compile into statements.
//!
//! Every grammar is bound to a [`Table`] and compiles its accumulated state
//! into a [`StatementContainer`]. DELETE, UPDATE and SELECT always produce
//! a single statement; INSERT produces one statement per row.
//!
//! # Example
//!
//! ```rust
//! use oxide_grammar::{Database, DeleteGrammar, Grammar};
//!
//! let table = Database::new("db").table("users");
//! let mut delete = DeleteGrammar::new(&table).limit(10);
//! delete.filter_mut().add_column_filter("id", vec![1, 2, 3])?;
//!
//! let mut statements = delete.compile()?;
//! let statement = statements.pop()?;
//! assert_eq!(
//!     statement.sql(),
//!     "DELETE FROM db.users WHERE `id` IN (?,?,?) LIMIT 10"
//! );
//! # Ok::<(), oxide_grammar::Error>(())
//! ```

mod delete;
mod insert;
mod select;
mod update;

pub use delete::DeleteGrammar;
pub use insert::InsertGrammar;
pub use select::{Order, SelectGrammar};
pub use update::UpdateGrammar;

use crate::error::Result;
use crate::filter::Filter;
use crate::fragment::Fragments;
use crate::schema::Table;
use crate::statement::StatementContainer;
use crate::value::Arguments;

/// Largest row count MySQL accepts; used when only an offset is given.
const MAX_ROWS: u64 = u64::MAX;

/// A builder bound to a table that compiles into statements.
pub trait Grammar {
    /// Returns the table this grammar targets.
    fn table(&self) -> &Table;

    /// Returns the `database.table` prefix used in SQL text.
    fn table_name(&self) -> String {
        self.table().qualified_name()
    }

    /// Compiles the accumulated state.
    ///
    /// Either every statement is produced or an error is returned; there
    /// is no partial output.
    fn compile(&self) -> Result<StatementContainer>;
}

/// Appends `WHERE <condition>` unless the filter compiles to nothing.
fn push_where(fragments: &mut Fragments, filter: &Filter, arguments: &mut Arguments) {
    let condition = filter.compile(arguments);
    if !condition.is_empty() {
        fragments.push("WHERE").push(condition);
    }
}

/// Appends `LIMIT n [OFFSET m]`.
fn push_limit(fragments: &mut Fragments, limit: Option<u64>, offset: Option<u64>) {
    match (limit, offset) {
        (Some(limit), None) => {
            fragments.push(format!("LIMIT {limit}"));
        }
        (limit, Some(offset)) => {
            fragments.push(format!(
                "LIMIT {} OFFSET {offset}",
                limit.unwrap_or(MAX_ROWS)
            ));
        }
        (None, None) => {}
    }
}
