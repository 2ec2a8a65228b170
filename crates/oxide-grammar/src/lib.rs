//! # oxide-grammar
//!
//! A MySQL statement-grammar compiler: fluent filter, column and value
//! specifications go in, parameterized SQL text with positionally aligned
//! arguments comes out.
//!
//! This crate provides:
//! - Operator and connector normalization with fail-fast validation
//! - Boolean filter expressions with nested groups
//! - Argument coercion to the string/number values MySQL binds
//! - DELETE, INSERT, UPDATE and SELECT grammars compiling into
//!   [`StatementContainer`]s
//!
//! ## Filters
//!
//! The kind of condition follows the shape of the value: a scalar compares,
//! a list tests membership, and null tests for NULL.
//!
//! ```rust
//! use oxide_grammar::{Arguments, Filter, Value};
//!
//! let mut filter = Filter::default();
//! filter.add_column_filter_with(
//!     "foo",
//!     vec![Value::from("a"), Value::from(100), Value::from(true), Value::Null],
//!     false,
//!     None,
//! )?;
//!
//! let mut arguments = Arguments::new();
//! assert_eq!(filter.compile(&mut arguments), "`foo` NOT IN (?,?,?,?)");
//! assert_eq!(arguments.len(), 4);
//! # Ok::<(), oxide_grammar::Error>(())
//! ```
//!
//! ## Multi-row inserts
//!
//! Insert data is set per column. Short columns repeat their last value, and
//! every row compiles to its own statement:
//!
//! ```rust
//! use oxide_grammar::{Database, Grammar, InsertGrammar, Value};
//!
//! let table = Database::new("db").table("table");
//! let statements = InsertGrammar::new(&table)
//!     .column("foo", "foo")
//!     .column("bar", Value::Null)
//!     .column("baz", vec![1, 2, 3])
//!     .compile()?;
//!
//! assert_eq!(statements.len(), 3);
//! for statement in &statements {
//!     assert_eq!(
//!         statement.sql(),
//!         "INSERT INTO db.table (`foo`,`bar`,`baz`) VALUES (?,?,?)"
//!     );
//! }
//! # Ok::<(), oxide_grammar::Error>(())
//! ```

pub mod dialect;
pub mod error;
pub mod filter;
pub mod fragment;
pub mod grammar;
pub mod matrix;
pub mod operator;
pub mod schema;
pub mod statement;
pub mod value;

pub use error::{Error, ErrorKind, Result};
pub use filter::{Filter, FilterEntry};
pub use fragment::Fragments;
pub use grammar::{DeleteGrammar, Grammar, InsertGrammar, Order, SelectGrammar, UpdateGrammar};
pub use matrix::ColumnMatrix;
pub use operator::{Connector, NullOperator, Operator, RangeOperator, SimpleOperator};
pub use schema::{Database, Table};
pub use statement::{Statement, StatementContainer};
pub use value::{Argument, Arguments, Value};
