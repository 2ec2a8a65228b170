//! MySQL execution for `oxide-grammar` statements.
//!
//! `oxide-grammar` compiles builders into statement containers but never
//! touches a connection. This crate is the other side of that boundary:
//!
//! - **Executor** - binds each statement's arguments in placeholder order
//!   and runs the container inside one transaction
//! - **Config** - pool and dry-run settings
//! - **Request** - builds grammars from JSON-shaped input, used by the
//!   `oxide-grammar` command-line tool
//!
//! # Example
//!
//! ```rust,ignore
//! use oxide_grammar::{Database, Grammar, InsertGrammar};
//! use oxide_grammar_mysql::{ExecutorConfig, StatementExecutor};
//!
//! let table = Database::new("shop").table("orders");
//! let statements = InsertGrammar::new(&table)
//!     .column("customer_id", 42)
//!     .column("sku", vec!["A-1", "B-2"])
//!     .compile()?;
//!
//! let executor = StatementExecutor::connect(&ExecutorConfig::new("mysql://app@localhost/shop")).await?;
//! let inserted = executor.execute(statements).await?;
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod request;

pub use config::ExecutorConfig;
pub use error::{ExecuteError, Result};
pub use executor::StatementExecutor;
pub use request::{Request, RequestKind};
