//! Statement executor.
//!
//! This module binds compiled statements to a MySQL connection pool. Each
//! argument is bound to its placeholder in order; connection handling and
//! transactions live here, never in the grammar crate.

use oxide_grammar::{Argument, Statement, StatementContainer};
use sqlx::mysql::{MySqlArguments, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column, MySql, Row};
use tracing::{debug, info};

use crate::config::ExecutorConfig;
use crate::error::{ExecuteError, Result};

/// Runs statement containers against MySQL.
pub struct StatementExecutor {
    pool: Option<MySqlPool>,
}

impl StatementExecutor {
    /// Creates an executor over an existing pool.
    #[must_use]
    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool: Some(pool) }
    }

    /// Creates an executor that prints statements instead of running them.
    #[must_use]
    pub const fn dry_run() -> Self {
        Self { pool: None }
    }

    /// Connects according to `config`. Dry-run configurations never open a
    /// connection.
    pub async fn connect(config: &ExecutorConfig) -> Result<Self> {
        if config.dry_run {
            info!("Dry run mode - SQL will be printed but not executed.");
            return Ok(Self::dry_run());
        }
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Returns whether statements are only printed.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.pool.is_none()
    }

    /// Executes every statement of `container` in FIFO order inside one
    /// transaction and returns the total number of affected rows.
    pub async fn execute(&self, mut container: StatementContainer) -> Result<u64> {
        info!(statements = container.len(), "Executing statements");

        let Some(pool) = &self.pool else {
            while let Ok(statement) = container.pop() {
                println!("{}", render(&statement));
            }
            return Ok(0);
        };

        let mut tx = pool.begin().await?;
        let mut affected = 0;
        while let Ok(statement) = container.pop() {
            debug!(sql = %statement.sql(), arguments = ?statement.arguments(), "Executing SQL");
            let result = bind(&statement).execute(&mut *tx).await?;
            affected += result.rows_affected();
        }
        tx.commit().await?;

        info!(affected, "Statements executed successfully");
        Ok(affected)
    }

    /// Runs a single-statement container and returns its rows as JSON
    /// objects keyed by column name.
    pub async fn fetch_all(
        &self,
        mut container: StatementContainer,
    ) -> Result<Vec<serde_json::Map<String, serde_json::Value>>> {
        if container.len() != 1 {
            return Err(ExecuteError::MultipleStatements(container.len()));
        }
        let statement = container.pop()?;

        let Some(pool) = &self.pool else {
            println!("{}", render(&statement));
            return Ok(Vec::new());
        };

        debug!(sql = %statement.sql(), arguments = ?statement.arguments(), "Fetching rows");
        let rows = bind(&statement).fetch_all(pool).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }
}

/// Prepares `statement` and binds its arguments in placeholder order.
fn bind(statement: &Statement) -> Query<'_, MySql, MySqlArguments> {
    statement
        .arguments()
        .iter()
        .fold(sqlx::query(statement.sql()), |query, argument| match argument {
            Argument::Text(s) => query.bind(s.as_str()),
            Argument::Int(n) => query.bind(*n),
            Argument::UInt(n) => query.bind(*n),
            Argument::Float(f) => query.bind(*f),
        })
}

/// Formats a statement as `sql; -- [arguments]` for dry runs.
#[must_use]
pub fn render(statement: &Statement) -> String {
    let arguments =
        serde_json::to_string(statement.arguments()).unwrap_or_else(|_| String::from("[]"));
    format!("{}; -- {arguments}", statement.sql())
}

fn row_to_json(row: &MySqlRow) -> serde_json::Map<String, serde_json::Value> {
    row.columns()
        .iter()
        .map(|column| {
            let idx = column.ordinal();
            (String::from(column.name()), column_to_json(row, idx))
        })
        .collect()
}

fn column_to_json(row: &MySqlRow, idx: usize) -> serde_json::Value {
    if let Ok(value) = row.try_get::<Option<i64>, _>(idx) {
        return value.map_or(serde_json::Value::Null, Into::into);
    }
    if let Ok(value) = row.try_get::<Option<u64>, _>(idx) {
        return value.map_or(serde_json::Value::Null, Into::into);
    }
    if let Ok(value) = row.try_get::<Option<f64>, _>(idx) {
        return value.map_or(serde_json::Value::Null, Into::into);
    }
    if let Ok(value) = row.try_get::<Option<String>, _>(idx) {
        return value.map_or(serde_json::Value::Null, Into::into);
    }
    if let Ok(value) = row.try_get::<Option<Vec<u8>>, _>(idx) {
        return value.map_or(serde_json::Value::Null, |bytes| {
            String::from_utf8_lossy(&bytes).into_owned().into()
        });
    }
    serde_json::Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_grammar::{Database, DeleteGrammar, Grammar, InsertGrammar};

    #[test]
    fn test_render() {
        let table = Database::new("db").table("users");
        let mut delete = DeleteGrammar::new(&table);
        delete.filter_mut().add_column_filter("id", vec![1, 2]).unwrap();
        let statement = delete.compile().unwrap().pop().unwrap();

        assert_eq!(
            render(&statement),
            "DELETE FROM db.users WHERE `id` IN (?,?); -- [1,2]"
        );
    }

    #[test]
    fn test_render_unsigned_id() {
        let table = Database::new("db").table("users");
        let mut delete = DeleteGrammar::new(&table);
        delete.filter_mut().add_column_filter("id", u64::MAX).unwrap();
        let statement = delete.compile().unwrap().pop().unwrap();

        assert_eq!(
            render(&statement),
            "DELETE FROM db.users WHERE `id` = ?; -- [18446744073709551615]"
        );
    }

    #[tokio::test]
    async fn test_dry_run_execute_consumes_container() {
        let table = Database::new("db").table("users");
        let container = InsertGrammar::new(&table)
            .column("name", vec!["a", "b"])
            .compile()
            .unwrap();

        let executor = StatementExecutor::dry_run();
        assert!(executor.is_dry_run());
        assert_eq!(executor.execute(container).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_fetch_all_requires_single_statement() {
        let table = Database::new("db").table("users");
        let container = InsertGrammar::new(&table)
            .column("name", vec!["a", "b"])
            .compile()
            .unwrap();

        let err = StatementExecutor::dry_run()
            .fetch_all(container)
            .await
            .unwrap_err();
        assert!(matches!(err, ExecuteError::MultipleStatements(2)));
    }

    #[test]
    fn test_connect_dry_run_skips_database() {
        let config = ExecutorConfig::new("mysql://unused").dry_run(true);
        let executor = tokio_test::block_on(StatementExecutor::connect(&config)).unwrap();
        assert!(executor.is_dry_run());
    }
}
