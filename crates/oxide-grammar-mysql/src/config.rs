//! Executor configuration.

use serde::Deserialize;

/// Connection settings for [`StatementExecutor`](crate::StatementExecutor).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// MySQL connection string.
    pub database_url: String,
    /// Maximum pool size.
    pub max_connections: u32,
    /// Print statements instead of executing them.
    pub dry_run: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            database_url: String::from("mysql://root@localhost:3306"),
            max_connections: 5,
            dry_run: false,
        }
    }
}

impl ExecutorConfig {
    /// Creates a configuration for `database_url` with default settings.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Self::default()
        }
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Enables dry-run mode.
    #[must_use]
    pub const fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }
}
