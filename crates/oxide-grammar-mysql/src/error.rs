//! Error types for statement execution.

/// Errors that can occur while running compiled statements.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    /// Statement compilation failed.
    #[error("Grammar error: {0}")]
    Grammar(#[from] oxide_grammar::Error),

    /// Database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A query expecting rows was given a container with more than one
    /// statement.
    #[error("Expected a single statement, got {0}")]
    MultipleStatements(usize),

    /// A request could not be turned into a grammar.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for execution operations.
pub type Result<T> = std::result::Result<T, ExecuteError>;
