//! Error types for statement compilation.

use thiserror::Error;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied an invalid builder shape (operator, connector,
    /// filter value, insert data, whitelist violation).
    Grammar,
    /// A value could not be coerced into a bound argument.
    Argument,
    /// A container underflowed.
    Runtime,
}

/// Errors raised while building or compiling statements.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Unknown comparison operator token.
    #[error("invalid simple operator: {0}")]
    InvalidSimpleOperator(String),

    /// Unknown range operator token.
    #[error("invalid range operator: {0}")]
    InvalidRangeOperator(String),

    /// Null conditions only accept a boolean operator.
    #[error("invalid null operator: {0}")]
    InvalidNullOperator(String),

    /// Unknown boolean connector token.
    #[error("invalid connector: {0}")]
    InvalidConnector(String),

    /// Unknown ORDER BY direction.
    #[error("invalid sort order: {0}")]
    InvalidOrder(String),

    /// A range (`IN`) condition was given no values.
    #[error("range condition values can not be empty")]
    EmptyRangeValues,

    /// A filter value was neither scalar, list, nor null.
    #[error("invalid filter value for column `{0}`")]
    InvalidFilterValue(String),

    /// An INSERT was compiled without any column data.
    #[error("insert column data can not be empty")]
    EmptyInsertData,

    /// An UPDATE was compiled without any assignment.
    #[error("update column data can not be empty")]
    EmptyUpdateData,

    /// An UPDATE assignment was not a scalar or null.
    #[error("invalid update value for column `{0}`")]
    InvalidUpdateValue(String),

    /// A column is not part of the table's declared fields.
    #[error("column `{column}` is not declared on table {table}")]
    UnknownColumn {
        /// Qualified table name.
        table: String,
        /// Offending column.
        column: String,
    },

    /// Placeholder and argument counts disagree.
    #[error("statement has {placeholders} placeholders but {arguments} arguments")]
    PlaceholderMismatch {
        /// Number of `?` markers in the SQL text.
        placeholders: usize,
        /// Number of bound arguments.
        arguments: usize,
    },

    /// A value of unsupported shape was bound.
    #[error("invalid binding parameter: {0}")]
    InvalidBindingParameter(String),

    /// Popped from an empty statement container.
    #[error("no statement available")]
    NoStatementAvailable,
}

impl Error {
    /// Returns the taxonomy bucket this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidBindingParameter(_) => ErrorKind::Argument,
            Self::NoStatementAvailable => ErrorKind::Runtime,
            _ => ErrorKind::Grammar,
        }
    }
}

/// Result type alias for grammar operations.
pub type Result<T> = std::result::Result<T, Error>;
