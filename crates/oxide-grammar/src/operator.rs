//! Operator and connector normalization.
//!
//! Callers may spell an operator as a short alias (`eq`, `neq`, `?=`, `~=`,
//! ...) or as a boolean shorthand whose meaning depends on the kind of
//! condition it is attached to. These functions map every accepted spelling
//! to one canonical SQL keyword and reject everything else. Filters call
//! them eagerly so a malformed token fails when the condition is added.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// An operator as supplied by a caller: either a boolean shorthand or a
/// textual alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    /// `true` selects the positive form (`=`, `IN`, `IS NULL`), `false` the
    /// negated one.
    Flag(bool),
    /// A textual alias such as `">="` or `"notlike"`.
    Token(String),
}

impl Default for Operator {
    fn default() -> Self {
        Self::Flag(true)
    }
}

impl From<bool> for Operator {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl From<&str> for Operator {
    fn from(token: &str) -> Self {
        Self::Token(String::from(token))
    }
}

impl From<String> for Operator {
    fn from(token: String) -> Self {
        Self::Token(token)
    }
}

impl From<SimpleOperator> for Operator {
    fn from(op: SimpleOperator) -> Self {
        Self::Token(String::from(op.as_str()))
    }
}

impl From<RangeOperator> for Operator {
    fn from(op: RangeOperator) -> Self {
        Self::Flag(op == RangeOperator::In)
    }
}

impl From<NullOperator> for Operator {
    fn from(op: NullOperator) -> Self {
        Self::Flag(op == NullOperator::IsNull)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Token(token) => f.write_str(token),
        }
    }
}

/// Lowercases and collapses inner whitespace so `"NOT  LIKE"` and
/// `"not like"` compare equal.
fn canonical_token(token: &str) -> String {
    token
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

/// Comparison operator of a single-value condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleOperator {
    /// `=`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
    /// `REGEXP`
    Regexp,
    /// `NOT REGEXP`
    NotRegexp,
}

impl SimpleOperator {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::Regexp => "REGEXP",
            Self::NotRegexp => "NOT REGEXP",
        }
    }
}

impl FromStr for SimpleOperator {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        match canonical_token(token).as_str() {
            "=" | "eq" => Ok(Self::Eq),
            "!=" | "<>" | "neq" => Ok(Self::NotEq),
            "<" | "lt" => Ok(Self::Lt),
            "<=" | "lte" => Ok(Self::LtEq),
            ">" | "gt" => Ok(Self::Gt),
            ">=" | "gte" => Ok(Self::GtEq),
            "like" | "?=" => Ok(Self::Like),
            "notlike" | "not like" => Ok(Self::NotLike),
            "regexp" | "~=" => Ok(Self::Regexp),
            "notregexp" | "not regexp" => Ok(Self::NotRegexp),
            _ => Err(Error::InvalidSimpleOperator(String::from(token))),
        }
    }
}

impl fmt::Display for SimpleOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership operator of a multi-value condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOperator {
    /// `IN`
    In,
    /// `NOT IN`
    NotIn,
}

impl RangeOperator {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }
}

impl FromStr for RangeOperator {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        match canonical_token(token).as_str() {
            "in" => Ok(Self::In),
            "notin" | "not in" => Ok(Self::NotIn),
            _ => Err(Error::InvalidRangeOperator(String::from(token))),
        }
    }
}

impl fmt::Display for RangeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Null-test operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOperator {
    /// `IS NULL`
    IsNull,
    /// `IS NOT NULL`
    IsNotNull,
}

impl NullOperator {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
        }
    }
}

impl fmt::Display for NullOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean connector joining a condition to the one before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Connector {
    /// `AND`
    #[default]
    And,
    /// `OR`
    Or,
}

impl Connector {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl AsRef<str> for Connector {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Connector {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        if token.eq_ignore_ascii_case("and") {
            Ok(Self::And)
        } else if token.eq_ignore_ascii_case("or") {
            Ok(Self::Or)
        } else {
            Err(Error::InvalidConnector(String::from(token)))
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes the operator of a single-value condition.
///
/// `true` maps to `=`, `false` to `!=`; tokens must be a known alias.
pub fn standardize_simple_operator(operator: impl Into<Operator>) -> Result<SimpleOperator> {
    match operator.into() {
        Operator::Flag(true) => Ok(SimpleOperator::Eq),
        Operator::Flag(false) => Ok(SimpleOperator::NotEq),
        Operator::Token(token) => token.parse(),
    }
}

/// Normalizes the operator of a multi-value condition.
///
/// `true`/`"in"` map to `IN`, `false`/`"notin"` to `NOT IN`.
pub fn standardize_range_operator(operator: impl Into<Operator>) -> Result<RangeOperator> {
    match operator.into() {
        Operator::Flag(true) => Ok(RangeOperator::In),
        Operator::Flag(false) => Ok(RangeOperator::NotIn),
        Operator::Token(token) => token.parse(),
    }
}

/// Normalizes the operator of a null test. Only booleans are accepted.
pub fn standardize_null_operator(operator: impl Into<Operator>) -> Result<NullOperator> {
    match operator.into() {
        Operator::Flag(true) => Ok(NullOperator::IsNull),
        Operator::Flag(false) => Ok(NullOperator::IsNotNull),
        Operator::Token(token) => Err(Error::InvalidNullOperator(token)),
    }
}

/// Normalizes a connector token, case-insensitively.
pub fn standardize_connector(token: impl AsRef<str>) -> Result<Connector> {
    token.as_ref().parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_operator_flags() {
        assert_eq!(standardize_simple_operator(true), Ok(SimpleOperator::Eq));
        assert_eq!(standardize_simple_operator(false), Ok(SimpleOperator::NotEq));
    }

    #[test]
    fn test_simple_operator_aliases() {
        let cases = [
            ("=", "="),
            ("eq", "="),
            ("!=", "!="),
            ("neq", "!="),
            ("<>", "!="),
            ("<", "<"),
            ("<=", "<="),
            (">", ">"),
            (">=", ">="),
            ("like", "LIKE"),
            ("?=", "LIKE"),
            ("notlike", "NOT LIKE"),
            ("regexp", "REGEXP"),
            ("~=", "REGEXP"),
            ("notregexp", "NOT REGEXP"),
            ("NOT LIKE", "NOT LIKE"),
        ];
        for (token, keyword) in cases {
            assert_eq!(
                standardize_simple_operator(token).map(SimpleOperator::as_str),
                Ok(keyword),
                "token {token}"
            );
        }
    }

    #[test]
    fn test_simple_operator_invalid() {
        assert_eq!(
            standardize_simple_operator("=="),
            Err(Error::InvalidSimpleOperator(String::from("==")))
        );
    }

    #[test]
    fn test_range_operator() {
        assert_eq!(standardize_range_operator(true), Ok(RangeOperator::In));
        assert_eq!(standardize_range_operator(false), Ok(RangeOperator::NotIn));
        assert_eq!(standardize_range_operator("in"), Ok(RangeOperator::In));
        assert_eq!(standardize_range_operator("notin"), Ok(RangeOperator::NotIn));
        assert!(standardize_range_operator("=").is_err());
    }

    #[test]
    fn test_null_operator() {
        assert_eq!(standardize_null_operator(true), Ok(NullOperator::IsNull));
        assert_eq!(
            standardize_null_operator(false),
            Ok(NullOperator::IsNotNull)
        );
        assert_eq!(
            standardize_null_operator("="),
            Err(Error::InvalidNullOperator(String::from("=")))
        );
    }

    #[test]
    fn test_connector() {
        assert_eq!(standardize_connector("and"), Ok(Connector::And));
        assert_eq!(standardize_connector("OR"), Ok(Connector::Or));
        assert_eq!(standardize_connector("Or"), Ok(Connector::Or));
        assert_eq!(standardize_connector(Connector::And), Ok(Connector::And));
        assert_eq!(
            standardize_connector("xor"),
            Err(Error::InvalidConnector(String::from("xor")))
        );
    }

    #[test]
    fn test_typed_operators_round_trip_through_operator() {
        assert_eq!(
            standardize_simple_operator(SimpleOperator::NotRegexp),
            Ok(SimpleOperator::NotRegexp)
        );
        assert_eq!(
            standardize_range_operator(RangeOperator::NotIn),
            Ok(RangeOperator::NotIn)
        );
        assert_eq!(
            standardize_null_operator(NullOperator::IsNotNull),
            Ok(NullOperator::IsNotNull)
        );
    }
}
