//! MySQL dialect implementation.

use super::Dialect;

/// MySQL dialect: backtick-quoted identifiers and `?` placeholders.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_dialect() {
        let dialect = MySqlDialect::new();
        assert_eq!(dialect.name(), "mysql");
        assert_eq!(dialect.identifier_quote(), '`');
        assert_eq!(dialect.parameter_placeholder(), "?");
    }

    #[test]
    fn test_quote_identifier_escapes_backticks() {
        let dialect = MySqlDialect::new();
        assert_eq!(dialect.quote_identifier("name"), "`name`");
        assert_eq!(dialect.quote_identifier("we`ird"), "`we``ird`");
    }

    #[test]
    fn test_quote_identifier_if_needed() {
        let dialect = MySqlDialect::new();
        assert_eq!(dialect.quote_identifier_if_needed("db"), "db");
        assert_eq!(dialect.quote_identifier_if_needed("my_table2"), "my_table2");
        assert_eq!(dialect.quote_identifier_if_needed("my-db"), "`my-db`");
        assert_eq!(dialect.quote_identifier_if_needed("1st"), "`1st`");
        assert_eq!(dialect.quote_identifier_if_needed(""), "``");
    }
}
