//! SQL dialect support.
//!
//! Only the MySQL quoting and placeholder conventions are implemented. The
//! trait keeps those conventions in one place so grammars never hard-code a
//! quote character.

mod mysql;

pub use mysql::MySqlDialect;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char;

    /// Returns the parameter placeholder.
    fn parameter_placeholder(&self) -> &'static str {
        "?"
    }

    /// Quotes an identifier, doubling any embedded quote character.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let escaped = name.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }

    /// Quotes an identifier only when it is not a plain identifier
    /// (ASCII letters, digits, `_` and `$`, not starting with a digit).
    fn quote_identifier_if_needed(&self, name: &str) -> String {
        let plain = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if plain {
            String::from(name)
        } else {
            self.quote_identifier(name)
        }
    }

    /// Returns `count` placeholders separated by commas, e.g. `?,?,?`.
    fn placeholders(&self, count: usize) -> String {
        vec![self.parameter_placeholder(); count].join(",")
    }

    /// Counts the placeholders in `sql`, ignoring any that appear inside
    /// quoted identifiers.
    fn count_placeholders(&self, sql: &str) -> usize {
        let quote = self.identifier_quote();
        let placeholder = self.parameter_placeholder();
        let mut quoted = false;
        let mut count = 0;
        for (idx, c) in sql.char_indices() {
            if c == quote {
                quoted = !quoted;
            } else if !quoted && sql[idx..].starts_with(placeholder) {
                count += 1;
            }
        }
        count
    }
}

/// Quotes an identifier with MySQL backticks.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    MySqlDialect.quote_identifier(name)
}

/// Returns `count` MySQL placeholders separated by commas.
#[must_use]
pub fn placeholders(count: usize) -> String {
    MySqlDialect.placeholders(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(3), "?,?,?");
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(0), "");
    }

    #[test]
    fn test_count_placeholders_skips_quoted_identifiers() {
        let dialect = MySqlDialect::new();
        assert_eq!(dialect.count_placeholders("`a?b` = ? AND `c` IN (?,?)"), 3);
        assert_eq!(dialect.count_placeholders("DELETE FROM db.t"), 0);
    }
}
