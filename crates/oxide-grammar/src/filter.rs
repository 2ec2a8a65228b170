//! Boolean filter expressions.
//!
//! A [`Filter`] is a flat, ordered list of conditions, each carrying the
//! connector that joins it to the condition before it. Nested groups are
//! filters of their own. Compilation is a single walk that emits SQL
//! fragments and pushes bound arguments in the same order, so the number of
//! `?` markers always matches the number of arguments.
//!
//! # Example
//!
//! ```rust
//! use oxide_grammar::{Arguments, Filter};
//!
//! let mut filter = Filter::new("and")?;
//! filter
//!     .add_column_filter("foo", "foo")?
//!     .add_column_filter_with("bar", true, ">=", Some("or"))?;
//!
//! let mut arguments = Arguments::new();
//! assert_eq!(filter.compile(&mut arguments), "`foo` = ? OR `bar` >= ?");
//! assert_eq!(arguments.len(), 2);
//! # Ok::<(), oxide_grammar::Error>(())
//! ```

use tracing::trace;

use crate::dialect::{placeholders, quote_identifier};
use crate::error::{Error, Result};
use crate::fragment::Fragments;
use crate::operator::{
    Connector, NullOperator, Operator, RangeOperator, SimpleOperator, standardize_connector,
    standardize_null_operator, standardize_range_operator, standardize_simple_operator,
};
use crate::value::{Argument, Arguments, Value};

/// One condition of a [`Filter`].
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEntry {
    /// `column <op> ?`
    Simple {
        /// Column name.
        column: String,
        /// Bound value.
        value: Argument,
        /// Comparison operator.
        operator: SimpleOperator,
        /// Connector to the previous condition.
        connector: Connector,
    },
    /// `column [NOT] IN (?, ...)`
    Range {
        /// Column name.
        column: String,
        /// Bound values, never empty.
        values: Vec<Argument>,
        /// Membership operator.
        operator: RangeOperator,
        /// Connector to the previous condition.
        connector: Connector,
    },
    /// `column IS [NOT] NULL`
    Null {
        /// Column name.
        column: String,
        /// Null-test operator.
        operator: NullOperator,
        /// Connector to the previous condition.
        connector: Connector,
    },
    /// `(nested)`
    Group {
        /// Nested filter.
        filter: Filter,
        /// Connector to the previous condition.
        connector: Connector,
    },
}

impl FilterEntry {
    /// Returns the connector joining this entry to the previous one.
    #[must_use]
    pub const fn connector(&self) -> Connector {
        match self {
            Self::Simple { connector, .. }
            | Self::Range { connector, .. }
            | Self::Null { connector, .. }
            | Self::Group { connector, .. } => *connector,
        }
    }

    /// Number of arguments this entry binds.
    #[must_use]
    pub fn argument_count(&self) -> usize {
        match self {
            Self::Simple { .. } => 1,
            Self::Range { values, .. } => values.len(),
            Self::Null { .. } => 0,
            Self::Group { filter, .. } => filter.entries.iter().map(Self::argument_count).sum(),
        }
    }

    fn compile_into(&self, fragments: &mut Fragments, arguments: &mut Arguments) {
        match self {
            Self::Simple {
                column,
                value,
                operator,
                connector,
            } => {
                fragments
                    .push(connector.as_str())
                    .push(quote_identifier(column))
                    .push(operator.as_str())
                    .push("?");
                arguments.push_argument(value.clone());
            }
            Self::Range {
                column,
                values,
                operator,
                connector,
            } => {
                fragments
                    .push(connector.as_str())
                    .push(quote_identifier(column))
                    .push(operator.as_str())
                    .push(format!("({})", placeholders(values.len())));
                for value in values {
                    arguments.push_argument(value.clone());
                }
            }
            Self::Null {
                column,
                operator,
                connector,
            } => {
                fragments
                    .push(connector.as_str())
                    .push(quote_identifier(column))
                    .push(operator.as_str());
            }
            Self::Group { filter, connector } => {
                // An empty group must not leave a dangling connector or "()"
                if filter.is_empty() {
                    return;
                }
                let nested = filter.compile(arguments);
                fragments.push(connector.as_str()).push(format!("({nested})"));
            }
        }
    }
}

/// An ordered list of boolean conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    connector: Connector,
    entries: Vec<FilterEntry>,
}

impl Filter {
    /// Creates an empty filter whose conditions default to `connector`.
    pub fn new(connector: impl AsRef<str>) -> Result<Self> {
        Ok(Self::with_connector(standardize_connector(connector)?))
    }

    /// Creates an empty filter with an already normalized connector.
    #[must_use]
    pub const fn with_connector(connector: Connector) -> Self {
        Self {
            connector,
            entries: Vec::new(),
        }
    }

    /// Returns the default connector.
    #[must_use]
    pub const fn connector(&self) -> Connector {
        self.connector
    }

    /// Returns the conditions in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[FilterEntry] {
        &self.entries
    }

    /// Number of top-level conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if compiling would produce no text: there are no
    /// conditions, or every condition is itself an empty group.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|entry| match entry {
            FilterEntry::Group { filter, .. } => filter.is_empty(),
            _ => false,
        })
    }

    fn resolve_connector(&self, connector: Option<&str>) -> Result<Connector> {
        connector.map_or(Ok(self.connector), standardize_connector)
    }

    /// Adds a condition with the default operator (`true`) and connector.
    pub fn add_column_filter(
        &mut self,
        column: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        self.add_column_filter_with(column, value, true, None)
    }

    /// Adds a condition whose kind follows the shape of `value`:
    ///
    /// - a string, number or boolean makes a simple comparison,
    /// - a non-empty list makes an `IN`/`NOT IN` test,
    /// - null makes an `IS NULL`/`IS NOT NULL` test,
    /// - anything else is rejected.
    ///
    /// `operator` is interpreted according to that kind, and `connector`
    /// falls back to the filter's default when `None`.
    pub fn add_column_filter_with(
        &mut self,
        column: impl Into<String>,
        value: impl Into<Value>,
        operator: impl Into<Operator>,
        connector: Option<&str>,
    ) -> Result<&mut Self> {
        let column = column.into();
        let connector = self.resolve_connector(connector)?;
        let entry = match value.into() {
            scalar if scalar.is_scalar() => FilterEntry::Simple {
                operator: standardize_simple_operator(operator)?,
                value: Argument::try_from(scalar)?,
                column,
                connector,
            },
            Value::List(items) => {
                if items.is_empty() {
                    return Err(Error::EmptyRangeValues);
                }
                FilterEntry::Range {
                    operator: standardize_range_operator(operator)?,
                    values: items
                        .into_iter()
                        .map(Argument::try_from)
                        .collect::<Result<_>>()?,
                    column,
                    connector,
                }
            }
            Value::Null => FilterEntry::Null {
                operator: standardize_null_operator(operator)?,
                column,
                connector,
            },
            _ => return Err(Error::InvalidFilterValue(column)),
        };
        Ok(self.push_entry(entry))
    }

    /// Applies [`Filter::add_column_filter_with`] to every pair, in
    /// iteration order.
    pub fn add_column_filters<I, K, V>(
        &mut self,
        filters: I,
        operator: impl Into<Operator>,
        connector: Option<&str>,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let operator = operator.into();
        for (column, value) in filters {
            self.add_column_filter_with(column, value, operator.clone(), connector)?;
        }
        Ok(self)
    }

    /// Builds a nested group and appends it.
    ///
    /// `build` receives a fresh filter whose default connector is
    /// `connector` (or `AND`), independent of this filter's default. The
    /// group is attached only after `build` returns successfully.
    pub fn add_group_filter<F>(&mut self, build: F, connector: Option<&str>) -> Result<&mut Self>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let nested_connector = connector
            .map(standardize_connector)
            .transpose()?
            .unwrap_or_default();
        let entry_connector = self.resolve_connector(connector)?;

        let mut nested = Self::with_connector(nested_connector);
        build(&mut nested)?;

        Ok(self.push_entry(FilterEntry::Group {
            filter: nested,
            connector: entry_connector,
        }))
    }

    /// Adds `column = value` with the default connector.
    pub fn equals(&mut self, column: impl Into<String>, value: impl Into<Value>) -> Result<&mut Self> {
        let column = column.into();
        let value = value.into();
        if !value.is_scalar() {
            return Err(Error::InvalidFilterValue(column));
        }
        self.add_column_filter_with(column, value, SimpleOperator::Eq, None)
    }

    /// Adds `column IN (values...)` with the default connector.
    pub fn within<I, V>(&mut self, column: impl Into<String>, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.add_column_filter_with(column, Value::List(values), RangeOperator::In, None)
    }

    /// Adds `column IS NULL` with the default connector.
    pub fn is_null(&mut self, column: impl Into<String>) -> &mut Self {
        let connector = self.connector;
        self.push_entry(FilterEntry::Null {
            column: column.into(),
            operator: NullOperator::IsNull,
            connector,
        })
    }

    /// Appends an already validated condition.
    pub fn push_entry(&mut self, entry: FilterEntry) -> &mut Self {
        trace!(entry = ?entry, "Adding filter entry");
        self.entries.push(entry);
        self
    }

    /// Compiles the filter into a boolean expression, pushing bound values
    /// into `arguments` in placeholder order.
    ///
    /// The receiver is not modified: compiling twice with fresh argument
    /// lists yields the same text and the same arguments.
    #[must_use]
    pub fn compile(&self, arguments: &mut Arguments) -> String {
        let mut fragments = Fragments::new();
        for entry in &self.entries {
            entry.compile_into(&mut fragments, arguments);
        }
        // The first connector has nothing to join to
        fragments.pop();
        fragments.assemble()
    }
}
