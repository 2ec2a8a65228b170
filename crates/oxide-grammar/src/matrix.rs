//! Column-major insert data and its conversion to rows.
//!
//! Insert values are collected per column, and columns may grow to different
//! lengths. [`matrixize`] pads every short column by repeating its own last
//! value, which lets a single-value column act as a constant for every row.
//! [`transpose`] then turns the padded columns into rows.

use crate::value::Value;

/// Insert data keyed by column, in first-set order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMatrix {
    columns: Vec<(String, Vec<Value>)>,
}

impl ColumnMatrix {
    /// Creates an empty matrix.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Appends values to a column, creating it on first use.
    ///
    /// A list contributes each of its elements; any other value, null
    /// included, contributes itself.
    pub fn set_column(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let values = match value.into() {
            Value::List(items) => items,
            other => vec![other],
        };
        let name = name.into();
        match self.columns.iter_mut().find(|(column, _)| *column == name) {
            Some((_, existing)) => existing.extend(values),
            None => self.columns.push((name, values)),
        }
        self
    }

    /// Returns the column names in first-set order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the values collected for `name`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Returns the columns with their values.
    #[must_use]
    pub fn columns(&self) -> &[(String, Vec<Value>)] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if no column was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Pads every column to the length of the longest one by repeating its
/// last value.
///
/// A column set to an empty list has nothing to repeat and stays empty;
/// [`transpose`] then treats it as null.
#[must_use]
pub fn matrixize(columns: &[(String, Vec<Value>)]) -> Vec<Vec<Value>> {
    let max = columns
        .iter()
        .map(|(_, values)| values.len())
        .max()
        .unwrap_or(0);

    columns
        .iter()
        .map(|(_, values)| {
            let mut padded = values.clone();
            if let Some(last) = values.last() {
                padded.resize(max, last.clone());
            }
            padded
        })
        .collect()
}

/// Converts padded columns into rows, keeping column order inside each row.
#[must_use]
pub fn transpose(columns: &[Vec<Value>]) -> Vec<Vec<Value>> {
    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
    (0..rows)
        .map(|row| {
            columns
                .iter()
                .map(|column| column.get(row).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect()
}
