//! Caller-facing values and bound statement arguments.
//!
//! [`Value`] is what builders accept. [`Argument`] is what ends up bound to
//! a `?` placeholder: the MySQL bind API only knows strings and numbers, so
//! every value is coerced on its way into an [`Arguments`] list.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};

/// A dynamically shaped value handed to a filter, an insert column, or an
/// argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Unsigned integer beyond the signed range, e.g. a `BIGINT UNSIGNED` id.
    UInt(u64),
    /// Float.
    Float(f64),
    /// Text.
    Text(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Composite object. Never bindable.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns true for strings, numbers and booleans.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool(_) | Self::Int(_) | Self::UInt(_) | Self::Float(_) | Self::Text(_)
        )
    }

    /// Short name of the value's shape, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )+
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::UInt(value), Self::Int)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::from(value as u64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>, const N: usize> From<[T; N]> for Value {
    fn from(values: [T; N]) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Self>> From<&[T]> for Value {
    fn from(values: &[T]) -> Self {
        Self::List(values.iter().cloned().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Self>> for Value {
    fn from(map: BTreeMap<String, Self>) -> Self {
        Self::Map(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// A value bound to a placeholder: only strings and numbers survive
/// coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Argument {
    /// Text argument.
    Text(String),
    /// Integer argument (booleans land here as 1/0).
    Int(i64),
    /// Unsigned integer argument above `i64::MAX`.
    UInt(u64),
    /// Float argument.
    Float(f64),
}

impl TryFrom<Value> for Argument {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(Self::Text(s)),
            Value::Int(n) => Ok(Self::Int(n)),
            Value::UInt(n) => Ok(Self::UInt(n)),
            Value::Float(f) => Ok(Self::Float(f)),
            Value::Bool(b) => Ok(Self::Int(i64::from(b))),
            Value::Null => Ok(Self::Text(String::new())),
            other @ (Value::List(_) | Value::Map(_)) => Err(Error::InvalidBindingParameter(
                String::from(other.type_name()),
            )),
        }
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<i64> for Argument {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// Ordered, append-only list of bound arguments, consumed positionally by
/// the placeholders of a statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Arguments {
    values: Vec<Argument>,
}

impl Arguments {
    /// Creates an empty argument list.
    #[must_use]
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Coerces and appends a value.
    ///
    /// Lists are flattened exactly one level: each element is coerced on
    /// its own, and a nested list or a map is rejected. Nothing is appended
    /// when any element fails.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        match value.into() {
            Value::List(items) => {
                let coerced = items
                    .into_iter()
                    .map(Argument::try_from)
                    .collect::<Result<Vec<_>>>()?;
                self.values.extend(coerced);
            }
            other => self.values.push(Argument::try_from(other)?),
        }
        Ok(self)
    }

    /// Appends an already coerced argument.
    pub fn push_argument(&mut self, argument: Argument) -> &mut Self {
        self.values.push(argument);
        self
    }

    /// Coerces and appends every value in order.
    pub fn extend<I, V>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        for value in values {
            self.push(value)?;
        }
        Ok(self)
    }

    /// Number of bound arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the arguments in placeholder order.
    pub fn iter(&self) -> std::slice::Iter<'_, Argument> {
        self.values.iter()
    }

    /// Returns the arguments as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Argument] {
        &self.values
    }

    /// Consumes the list and returns the arguments.
    #[must_use]
    pub fn into_vec(self) -> Vec<Argument> {
        self.values
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a Argument;
    type IntoIter = std::slice::Iter<'a, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl TryFrom<Vec<Value>> for Arguments {
    type Error = Error;

    fn try_from(values: Vec<Value>) -> Result<Self> {
        let mut arguments = Self::new();
        arguments.extend(values)?;
        Ok(arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_scalars() {
        let mut args = Arguments::new();
        args.push("foo").unwrap().push(42).unwrap().push(2.5).unwrap();
        assert_eq!(
            args.as_slice(),
            &[
                Argument::Text(String::from("foo")),
                Argument::Int(42),
                Argument::Float(2.5)
            ]
        );
    }

    #[test]
    fn test_push_bool_and_null() {
        let mut args = Arguments::new();
        args.push(true).unwrap();
        args.push(false).unwrap();
        args.push(Value::Null).unwrap();
        assert_eq!(
            args.as_slice(),
            &[
                Argument::Int(1),
                Argument::Int(0),
                Argument::Text(String::new())
            ]
        );
    }

    #[test]
    fn test_push_list_flattens_one_level() {
        let mut args = Arguments::new();
        args.push(vec![
            Value::from("a"),
            Value::from(100),
            Value::from(true),
            Value::Null,
        ])
        .unwrap();
        assert_eq!(
            args.as_slice(),
            &[
                Argument::from("a"),
                Argument::Int(100),
                Argument::Int(1),
                Argument::Text(String::new())
            ]
        );
    }

    #[test]
    fn test_push_nested_list_rejected() {
        let mut args = Arguments::new();
        let err = args
            .push(Value::List(vec![Value::from(1), Value::from(vec![2, 3])]))
            .unwrap_err();
        assert_eq!(err, Error::InvalidBindingParameter(String::from("list")));
        // Nothing from the failed list leaks into the arguments
        assert!(args.is_empty());
    }

    #[test]
    fn test_push_map_rejected() {
        let mut args = Arguments::new();
        let err = args.push(Value::Map(BTreeMap::new())).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Argument);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text(String::from("x")));
    }

    #[test]
    fn test_json_conversion() {
        let json = serde_json::json!({"a": [1, "b", null], "c": 1.5});
        let Value::Map(map) = Value::from(json) else {
            panic!("expected map");
        };
        assert_eq!(
            map["a"],
            Value::List(vec![Value::Int(1), Value::from("b"), Value::Null])
        );
        assert_eq!(map["c"], Value::Float(1.5));
    }

    #[test]
    fn test_json_unsigned_keeps_exact_value() {
        let value = Value::from(serde_json::json!(18_446_744_073_709_551_615_u64));
        assert_eq!(value, Value::UInt(u64::MAX));

        let mut args = Arguments::new();
        args.push(value).unwrap();
        assert_eq!(args.as_slice(), &[Argument::UInt(u64::MAX)]);
        assert_eq!(
            serde_json::to_string(&args).unwrap(),
            "[18446744073709551615]"
        );
    }

    #[test]
    fn test_unsigned_conversion() {
        assert_eq!(Value::from(7_u64), Value::Int(7));
        assert_eq!(Value::from(3_usize), Value::Int(3));
        assert_eq!(Value::from(u64::MAX), Value::UInt(u64::MAX));
        assert!(Value::from(u64::MAX).is_scalar());
    }

    #[test]
    fn test_arguments_serialize_untagged() {
        let mut args = Arguments::new();
        args.push("foo").unwrap().push(true).unwrap();
        assert_eq!(serde_json::to_string(&args).unwrap(), r#"["foo",1]"#);
    }
}
