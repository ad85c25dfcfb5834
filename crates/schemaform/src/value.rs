// File: src/value.rs
// Purpose: Raw field values and records

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A record of named field values, either as submitted or as normalized
/// by a successful validation pass.
pub type Record = BTreeMap<String, Value>;

/// A primitive field value as supplied by a form input.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<String>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Loose truthiness, used when a value drives a condition
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Null => false,
        }
    }
}

/// Integral numbers serialize without a fractional part (`5`, not `5.0`)
fn is_integral(n: f64) -> bool {
    n.fract() == 0.0 && n.abs() < 9.0e15
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) if is_integral(*n) => serializer.serialize_i64(*n as i64),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => items.serialize(serializer),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) if is_integral(*n) => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::List(items) => write!(f, "[{}]", items.join(", ")),
            Value::Null => Ok(()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::List(items.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Build a [`Record`] from `name => value` pairs.
///
/// ```
/// use schemaform::{record, Value};
///
/// let r = record! { "firstName" => "Jane", "age" => 16 };
/// assert_eq!(r["age"], Value::Number(16.0));
/// ```
#[macro_export]
macro_rules! record {
    () => { $crate::Record::new() };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::Record::new();
        $( record.insert(::std::string::String::from($name), $crate::Value::from($value)); )+
        record
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_primitives() {
        let record: Record = serde_json::from_str(
            r#"{"a": null, "b": true, "c": 3, "d": "x", "e": ["1", "2"], "f": 2.5}"#,
        )
        .unwrap();

        assert_eq!(record["a"], Value::Null);
        assert_eq!(record["b"], Value::Bool(true));
        assert_eq!(record["c"], Value::Number(3.0));
        assert_eq!(record["d"], Value::String("x".into()));
        assert_eq!(record["e"], Value::List(vec!["1".into(), "2".into()]));
        assert_eq!(record["f"], Value::Number(2.5));
    }

    #[test]
    fn test_integral_numbers_serialize_without_fraction() {
        let json = serde_json::to_string(&record! { "n" => 5, "m" => 2.5 }).unwrap();
        assert_eq!(json, r#"{"m":2.5,"n":5}"#);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Number(16.0).to_string(), "16");
        assert_eq!(Value::from(vec!["1", "2"]).to_string(), "[1, 2]");
        assert_eq!(Value::Null.to_string(), "");
    }
}
