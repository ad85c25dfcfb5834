// File: src/rule.rs
// Purpose: Per-field constraint rules

use crate::error::{ErrorKind, SchemaError};
use crate::message::Message;
use crate::value::{Record, Value};
use chrono::NaiveDate;
use regex::Regex;
use schemaform_validation as check;
use std::fmt;
use std::sync::Arc;

/// Predicate over a field value and the record it belongs to
pub type ValuePredicate = Arc<dyn Fn(&Value, &Record) -> bool + Send + Sync>;

/// The test a [`Rule`] applies to a normalized field value
#[derive(Clone)]
pub enum Check {
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    Integer,
    Positive,
    /// Every regex must match
    Pattern(Vec<Regex>),
    Email,
    OneOf(Vec<String>),
    MinItems(usize),
    MaxItems(usize),
    UniqueItems,
    MinDate(NaiveDate),
    MaxDate(NaiveDate),
    /// Value must equal the named field's normalized value
    EqualsField(String),
    Custom(ValuePredicate),
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::MinLength(n) => write!(f, "MinLength({})", n),
            Check::MaxLength(n) => write!(f, "MaxLength({})", n),
            Check::Min(n) => write!(f, "Min({})", n),
            Check::Max(n) => write!(f, "Max({})", n),
            Check::Integer => f.write_str("Integer"),
            Check::Positive => f.write_str("Positive"),
            Check::Pattern(patterns) => f
                .debug_tuple("Pattern")
                .field(&patterns.iter().map(Regex::as_str).collect::<Vec<_>>())
                .finish(),
            Check::Email => f.write_str("Email"),
            Check::OneOf(values) => f.debug_tuple("OneOf").field(values).finish(),
            Check::MinItems(n) => write!(f, "MinItems({})", n),
            Check::MaxItems(n) => write!(f, "MaxItems({})", n),
            Check::UniqueItems => f.write_str("UniqueItems"),
            Check::MinDate(d) => write!(f, "MinDate({})", d),
            Check::MaxDate(d) => write!(f, "MaxDate({})", d),
            Check::EqualsField(name) => write!(f, "EqualsField({:?})", name),
            Check::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// A check plus the message reported when it fails
#[derive(Debug, Clone)]
pub struct Rule {
    pub check: Check,
    pub message: Message,
}

impl Rule {
    pub fn new(check: Check, message: impl Into<Message>) -> Self {
        Self {
            check,
            message: message.into(),
        }
    }

    pub fn min_length(min: usize, message: impl Into<Message>) -> Self {
        Self::new(Check::MinLength(min), message)
    }

    pub fn max_length(max: usize, message: impl Into<Message>) -> Self {
        Self::new(Check::MaxLength(max), message)
    }

    pub fn min(min: impl Into<f64>, message: impl Into<Message>) -> Self {
        Self::new(Check::Min(min.into()), message)
    }

    pub fn max(max: impl Into<f64>, message: impl Into<Message>) -> Self {
        Self::new(Check::Max(max.into()), message)
    }

    pub fn integer(message: impl Into<Message>) -> Self {
        Self::new(Check::Integer, message)
    }

    pub fn positive(message: impl Into<Message>) -> Self {
        Self::new(Check::Positive, message)
    }

    /// Compile `pattern` into a single-regex rule
    pub fn pattern(pattern: &str, message: impl Into<Message>) -> Result<Self, SchemaError> {
        Self::patterns(&[pattern], message)
    }

    /// Compile several patterns that must all match
    pub fn patterns<S: AsRef<str>>(
        patterns: &[S],
        message: impl Into<Message>,
    ) -> Result<Self, SchemaError> {
        let compiled = patterns
            .iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|source| SchemaError::InvalidPattern {
                    pattern: p.as_ref().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(Check::Pattern(compiled), message))
    }

    /// Rule over already compiled regexes
    pub fn regexes(patterns: Vec<Regex>, message: impl Into<Message>) -> Self {
        Self::new(Check::Pattern(patterns), message)
    }

    pub fn email(message: impl Into<Message>) -> Self {
        Self::new(Check::Email, message)
    }

    pub fn one_of<S: Into<String>>(
        allowed: impl IntoIterator<Item = S>,
        message: impl Into<Message>,
    ) -> Self {
        Self::new(
            Check::OneOf(allowed.into_iter().map(Into::into).collect()),
            message,
        )
    }

    pub fn min_items(min: usize, message: impl Into<Message>) -> Self {
        Self::new(Check::MinItems(min), message)
    }

    pub fn max_items(max: usize, message: impl Into<Message>) -> Self {
        Self::new(Check::MaxItems(max), message)
    }

    pub fn unique_items(message: impl Into<Message>) -> Self {
        Self::new(Check::UniqueItems, message)
    }

    pub fn min_date(min: NaiveDate, message: impl Into<Message>) -> Self {
        Self::new(Check::MinDate(min), message)
    }

    pub fn max_date(max: NaiveDate, message: impl Into<Message>) -> Self {
        Self::new(Check::MaxDate(max), message)
    }

    pub fn equals_field(other: impl Into<String>, message: impl Into<Message>) -> Self {
        Self::new(Check::EqualsField(other.into()), message)
    }

    pub fn custom<F>(predicate: F, message: impl Into<Message>) -> Self
    where
        F: Fn(&Value, &Record) -> bool + Send + Sync + 'static,
    {
        Self::new(Check::Custom(Arc::new(predicate)), message)
    }

    /// Kind of error reported when this rule fails
    pub fn error_kind(&self) -> ErrorKind {
        match self.check {
            Check::EqualsField(_) => ErrorKind::CrossFieldMismatch,
            _ => ErrorKind::ConstraintViolation,
        }
    }

    /// Field this rule reads besides its own, if any
    pub fn referenced_field(&self) -> Option<&str> {
        match &self.check {
            Check::EqualsField(name) => Some(name),
            _ => None,
        }
    }

    /// Evaluate against a normalized value.
    ///
    /// Checks that cannot apply to the value's shape fail rather than pass.
    pub fn passes(&self, value: &Value, record: &Record) -> bool {
        match &self.check {
            Check::MinLength(min) => check::has_min_length(&value.to_string(), *min),
            Check::MaxLength(max) => check::has_max_length(&value.to_string(), *max),
            Check::Min(min) => value.as_number().is_some_and(|n| check::is_at_least(n, *min)),
            Check::Max(max) => value.as_number().is_some_and(|n| check::is_at_most(n, *max)),
            Check::Integer => value.as_number().is_some_and(check::is_integer),
            Check::Positive => value.as_number().is_some_and(check::is_positive),
            Check::Pattern(patterns) => check::matches_all(&value.to_string(), patterns),
            Check::Email => check::is_valid_email(&value.to_string()),
            Check::OneOf(allowed) => check::is_one_of(&value.to_string(), allowed),
            Check::MinItems(min) => value.as_list().is_some_and(|items| check::has_min_items(items, *min)),
            Check::MaxItems(max) => value.as_list().is_some_and(|items| check::has_max_items(items, *max)),
            Check::UniqueItems => value.as_list().is_some_and(check::all_unique),
            Check::MinDate(min) => value
                .as_str()
                .and_then(check::parse_date)
                .is_some_and(|d| check::is_on_or_after(d, *min)),
            Check::MaxDate(max) => value
                .as_str()
                .and_then(check::parse_date)
                .is_some_and(|d| check::is_on_or_before(d, *max)),
            Check::EqualsField(other) => record.get(other).unwrap_or(&Value::Null) == value,
            Check::Custom(predicate) => predicate(value, record),
        }
    }
}

/// Parse a `YYYY-MM-DD` literal used as a rule bound
pub fn parse_date_bound(literal: &str) -> Result<NaiveDate, SchemaError> {
    check::parse_date(literal).ok_or_else(|| SchemaError::InvalidDate(literal.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    #[test]
    fn test_length_rules_count_characters() {
        let rule = Rule::min_length(3, "too short");
        assert!(rule.passes(&Value::from("Joe"), &Record::new()));
        assert!(!rule.passes(&Value::from("Jo"), &Record::new()));
    }

    #[test]
    fn test_numeric_rules_fail_on_non_numbers() {
        let rule = Rule::min(16, "too young");
        assert!(rule.passes(&Value::Number(16.0), &Record::new()));
        assert!(!rule.passes(&Value::Number(15.0), &Record::new()));
        assert!(!rule.passes(&Value::from("16"), &Record::new()));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = Rule::pattern("(unclosed", "bad").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPattern { .. }));
    }

    #[test]
    fn test_equals_field_reads_record() {
        let rule = Rule::equals_field("password", "Passwords don't match");
        let record = record! { "password" => "abc123" };
        assert!(rule.passes(&Value::from("abc123"), &record));
        assert!(!rule.passes(&Value::from("xyz"), &record));
        assert_eq!(rule.error_kind(), ErrorKind::CrossFieldMismatch);
    }

    #[test]
    fn test_date_bounds() {
        let rule = Rule::min_date(parse_date_bound("2024-01-01").unwrap(), "too early");
        assert!(rule.passes(&Value::from("2024-01-01"), &Record::new()));
        assert!(!rule.passes(&Value::from("2023-12-31"), &Record::new()));
        assert!(parse_date_bound("01/01/2024").is_err());
    }

    #[test]
    fn test_custom_rule() {
        let rule = Rule::custom(|v, _| v.as_str() != Some("admin"), "reserved");
        assert!(!rule.passes(&Value::from("admin"), &Record::new()));
        assert!(rule.passes(&Value::from("jane"), &Record::new()));
    }
}
