// File: src/error.rs
// Purpose: Field error taxonomy and schema construction errors

use crate::message::{Message, Translate};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// Empty value in a field that is always required
    RequiredMissing,
    /// Input could not be read as the field's kind (e.g. "abc" for a number)
    TypeMismatch,
    /// Length, range, pattern, membership, cardinality or date bound failed
    ConstraintViolation,
    /// Disagreement with another field (e.g. password confirmation)
    CrossFieldMismatch,
    /// Empty value in a field required because of a sibling field's state
    ConditionalRequirement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: Message,
}

impl FieldError {
    pub fn new(kind: ErrorKind, message: impl Into<Message>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// One error per offending field, keyed by field path
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error for `field`, replacing any earlier one
    pub fn insert(&mut self, field: impl Into<String>, error: FieldError) {
        self.0.insert(field.into(), error);
    }

    /// Set the error for `field` unless it already has one.
    /// Returns whether the error was recorded.
    pub fn insert_if_absent(&mut self, field: impl Into<String>, error: FieldError) -> bool {
        let field = field.into();
        if self.0.contains_key(&field) {
            return false;
        }
        self.0.insert(field, error);
        true
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    /// Message identifier of the error on `field`
    pub fn message(&self, field: &str) -> Option<&str> {
        self.get(field).map(|e| e.message.id())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldError> {
        self.0.remove(field)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|field, _| keep(field));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Display text per field, resolving translation keys
    pub fn render(&self, translator: &dyn Translate) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(field, error)| (field.clone(), error.message.render(translator)))
            .collect()
    }
}

impl IntoIterator for FieldErrors {
    type Item = (String, FieldError);
    type IntoIter = std::collections::btree_map::IntoIter<String, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Errors raised while building a schema, before any record is validated
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid value `{value}` for parameter `{name}`: {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("missing parameter `{0}`")]
    MissingParameter(String),

    #[error("duplicate field `{0}`")]
    DuplicateField(String),

    #[error("`{field}` refers to `{referenced}`, which is not a field of this schema")]
    UnknownField { field: String, referenced: String },

    #[error("failed to parse schema document: {0}")]
    Document(String),
}
