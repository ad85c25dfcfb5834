// File: src/session.rs
// Purpose: Form state for a render loop: values, touched fields, errors

use crate::engine::{self, ValidationResult};
use crate::error::{FieldError, FieldErrors};
use crate::schema::FormSchema;
use crate::value::{Record, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// When a session re-validates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// Validate on submit; once submitted, every change re-validates
    #[default]
    OnSubmit,
    /// Also re-validate touched fields on every change
    OnChange,
}

/// Validation started from a snapshot of the session.
///
/// Run it anywhere, then hand the result back with
/// [`FormSession::complete`]; results from superseded requests are dropped.
#[derive(Debug, Clone)]
pub struct PendingValidation<S> {
    seq: u64,
    schema: Arc<S>,
    values: Record,
}

impl<S: FormSchema> PendingValidation<S> {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn run(&self) -> ValidationResult {
        engine::validate(self.schema.as_ref(), &self.values)
    }
}

/// Current record and error state of one form
#[derive(Debug, Clone)]
pub struct FormSession<S> {
    schema: Arc<S>,
    mode: ValidationMode,
    values: Record,
    touched: BTreeSet<String>,
    errors: FieldErrors,
    submit_count: u32,
    last_submit: Option<ValidationResult>,
    seq: u64,
}

impl<S: FormSchema> FormSession<S> {
    pub fn new(schema: Arc<S>, defaults: Record, mode: ValidationMode) -> Self {
        Self {
            schema,
            mode,
            values: defaults,
            touched: BTreeSet::new(),
            errors: FieldErrors::new(),
            submit_count: 0,
            last_submit: None,
            seq: 0,
        }
    }

    pub fn schema(&self) -> &Arc<S> {
        &self.schema
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn values(&self) -> &Record {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    pub fn is_submitted(&self) -> bool {
        self.submit_count > 0
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Result of the most recent submit, if it is still current
    pub fn last_submit(&self) -> Option<&ValidationResult> {
        self.last_submit.as_ref()
    }

    /// Record a change to one field.
    ///
    /// In [`ValidationMode::OnChange`] touched fields are re-validated right
    /// away. After a submit every field is re-validated in either mode.
    pub fn set_value(&mut self, field: &str, value: impl Into<Value>) {
        self.values.insert(field.to_string(), value.into());
        self.touched.insert(field.to_string());
        self.seq += 1;
        self.last_submit = None;

        if self.mode == ValidationMode::OnChange || self.is_submitted() {
            let result = engine::validate(self.schema.as_ref(), &self.values);
            self.apply(&result);
        }
    }

    /// Validate the whole record and mark the form as submitted
    pub fn submit(&mut self) -> ValidationResult {
        self.seq += 1;
        self.submit_count += 1;

        let result = engine::validate(self.schema.as_ref(), &self.values);
        self.errors = result.errors().cloned().unwrap_or_default();
        self.last_submit = Some(result.clone());

        tracing::debug!(
            submit = self.submit_count,
            valid = result.is_valid(),
            errors = self.errors.len(),
            "form submitted"
        );
        result
    }

    /// Re-validate every field and show all errors
    pub fn trigger(&mut self) -> ValidationResult {
        self.seq += 1;
        let result = engine::validate(self.schema.as_ref(), &self.values);
        self.errors = result.errors().cloned().unwrap_or_default();
        result
    }

    /// Swap in a re-derived schema.
    ///
    /// Errors for fields the new schema lacks are dropped; a form that was
    /// already submitted is re-validated against the new rules at once.
    pub fn set_schema(&mut self, schema: Arc<S>) {
        self.schema = schema;
        self.seq += 1;
        self.last_submit = None;

        let schema = Arc::clone(&self.schema);
        self.errors.retain(|field| schema.has_field(field));

        if self.is_submitted() {
            self.trigger();
        } else if self.mode == ValidationMode::OnChange && !self.touched.is_empty() {
            let result = engine::validate(self.schema.as_ref(), &self.values);
            self.apply(&result);
        }
    }

    /// Snapshot the session for a validation run outside this call
    pub fn begin(&mut self) -> PendingValidation<S> {
        self.seq += 1;
        PendingValidation {
            seq: self.seq,
            schema: Arc::clone(&self.schema),
            values: self.values.clone(),
        }
    }

    /// Apply a result from [`begin`](Self::begin) unless the session changed
    /// since. Returns whether the result was applied.
    pub fn complete(&mut self, seq: u64, result: ValidationResult) -> bool {
        if seq != self.seq {
            tracing::trace!(seq, current = self.seq, "discarding stale validation result");
            return false;
        }

        self.errors = result.errors().cloned().unwrap_or_default();
        true
    }

    /// Update errors from a full result, limited to touched fields until
    /// the form has been submitted
    fn apply(&mut self, result: &ValidationResult) {
        if self.is_submitted() {
            self.errors = result.errors().cloned().unwrap_or_default();
            return;
        }

        for field in &self.touched {
            match result.error(field) {
                Some(error) => self.errors.insert(field.clone(), error.clone()),
                None => {
                    self.errors.remove(field);
                }
            }
        }
    }
}
