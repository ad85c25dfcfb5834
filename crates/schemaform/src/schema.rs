// File: src/schema.rs
// Purpose: Schemas, record-level refinements and the schema capability trait

use crate::engine::{self, ValidationResult};
use crate::error::{ErrorKind, FieldError, FieldErrors, SchemaError};
use crate::field::{Coerced, FieldSpec};
use crate::message::Message;
use crate::value::Record;
use std::fmt;
use std::sync::Arc;

/// What the engine needs from a schema.
///
/// [`Schema`] is the provided implementation; other representations can
/// plug into [`engine::validate`] by implementing this trait.
pub trait FormSchema {
    /// Field specs in declaration order
    fn fields(&self) -> &[FieldSpec];

    /// Check one field. The default runs the spec's own requiredness and rules.
    fn validate_field(
        &self,
        spec: &FieldSpec,
        coerced: &Coerced,
        record: &Record,
    ) -> Result<(), FieldError> {
        spec.check(coerced, record)
    }

    /// Apply record-level checks after every field has been checked
    fn validate_record(&self, _record: &Record, _errors: &mut FieldErrors) {}

    fn has_field(&self, name: &str) -> bool {
        self.fields().iter().any(|f| f.name == name)
    }
}

impl<T: FormSchema + ?Sized> FormSchema for &T {
    fn fields(&self) -> &[FieldSpec] {
        (**self).fields()
    }

    fn validate_field(
        &self,
        spec: &FieldSpec,
        coerced: &Coerced,
        record: &Record,
    ) -> Result<(), FieldError> {
        (**self).validate_field(spec, coerced, record)
    }

    fn validate_record(&self, record: &Record, errors: &mut FieldErrors) {
        (**self).validate_record(record, errors)
    }
}

impl<T: FormSchema + ?Sized> FormSchema for Arc<T> {
    fn fields(&self) -> &[FieldSpec] {
        (**self).fields()
    }

    fn validate_field(
        &self,
        spec: &FieldSpec,
        coerced: &Coerced,
        record: &Record,
    ) -> Result<(), FieldError> {
        (**self).validate_field(spec, coerced, record)
    }

    fn validate_record(&self, record: &Record, errors: &mut FieldErrors) {
        (**self).validate_record(record, errors)
    }
}

/// Predicate over the whole normalized record
pub type RecordPredicate = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

/// A record-level rule whose failure is reported on `path`
#[derive(Clone)]
pub struct Refinement {
    pub path: String,
    pub message: Message,
    pub kind: ErrorKind,
    /// Replace an earlier error on `path` instead of keeping it
    pub overwrite: bool,
    /// Fields the predicate reads, for reference checking
    pub reads: Vec<String>,
    predicate: RecordPredicate,
}

impl fmt::Debug for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refinement")
            .field("path", &self.path)
            .field("message", &self.message)
            .field("kind", &self.kind)
            .field("overwrite", &self.overwrite)
            .field("reads", &self.reads)
            .finish_non_exhaustive()
    }
}

impl Refinement {
    pub fn new<F>(path: impl Into<String>, message: impl Into<Message>, predicate: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        Self {
            path: path.into(),
            message: message.into(),
            kind: ErrorKind::ConstraintViolation,
            overwrite: false,
            reads: Vec::new(),
            predicate: Arc::new(predicate),
        }
    }

    /// `second` must equal `first`; failure is reported on `second`
    pub fn fields_equal(
        first: impl Into<String>,
        second: impl Into<String>,
        message: impl Into<Message>,
    ) -> Self {
        let first = first.into();
        let second = second.into();
        let (a, b) = (first.clone(), second.clone());

        Self::new(second.clone(), message, move |record| record.get(&a) == record.get(&b))
            .kind(ErrorKind::CrossFieldMismatch)
            .reading([first, second])
    }

    pub fn kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    pub fn reading<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.reads.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn holds(&self, record: &Record) -> bool {
        (self.predicate)(record)
    }

    /// Record this refinement's failure, respecting `overwrite`
    pub fn apply(&self, record: &Record, errors: &mut FieldErrors) {
        if self.holds(record) {
            return;
        }

        let error = FieldError::new(self.kind, self.message.clone());
        if self.overwrite {
            errors.insert(self.path.clone(), error);
        } else if !errors.insert_if_absent(self.path.clone(), error) {
            tracing::trace!(path = %self.path, "refinement failed on already rejected field");
        }
    }
}

/// Ordered field specs plus record-level refinements
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    refinements: Vec<Refinement>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. A spec with an existing name replaces it in place.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        match self.fields.iter_mut().find(|f| f.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.fields.push(spec),
        }
        self
    }

    pub fn refine(mut self, refinement: Refinement) -> Self {
        self.refinements.push(refinement);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn refinements(&self) -> &[Refinement] {
        &self.refinements
    }

    /// Ensure every field named by a condition, cross-field rule or
    /// refinement exists in this schema
    pub fn check_references(&self) -> Result<(), SchemaError> {
        for spec in &self.fields {
            for referenced in spec.references() {
                if self.get(referenced).is_none() {
                    return Err(SchemaError::UnknownField {
                        field: spec.name.clone(),
                        referenced: referenced.to_string(),
                    });
                }
            }
        }

        for refinement in &self.refinements {
            let names = std::iter::once(&refinement.path).chain(refinement.reads.iter());
            for referenced in names {
                if self.get(referenced).is_none() {
                    return Err(SchemaError::UnknownField {
                        field: format!("refinement on {}", refinement.path),
                        referenced: referenced.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn validate(&self, record: &Record) -> ValidationResult {
        engine::validate(self, record)
    }
}

impl FormSchema for Schema {
    fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    fn validate_record(&self, record: &Record, errors: &mut FieldErrors) {
        for refinement in &self.refinements {
            refinement.apply(record, errors);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use crate::rule::Rule;

    #[test]
    fn test_field_with_same_name_replaces_in_place() {
        let schema = Schema::new()
            .field(FieldSpec::text("a"))
            .field(FieldSpec::text("b"))
            .field(FieldSpec::number("a"));

        let names: Vec<&str> = schema.field_names().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(schema.get("a").unwrap().kind, crate::FieldKind::Number);
    }

    #[test]
    fn test_refinement_respects_existing_error() {
        let refinement = Refinement::fields_equal("password", "repeatPassword", "Passwords don't match");
        let record = record! { "password" => "abc123", "repeatPassword" => "" };

        let mut errors = FieldErrors::new();
        errors.insert(
            "repeatPassword",
            FieldError::new(ErrorKind::RequiredMissing, "Repeat password is required"),
        );
        refinement.apply(&record, &mut errors);
        assert_eq!(errors.message("repeatPassword"), Some("Repeat password is required"));

        let mut errors = FieldErrors::new();
        refinement.clone().overwrite().apply(&record, &mut errors);
        assert_eq!(errors.message("repeatPassword"), Some("Passwords don't match"));
    }

    #[test]
    fn test_unknown_references_are_rejected() {
        let schema = Schema::new()
            .field(FieldSpec::text("repeatPassword").rule(Rule::equals_field("password", "x")));
        assert!(matches!(
            schema.check_references(),
            Err(SchemaError::UnknownField { .. })
        ));

        let schema = Schema::new()
            .field(FieldSpec::text("a"))
            .refine(Refinement::fields_equal("a", "b", "x"));
        assert!(schema.check_references().is_err());
    }
}
