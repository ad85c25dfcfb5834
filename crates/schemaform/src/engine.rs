// File: src/engine.rs
// Purpose: Validation runtime

use crate::error::{FieldError, FieldErrors};
use crate::field::Coerced;
use crate::schema::FormSchema;
use crate::value::Record;
use serde::Serialize;

/// Outcome of validating a record against a schema
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ValidationResult {
    /// Normalized record holding exactly the schema's fields
    Valid { record: Record },
    /// At least one field error
    Invalid { errors: FieldErrors },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid { .. })
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            ValidationResult::Valid { record } => Some(record),
            ValidationResult::Invalid { .. } => None,
        }
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            ValidationResult::Valid { .. } => None,
            ValidationResult::Invalid { errors } => Some(errors),
        }
    }

    /// Error on a specific field, if the result is invalid
    pub fn error(&self, field: &str) -> Option<&FieldError> {
        self.errors().and_then(|errors| errors.get(field))
    }

    pub fn into_result(self) -> Result<Record, FieldErrors> {
        match self {
            ValidationResult::Valid { record } => Ok(record),
            ValidationResult::Invalid { errors } => Err(errors),
        }
    }
}

/// Validate `raw` against `schema`.
///
/// Fields missing from `raw` are treated as absent and fields unknown to
/// the schema are ignored. Every field is checked; within a field the first
/// failing check wins. Record-level checks run last, over the normalized
/// record. Pure: the same inputs always give the same result.
pub fn validate<S: FormSchema + ?Sized>(schema: &S, raw: &Record) -> ValidationResult {
    let specs = schema.fields();

    let coerced: Vec<Coerced> = specs
        .iter()
        .map(|spec| spec.coerce(raw.get(&spec.name)))
        .collect();

    let record: Record = specs
        .iter()
        .zip(&coerced)
        .map(|(spec, value)| (spec.name.clone(), spec.output(value)))
        .collect();

    let mut errors = FieldErrors::new();
    for (spec, value) in specs.iter().zip(&coerced) {
        if let Err(error) = schema.validate_field(spec, value, &record) {
            tracing::debug!(field = %spec.name, kind = ?error.kind, reason = %error.message, "field rejected");
            errors.insert(spec.name.clone(), error);
        }
    }

    schema.validate_record(&record, &mut errors);

    tracing::trace!(fields = specs.len(), errors = errors.len(), "validation pass complete");

    if errors.is_empty() {
        ValidationResult::Valid { record }
    } else {
        ValidationResult::Invalid { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::field::FieldSpec;
    use crate::record;
    use crate::rule::Rule;
    use crate::schema::{Refinement, Schema};
    use crate::value::Value;

    fn sample() -> Schema {
        Schema::new()
            .field(FieldSpec::text("firstName").trim().required("First name is required"))
            .field(
                FieldSpec::number("age")
                    .type_message("Must be a number")
                    .rule(Rule::min(16, "Must be at least 16 years old")),
            )
            .field(FieldSpec::boolean("subscribed"))
    }

    #[test]
    fn test_valid_record_has_schema_field_set() {
        let result = validate(&sample(), &record! { "firstName" => " Jane ", "extra" => "ignored" });
        let record = result.into_result().unwrap();

        assert_eq!(record.len(), 3);
        assert_eq!(record["firstName"], Value::from("Jane"));
        assert_eq!(record["age"], Value::Null);
        assert_eq!(record["subscribed"], Value::Bool(false));
        assert!(!record.contains_key("extra"));
    }

    #[test]
    fn test_all_fields_checked() {
        let result = validate(&sample(), &record! { "age" => "12" });
        let errors = result.errors().unwrap();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("firstName").unwrap().kind, ErrorKind::RequiredMissing);
        assert_eq!(errors.message("age"), Some("Must be at least 16 years old"));
    }

    #[test]
    fn test_parse_failure_is_distinct_from_range_failure() {
        let result = validate(&sample(), &record! { "firstName" => "Jane", "age" => "abc" });
        let error = result.error("age").unwrap();
        assert_eq!(error.kind, ErrorKind::TypeMismatch);
        assert_eq!(error.message.id(), "Must be a number");
    }

    #[test]
    fn test_refinements_see_normalized_values() {
        let schema = sample().refine(Refinement::new("age", "Age 17 is not accepted", |r| {
            r.get("age") != Some(&Value::Number(17.0))
        }));

        let result = validate(&schema, &record! { "firstName" => "Jane", "age" => " 17 " });
        assert_eq!(result.error("age").unwrap().message.id(), "Age 17 is not accepted");
    }

    #[test]
    fn test_same_input_same_result() {
        let schema = sample();
        let record = record! { "firstName" => "", "age" => "x" };
        assert_eq!(validate(&schema, &record), validate(&schema, &record));
    }
}
