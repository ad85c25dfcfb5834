// File: src/definition.rs
// Purpose: Declarative schema documents (TOML / JSON) compiled into schemas

use crate::error::SchemaError;
use crate::field::{Conditional, FieldKind, FieldSpec};
use crate::message::Message;
use crate::rule::{parse_date_bound, Rule};
use crate::schema::{Refinement, Schema};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A schema described as data.
///
/// ```toml
/// [[fields]]
/// name = "firstName"
/// kind = "text"
/// trim = true
/// required = { key = "FormError.FirstNameRequired" }
///
/// [[fields.rules]]
/// rule = "minLength"
/// value = 3
/// message = "First name must contain at least three characters"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDocument {
    #[serde(default)]
    pub fields: Vec<FieldDef>,

    #[serde(default)]
    pub refinements: Vec<RefinementDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,

    #[serde(default)]
    pub required: Option<Message>,

    #[serde(default)]
    pub trim: bool,

    #[serde(default)]
    pub default: Option<Value>,

    #[serde(default)]
    pub type_message: Option<Message>,

    #[serde(default)]
    pub rules: Vec<RuleDef>,

    #[serde(default)]
    pub when: Vec<ConditionalDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalDef {
    pub field: String,
    pub is: Value,

    #[serde(default)]
    pub required: Option<Message>,

    #[serde(default)]
    pub rules: Vec<RuleDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum RuleDef {
    MinLength { value: usize, message: Message },
    MaxLength { value: usize, message: Message },
    Min { value: f64, message: Message },
    Max { value: f64, message: Message },
    Integer { message: Message },
    Positive { message: Message },
    Pattern { patterns: Vec<String>, message: Message },
    Email { message: Message },
    OneOf { values: Vec<String>, message: Message },
    MinItems { value: usize, message: Message },
    MaxItems { value: usize, message: Message },
    UniqueItems { message: Message },
    MinDate { value: String, message: Message },
    MaxDate { value: String, message: Message },
    EqualsField { field: String, message: Message },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "refinement", rename_all = "camelCase")]
pub enum RefinementDef {
    /// `second` must equal `first`; reported on `second`
    FieldsEqual {
        first: String,
        second: String,
        message: Message,
        #[serde(default)]
        overwrite: bool,
    },
}

impl RuleDef {
    fn compile(&self) -> Result<Rule, SchemaError> {
        let rule = match self {
            RuleDef::MinLength { value, message } => Rule::min_length(*value, message.clone()),
            RuleDef::MaxLength { value, message } => Rule::max_length(*value, message.clone()),
            RuleDef::Min { value, message } => Rule::min(*value, message.clone()),
            RuleDef::Max { value, message } => Rule::max(*value, message.clone()),
            RuleDef::Integer { message } => Rule::integer(message.clone()),
            RuleDef::Positive { message } => Rule::positive(message.clone()),
            RuleDef::Pattern { patterns, message } => Rule::patterns(patterns.as_slice(), message.clone())?,
            RuleDef::Email { message } => Rule::email(message.clone()),
            RuleDef::OneOf { values, message } => Rule::one_of(values.clone(), message.clone()),
            RuleDef::MinItems { value, message } => Rule::min_items(*value, message.clone()),
            RuleDef::MaxItems { value, message } => Rule::max_items(*value, message.clone()),
            RuleDef::UniqueItems { message } => Rule::unique_items(message.clone()),
            RuleDef::MinDate { value, message } => {
                Rule::min_date(parse_date_bound(value)?, message.clone())
            }
            RuleDef::MaxDate { value, message } => {
                Rule::max_date(parse_date_bound(value)?, message.clone())
            }
            RuleDef::EqualsField { field, message } => {
                Rule::equals_field(field.clone(), message.clone())
            }
        };
        Ok(rule)
    }
}

impl FieldDef {
    fn compile(&self) -> Result<FieldSpec, SchemaError> {
        let mut spec = FieldSpec::new(self.name.clone(), self.kind);
        spec.required = self.required.clone();
        spec.trim = self.trim;
        spec.default = self.default.clone();
        spec.type_message = self.type_message.clone();
        spec.rules = compile_rules(&self.rules)?;

        for def in &self.when {
            let mut conditional = Conditional::new(def.field.clone(), def.is.clone());
            conditional.required = def.required.clone();
            conditional.rules = compile_rules(&def.rules)?;
            spec.conditions.push(conditional);
        }

        Ok(spec)
    }
}

fn compile_rules(defs: &[RuleDef]) -> Result<Vec<Rule>, SchemaError> {
    defs.iter().map(RuleDef::compile).collect()
}

impl RefinementDef {
    fn compile(&self) -> Refinement {
        match self {
            RefinementDef::FieldsEqual {
                first,
                second,
                message,
                overwrite,
            } => {
                let refinement = Refinement::fields_equal(first.clone(), second.clone(), message.clone());
                if *overwrite {
                    refinement.overwrite()
                } else {
                    refinement
                }
            }
        }
    }
}

impl SchemaDocument {
    pub fn from_toml(content: &str) -> Result<Self, SchemaError> {
        toml::from_str(content).map_err(|e| SchemaError::Document(e.to_string()))
    }

    pub fn from_json(content: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(content).map_err(|e| SchemaError::Document(e.to_string()))
    }

    /// Build a schema, rejecting bad patterns, bad dates, duplicate fields
    /// and references to fields the document does not declare
    pub fn compile(&self) -> Result<Schema, SchemaError> {
        let mut seen = HashSet::new();
        let mut schema = Schema::new();

        for def in &self.fields {
            if !seen.insert(def.name.as_str()) {
                return Err(SchemaError::DuplicateField(def.name.clone()));
            }
            schema = schema.field(def.compile()?);
        }

        for def in &self.refinements {
            schema = schema.refine(def.compile());
        }

        schema.check_references()?;
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::record;

    const SIGNUP: &str = r#"
        [[fields]]
        name = "password"
        kind = "text"
        required = "Password is required"

        [[fields.rules]]
        rule = "pattern"
        patterns = ['\d', '[A-Z]']
        message = { text = "Needs a digit and an uppercase letter" }

        [[fields]]
        name = "repeatPassword"
        kind = "text"

        [[refinements]]
        refinement = "fieldsEqual"
        first = "password"
        second = "repeatPassword"
        message = "Passwords don't match"
    "#;

    #[test]
    fn test_compile_and_validate() {
        let schema = SchemaDocument::from_toml(SIGNUP).unwrap().compile().unwrap();

        let result = schema.validate(&record! { "password" => "abc", "repeatPassword" => "abd" });
        let errors = result.errors().unwrap();
        assert_eq!(errors.message("password"), Some("Needs a digit and an uppercase letter"));
        assert_eq!(errors.get("repeatPassword").unwrap().kind, ErrorKind::CrossFieldMismatch);

        let result = schema.validate(&record! { "password" => "Abc1", "repeatPassword" => "Abc1" });
        assert!(result.is_valid());
    }

    #[test]
    fn test_invalid_pattern_rejected_before_use() {
        let doc = SIGNUP.replace(r"'\d'", "'(unclosed'");
        let err = SchemaDocument::from_toml(&doc).unwrap().compile().unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPattern { .. }));
    }

    #[test]
    fn test_duplicate_and_unknown_fields_rejected() {
        let doc = r#"{"fields": [
            {"name": "a", "kind": "text"},
            {"name": "a", "kind": "number"}
        ]}"#;
        assert!(matches!(
            SchemaDocument::from_json(doc).unwrap().compile(),
            Err(SchemaError::DuplicateField(_))
        ));

        let doc = r#"{"fields": [
            {"name": "b", "kind": "text", "when": [{"field": "missing", "is": true}]}
        ]}"#;
        assert!(matches!(
            SchemaDocument::from_json(doc).unwrap().compile(),
            Err(SchemaError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_bad_date_bound_rejected() {
        let doc = r#"{"fields": [
            {"name": "d", "kind": "date", "rules": [
                {"rule": "minDate", "value": "tomorrow", "message": "too early"}
            ]}
        ]}"#;
        assert!(matches!(
            SchemaDocument::from_json(doc).unwrap().compile(),
            Err(SchemaError::InvalidDate(_))
        ));
    }
}
