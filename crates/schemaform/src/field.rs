// File: src/field.rs
// Purpose: Field specifications, coercion and per-field checks

use crate::error::{ErrorKind, FieldError};
use crate::message::Message;
use crate::rule::Rule;
use crate::value::{Record, Value};
use schemaform_validation as check;
use serde::{Deserialize, Serialize};

/// Input kind of a field; decides how raw values are coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    Enum,
    Date,
    /// List of selected option ids
    Ids,
}

impl FieldKind {
    fn default_value(self) -> Value {
        match self {
            FieldKind::Text => Value::String(String::new()),
            FieldKind::Boolean => Value::Bool(false),
            FieldKind::Ids => Value::List(Vec::new()),
            FieldKind::Number | FieldKind::Enum | FieldKind::Date => Value::Null,
        }
    }

    fn type_message(self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Enum => "Must be text",
            FieldKind::Number => "Must be a number",
            FieldKind::Boolean => "Must be true or false",
            FieldKind::Date => "Must be a valid date (YYYY-MM-DD)",
            FieldKind::Ids => "Must be a list",
        }
    }
}

/// Outcome of reading a raw value as a field's kind
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    /// Nothing was entered
    Absent,
    Present(Value),
    /// Input could not be read as the kind; carries the raw value
    Mismatch(Value),
}

/// Extra requirements that only apply while another field holds a value.
///
/// Evaluated against the current record on every pass.
#[derive(Debug, Clone)]
pub struct Conditional {
    pub field: String,
    pub is: Value,
    pub required: Option<Message>,
    pub rules: Vec<Rule>,
}

impl Conditional {
    pub fn new(field: impl Into<String>, is: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            is: is.into(),
            required: None,
            rules: Vec::new(),
        }
    }

    pub fn required(mut self, message: impl Into<Message>) -> Self {
        self.required = Some(message.into());
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn is_active(&self, record: &Record) -> bool {
        record.get(&self.field).unwrap_or(&Value::Null) == &self.is
    }
}

/// One field's kind, requiredness and ordered constraints
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: Option<Message>,
    pub trim: bool,
    pub default: Option<Value>,
    pub type_message: Option<Message>,
    pub rules: Vec<Rule>,
    pub conditions: Vec<Conditional>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: None,
            trim: false,
            default: None,
            type_message: None,
            rules: Vec::new(),
            conditions: Vec::new(),
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Enum)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub fn ids(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Ids)
    }

    /// Make the field required. For boolean fields this means "must be true".
    pub fn required(mut self, message: impl Into<Message>) -> Self {
        self.required = Some(message.into());
        self
    }

    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    pub fn default_to(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn type_message(mut self, message: impl Into<Message>) -> Self {
        self.type_message = Some(message.into());
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add requirements that apply while `field` equals `is`
    pub fn when(
        mut self,
        field: impl Into<String>,
        is: impl Into<Value>,
        then: impl FnOnce(Conditional) -> Conditional,
    ) -> Self {
        self.conditions.push(then(Conditional::new(field, is)));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value used for this field when it is absent from a valid record
    pub fn default_value(&self) -> Value {
        self.default
            .clone()
            .unwrap_or_else(|| self.kind.default_value())
    }

    fn mismatch_message(&self) -> Message {
        self.type_message
            .clone()
            .unwrap_or_else(|| Message::text(self.kind.type_message()))
    }

    /// Read a raw value as this field's kind
    pub fn coerce(&self, raw: Option<&Value>) -> Coerced {
        let raw = match raw {
            None | Some(Value::Null) => return Coerced::Absent,
            Some(raw) => raw,
        };

        match (self.kind, raw) {
            (FieldKind::Text, Value::String(s)) => {
                let s = if self.trim { s.trim() } else { s.as_str() };
                Coerced::Present(Value::String(s.to_string()))
            }
            (FieldKind::Text, Value::Number(_) | Value::Bool(_)) => {
                Coerced::Present(Value::String(raw.to_string()))
            }

            (FieldKind::Enum, Value::String(s)) => match s.trim() {
                "" => Coerced::Absent,
                s => Coerced::Present(Value::String(s.to_string())),
            },

            (FieldKind::Number, Value::Number(n)) if n.is_finite() => Coerced::Present(raw.clone()),
            (FieldKind::Number, Value::String(s)) if s.trim().is_empty() => Coerced::Absent,
            (FieldKind::Number, Value::String(s)) => match check::parse_number(s) {
                Some(n) => Coerced::Present(Value::Number(n)),
                None => Coerced::Mismatch(raw.clone()),
            },

            (FieldKind::Boolean, Value::Bool(_)) => Coerced::Present(raw.clone()),
            (FieldKind::Boolean, Value::String(s)) => match s.trim() {
                "" => Coerced::Absent,
                "true" | "on" => Coerced::Present(Value::Bool(true)),
                "false" | "off" => Coerced::Present(Value::Bool(false)),
                _ => Coerced::Mismatch(raw.clone()),
            },

            (FieldKind::Date, Value::String(s)) if s.trim().is_empty() => Coerced::Absent,
            (FieldKind::Date, Value::String(s)) => match check::parse_date(s) {
                Some(date) => Coerced::Present(Value::String(
                    date.format(check::DATE_FORMAT).to_string(),
                )),
                None => Coerced::Mismatch(raw.clone()),
            },

            (FieldKind::Ids, Value::List(_)) => Coerced::Present(raw.clone()),

            _ => Coerced::Mismatch(raw.clone()),
        }
    }

    /// Value placed in the normalized record for this field
    pub fn output(&self, coerced: &Coerced) -> Value {
        match coerced {
            Coerced::Absent => self.default_value(),
            Coerced::Present(value) | Coerced::Mismatch(value) => value.clone(),
        }
    }

    /// Whether a coerced value counts as "nothing entered" for requiredness
    pub fn is_empty(&self, coerced: &Coerced) -> bool {
        match coerced {
            Coerced::Absent => true,
            Coerced::Present(Value::String(s)) => s.is_empty(),
            Coerced::Present(Value::List(items)) => items.is_empty(),
            Coerced::Present(Value::Bool(b)) => self.kind == FieldKind::Boolean && !b,
            _ => false,
        }
    }

    /// Run requiredness and rules for this field against the normalized record.
    ///
    /// The first failing check decides the error.
    pub fn check(&self, coerced: &Coerced, record: &Record) -> Result<(), FieldError> {
        if let Coerced::Mismatch(_) = coerced {
            return Err(FieldError::new(ErrorKind::TypeMismatch, self.mismatch_message()));
        }

        let active: Vec<&Conditional> = self
            .conditions
            .iter()
            .filter(|c| c.is_active(record))
            .collect();

        if self.is_empty(coerced) {
            if let Some(message) = &self.required {
                return Err(FieldError::new(ErrorKind::RequiredMissing, message.clone()));
            }
            if let Some(message) = active.iter().find_map(|c| c.required.as_ref()) {
                return Err(FieldError::new(
                    ErrorKind::ConditionalRequirement,
                    message.clone(),
                ));
            }
        }

        let value = match coerced {
            Coerced::Present(value) => value,
            _ => return Ok(()),
        };

        let rules = self
            .rules
            .iter()
            .chain(active.iter().flat_map(|c| c.rules.iter()));

        for rule in rules {
            if !rule.passes(value, record) {
                return Err(FieldError::new(rule.error_kind(), rule.message.clone()));
            }
        }

        Ok(())
    }

    /// Names of other fields this spec reads
    pub fn references(&self) -> impl Iterator<Item = &str> {
        let conditions = self.conditions.iter().map(|c| c.field.as_str());
        let rules = self
            .rules
            .iter()
            .chain(self.conditions.iter().flat_map(|c| c.rules.iter()))
            .filter_map(Rule::referenced_field);
        conditions.chain(rules)
    }
}
