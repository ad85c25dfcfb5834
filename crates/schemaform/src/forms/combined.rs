// File: src/forms/combined.rs
// Purpose: Schema assembled from optional parts chosen at runtime

use super::conditional;
use crate::derive::Params;
use crate::error::SchemaError;
use crate::field::FieldSpec;
use crate::record;
use crate::rule::Rule;
use crate::schema::Schema;
use crate::value::{Record, Value};

/// Which optional parts the schema carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CombinedOptions {
    pub age: bool,
    pub email: bool,
}

impl CombinedOptions {
    pub fn all() -> Self {
        Self { age: true, email: true }
    }

    /// Read `age` and `email` flags; both default to on
    pub fn from_params(params: &Params) -> Result<Self, SchemaError> {
        Ok(Self {
            age: params.get_or("age", true)?,
            email: params.get_or("email", true)?,
        })
    }
}

pub fn defaults() -> Record {
    record! {
        "firstName" => "",
        "lastName" => "",
        "age" => Value::Null,
        "email" => "",
    }
}

pub fn derive(options: &CombinedOptions) -> Schema {
    let mut schema = Schema::new()
        .field(FieldSpec::text("firstName").trim().required("First name is required"))
        .field(FieldSpec::text("lastName").required("Last name is required"));

    if options.age {
        schema = schema.field(conditional::age());
    }

    if options.email {
        schema = schema.field(
            FieldSpec::text("email")
                .required("Email is required")
                .rule(Rule::email("Valid email required")),
        );
    }

    schema
}
