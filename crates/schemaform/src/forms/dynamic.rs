// File: src/forms/dynamic.rs
// Purpose: Party size form whose minimum comes from a route parameter

use crate::derive::Params;
use crate::error::SchemaError;
use crate::field::FieldSpec;
use crate::record;
use crate::rule::Rule;
use crate::schema::Schema;
use crate::value::Record;
use std::str::FromStr;

pub const PARAM: &str = "numberOfPeople";

/// Smallest accepted party size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinPeople(pub u32);

impl Default for MinPeople {
    fn default() -> Self {
        Self(1)
    }
}

impl FromStr for MinPeople {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|e| format!("expected a whole number of people: {}", e))
    }
}

impl MinPeople {
    pub fn from_params(params: &Params) -> Result<Self, SchemaError> {
        params.get_or(PARAM, Self::default())
    }

    fn message(self) -> String {
        let noun = if self.0 == 1 { "person" } else { "people" };
        format!("Minimum of {} {} required", self.0, noun)
    }
}

pub fn defaults() -> Record {
    record! {
        "firstName" => "",
        "lastName" => "",
        "numberOfPeople" => 0,
    }
}

pub fn derive(min: &MinPeople) -> Schema {
    Schema::new()
        .field(FieldSpec::text("firstName").trim().required("First name is required"))
        .field(FieldSpec::text("lastName").required("Last name is required"))
        .field(
            FieldSpec::number("numberOfPeople")
                .type_message("Must be a number")
                .required("Must be a number")
                .rule(Rule::min(min.0, min.message())),
        )
}
