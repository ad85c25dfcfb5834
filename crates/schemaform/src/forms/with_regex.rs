// File: src/forms/with_regex.rs
// Purpose: Password pattern and confirmation form

use super::Flavor;
use crate::field::FieldSpec;
use crate::record;
use crate::rule::Rule;
use crate::schema::{Refinement, Schema};
use crate::value::Record;
use schemaform_validation::PASSWORD_PATTERN;

pub const PATTERN_MESSAGE: &str =
    "Password must contain at least 6 characters, one uppercase, one number and one special case character";

pub fn defaults() -> Record {
    record! {
        "firstName" => "",
        "lastName" => "",
        "password" => "",
        "repeatPassword" => "",
        "passwordWithRegex" => "",
    }
}

pub fn schema(flavor: Flavor) -> Schema {
    match flavor {
        Flavor::Refinements => refined(),
        Flavor::Rules => ruled(),
    }
}

fn names() -> Schema {
    Schema::new()
        .field(FieldSpec::text("firstName").trim().required("First name is required"))
        .field(FieldSpec::text("lastName").required("Last name is required"))
        .field(
            FieldSpec::text("password")
                .rule(Rule::min_length(6, "Password must be at least 6 characters")),
        )
}

/// Confirmation checked by a record-level refinement on `repeatPassword`
fn refined() -> Schema {
    names()
        .field(FieldSpec::text("repeatPassword"))
        .field(
            FieldSpec::text("passwordWithRegex")
                .rule(Rule::regexes(PASSWORD_PATTERN.to_vec(), PATTERN_MESSAGE)),
        )
        .refine(Refinement::fields_equal(
            "password",
            "repeatPassword",
            "Passwords don't match",
        ))
}

/// Confirmation checked by a cross-field rule on `repeatPassword`
fn ruled() -> Schema {
    names()
        .field(
            FieldSpec::text("repeatPassword")
                .required("Repeat password is required")
                .rule(Rule::equals_field("password", "Passwords don't match.")),
        )
        .field(
            FieldSpec::text("passwordWithRegex")
                .required("Password pattern is required")
                .rule(Rule::regexes(PASSWORD_PATTERN.to_vec(), PATTERN_MESSAGE)),
        )
}
