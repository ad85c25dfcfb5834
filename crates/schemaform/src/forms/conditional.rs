// File: src/forms/conditional.rs
// Purpose: Age bounds and an email recipient required only when sending a message

use super::Flavor;
use crate::error::ErrorKind;
use crate::field::FieldSpec;
use crate::record;
use crate::rule::Rule;
use crate::schema::{Refinement, Schema};
use crate::value::{Record, Value};
use schemaform_validation::is_valid_email;

pub fn defaults() -> Record {
    record! {
        "firstName" => "",
        "lastName" => "",
        "age" => Value::Null,
        "sendMessage" => false,
        "messageEmailAddress" => "",
    }
}

pub fn schema(flavor: Flavor) -> Schema {
    let base = Schema::new()
        .field(FieldSpec::text("firstName").trim().required("First name is required"))
        .field(FieldSpec::text("lastName").required("Last name is required"))
        .field(age())
        .field(FieldSpec::boolean("sendMessage"));

    match flavor {
        Flavor::Rules => base.field(
            FieldSpec::text("messageEmailAddress").when("sendMessage", true, |c| {
                c.required("Message recipient required")
                    .rule(Rule::email("Valid email required"))
            }),
        ),
        Flavor::Refinements => base
            .field(FieldSpec::text("messageEmailAddress"))
            .refine(recipient_refinement()),
    }
}

pub(crate) fn age() -> FieldSpec {
    FieldSpec::number("age")
        .type_message("Must be a number")
        .required("Must be a number")
        .rule(Rule::integer("Cannot be decimal"))
        .rule(Rule::positive("Must be a positive number"))
        .rule(Rule::min(16, "Must be at least 16 years old"))
}

/// Record-level form of the conditional recipient check
fn recipient_refinement() -> Refinement {
    Refinement::new("messageEmailAddress", "Valid email required", |record| {
        let sending = record.get("sendMessage").is_some_and(Value::is_truthy);
        !sending
            || record
                .get("messageEmailAddress")
                .and_then(Value::as_str)
                .is_some_and(is_valid_email)
    })
    .kind(ErrorKind::ConditionalRequirement)
    .reading(["sendMessage", "messageEmailAddress"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn filled(send: bool, recipient: &str) -> Record {
        record! {
            "firstName" => "Jane",
            "lastName" => "Doe",
            "age" => 20,
            "sendMessage" => send,
            "messageEmailAddress" => recipient,
        }
    }

    #[rstest]
    #[case(Flavor::Rules)]
    #[case(Flavor::Refinements)]
    fn test_recipient_ignored_without_message(#[case] flavor: Flavor) {
        assert!(schema(flavor).validate(&filled(false, "")).is_valid());
    }

    #[rstest]
    #[case(Flavor::Rules, "Message recipient required")]
    #[case(Flavor::Refinements, "Valid email required")]
    fn test_recipient_required_when_sending(#[case] flavor: Flavor, #[case] expected: &str) {
        let result = schema(flavor).validate(&filled(true, ""));
        let error = result.error("messageEmailAddress").unwrap();
        assert_eq!(error.kind, ErrorKind::ConditionalRequirement);
        assert_eq!(error.message.id(), expected);
    }

    #[rstest]
    #[case("", "Must be a number")]
    #[case("abc", "Must be a number")]
    #[case("16.5", "Cannot be decimal")]
    #[case("-3", "Must be a positive number")]
    #[case("15", "Must be at least 16 years old")]
    fn test_age_messages(#[case] age: &str, #[case] expected: &str) {
        let mut record = filled(false, "");
        record.insert("age".into(), age.into());
        let result = schema(Flavor::Rules).validate(&record);
        assert_eq!(result.errors().unwrap().message("age"), Some(expected));
    }
}
