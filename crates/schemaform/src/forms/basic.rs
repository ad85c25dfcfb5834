// File: src/forms/basic.rs
// Purpose: Names plus a consent checkbox, validated by plain rules

use crate::field::FieldSpec;
use crate::record;
use crate::rule::Rule;
use crate::schema::Schema;
use crate::value::Record;

pub fn defaults() -> Record {
    record! {
        "firstName" => "",
        "lastName" => "",
        "usePersonalData" => false,
    }
}

pub fn schema() -> Schema {
    Schema::new()
        .field(
            FieldSpec::text("firstName")
                .required("First name is required")
                .rule(Rule::min_length(3, "First name must contain at least three characters")),
        )
        .field(FieldSpec::text("lastName").required("Last name is required"))
        .field(FieldSpec::boolean("usePersonalData").required("You must accept this"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fail_every_field() {
        let result = schema().validate(&defaults());
        let errors = result.errors().unwrap();
        assert_eq!(errors.message("firstName"), Some("First name is required"));
        assert_eq!(errors.message("lastName"), Some("Last name is required"));
        assert_eq!(errors.message("usePersonalData"), Some("You must accept this"));
    }

    #[test]
    fn test_short_first_name() {
        let result = schema().validate(&record! {
            "firstName" => "Jo",
            "lastName" => "Doe",
            "usePersonalData" => true,
        });
        assert_eq!(
            result.errors().unwrap().message("firstName"),
            Some("First name must contain at least three characters")
        );
    }
}
