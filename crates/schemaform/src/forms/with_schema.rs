// File: src/forms/with_schema.rs
// Purpose: Basic form with trimmed names

use crate::field::FieldSpec;
use crate::record;
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
        .field(FieldSpec::text("firstName").trim().required("First name is required"))
        .field(FieldSpec::text("lastName").required("Last name is required"))
        .field(FieldSpec::boolean("usePersonalData").required("You must accept this"))
}
