// File: src/forms/translations.rs
// Purpose: Conditional form whose messages are catalog keys

use crate::definition::SchemaDocument;
use crate::error::SchemaError;
use crate::record;
use crate::schema::Schema;
use crate::value::{Record, Value};

const DOCUMENT: &str = include_str!("with_translations.toml");

/// Catalog key for the page's own translated paragraph
pub const PAGE_TEXT_KEY: &str = "SomeText";

pub fn defaults() -> Record {
    record! {
        "firstName" => "",
        "lastName" => "",
        "age" => Value::Null,
        "sendMessage" => false,
        "messageEmailAddress" => "",
    }
}

pub fn schema() -> Result<Schema, SchemaError> {
    SchemaDocument::from_toml(DOCUMENT)?.compile()
}
