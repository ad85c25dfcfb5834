//! # schemaform
//!
//! Declarative form schemas: typed fields, conditional requirements,
//! cross-field refinements and schemas derived from runtime parameters.
//!
//! ## Quick Start
//!
//! ```rust
//! use schemaform::{record, FieldSpec, Rule, Schema};
//!
//! let schema = Schema::new()
//!     .field(FieldSpec::text("firstName").trim().required("First name is required"))
//!     .field(
//!         FieldSpec::number("age")
//!             .type_message("Must be a number")
//!             .rule(Rule::min(16, "Must be at least 16 years old")),
//!     );
//!
//! let result = schema.validate(&record! { "firstName" => "  Jane ", "age" => "12" });
//! assert_eq!(
//!     result.errors().unwrap().message("age"),
//!     Some("Must be at least 16 years old")
//! );
//! ```
//!
//! ## Architecture
//!
//! - **`schemaform-validation`** - Primitive checks (lengths, ranges, email, patterns, dates)
//! - **`schemaform`** - Schemas, the validation engine, derivation, sessions and messages
//! - **`schemaform-cli`** - Command line runner for the bundled showcase forms
//!
//! Error messages are either literal text or catalog keys; [`Catalog`]
//! resolves keys at display time.

pub mod config;
pub mod definition;
pub mod derive;
pub mod engine;
pub mod error;
pub mod field;
pub mod forms;
pub mod message;
pub mod rule;
pub mod schema;
pub mod session;
pub mod value;

pub use config::Config;
pub use definition::SchemaDocument;
pub use derive::{Params, SchemaCache};
pub use engine::{validate, ValidationResult};
pub use error::{ErrorKind, FieldError, FieldErrors, SchemaError};
pub use field::{Coerced, Conditional, FieldKind, FieldSpec};
pub use forms::{Flavor, FormRegistry, Showcase};
pub use message::{Catalog, Message, Translate, Untranslated};
pub use rule::{Check, Rule};
pub use schema::{FormSchema, Refinement, Schema};
pub use session::{FormSession, PendingValidation, ValidationMode};
pub use value::{Record, Value};

// Re-export the primitive checks for custom rules
pub use schemaform_validation as checks;
