//! schemaform-validation
//!
//! Pure predicate functions used by schemaform rules. Every function here is
//! deterministic and side-effect free; messages are attached by the caller.

pub mod collection;
pub mod date;
pub mod email;
pub mod numeric;
pub mod password;
pub mod string;

// Re-export all validators
pub use collection::*;
pub use date::*;
pub use email::*;
pub use numeric::*;
pub use password::*;
pub use string::*;
