//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

// Email validation regex
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*\.[a-zA-Z]{2,}$").unwrap()
});

/// Validates basic email format
///
/// Checks for:
/// - Exactly one '@' with content on both sides
/// - A dotted domain ending in a 2+ letter top-level label
/// - No consecutive dots in the domain
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email) && !email.contains("..")
}
