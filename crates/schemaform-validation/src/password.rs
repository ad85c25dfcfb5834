//! Password pattern validation

use once_cell::sync::Lazy;
use regex::Regex;

/// Character classes a patterned password must contain, one regex each.
///
/// Together they require: 6+ characters, one special character
/// (`!@#$%^&*()-_=+{};:,<.>`), one digit, one lowercase and one uppercase
/// letter.
pub const PASSWORD_PATTERN_PARTS: &[&str] = &[
    r"^.{6,}$",
    r"[!@#$%^&*()\-_=+{};:,<.>]",
    r"[0-9]",
    r"[a-z]",
    r"[A-Z]",
];

pub static PASSWORD_PATTERN: Lazy<Vec<Regex>> = Lazy::new(|| {
    PASSWORD_PATTERN_PARTS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

/// Validates password against the character-class pattern
pub fn meets_password_pattern(password: &str) -> bool {
    crate::string::matches_all(password, &PASSWORD_PATTERN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_accepts_complete_password() {
        assert!(meets_password_pattern("Abcdef1!"));
        assert!(meets_password_pattern("xY3{zzz"));
    }

    #[test]
    fn test_pattern_rejects_missing_classes() {
        assert!(!meets_password_pattern("abc"));
        assert!(!meets_password_pattern("Abcdefg1")); // no special
        assert!(!meets_password_pattern("Abcdefg!")); // no digit
        assert!(!meets_password_pattern("ABCDEF1!")); // no lowercase
        assert!(!meets_password_pattern("abcdef1!")); // no uppercase
        assert!(!meets_password_pattern("Ab1!")); // too short
        assert!(!meets_password_pattern("Abcdef\u{0661}!")); // non-ASCII digit
    }
}
