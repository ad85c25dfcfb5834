//! String validation functions

use regex::Regex;

/// Number of characters (not bytes) in `s`
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub fn has_min_length(s: &str, min: usize) -> bool {
    char_len(s) >= min
}

pub fn has_max_length(s: &str, max: usize) -> bool {
    char_len(s) <= max
}

/// True when every pattern matches somewhere in `value`.
///
/// Lookahead-style requirements ("at least one digit and one uppercase
/// letter") are expressed as several patterns instead of one.
pub fn matches_all(value: &str, patterns: &[Regex]) -> bool {
    patterns.iter().all(|re| re.is_match(value))
}

/// Enum/value restriction
pub fn is_one_of<S: AsRef<str>>(value: &str, allowed: &[S]) -> bool {
    allowed.iter().any(|a| a.as_ref() == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_counts_chars() {
        assert!(has_min_length("abc", 3));
        assert!(!has_min_length("ab", 3));
        assert!(has_min_length("äöü", 3));
        assert!(has_max_length("äöü", 3));
        assert!(!has_max_length("hello", 4));
    }

    #[test]
    fn test_matches_all() {
        let patterns = vec![Regex::new(r"\d").unwrap(), Regex::new(r"[A-Z]").unwrap()];
        assert!(matches_all("Abc1", &patterns));
        assert!(!matches_all("abc1", &patterns));
        assert!(matches_all("anything", &[]));
    }

    #[test]
    fn test_one_of() {
        let allowed = ["Admin", "Guest"];
        assert!(is_one_of("Admin", &allowed));
        assert!(!is_one_of("admin", &allowed));
        assert!(!is_one_of("", &allowed));
    }
}
