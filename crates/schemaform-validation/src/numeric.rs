//! Numeric validation functions

/// Parse user input into a finite number.
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected so
/// that range checks never compare against them.
pub fn parse_number(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

pub fn is_at_least(value: f64, min: f64) -> bool {
    value >= min
}

pub fn is_at_most(value: f64, max: f64) -> bool {
    value <= max
}

pub fn is_integer(value: f64) -> bool {
    value.fract() == 0.0
}

/// Strictly greater than zero
pub fn is_positive(value: f64) -> bool {
    value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("16"), Some(16.0));
        assert_eq!(parse_number(" 2.5 "), Some(2.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_bounds() {
        assert!(is_at_least(5.0, 5.0));
        assert!(!is_at_least(4.9, 5.0));
        assert!(is_at_most(10.0, 10.0));
        assert!(!is_at_most(10.1, 10.0));
    }

    #[test]
    fn test_integer_and_positive() {
        assert!(is_integer(16.0));
        assert!(!is_integer(16.5));
        assert!(is_positive(0.1));
        assert!(!is_positive(0.0));
        assert!(!is_positive(-1.0));
    }
}
