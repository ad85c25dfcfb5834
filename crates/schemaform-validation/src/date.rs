//! Date validation functions

use chrono::NaiveDate;

/// Calendar dates are exchanged as `YYYY-MM-DD`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

pub fn is_on_or_after(date: NaiveDate, min: NaiveDate) -> bool {
    date >= min
}

pub fn is_on_or_before(date: NaiveDate, max: NaiveDate) -> bool {
    date <= max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date("29.02.2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_bounds() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let earlier = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(is_on_or_after(day, earlier));
        assert!(is_on_or_after(day, day));
        assert!(!is_on_or_before(day, earlier));
        assert!(is_on_or_before(earlier, day));
    }
}
