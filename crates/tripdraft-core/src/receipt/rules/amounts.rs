//! Numeric coercion for picked field values.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

lazy_static! {
    // Plain digits, or digits grouped by threes with commas
    static ref US_AMOUNT: Regex =
        Regex::new(r"^(?:\d+|\d{1,3}(?:,\d{3})+)(?:\.\d+)?$").unwrap();
}

/// Parse a US-formatted amount (e.g., "1,234.56" or "135.00").
///
/// Commas are accepted only as thousands separators, and a single trailing
/// `.` or `,` (sentence punctuation) is ignored. Anything else, including
/// European decimal commas such as "120,00", yields `None`. Values beyond
/// the range of [`Decimal`] (about 7.9e28) also yield `None`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_suffix(['.', ',']).unwrap_or(trimmed);

    if !US_AMOUNT.is_match(trimmed) {
        return None;
    }

    let cleaned = trimmed.replace(',', "");
    Decimal::from_str(&cleaned).ok()
}

/// Parse a whole-number count (e.g., number of nights).
pub fn parse_count(s: &str) -> Option<u32> {
    s.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("120.50"), Some(Decimal::new(12050, 2)));
        assert_eq!(parse_amount(" 135.00 "), Some(Decimal::new(135, 0)));
        assert_eq!(parse_amount("1,234.56"), Some(Decimal::new(123456, 2)));
        assert_eq!(parse_amount("14.50."), Some(Decimal::new(145, 1)));
        assert_eq!(parse_amount("99"), Some(Decimal::new(99, 0)));
    }

    #[test]
    fn test_parse_amount_rejects_non_numerals() {
        assert_eq!(parse_amount("1.2.3"), None);
        assert_eq!(parse_amount("..."), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("n/a"), None);
    }

    #[test]
    fn test_parse_amount_rejects_misplaced_commas() {
        assert_eq!(parse_amount("1,2,3"), None);
        assert_eq!(parse_amount("120,00"), None);
        assert_eq!(parse_amount("1,23.45"), None);
        assert_eq!(parse_amount(",120.00"), None);
        assert_eq!(parse_amount("14.50.."), None);
        assert_eq!(parse_amount("12,345,678.90"), Some(Decimal::new(1234567890, 2)));
        assert_eq!(parse_amount("1,234,"), Some(Decimal::new(1234, 0)));
    }

    #[test]
    fn test_parse_amount_out_of_decimal_range() {
        assert_eq!(parse_amount("99999999999999999999999999999999.00"), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("3"), Some(3));
        assert_eq!(parse_count("02"), Some(2));
        assert_eq!(parse_count("two"), None);
        assert_eq!(parse_count("99999999999"), None);
    }
}
