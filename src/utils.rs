//! Utility functions for the statistics engine

use crate::error::{StatsError, StatsResult};

/// Parse a raw attribute value as a finite number
pub fn parse_stat(field: &str, raw: &str) -> StatsResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| StatsError::NotNumeric {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// Whether a raw attribute value reads as a finite number
pub fn is_numeric(raw: &str) -> bool {
    parse_stat("", raw).is_ok()
}

/// Drop `count` leading characters, respecting char boundaries
pub fn strip_leading_chars(raw: &str, count: usize) -> &str {
    match raw.char_indices().nth(count) {
        Some((idx, _)) => &raw[idx..],
        None => "",
    }
}

/// Approximate float equality for scores built from divisions
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stat() {
        assert_eq!(parse_stat("G", "12").unwrap(), 12.0);
        assert_eq!(parse_stat("G", " -1.5 ").unwrap(), -1.5);
        assert!(parse_stat("G", "").is_err());
        assert!(parse_stat("G", "NaN").is_err());
        assert!(parse_stat("G", "inf").is_err());
        assert!(matches!(
            parse_stat("Team", "TOR"),
            Err(StatsError::NotNumeric { field, .. }) if field == "Team"
        ));
    }

    #[test]
    fn test_strip_leading_chars() {
        assert_eq!(strip_leading_chars("\u{feff}Connor McDavid", 1), "Connor McDavid");
        assert_eq!(strip_leading_chars("xSidney Crosby", 1), "Sidney Crosby");
        assert_eq!(strip_leading_chars("Name", 0), "Name");
        assert_eq!(strip_leading_chars("", 1), "");
        assert_eq!(strip_leading_chars("é", 1), "");
    }

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(0.1 + 0.2, 0.3));
        assert!(!approx_eq(0.5, 0.5001));
    }
}
