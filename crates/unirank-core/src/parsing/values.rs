/// Parse a rank cell.
///
/// Handles formats like:
/// - "1" -> 1
/// - " 12 " -> 12
/// - "3.0" -> 3 (integral decimal text)
///
/// Everything else, e.g. "2nd", "101-150", "", "-1" or "2.5", reads as 0.
/// Rank columns are expected to be dense, so there is no missing marker.
pub fn parse_rank(s: &str) -> u64 {
    let s = s.trim();

    if let Ok(v) = s.parse::<u64>() {
        return v;
    }

    match parse_float(s) {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => f as u64,
        _ => 0,
    }
}

/// Parse a score or level cell. `None` marks a legitimate gap such as
/// "N/A", "-" or an empty cell, and is kept distinct from zero.
pub fn parse_float(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Rust accepts "inf" and "NaN"; a score is always a finite number.
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_integer() {
        assert_eq!(parse_rank("1"), 1);
        assert_eq!(parse_rank("  42  "), 42);
    }

    #[test]
    fn test_rank_integral_decimal() {
        assert_eq!(parse_rank("3.0"), 3);
    }

    #[test]
    fn test_rank_garbage_is_zero() {
        assert_eq!(parse_rank("2nd"), 0);
        assert_eq!(parse_rank(""), 0);
        assert_eq!(parse_rank("101-150"), 0);
        assert_eq!(parse_rank("2.5"), 0);
    }

    #[test]
    fn test_rank_negative_is_zero() {
        assert_eq!(parse_rank("-1"), 0);
    }

    #[test]
    fn test_float_decimal() {
        assert_eq!(parse_float("85.5"), Some(85.5));
        assert_eq!(parse_float(" 100 "), Some(100.0));
    }

    #[test]
    fn test_float_gaps_are_none() {
        assert_eq!(parse_float("N/A"), None);
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("-"), None);
    }

    #[test]
    fn test_float_non_finite_is_none() {
        assert_eq!(parse_float("inf"), None);
        assert_eq!(parse_float("NaN"), None);
    }
}
