//! Thousand-suffixed cost strings such as `"3k"`.
//!
//! Restraint costs are stored the way the game client displays them. Parsing
//! strips a single `k`/`K` suffix and scales by [`COST_UNIT`]; a value without
//! the suffix is still read as thousands.

use thiserror::Error;

/// The multiplier a `k` suffix stands for
pub const COST_UNIT: f64 = 1000.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CostError {
    #[error("Cost is empty")]
    Empty,
    #[error("Cost is not a number: {0:?}")]
    NotANumber(String),
}

/// Parses a cost string into its numeric value
///
/// ### Examples
///
/// `"3k"` and `"3K"` both parse to `3000.0`, `"1.5k"` to `1500.0`.
///
/// ### Errors
///
/// Returns [`CostError`] when nothing numeric is left after removing the suffix,
/// or when the number is not finite.
pub fn parse_cost(raw: &str) -> Result<f64, CostError> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_suffix('k')
        .or_else(|| trimmed.strip_suffix('K'))
        .unwrap_or(trimmed)
        .trim();

    if digits.is_empty() {
        return Err(CostError::Empty);
    }

    match digits.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value * COST_UNIT),
        _ => Err(CostError::NotANumber(raw.to_string())),
    }
}

/// Formats a numeric cost back into its `k`-suffixed form
pub fn format_cost(value: f64) -> String {
    format!("{}k", value / COST_UNIT)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cost() {
        assert_eq!(parse_cost("3k"), Ok(3000.0));
        assert_eq!(parse_cost("3K"), Ok(3000.0));
        assert_eq!(parse_cost("1.5k"), Ok(1500.0));
        assert_eq!(parse_cost(" 12k "), Ok(12000.0));
    }

    #[test]
    fn test_parse_cost_without_suffix_is_thousands() {
        assert_eq!(parse_cost("3"), Ok(3000.0));
    }

    #[test]
    fn test_parse_cost_errors() {
        assert_eq!(parse_cost(""), Err(CostError::Empty));
        assert_eq!(parse_cost("k"), Err(CostError::Empty));
        assert_eq!(parse_cost("abck"), Err(CostError::NotANumber("abck".to_string())));
        assert_eq!(parse_cost("infk"), Err(CostError::NotANumber("infk".to_string())));
        assert_eq!(parse_cost("NaN"), Err(CostError::NotANumber("NaN".to_string())));
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(6000.0), "6k");
        assert_eq!(format_cost(3000.0), "3k");
        assert_eq!(format_cost(1500.0), "1.5k");
        assert_eq!(format_cost(0.0), "0k");
    }
}
