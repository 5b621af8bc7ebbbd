//! Aggregation failure types.

use chrono::NaiveDate;
use thiserror::Error;

/// Failures surfaced by aggregation queries.
///
/// Missing data is deliberately not represented here: a date or nutrient
/// with no contributing entries is an absent map key, which callers render
/// as a placeholder rather than handle as an error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AggregateError {
    /// The requested date range is inverted.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Macro proportions were requested without a positive calorie total.
    #[error("macro proportions undefined: calorie total is {}", .calories.map_or_else(|| "unavailable".to_owned(), |c| c.to_string()))]
    DivisionUndefined {
        /// The offending calorie total, if one was present at all.
        calories: Option<f64>,
    },

    /// A nutrient name outside the tracked whitelist.
    #[error("invalid nutrient key: {key}")]
    InvalidNutrientKey { key: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_range_names_both_dates() {
        let err = AggregateError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 13).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "invalid date range: start 2025-01-20 is after end 2025-01-13"
        );
    }

    #[test]
    fn division_undefined_distinguishes_absent_calories() {
        let absent = AggregateError::DivisionUndefined { calories: None };
        assert_eq!(
            absent.to_string(),
            "macro proportions undefined: calorie total is unavailable"
        );

        let zero = AggregateError::DivisionUndefined {
            calories: Some(0.0),
        };
        assert_eq!(
            zero.to_string(),
            "macro proportions undefined: calorie total is 0"
        );
    }

    #[test]
    fn invalid_nutrient_key_names_the_key() {
        let err = AggregateError::InvalidNutrientKey {
            key: "vitamin-d".to_string(),
        };
        assert_eq!(err.to_string(), "invalid nutrient key: vitamin-d");
    }
}
