//! Athlete age and personal-best comparison utilities.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a result value measures, which decides improvement polarity: for
/// timed events a lower value is better, for distance and height events a
/// higher value is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventMeasure {
    Time,
    Distance,
    Height,
}

impl fmt::Display for EventMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventMeasure::Time => write!(f, "time"),
            EventMeasure::Distance => write!(f, "distance"),
            EventMeasure::Height => write!(f, "height"),
        }
    }
}

/// Comparison of a new result against the previous personal best.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceImprovement {
    /// Signed improvement percentage, rounded to 2 decimals
    pub percent: Decimal,

    pub is_improvement: bool,

    /// False when there was no previous result to compare against
    pub has_baseline: bool,
}

impl PerformanceImprovement {
    /// Sentinel for "no previous record"
    pub fn no_baseline() -> Self {
        PerformanceImprovement {
            percent: Decimal::ZERO,
            is_improvement: false,
            has_baseline: false,
        }
    }
}

/// Age and personal-best calculation utilities.
pub struct PerformanceAnalyzer;

impl PerformanceAnalyzer {
    /// Calendar age in full years at `as_of`, with month/day adjustment.
    ///
    /// A missing birthdate yields 0, as does an `as_of` earlier than the
    /// birthdate.
    pub fn age_from_birthdate(birthdate: Option<NaiveDate>, as_of: NaiveDate) -> u32 {
        let Some(birthdate) = birthdate else {
            return 0;
        };

        let mut age = as_of.year() - birthdate.year();
        if (as_of.month(), as_of.day()) < (birthdate.month(), birthdate.day()) {
            age -= 1;
        }

        age.max(0) as u32
    }

    /// Improvement of `current` over `previous` for the given measure.
    ///
    /// Timed events improve downward, distance/height events improve upward;
    /// the percentage is signed accordingly. A zero previous value means
    /// there is no baseline to compare against.
    pub fn improvement(
        current: Decimal,
        previous: Decimal,
        measure: EventMeasure,
    ) -> PerformanceImprovement {
        if previous.is_zero() {
            return PerformanceImprovement::no_baseline();
        }

        let (percent, is_improvement) = match measure {
            EventMeasure::Time => (
                (previous - current) / previous * Decimal::from(100),
                current < previous,
            ),
            EventMeasure::Distance | EventMeasure::Height => (
                (current - previous) / previous * Decimal::from(100),
                current > previous,
            ),
        };

        PerformanceImprovement {
            percent: percent.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            is_improvement,
            has_baseline: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_with_birthday_passed() {
        let age = PerformanceAnalyzer::age_from_birthdate(
            Some(date(2000, 3, 15)),
            date(2024, 6, 1),
        );
        assert_eq!(age, 24);
    }

    #[test]
    fn test_age_before_birthday() {
        let age = PerformanceAnalyzer::age_from_birthdate(
            Some(date(2000, 9, 15)),
            date(2024, 6, 1),
        );
        assert_eq!(age, 23);
    }

    #[test]
    fn test_age_on_birthday() {
        let age = PerformanceAnalyzer::age_from_birthdate(
            Some(date(2000, 6, 1)),
            date(2024, 6, 1),
        );
        assert_eq!(age, 24);
    }

    #[test]
    fn test_age_missing_birthdate() {
        assert_eq!(
            PerformanceAnalyzer::age_from_birthdate(None, date(2024, 6, 1)),
            0
        );
    }

    #[test]
    fn test_age_birthdate_in_future() {
        assert_eq!(
            PerformanceAnalyzer::age_from_birthdate(Some(date(2030, 1, 1)), date(2024, 6, 1)),
            0
        );
    }

    #[test]
    fn test_time_improvement_lower_is_better() {
        let result =
            PerformanceAnalyzer::improvement(dec!(11.45), dec!(11.67), EventMeasure::Time);
        assert!(result.is_improvement);
        assert!(result.has_baseline);
        assert_eq!(result.percent, dec!(1.89));
    }

    #[test]
    fn test_time_regression() {
        let result =
            PerformanceAnalyzer::improvement(dec!(12.00), dec!(11.67), EventMeasure::Time);
        assert!(!result.is_improvement);
        assert!(result.percent < Decimal::ZERO);
    }

    #[test]
    fn test_distance_improvement_higher_is_better() {
        let result =
            PerformanceAnalyzer::improvement(dec!(6.30), dec!(6.00), EventMeasure::Distance);
        assert!(result.is_improvement);
        assert_eq!(result.percent, dec!(5.00));
    }

    #[test]
    fn test_height_regression() {
        let result =
            PerformanceAnalyzer::improvement(dec!(1.80), dec!(1.85), EventMeasure::Height);
        assert!(!result.is_improvement);
        assert!(result.percent < Decimal::ZERO);
    }

    #[test]
    fn test_no_previous_record() {
        let result = PerformanceAnalyzer::improvement(dec!(11.45), dec!(0), EventMeasure::Time);
        assert_eq!(result, PerformanceImprovement::no_baseline());
        assert!(!result.has_baseline);
        assert_eq!(result.percent, Decimal::ZERO);
    }

    #[test]
    fn test_equal_results_are_not_improvement() {
        let result =
            PerformanceAnalyzer::improvement(dec!(11.45), dec!(11.45), EventMeasure::Time);
        assert!(!result.is_improvement);
        assert_eq!(result.percent, Decimal::ZERO);
    }
}
