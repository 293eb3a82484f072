use crate::models::LoadObservation;
use crate::stats;
use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Training load calculation errors
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("RPE out of range: {0} (valid range: 1-10)")]
    RpeOutOfRange(u8),
    #[error("Negative session duration: {0} minutes")]
    NegativeDuration(Decimal),
}

/// Rolling-window configuration for acute and chronic load.
///
/// Windows count the most recent *entries*, not calendar days; the defaults
/// are the canonical 7-entry acute and 28-entry chronic windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadConfig {
    pub acute_window: usize,
    pub chronic_window: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        LoadConfig {
            acute_window: 7,
            chronic_window: 28,
        }
    }
}

/// Acute load, chronic load and their ratio for one observation history.
///
/// Recomputed from the full observation sequence on every call; nothing is
/// cached or persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingLoadSnapshot {
    /// Acute training load: sum of the last 7 session loads divided by 7
    pub acute_load: Decimal,

    /// Chronic training load: mean of the last up-to-28 session loads
    pub chronic_load: Decimal,

    /// Acute:chronic workload ratio, 0 when chronic load is 0
    pub ratio: Decimal,
}

/// Single-session load bands with display metadata.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum LoadCategory {
    VeryLight,
    Light,
    Moderate,
    Hard,
    VeryHard,
}

impl LoadCategory {
    /// Band a session load into its category
    ///
    /// Thresholds: <150 very light, <300 light, <450 moderate, <600 hard,
    /// >=600 very hard.
    pub fn from_load(load: Decimal) -> Self {
        if load < dec!(150) {
            LoadCategory::VeryLight
        } else if load < dec!(300) {
            LoadCategory::Light
        } else if load < dec!(450) {
            LoadCategory::Moderate
        } else if load < dec!(600) {
            LoadCategory::Hard
        } else {
            LoadCategory::VeryHard
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            LoadCategory::VeryLight => "#81C784",
            LoadCategory::Light => "#4CAF50",
            LoadCategory::Moderate => "#FFC107",
            LoadCategory::Hard => "#FF9800",
            LoadCategory::VeryHard => "#F44336",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LoadCategory::VeryLight => "Very light session, active recovery",
            LoadCategory::Light => "Light session, easy aerobic work",
            LoadCategory::Moderate => "Moderate session, productive training",
            LoadCategory::Hard => "Hard session, high training stimulus",
            LoadCategory::VeryHard => "Very hard session, maximal stimulus",
        }
    }
}

impl fmt::Display for LoadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadCategory::VeryLight => write!(f, "Very Light"),
            LoadCategory::Light => write!(f, "Light"),
            LoadCategory::Moderate => write!(f, "Moderate"),
            LoadCategory::Hard => write!(f, "Hard"),
            LoadCategory::VeryHard => write!(f, "Very Hard"),
        }
    }
}

/// Aggregate load statistics over a set of sessions (typically one week).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyDistribution {
    pub total_load: Decimal,

    /// Total load divided by session count, 0 when there are no sessions
    pub average_load: Decimal,

    pub session_count: usize,

    /// Number of sessions per load category
    pub sessions_per_category: BTreeMap<LoadCategory, u32>,
}

/// Session load (sRPE) and rolling load metric engine.
pub struct LoadCalculator {
    config: LoadConfig,
}

impl LoadCalculator {
    pub fn new() -> Self {
        LoadCalculator {
            config: LoadConfig::default(),
        }
    }

    pub fn with_config(config: LoadConfig) -> Self {
        LoadCalculator { config }
    }

    /// Calculate session load: RPE x duration in minutes.
    ///
    /// Invalid inputs are a hard error, never clamped: a silently adjusted
    /// RPE would produce a misleading load value that propagates into every
    /// rolling metric downstream.
    pub fn session_load(rpe: u8, duration_minutes: Decimal) -> Result<Decimal, LoadError> {
        if !(1..=10).contains(&rpe) {
            return Err(LoadError::RpeOutOfRange(rpe));
        }
        if duration_minutes < Decimal::ZERO {
            return Err(LoadError::NegativeDuration(duration_minutes));
        }

        Ok(Decimal::from(rpe) * duration_minutes)
    }

    /// Build a validated observation with its derived session load
    pub fn session(
        date: NaiveDate,
        rpe: u8,
        duration_minutes: Decimal,
        category: Option<String>,
    ) -> Result<LoadObservation, LoadError> {
        let load = Self::session_load(rpe, duration_minutes)?;

        Ok(LoadObservation {
            date,
            perceived_exertion: rpe,
            duration_minutes,
            load,
            category,
        })
    }

    /// Soft range check for form input; returns messages instead of failing
    pub fn validate_rpe(rpe: i32) -> Vec<String> {
        let mut errors = Vec::new();
        if !(1..=10).contains(&rpe) {
            errors.push(format!("RPE must be between 1 and 10 (got {})", rpe));
        }
        errors
    }

    /// Acute training load: sum of the last 7 session loads divided by 7.
    ///
    /// The divisor stays fixed at the window size even when fewer entries
    /// exist. This is deliberately not a mean: a short history reads as a
    /// low acute load rather than being inflated by a small divisor, and the
    /// asymmetry against [`Self::chronic_load`] feeds directly into the
    /// published ratio values.
    pub fn acute_load(&self, observations: &[LoadObservation]) -> Decimal {
        let sum: Decimal = Self::trailing_loads(observations, self.config.acute_window)
            .iter()
            .sum();

        sum / Decimal::from(self.config.acute_window)
    }

    /// Chronic training load: mean of the last up-to-28 session loads.
    ///
    /// Unlike [`Self::acute_load`] the divisor is min(28, count); an empty
    /// history yields zero.
    pub fn chronic_load(&self, observations: &[LoadObservation]) -> Decimal {
        let series: Vec<(NaiveDate, Decimal)> = observations
            .iter()
            .map(|obs| (obs.date, obs.load))
            .collect();

        stats::rolling_average(&series, self.config.chronic_window)
    }

    /// Acute:chronic workload ratio, rounded to 2 decimals.
    ///
    /// A zero chronic load yields 0: "no established base yet" is a defined
    /// not-a-risk sentinel, not a division error.
    pub fn acwr(acute: Decimal, chronic: Decimal) -> Decimal {
        if chronic.is_zero() {
            return Decimal::ZERO;
        }

        (acute / chronic).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Acute load, chronic load and ratio in one pass
    pub fn rolling_snapshot(&self, observations: &[LoadObservation]) -> RollingLoadSnapshot {
        let acute_load = self.acute_load(observations);
        let chronic_load = self.chronic_load(observations);
        let ratio = Self::acwr(acute_load, chronic_load);

        RollingLoadSnapshot {
            acute_load,
            chronic_load,
            ratio,
        }
    }

    /// Training monotony: mean load divided by its population standard
    /// deviation. High monotony indicates low day-to-day training variety.
    ///
    /// Returns 0 for fewer than 2 loads or a zero standard deviation.
    pub fn training_monotony(loads: &[Decimal]) -> f64 {
        if loads.len() < 2 {
            return 0.0;
        }

        let values: Vec<f64> = loads
            .iter()
            .map(|load| load.to_f64().unwrap_or(0.0))
            .collect();

        let std_dev = stats::population_std_dev(&values);
        if std_dev == 0.0 {
            return 0.0;
        }

        stats::mean(&values) / std_dev
    }

    /// Training strain: monotony x total load, a compound fatigue-risk
    /// indicator
    pub fn training_strain(monotony: f64, total_load: Decimal) -> f64 {
        monotony * total_load.to_f64().unwrap_or(0.0)
    }

    /// Aggregate load statistics with a per-category session histogram
    pub fn weekly_distribution(observations: &[LoadObservation]) -> WeeklyDistribution {
        let total_load: Decimal = observations.iter().map(|obs| obs.load).sum();
        let session_count = observations.len();

        let average_load = if session_count == 0 {
            Decimal::ZERO
        } else {
            total_load / Decimal::from(session_count)
        };

        let mut sessions_per_category: BTreeMap<LoadCategory, u32> = BTreeMap::new();
        for obs in observations {
            *sessions_per_category
                .entry(LoadCategory::from_load(obs.load))
                .or_insert(0) += 1;
        }

        WeeklyDistribution {
            total_load,
            average_load,
            session_count,
            sessions_per_category,
        }
    }

    /// Loads of the trailing `window` entries, date-ascending
    fn trailing_loads(observations: &[LoadObservation], window: usize) -> Vec<Decimal> {
        let mut sorted = observations.to_vec();
        sorted.sort_by_key(|obs| obs.date);

        sorted[sorted.len().saturating_sub(window)..]
            .iter()
            .map(|obs| obs.load)
            .collect()
    }
}

impl Default for LoadCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, n).unwrap()
    }

    fn session(n: u32, load: Decimal) -> LoadObservation {
        LoadObservation {
            date: day(n),
            perceived_exertion: 5,
            duration_minutes: dec!(60),
            load,
            category: None,
        }
    }

    #[test]
    fn test_session_load() {
        assert_eq!(LoadCalculator::session_load(7, dec!(60)).unwrap(), dec!(420));
        assert_eq!(LoadCalculator::session_load(1, dec!(0)).unwrap(), dec!(0));
    }

    #[test]
    fn test_session_load_rejects_invalid_rpe() {
        assert!(matches!(
            LoadCalculator::session_load(11, dec!(60)),
            Err(LoadError::RpeOutOfRange(11))
        ));
        assert!(matches!(
            LoadCalculator::session_load(0, dec!(60)),
            Err(LoadError::RpeOutOfRange(0))
        ));
    }

    #[test]
    fn test_session_load_rejects_negative_duration() {
        assert!(matches!(
            LoadCalculator::session_load(5, dec!(-1)),
            Err(LoadError::NegativeDuration(_))
        ));
    }

    #[test]
    fn test_session_builder_derives_load() {
        let obs = LoadCalculator::session(day(1), 6, dec!(45), Some("tempo".to_string())).unwrap();
        assert_eq!(obs.load, dec!(270));
        assert_eq!(obs.perceived_exertion, 6);
        assert_eq!(obs.category.as_deref(), Some("tempo"));
    }

    #[test]
    fn test_validate_rpe_messages() {
        assert!(LoadCalculator::validate_rpe(5).is_empty());
        assert_eq!(LoadCalculator::validate_rpe(0).len(), 1);
        assert!(LoadCalculator::validate_rpe(12)[0].contains("between 1 and 10"));
    }

    #[test]
    fn test_acute_load_fixed_divisor() {
        let calculator = LoadCalculator::new();

        // 3 sessions of 700: sum 2100 / 7 = 300, not 700
        let observations: Vec<_> = (1..=3).map(|n| session(n, dec!(700))).collect();
        assert_eq!(calculator.acute_load(&observations), dec!(300));

        // A full week of constant 300 averages to exactly 300
        let observations: Vec<_> = (1..=7).map(|n| session(n, dec!(300))).collect();
        assert_eq!(calculator.acute_load(&observations), dec!(300));
    }

    #[test]
    fn test_acute_load_uses_most_recent_entries() {
        let calculator = LoadCalculator::new();

        // 10 days: 3 old sessions of 100, then 7 of 700
        let mut observations: Vec<_> = (1..=3).map(|n| session(n, dec!(100))).collect();
        observations.extend((4..=10).map(|n| session(n, dec!(700))));

        assert_eq!(calculator.acute_load(&observations), dec!(700));
    }

    #[test]
    fn test_chronic_load_divides_by_count() {
        let calculator = LoadCalculator::new();

        let observations: Vec<_> = (1..=10).map(|n| session(n, dec!(100))).collect();
        assert_eq!(calculator.chronic_load(&observations), dec!(100));
        assert_eq!(calculator.chronic_load(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_acwr() {
        assert_eq!(LoadCalculator::acwr(dec!(300), dec!(250)), dec!(1.2));
        assert_eq!(LoadCalculator::acwr(dec!(500), dec!(0)), Decimal::ZERO);
        assert_eq!(LoadCalculator::acwr(dec!(400), dec!(300)), dec!(1.33));
    }

    #[test]
    fn test_rolling_snapshot_constant_history() {
        let calculator = LoadCalculator::new();
        let observations: Vec<_> = (1..=28).map(|n| session(n, dec!(250))).collect();

        let snapshot = calculator.rolling_snapshot(&observations);
        assert_eq!(snapshot.acute_load, dec!(250));
        assert_eq!(snapshot.chronic_load, dec!(250));
        assert_eq!(snapshot.ratio, dec!(1));
    }

    #[test]
    fn test_monotony_degenerate_inputs() {
        assert_eq!(LoadCalculator::training_monotony(&[]), 0.0);
        assert_eq!(LoadCalculator::training_monotony(&[dec!(300)]), 0.0);
        // Zero variance
        assert_eq!(
            LoadCalculator::training_monotony(&[dec!(300), dec!(300)]),
            0.0
        );
    }

    #[test]
    fn test_monotony_and_strain() {
        // Loads 200/400: mean 300, population sigma 100 -> monotony 3
        let monotony = LoadCalculator::training_monotony(&[dec!(200), dec!(400)]);
        assert!((monotony - 3.0).abs() < 1e-10);

        let strain = LoadCalculator::training_strain(monotony, dec!(600));
        assert!((strain - 1800.0).abs() < 1e-9);
    }

    #[test]
    fn test_load_category_thresholds() {
        assert_eq!(LoadCategory::from_load(dec!(0)), LoadCategory::VeryLight);
        assert_eq!(LoadCategory::from_load(dec!(149.9)), LoadCategory::VeryLight);
        assert_eq!(LoadCategory::from_load(dec!(150)), LoadCategory::Light);
        assert_eq!(LoadCategory::from_load(dec!(299)), LoadCategory::Light);
        assert_eq!(LoadCategory::from_load(dec!(300)), LoadCategory::Moderate);
        assert_eq!(LoadCategory::from_load(dec!(450)), LoadCategory::Hard);
        assert_eq!(LoadCategory::from_load(dec!(600)), LoadCategory::VeryHard);
        assert_eq!(LoadCategory::from_load(dec!(1200)), LoadCategory::VeryHard);
    }

    #[test]
    fn test_load_category_display_and_metadata() {
        assert_eq!(format!("{}", LoadCategory::VeryHard), "Very Hard");
        assert!(!LoadCategory::Moderate.color().is_empty());
        assert!(LoadCategory::Hard.description().contains("Hard"));
    }

    #[test]
    fn test_weekly_distribution() {
        let observations = vec![
            session(1, dec!(100)),  // very light
            session(2, dec!(350)),  // moderate
            session(3, dec!(350)),  // moderate
            session(4, dec!(700)),  // very hard
        ];

        let distribution = LoadCalculator::weekly_distribution(&observations);
        assert_eq!(distribution.total_load, dec!(1500));
        assert_eq!(distribution.average_load, dec!(375));
        assert_eq!(distribution.session_count, 4);
        assert_eq!(
            distribution.sessions_per_category.get(&LoadCategory::Moderate),
            Some(&2)
        );
        assert_eq!(
            distribution.sessions_per_category.get(&LoadCategory::VeryHard),
            Some(&1)
        );
        assert_eq!(
            distribution.sessions_per_category.get(&LoadCategory::Hard),
            None
        );
    }

    #[test]
    fn test_weekly_distribution_empty() {
        let distribution = LoadCalculator::weekly_distribution(&[]);
        assert_eq!(distribution.total_load, Decimal::ZERO);
        assert_eq!(distribution.average_load, Decimal::ZERO);
        assert_eq!(distribution.session_count, 0);
        assert!(distribution.sessions_per_category.is_empty());
    }

    #[test]
    fn test_input_slice_not_mutated() {
        let calculator = LoadCalculator::new();
        let observations = vec![session(3, dec!(300)), session(1, dec!(100))];
        let before = observations.clone();

        let _ = calculator.rolling_snapshot(&observations);
        assert_eq!(observations, before);
    }
}
