use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single logged training session with its derived session load.
///
/// Built through [`crate::load::LoadCalculator::session`], which enforces the
/// RPE and duration invariants before the load is derived. Once built, the
/// record is treated as immutable by every analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadObservation {
    /// Calendar day the session was performed
    pub date: NaiveDate,

    /// Rate of Perceived Exertion (1-10 subjective effort scale)
    pub perceived_exertion: u8,

    /// Session duration in minutes
    pub duration_minutes: Decimal,

    /// Session load in arbitrary units (RPE x duration)
    pub load: Decimal,

    /// Optional workout category label (e.g. "intervals", "strength")
    pub category: Option<String>,
}

/// Daily wellness questionnaire entry.
///
/// All sub-metrics use a 1-10 scale. For fatigue, soreness and stress a lower
/// value is better; for motivation and overall feeling a higher value is
/// better. One entry per subject per day; uniqueness of (subject, date) is
/// the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessObservation {
    /// Calendar day the questionnaire was answered
    pub date: NaiveDate,

    /// Perceived fatigue (1 = fresh, 10 = exhausted)
    pub fatigue: u8,

    /// Muscle soreness (1 = none, 10 = severe)
    pub soreness: u8,

    /// Psychological stress (1 = relaxed, 10 = very stressed)
    pub stress: u8,

    /// Training motivation (1 = none, 10 = very high)
    pub motivation: u8,

    /// Overall feeling (1 = terrible, 10 = excellent)
    pub overall_feeling: u8,

    /// Self-reported sleep quality on a 1-10 scale, if logged
    pub sleep_quality: Option<u8>,

    /// Self-reported sleep duration in hours, if logged
    pub sleep_duration_hours: Option<Decimal>,
}

/// Form-shaped wellness entry used by the soft validation entry point.
///
/// Every field is optional and loosely typed so that out-of-range input can
/// be reported as a message instead of failing to construct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellnessDraft {
    pub date: Option<NaiveDate>,
    pub fatigue: Option<i32>,
    pub soreness: Option<i32>,
    pub stress: Option<i32>,
    pub motivation: Option<i32>,
    pub overall_feeling: Option<i32>,
    pub sleep_quality: Option<i32>,
    pub sleep_duration_hours: Option<f64>,
}

/// A logged sleep period with local clock times.
///
/// `start_time`/`end_time` are "HH:MM" or "HH:MM:SS" local clock strings; an
/// end time earlier than the start time means the period wrapped past
/// midnight into the next calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepRecord {
    /// Calendar day the sleep period is attributed to (wake-up day)
    pub date: NaiveDate,

    /// Bed time, local clock ("22:30" or "22:30:00")
    pub start_time: String,

    /// Wake time, local clock
    pub end_time: String,

    /// Subjective sleep quality (1 = poor .. 4 = excellent)
    pub quality: u8,

    pub notes: Option<String>,
}

/// Form-shaped sleep entry used by the soft validation entry point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepDraft {
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub quality: Option<i32>,
    pub notes: Option<String>,
}

/// Per-night sleep summary consumed by trend analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepNight {
    pub date: NaiveDate,

    /// Sleep duration in decimal hours
    pub duration_hours: f64,

    /// Subjective sleep quality (1-4)
    pub quality: u8,
}

/// Direction of a metric trend over a multi-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Improving => write!(f, "Improving"),
            TrendDirection::Stable => write!(f, "Stable"),
            TrendDirection::Declining => write!(f, "Declining"),
        }
    }
}

/// Shared result shape for slope-based trend classification.
///
/// `magnitude` is metric-dependent: wellness trends report percent change
/// relative to the window average, sleep quality trends report the raw
/// regression slope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    pub magnitude: f64,
    pub average: f64,
}

impl TrendResult {
    /// Neutral result for windows with insufficient data
    pub fn stable() -> Self {
        TrendResult {
            direction: TrendDirection::Stable,
            magnitude: 0.0,
            average: 0.0,
        }
    }
}
