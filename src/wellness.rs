//! Wellness questionnaire scoring and trend analysis.
//!
//! # Sports Science Background
//!
//! Daily wellness questionnaires (fatigue, soreness, stress, motivation,
//! overall feeling) are the cheapest reliable early-warning signal for
//! non-functional overreaching. The composite score weights the five
//! sub-metrics and inverts the "lower is better" ones so that a higher score
//! always reads as better readiness. Single-metric threshold breaches are
//! reported as independent red flags because a good composite can mask one
//! alarming sub-metric.

use crate::models::{TrendDirection, TrendResult, WellnessDraft, WellnessObservation};
use crate::stats;
use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

// Composite weights; fatigue, soreness and stress are inverted (11 - value)
// before weighting because lower raw values are better for those three.
const WEIGHT_FATIGUE: Decimal = dec!(0.25);
const WEIGHT_SORENESS: Decimal = dec!(0.20);
const WEIGHT_STRESS: Decimal = dec!(0.20);
const WEIGHT_MOTIVATION: Decimal = dec!(0.15);
const WEIGHT_OVERALL: Decimal = dec!(0.20);

/// Wellness score bands with display metadata and fixed recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WellnessCategory {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl WellnessCategory {
    /// Band a composite score: <4 poor, <6 fair, <8 good, >=8 excellent
    pub fn from_score(score: Decimal) -> Self {
        if score < dec!(4) {
            WellnessCategory::Poor
        } else if score < dec!(6) {
            WellnessCategory::Fair
        } else if score < dec!(8) {
            WellnessCategory::Good
        } else {
            WellnessCategory::Excellent
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            WellnessCategory::Poor => "#F44336",
            WellnessCategory::Fair => "#FF9800",
            WellnessCategory::Good => "#8BC34A",
            WellnessCategory::Excellent => "#4CAF50",
        }
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            WellnessCategory::Poor => &[
                "Replace today's planned session with active recovery",
                "Identify the worst sub-metric and address it directly",
                "Re-assess tomorrow before resuming normal training",
            ],
            WellnessCategory::Fair => &[
                "Reduce today's intensity or volume",
                "Prioritize sleep tonight",
                "Keep an eye on whichever sub-metric is dragging the score down",
            ],
            WellnessCategory::Good => &[
                "Proceed with the planned session",
                "Maintain current recovery habits",
            ],
            WellnessCategory::Excellent => &[
                "Readiness is high; a demanding session will be well absorbed",
                "Keep the current routine going",
            ],
        }
    }
}

impl fmt::Display for WellnessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WellnessCategory::Poor => write!(f, "Poor"),
            WellnessCategory::Fair => write!(f, "Fair"),
            WellnessCategory::Good => write!(f, "Good"),
            WellnessCategory::Excellent => write!(f, "Excellent"),
        }
    }
}

/// Composite score with its band and the band's recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessScoreResult {
    pub score: Decimal,
    pub category: WellnessCategory,
    pub color: String,
    pub recommendations: Vec<String>,
}

/// Trend classification configuration.
///
/// Wellness trends classify the regression slope as a *percentage of the
/// window average*, not as an absolute slope: a 0.1-point daily drift means
/// something different at an average score of 3 than at 9. The sleep module
/// uses an absolute band instead; the two thresholds are deliberately
/// distinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessConfig {
    /// Stability band in percent of the window average
    pub stable_band_pct: f64,
}

impl Default for WellnessConfig {
    fn default() -> Self {
        WellnessConfig {
            stable_band_pct: 2.0,
        }
    }
}

/// Wellness composite scoring, red flags and trend engine.
pub struct WellnessAnalyzer {
    config: WellnessConfig,
}

impl WellnessAnalyzer {
    pub fn new() -> Self {
        WellnessAnalyzer {
            config: WellnessConfig::default(),
        }
    }

    pub fn with_config(config: WellnessConfig) -> Self {
        WellnessAnalyzer { config }
    }

    /// Weighted composite wellness score on the 1-10 scale, rounded to 2
    /// decimals.
    pub fn score(observation: &WellnessObservation) -> Decimal {
        let inverted = |value: u8| Decimal::from(11 - i16::from(value));

        let composite = inverted(observation.fatigue) * WEIGHT_FATIGUE
            + inverted(observation.soreness) * WEIGHT_SORENESS
            + inverted(observation.stress) * WEIGHT_STRESS
            + Decimal::from(observation.motivation) * WEIGHT_MOTIVATION
            + Decimal::from(observation.overall_feeling) * WEIGHT_OVERALL;

        composite.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Composite score bundled with its category, color and recommendations
    pub fn score_result(observation: &WellnessObservation) -> WellnessScoreResult {
        let score = Self::score(observation);
        let category = WellnessCategory::from_score(score);

        WellnessScoreResult {
            score,
            category,
            color: category.color().to_string(),
            recommendations: category
                .recommendations()
                .iter()
                .map(|r| r.to_string())
                .collect(),
        }
    }

    /// Multi-day wellness trend over the last `days` entries.
    ///
    /// Sorts ascending by date, scores each entry and classifies the OLS
    /// slope relative to the window average with a percent stability band.
    pub fn trend(&self, observations: &[WellnessObservation], days: usize) -> TrendResult {
        if observations.is_empty() || days == 0 {
            return TrendResult::stable();
        }

        let mut sorted = observations.to_vec();
        sorted.sort_by_key(|obs| obs.date);

        let tail = &sorted[sorted.len().saturating_sub(days)..];
        let scores: Vec<f64> = tail
            .iter()
            .map(|obs| Self::score(obs).to_f64().unwrap_or(0.0))
            .collect();

        let average = stats::mean(&scores);
        if scores.len() < 2 {
            return TrendResult {
                direction: TrendDirection::Stable,
                magnitude: 0.0,
                average,
            };
        }

        let slope = stats::linear_trend_slope(&scores);
        let pct_change = if average == 0.0 {
            0.0
        } else {
            slope / average * 100.0
        };

        let direction = if pct_change.abs() < self.config.stable_band_pct {
            TrendDirection::Stable
        } else if slope > 0.0 {
            TrendDirection::Improving
        } else {
            TrendDirection::Declining
        };

        TrendResult {
            direction,
            magnitude: pct_change,
            average,
        }
    }

    /// Independent single-metric threshold breaches.
    ///
    /// Zero or more flags may fire for the same entry; a healthy composite
    /// score does not suppress them.
    pub fn red_flags(observation: &WellnessObservation) -> Vec<String> {
        let mut flags = Vec::new();

        if observation.fatigue >= 8 {
            flags.push(format!("High fatigue ({}/10)", observation.fatigue));
        }
        if observation.soreness >= 8 {
            flags.push(format!(
                "Severe muscle soreness ({}/10)",
                observation.soreness
            ));
        }
        if observation.stress >= 8 {
            flags.push(format!("High stress level ({}/10)", observation.stress));
        }
        if observation.motivation <= 3 {
            flags.push(format!("Very low motivation ({}/10)", observation.motivation));
        }
        if observation.overall_feeling <= 3 {
            flags.push(format!(
                "Poor overall feeling ({}/10)",
                observation.overall_feeling
            ));
        }
        if let Some(quality) = observation.sleep_quality {
            if quality <= 4 {
                flags.push(format!("Poor sleep quality ({}/10)", quality));
            }
        }
        if let Some(duration) = observation.sleep_duration_hours {
            if duration < dec!(6) {
                flags.push(format!("Insufficient sleep ({} h)", duration));
            }
        }

        flags
    }

    /// Per-metric, threshold-driven advice for a single entry
    pub fn recommendations(observation: &WellnessObservation) -> Vec<String> {
        let mut advice = Vec::new();

        if observation.fatigue >= 7 {
            advice.push("Fatigue is elevated; consider a lighter session or an extra rest day".to_string());
        }
        if observation.soreness >= 7 {
            advice.push("Soreness is high; prioritize stretching, foam rolling or massage".to_string());
        }
        if observation.stress >= 7 {
            advice.push("Stress is high; add relaxation work such as breathing exercises or an easy walk".to_string());
        }
        if observation.motivation <= 4 {
            advice.push("Motivation is low; vary the training content or train with a group".to_string());
        }
        if let Some(quality) = observation.sleep_quality {
            if quality <= 5 {
                advice.push("Sleep quality is poor; review the evening routine".to_string());
            }
        }
        if let Some(duration) = observation.sleep_duration_hours {
            if duration < dec!(7) {
                advice.push("Aim for at least 7 hours of sleep".to_string());
            }
        }
        if Self::score(observation) >= dec!(8) {
            advice.push("Excellent readiness; a good day for a demanding session".to_string());
        }

        advice
    }

    /// Soft validation of a form-shaped entry; returns messages, never fails
    pub fn validate(draft: &WellnessDraft) -> Vec<String> {
        let mut errors = Vec::new();

        if draft.date.is_none() {
            errors.push("Date is required".to_string());
        }

        let required = [
            ("Fatigue", draft.fatigue),
            ("Soreness", draft.soreness),
            ("Stress", draft.stress),
            ("Motivation", draft.motivation),
            ("Overall feeling", draft.overall_feeling),
        ];
        for (name, value) in required {
            match value {
                None => errors.push(format!("{} is required", name)),
                Some(v) if !(1..=10).contains(&v) => {
                    errors.push(format!("{} must be between 1 and 10 (got {})", name, v));
                }
                Some(_) => {}
            }
        }

        if let Some(quality) = draft.sleep_quality {
            if !(1..=10).contains(&quality) {
                errors.push(format!(
                    "Sleep quality must be between 1 and 10 (got {})",
                    quality
                ));
            }
        }
        if let Some(duration) = draft.sleep_duration_hours {
            if !(0.0..=24.0).contains(&duration) {
                errors.push(format!(
                    "Sleep duration must be between 0 and 24 hours (got {})",
                    duration
                ));
            }
        }

        errors
    }
}

impl Default for WellnessAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
