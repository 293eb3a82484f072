//! ACWR-based injury risk assessment.
//!
//! # Sports Science Background
//!
//! The acute:chronic workload ratio compares the last week of training
//! (acute load) against the last four weeks (chronic load). A ratio near 1.0
//! means recent training matches the established base; sharp spikes above it
//! correlate with elevated soft-tissue injury incidence, while a very low
//! ratio indicates detraining. The zone boundaries used here follow the
//! commonly published "sweet spot" model: 0.8-1.3 optimal, above 1.5
//! increasingly risky.

use crate::load::{LoadCalculator, LoadConfig};
use crate::models::LoadObservation;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Risk assessment errors
#[derive(Error, Debug)]
pub enum RiskError {
    #[error("ACWR ratio out of range: {0} (ratio must be non-negative)")]
    RatioOutOfRange(Decimal),
}

/// Injury risk levels in ascending order of concern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::VeryHigh => write!(f, "Very High"),
        }
    }
}

/// One half-open interval [min, max) on the ratio axis with its display
/// metadata and coaching recommendations.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskZone {
    pub level: RiskLevel,

    /// Inclusive lower bound
    pub min: Decimal,

    /// Exclusive upper bound; `None` for the unbounded top zone
    pub max: Option<Decimal>,

    pub color: &'static str,
    pub description: &'static str,
    pub recommendations: &'static [&'static str],
}

/// Ordered, contiguous, non-overlapping zone table covering every
/// non-negative ratio. The last zone is unbounded above.
pub static RISK_ZONES: [RiskZone; 5] = [
    RiskZone {
        level: RiskLevel::Low,
        min: dec!(0.0),
        max: Some(dec!(0.8)),
        color: "#03A9F4",
        description: "Undertraining: acute load well below the established base",
        recommendations: &[
            "Increase training volume gradually",
            "Add one moderate session this week",
            "Detraining reduces resilience; keep the base ticking over",
        ],
    },
    RiskZone {
        level: RiskLevel::Low,
        min: dec!(0.8),
        max: Some(dec!(1.3)),
        color: "#4CAF50",
        description: "Optimal zone: acute load in balance with the chronic base",
        recommendations: &[
            "Current load progression is appropriate",
            "Maintain the mix of hard and easy sessions",
            "Keep monitoring wellness alongside load",
        ],
    },
    RiskZone {
        level: RiskLevel::Moderate,
        min: dec!(1.3),
        max: Some(dec!(1.5)),
        color: "#FFC107",
        description: "Elevated load: acute load rising faster than the base",
        recommendations: &[
            "Hold volume steady for a few days",
            "Prioritize sleep and nutrition",
            "Plan an easier day after intense sessions",
            "Watch for early niggles and heavy legs",
        ],
    },
    RiskZone {
        level: RiskLevel::High,
        min: dec!(1.5),
        max: Some(dec!(2.0)),
        color: "#FF9800",
        description: "High risk: pronounced load spike above the chronic base",
        recommendations: &[
            "Reduce training volume this week",
            "Insert an additional recovery day",
            "Avoid back-to-back high-intensity sessions",
            "Re-assess in 3-4 days before progressing",
        ],
    },
    RiskZone {
        level: RiskLevel::VeryHigh,
        min: dec!(2.0),
        max: None,
        color: "#F44336",
        description: "Very high risk: acute load at least double the chronic base",
        recommendations: &[
            "Cut volume substantially and drop intensity",
            "Schedule consecutive recovery days",
            "Coordinate with coach or medical staff before the next hard session",
        ],
    },
];

/// Injury risk assessment derived from one observation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub subject_id: String,
    pub date: NaiveDate,

    /// Acute:chronic workload ratio, rounded to 2 decimals
    pub ratio: Decimal,

    /// Acute load, rounded to 1 decimal
    pub acute_load: Decimal,

    /// Chronic load, rounded to 1 decimal
    pub chronic_load: Decimal,

    pub risk_level: RiskLevel,
    pub risk_color: String,
    pub recommendations: Vec<String>,
}

/// One point of the replayed load-trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadTrendPoint {
    pub date: NaiveDate,
    pub acute_load: Decimal,
    pub chronic_load: Decimal,
    pub ratio: Decimal,
    pub risk_level: RiskLevel,
}

/// ACWR risk zone lookup and assessment engine.
pub struct RiskAssessor {
    loads: LoadCalculator,
}

impl RiskAssessor {
    pub fn new() -> Self {
        RiskAssessor {
            loads: LoadCalculator::new(),
        }
    }

    pub fn with_config(config: LoadConfig) -> Self {
        RiskAssessor {
            loads: LoadCalculator::with_config(config),
        }
    }

    /// Find the zone containing `ratio`.
    ///
    /// Boundaries are half-open: a ratio of exactly 1.3 falls into the
    /// moderate zone, not the optimal one. A negative ratio is an error
    /// rather than a silent fallback to the lowest zone; ACWR itself can
    /// never produce one, so this is only reachable through direct calls.
    pub fn zone_for(ratio: Decimal) -> Result<&'static RiskZone, RiskError> {
        if ratio < Decimal::ZERO {
            return Err(RiskError::RatioOutOfRange(ratio));
        }

        RISK_ZONES
            .iter()
            .find(|zone| ratio >= zone.min && zone.max.map_or(true, |max| ratio < max))
            .ok_or(RiskError::RatioOutOfRange(ratio))
    }

    /// Assess injury risk for a subject from its full observation history.
    pub fn assess(
        &self,
        subject_id: &str,
        observations: &[LoadObservation],
        date: NaiveDate,
    ) -> Result<RiskAssessment, RiskError> {
        let acute = self.loads.acute_load(observations);
        let chronic = self.loads.chronic_load(observations);
        let ratio = LoadCalculator::acwr(acute, chronic);

        let zone = Self::zone_for(ratio)?;

        Ok(RiskAssessment {
            subject_id: subject_id.to_string(),
            date,
            ratio,
            acute_load: acute.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
            chronic_load: chronic
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
            risk_level: zone.level,
            risk_color: zone.color.to_string(),
            recommendations: zone.recommendations.iter().map(|r| r.to_string()).collect(),
        })
    }

    /// Replay the observation history prefix by prefix and return the last
    /// `days` trend points.
    ///
    /// Quadratic in the history length, which is fine at per-athlete daily
    /// logging volumes.
    pub fn load_trend_series(
        &self,
        observations: &[LoadObservation],
        days: usize,
    ) -> Result<Vec<LoadTrendPoint>, RiskError> {
        let mut sorted = observations.to_vec();
        sorted.sort_by_key(|obs| obs.date);

        let mut points = Vec::with_capacity(sorted.len());
        for end in 1..=sorted.len() {
            let prefix = &sorted[..end];

            let acute = self.loads.acute_load(prefix);
            let chronic = self.loads.chronic_load(prefix);
            let ratio = LoadCalculator::acwr(acute, chronic);
            let zone = Self::zone_for(ratio)?;

            points.push(LoadTrendPoint {
                date: prefix[end - 1].date,
                acute_load: acute
                    .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
                chronic_load: chronic
                    .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
                ratio,
                risk_level: zone.level,
            });
        }

        let skip = points.len().saturating_sub(days);
        Ok(points.split_off(skip))
    }
}

impl Default for RiskAssessor {
    fn default() -> Self {
        Self::new()
    }
}
