//! Sleep duration, quality and consistency analysis.
//!
//! Durations are derived from local clock times: a wake time earlier than
//! the bed time means the period wrapped past midnight into the next
//! calendar day. Consistency scoring rewards night-to-night regularity,
//! which matters as much for recovery as total duration.

use crate::models::{SleepDraft, SleepNight, SleepRecord, TrendDirection, TrendResult};
use crate::stats;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Sleep duration broken into clock parts plus decimal hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepDuration {
    pub hours: u32,
    pub minutes: u32,
    pub total_hours: f64,
}

impl SleepDuration {
    /// All-zero sentinel for missing or unparsable input
    pub fn zero() -> Self {
        SleepDuration {
            hours: 0,
            minutes: 0,
            total_hours: 0.0,
        }
    }
}

/// Multi-night sleep summary with quality trend and consistency score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepTrend {
    pub average_duration_hours: f64,
    pub average_quality: f64,

    /// Quality trend, classified with an absolute slope band
    pub quality_trend: TrendResult,

    /// 0-100; 100 means identical duration every night
    pub consistency_score: f64,
}

/// Trend and consistency tuning.
///
/// The quality trend uses an *absolute* slope band (quality lives on a fixed
/// 1-4 scale), unlike the wellness trend's percent-of-average band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepConfig {
    /// Absolute slope band within which the quality trend reads as stable
    pub stable_band: f64,

    /// Consistency penalty per hour of duration standard deviation
    pub consistency_penalty: f64,
}

impl Default for SleepConfig {
    fn default() -> Self {
        SleepConfig {
            stable_band: 0.1,
            consistency_penalty: 10.0,
        }
    }
}

/// Sleep duration, trend and validation engine.
pub struct SleepAnalyzer {
    config: SleepConfig,
}

impl SleepAnalyzer {
    pub fn new() -> Self {
        SleepAnalyzer {
            config: SleepConfig::default(),
        }
    }

    pub fn with_config(config: SleepConfig) -> Self {
        SleepAnalyzer { config }
    }

    /// Duration between two local clock times ("HH:MM" or "HH:MM:SS").
    ///
    /// An end time earlier than the start time is read as the following
    /// calendar day (overnight sleep). Empty input yields the zero sentinel;
    /// unparsable input logs a warning and yields the zero sentinel, it
    /// never panics: duration feeds soft form flows where a bad string must
    /// not take the whole computation down.
    pub fn duration_between(start: &str, end: &str) -> SleepDuration {
        if start.trim().is_empty() || end.trim().is_empty() {
            return SleepDuration::zero();
        }

        let (start_time, end_time) = match (Self::parse_clock(start), Self::parse_clock(end)) {
            (Some(s), Some(e)) => (s, e),
            _ => {
                warn!(start, end, "unparsable sleep clock time, returning zero duration");
                return SleepDuration::zero();
            }
        };

        let start_secs = i64::from(start_time.num_seconds_from_midnight());
        let mut end_secs = i64::from(end_time.num_seconds_from_midnight());
        if end_secs < start_secs {
            // Wake-up is on the next calendar day
            end_secs += 24 * 3600;
        }

        let total_secs = end_secs - start_secs;
        SleepDuration {
            hours: (total_secs / 3600) as u32,
            minutes: ((total_secs % 3600) / 60) as u32,
            total_hours: total_secs as f64 / 3600.0,
        }
    }

    /// Summarize a stored record into the per-night shape trend analysis
    /// consumes. A record with unusable clock times becomes a zero-duration
    /// night; the quality value carries through either way.
    pub fn night_from_record(record: &SleepRecord) -> SleepNight {
        let duration = Self::duration_between(&record.start_time, &record.end_time);

        SleepNight {
            date: record.date,
            duration_hours: duration.total_hours,
            quality: record.quality,
        }
    }

    /// Map a 1-4 quality level to its display text; unmapped values read as
    /// "unknown" rather than failing
    pub fn quality_text(level: u8) -> &'static str {
        match level {
            1 => "poor",
            2 => "fair",
            3 => "good",
            4 => "excellent",
            _ => "unknown",
        }
    }

    /// Multi-night trend over the last `days` nights.
    pub fn trend(&self, nights: &[SleepNight], days: usize) -> SleepTrend {
        if nights.is_empty() || days == 0 {
            return SleepTrend {
                average_duration_hours: 0.0,
                average_quality: 0.0,
                quality_trend: TrendResult::stable(),
                consistency_score: 0.0,
            };
        }

        let mut sorted = nights.to_vec();
        sorted.sort_by_key(|night| night.date);
        let tail = &sorted[sorted.len().saturating_sub(days)..];

        let durations: Vec<f64> = tail.iter().map(|night| night.duration_hours).collect();
        let qualities: Vec<f64> = tail.iter().map(|night| f64::from(night.quality)).collect();

        let average_duration_hours = stats::mean(&durations);
        let average_quality = stats::mean(&qualities);

        let slope = stats::linear_trend_slope(&qualities);
        let direction = if qualities.len() < 2 || slope.abs() < self.config.stable_band {
            TrendDirection::Stable
        } else if slope > 0.0 {
            TrendDirection::Improving
        } else {
            TrendDirection::Declining
        };

        let consistency_score =
            (100.0 - stats::population_std_dev(&durations) * self.config.consistency_penalty)
                .max(0.0);

        SleepTrend {
            average_duration_hours,
            average_quality,
            quality_trend: TrendResult {
                direction,
                magnitude: slope,
                average: average_quality,
            },
            consistency_score,
        }
    }

    /// Soft validation of a form-shaped sleep entry; returns messages,
    /// never fails
    pub fn validate(draft: &SleepDraft) -> Vec<String> {
        let mut errors = Vec::new();

        if draft.date.is_none() {
            errors.push("Date is required".to_string());
        }

        let start = draft.start_time.as_deref().unwrap_or("");
        let end = draft.end_time.as_deref().unwrap_or("");
        if start.trim().is_empty() {
            errors.push("Bed time is required".to_string());
        }
        if end.trim().is_empty() {
            errors.push("Wake time is required".to_string());
        }

        if let Some(quality) = draft.quality {
            if !(1..=4).contains(&quality) {
                errors.push(format!(
                    "Sleep quality must be between 1 and 4 (got {})",
                    quality
                ));
            }
        }

        if !start.trim().is_empty() && !end.trim().is_empty() {
            let duration = Self::duration_between(start, end);
            if duration.total_hours > 16.0 {
                errors.push(format!(
                    "Sleep duration of {:.1} hours exceeds 16 hours; check the recorded times",
                    duration.total_hours
                ));
            } else if duration.total_hours < 0.5 {
                errors.push(format!(
                    "Sleep duration of {:.1} hours is under 30 minutes; check the recorded times",
                    duration.total_hours
                ));
            }
        }

        errors
    }

    /// Threshold-driven advice from multi-night averages
    pub fn recommendations(average_duration_hours: f64, average_quality: f64) -> Vec<String> {
        let mut advice = Vec::new();

        if average_duration_hours < 7.0 {
            advice.push(
                "Average sleep is below 7 hours; aim for 7-9 hours per night".to_string(),
            );
        } else if average_duration_hours > 9.0 {
            advice.push(
                "Average sleep exceeds 9 hours; consistently long sleep can signal incomplete recovery"
                    .to_string(),
            );
        }

        if average_quality < 2.5 {
            advice.push(
                "Sleep quality is low; review sleep hygiene: cool dark room, regular schedule, no screens late"
                    .to_string(),
            );
        } else if average_quality >= 3.5 {
            advice.push("Sleep quality is consistently good; keep the current routine".to_string());
        }

        advice
    }

    fn parse_clock(value: &str) -> Option<NaiveTime> {
        let value = value.trim();
        NaiveTime::parse_from_str(value, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
            .ok()
    }
}

impl Default for SleepAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
