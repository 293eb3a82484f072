//! Shared statistical primitives used by every analyzer: entry-count rolling
//! windows, ordinary least-squares trend slopes and population dispersion.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use statrs::statistics::Statistics;

/// Arithmetic mean of the trailing `window` entries of a dated series.
///
/// The series is sorted ascending by date internally; the caller's slice is
/// never mutated. The window counts the most recent *entries*, not calendar
/// days: with sparse logging the window still pulls the last N records
/// regardless of gaps. Returns zero for an empty series or a zero window.
pub fn rolling_average(series: &[(NaiveDate, Decimal)], window: usize) -> Decimal {
    if series.is_empty() || window == 0 {
        return Decimal::ZERO;
    }

    let mut sorted = series.to_vec();
    sorted.sort_by_key(|(date, _)| *date);

    let tail = &sorted[sorted.len().saturating_sub(window)..];
    let sum: Decimal = tail.iter().map(|(_, value)| *value).sum();

    sum / Decimal::from(tail.len())
}

/// Ordinary least-squares slope of `values` against index positions 0..n-1.
///
/// Index positions stand in for time: the series is assumed to already be in
/// chronological order. Fewer than 2 points yields a slope of zero, the
/// degenerate "stable" sentinel.
pub fn linear_trend_slope(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;

    let numerator: f64 = values
        .iter()
        .enumerate()
        .map(|(i, &y)| (i as f64 - x_mean) * (y - y_mean))
        .sum();

    let denominator: f64 = (0..values.len())
        .map(|i| (i as f64 - x_mean).powi(2))
        .sum();

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Arithmetic mean; zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    Statistics::mean(values)
}

/// Population standard deviation; zero for an empty slice.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    Statistics::population_std_dev(values)
}
