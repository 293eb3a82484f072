//! End-to-end scenarios exercising the analyzers the way the service layer
//! calls them: full observation histories in, derived structures out.

use athlyze::load::{LoadCalculator, LoadCategory};
use athlyze::models::{SleepNight, SleepRecord, TrendDirection, WellnessObservation};
use athlyze::risk::{RiskAssessor, RiskLevel};
use athlyze::sleep::SleepAnalyzer;
use athlyze::wellness::WellnessAnalyzer;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, n).unwrap()
}

fn wellness_entry(n: u32, fatigue: u8, motivation: u8) -> WellnessObservation {
    WellnessObservation {
        date: day(n),
        fatigue,
        soreness: 3,
        stress: 4,
        motivation,
        overall_feeling: 7,
        sleep_quality: Some(7),
        sleep_duration_hours: Some(dec!(7.5)),
    }
}

#[test]
fn test_training_block_risk_assessment() {
    // Four steady base weeks, then a sharp ramp week
    let mut history = Vec::new();
    for n in 1..=21 {
        history.push(LoadCalculator::session(day(n), 4, dec!(50), None).unwrap());
    }
    for n in 22..=28 {
        history.push(
            LoadCalculator::session(day(n), 8, dec!(75), Some("intervals".to_string())).unwrap(),
        );
    }

    let assessor = RiskAssessor::new();
    let assessment = assessor.assess("athlete-42", &history, day(28)).unwrap();

    // acute 600, chronic (21*200 + 7*600) / 28 = 300
    assert_eq!(assessment.acute_load, dec!(600.0));
    assert_eq!(assessment.chronic_load, dec!(300.0));
    assert_eq!(assessment.ratio, dec!(2));
    assert_eq!(assessment.risk_level, RiskLevel::VeryHigh);
    assert!(!assessment.recommendations.is_empty());

    // The replayed trend ends at the same ratio the assessment reports
    let series = assessor.load_trend_series(&history, 7).unwrap();
    assert_eq!(series.len(), 7);
    let last = series.last().unwrap();
    assert_eq!(last.date, day(28));
    assert_eq!(last.ratio, assessment.ratio);
    assert_eq!(last.risk_level, assessment.risk_level);
}

#[test]
fn test_weekly_distribution_of_mixed_block() {
    let sessions = vec![
        LoadCalculator::session(day(1), 3, dec!(40), None).unwrap(), // 120, very light
        LoadCalculator::session(day(2), 5, dec!(60), None).unwrap(), // 300, moderate
        LoadCalculator::session(day(3), 7, dec!(70), None).unwrap(), // 490, hard
        LoadCalculator::session(day(4), 9, dec!(80), None).unwrap(), // 720, very hard
    ];

    let distribution = LoadCalculator::weekly_distribution(&sessions);
    assert_eq!(distribution.total_load, dec!(1630));
    assert_eq!(distribution.average_load, dec!(407.5));
    assert_eq!(distribution.session_count, 4);
    assert_eq!(distribution.sessions_per_category.len(), 4);
    assert_eq!(
        distribution.sessions_per_category.get(&LoadCategory::Hard),
        Some(&1)
    );
}

#[test]
fn test_wellness_week_with_deteriorating_athlete() {
    let analyzer = WellnessAnalyzer::new();

    // Fatigue climbing, motivation collapsing across the week
    let week: Vec<_> = (1..=7)
        .map(|n| wellness_entry(n, (2 + n) as u8, (9 - n) as u8))
        .collect();

    let trend = analyzer.trend(&week, 7);
    assert_eq!(trend.direction, TrendDirection::Declining);
    assert!(trend.magnitude < -2.0);

    // The last day should be flagged on both failing metrics
    let last = week.last().unwrap();
    let flags = WellnessAnalyzer::red_flags(last);
    assert!(flags.iter().any(|f| f.contains("fatigue")));
    assert!(flags.iter().any(|f| f.contains("motivation")));

    let advice = WellnessAnalyzer::recommendations(last);
    assert!(advice.iter().any(|a| a.contains("lighter session")));
}

#[test]
fn test_sleep_week_analysis() {
    let analyzer = SleepAnalyzer::new();

    // Records come in the stored shape and are summarized per night first
    let nights: Vec<SleepNight> = (1..=7)
        .map(|n| {
            SleepAnalyzer::night_from_record(&SleepRecord {
                date: day(n),
                start_time: "23:00:00".to_string(),
                end_time: "06:30:00".to_string(),
                quality: 3,
                notes: None,
            })
        })
        .collect();

    let trend = analyzer.trend(&nights, 7);
    assert_eq!(trend.average_duration_hours, 7.5);
    assert_eq!(trend.average_quality, 3.0);
    assert_eq!(trend.quality_trend.direction, TrendDirection::Stable);
    assert_eq!(trend.consistency_score, 100.0);

    let advice = SleepAnalyzer::recommendations(trend.average_duration_hours, trend.average_quality);
    // 7.5h of fair-to-good sleep: nothing to flag, nothing to praise yet
    assert!(advice.is_empty());
}

#[test]
fn test_analyzers_are_idempotent() {
    let history: Vec<_> = (1..=14)
        .map(|n| LoadCalculator::session(day(n), 6, dec!(55), None).unwrap())
        .collect();
    let assessor = RiskAssessor::new();

    let first = assessor.assess("athlete-1", &history, day(14)).unwrap();
    let second = assessor.assess("athlete-1", &history, day(14)).unwrap();
    assert_eq!(first, second);

    let wellness: Vec<_> = (1..=7).map(|n| wellness_entry(n, 4, 7)).collect();
    let analyzer = WellnessAnalyzer::new();
    assert_eq!(analyzer.trend(&wellness, 7), analyzer.trend(&wellness, 7));
}

#[test]
fn test_risk_assessment_serialization_contract() {
    let assessor = RiskAssessor::new();
    let history: Vec<_> = (1..=28)
        .map(|n| LoadCalculator::session(day(n), 5, dec!(60), None).unwrap())
        .collect();

    let assessment = assessor.assess("athlete-7", &history, day(28)).unwrap();
    let json = serde_json::to_value(&assessment).unwrap();

    // Field names are the contract consumed by the service layer
    assert_eq!(json["subject_id"], "athlete-7");
    assert_eq!(json["risk_level"], "low");
    assert!(json["acute_load"].is_string() || json["acute_load"].is_number());
    assert!(json["recommendations"].is_array());
    assert!(json.get("ratio").is_some());
    assert!(json.get("chronic_load").is_some());
}

#[test]
fn test_sparse_history_still_uses_last_entries() {
    // Ten sessions spread over three months: windows are entry-counted,
    // so the acute window still spans the last seven sessions
    let dates = [
        (2024, 4, 1),
        (2024, 4, 10),
        (2024, 4, 25),
        (2024, 5, 5),
        (2024, 5, 20),
        (2024, 6, 2),
        (2024, 6, 15),
        (2024, 6, 20),
        (2024, 6, 28),
        (2024, 7, 1),
    ];
    let history: Vec<_> = dates
        .iter()
        .map(|&(y, m, d)| {
            LoadCalculator::session(
                NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                5,
                dec!(60),
                None,
            )
            .unwrap()
        })
        .collect();

    let calculator = LoadCalculator::new();
    // All loads are 300: ATL = 7*300/7, CTL = mean of 10 entries
    assert_eq!(calculator.acute_load(&history), dec!(300));
    assert_eq!(calculator.chronic_load(&history), dec!(300));
}
