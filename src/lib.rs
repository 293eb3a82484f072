// Library interface for the athlyze analytics engine
// Pure computation layer: callers load observation histories and consume
// the derived metrics; no I/O or state lives here

pub mod error;
pub mod load;
pub mod logging;
pub mod models;
pub mod performance;
pub mod risk;
pub mod sleep;
pub mod stats;
pub mod wellness;

// Re-export commonly used types for convenience
pub use error::{AthlyzeError, Result};
pub use load::{
    LoadCalculator, LoadCategory, LoadConfig, LoadError, RollingLoadSnapshot, WeeklyDistribution,
};
pub use logging::{DiagnosticReport, LogConfig, LogFormat, LogLevel};
pub use models::*;
pub use performance::{EventMeasure, PerformanceAnalyzer, PerformanceImprovement};
pub use risk::{
    LoadTrendPoint, RiskAssessment, RiskAssessor, RiskError, RiskLevel, RiskZone, RISK_ZONES,
};
pub use sleep::{SleepAnalyzer, SleepConfig, SleepDuration, SleepTrend};
pub use wellness::{WellnessAnalyzer, WellnessCategory, WellnessConfig, WellnessScoreResult};
