//! Unified error hierarchy for the analytics engine.
//!
//! Two policies coexist and stay separate: domain-invariant violations in
//! direct calculation entry points surface as typed errors below, while the
//! form-shaped validation entry points return lists of message strings and
//! never fail. Insufficient data (empty series, zero chronic load, too few
//! points for a regression) is neither: it resolves to documented
//! zero/neutral sentinels.

use crate::load::LoadError;
use crate::risk::RiskError;
use thiserror::Error;

/// Top-level error type for all engine operations
#[derive(Debug, Error)]
pub enum AthlyzeError {
    /// Training load calculation errors
    #[error("Load calculation error: {0}")]
    Load(#[from] LoadError),

    /// Risk assessment errors
    #[error("Risk assessment error: {0}")]
    Risk(#[from] RiskError),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, AthlyzeError>;

/// Error severity levels for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Critical,
    Error,
    Warning,
}

impl AthlyzeError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AthlyzeError::Validation(_) => ErrorSeverity::Warning,
            AthlyzeError::Internal(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical | ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
