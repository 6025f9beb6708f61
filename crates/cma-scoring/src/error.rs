//! Error types for scoring
//!
//! Scoring functions have no recovery strategy, so these only describe
//! caller contract violations.

/// Scoring errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    /// No category carries a numeric score; the caller should have detected
    /// the empty or all-knowledge-gap state first
    #[error("no scored categories to aggregate ({total} categories, all knowledge gaps or none)")]
    NoScoredCategories { total: usize },

    /// Overall score above 100
    #[error("overall score {0} is outside [0, 100]")]
    OverallOutOfRange(u8),

    /// Maturity threshold table is not contiguous and increasing
    #[error("invalid maturity thresholds: {0}")]
    InvalidThresholds(String),
}
