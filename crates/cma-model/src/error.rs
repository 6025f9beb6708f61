//! Error types for the assessment model
//!
//! All of these are ingestion-boundary failures: a value that violates a
//! model invariant is rejected before it can reach the scoring engine.

/// Model validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Category score outside `[-1, 100]`
    #[error("score {score} for category '{category}' is outside [-1, 100]")]
    ScoreOutOfRange { category: String, score: i64 },

    /// Category identifier is empty or whitespace
    #[error("category id must not be empty")]
    EmptyCategoryId,

    /// Same category appears twice in one assessment
    #[error("duplicate category in assessment: {0}")]
    DuplicateCategory(String),

    /// Overall score reported by the assessment backend is outside `[0, 100]`
    #[error("reported overall score {0} is outside [0, 100]")]
    ReportedScoreOutOfRange(i64),

    /// Severity tier outside 1..=3
    #[error("invalid severity tier: {0} (expected 1, 2 or 3)")]
    InvalidSeverity(u8),

    /// Unsupported language tag
    #[error("unsupported language: {0}")]
    UnknownLanguage(String),

    /// Velocity table is unusable for estimation
    #[error("invalid velocity table: {0}")]
    InvalidVelocity(String),
}
