//! Score aggregation
//!
//! Reduces category scores to one overall percentage. Knowledge-gap
//! categories are excluded from the mean; an assessment in which every
//! category is a gap is a distinct [`ScoreState`], never a score of zero.

use crate::error::ScoringError;
use cma_model::{CategoryScore, MAX_SCORE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall maturity score, always within `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OverallScore(u8);

impl OverallScore {
    /// Create score, clamping to 100
    #[inline]
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.min(MAX_SCORE))
    }

    #[inline]
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for OverallScore {
    type Error = ScoringError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > MAX_SCORE {
            return Err(ScoringError::OverallOutOfRange(value));
        }
        Ok(Self(value))
    }
}

impl From<OverallScore> for u8 {
    fn from(score: OverallScore) -> Self {
        score.0
    }
}

impl fmt::Display for OverallScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// What an assessment's category scores support computing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "overall_score", rename_all = "snake_case")]
pub enum ScoreState {
    /// No categories at all
    Empty,
    /// Every category is a knowledge gap
    AllKnowledgeGap,
    /// At least one numeric score
    Scored(OverallScore),
}

impl ScoreState {
    /// Overall score, if numeric
    #[inline]
    #[must_use]
    pub fn overall(&self) -> Option<OverallScore> {
        match self {
            ScoreState::Scored(score) => Some(*score),
            ScoreState::Empty | ScoreState::AllKnowledgeGap => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_all_knowledge_gap(&self) -> bool {
        matches!(self, ScoreState::AllKnowledgeGap)
    }
}

/// Detect the state before any numeric consumer runs
#[must_use]
pub fn detect(scores: &[CategoryScore]) -> ScoreState {
    if scores.is_empty() {
        return ScoreState::Empty;
    }
    match aggregate(scores) {
        Ok(overall) => ScoreState::Scored(overall),
        Err(_) => ScoreState::AllKnowledgeGap,
    }
}

/// Rounded mean of the numeric (non-gap) category scores
///
/// Order independent. Halves round up, so a mean of 44.5 becomes 45.
///
/// # Errors
/// Returns `ScoringError::NoScoredCategories` when the list is empty or
/// contains only knowledge gaps
pub fn aggregate(scores: &[CategoryScore]) -> Result<OverallScore, ScoringError> {
    let (sum, count) = scores
        .iter()
        .filter_map(CategoryScore::numeric_score)
        .fold((0u64, 0u64), |(sum, count), s| (sum + u64::from(s), count + 1));

    if count == 0 {
        return Err(ScoringError::NoScoredCategories {
            total: scores.len(),
        });
    }

    // Integer round-half-up of sum / count
    let rounded = (2 * sum + count) / (2 * count);
    let value = u8::try_from(rounded).unwrap_or(MAX_SCORE);
    Ok(OverallScore::new(value))
}
