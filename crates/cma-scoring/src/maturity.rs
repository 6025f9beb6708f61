//! Maturity classification
//!
//! Maps an overall score onto a tier with a threshold table. The table stores
//! the lower bound of every tier above beginner, which keeps the ranges
//! contiguous and non-overlapping by construction; [`MaturityThresholds::validate`]
//! checks that they also increase.
//!
//! The knowledge-gap pseudo tier is never produced here. Callers map
//! [`ScoreState::AllKnowledgeGap`](crate::ScoreState) to it explicitly.

use crate::aggregate::{OverallScore, ScoreState};
use crate::error::ScoringError;
use cma_model::{MaturityLevel, MaturityTag, MAX_SCORE};
use serde::{Deserialize, Serialize};

/// Lower bounds for each tier above beginner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaturityThresholds {
    pub intermediate: u8,
    pub advanced: u8,
    pub expert: u8,
}

impl Default for MaturityThresholds {
    fn default() -> Self {
        Self {
            intermediate: 30,
            advanced: 60,
            expert: 85,
        }
    }
}

impl MaturityThresholds {
    /// Create thresholds, validating order
    ///
    /// # Errors
    /// See [`MaturityThresholds::validate`]
    pub fn new(intermediate: u8, advanced: u8, expert: u8) -> Result<Self, ScoringError> {
        let thresholds = Self {
            intermediate,
            advanced,
            expert,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check `0 < intermediate < advanced < expert <= 100`
    ///
    /// # Errors
    /// Returns `ScoringError::InvalidThresholds` describing the violation
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.intermediate == 0 {
            return Err(ScoringError::InvalidThresholds(
                "intermediate must be above 0 so beginner is non-empty".to_string(),
            ));
        }
        if !(self.intermediate < self.advanced && self.advanced < self.expert) {
            return Err(ScoringError::InvalidThresholds(format!(
                "tiers must strictly increase, got {}/{}/{}",
                self.intermediate, self.advanced, self.expert
            )));
        }
        if self.expert > MAX_SCORE {
            return Err(ScoringError::InvalidThresholds(format!(
                "expert threshold {} exceeds {MAX_SCORE}",
                self.expert
            )));
        }
        Ok(())
    }

    /// Tier for an overall score
    #[must_use]
    pub fn classify(&self, score: OverallScore) -> MaturityLevel {
        let s = score.value();
        if s >= self.expert {
            MaturityLevel::Expert
        } else if s >= self.advanced {
            MaturityLevel::Advanced
        } else if s >= self.intermediate {
            MaturityLevel::Intermediate
        } else {
            MaturityLevel::Beginner
        }
    }

    /// Lowest score that classifies as `level`
    #[inline]
    #[must_use]
    pub fn lower_bound(&self, level: MaturityLevel) -> u8 {
        match level {
            MaturityLevel::Beginner => 0,
            MaturityLevel::Intermediate => self.intermediate,
            MaturityLevel::Advanced => self.advanced,
            MaturityLevel::Expert => self.expert,
        }
    }

    /// Tag for a score state; `None` when there are no categories
    #[must_use]
    pub fn classify_state(&self, state: &ScoreState) -> Option<MaturityTag> {
        match state {
            ScoreState::Scored(score) => Some(self.classify(*score).into()),
            ScoreState::AllKnowledgeGap => Some(MaturityTag::KnowledgeGap),
            ScoreState::Empty => None,
        }
    }
}

/// Classify with the default threshold table
#[inline]
#[must_use]
pub fn classify(score: OverallScore) -> MaturityLevel {
    MaturityThresholds::default().classify(score)
}
