//! Per-category scores and maturity tags

use crate::error::ModelError;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// Sentinel score for a category with no usable answers
pub const KNOWLEDGE_GAP_SCORE: i8 = -1;

/// Highest possible category or overall score
pub const MAX_SCORE: u8 = 100;

/// Ordinal maturity tier derived from a numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityLevel {
    /// Ad-hoc cloud usage
    Beginner,
    /// Repeatable practices in place
    Intermediate,
    /// Automated and measured
    Advanced,
    /// Continuously optimized
    Expert,
}

impl MaturityLevel {
    /// All tiers, lowest first
    pub const ALL: [MaturityLevel; 4] = [
        MaturityLevel::Beginner,
        MaturityLevel::Intermediate,
        MaturityLevel::Advanced,
        MaturityLevel::Expert,
    ];

    /// The tier directly above this one, `None` for expert
    #[inline]
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            MaturityLevel::Beginner => Some(MaturityLevel::Intermediate),
            MaturityLevel::Intermediate => Some(MaturityLevel::Advanced),
            MaturityLevel::Advanced => Some(MaturityLevel::Expert),
            MaturityLevel::Expert => None,
        }
    }

    /// Stable lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MaturityLevel::Beginner => "beginner",
            MaturityLevel::Intermediate => "intermediate",
            MaturityLevel::Advanced => "advanced",
            MaturityLevel::Expert => "expert",
        }
    }
}

impl std::fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maturity tag attached to a category score by the questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityTag {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    /// No usable answers for this category
    KnowledgeGap,
}

impl From<MaturityLevel> for MaturityTag {
    fn from(level: MaturityLevel) -> Self {
        match level {
            MaturityLevel::Beginner => MaturityTag::Beginner,
            MaturityLevel::Intermediate => MaturityTag::Intermediate,
            MaturityLevel::Advanced => MaturityTag::Advanced,
            MaturityLevel::Expert => MaturityTag::Expert,
        }
    }
}

/// Score for one questionnaire category
///
/// Immutable once built. A score of `-1` or a `knowledge_gap` tag marks the
/// category as unanswered: it is excluded from averaging but still counted
/// for completeness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCategoryScore", into = "RawCategoryScore")]
pub struct CategoryScore {
    category_id: CategoryId,
    score: i8,
    maturity_level: Option<MaturityTag>,
}

impl CategoryScore {
    /// Create a category score
    ///
    /// # Errors
    /// - `ModelError::EmptyCategoryId` for a blank id
    /// - `ModelError::ScoreOutOfRange` unless `-1 <= score <= 100`
    pub fn new(category_id: impl Into<CategoryId>, score: i64) -> Result<Self, ModelError> {
        let category_id = category_id.into();
        if category_id.as_str().trim().is_empty() {
            return Err(ModelError::EmptyCategoryId);
        }
        if !(i64::from(KNOWLEDGE_GAP_SCORE)..=i64::from(MAX_SCORE)).contains(&score) {
            return Err(ModelError::ScoreOutOfRange {
                category: category_id.to_string(),
                score,
            });
        }
        let score = i8::try_from(score).map_err(|_| ModelError::ScoreOutOfRange {
            category: category_id.to_string(),
            score,
        })?;

        Ok(Self {
            category_id,
            score,
            maturity_level: (score == KNOWLEDGE_GAP_SCORE).then_some(MaturityTag::KnowledgeGap),
        })
    }

    /// Create an unanswered category
    ///
    /// # Errors
    /// Returns `ModelError::EmptyCategoryId` for a blank id
    pub fn knowledge_gap(category_id: impl Into<CategoryId>) -> Result<Self, ModelError> {
        Self::new(category_id, i64::from(KNOWLEDGE_GAP_SCORE))
    }

    /// With maturity tag from the questionnaire
    #[inline]
    #[must_use]
    pub fn with_maturity(mut self, tag: MaturityTag) -> Self {
        self.maturity_level = Some(tag);
        self
    }

    /// Category identifier
    #[inline]
    #[must_use]
    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    /// Raw score, `-1` for a knowledge gap
    #[inline]
    #[must_use]
    pub fn score(&self) -> i8 {
        self.score
    }

    /// Maturity tag, if the questionnaire supplied one
    #[inline]
    #[must_use]
    pub fn maturity_level(&self) -> Option<MaturityTag> {
        self.maturity_level
    }

    /// Whether this category has no usable data
    #[inline]
    #[must_use]
    pub fn is_knowledge_gap(&self) -> bool {
        self.score == KNOWLEDGE_GAP_SCORE || self.maturity_level == Some(MaturityTag::KnowledgeGap)
    }

    /// Numeric score for averaging, `None` for a knowledge gap
    #[inline]
    #[must_use]
    pub fn numeric_score(&self) -> Option<u8> {
        if self.is_knowledge_gap() {
            None
        } else {
            u8::try_from(self.score).ok()
        }
    }

    /// Score used by remediation formulas: knowledge gaps count as 0
    #[inline]
    #[must_use]
    pub fn effective_score(&self) -> u8 {
        self.numeric_score().unwrap_or(0)
    }
}

/// Wire form of [`CategoryScore`], validated on conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCategoryScore {
    #[serde(alias = "categoryId")]
    category_id: String,
    score: i64,
    #[serde(default, alias = "maturityLevel", skip_serializing_if = "Option::is_none")]
    maturity_level: Option<MaturityTag>,
}

impl TryFrom<RawCategoryScore> for CategoryScore {
    type Error = ModelError;

    fn try_from(raw: RawCategoryScore) -> Result<Self, Self::Error> {
        let score = CategoryScore::new(raw.category_id, raw.score)?;
        Ok(match raw.maturity_level {
            Some(tag) => score.with_maturity(tag),
            None => score,
        })
    }
}

impl From<CategoryScore> for RawCategoryScore {
    fn from(score: CategoryScore) -> Self {
        Self {
            category_id: score.category_id.to_string(),
            score: i64::from(score.score),
            maturity_level: score.maturity_level,
        }
    }
}
