//! Assessment snapshots
//!
//! An [`Assessment`] owns its ordered category scores. Re-assessment produces
//! a new snapshot instead of mutating an existing one.

use crate::error::ModelError;
use crate::ids::{AssessmentId, OrganizationId};
use crate::score::{CategoryScore, MAX_SCORE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Completed questionnaire snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAssessment", into = "RawAssessment")]
pub struct Assessment {
    id: AssessmentId,
    organization_id: Option<OrganizationId>,
    category_scores: Vec<CategoryScore>,
    completion_date: Option<DateTime<Utc>>,
    reported_overall_score: Option<u8>,
}

impl Assessment {
    /// Create assessment from ordered category scores
    ///
    /// # Errors
    /// Returns `ModelError::DuplicateCategory` if a category appears twice
    pub fn new(id: AssessmentId, category_scores: Vec<CategoryScore>) -> Result<Self, ModelError> {
        let mut seen = HashSet::with_capacity(category_scores.len());
        for score in &category_scores {
            if !seen.insert(score.category_id()) {
                return Err(ModelError::DuplicateCategory(score.category_id().to_string()));
            }
        }

        Ok(Self {
            id,
            organization_id: None,
            category_scores,
            completion_date: None,
            reported_overall_score: None,
        })
    }

    /// With organization reference
    #[inline]
    #[must_use]
    pub fn with_organization(mut self, organization_id: OrganizationId) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    /// With completion timestamp
    #[inline]
    #[must_use]
    pub fn with_completion_date(mut self, completed: DateTime<Utc>) -> Self {
        self.completion_date = Some(completed);
        self
    }

    /// With the overall score stored by the assessment backend
    ///
    /// Only consulted when every category is a knowledge gap.
    ///
    /// # Errors
    /// Returns `ModelError::ReportedScoreOutOfRange` above 100
    pub fn with_reported_overall_score(mut self, score: u8) -> Result<Self, ModelError> {
        if score > MAX_SCORE {
            return Err(ModelError::ReportedScoreOutOfRange(i64::from(score)));
        }
        self.reported_overall_score = Some(score);
        Ok(self)
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &AssessmentId {
        &self.id
    }

    #[inline]
    #[must_use]
    pub fn organization_id(&self) -> Option<&OrganizationId> {
        self.organization_id.as_ref()
    }

    /// Category scores in questionnaire order
    #[inline]
    #[must_use]
    pub fn category_scores(&self) -> &[CategoryScore] {
        &self.category_scores
    }

    #[inline]
    #[must_use]
    pub fn completion_date(&self) -> Option<DateTime<Utc>> {
        self.completion_date
    }

    #[inline]
    #[must_use]
    pub fn reported_overall_score(&self) -> Option<u8> {
        self.reported_overall_score
    }

    /// Answered vs. unanswered category counts
    #[must_use]
    pub fn completeness(&self) -> Completeness {
        Completeness::of(&self.category_scores)
    }
}

/// Completeness summary of a set of category scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Completeness {
    /// Categories in the assessment
    pub total: usize,
    /// Categories with a numeric score
    pub answered: usize,
    /// Categories marked as knowledge gaps
    pub knowledge_gaps: usize,
}

impl Completeness {
    /// Count answered and knowledge-gap categories
    #[must_use]
    pub fn of(scores: &[CategoryScore]) -> Self {
        let knowledge_gaps = scores.iter().filter(|s| s.is_knowledge_gap()).count();
        Self {
            total: scores.len(),
            answered: scores.len() - knowledge_gaps,
            knowledge_gaps,
        }
    }

    /// Fraction of categories answered, 0.0 for an empty assessment
    #[inline]
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.answered as f64 / self.total as f64
        }
    }

    /// Every category present is a knowledge gap
    #[inline]
    #[must_use]
    pub fn is_all_knowledge_gap(&self) -> bool {
        self.total > 0 && self.answered == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawAssessment {
    #[serde(default = "AssessmentId::generate")]
    id: AssessmentId,
    #[serde(default, alias = "organizationId", skip_serializing_if = "Option::is_none")]
    organization_id: Option<OrganizationId>,
    #[serde(alias = "categoryScores")]
    category_scores: Vec<CategoryScore>,
    #[serde(default, alias = "completionDate", skip_serializing_if = "Option::is_none")]
    completion_date: Option<DateTime<Utc>>,
    #[serde(default, alias = "overallScore", skip_serializing_if = "Option::is_none")]
    reported_overall_score: Option<i64>,
}

impl TryFrom<RawAssessment> for Assessment {
    type Error = ModelError;

    fn try_from(raw: RawAssessment) -> Result<Self, Self::Error> {
        let mut assessment = Assessment::new(raw.id, raw.category_scores)?;
        assessment.organization_id = raw.organization_id;
        assessment.completion_date = raw.completion_date;
        if let Some(reported) = raw.reported_overall_score {
            let score = u8::try_from(reported)
                .map_err(|_| ModelError::ReportedScoreOutOfRange(reported))?;
            assessment = assessment.with_reported_overall_score(score)?;
        }
        Ok(assessment)
    }
}

impl From<Assessment> for RawAssessment {
    fn from(a: Assessment) -> Self {
        Self {
            id: a.id,
            organization_id: a.organization_id,
            category_scores: a.category_scores,
            completion_date: a.completion_date,
            reported_overall_score: a.reported_overall_score.map(i64::from),
        }
    }
}
