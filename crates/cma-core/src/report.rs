//! Assessment reports
//!
//! [`ScoreCard`] holds everything computable without I/O and is always
//! available. [`AssessmentReport`] adds the parts that depend on external
//! services, each already resolved to a value or its fallback.

use cma_model::{Assessment, AssessmentId, Completeness, MaturityTag, Organization, OrganizationProfile};
use cma_scoring::{OverallScore, RiskAssessment, RoadmapItem, ScoreState, TimeEstimate};
use cma_services::CostAnalysis;
use serde::{Deserialize, Serialize};

/// Synchronous scoring result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub assessment_id: AssessmentId,
    pub score: ScoreState,
    /// `None` only for an assessment with no categories
    pub maturity: Option<MaturityTag>,
    pub completeness: Completeness,
    /// One item per category, in input order
    pub roadmap: Vec<RoadmapItem>,
}

impl ScoreCard {
    #[inline]
    #[must_use]
    pub fn overall(&self) -> Option<OverallScore> {
        self.score.overall()
    }
}

/// Full evaluation of one assessment snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentReport {
    #[serde(flatten)]
    pub score_card: ScoreCard,
    pub organization: Organization,
    /// `None` for an assessment with no categories
    pub risk: Option<RiskAssessment>,
    /// `None` without a numeric baseline
    pub time_estimate: Option<TimeEstimate>,
    /// Filled by `evaluate_with_cost` or `with_cost_analysis`; `evaluate`
    /// leaves it empty so callers can track the analysis in the background
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_analysis: Option<CostAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_estimate_text: Option<String>,
}

impl AssessmentReport {
    #[inline]
    #[must_use]
    pub fn with_cost_analysis(mut self, analysis: CostAnalysis) -> Self {
        self.cost_analysis = Some(analysis);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_time_estimate_text(mut self, text: Option<String>) -> Self {
        self.time_estimate_text = text;
        self
    }
}

/// Input document: an assessment plus optional inline organization data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub assessment: Assessment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<OrganizationProfile>,
}

impl EvaluationInput {
    /// Parse and validate a JSON document
    ///
    /// # Errors
    /// Returns `EngineError::Input` for malformed JSON or invalid scores
    pub fn from_json_str(input: &str) -> Result<Self, crate::EngineError> {
        Ok(serde_json::from_str(input)?)
    }
}
