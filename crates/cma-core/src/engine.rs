//! Assessment engine
//!
//! Runs the scoring pipeline explicitly instead of through change
//! notifications:
//!
//! 1. aggregate, classify and build the roadmap (pure, synchronous)
//! 2. resolve the organization, then rate risk from critical issues
//! 3. estimate time to the next tier
//!
//! Cost analysis runs separately through a [`CostAnalysisTracker`] so it
//! never holds up the rest of the report, and a newer score set always
//! replaces an older one.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::report::{AssessmentReport, ScoreCard};
use cma_model::{Assessment, CategoryScore, Language, Locale, Organization};
use cma_scoring::{detect, generate_roadmap, RiskAssessment, ScoreState, TimeEstimate, TimeEstimator};
use cma_services::{
    fetch_or_synthesize, lookup_or_default, CostAnalysis, CostAnalysisService, CostAnalysisTracker,
    CostCache, CostSavingsAnalyzer, CostState, CriticalIssuesService, EstimateFormatter,
    OfflineServices, OrganizationLookup, StaticOrganizationLookup,
};
use std::sync::Arc;
use tokio::sync::watch;

/// External collaborators of the engine
#[derive(Clone)]
pub struct EngineServices {
    pub organizations: Arc<dyn OrganizationLookup>,
    pub issues: Arc<dyn CriticalIssuesService>,
    pub cost: Arc<dyn CostAnalysisService>,
    pub formatter: Option<Arc<dyn EstimateFormatter>>,
}

impl std::fmt::Debug for EngineServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineServices")
            .field("formatter", &self.formatter.is_some())
            .finish_non_exhaustive()
    }
}

impl EngineServices {
    /// No network: lookups find nothing and every other service is unavailable
    #[must_use]
    pub fn offline() -> Self {
        Self {
            organizations: Arc::new(StaticOrganizationLookup::new()),
            issues: Arc::new(OfflineServices),
            cost: Arc::new(OfflineServices),
            formatter: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_organizations(mut self, lookup: Arc<dyn OrganizationLookup>) -> Self {
        self.organizations = lookup;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_issues(mut self, service: Arc<dyn CriticalIssuesService>) -> Self {
        self.issues = service;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_cost(mut self, service: Arc<dyn CostAnalysisService>) -> Self {
        self.cost = service;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn EstimateFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }
}

impl Default for EngineServices {
    fn default() -> Self {
        Self::offline()
    }
}

/// Scores assessments and coordinates the external services
#[derive(Debug)]
pub struct AssessmentEngine {
    config: EngineConfig,
    estimator: TimeEstimator,
    services: EngineServices,
    analyzer: Arc<CostSavingsAnalyzer>,
    cost_tracker: CostAnalysisTracker,
}

impl AssessmentEngine {
    /// Create engine, validating the configuration
    ///
    /// # Errors
    /// Returns `EngineError::Config` if the configuration is invalid
    pub fn new(config: EngineConfig, services: EngineServices) -> Result<Self, EngineError> {
        config.validate()?;

        let estimator = TimeEstimator::new(config.velocity.clone(), config.thresholds)
            .with_selection(config.effort_selection);

        let settings = config.services;
        let mut analyzer = CostSavingsAnalyzer::new(Arc::clone(&services.cost), settings.timeout());
        if settings.cost_cache_capacity > 0 {
            analyzer = analyzer.with_cache(CostCache::with_ttl(
                settings.cost_cache_capacity,
                settings.cost_cache_ttl(),
            ));
        }
        let analyzer = Arc::new(analyzer);

        Ok(Self {
            cost_tracker: CostAnalysisTracker::new(Arc::clone(&analyzer)),
            analyzer,
            estimator,
            services,
            config,
        })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Everything computable without I/O
    #[must_use]
    pub fn score_card(&self, assessment: &Assessment) -> ScoreCard {
        let scores = assessment.category_scores();
        let state = detect(scores);
        ScoreCard {
            assessment_id: assessment.id().clone(),
            score: state,
            maturity: self.config.thresholds.classify_state(&state),
            completeness: assessment.completeness(),
            roadmap: generate_roadmap(scores),
        }
    }

    /// Full evaluation; service failures resolve to their fallbacks
    #[tracing::instrument(skip(self, assessment), fields(assessment = %assessment.id()))]
    pub async fn evaluate(&self, assessment: &Assessment) -> AssessmentReport {
        let score_card = self.score_card(assessment);
        tracing::info!(
            state = ?score_card.score,
            maturity = ?score_card.maturity,
            roadmap_items = score_card.roadmap.len(),
            "assessment scored"
        );

        let organization = self.resolve_organization(assessment).await;
        let risk = self.rate_risk(assessment, &score_card.score, &organization).await;
        let time_estimate = self.estimator.estimate(
            &score_card.score,
            assessment.category_scores(),
            &score_card.roadmap,
            &organization,
        );
        if let Some(estimate) = &time_estimate {
            tracing::info!(calendar_days = estimate.calendar_days(), "time to next tier estimated");
        }

        AssessmentReport {
            score_card,
            organization,
            risk,
            time_estimate,
            cost_analysis: None,
            time_estimate_text: None,
        }
    }

    /// Evaluation with the cost analysis awaited alongside it
    pub async fn evaluate_with_cost(&self, assessment: &Assessment, locale: Locale) -> AssessmentReport {
        let (report, cost) = tokio::join!(
            self.evaluate(assessment),
            self.analyze_cost(assessment.category_scores(), locale)
        );
        report.with_cost_analysis(cost)
    }

    /// Organization context with defaults for anything missing
    pub async fn resolve_organization(&self, assessment: &Assessment) -> Organization {
        lookup_or_default(
            self.services.organizations.as_ref(),
            assessment.organization_id(),
            &self.config.organization_defaults,
            self.config.services.timeout(),
        )
        .await
    }

    async fn rate_risk(
        &self,
        assessment: &Assessment,
        state: &ScoreState,
        organization: &Organization,
    ) -> Option<RiskAssessment> {
        match state {
            ScoreState::Empty => None,
            ScoreState::AllKnowledgeGap => {
                let score = assessment.reported_overall_score().unwrap_or(0);
                Some(RiskAssessment::knowledge_gap(score))
            }
            ScoreState::Scored(overall) => {
                let (issues, source) = fetch_or_synthesize(
                    self.services.issues.as_ref(),
                    assessment,
                    organization,
                    self.config.services.timeout(),
                )
                .await;
                Some(RiskAssessment::from_issues(*overall, issues, source))
            }
        }
    }

    /// Await a cost analysis directly
    pub async fn analyze_cost(&self, scores: &[CategoryScore], locale: Locale) -> CostAnalysis {
        self.analyzer.analyze(scores, locale).await
    }

    /// Start a background cost analysis, superseding any earlier one
    ///
    /// Returns the generation of this request. Must be called from within a
    /// Tokio runtime.
    pub fn submit_cost_analysis(&self, assessment: &Assessment, locale: Locale) -> u64 {
        self.cost_tracker
            .submit(assessment.category_scores().to_vec(), locale)
    }

    #[inline]
    #[must_use]
    pub fn cost_state(&self) -> CostState {
        self.cost_tracker.current()
    }

    #[inline]
    #[must_use]
    pub fn subscribe_cost(&self) -> watch::Receiver<CostState> {
        self.cost_tracker.subscribe()
    }

    /// Wait for the latest submitted cost analysis
    pub async fn latest_cost(&self) -> Option<CostAnalysis> {
        self.cost_tracker.wait_ready().await
    }

    pub fn cancel_cost_analysis(&self) {
        self.cost_tracker.cancel();
    }

    /// Human-readable estimate via the configured formatter
    #[must_use]
    pub fn describe_estimate(&self, estimate: Option<&TimeEstimate>, language: Language) -> Option<String> {
        let formatter = self.services.formatter.as_ref()?;
        estimate.map(|e| formatter.format_estimate(e, language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cma_model::{AssessmentId, MaturityLevel, MaturityTag};
    use cma_scoring::{IssueSource, RiskTier};

    fn engine() -> AssessmentEngine {
        AssessmentEngine::new(EngineConfig::default(), EngineServices::offline()).unwrap()
    }

    fn assessment(scores: &[(&str, i64)]) -> Assessment {
        let scores = scores
            .iter()
            .map(|(c, s)| CategoryScore::new(*c, *s).unwrap())
            .collect();
        Assessment::new(AssessmentId::from("a-1"), scores).unwrap()
    }

    #[test]
    fn score_card_needs_no_services() {
        let card = engine().score_card(&assessment(&[("security", 20), ("automation", 70)]));
        assert_eq!(card.overall().map(|o| o.value()), Some(45));
        assert_eq!(card.maturity, Some(MaturityTag::from(MaturityLevel::Intermediate)));
        assert_eq!(card.roadmap.len(), 2);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = EngineConfig::default();
        config.thresholds.advanced = 10;
        assert!(AssessmentEngine::new(config, EngineServices::offline()).is_err());
    }

    #[tokio::test]
    async fn offline_evaluation_uses_fallbacks() {
        let report = engine()
            .evaluate(&assessment(&[("security", 20), ("automation", 70)]))
            .await;

        assert_eq!(report.organization, Organization::default());
        let risk = report.risk.unwrap();
        assert_eq!(risk.issue_source, IssueSource::Synthesized);
        assert_eq!(risk.tier, RiskTier::Medium);
        assert!(report.time_estimate.is_some());
    }

    #[tokio::test]
    async fn empty_assessment_has_no_risk_or_estimate() {
        let report = engine().evaluate(&assessment(&[])).await;
        assert_eq!(report.score_card.maturity, None);
        assert!(report.risk.is_none());
        assert!(report.time_estimate.is_none());
    }

    #[test]
    fn describe_without_formatter_is_none() {
        let engine = engine();
        let estimate = TimeEstimate::AtMaximum {
            level: MaturityLevel::Expert,
        };
        assert_eq!(engine.describe_estimate(Some(&estimate), Language::En), None);
    }
}
