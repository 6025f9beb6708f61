//! Testing utilities for CMA workspace
//!
//! Shared fixtures and scripted service doubles.

#![allow(missing_docs)]

use async_trait::async_trait;
use cma_model::{
    Assessment, AssessmentId, CategoryScore, CriticalIssue, Language, Organization, OrganizationId,
};
use cma_scoring::TimeEstimate;
use cma_services::{
    AnalysisSource, CostAnalysis, CostAnalysisService, CostRequest, CriticalIssuesService,
    EstimateFormatter, ServiceError,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub use cma_services::StaticOrganizationLookup;

/// Category scores from `(category, score)` pairs
pub fn scores(values: &[(&str, i64)]) -> Vec<CategoryScore> {
    values
        .iter()
        .map(|(category, score)| CategoryScore::new(*category, *score).unwrap())
        .collect()
}

/// security=20, automation=70, observability=knowledge gap; organization `org-1`
pub fn sample_assessment() -> Assessment {
    Assessment::new(
        AssessmentId::from("sample"),
        scores(&[("security", 20), ("automation", 70), ("observability", -1)]),
    )
    .unwrap()
    .with_organization(OrganizationId::from("org-1"))
}

pub fn assessment_with(values: &[(&str, i64)]) -> Assessment {
    Assessment::new(AssessmentId::generate(), scores(values)).unwrap()
}

/// Cost service answering with a fixed savings percentage
///
/// Current cost is 1000 per scored category; every request is recorded.
#[derive(Debug, Default)]
pub struct ScriptedCostService {
    savings_percentage: f64,
    delay: Option<Duration>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CostRequest>>,
}

impl ScriptedCostService {
    pub fn new(savings_percentage: f64) -> Self {
        Self {
            savings_percentage,
            ..Self::default()
        }
    }

    /// Sleep before answering (use with paused Tokio time)
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CostRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl CostAnalysisService for ScriptedCostService {
    async fn analyze(&self, request: &CostRequest) -> Result<CostAnalysis, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let scored = request.scores.values().filter(|s| **s >= 0).count();
        let current = 1000.0 * scored as f64;
        let savings = current * self.savings_percentage / 100.0;
        Ok(CostAnalysis {
            currency: request.locale.currency,
            current_annual_cost: current,
            optimized_annual_cost: current - savings,
            annual_savings: savings,
            savings_percentage: self.savings_percentage,
            source: AnalysisSource::Service,
        })
    }
}

/// Cost service that always fails
#[derive(Debug, Default)]
pub struct FailingCostService {
    calls: AtomicUsize,
}

impl FailingCostService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CostAnalysisService for FailingCostService {
    async fn analyze(&self, _request: &CostRequest) -> Result<CostAnalysis, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ServiceError::unavailable("cost analysis", "connection refused"))
    }
}

/// Critical issues service with a scripted answer
#[derive(Debug)]
pub struct ScriptedIssuesService {
    answer: Result<Vec<CriticalIssue>, ServiceError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedIssuesService {
    pub fn returning(issues: Vec<CriticalIssue>) -> Self {
        Self {
            answer: Ok(issues),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: Err(ServiceError::unavailable("critical issues", "503")),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CriticalIssuesService for ScriptedIssuesService {
    async fn critical_issues(
        &self,
        _assessment: &Assessment,
        _organization: &Organization,
    ) -> Result<Vec<CriticalIssue>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.answer.clone()
    }
}

/// Formatter that records its inputs and renders calendar days
#[derive(Debug, Default)]
pub struct RecordingFormatter {
    seen: Mutex<Vec<(TimeEstimate, Language)>>,
}

impl RecordingFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> Vec<(TimeEstimate, Language)> {
        self.seen.lock().clone()
    }
}

impl EstimateFormatter for RecordingFormatter {
    fn format_estimate(&self, estimate: &TimeEstimate, language: Language) -> String {
        self.seen.lock().push((estimate.clone(), language));
        let days = estimate.calendar_days();
        match language {
            Language::En => format!("{days} days"),
            Language::Ja => format!("{days}日"),
        }
    }
}
