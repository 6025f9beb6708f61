//! Cost savings analysis
//!
//! The savings computation itself belongs to the external service. This
//! module decides whether to call it, builds an order-independent request,
//! caches successful answers, and substitutes a degraded value on failure.

use crate::cache::{CostCache, RequestFingerprint};
use crate::call::with_timeout;
use crate::error::ServiceError;
use async_trait::async_trait;
use cma_model::{CategoryId, CategoryScore, Completeness, Currency, Locale, KNOWLEDGE_GAP_SCORE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

const SERVICE: &str = "cost analysis";

/// Stable request for the cost analysis service
///
/// Scores are keyed by category, so two requests built from the same scores
/// in a different order are equal and share a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRequest {
    pub scores: BTreeMap<CategoryId, i8>,
    pub locale: Locale,
}

impl CostRequest {
    /// Build request from category scores
    #[must_use]
    pub fn new(scores: &[CategoryScore], locale: Locale) -> Self {
        Self {
            scores: scores
                .iter()
                .map(|s| (s.category_id().clone(), wire_score(s)))
                .collect(),
            locale,
        }
    }

    /// Content fingerprint, used as the cache key
    #[must_use]
    pub fn fingerprint(&self) -> RequestFingerprint {
        let mut hasher = blake3::Hasher::new();
        for (category, score) in &self.scores {
            hasher.update(category.as_str().as_bytes());
            hasher.update(&[0]);
            hasher.update(&score.to_le_bytes());
        }
        hasher.update(self.locale.language.tag().as_bytes());
        hasher.update(&[0]);
        hasher.update(self.locale.currency.code().as_bytes());
        RequestFingerprint::new(*hasher.finalize().as_bytes())
    }
}

/// Score sent to the service; any knowledge gap, tagged or `-1`, becomes `-1`
fn wire_score(score: &CategoryScore) -> i8 {
    score
        .numeric_score()
        .and_then(|s| i8::try_from(s).ok())
        .unwrap_or(KNOWLEDGE_GAP_SCORE)
}

/// Where a cost analysis came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    /// Fresh answer from the service
    Service,
    /// Earlier service answer for an identical request
    Cached,
    /// Service failed; degraded default
    Fallback,
    /// Not requested (no scored categories)
    Skipped,
}

/// Cost savings summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostAnalysis {
    pub currency: Currency,
    pub current_annual_cost: f64,
    pub optimized_annual_cost: f64,
    pub annual_savings: f64,
    /// Savings as a percentage of current cost
    pub savings_percentage: f64,
    pub source: AnalysisSource,
}

impl CostAnalysis {
    fn zero(currency: Currency, source: AnalysisSource) -> Self {
        Self {
            currency,
            current_annual_cost: 0.0,
            optimized_annual_cost: 0.0,
            annual_savings: 0.0,
            savings_percentage: 0.0,
            source,
        }
    }

    /// Degraded value returned when the service fails
    #[inline]
    #[must_use]
    pub fn fallback(currency: Currency) -> Self {
        Self::zero(currency, AnalysisSource::Fallback)
    }

    /// Zero value for assessments without a numeric baseline
    #[inline]
    #[must_use]
    pub fn skipped(currency: Currency) -> Self {
        Self::zero(currency, AnalysisSource::Skipped)
    }

    /// Whether this value came from the service (fresh or cached)
    #[inline]
    #[must_use]
    pub fn is_authoritative(&self) -> bool {
        matches!(self.source, AnalysisSource::Service | AnalysisSource::Cached)
    }
}

/// External cost analysis service
#[async_trait]
pub trait CostAnalysisService: Send + Sync {
    /// Analyze potential savings for a request
    async fn analyze(&self, request: &CostRequest) -> Result<CostAnalysis, ServiceError>;
}

/// Cost analysis with caching and fallback
pub struct CostSavingsAnalyzer {
    service: Arc<dyn CostAnalysisService>,
    cache: Option<CostCache>,
    timeout: Duration,
}

impl std::fmt::Debug for CostSavingsAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostSavingsAnalyzer")
            .field("cache", &self.cache)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl CostSavingsAnalyzer {
    /// Create analyzer without a cache
    #[inline]
    #[must_use]
    pub fn new(service: Arc<dyn CostAnalysisService>, timeout: Duration) -> Self {
        Self {
            service,
            cache: None,
            timeout,
        }
    }

    /// With result cache
    #[inline]
    #[must_use]
    pub fn with_cache(mut self, cache: CostCache) -> Self {
        self.cache = Some(cache);
        self
    }

    #[inline]
    #[must_use]
    pub fn cache(&self) -> Option<&CostCache> {
        self.cache.as_ref()
    }

    /// Analyze category scores; never fails
    ///
    /// Skips the service when no category carries a numeric score.
    pub async fn analyze(&self, scores: &[CategoryScore], locale: Locale) -> CostAnalysis {
        let completeness = Completeness::of(scores);
        if completeness.answered == 0 {
            tracing::debug!(total = completeness.total, "no scored categories, skipping cost analysis");
            return CostAnalysis::skipped(locale.currency);
        }
        self.analyze_request(&CostRequest::new(scores, locale)).await
    }

    /// Analyze a prepared request; never fails
    pub async fn analyze_request(&self, request: &CostRequest) -> CostAnalysis {
        let fingerprint = request.fingerprint();

        if let Some(cache) = &self.cache {
            if let Some(mut hit) = cache.get(&fingerprint).await {
                tracing::debug!(%fingerprint, "cost analysis cache hit");
                hit.source = AnalysisSource::Cached;
                return hit;
            }
        }

        match with_timeout(SERVICE, self.timeout, self.service.analyze(request)).await {
            Ok(mut analysis) => {
                analysis.source = AnalysisSource::Service;
                if let Some(cache) = &self.cache {
                    cache.insert(fingerprint, analysis.clone()).await;
                }
                analysis
            }
            Err(e) => {
                tracing::warn!(error = %e, retryable = e.is_retryable(), "cost analysis failed, using fallback");
                CostAnalysis::fallback(request.locale.currency)
            }
        }
    }
}
