//! Offline service stand-ins
//!
//! Used when the engine runs without network access: every call reports the
//! service as unavailable, which routes the engine through its fallbacks.

use crate::cost::{CostAnalysis, CostAnalysisService, CostRequest};
use crate::error::ServiceError;
use crate::issues::CriticalIssuesService;
use async_trait::async_trait;
use cma_model::{Assessment, CriticalIssue, Organization};

/// Unavailable critical-issues and cost services
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineServices;

#[async_trait]
impl CriticalIssuesService for OfflineServices {
    async fn critical_issues(
        &self,
        _assessment: &Assessment,
        _organization: &Organization,
    ) -> Result<Vec<CriticalIssue>, ServiceError> {
        Err(ServiceError::unavailable("critical issues", "offline"))
    }
}

#[async_trait]
impl CostAnalysisService for OfflineServices {
    async fn analyze(&self, _request: &CostRequest) -> Result<CostAnalysis, ServiceError> {
        Err(ServiceError::unavailable("cost analysis", "offline"))
    }
}
