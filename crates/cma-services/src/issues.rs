//! Critical issues
//!
//! Issues come from an external rule-based service. When it fails, a
//! simplified list is synthesized from low category scores instead.

use crate::call::with_timeout;
use crate::error::ServiceError;
use async_trait::async_trait;
use cma_model::{Assessment, CriticalIssue, Organization};
use cma_scoring::{synthesize_issues, IssueSource};
use std::time::Duration;

const SERVICE: &str = "critical issues";

/// External critical issues service
#[async_trait]
pub trait CriticalIssuesService: Send + Sync {
    /// Issues for the assessment in its organization context
    async fn critical_issues(
        &self,
        assessment: &Assessment,
        organization: &Organization,
    ) -> Result<Vec<CriticalIssue>, ServiceError>;
}

/// Fetch issues, synthesizing them locally on failure
pub async fn fetch_or_synthesize(
    service: &dyn CriticalIssuesService,
    assessment: &Assessment,
    organization: &Organization,
    timeout: Duration,
) -> (Vec<CriticalIssue>, IssueSource) {
    match with_timeout(SERVICE, timeout, service.critical_issues(assessment, organization)).await {
        Ok(issues) => (issues, IssueSource::Service),
        Err(e) => {
            let issues = synthesize_issues(assessment.category_scores());
            tracing::warn!(
                assessment = %assessment.id(),
                error = %e,
                synthesized = issues.len(),
                "critical issues unavailable, synthesized from scores"
            );
            (issues, IssueSource::Synthesized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cma_model::{AssessmentId, CategoryScore, Severity};

    struct Fixed(Result<Vec<CriticalIssue>, ServiceError>);

    #[async_trait]
    impl CriticalIssuesService for Fixed {
        async fn critical_issues(
            &self,
            _assessment: &Assessment,
            _organization: &Organization,
        ) -> Result<Vec<CriticalIssue>, ServiceError> {
            self.0.clone()
        }
    }

    fn assessment() -> Assessment {
        Assessment::new(
            AssessmentId::from("a-1"),
            vec![
                CategoryScore::new("security", 20).unwrap(),
                CategoryScore::new("automation", 70).unwrap(),
            ],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn service_issues_pass_through() {
        let issue = CriticalIssue::new("svc-1", "automation", Severity::Low, "No IaC drift checks");
        let service = Fixed(Ok(vec![issue.clone()]));
        let (issues, source) =
            fetch_or_synthesize(&service, &assessment(), &Organization::default(), Duration::from_secs(1)).await;
        assert_eq!(issues, vec![issue]);
        assert_eq!(source, IssueSource::Service);
    }

    #[tokio::test]
    async fn failure_synthesizes_from_scores() {
        let service = Fixed(Err(ServiceError::unavailable(SERVICE, "down")));
        let (issues, source) =
            fetch_or_synthesize(&service, &assessment(), &Organization::default(), Duration::from_secs(1)).await;
        assert_eq!(source, IssueSource::Synthesized);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::High);
    }
}
