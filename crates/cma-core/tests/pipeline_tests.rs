//! End-to-end pipeline tests with scripted services

use cma_core::{AssessmentEngine, EngineConfig, EngineServices, ServiceSettings};
use cma_model::{
    Assessment, AssessmentId, CategoryId, CategoryScore, CriticalIssue, Currency, Language,
    Locale, MaturityLevel, MaturityTag, OrganizationId, OrganizationProfile, Severity,
};
use cma_scoring::{IssueSource, RiskTier, TimeEstimate};
use cma_services::{AnalysisSource, CostState};
use cma_test_utils::{
    assessment_with, sample_assessment, FailingCostService, RecordingFormatter,
    ScriptedCostService, ScriptedIssuesService, StaticOrganizationLookup,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn large_org_lookup() -> Arc<StaticOrganizationLookup> {
    Arc::new(StaticOrganizationLookup::new().with_profile(
        OrganizationId::from("org-1"),
        OrganizationProfile {
            industry: Some("finance".to_string()),
            company_size: Some("1000+".to_string()),
            ..OrganizationProfile::default()
        },
    ))
}

#[tokio::test]
async fn sample_assessment_end_to_end() {
    let issues = Arc::new(ScriptedIssuesService::returning(vec![CriticalIssue::new(
        "iam-1",
        "security",
        Severity::High,
        "Root credentials in use",
    )]));
    let services = EngineServices::offline()
        .with_organizations(large_org_lookup())
        .with_issues(issues.clone());
    let engine = AssessmentEngine::new(EngineConfig::default(), services).unwrap();

    let report = engine.evaluate(&sample_assessment()).await;

    let card = &report.score_card;
    assert_eq!(card.overall().map(|o| o.value()), Some(45));
    assert_eq!(card.maturity, Some(MaturityTag::from(MaturityLevel::Intermediate)));
    assert_eq!(card.completeness.knowledge_gaps, 1);
    assert_eq!(card.roadmap[0].priority, 160);
    assert_eq!(card.roadmap[0].effort_points, 40);
    assert_eq!(card.roadmap[2].priority, 200);

    assert_eq!(report.organization.industry, "finance");
    assert_eq!(report.organization.region, "north_america");

    let risk = report.risk.unwrap();
    assert_eq!(risk.issue_source, IssueSource::Service);
    assert_eq!(risk.tier, RiskTier::Medium);
    assert_eq!(issues.calls(), 1);

    // target advanced (60): security 40 + observability 50 effort, 4 streams
    match report.time_estimate.unwrap() {
        TimeEstimate::Projected(p) => {
            assert_eq!(p.target_level, MaturityLevel::Advanced);
            assert_eq!(p.effort_points, 90);
            assert_eq!(p.parallel_streams, 4);
            assert_eq!(p.calendar_days, 20);
        }
        other => panic!("expected projection, got {other:?}"),
    }
}

#[tokio::test]
async fn issues_outage_synthesizes_and_still_reports() {
    let services = EngineServices::offline().with_issues(Arc::new(ScriptedIssuesService::failing()));
    let engine = AssessmentEngine::new(EngineConfig::default(), services).unwrap();

    let report = engine
        .evaluate(&assessment_with(&[("security", 35), ("automation", 90), ("cost", 95)]))
        .await;

    let risk = report.risk.unwrap();
    assert_eq!(risk.issue_source, IssueSource::Synthesized);
    assert_eq!(risk.issue_counts.medium, 1);
    assert_eq!(risk.tier, RiskTier::Low);
    assert_eq!(report.score_card.overall().map(|o| o.value()), Some(73));
}

#[tokio::test(start_paused = true)]
async fn slow_issues_service_times_out() {
    let slow = ScriptedIssuesService::returning(Vec::new()).with_delay(Duration::from_secs(60));
    let config = EngineConfig::default().with_services(ServiceSettings {
        timeout_ms: 100,
        ..ServiceSettings::default()
    });
    let services = EngineServices::offline().with_issues(Arc::new(slow));
    let engine = AssessmentEngine::new(config, services).unwrap();

    let report = engine.evaluate(&assessment_with(&[("security", 20)])).await;
    let risk = report.risk.unwrap();
    assert_eq!(risk.issue_source, IssueSource::Synthesized);
    assert_eq!(risk.tier, RiskTier::High);
}

#[tokio::test]
async fn all_knowledge_gap_short_circuits() {
    let issues = Arc::new(ScriptedIssuesService::returning(Vec::new()));
    let cost = Arc::new(ScriptedCostService::new(20.0));
    let services = EngineServices::offline()
        .with_issues(issues.clone())
        .with_cost(cost.clone());
    let engine = AssessmentEngine::new(EngineConfig::default(), services).unwrap();

    let assessment = assessment_with(&[("security", -1), ("automation", -1)]);
    let report = engine.evaluate(&assessment).await;

    assert_eq!(report.score_card.maturity, Some(MaturityTag::KnowledgeGap));
    assert!(report.time_estimate.is_none());
    let risk = report.risk.unwrap();
    assert_eq!(risk.tier, RiskTier::High);
    assert_eq!(risk.critical_issue_count(), 0);
    assert_eq!(risk.issue_source, IssueSource::Unavailable);
    assert_eq!(issues.calls(), 0);

    let analysis = engine
        .analyze_cost(assessment.category_scores(), Locale::default())
        .await;
    assert_eq!(analysis.source, AnalysisSource::Skipped);
    assert_eq!(cost.calls(), 0);
}

#[tokio::test]
async fn reported_score_drives_knowledge_gap_risk() {
    let engine = AssessmentEngine::new(EngineConfig::default(), EngineServices::offline()).unwrap();
    let assessment = assessment_with(&[("security", -1)])
        .with_reported_overall_score(55)
        .unwrap();
    let report = engine.evaluate(&assessment).await;
    assert_eq!(report.risk.unwrap().tier, RiskTier::Medium);
}

#[tokio::test]
async fn cost_outage_returns_fallback() {
    let failing = Arc::new(FailingCostService::new());
    let services = EngineServices::offline().with_cost(failing.clone());
    let engine = AssessmentEngine::new(EngineConfig::default(), services).unwrap();

    let analysis = engine
        .analyze_cost(
            sample_assessment().category_scores(),
            Locale::for_language(Language::Ja),
        )
        .await;
    assert_eq!(analysis.source, AnalysisSource::Fallback);
    assert_eq!(analysis.currency, Currency::Jpy);
    assert_eq!(analysis.annual_savings, 0.0);
    assert_eq!(failing.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn newer_scores_replace_pending_cost_analysis() {
    let cost = Arc::new(ScriptedCostService::new(10.0).with_delay(Duration::from_secs(2)));
    let services = EngineServices::offline().with_cost(cost.clone());
    let engine = AssessmentEngine::new(EngineConfig::default(), services).unwrap();

    let first = engine.submit_cost_analysis(&assessment_with(&[("security", 20)]), Locale::default());
    let second = engine.submit_cost_analysis(
        &assessment_with(&[("security", 20), ("automation", 70)]),
        Locale::default(),
    );
    assert!(second > first);
    assert_eq!(engine.cost_state(), CostState::Pending { generation: second });

    let analysis = engine.latest_cost().await.unwrap();
    assert_eq!(analysis.current_annual_cost, 2000.0);
    assert_eq!(engine.cost_state().generation(), Some(second));
}

#[tokio::test]
async fn cached_cost_analysis_is_reused() {
    let cost = Arc::new(ScriptedCostService::new(25.0));
    let services = EngineServices::offline().with_cost(cost.clone());
    let engine = AssessmentEngine::new(EngineConfig::default(), services).unwrap();
    let scores = sample_assessment().category_scores().to_vec();

    let first = engine.analyze_cost(&scores, Locale::default()).await;
    let mut reversed = scores.clone();
    reversed.reverse();
    let second = engine.analyze_cost(&reversed, Locale::default()).await;

    assert_eq!(first.source, AnalysisSource::Service);
    assert_eq!(second.source, AnalysisSource::Cached);
    assert_eq!(second.annual_savings, first.annual_savings);
    assert_eq!(cost.calls(), 1);
}

#[tokio::test]
async fn formatter_receives_language() {
    let formatter = Arc::new(RecordingFormatter::new());
    let services = EngineServices::offline().with_formatter(formatter.clone());
    let engine = AssessmentEngine::new(EngineConfig::default(), services).unwrap();

    let report = engine.evaluate(&sample_assessment()).await;
    let text = engine.describe_estimate(report.time_estimate.as_ref(), Language::Ja);

    assert_eq!(text.as_deref(), Some("40日"));
    assert_eq!(formatter.seen()[0].1, Language::Ja);
    assert_eq!(engine.describe_estimate(None, Language::En), None);
}

#[tokio::test]
async fn evaluate_with_cost_fills_cost_analysis() {
    let cost = Arc::new(ScriptedCostService::new(10.0));
    let services = EngineServices::offline().with_cost(cost.clone());
    let engine = AssessmentEngine::new(EngineConfig::default(), services).unwrap();

    let plain = engine.evaluate(&sample_assessment()).await;
    assert!(plain.cost_analysis.is_none());

    let report = engine
        .evaluate_with_cost(&sample_assessment(), Locale::for_language(Language::Ja))
        .await;
    let analysis = report.cost_analysis.unwrap();
    assert_eq!(analysis.source, AnalysisSource::Service);
    assert_eq!(analysis.currency, Currency::Jpy);
    assert_eq!(analysis.current_annual_cost, 2000.0);
    assert_eq!(report.score_card.overall().map(|o| o.value()), Some(45));
}

#[tokio::test]
async fn tagged_gap_reaches_cost_service_as_gap() {
    let cost = Arc::new(ScriptedCostService::new(10.0));
    let services = EngineServices::offline().with_cost(cost.clone());
    let engine = AssessmentEngine::new(EngineConfig::default(), services).unwrap();

    let assessment = Assessment::new(
        AssessmentId::generate(),
        vec![
            CategoryScore::new("security", 20).unwrap(),
            CategoryScore::new("cost", 45)
                .unwrap()
                .with_maturity(MaturityTag::KnowledgeGap),
        ],
    )
    .unwrap();

    let report = engine.evaluate_with_cost(&assessment, Locale::default()).await;
    assert_eq!(report.score_card.overall().map(|o| o.value()), Some(20));
    assert_eq!(report.cost_analysis.unwrap().current_annual_cost, 1000.0);

    let requests = cost.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].scores[&CategoryId::from("cost")], -1);
    assert_eq!(requests[0].scores[&CategoryId::from("security")], 20);
}
