use cma_model::{CategoryScore, CriticalIssue, MaturityLevel, Severity, VelocityTable};
use cma_scoring::{
    aggregate, detect, generate_roadmap, rate, EffortSelection, ImpactLevel, MaturityThresholds,
    OverallScore, RiskTier, ScoreState, TimeEstimator,
};
use proptest::prelude::*;

fn category_scores(values: &[i64]) -> Vec<CategoryScore> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| CategoryScore::new(format!("cat-{i}"), *v).unwrap())
        .collect()
}

fn issues(high: usize, medium: usize, low: usize) -> Vec<CriticalIssue> {
    let mut out = Vec::new();
    for (count, severity) in [(high, Severity::High), (medium, Severity::Medium), (low, Severity::Low)] {
        for i in 0..count {
            out.push(CriticalIssue::new(format!("{severity:?}-{i}"), "c", severity, "issue"));
        }
    }
    out
}

#[test]
fn end_to_end_scenario() {
    let scores = vec![
        CategoryScore::new("security", 20).unwrap(),
        CategoryScore::new("automation", 70).unwrap(),
        CategoryScore::new("observability", -1).unwrap(),
    ];

    let overall = aggregate(&scores).unwrap();
    assert_eq!(overall.value(), 45);
    assert_eq!(
        MaturityThresholds::default().classify(overall),
        MaturityLevel::Intermediate
    );

    let roadmap = generate_roadmap(&scores);
    assert_eq!(roadmap[0].category_id.as_str(), "security");
    assert_eq!(roadmap[0].priority, 160);
    assert_eq!(roadmap[0].effort_points, 40);
    assert_eq!(roadmap[0].impact_level, ImpactLevel::High);
}

#[test]
fn risk_rule_precedence() {
    assert_eq!(rate(OverallScore::new(80), &issues(6, 0, 0)), RiskTier::High);
}

proptest! {
    #[test]
    fn prop_aggregate_is_rounded_mean(values in prop::collection::vec(-1i64..=100, 1..20)) {
        prop_assume!(values.iter().any(|v| *v != -1));
        let scores = category_scores(&values);

        let numeric: Vec<f64> = values.iter().filter(|v| **v != -1).map(|v| *v as f64).collect();
        let mean = numeric.iter().sum::<f64>() / numeric.len() as f64;
        let expected = (mean + 0.5).floor() as u8;

        prop_assert_eq!(aggregate(&scores).unwrap().value(), expected);
    }

    #[test]
    fn prop_aggregate_is_order_independent(values in prop::collection::vec(0i64..=100, 1..20)) {
        let forward = category_scores(&values);
        let mut reversed_values = values.clone();
        reversed_values.reverse();
        let reversed = category_scores(&reversed_values);

        prop_assert_eq!(aggregate(&forward).unwrap(), aggregate(&reversed).unwrap());
    }

    #[test]
    fn prop_all_gap_detected(len in 1usize..10) {
        let scores = category_scores(&vec![-1; len]);
        prop_assert_eq!(detect(&scores), ScoreState::AllKnowledgeGap);
        prop_assert!(aggregate(&scores).is_err());
    }

    #[test]
    fn prop_risk_monotonic_in_score(
        a in 0u8..=100,
        b in 0u8..=100,
        high in 0usize..8,
        medium in 0usize..5,
        low in 0usize..5,
    ) {
        let (lower, higher) = if a <= b { (a, b) } else { (b, a) };
        let found = issues(high, medium, low);
        prop_assert!(rate(OverallScore::new(lower), &found) >= rate(OverallScore::new(higher), &found));
    }

    #[test]
    fn prop_roadmap_floor_and_priority(score in 90i64..=100) {
        let roadmap = generate_roadmap(&category_scores(&[score]));
        prop_assert_eq!(roadmap[0].effort_points, 5);
        prop_assert!(roadmap[0].priority <= 20);
    }

    #[test]
    fn prop_roadmap_effort_never_below_floor(values in prop::collection::vec(-1i64..=100, 0..20)) {
        let roadmap = generate_roadmap(&category_scores(&values));
        prop_assert_eq!(roadmap.len(), values.len());
        prop_assert!(roadmap.iter().all(|item| item.effort_points >= 5));
    }

    #[test]
    fn prop_classification_is_monotonic(a in 0u8..=100, b in 0u8..=100) {
        let t = MaturityThresholds::default();
        let (lower, higher) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(t.classify(OverallScore::new(lower)) <= t.classify(OverallScore::new(higher)));
    }

    #[test]
    fn prop_doubling_effort_never_shortens(effort in 0u32..5_000, streams in 1u32..8) {
        let estimator = TimeEstimator::default();
        let base = estimator.project(MaturityLevel::Beginner, MaturityLevel::Intermediate, 30, effort, streams);
        let doubled = estimator.project(MaturityLevel::Beginner, MaturityLevel::Intermediate, 30, effort * 2, streams);
        prop_assert!(doubled.calendar_days >= base.calendar_days);
        prop_assert!(doubled.calendar_sprints >= base.calendar_sprints);
    }

    #[test]
    fn prop_doubling_streams_never_lengthens(effort in 0u32..5_000, streams in 1u32..8) {
        let estimator = TimeEstimator::new(VelocityTable::default(), MaturityThresholds::default())
            .with_selection(EffortSelection::AllItems);
        let base = estimator.project(MaturityLevel::Beginner, MaturityLevel::Intermediate, 30, effort, streams);
        let doubled = estimator.project(MaturityLevel::Beginner, MaturityLevel::Intermediate, 30, effort, streams * 2);
        prop_assert!(doubled.calendar_days <= base.calendar_days);
    }
}
