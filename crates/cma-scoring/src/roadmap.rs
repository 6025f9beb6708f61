//! Remediation roadmap
//!
//! One item per category, projected from its score. Knowledge gaps count as
//! a score of 0 for these formulas only.

use cma_model::{CategoryId, CategoryScore, MAX_SCORE};
use serde::{Deserialize, Serialize};

/// Minimum remediation cost for any category
pub const MIN_EFFORT_POINTS: u32 = 5;

const HIGH_IMPACT_BELOW: u8 = 30;
const MEDIUM_IMPACT_BELOW: u8 = 60;

/// Expected impact of remediating a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

/// Derived remediation task for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapItem {
    pub id: String,
    pub category_id: CategoryId,
    /// Higher is more urgent
    pub priority: u32,
    /// Never below [`MIN_EFFORT_POINTS`]
    pub effort_points: u32,
    pub impact_level: ImpactLevel,
}

impl RoadmapItem {
    /// Project a roadmap item from a category score
    #[must_use]
    pub fn for_score(score: &CategoryScore) -> Self {
        let effective = score.effective_score();
        let gap = u32::from(MAX_SCORE.saturating_sub(effective));

        // round(gap / 2), halves up
        let effort_points = ((gap + 1) / 2).max(MIN_EFFORT_POINTS);
        let impact_level = if effective < HIGH_IMPACT_BELOW {
            ImpactLevel::High
        } else if effective < MEDIUM_IMPACT_BELOW {
            ImpactLevel::Medium
        } else {
            ImpactLevel::Low
        };

        Self {
            id: format!("roadmap-{}", score.category_id()),
            category_id: score.category_id().clone(),
            priority: gap * 2,
            effort_points,
            impact_level,
        }
    }
}

/// Roadmap in input order
#[must_use]
pub fn generate_roadmap(scores: &[CategoryScore]) -> Vec<RoadmapItem> {
    scores.iter().map(RoadmapItem::for_score).collect()
}

/// Most urgent first; equal priorities keep their input order
#[must_use]
pub fn by_priority(items: &[RoadmapItem]) -> Vec<&RoadmapItem> {
    let mut sorted: Vec<&RoadmapItem> = items.iter().collect();
    sorted.sort_by(|a, b| b.priority.cmp(&a.priority));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use cma_model::MaturityTag;
    use pretty_assertions::assert_eq;

    fn item(cat: &str, score: i64) -> RoadmapItem {
        RoadmapItem::for_score(&CategoryScore::new(cat, score).unwrap())
    }

    #[test]
    fn security_at_twenty() {
        let i = item("security", 20);
        assert_eq!(i.priority, 160);
        assert_eq!(i.effort_points, 40);
        assert_eq!(i.impact_level, ImpactLevel::High);
        assert_eq!(i.id, "roadmap-security");
    }

    #[test]
    fn effort_floor_applies_to_high_scores() {
        for score in 90..=100 {
            let i = item("x", score);
            assert_eq!(i.effort_points, MIN_EFFORT_POINTS, "score {score}");
        }
        assert_eq!(item("x", 100).priority, 0);
    }

    #[test]
    fn tagged_gap_counts_as_zero() {
        let tagged = CategoryScore::new("observability", 80)
            .unwrap()
            .with_maturity(MaturityTag::KnowledgeGap);
        let i = RoadmapItem::for_score(&tagged);
        assert_eq!(i.priority, 200);
        assert_eq!(i.effort_points, 50);
        assert_eq!(i.impact_level, ImpactLevel::High);
    }

    #[test]
    fn odd_gap_rounds_half_up() {
        // gap 45 -> 22.5 -> 23
        assert_eq!(item("x", 55).effort_points, 23);
    }

    #[test]
    fn knowledge_gap_counts_as_zero() {
        let i = RoadmapItem::for_score(&CategoryScore::knowledge_gap("observability").unwrap());
        assert_eq!(i.priority, 200);
        assert_eq!(i.effort_points, 50);
        assert_eq!(i.impact_level, ImpactLevel::High);
    }

    #[test]
    fn impact_bands() {
        assert_eq!(item("x", 29).impact_level, ImpactLevel::High);
        assert_eq!(item("x", 30).impact_level, ImpactLevel::Medium);
        assert_eq!(item("x", 59).impact_level, ImpactLevel::Medium);
        assert_eq!(item("x", 60).impact_level, ImpactLevel::Low);
    }

    #[test]
    fn keeps_input_order_and_sorts_on_request() {
        let scores = vec![
            CategoryScore::new("automation", 70).unwrap(),
            CategoryScore::new("security", 20).unwrap(),
            CategoryScore::new("cost", 70).unwrap(),
        ];
        let roadmap = generate_roadmap(&scores);
        let ids: Vec<_> = roadmap.iter().map(|i| i.category_id.as_str()).collect();
        assert_eq!(ids, vec!["automation", "security", "cost"]);

        let sorted: Vec<_> = by_priority(&roadmap)
            .into_iter()
            .map(|i| i.category_id.as_str())
            .collect();
        assert_eq!(sorted, vec!["security", "automation", "cost"]);
    }
}
