//! Velocity-based time estimation
//!
//! Converts the remediation effort needed to reach the next maturity tier
//! into elapsed time:
//!
//! ```text
//! ideal_days       = effort_points / points_per_ideal_day
//! sprints          = ideal_days / ideal_days_per_sprint
//! calendar_sprints = sprints / parallel_streams(company size)
//! calendar_days    = ceil(calendar_sprints * sprint_length_days)
//! ```
//!
//! Every step is monotonic: more effort never shortens the estimate and
//! more streams never lengthen it.

use crate::aggregate::ScoreState;
use crate::maturity::MaturityThresholds;
use crate::roadmap::RoadmapItem;
use cma_model::{CategoryId, CategoryScore, MaturityLevel, Organization, VelocityTable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which roadmap items count toward reaching the next tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortSelection {
    /// Items whose category scores below the next tier's lower bound
    #[default]
    BelowTargetThreshold,
    /// Every roadmap item
    AllItems,
}

/// Projected effort and duration to the next tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub current_level: MaturityLevel,
    pub target_level: MaturityLevel,
    /// Lowest overall score of the target tier
    pub target_score: u8,
    pub effort_points: u32,
    pub ideal_days: f64,
    pub sprints: f64,
    pub parallel_streams: u32,
    /// Sprints of elapsed time once work is spread across streams
    pub calendar_sprints: f64,
    pub calendar_days: u32,
    pub weeks: u32,
}

/// Structured estimate; formatting is left to the locale boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeEstimate {
    /// Already at the highest tier
    AtMaximum { level: MaturityLevel },
    /// Time to the next tier
    Projected(Projection),
}

impl TimeEstimate {
    /// Calendar days to the next tier, zero at maximum
    #[inline]
    #[must_use]
    pub fn calendar_days(&self) -> u32 {
        match self {
            TimeEstimate::AtMaximum { .. } => 0,
            TimeEstimate::Projected(p) => p.calendar_days,
        }
    }
}

/// Estimator bound to a velocity model and threshold table
#[derive(Debug, Clone, Default)]
pub struct TimeEstimator {
    velocity: VelocityTable,
    thresholds: MaturityThresholds,
    selection: EffortSelection,
}

impl TimeEstimator {
    /// Create estimator
    #[inline]
    #[must_use]
    pub fn new(velocity: VelocityTable, thresholds: MaturityThresholds) -> Self {
        Self {
            velocity,
            thresholds,
            selection: EffortSelection::default(),
        }
    }

    /// With effort selection rule
    #[inline]
    #[must_use]
    pub fn with_selection(mut self, selection: EffortSelection) -> Self {
        self.selection = selection;
        self
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> &VelocityTable {
        &self.velocity
    }

    /// Estimate time to the next maturity tier
    ///
    /// Returns `None` when there is no numeric baseline: no categories, or
    /// every category a knowledge gap.
    #[must_use]
    pub fn estimate(
        &self,
        state: &ScoreState,
        scores: &[CategoryScore],
        roadmap: &[RoadmapItem],
        organization: &Organization,
    ) -> Option<TimeEstimate> {
        let overall = state.overall()?;
        if scores.is_empty() {
            return None;
        }

        let current_level = self.thresholds.classify(overall);
        let Some(target_level) = current_level.next() else {
            return Some(TimeEstimate::AtMaximum {
                level: current_level,
            });
        };
        let target_score = self.thresholds.lower_bound(target_level);

        let effort_points = self.required_effort(target_score, scores, roadmap);
        let streams = self.velocity.streams_for(organization.size_bucket());
        tracing::debug!(
            %current_level,
            %target_level,
            effort_points,
            streams,
            "estimating time to next tier"
        );

        Some(TimeEstimate::Projected(self.project(
            current_level,
            target_level,
            target_score,
            effort_points,
            streams,
        )))
    }

    /// Sum of effort points of the selected roadmap items
    #[must_use]
    pub fn required_effort(
        &self,
        target_score: u8,
        scores: &[CategoryScore],
        roadmap: &[RoadmapItem],
    ) -> u32 {
        let effective: HashMap<&CategoryId, u8> = scores
            .iter()
            .map(|s| (s.category_id(), s.effective_score()))
            .collect();

        roadmap
            .iter()
            .filter(|item| match self.selection {
                EffortSelection::AllItems => true,
                EffortSelection::BelowTargetThreshold => effective
                    .get(&item.category_id)
                    .map_or(true, |score| *score < target_score),
            })
            .map(|item| item.effort_points)
            .sum()
    }

    /// Convert effort points into elapsed time for a stream count
    #[must_use]
    pub fn project(
        &self,
        current_level: MaturityLevel,
        target_level: MaturityLevel,
        target_score: u8,
        effort_points: u32,
        streams: u32,
    ) -> Projection {
        let streams = streams.max(1);
        let ideal_days = f64::from(effort_points) / self.velocity.points_per_ideal_day;
        let sprints = ideal_days / self.velocity.ideal_days_per_sprint;
        let calendar_sprints = sprints / f64::from(streams);
        let calendar_days = to_whole_days(calendar_sprints * self.velocity.sprint_length_days);

        Projection {
            current_level,
            target_level,
            target_score,
            effort_points,
            ideal_days,
            sprints,
            parallel_streams: streams,
            calendar_sprints,
            calendar_days,
            weeks: calendar_days.div_ceil(7),
        }
    }
}

fn to_whole_days(days: f64) -> u32 {
    if days.is_finite() && days > 0.0 {
        // Saturating float-to-int cast
        days.ceil() as u32
    } else {
        0
    }
}
