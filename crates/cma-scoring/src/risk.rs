//! Risk rating
//!
//! Rules are applied in order and the first match wins:
//! 1. HIGH when more than 5 high-severity issues, or overall score < 30
//! 2. MEDIUM when any high-severity issue, more than 2 medium-severity
//!    issues, or overall score < 50
//! 3. LOW otherwise
//!
//! Without usable issues (every category a knowledge gap) a score-only rule
//! applies: HIGH below 30, MEDIUM below 60, LOW otherwise.

use crate::aggregate::OverallScore;
use cma_model::{CategoryScore, CriticalIssue, Severity};
use serde::{Deserialize, Serialize};

const HIGH_SEVERITY_LIMIT: usize = 5;
const MEDIUM_SEVERITY_LIMIT: usize = 2;
const HIGH_RISK_BELOW: u8 = 30;
const MEDIUM_RISK_BELOW: u8 = 50;
const SCORE_ONLY_MEDIUM_BELOW: u8 = 60;

/// Categories scoring below this raise a synthesized issue
const ISSUE_SCORE_BELOW: u8 = 40;

/// Risk tier, ordered `Low < Medium < High`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

/// Issue counts per severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl IssueCounts {
    /// Count issues by severity
    #[must_use]
    pub fn of(issues: &[CriticalIssue]) -> Self {
        issues.iter().fold(Self::default(), |mut counts, issue| {
            match issue.severity {
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
            counts
        })
    }

    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Rate risk from the overall score and critical issues
#[must_use]
pub fn rate(overall: OverallScore, issues: &[CriticalIssue]) -> RiskTier {
    rate_counts(overall, IssueCounts::of(issues))
}

fn rate_counts(overall: OverallScore, counts: IssueCounts) -> RiskTier {
    let score = overall.value();
    if counts.high > HIGH_SEVERITY_LIMIT || score < HIGH_RISK_BELOW {
        RiskTier::High
    } else if counts.high > 0 || counts.medium > MEDIUM_SEVERITY_LIMIT || score < MEDIUM_RISK_BELOW {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Score-only rating used when critical issues are meaningless
#[must_use]
pub fn rate_score_only(score: u8) -> RiskTier {
    if score < HIGH_RISK_BELOW {
        RiskTier::High
    } else if score < SCORE_ONLY_MEDIUM_BELOW {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Simplified issue list derived from low category scores
///
/// One issue per answered category below 40: severity 3 under 30, else 2.
/// Knowledge gaps carry no score and raise nothing.
#[must_use]
pub fn synthesize_issues(scores: &[CategoryScore]) -> Vec<CriticalIssue> {
    scores
        .iter()
        .filter_map(|s| {
            let value = s.numeric_score()?;
            if value >= ISSUE_SCORE_BELOW {
                return None;
            }
            let severity = if value < HIGH_RISK_BELOW {
                Severity::High
            } else {
                Severity::Medium
            };
            Some(CriticalIssue::new(
                format!("synthesized-{}", s.category_id()),
                s.category_id().clone(),
                severity,
                format!("Category '{}' scored {value}%, below the {ISSUE_SCORE_BELOW}% baseline", s.category_id()),
            ))
        })
        .collect()
}

/// Where the critical issues behind a rating came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSource {
    /// Critical issues service answered
    Service,
    /// Service failed; issues synthesized from category scores
    Synthesized,
    /// Issues not applicable (all knowledge gaps)
    Unavailable,
}

/// Risk rating with the evidence behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    pub issue_counts: IssueCounts,
    pub issue_source: IssueSource,
    pub issues: Vec<CriticalIssue>,
}

impl RiskAssessment {
    /// Rate a scored assessment
    #[must_use]
    pub fn from_issues(overall: OverallScore, issues: Vec<CriticalIssue>, source: IssueSource) -> Self {
        let issue_counts = IssueCounts::of(&issues);
        let tier = rate_counts(overall, issue_counts);
        tracing::debug!(?tier, %overall, high = issue_counts.high, medium = issue_counts.medium, "risk rated");
        Self {
            tier,
            issue_counts,
            issue_source: source,
            issues,
        }
    }

    /// Rate an all-knowledge-gap assessment; issue counts are forced to zero
    #[must_use]
    pub fn knowledge_gap(score: u8) -> Self {
        Self {
            tier: rate_score_only(score),
            issue_counts: IssueCounts::default(),
            issue_source: IssueSource::Unavailable,
            issues: Vec::new(),
        }
    }

    /// Critical issue count shown alongside the tier
    #[inline]
    #[must_use]
    pub fn critical_issue_count(&self) -> usize {
        self.issue_counts.total()
    }
}
