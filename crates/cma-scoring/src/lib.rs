//! CMA Scoring - pure assessment computation
//!
//! Everything in this crate is synchronous and free of I/O, so every
//! function can be called repeatedly and concurrently without locking.
//!
//! # Pipeline
//!
//! ```text
//! CategoryScore[] ─┬─> aggregate ─> classify ─┬─> rate (+ CriticalIssue[]) ─> RiskTier
//!                  │                          └─────────────────┐
//!                  └─> generate_roadmap ─> RoadmapItem[] ─> TimeEstimator ─> TimeEstimate
//! ```
//!
//! # Example
//!
//! ```rust
//! use cma_model::CategoryScore;
//! use cma_scoring::{aggregate, generate_roadmap, MaturityLevel, MaturityThresholds};
//!
//! let scores = vec![
//!     CategoryScore::new("security", 20).unwrap(),
//!     CategoryScore::new("automation", 70).unwrap(),
//!     CategoryScore::knowledge_gap("observability").unwrap(),
//! ];
//!
//! let overall = aggregate(&scores).unwrap();
//! assert_eq!(overall.value(), 45);
//! assert_eq!(MaturityThresholds::default().classify(overall), MaturityLevel::Intermediate);
//!
//! let roadmap = generate_roadmap(&scores);
//! assert_eq!(roadmap[0].priority, 160);
//! assert_eq!(roadmap[0].effort_points, 40);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod aggregate;
pub mod error;
pub mod estimate;
pub mod maturity;
pub mod risk;
pub mod roadmap;

pub use aggregate::{aggregate, detect, OverallScore, ScoreState};
pub use error::ScoringError;
pub use estimate::{EffortSelection, Projection, TimeEstimate, TimeEstimator};
pub use maturity::{classify, MaturityThresholds};
pub use risk::{
    rate, rate_score_only, synthesize_issues, IssueCounts, IssueSource, RiskAssessment, RiskTier,
};
pub use roadmap::{by_priority, generate_roadmap, ImpactLevel, RoadmapItem, MIN_EFFORT_POINTS};

// Model types that appear in this crate's signatures
pub use cma_model::{MaturityLevel, MaturityTag};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
