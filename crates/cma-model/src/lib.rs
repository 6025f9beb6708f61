//! CMA Model - Assessment data model
//!
//! Defines the values that flow through the maturity engine:
//! - Category scores and the knowledge-gap sentinel
//! - Assessments (an ordered, immutable snapshot of category scores)
//! - Organization context with per-field defaults
//! - Critical issues and their severity tiers
//! - Velocity tables used for time estimation
//!
//! Every constructor validates its input, so values that reach the pure
//! scoring functions already satisfy the model invariants.
//!
//! # Example
//!
//! ```rust
//! use cma_model::{Assessment, AssessmentId, CategoryScore};
//!
//! let scores = vec![
//!     CategoryScore::new("security", 20).unwrap(),
//!     CategoryScore::knowledge_gap("observability").unwrap(),
//! ];
//! let assessment = Assessment::new(AssessmentId::from("a-1"), scores).unwrap();
//! assert_eq!(assessment.completeness().knowledge_gaps, 1);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod assessment;
pub mod error;
pub mod ids;
pub mod issue;
pub mod locale;
pub mod organization;
pub mod score;
pub mod velocity;

// Re-exports for convenience
pub use assessment::{Assessment, Completeness};
pub use error::ModelError;
pub use ids::{AssessmentId, CategoryId, OrganizationId};
pub use issue::{CriticalIssue, Severity};
pub use locale::{Currency, Language, Locale};
pub use organization::{CompanySizeBucket, Organization, OrganizationProfile};
pub use score::{CategoryScore, MaturityLevel, MaturityTag, KNOWLEDGE_GAP_SCORE, MAX_SCORE};
pub use velocity::{ParallelStreams, VelocityTable};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
