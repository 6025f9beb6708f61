//! CMA Core - Cloud maturity assessment engine
//!
//! Ties the pure scoring crate to the external services:
//! - Centralized configuration (thresholds, velocity, organization defaults)
//! - The explicit scoring pipeline and its service fallbacks
//! - Last-write-wins background cost analysis
//! - Serializable reports
//!
//! # Example
//!
//! ```rust
//! use cma_core::{AssessmentEngine, EngineConfig, EngineServices};
//! use cma_model::{Assessment, AssessmentId, CategoryScore};
//!
//! # async fn example() -> Result<(), cma_core::EngineError> {
//! let engine = AssessmentEngine::new(EngineConfig::default(), EngineServices::offline())?;
//! let assessment = Assessment::new(
//!     AssessmentId::from("a-1"),
//!     vec![CategoryScore::new("security", 20)?, CategoryScore::new("automation", 70)?],
//! )?;
//!
//! let report = engine.evaluate(&assessment).await;
//! assert_eq!(report.score_card.overall().map(|o| o.value()), Some(45));
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod config;
pub mod engine;
pub mod error;
pub mod report;

// Re-exports for convenience
pub use config::{ConfigError, EngineConfig, ServiceSettings};
pub use engine::{AssessmentEngine, EngineServices};
pub use error::EngineError;
pub use report::{AssessmentReport, EvaluationInput, ScoreCard};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the assessment engine
    pub use crate::{AssessmentEngine, AssessmentReport, EngineConfig, EngineServices, ScoreCard};
    pub use cma_model::{Assessment, AssessmentId, CategoryScore, Language, Locale, Organization};
    pub use cma_scoring::{MaturityLevel, RiskTier, TimeEstimate};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
