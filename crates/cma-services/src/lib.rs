//! CMA Services - external collaborators of the assessment engine
//!
//! The engine consumes three read-only services and one formatting boundary:
//! - [`OrganizationLookup`]: organization context, defaults on absence
//! - [`CriticalIssuesService`]: weighted issues, synthesized locally on failure
//! - [`CostAnalysisService`]: cost savings, degraded value on failure
//! - [`EstimateFormatter`]: human-readable time estimates
//!
//! Failures never escape this crate's helpers. Every call is bounded by a
//! timeout and converted into its documented fallback.
//!
//! # Architecture
//!
//! ```text
//! CategoryScore[] + Locale ─> CostRequest ─> fingerprint ─> CostCache ──hit──> CostAnalysis
//!                                                             │ miss
//!                                                             └─> CostAnalysisService ─(err)─> fallback
//!
//! CostAnalysisTracker: submit() aborts the in-flight request; stale results are discarded
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod cache;
pub mod call;
pub mod cost;
pub mod error;
pub mod format;
pub mod issues;
pub mod offline;
pub mod organization;
pub mod tracker;

// Re-exports for convenience
pub use cache::{CacheStats, CostCache, RequestFingerprint};
pub use cost::{AnalysisSource, CostAnalysis, CostAnalysisService, CostRequest, CostSavingsAnalyzer};
pub use error::ServiceError;
pub use format::EstimateFormatter;
pub use issues::{fetch_or_synthesize, CriticalIssuesService};
pub use offline::OfflineServices;
pub use organization::{lookup_or_default, OrganizationLookup, StaticOrganizationLookup};
pub use tracker::{CostAnalysisTracker, CostState};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for implementing and wiring services
    pub use crate::{
        CostAnalysis, CostAnalysisService, CostAnalysisTracker, CostRequest, CostSavingsAnalyzer,
        CriticalIssuesService, EstimateFormatter, OrganizationLookup, ServiceError,
    };
    pub use async_trait::async_trait;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
