//! Locale-aware formatting boundary
//!
//! The engine produces structured [`TimeEstimate`]s only. Turning one into a
//! sentence in the caller's language is the formatter's job.

use cma_model::Language;
use cma_scoring::TimeEstimate;

/// External formatter for time estimates
pub trait EstimateFormatter: Send + Sync {
    /// Human-readable estimate in `language`
    fn format_estimate(&self, estimate: &TimeEstimate, language: Language) -> String;
}
