//! Error types for the assessment engine
//!
//! Only input and configuration problems surface here. External service
//! failures are absorbed by their fallbacks and never reach the caller.

use crate::config::ConfigError;
use cma_model::ModelError;
use cma_scoring::ScoringError;

/// Main engine error type
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input violates a model invariant
    #[error("invalid assessment: {0}")]
    Model(#[from] ModelError),

    /// Scoring contract violated
    #[error("scoring error: {0}")]
    Scoring(#[from] ScoringError),

    /// Input document is not valid JSON for the expected shape
    #[error("malformed input: {0}")]
    Input(#[from] serde_json::Error),
}

impl EngineError {
    /// Whether the caller supplied bad data, as opposed to bad configuration
    #[inline]
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Model(_) | Self::Input(_))
    }
}
