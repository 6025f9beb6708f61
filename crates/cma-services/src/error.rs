//! Error types for external services
//!
//! These stay inside the service layer: callers receive a fallback value,
//! never one of these errors.

/// External service failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Service could not be reached
    #[error("{service} unavailable: {reason}")]
    Unavailable {
        service: &'static str,
        reason: String,
    },

    /// Service did not answer in time
    #[error("{service} timed out after {millis}ms")]
    Timeout { service: &'static str, millis: u64 },

    /// Requested record does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Service answered with something unusable
    #[error("invalid response from {service}: {reason}")]
    InvalidResponse {
        service: &'static str,
        reason: String,
    },
}

impl ServiceError {
    /// Create unavailable error
    #[inline]
    pub fn unavailable(service: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            service,
            reason: reason.into(),
        }
    }

    /// Check if a retry might succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Timeout { .. })
    }
}
