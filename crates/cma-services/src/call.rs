//! Time-bounded service calls

use crate::error::ServiceError;
use std::future::Future;
use std::time::Duration;

/// Await a service call, converting an elapsed deadline into
/// `ServiceError::Timeout`
///
/// # Errors
/// Returns the call's own error, or `ServiceError::Timeout`
pub async fn with_timeout<T, F>(service: &'static str, limit: Duration, call: F) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, ServiceError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(ServiceError::Timeout {
            service,
            millis: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}
