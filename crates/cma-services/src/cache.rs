//! Content-addressed cost analysis cache using moka
//!
//! Successful service answers are stored by the fingerprint of their
//! request, so identical score sets (in any order) share one entry.

use crate::cost::CostAnalysis;
use moka::future::Cache;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

/// 32-byte Blake3 fingerprint of a [`CostRequest`](crate::CostRequest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestFingerprint([u8; 32]);

impl RequestFingerprint {
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for RequestFingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short())
    }
}

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
}

/// Cost analysis cache
#[derive(Debug, Clone)]
pub struct CostCache {
    inner: Cache<RequestFingerprint, CostAnalysis>,
}

impl CostCache {
    /// Create new cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Create cache with time-based expiration
    #[inline]
    #[must_use]
    pub fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    #[inline]
    pub async fn insert(&self, fingerprint: RequestFingerprint, analysis: CostAnalysis) {
        self.inner.insert(fingerprint, analysis).await;
    }

    #[inline]
    pub async fn get(&self, fingerprint: &RequestFingerprint) -> Option<CostAnalysis> {
        self.inner.get(fingerprint).await
    }

    /// Invalidate one entry
    #[inline]
    pub async fn invalidate(&self, fingerprint: &RequestFingerprint) {
        self.inner.invalidate(fingerprint).await;
    }

    /// Invalidate all entries
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Get cache statistics
    ///
    /// Entry counts are eventually consistent; pending maintenance work is
    /// run first so the count reflects recent inserts.
    pub async fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks().await;
        CacheStats {
            entry_count: self.inner.entry_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cma_model::Currency;

    #[tokio::test]
    async fn insert_get_invalidate() {
        let cache = CostCache::with_ttl(8, Duration::from_secs(60));
        let key = RequestFingerprint::new([7; 32]);

        assert!(cache.get(&key).await.is_none());
        cache.insert(key, CostAnalysis::fallback(Currency::Usd)).await;
        assert!(cache.get(&key).await.is_some());
        assert_eq!(cache.stats().await.entry_count, 1);

        cache.invalidate(&key).await;
        assert!(cache.get(&key).await.is_none());
    }

    #[test]
    fn fingerprint_short_form() {
        let key = RequestFingerprint::new([0xab; 32]);
        assert_eq!(key.short(), "abababababababab");
        assert_eq!(key.to_string(), key.short());
    }
}
