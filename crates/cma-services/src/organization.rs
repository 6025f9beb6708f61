//! Organization lookup
//!
//! "Not found" is an expected answer. Missing records, missing fields and
//! service failures all resolve to the configured defaults.

use crate::call::with_timeout;
use crate::error::ServiceError;
use async_trait::async_trait;
use cma_model::{Organization, OrganizationId, OrganizationProfile};
use std::collections::HashMap;
use std::time::Duration;

const SERVICE: &str = "organization lookup";

/// External organization lookup
#[async_trait]
pub trait OrganizationLookup: Send + Sync {
    /// Fetch an organization profile; `Ok(None)` when it does not exist
    async fn lookup(&self, id: &OrganizationId) -> Result<Option<OrganizationProfile>, ServiceError>;
}

/// Resolve organization context, applying per-field defaults
///
/// Never fails: an absent reference, a missing record or a service error
/// all yield `defaults`.
pub async fn lookup_or_default(
    lookup: &dyn OrganizationLookup,
    id: Option<&OrganizationId>,
    defaults: &Organization,
    timeout: Duration,
) -> Organization {
    let Some(id) = id else {
        return defaults.clone();
    };

    match with_timeout(SERVICE, timeout, lookup.lookup(id)).await {
        Ok(Some(profile)) => profile.resolve(defaults),
        Ok(None) | Err(ServiceError::NotFound(_)) => {
            tracing::debug!(organization = %id, "organization not found, using defaults");
            defaults.clone()
        }
        Err(e) => {
            tracing::warn!(organization = %id, error = %e, "organization lookup failed, using defaults");
            defaults.clone()
        }
    }
}

/// In-memory lookup over a fixed set of profiles
#[derive(Debug, Clone, Default)]
pub struct StaticOrganizationLookup {
    profiles: HashMap<OrganizationId, OrganizationProfile>,
}

impl StaticOrganizationLookup {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a profile registered under `id`
    #[inline]
    #[must_use]
    pub fn with_profile(mut self, id: OrganizationId, profile: OrganizationProfile) -> Self {
        self.profiles.insert(id, profile);
        self
    }
}

#[async_trait]
impl OrganizationLookup for StaticOrganizationLookup {
    async fn lookup(&self, id: &OrganizationId) -> Result<Option<OrganizationProfile>, ServiceError> {
        Ok(self.profiles.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Broken;

    #[async_trait]
    impl OrganizationLookup for Broken {
        async fn lookup(&self, _id: &OrganizationId) -> Result<Option<OrganizationProfile>, ServiceError> {
            Err(ServiceError::unavailable(SERVICE, "503"))
        }
    }

    const TIMEOUT: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn found_profile_is_merged_over_defaults() {
        let lookup = StaticOrganizationLookup::new().with_profile(
            OrganizationId::from("org-1"),
            OrganizationProfile {
                company_size: Some("1000+".to_string()),
                ..OrganizationProfile::default()
            },
        );
        let defaults = Organization::default();
        let org = lookup_or_default(&lookup, Some(&OrganizationId::from("org-1")), &defaults, TIMEOUT).await;
        assert_eq!(org.company_size, "1000+");
        assert_eq!(org.industry, defaults.industry);
    }

    #[tokio::test]
    async fn missing_and_failing_lookups_use_defaults() {
        let defaults = Organization::default();
        let id = OrganizationId::from("org-404");

        let empty = StaticOrganizationLookup::new();
        assert_eq!(lookup_or_default(&empty, Some(&id), &defaults, TIMEOUT).await, defaults);
        assert_eq!(lookup_or_default(&Broken, Some(&id), &defaults, TIMEOUT).await, defaults);
        assert_eq!(lookup_or_default(&Broken, None, &defaults, TIMEOUT).await, defaults);
    }
}
