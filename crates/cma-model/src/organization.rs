//! Organization context
//!
//! The lookup service may return a partial [`OrganizationProfile`] or nothing
//! at all. [`OrganizationProfile::resolve`] fills every missing field from a
//! defaults [`Organization`], so consumers never see an absent field.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fully-resolved organization context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    pub industry: String,
    /// Headcount range, e.g. `51-250`
    pub company_size: String,
    pub region: String,
    pub user_role: String,
    pub business_objectives: BTreeSet<String>,
    pub cloud_providers: BTreeSet<String>,
    pub deployment_model: String,
}

impl Organization {
    /// Parallelism bucket for this organization's headcount
    #[inline]
    #[must_use]
    pub fn size_bucket(&self) -> Option<CompanySizeBucket> {
        CompanySizeBucket::from_company_size(&self.company_size)
    }
}

impl Default for Organization {
    fn default() -> Self {
        Self {
            industry: "technology".to_string(),
            company_size: "51-250".to_string(),
            region: "north_america".to_string(),
            user_role: "architect".to_string(),
            business_objectives: ["faster_time_to_market", "scalability"]
                .into_iter()
                .map(String::from)
                .collect(),
            cloud_providers: BTreeSet::from(["aws".to_string()]),
            deployment_model: "public_cloud".to_string(),
        }
    }
}

/// Organization fields as returned by the lookup service; any may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationProfile {
    pub industry: Option<String>,
    #[serde(alias = "companySize")]
    pub company_size: Option<String>,
    pub region: Option<String>,
    #[serde(alias = "userRole")]
    pub user_role: Option<String>,
    #[serde(alias = "businessObjectives")]
    pub business_objectives: Option<BTreeSet<String>>,
    #[serde(alias = "cloudProviders")]
    pub cloud_providers: Option<BTreeSet<String>>,
    #[serde(alias = "deploymentModel")]
    pub deployment_model: Option<String>,
}

impl OrganizationProfile {
    /// Merge over defaults, field by field
    ///
    /// Blank strings and empty sets count as missing.
    #[must_use]
    pub fn resolve(self, defaults: &Organization) -> Organization {
        fn text(value: Option<String>, fallback: &str) -> String {
            value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string())
        }
        fn tags(value: Option<BTreeSet<String>>, fallback: &BTreeSet<String>) -> BTreeSet<String> {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| fallback.clone())
        }

        Organization {
            industry: text(self.industry, &defaults.industry),
            company_size: text(self.company_size, &defaults.company_size),
            region: text(self.region, &defaults.region),
            user_role: text(self.user_role, &defaults.user_role),
            business_objectives: tags(self.business_objectives, &defaults.business_objectives),
            cloud_providers: tags(self.cloud_providers, &defaults.cloud_providers),
            deployment_model: text(self.deployment_model, &defaults.deployment_model),
        }
    }
}

/// Headcount bucket used to pick the number of parallel work streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanySizeBucket {
    /// Up to 50 people
    Xs,
    /// 51 to 250
    Sm,
    /// 251 to 1000
    Md,
    /// More than 1000
    Lg,
}

static HEADCOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d[\d,]*)\s*(?:(-|~|to)\s*(\d[\d,]*)|(\+))?\s*$").expect("valid headcount regex")
});

impl CompanySizeBucket {
    /// All buckets, smallest first
    pub const ALL: [CompanySizeBucket; 4] = [Self::Xs, Self::Sm, Self::Md, Self::Lg];

    /// Bucket for a headcount range string
    ///
    /// Accepts `N`, `N-M`, `N+` and the bucket names themselves. The upper end
    /// of a range decides the bucket; `N+` is treated as more than `N`.
    /// Returns `None` for anything unparsable.
    #[must_use]
    pub fn from_company_size(size: &str) -> Option<Self> {
        match size.trim().to_ascii_lowercase().as_str() {
            "xs" => return Some(Self::Xs),
            "sm" => return Some(Self::Sm),
            "md" => return Some(Self::Md),
            "lg" => return Some(Self::Lg),
            _ => {}
        }

        let caps = HEADCOUNT.captures(size)?;
        let parse = |m: regex::Match<'_>| m.as_str().replace(',', "").parse::<u64>().ok();
        let lower = parse(caps.get(1)?)?;
        let headcount = match (caps.get(3), caps.get(4)) {
            (Some(upper), _) => parse(upper)?.max(lower),
            (None, Some(_)) => lower.saturating_add(1),
            (None, None) => lower,
        };

        Some(Self::from_headcount(headcount))
    }

    /// Bucket for an exact headcount
    #[inline]
    #[must_use]
    pub fn from_headcount(headcount: u64) -> Self {
        match headcount {
            0..=50 => Self::Xs,
            51..=250 => Self::Sm,
            251..=1000 => Self::Md,
            _ => Self::Lg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_organization_fields() {
        let org = Organization::default();
        assert_eq!(org.industry, "technology");
        assert_eq!(org.company_size, "51-250");
        assert_eq!(org.region, "north_america");
        assert_eq!(org.user_role, "architect");
        assert!(org.business_objectives.contains("faster_time_to_market"));
        assert!(org.business_objectives.contains("scalability"));
        assert_eq!(org.cloud_providers.len(), 1);
        assert_eq!(org.deployment_model, "public_cloud");
    }

    #[test]
    fn profile_resolves_per_field() {
        let profile = OrganizationProfile {
            industry: Some("finance".to_string()),
            company_size: Some("  ".to_string()),
            cloud_providers: Some(BTreeSet::new()),
            ..OrganizationProfile::default()
        };
        let org = profile.resolve(&Organization::default());
        assert_eq!(org.industry, "finance");
        assert_eq!(org.company_size, "51-250");
        assert_eq!(org.cloud_providers, BTreeSet::from(["aws".to_string()]));
    }

    #[test]
    fn buckets_from_ranges() {
        assert_eq!(CompanySizeBucket::from_company_size("1-50"), Some(CompanySizeBucket::Xs));
        assert_eq!(CompanySizeBucket::from_company_size("51-250"), Some(CompanySizeBucket::Sm));
        assert_eq!(CompanySizeBucket::from_company_size("251-1000"), Some(CompanySizeBucket::Md));
        assert_eq!(CompanySizeBucket::from_company_size("1,001-5,000"), Some(CompanySizeBucket::Lg));
        assert_eq!(CompanySizeBucket::from_company_size("1000+"), Some(CompanySizeBucket::Lg));
        assert_eq!(CompanySizeBucket::from_company_size("42"), Some(CompanySizeBucket::Xs));
        assert_eq!(CompanySizeBucket::from_company_size("MD"), Some(CompanySizeBucket::Md));
    }

    #[test]
    fn unparsable_size_has_no_bucket() {
        assert_eq!(CompanySizeBucket::from_company_size("enterprise"), None);
        assert_eq!(CompanySizeBucket::from_company_size(""), None);
    }
}
