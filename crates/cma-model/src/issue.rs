//! Critical issues raised against an assessment

use crate::error::ModelError;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// Severity tier of a critical issue, serialized as 1/2/3
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Severity {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl TryFrom<u8> for Severity {
    type Error = ModelError;

    fn try_from(tier: u8) -> Result<Self, Self::Error> {
        match tier {
            1 => Ok(Severity::Low),
            2 => Ok(Severity::Medium),
            3 => Ok(Severity::High),
            other => Err(ModelError::InvalidSeverity(other)),
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity as u8
    }
}

/// A weighted finding that feeds the risk rating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalIssue {
    pub id: String,
    #[serde(alias = "categoryId")]
    pub category_id: CategoryId,
    pub severity: Severity,
    pub text: String,
}

impl CriticalIssue {
    /// Create new issue
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        category_id: impl Into<CategoryId>,
        severity: Severity,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category_id: category_id.into(),
            severity,
            text: text.into(),
        }
    }
}
