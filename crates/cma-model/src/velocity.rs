//! Team velocity configuration
//!
//! Converts remediation effort points into calendar time. Static
//! configuration: the engine reads it and never mutates it.

use crate::error::ModelError;
use crate::organization::CompanySizeBucket;
use serde::{Deserialize, Serialize};

/// Throughput model for remediation work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocityTable {
    /// Effort points one stream completes per ideal day
    pub points_per_ideal_day: f64,
    /// Ideal (fully focused) days in one sprint
    pub ideal_days_per_sprint: f64,
    /// Calendar days one sprint spans
    pub sprint_length_days: f64,
    /// Independent work streams by organization size
    pub parallel_streams: ParallelStreams,
}

impl VelocityTable {
    /// Work streams for a size bucket
    ///
    /// An unrecognized size (`None`) falls back to a single stream, and the
    /// result is never zero.
    #[inline]
    #[must_use]
    pub fn streams_for(&self, bucket: Option<CompanySizeBucket>) -> u32 {
        bucket
            .map(|b| self.parallel_streams.get(b))
            .unwrap_or(1)
            .max(1)
    }

    /// With a stream count for one bucket
    #[inline]
    #[must_use]
    pub fn with_streams(mut self, bucket: CompanySizeBucket, streams: u32) -> Self {
        *self.parallel_streams.get_mut(bucket) = streams;
        self
    }

    /// Check that every rate is usable as a divisor
    ///
    /// # Errors
    /// Returns `ModelError::InvalidVelocity` naming the offending field
    pub fn validate(&self) -> Result<(), ModelError> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ModelError::InvalidVelocity(format!("{name} must be positive, got {v}")))
            }
        };
        positive("points_per_ideal_day", self.points_per_ideal_day)?;
        positive("ideal_days_per_sprint", self.ideal_days_per_sprint)?;
        positive("sprint_length_days", self.sprint_length_days)?;

        if let Some(bucket) = CompanySizeBucket::ALL
            .into_iter()
            .find(|b| self.parallel_streams.get(*b) == 0)
        {
            return Err(ModelError::InvalidVelocity(format!(
                "parallel_streams.{bucket:?} must be at least 1"
            )));
        }
        Ok(())
    }
}

impl Default for VelocityTable {
    fn default() -> Self {
        Self {
            points_per_ideal_day: 2.0,
            ideal_days_per_sprint: 8.0,
            sprint_length_days: 14.0,
            parallel_streams: ParallelStreams::default(),
        }
    }
}

/// Stream count per [`CompanySizeBucket`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelStreams {
    pub xs: u32,
    pub sm: u32,
    pub md: u32,
    pub lg: u32,
}

impl ParallelStreams {
    /// Same stream count for every bucket
    #[inline]
    #[must_use]
    pub fn uniform(streams: u32) -> Self {
        Self {
            xs: streams,
            sm: streams,
            md: streams,
            lg: streams,
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, bucket: CompanySizeBucket) -> u32 {
        match bucket {
            CompanySizeBucket::Xs => self.xs,
            CompanySizeBucket::Sm => self.sm,
            CompanySizeBucket::Md => self.md,
            CompanySizeBucket::Lg => self.lg,
        }
    }

    fn get_mut(&mut self, bucket: CompanySizeBucket) -> &mut u32 {
        match bucket {
            CompanySizeBucket::Xs => &mut self.xs,
            CompanySizeBucket::Sm => &mut self.sm,
            CompanySizeBucket::Md => &mut self.md,
            CompanySizeBucket::Lg => &mut self.lg,
        }
    }
}

impl Default for ParallelStreams {
    fn default() -> Self {
        Self {
            xs: 1,
            sm: 2,
            md: 3,
            lg: 4,
        }
    }
}
