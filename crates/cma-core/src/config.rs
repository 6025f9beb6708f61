//! Engine configuration
//!
//! The one place where thresholds, velocity constants, organization defaults
//! and service limits are defined. Every field has a default, so a config
//! file only needs the values it overrides.
//!
//! ```toml
//! effort_selection = "all_items"
//!
//! [thresholds]
//! intermediate = 25
//!
//! [velocity.parallel_streams]
//! lg = 6
//! ```

use cma_model::{ModelError, Organization, VelocityTable};
use cma_scoring::{EffortSelection, MaturityThresholds, ScoringError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not a supported format
    #[error("unsupported config format: {0} (expected .toml, .yaml or .yml)")]
    UnsupportedFormat(String),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to render TOML: {0}")]
    TomlRender(#[from] toml::ser::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Maturity threshold table rejected
    #[error(transparent)]
    Thresholds(#[from] ScoringError),

    /// Velocity table rejected
    #[error(transparent)]
    Velocity(#[from] ModelError),

    /// Service limits rejected
    #[error("invalid service settings: {0}")]
    Services(String),
}

/// Timeouts and cache sizing for external services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Upper bound for every external call
    pub timeout_ms: u64,
    /// Cost analysis cache capacity; 0 disables the cache
    pub cost_cache_capacity: u64,
    pub cost_cache_ttl_secs: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            cost_cache_capacity: 256,
            cost_cache_ttl_secs: 300,
        }
    }
}

impl ServiceSettings {
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[inline]
    #[must_use]
    pub fn cost_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cost_cache_ttl_secs)
    }
}

/// Assessment engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Roadmap items counted toward the next tier
    pub effort_selection: EffortSelection,
    pub thresholds: MaturityThresholds,
    pub velocity: VelocityTable,
    /// Applied field by field when organization data is missing
    pub organization_defaults: Organization,
    pub services: ServiceSettings,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: MaturityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_velocity(mut self, velocity: VelocityTable) -> Self {
        self.velocity = velocity;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_organization_defaults(mut self, defaults: Organization) -> Self {
        self.organization_defaults = defaults;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_effort_selection(mut self, selection: EffortSelection) -> Self {
        self.effort_selection = selection;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_services(mut self, services: ServiceSettings) -> Self {
        self.services = services;
        self
    }

    /// Check every section
    ///
    /// # Errors
    /// Returns the first section that fails validation
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        self.velocity.validate()?;
        if self.services.timeout_ms == 0 {
            return Err(ConfigError::Services("timeout_ms must be above 0".to_string()));
        }
        Ok(())
    }

    /// Parse and validate TOML
    ///
    /// # Errors
    /// Returns a parse or validation error
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate YAML
    ///
    /// # Errors
    /// Returns a parse or validation error
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml`, `.yaml` or `.yml` file
    ///
    /// # Errors
    /// Returns an I/O, format, parse or validation error
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = match extension.as_str() {
            "toml" => Self::from_toml_str(&contents)?,
            "yaml" | "yml" => Self::from_yaml_str(&contents)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        tracing::debug!(path = %path.display(), "loaded engine configuration");
        Ok(config)
    }

    /// Render as TOML
    ///
    /// # Errors
    /// Returns `ConfigError::TomlRender` if serialization fails
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
