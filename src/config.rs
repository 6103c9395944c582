//! Run parameters and the file formats they may be loaded from.
//!
//! A [`SimulationConfig`] is the whole input surface of a run. The field names accept both their snake_case form and
//! the upper-case keys used by the original web front end:
//!
//! ```toml
//! seed = 42
//! customer_count = 10
//! mean_inter_arrival = 5.0
//! mean_service_time = 2.0
//! server_count = 1
//! ```

use crate::Error;

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;

/// Parameters of a single run. Immutable once the run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for every random draw in the run.
    #[serde(alias = "RANDOM_SEED")]
    pub seed: u64,
    /// How many customers the arrival process spawns.
    #[serde(alias = "NEW_CUSTOMERS")]
    pub customer_count: usize,
    /// Mean of the exponential inter-arrival time, in minutes.
    #[serde(alias = "INTER_ARRIVAL_TIME")]
    pub mean_inter_arrival: f64,
    /// Mean of the exponential service time, in minutes.
    #[serde(alias = "SERVICE_TIME")]
    pub mean_service_time: f64,
    #[serde(alias = "NUM_SERVERS")]
    pub server_count: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            customer_count: 10,
            mean_inter_arrival: 5.0,
            mean_service_time: 2.0,
            server_count: 1,
        }
    }
}

impl SimulationConfig {
    /// Check every field against its invariant.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] naming the first offending field.
    pub fn validate(&self) -> crate::Result {
        positive_mean("mean_inter_arrival", self.mean_inter_arrival)?;
        positive_mean("mean_service_time", self.mean_service_time)?;
        self.servers()?;
        Ok(())
    }

    /// Server count as the pool capacity.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] when the count is zero.
    pub fn servers(&self) -> crate::Result<NonZeroUsize> {
        NonZeroUsize::new(self.server_count).ok_or(Error::InvalidConfiguration {
            field: "server_count",
            reason: "must be at least 1",
        })
    }

    /// Parse a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Parse a JSON document, e.g. a request body.
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Load a config file, picking the parser from the extension (`.toml` or `.json`). The result is validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&contents)?,
            Some("json") => Self::from_json_str(&contents)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded simulation config");
        Ok(config)
    }
}

/// Largest accepted mean, in minutes. Keeps every sampled duration, and the clock that sums them, finite.
pub const MAX_MEAN_MINUTES: f64 = 1e12;

fn positive_mean(field: &'static str, value: f64) -> crate::Result {
    if !value.is_finite() {
        return Err(Error::InvalidConfiguration {
            field,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(Error::InvalidConfiguration {
            field,
            reason: "must be greater than zero",
        });
    }
    if value > MAX_MEAN_MINUTES {
        return Err(Error::InvalidConfiguration {
            field,
            reason: "must be at most 1e12 minutes",
        });
    }
    Ok(())
}

/// Failures while reading a config from outside the process.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0} (expected .toml or .json)")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Invalid(#[from] Error),
}
