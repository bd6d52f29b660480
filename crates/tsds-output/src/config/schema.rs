use std::net::SocketAddr;

use serde::Deserialize;
use tsds_counter::counter::{DEFAULT_MAX_RATE, DEFAULT_MIN_RATE};
use tsds_counter::error::{Result, TsdsError};
use tsds_counter::SeriesConfig;

use crate::batch::{DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE};
use crate::format::PathMap;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub version: u32,

    pub output: OutputSection,

    /// `"alias /resource/path"` pairs.
    #[serde(default)]
    pub sensors: Vec<String>,

    /// Aliases whose values make a series key unique besides the node.
    #[serde(default)]
    pub metadata: Vec<String>,

    /// Aliases whose values are counters to convert into rates.
    #[serde(default)]
    pub rates: Vec<String>,

    #[serde(default)]
    pub rate_bounds: RateBounds,

    #[serde(default)]
    pub observability: ObservabilitySection,
}

impl OutputConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TsdsError::UnsupportedVersion);
        }

        self.output.validate()?;
        self.rate_bounds.validate()?;
        self.observability.validate()?;

        let path_map = PathMap::from_sensors(&self.sensors)?;
        for rate in &self.rates {
            if !path_map.has_alias(rate) {
                return Err(TsdsError::InvalidConfig(format!(
                    "rates entry {rate:?} is not a sensor alias"
                )));
            }
        }
        for meta in &self.metadata {
            if meta.trim().is_empty() {
                return Err(TsdsError::InvalidConfig("metadata entries must not be empty".into()));
            }
        }

        Ok(())
    }

    /// Per-series settings handed to the rate tracker.
    pub fn series_config(&self) -> SeriesConfig {
        SeriesConfig::new(self.output.interval, self.rate_bounds.min, self.rate_bounds.max)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// TSDS measurement type (e.g. `interface`).
    pub measurement: String,

    pub hostname: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Seconds between collections.
    #[serde(default = "default_interval")]
    pub interval: u32,

    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl OutputSection {
    pub fn validate(&self) -> Result<()> {
        if self.measurement.trim().is_empty() {
            return Err(TsdsError::InvalidConfig("output.measurement must not be empty".into()));
        }
        if self.hostname.trim().is_empty() {
            return Err(TsdsError::InvalidConfig("output.hostname must not be empty".into()));
        }
        if !(1..=86_400).contains(&self.interval) {
            return Err(TsdsError::InvalidConfig(
                "output.interval must be between 1 and 86400".into(),
            ));
        }
        if !(1..=MAX_BATCH_SIZE).contains(&self.batch_size) {
            return Err(TsdsError::InvalidConfig(format!(
                "output.batch_size must be between 1 and {MAX_BATCH_SIZE}"
            )));
        }
        Ok(())
    }
}

fn default_interval() -> u32 {
    60
}
fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateBounds {
    #[serde(default = "default_min_rate")]
    pub min: f64,

    #[serde(default = "default_max_rate")]
    pub max: f64,
}

impl Default for RateBounds {
    fn default() -> Self {
        Self {
            min: default_min_rate(),
            max: default_max_rate(),
        }
    }
}

impl RateBounds {
    pub fn validate(&self) -> Result<()> {
        if self.min.is_nan() || self.max.is_nan() {
            return Err(TsdsError::InvalidConfig("rate_bounds must be numbers".into()));
        }
        if self.min > self.max {
            return Err(TsdsError::InvalidConfig(
                "rate_bounds.min must not exceed rate_bounds.max".into(),
            ));
        }
        Ok(())
    }
}

fn default_min_rate() -> f64 {
    DEFAULT_MIN_RATE
}
fn default_max_rate() -> f64 {
    DEFAULT_MAX_RATE
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ObservabilitySection {
    /// Address for the `/metrics` endpoint; disabled when absent.
    #[serde(default)]
    pub listen: Option<String>,
}

impl ObservabilitySection {
    pub fn validate(&self) -> Result<()> {
        if let Some(listen) = &self.listen {
            listen.parse::<SocketAddr>().map_err(|e| {
                TsdsError::InvalidConfig(format!("observability.listen {listen:?}: {e}"))
            })?;
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Option<SocketAddr> {
        self.listen.as_deref().and_then(|l| l.parse().ok())
    }
}
