use std::fmt;

/// Lower plausibility bound applied when a series does not override it.
pub const DEFAULT_MIN_RATE: f64 = 0.0;

/// Upper plausibility bound applied when a series does not override it (1 Peta/s).
pub const DEFAULT_MAX_RATE: f64 = 1e15;

/// Sampling interval assumed when a series does not override it.
pub const DEFAULT_INTERVAL_SECS: u32 = 60;

/// Per-series settings fixed at baseline time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesConfig {
    /// Expected seconds between samples.
    pub interval_secs: u32,
    /// Inclusive lower bound on an accepted rate.
    pub min_rate: f64,
    /// Inclusive upper bound on an accepted rate.
    pub max_rate: f64,
}

impl SeriesConfig {
    pub fn new(interval_secs: u32, min_rate: f64, max_rate: f64) -> Self {
        Self {
            interval_secs,
            min_rate,
            max_rate,
        }
    }

    /// Default bounds with a custom interval.
    pub fn with_interval(interval_secs: u32) -> Self {
        Self {
            interval_secs,
            ..Self::default()
        }
    }
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            min_rate: DEFAULT_MIN_RATE,
            max_rate: DEFAULT_MAX_RATE,
        }
    }
}

/// One raw counter reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Epoch seconds.
    pub timestamp: i64,
    /// Raw counter value.
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Tracked state of one series: its settings plus the latest reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub config: SeriesConfig,
    pub last: Sample,
}

impl Measurement {
    pub fn new(config: SeriesConfig, last: Sample) -> Self {
        Self { config, last }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[interval: {}s / min: {} / max: {} / timestamp: {} / value: {}]",
            self.config.interval_secs,
            self.config.min_rate,
            self.config.max_rate,
            self.last.timestamp,
            self.last.value
        )
    }
}
