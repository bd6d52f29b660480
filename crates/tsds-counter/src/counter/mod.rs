//! Counter-to-rate conversion.
//!
//! `RateTracker` owns the per-series state; `validate` holds the pure checks it
//! runs on every sample (gap window, non-finite readings, wraparound delta,
//! rate bounds).

mod measurement;
mod tracker;
pub mod validate;

pub use measurement::{
    Measurement, Sample, SeriesConfig, DEFAULT_INTERVAL_SECS, DEFAULT_MAX_RATE, DEFAULT_MIN_RATE,
};
pub use tracker::RateTracker;
