//! Pure sample checks used by [`RateTracker`](super::RateTracker).
//!
//! Order matters and mirrors `compute_rate`: gap upper bound, non-finite
//! readings, gap lower bound, wraparound-aware delta, rate bounds.

use crate::error::RateError;

use super::measurement::{Sample, SeriesConfig};

/// A sample this many intervals (or more) after its baseline is discarded.
pub const GAP_INTERVAL_FACTOR: i64 = 6;

/// Largest value of a 32-bit counter.
pub const COUNTER32_MAX: f64 = u32::MAX as f64;

/// Largest value of a 64-bit counter.
pub const COUNTER64_MAX: f64 = u64::MAX as f64;

/// Smallest gap rejected as stale for the given interval.
pub fn gap_limit(interval_secs: u32) -> i64 {
    i64::from(interval_secs) * GAP_INTERVAL_FACTOR
}

pub fn check_gap(gap: i64, interval_secs: u32) -> Result<(), RateError> {
    let limit = gap_limit(interval_secs);
    if gap >= limit {
        return Err(RateError::GapTooLarge { gap, limit });
    }
    Ok(())
}

/// NaN and infinite readings cannot produce a meaningful delta.
pub fn check_finite(value: f64, previous: f64) -> Result<(), RateError> {
    if !value.is_finite() || !previous.is_finite() {
        return Err(RateError::InvalidValue { value, previous });
    }
    Ok(())
}

/// Duplicate timestamps and clock skew would divide by zero or flip the sign.
pub fn check_positive_gap(gap: i64) -> Result<(), RateError> {
    if gap <= 0 {
        return Err(RateError::NonPositiveGap { gap });
    }
    Ok(())
}

/// Increase between two readings, assuming a decrease means the counter wrapped.
///
/// The counter width is guessed from the previous reading alone: anything above
/// `u32::MAX` must be a 64-bit counter. A genuine reset (device reboot) is
/// indistinguishable from a wrap here and usually yields a huge delta that the
/// rate bounds then reject.
pub fn counter_delta(previous: f64, value: f64) -> f64 {
    if value >= previous {
        return value - previous;
    }
    if previous > COUNTER32_MAX {
        COUNTER64_MAX - previous + value
    } else {
        COUNTER32_MAX - previous + value
    }
}

/// Bounds are inclusive; a non-finite rate (delta overflow) is always out of range.
pub fn check_bounds(rate: f64, config: &SeriesConfig) -> Result<f64, RateError> {
    if !rate.is_finite() || rate < config.min_rate || rate > config.max_rate {
        return Err(RateError::RateOutOfRange {
            rate,
            min: config.min_rate,
            max: config.max_rate,
        });
    }
    Ok(rate)
}

/// Per-second rate between a baseline and the next reading of the same series.
pub fn rate_between(
    config: &SeriesConfig,
    previous: Sample,
    current: Sample,
) -> Result<f64, RateError> {
    let gap = current.timestamp.saturating_sub(previous.timestamp);

    check_gap(gap, config.interval_secs)?;
    check_finite(current.value, previous.value)?;
    check_positive_gap(gap)?;

    let delta = counter_delta(previous.value, current.value);
    check_bounds(delta / gap as f64, config)
}
