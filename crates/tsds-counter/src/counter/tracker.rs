use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::RateError;

use super::measurement::{Measurement, Sample, SeriesConfig};
use super::validate::rate_between;

/// Keyed store of the last reading per series.
///
/// Construct once at pipeline start and share via `Arc`. Entries are created on
/// first sight and never evicted; an agent restart starts every series over
/// from a fresh baseline.
///
/// Each `compute_rate` swaps the stored reading under the entry's shard lock,
/// so two callers on the same key never see a half-updated baseline, while
/// keys in other shards proceed without waiting.
#[derive(Default)]
pub struct RateTracker {
    series: DashMap<String, Measurement>,
}

impl RateTracker {
    pub fn new() -> Self {
        Self {
            series: DashMap::new(),
        }
    }

    /// Insert or fully replace the state for `key`.
    pub fn record_baseline(&self, key: impl Into<String>, config: SeriesConfig, sample: Sample) {
        let key = key.into();
        tracing::trace!(key = %key, ts = sample.timestamp, value = sample.value, "baseline recorded");
        self.series.insert(key, Measurement::new(config, sample));
    }

    /// Rate between the stored baseline and `sample`.
    ///
    /// `sample` becomes the new baseline even when the rate is rejected, so one
    /// bad reading costs exactly one interval.
    pub fn compute_rate(&self, key: &str, sample: Sample) -> Result<f64, RateError> {
        let (config, previous) = {
            let mut entry = self.series.get_mut(key).ok_or_else(|| RateError::UnknownKey {
                key: key.to_string(),
            })?;
            let previous = std::mem::replace(&mut entry.last, sample);
            (entry.config, previous)
        };

        rate_between(&config, previous, sample)
    }

    /// `compute_rate`, falling back to `record_baseline` for a key not seen yet.
    ///
    /// Returns `Ok(None)` when `sample` became the first baseline. The fallback
    /// looks up and inserts under one shard lock, so concurrent first samples
    /// for a new key record exactly one baseline and the rest get rates.
    pub fn observe(
        &self,
        key: &str,
        config: SeriesConfig,
        sample: Sample,
    ) -> Result<Option<f64>, RateError> {
        match self.compute_rate(key, sample) {
            Err(RateError::UnknownKey { .. }) => {}
            other => return other.map(Some),
        }

        let (config, previous) = match self.series.entry(key.to_string()) {
            Entry::Occupied(mut e) => {
                let m = e.get_mut();
                let previous = std::mem::replace(&mut m.last, sample);
                (m.config, previous)
            }
            Entry::Vacant(v) => {
                tracing::trace!(key = %key, ts = sample.timestamp, value = sample.value, "baseline recorded");
                v.insert(Measurement::new(config, sample));
                return Ok(None);
            }
        };

        rate_between(&config, previous, sample).map(Some)
    }

    /// Copy of the current state for `key`.
    pub fn snapshot(&self, key: &str) -> Option<Measurement> {
        self.series.get(key).map(|r| *r.value())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.series.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
