use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use tsds_counter::error::Result;
use tsds_counter::{RateTracker, Sample, SeriesConfig};

use crate::config::OutputConfig;
use crate::obs::metrics::OutputMetrics;

use super::pathmap::PathMap;
use super::record::{sample_value, Metric, Record};

/// Tag carrying the node (device) name of a metric.
pub const NODE_TAG: &str = "device";

const KEY_SEP: char = '|';

/// Turns collector metrics into TSDS records and resolves rate fields.
/// Construct once at startup; the tracker it holds outlives every batch.
pub struct Formatter {
    measurement: String,
    interval: u32,
    path_map: PathMap,
    metadata: Vec<String>,
    rates: Vec<String>,
    series: SeriesConfig,
    tracker: Arc<RateTracker>,
    metrics: Arc<OutputMetrics>,
}

impl Formatter {
    pub fn new(
        cfg: &OutputConfig,
        tracker: Arc<RateTracker>,
        metrics: Arc<OutputMetrics>,
    ) -> Result<Self> {
        let path_map = PathMap::from_sensors(&cfg.sensors)?;
        tracing::debug!(paths = path_map.len(), "path map initialised from sensors");

        Ok(Self {
            measurement: cfg.output.measurement.clone(),
            interval: cfg.output.interval,
            path_map,
            metadata: cfg.metadata.clone(),
            rates: cfg.rates.clone(),
            series: cfg.series_config(),
            tracker,
            metrics,
        })
    }

    /// Build records for every complete metric, with rate fields resolved.
    pub fn format(&self, metrics: &[Metric]) -> Vec<Record> {
        tracing::debug!(count = metrics.len(), measurement = %self.measurement, "formatting metrics");

        let mut out = Vec::with_capacity(metrics.len());
        for metric in metrics {
            let mut record = self.to_record(metric);

            if !self.is_complete(&record) {
                self.metrics.records_dropped.inc(&[("reason", "incomplete")]);
                tracing::trace!(metric = %metric.name, "dropping incomplete record");
                continue;
            }

            if !self.rates.is_empty() {
                self.process_rates(&mut record);
            }
            out.push(record);
        }

        tracing::debug!(good = out.len(), total = metrics.len(), "metrics produced records");
        out
    }

    fn to_record(&self, metric: &Metric) -> Record {
        let mut meta = BTreeMap::new();
        let node = metric.tags.get(NODE_TAG).cloned().unwrap_or_default();
        meta.insert("node".to_string(), node);

        for (tag, value) in &metric.tags {
            if let Some(alias) = self.path_map.alias(tag) {
                if alias != "node" {
                    meta.insert(alias.to_string(), value.clone());
                }
            }
        }

        let values = metric
            .fields
            .iter()
            .filter_map(|(field, value)| {
                self.path_map
                    .alias(field)
                    .map(|alias| (alias.to_string(), value.clone()))
            })
            .collect();

        Record {
            measurement: self.measurement.clone(),
            time: metric.time,
            interval: self.interval,
            meta,
            values,
        }
    }

    /// Every mapped path plus the node must have produced an entry.
    fn is_complete(&self, record: &Record) -> bool {
        record.meta.len() + record.values.len() > self.path_map.len()
    }

    /// Series key for one rate field: type, node, configured metadata, field.
    pub fn rate_key(&self, record: &Record, field: &str) -> String {
        let mut key = record.measurement.clone();
        key.push(KEY_SEP);
        key.push_str(record.meta.get("node").map(String::as_str).unwrap_or_default());
        for name in &self.metadata {
            key.push(KEY_SEP);
            key.push_str(record.meta.get(name).map(String::as_str).unwrap_or_default());
        }
        key.push(KEY_SEP);
        key.push_str(field);
        key
    }

    /// Replace each configured counter field with its rate, or `null`.
    pub fn process_rates(&self, record: &mut Record) {
        for field in &self.rates {
            let Some(raw) = record.values.get(field) else {
                continue;
            };
            let key = self.rate_key(record, field);

            let value = match sample_value(raw) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "rate field is not numeric");
                    self.metrics.rate_outcomes.inc(&[("outcome", "NON_NUMERIC")]);
                    record.values.insert(field.clone(), Value::Null);
                    continue;
                }
            };

            let resolved = self.resolve_rate(key, Sample::new(record.time, value));
            record.values.insert(field.clone(), resolved);
        }
    }

    fn resolve_rate(&self, key: String, sample: Sample) -> Value {
        match self.tracker.observe(&key, self.series, sample) {
            Ok(Some(rate)) => {
                self.metrics.rate_outcomes.inc(&[("outcome", "OK")]);
                Value::from(rate)
            }
            Ok(None) => {
                self.metrics.rate_outcomes.inc(&[("outcome", "BASELINE")]);
                Value::Null
            }
            Err(e) => {
                tracing::debug!(key = %key, kind = e.kind().as_str(), error = %e, "no rate for sample");
                self.metrics.rate_outcomes.inc(&[("outcome", e.kind().as_str())]);
                Value::Null
            }
        }
    }
}
