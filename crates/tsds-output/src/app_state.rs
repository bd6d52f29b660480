//! Shared application state for the TSDS output.
//!
//! Builds the rate tracker, formatter, writer and metrics once from a validated
//! config. Startup errors are returned, never panicked.

use std::sync::Arc;

use tsds_counter::error::Result;
use tsds_counter::RateTracker;

use crate::config::OutputConfig;
use crate::format::Formatter;
use crate::obs::metrics::OutputMetrics;
use crate::transport::{Endpoint, Transport};
use crate::writer::OutputWriter;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    writer: Arc<OutputWriter>,
}

struct AppStateInner {
    cfg: OutputConfig,
    tracker: Arc<RateTracker>,
    metrics: Arc<OutputMetrics>,
}

impl AppState {
    pub fn new(cfg: OutputConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let tracker = Arc::new(RateTracker::new());
        let metrics = Arc::new(OutputMetrics::default());

        let formatter = Formatter::new(&cfg, Arc::clone(&tracker), Arc::clone(&metrics))?;
        let endpoint = Endpoint::from_config(&cfg.output);
        tracing::debug!(url = %endpoint.url, auth = endpoint.credentials.is_some(), "push endpoint resolved");

        let writer = OutputWriter::new(
            formatter,
            endpoint,
            cfg.output.batch_size,
            transport,
            Arc::clone(&metrics),
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                tracker,
                metrics,
            }),
            writer: Arc::new(writer),
        })
    }

    pub fn cfg(&self) -> &OutputConfig {
        &self.inner.cfg
    }

    pub fn tracker(&self) -> Arc<RateTracker> {
        Arc::clone(&self.inner.tracker)
    }

    pub fn metrics(&self) -> Arc<OutputMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    pub fn writer(&self) -> Arc<OutputWriter> {
        Arc::clone(&self.writer)
    }

    /// Gauge lines appended to `/metrics`.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        let series = u64::try_from(self.inner.tracker.len()).unwrap_or(u64::MAX);
        vec![("tsds_tracked_series", series)]
    }
}
