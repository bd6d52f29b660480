//! Format -> batch -> send pipeline.
//!
//! A failed push is logged and counted, then the next batch goes out; nothing
//! is retried here.

use std::sync::Arc;
use std::time::Instant;

use crate::batch::{Batch, Batcher};
use crate::format::{Formatter, Metric};
use crate::obs::metrics::OutputMetrics;
use crate::transport::{Endpoint, PushRequest, Transport};

/// Totals for one `write` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub received: usize,
    pub records: usize,
    pub batches_sent: usize,
    pub batches_failed: usize,
}

pub struct OutputWriter {
    formatter: Formatter,
    endpoint: Endpoint,
    batch_size: usize,
    transport: Arc<dyn Transport>,
    metrics: Arc<OutputMetrics>,
}

impl OutputWriter {
    pub fn new(
        formatter: Formatter,
        endpoint: Endpoint,
        batch_size: usize,
        transport: Arc<dyn Transport>,
        metrics: Arc<OutputMetrics>,
    ) -> Self {
        Self {
            formatter,
            endpoint,
            batch_size,
            transport,
            metrics,
        }
    }

    /// Format `metrics`, push them in batches, and report what happened.
    pub async fn write(&self, metrics: &[Metric]) -> WriteSummary {
        self.metrics
            .metrics_received
            .add(&[], u64::try_from(metrics.len()).unwrap_or(u64::MAX));

        let records = self.formatter.format(metrics);
        let mut summary = WriteSummary {
            received: metrics.len(),
            records: records.len(),
            ..WriteSummary::default()
        };

        let mut batcher = Batcher::new(self.batch_size);
        for record in &records {
            let encoded = match record.encode() {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!(error = %e, code = e.code().as_str(), time = record.time, "could not encode record");
                    self.metrics.encode_errors.inc(&[]);
                    continue;
                }
            };
            if let Some(batch) = batcher.push(encoded) {
                self.send(&batch, &mut summary).await;
            }
        }
        if let Some(batch) = batcher.finish() {
            self.send(&batch, &mut summary).await;
        }

        summary
    }

    async fn send(&self, batch: &Batch, summary: &mut WriteSummary) {
        let req = PushRequest::add_data(&self.endpoint, batch);
        let transport = self.transport.name();
        tracing::info!(records = req.records, url = %req.url, transport, "sending measurements to TSDS");

        let started = Instant::now();
        let res = self.transport.send(&req).await;
        self.metrics
            .send_duration
            .observe(&[("transport", transport)], started.elapsed());

        match res {
            Ok(()) => {
                summary.batches_sent += 1;
                self.metrics.batches_sent.inc(&[("transport", transport)]);
            }
            Err(e) => {
                summary.batches_failed += 1;
                self.metrics.send_failures.inc(&[("transport", transport)]);
                tracing::error!(records = req.records, error = %e, "could not send batch to TSDS");
            }
        }
    }
}
