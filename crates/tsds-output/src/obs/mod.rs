//! In-process counters for the output layer.
//!
//! Stored as atomics and rendered in Prometheus text format by the `/metrics`
//! handler in `router`.

pub mod metrics;
