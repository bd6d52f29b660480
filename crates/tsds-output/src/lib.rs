//! TSDS output library entry.
//!
//! This crate wires the config, formatter, rate tracker, batching and delivery
//! seam into one output pipeline. It is intended to be consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod batch;
pub mod config;
pub mod format;
pub mod obs;
pub mod ops;
pub mod router;
pub mod transport;
pub mod writer;
