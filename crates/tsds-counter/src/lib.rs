//! tsds counter core: per-series rate derivation from raw hardware counters.
//!
//! This crate turns successive `(timestamp, value)` readings of a monotonic
//! counter into a per-second rate. It handles 32/64-bit wraparound, stale
//! samples, NaN/infinite readings and plausibility bounds, and reports every
//! rejected sample as a typed [`RateError`] instead of a sentinel value.
//!
//! It intentionally carries no I/O, configuration or runtime dependencies so the
//! same tracker can back the output layer, tests and offline tooling.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! A bad sample degrades to "no rate for this interval"; it never takes the
//! pipeline down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counter;
pub mod error;

pub use counter::{Measurement, RateTracker, Sample, SeriesConfig};
/// Shared result and error types.
pub use error::{FailureKind, RateError, Result, TsdsError};
