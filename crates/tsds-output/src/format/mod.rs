//! Formatting layer: generic labeled metrics -> TSDS measurement records.
//!
//! - `PathMap` translates resource paths into TSDS aliases.
//! - `Formatter` builds records, drops incomplete ones, and substitutes
//!   configured counter fields with rates from the shared `RateTracker`.

mod formatter;
mod pathmap;
mod record;

pub use formatter::{Formatter, NODE_TAG};
pub use pathmap::{parse_sensor, PathMap};
pub use record::{sample_value, Metric, Record};
