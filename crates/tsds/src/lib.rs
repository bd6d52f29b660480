//! Top-level facade crate for tsds.
//!
//! Re-exports the counter core and the output layer so users can depend on a single crate.

pub mod counter {
    pub use tsds_counter::*;
}

pub mod output {
    pub use tsds_output::*;
}
