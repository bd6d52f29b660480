//! Output config loader (strict parsing).

pub mod schema;

use std::fs;

use tsds_counter::error::{Result, TsdsError};

pub use schema::{ObservabilitySection, OutputConfig, OutputSection, RateBounds};

pub fn load_from_file(path: &str) -> Result<OutputConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| TsdsError::InvalidConfig(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<OutputConfig> {
    let cfg: OutputConfig = serde_yaml::from_str(s)
        .map_err(|e| TsdsError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
