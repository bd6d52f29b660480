use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use tsds_counter::error::{Result, TsdsError};

/// One labeled sample as delivered by the collector.
#[derive(Debug, Clone, Deserialize)]
pub struct Metric {
    pub name: String,
    /// Epoch seconds.
    pub time: i64,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

/// One TSDS measurement record (the JSON object pushed via `add_data`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(rename = "type")]
    pub measurement: String,
    pub time: i64,
    pub interval: u32,
    pub meta: BTreeMap<String, String>,
    /// A `null` value marks a rate field whose rate could not be computed.
    pub values: BTreeMap<String, Value>,
}

impl Record {
    /// One JSON object, as it appears inside a batch.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| TsdsError::Encode(e.to_string()))
    }
}

/// Normalise a raw field value to `f64` before it reaches the tracker.
pub fn sample_value(raw: &Value) -> Result<f64> {
    match raw {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| TsdsError::NonNumeric(n.to_string())),
        other => Err(TsdsError::NonNumeric(other.to_string())),
    }
}
