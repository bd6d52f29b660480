//! Shared fixtures for output tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]

use std::collections::BTreeMap;

use serde_json::Value;

use tsds_output::config::{self, OutputConfig};
use tsds_output::format::Metric;

pub const INTF_PATH: &str = "/interfaces/interface/name";
pub const IN_PATH: &str = "/interfaces/interface/state/counters/in-octets";
pub const OUT_PATH: &str = "/interfaces/interface/state/counters/out-octets";

pub fn config_yaml(batch_size: usize) -> String {
    format!(
        r#"
version: 1
output:
  measurement: interface
  hostname: tsds.example.net
  username: tsds
  password: secret
  interval: 60
  batch_size: {batch_size}
sensors:
  - "intf {INTF_PATH}"
  - "input {IN_PATH}"
  - "output {OUT_PATH}"
metadata: ["intf"]
rates: ["input", "output"]
"#
    )
}

pub fn config(batch_size: usize) -> OutputConfig {
    config::load_from_str(&config_yaml(batch_size)).expect("fixture config must parse")
}

pub fn metric(node: &str, intf: &str, time: i64, input: Value, output: Option<Value>) -> Metric {
    let mut tags = BTreeMap::new();
    tags.insert("device".to_string(), node.to_string());
    tags.insert(INTF_PATH.to_string(), intf.to_string());

    let mut fields = BTreeMap::new();
    fields.insert(IN_PATH.to_string(), input);
    if let Some(output) = output {
        fields.insert(OUT_PATH.to_string(), output);
    }
    // Unmapped fields never reach the record.
    fields.insert("/unmapped".to_string(), Value::from(1));

    Metric {
        name: "interfaces".to_string(),
        time,
        tags,
        fields,
    }
}
