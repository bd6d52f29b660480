#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use serde_json::{json, Value};

use tsds_output::app_state::AppState;
use tsds_output::batch::Batcher;
use tsds_output::format::Record;
use tsds_output::transport::{MemoryTransport, ADD_DATA_METHOD};
use tsds_output::writer::WriteSummary;

mod common;
use common::metric;

fn interfaces(n: usize, time: i64) -> Vec<tsds_output::format::Metric> {
    (0..n)
        .map(|i| metric("rtr1", &format!("xe-0/0/{i}"), time, json!(100), Some(json!(100))))
        .collect()
}

#[tokio::test]
async fn batches_at_configured_size() {
    let transport = Arc::new(MemoryTransport::new());
    let state = AppState::new(common::config(2), transport.clone()).unwrap();

    let summary = state.writer().write(&interfaces(5, 1000)).await;
    assert_eq!(
        summary,
        WriteSummary {
            received: 5,
            records: 5,
            batches_sent: 3,
            batches_failed: 0,
        }
    );

    let sent = transport.sent();
    let sizes: Vec<usize> = sent.iter().map(|r| r.records).collect();
    assert_eq!(sizes, vec![2, 2, 1]);

    let first = &sent[0];
    assert_eq!(first.url, "https://tsds.example.net/tsds-basic/services/push.cgi");
    assert_eq!(first.method, ADD_DATA_METHOD);
    let creds = first.credentials.as_ref().expect("credentials configured");
    assert_eq!(creds.username, "tsds");
    assert!(!format!("{creds:?}").contains("secret"));

    let data: Value = serde_json::from_slice(&first.data).unwrap();
    let arr = data.as_array().expect("data is a JSON array");
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["type"], "interface");
    assert_eq!(arr[0]["values"]["input"], Value::Null);
}

#[tokio::test]
async fn rates_flow_through_to_pushed_records() {
    let transport = Arc::new(MemoryTransport::new());
    let state = AppState::new(common::config(50), transport.clone()).unwrap();
    let writer = state.writer();

    writer.write(&[metric("rtr1", "xe-0/0/0", 1000, json!(0), Some(json!(0)))]).await;
    writer.write(&[metric("rtr1", "xe-0/0/0", 1060, json!(6000), Some(json!(60)))]).await;

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    let data: Value = serde_json::from_slice(&sent[1].data).unwrap();
    assert_eq!(data[0]["values"]["input"], json!(100.0));
    assert_eq!(data[0]["values"]["output"], json!(1.0));
    assert_eq!(state.tracker().len(), 2);
}

#[tokio::test]
async fn send_failures_are_counted_not_fatal() {
    let transport = Arc::new(MemoryTransport::new());
    transport.set_failing(true);
    let state = AppState::new(common::config(2), transport.clone()).unwrap();

    let summary = state.writer().write(&interfaces(3, 1000)).await;
    assert_eq!(summary.batches_sent, 0);
    assert_eq!(summary.batches_failed, 2);
    assert!(transport.sent().is_empty());

    let metrics = state.metrics();
    assert_eq!(metrics.send_failures.get(&[("transport", "memory")]), 2);
    assert_eq!(metrics.send_duration.count(&[("transport", "memory")]), 2);

    // Rate state advanced anyway.
    transport.set_failing(false);
    let summary = state.writer().write(&interfaces(3, 1060)).await;
    assert_eq!(summary.batches_sent, 2);
}

#[tokio::test]
async fn empty_write_sends_nothing() {
    let transport = Arc::new(MemoryTransport::new());
    let state = AppState::new(common::config(2), transport.clone()).unwrap();

    let summary = state.writer().write(&[]).await;
    assert_eq!(summary, WriteSummary::default());
    assert!(transport.sent().is_empty());
}

#[test]
fn batcher_emits_full_and_trailing_batches() {
    let mut b = Batcher::new(2);
    assert!(b.push("{\"a\":1}".into()).is_none());
    let full = b.push("{\"b\":2}".into()).expect("full batch");
    assert_eq!(&full.to_data()[..], b"[{\"a\":1},{\"b\":2}]");

    assert!(b.push("{}".into()).is_none());
    let rest = b.finish().expect("trailing batch");
    assert_eq!(rest.len(), 1);
    assert_eq!(&rest.to_data()[..], b"[{}]");

    assert!(Batcher::new(3).finish().is_none());
}

#[test]
fn record_encodes_as_tsds_object() {
    let mut meta = std::collections::BTreeMap::new();
    meta.insert("node".to_string(), "r1".to_string());
    let mut values = std::collections::BTreeMap::new();
    values.insert("input".to_string(), Value::Null);
    values.insert("output".to_string(), json!(12.5));
    let record = Record {
        measurement: "interface".to_string(),
        time: 1000,
        interval: 60,
        meta,
        values,
    };

    let encoded = record.encode().expect("record encodes");
    let parsed: Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(
        parsed,
        json!({
            "type": "interface",
            "time": 1000,
            "interval": 60,
            "meta": {"node": "r1"},
            "values": {"input": null, "output": 12.5}
        })
    );
}
