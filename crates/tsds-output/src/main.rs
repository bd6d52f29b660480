//! TSDS output (dry-run driver)
//!
//! - Config: YAML path as first argument (default `tsds.yaml`)
//! - Input: one JSON array of metrics per stdin line, one write per line
//! - Output: one JSON array per batch on stdout; logs go to stderr
//! - Optional `/metrics` + `/healthz` when `observability.listen` is set

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

use tsds_output::format::Metric;
use tsds_output::transport::StdoutTransport;
use tsds_output::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "tsds.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.observability.listen_addr();

    let state = app_state::AppState::new(cfg, Arc::new(StdoutTransport::new()))?;

    if let Some(listen) = listen {
        let app = router::build_router(state.clone());
        let listener = tokio::net::TcpListener::bind(listen).await?;
        tracing::info!(%listen, "metrics endpoint listening");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "metrics endpoint stopped");
            }
        });
    }

    tracing::info!(config = %path, measurement = %state.cfg().output.measurement, "tsds-output starting");

    let writer = state.writer();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let metrics: Vec<Metric> = match serde_json::from_str(&line) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed input line");
                continue;
            }
        };

        let summary = writer.write(&metrics).await;
        tracing::info!(
            received = summary.received,
            records = summary.records,
            sent = summary.batches_sent,
            failed = summary.batches_failed,
            "write finished"
        );
    }

    tracing::info!(series = state.tracker().len(), "input closed; exiting");
    Ok(())
}
