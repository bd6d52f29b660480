use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

use tsds_counter::error::{Result, TsdsError};

use super::{PushRequest, Transport};

/// Dry-run transport: one line per batch (`data` field only) on stdout.
pub struct StdoutTransport {
    out: Mutex<Stdout>,
}

impl StdoutTransport {
    pub fn new() -> Self {
        Self {
            out: Mutex::new(tokio::io::stdout()),
        }
    }
}

impl Default for StdoutTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for StdoutTransport {
    fn name(&self) -> &'static str {
        "stdout"
    }

    async fn send(&self, req: &PushRequest) -> Result<()> {
        let mut out = self.out.lock().await;
        out.write_all(&req.data)
            .await
            .map_err(|e| TsdsError::Transport(format!("stdout write failed: {e}")))?;
        out.write_all(b"\n")
            .await
            .map_err(|e| TsdsError::Transport(format!("stdout write failed: {e}")))?;
        out.flush()
            .await
            .map_err(|e| TsdsError::Transport(format!("stdout flush failed: {e}")))
    }
}
