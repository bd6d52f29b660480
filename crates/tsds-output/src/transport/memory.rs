use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use tsds_counter::error::{Result, TsdsError};

use super::{PushRequest, Transport};

/// Keeps every accepted request in memory. Can be switched to fail all sends.
#[derive(Default)]
pub struct MemoryTransport {
    sent: Mutex<Vec<PushRequest>>,
    failing: AtomicBool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every send until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    /// Requests accepted so far.
    pub fn sent(&self) -> Vec<PushRequest> {
        // Poisoned mutex means a panicking sender; report nothing rather than panic.
        self.sent.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn send(&self, req: &PushRequest) -> Result<()> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(TsdsError::Transport("memory transport set to fail".into()));
        }
        let mut sent = self
            .sent
            .lock()
            .map_err(|_| TsdsError::Internal("memory transport lock poisoned".into()))?;
        sent.push(req.clone());
        Ok(())
    }
}
