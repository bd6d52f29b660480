//! Delivery seam.
//!
//! The writer hands fully-built `PushRequest`s to a `Transport`. Concrete HTTP
//! delivery (multipart POST with basic auth) lives outside this crate; the
//! built-in transports print batches (dry run) or keep them in memory.

mod memory;
mod push;
mod stdout;

use async_trait::async_trait;

use tsds_counter::error::Result;

pub use memory::MemoryTransport;
pub use push::{Credentials, Endpoint, PushRequest, ADD_DATA_METHOD, PUSH_PATH};
pub use stdout::StdoutTransport;

/// Destination for encoded batches. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short name used as a metrics label.
    fn name(&self) -> &'static str;
    async fn send(&self, req: &PushRequest) -> Result<()>;
}
