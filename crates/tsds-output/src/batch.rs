//! Fixed-size batching of encoded records.
//!
//! TSDS expects several records per push; each batch is sent as one JSON array
//! in the `data` field of an `add_data` call.

use bytes::Bytes;

/// Records per push unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Largest accepted `output.batch_size`.
pub const MAX_BATCH_SIZE: usize = 1000;

/// A group of JSON-encoded records ready for delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    records: Vec<String>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// JSON array body: `[rec,rec,...]`.
    pub fn to_data(&self) -> Bytes {
        let body_len = self.records.iter().map(String::len).sum::<usize>() + self.records.len() + 1;
        let mut out = String::with_capacity(body_len);
        out.push('[');
        out.push_str(&self.records.join(","));
        out.push(']');
        Bytes::from(out)
    }
}

/// Accumulates encoded records and emits a batch each time `size` is reached.
#[derive(Debug)]
pub struct Batcher {
    size: usize,
    current: Batch,
}

impl Batcher {
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            current: Batch {
                records: Vec::with_capacity(size),
            },
        }
    }

    /// Add one encoded record; returns a full batch when the size is reached.
    pub fn push(&mut self, encoded: String) -> Option<Batch> {
        self.current.records.push(encoded);
        if self.current.len() < self.size {
            return None;
        }
        let full = std::mem::replace(
            &mut self.current,
            Batch {
                records: Vec::with_capacity(self.size),
            },
        );
        Some(full)
    }

    /// Trailing partial batch, if any.
    pub fn finish(self) -> Option<Batch> {
        if self.current.is_empty() {
            None
        } else {
            Some(self.current)
        }
    }
}
