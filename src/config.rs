//! Transfer configuration shared by the chunked operations.

use crate::error::{FixtureError, Result};

/// Default number of bytes moved per chunk.
pub const DEFAULT_CHUNK_SIZE: u64 = 1024;

/// Per-call transfer settings.
///
/// The chunk size is only ever read by an operation; the trailing partial
/// chunk is computed in a loop-local value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferConfig {
    chunk_size: u64,
}

impl TransferConfig {
    pub fn new(chunk_size: u64) -> Result<Self> {
        if chunk_size == 0 {
            return Err(FixtureError::InvalidChunkSize);
        }
        Ok(Self { chunk_size })
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Length of the next chunk given how many bytes remain.
    pub(crate) fn next_chunk(&self, remaining: u64) -> u64 {
        self.chunk_size.min(remaining)
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}
