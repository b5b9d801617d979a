//! Error types for fixture file operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FixtureError>;

/// Structured errors produced while creating, reading or hashing fixtures.
///
/// Every failure is returned to the caller, including I/O errors raised in
/// the middle of a chunked copy.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The OS random source failed.
    #[error("generate random bytes")]
    Random(#[source] io::Error),

    #[error("create file {}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("open file {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An I/O error raised while copying a chunk.
    #[error("transfer {} at offset {offset}", .path.display())]
    Transfer {
        path: PathBuf,
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// Bytes transferred differ from the requested size.
    #[error("size mismatch for {}: expected={expected}, got={actual}", .path.display())]
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("hash size {hash_size} exceeds file size {file_size}")]
    HashSizeExceedsFileSize { hash_size: u64, file_size: u64 },

    #[error("hash size {size} exceeds buffer length {available}")]
    HashDataTooShort { size: usize, available: usize },

    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    /// A fixture file name failed relative-path validation.
    #[error("invalid fixture name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },
}

impl FixtureError {
    /// True for the size-mismatch variant.
    pub fn is_size_mismatch(&self) -> bool {
        matches!(self, FixtureError::SizeMismatch { .. })
    }
}
