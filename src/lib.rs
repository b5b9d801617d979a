//! Random fixture files with streaming SHA-512 hashing.
//!
//! Create files of a given size filled with OS-random bytes, read them back,
//! and compute SHA-512 digests while writing or reading. The hashed write can
//! stop hashing after a prefix so a test can compare the digest of the first
//! `hash_size` bytes against a later read.
//!
//! ```no_run
//! use fixture_files::{create_random_hashed_file_with_hash_size, read_hashed_file};
//!
//! let (_, written) = create_random_hashed_file_with_hash_size("h.bin", 2048, 1024)?;
//! let (_, read) = read_hashed_file("h.bin", 1024)?;
//! assert_eq!(written, read);
//! # Ok::<(), fixture_files::FixtureError>(())
//! ```

mod config;
mod error;
mod files;
mod fixture;
mod hashing;
mod paths;
mod random;

pub use config::{TransferConfig, DEFAULT_CHUNK_SIZE};
pub use error::{FixtureError, Result};
pub use files::{
    create_file, create_random_file, create_random_hashed_file,
    create_random_hashed_file_with_hash_size, read_file, read_hashed_file, ChunkedFiles,
};
pub use fixture::FixtureDir;
pub use hashing::{hash_data, FileDigest, DIGEST_LEN};
pub use random::random_bytes;
