//! Fixture file creation, reading and streaming SHA-512 hashing.
//!
//! The chunked operations move data through [`io::copy`] in chunks of
//! [`TransferConfig::chunk_size`] bytes; the final chunk is truncated to the
//! remainder so a transfer never overshoots the requested size.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::config::TransferConfig;
use crate::error::{FixtureError, Result};
use crate::hashing::{FileDigest, HashSink, PrefixHashWriter};
use crate::random::{random_bytes, RandomReader};

/// Create `path` holding `size` random bytes, written in one shot.
///
/// Returns the generated bytes.
pub fn create_file(path: impl AsRef<Path>, size: usize) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let data = random_bytes(size)?;
    debug!(path = %path.display(), size, "creating file");
    let mut file = create(path)?;
    file.write_all(&data).map_err(|source| FixtureError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    sync(path, &file)?;
    debug!(path = %path.display(), written = data.len(), "finished writing");
    Ok(data)
}

/// Read exactly `size` bytes from the start of `path`.
///
/// Reads until `size` bytes are buffered or EOF is reached; a file shorter
/// than `size` is a size mismatch. The buffer never grows past the file length.
pub fn read_file(path: impl AsRef<Path>, size: usize) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let mut file = open(path)?;
    let file_len = file
        .metadata()
        .map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    let capacity = usize::try_from(file_len).map_or(size, |len| len.min(size));
    let mut data = Vec::with_capacity(capacity);
    Read::by_ref(&mut file)
        .take(size as u64)
        .read_to_end(&mut data)
        .map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    if data.len() != size {
        return Err(FixtureError::SizeMismatch {
            path: path.to_path_buf(),
            expected: size as u64,
            actual: data.len() as u64,
        });
    }
    Ok(data)
}

/// Chunked fixture operations bound to a [`TransferConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkedFiles {
    config: TransferConfig,
}

impl ChunkedFiles {
    pub fn new(config: TransferConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> TransferConfig {
        self.config
    }

    /// Create `path` with `size` random bytes copied chunk by chunk.
    pub fn create_random_file(&self, path: impl AsRef<Path>, size: u64) -> Result<u64> {
        let path = path.as_ref();
        debug!(path = %path.display(), size, "creating random file");
        let mut file = create(path)?;
        let written = self.copy_chunks(&mut RandomReader, &mut file, size, path)?;
        check_size(path, size, written)?;
        sync(path, &file)?;
        Ok(written)
    }

    /// Create `path` with `size` random bytes and return the digest of all of them.
    pub fn create_random_hashed_file(
        &self,
        path: impl AsRef<Path>,
        size: u64,
    ) -> Result<(u64, FileDigest)> {
        self.create_random_hashed_file_with_hash_size(path, size, size)
    }

    /// Create `path` with `size` random bytes, hashing only the first `hash_size`.
    ///
    /// Bytes past `hash_size` are written but bypass the hash.
    pub fn create_random_hashed_file_with_hash_size(
        &self,
        path: impl AsRef<Path>,
        size: u64,
        hash_size: u64,
    ) -> Result<(u64, FileDigest)> {
        let path = path.as_ref();
        if hash_size > size {
            return Err(FixtureError::HashSizeExceedsFileSize {
                hash_size,
                file_size: size,
            });
        }
        debug!(path = %path.display(), size, hash_size, "creating random hashed file");
        let file = create(path)?;
        let mut writer = PrefixHashWriter::new(file, hash_size);
        let written = self.copy_chunks(&mut RandomReader, &mut writer, size, path)?;
        check_size(path, size, written)?;
        let (file, digest) = writer.finish();
        sync(path, &file)?;
        debug!(path = %path.display(), written, digest = %digest, "finished hashed write");
        Ok((written, digest))
    }

    /// Hash the first `size` bytes of `path` chunk by chunk.
    ///
    /// The file handle is closed on every return path when it goes out of scope.
    pub fn read_hashed_file(&self, path: impl AsRef<Path>, size: u64) -> Result<(u64, FileDigest)> {
        let path = path.as_ref();
        let mut file = open(path)?;
        let mut sink = HashSink::default();
        let read = self.copy_chunks(&mut file, &mut sink, size, path)?;
        check_size(path, size, read)?;
        let digest = sink.finish();
        debug!(path = %path.display(), read, digest = %digest, "finished hashed read");
        Ok((read, digest))
    }

    /// Copy up to `total` bytes from `reader` to `writer` in config-sized chunks.
    ///
    /// Stops early only on EOF; the caller checks the returned count.
    fn copy_chunks<R: Read, W: Write>(
        &self,
        reader: &mut R,
        writer: &mut W,
        total: u64,
        path: &Path,
    ) -> Result<u64> {
        let mut copied = 0u64;
        while copied < total {
            let chunk = self.config.next_chunk(total - copied);
            let n = io::copy(&mut reader.by_ref().take(chunk), writer).map_err(|source| {
                FixtureError::Transfer {
                    path: path.to_path_buf(),
                    offset: copied,
                    source,
                }
            })?;
            if n == 0 {
                break;
            }
            copied += n;
            trace!(path = %path.display(), copied, chunk, "chunk copied");
        }
        writer.flush().map_err(|source| FixtureError::Transfer {
            path: path.to_path_buf(),
            offset: copied,
            source,
        })?;
        Ok(copied)
    }
}

/// [`ChunkedFiles::create_random_file`] with the default chunk size.
pub fn create_random_file(path: impl AsRef<Path>, size: u64) -> Result<u64> {
    ChunkedFiles::default().create_random_file(path, size)
}

/// [`ChunkedFiles::create_random_hashed_file`] with the default chunk size.
pub fn create_random_hashed_file(path: impl AsRef<Path>, size: u64) -> Result<(u64, FileDigest)> {
    ChunkedFiles::default().create_random_hashed_file(path, size)
}

/// [`ChunkedFiles::create_random_hashed_file_with_hash_size`] with the default chunk size.
pub fn create_random_hashed_file_with_hash_size(
    path: impl AsRef<Path>,
    size: u64,
    hash_size: u64,
) -> Result<(u64, FileDigest)> {
    ChunkedFiles::default().create_random_hashed_file_with_hash_size(path, size, hash_size)
}

/// [`ChunkedFiles::read_hashed_file`] with the default chunk size.
pub fn read_hashed_file(path: impl AsRef<Path>, size: u64) -> Result<(u64, FileDigest)> {
    ChunkedFiles::default().read_hashed_file(path, size)
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| FixtureError::Create {
        path: path.to_path_buf(),
        source,
    })
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| FixtureError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Flush written data to disk so late write errors reach the caller.
fn sync(path: &Path, file: &File) -> Result<()> {
    file.sync_all().map_err(|source| FixtureError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn check_size(path: &Path, expected: u64, actual: u64) -> Result<()> {
    if actual != expected {
        return Err(FixtureError::SizeMismatch {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }
    Ok(())
}
