//! SHA-512 helpers for fixture verification.

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha512};
use std::fmt;
use std::io::{self, Write};

use crate::error::{FixtureError, Result};

/// Length in bytes of a SHA-512 digest.
pub const DIGEST_LEN: usize = 64;

/// A finished SHA-512 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileDigest([u8; DIGEST_LEN]);

impl FileDigest {
    fn from_hasher(hasher: Sha512) -> Self {
        let mut bytes = [0u8; DIGEST_LEN];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for FileDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for FileDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for FileDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileDigest({})", self.to_hex())
    }
}

impl Serialize for FileDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Hash the first `size` bytes of `data`.
///
/// `size` larger than `data` is an error rather than a silent truncation.
pub fn hash_data(data: &[u8], size: usize) -> Result<FileDigest> {
    let prefix = data.get(..size).ok_or(FixtureError::HashDataTooShort {
        size,
        available: data.len(),
    })?;
    let mut hasher = Sha512::new();
    hasher.update(prefix);
    Ok(FileDigest::from_hasher(hasher))
}

/// Running SHA-512 accumulator usable as an [`io::Write`] sink.
#[derive(Default)]
pub(crate) struct HashSink {
    hasher: Sha512,
}

impl HashSink {
    pub(crate) fn finish(self) -> FileDigest {
        FileDigest::from_hasher(self.hasher)
    }
}

impl Write for HashSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.hasher.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Forwards every byte to `inner` and hashes only the first `limit` bytes.
///
/// The cutover is byte-exact: a write that straddles `limit` is split so the
/// digest covers exactly the prefix.
pub(crate) struct PrefixHashWriter<W> {
    inner: W,
    hasher: Sha512,
    remaining: u64,
}

impl<W: Write> PrefixHashWriter<W> {
    pub(crate) fn new(inner: W, limit: u64) -> Self {
        Self {
            inner,
            hasher: Sha512::new(),
            remaining: limit,
        }
    }

    /// Consume the writer, returning the inner writer and the prefix digest.
    pub(crate) fn finish(self) -> (W, FileDigest) {
        (self.inner, FileDigest::from_hasher(self.hasher))
    }
}

impl<W: Write> Write for PrefixHashWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        if self.remaining > 0 {
            let hashed = usize::try_from(self.remaining).map_or(n, |rem| rem.min(n));
            self.hasher.update(&buf[..hashed]);
            self.remaining -= hashed as u64;
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_SHA512: &str = "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e";

    #[test]
    fn hash_data_zero_size_is_empty_digest() {
        let digest = hash_data(b"not empty at all", 0).expect("hash");
        assert_eq!(digest.to_hex(), EMPTY_SHA512);
    }

    #[test]
    fn digest_exposes_all_bytes() {
        let digest = hash_data(b"abc", 3).expect("hash");
        assert_eq!(digest.as_bytes().len(), DIGEST_LEN);
        assert_eq!(digest.as_ref(), &digest.as_bytes()[..]);
        assert_eq!(hex::encode(digest.as_bytes()), digest.to_hex());
        assert_eq!(digest.as_bytes()[..4], [0xdd, 0xaf, 0x35, 0xa1]);
    }

    #[test]
    fn hash_data_rejects_oversized_prefix() {
        let err = hash_data(b"abc", 4).unwrap_err();
        assert!(matches!(
            err,
            FixtureError::HashDataTooShort {
                size: 4,
                available: 3
            }
        ));
    }

    #[test]
    fn hash_data_known_vector() {
        let digest = hash_data(b"abcdef", 3).expect("hash");
        assert_eq!(
            digest.to_hex(),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn hash_sink_matches_hash_data() {
        let mut sink = HashSink::default();
        sink.write_all(b"hello ").unwrap();
        sink.write_all(b"world").unwrap();
        assert_eq!(sink.finish(), hash_data(b"hello world", 11).unwrap());
    }

    #[test]
    fn prefix_writer_splits_straddling_write() {
        let mut writer = PrefixHashWriter::new(Vec::new(), 5);
        writer.write_all(b"hel").unwrap();
        writer.write_all(b"lo world").unwrap();
        let (out, digest) = writer.finish();
        assert_eq!(out, b"hello world");
        assert_eq!(digest, hash_data(b"hello", 5).unwrap());
    }

    #[test]
    fn prefix_writer_zero_limit_hashes_nothing() {
        let mut writer = PrefixHashWriter::new(Vec::new(), 0);
        writer.write_all(b"payload").unwrap();
        let (_, digest) = writer.finish();
        assert_eq!(digest.to_hex(), EMPTY_SHA512);
    }
}
