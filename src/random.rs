//! Random byte source backed by the OS CSPRNG.

use rand::rngs::OsRng;
use rand::RngCore;
use std::io::{self, Read};

use crate::error::{FixtureError, Result};

/// Generate `len` random bytes in memory.
pub fn random_bytes(len: usize) -> Result<Vec<u8>> {
    let mut data = vec![0u8; len];
    OsRng
        .try_fill_bytes(&mut data)
        .map_err(|err| FixtureError::Random(io::Error::other(err)))?;
    Ok(data)
}

/// Endless reader of random bytes, for use with [`io::copy`].
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct RandomReader;

impl Read for RandomReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        OsRng.try_fill_bytes(buf).map_err(io::Error::other)?;
        Ok(buf.len())
    }
}
