//! Fixture directories: a root plus validated relative file names.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

use crate::config::TransferConfig;
use crate::error::{FixtureError, Result};
use crate::files::{create_file, read_file, ChunkedFiles};
use crate::hashing::{hash_data, FileDigest};
use crate::paths::validate_relative_path;

/// A directory that fixture files are created in and read from.
///
/// Every operation takes a file name relative to the root. Names are
/// rejected if they are absolute or contain `.`/`..` components.
pub struct FixtureDir {
    root: PathBuf,
    files: ChunkedFiles,
    _temp_dir: Option<TempDir>,
}

impl FixtureDir {
    /// Use an existing directory as the fixture root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: ChunkedFiles::default(),
            _temp_dir: None,
        }
    }

    /// Create a temporary fixture root that is removed on drop.
    pub fn temp() -> Result<Self> {
        let temp_dir = TempDir::new().map_err(|source| FixtureError::Create {
            path: std::env::temp_dir(),
            source,
        })?;
        debug!(root = %temp_dir.path().display(), "created temp fixture dir");
        Ok(Self {
            root: temp_dir.path().to_path_buf(),
            files: ChunkedFiles::default(),
            _temp_dir: Some(temp_dir),
        })
    }

    /// Replace the transfer configuration used by the chunked operations.
    pub fn with_config(mut self, config: TransferConfig) -> Self {
        self.files = ChunkedFiles::new(config);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> TransferConfig {
        self.files.config()
    }

    /// Resolve a fixture name to a path under the root.
    pub fn path(&self, name: &str) -> Result<PathBuf> {
        validate_relative_path(name)?;
        Ok(self.root.join(name))
    }

    /// Resolve a name for writing, creating missing parent directories.
    fn output_path(&self, name: &str) -> Result<PathBuf> {
        let path = self.path(name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| FixtureError::Create {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(path)
    }

    pub fn create_file(&self, name: &str, size: usize) -> Result<Vec<u8>> {
        create_file(self.output_path(name)?, size)
    }

    pub fn read_file(&self, name: &str, size: usize) -> Result<Vec<u8>> {
        read_file(self.path(name)?, size)
    }

    pub fn create_random_file(&self, name: &str, size: u64) -> Result<u64> {
        self.files.create_random_file(self.output_path(name)?, size)
    }

    pub fn create_random_hashed_file(&self, name: &str, size: u64) -> Result<(u64, FileDigest)> {
        self.files.create_random_hashed_file(self.output_path(name)?, size)
    }

    pub fn create_random_hashed_file_with_hash_size(
        &self,
        name: &str,
        size: u64,
        hash_size: u64,
    ) -> Result<(u64, FileDigest)> {
        self.files
            .create_random_hashed_file_with_hash_size(self.output_path(name)?, size, hash_size)
    }

    pub fn read_hashed_file(&self, name: &str, size: u64) -> Result<(u64, FileDigest)> {
        self.files.read_hashed_file(self.path(name)?, size)
    }

    /// Read the whole file into memory and hash its first `size` bytes.
    pub fn hash_file_prefix(&self, name: &str, size: usize) -> Result<FileDigest> {
        let path = self.path(name)?;
        let bytes = fs::read(&path).map_err(|source| FixtureError::Read { path, source })?;
        hash_data(&bytes, size)
    }
}
