//! JSON report describing a completed fixture operation.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use fixture_files::FileDigest;

/// Tool version emitted in reports.
pub(crate) const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Operation name recorded in a report.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Operation {
    Create,
    Read,
    Random,
    Hashed,
    ReadHashed,
    Hash,
}

/// Report emitted for a single operation.
#[derive(Serialize, Debug)]
pub(crate) struct Report {
    pub(crate) tool_version: String,
    pub(crate) operation: Operation,
    pub(crate) path: String,
    pub(crate) bytes: u64,
    pub(crate) chunk_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) hash_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sha512: Option<FileDigest>,
}

impl Report {
    pub(crate) fn new(operation: Operation, path: &Path, bytes: u64, chunk_size: u64) -> Self {
        Self {
            tool_version: TOOL_VERSION.to_string(),
            operation,
            path: path.display().to_string(),
            bytes,
            chunk_size,
            hash_size: None,
            sha512: None,
        }
    }

    pub(crate) fn with_digest(mut self, hash_size: u64, digest: FileDigest) -> Self {
        self.hash_size = Some(hash_size);
        self.sha512 = Some(digest);
        self
    }

    pub(crate) fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize report")
    }
}

/// Serialize and write the report to `path`.
pub(crate) fn write_report(path: &Path, report: &Report) -> Result<()> {
    let json = serde_json::to_vec_pretty(report).context("serialize report")?;
    fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    Ok(())
}
