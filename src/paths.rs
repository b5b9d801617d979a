//! Path validation helpers for fixture file names.

use std::path::{Component, Path};

use crate::error::{FixtureError, Result};

/// Validate that a name is a clean, relative path without `.` or `..`.
pub(crate) fn validate_relative_path(value: &str) -> Result<()> {
    let invalid = |reason: &'static str| FixtureError::InvalidName {
        name: value.to_string(),
        reason,
    };
    if value.trim().is_empty() {
        return Err(invalid("value is empty"));
    }
    let path = Path::new(value);
    if path.is_absolute() {
        return Err(invalid("path must be relative"));
    }
    for comp in path.components() {
        match comp {
            Component::ParentDir | Component::RootDir | Component::Prefix(_) | Component::CurDir => {
                return Err(invalid("path contains invalid component"));
            }
            Component::Normal(_) => {}
        }
    }
    Ok(())
}
