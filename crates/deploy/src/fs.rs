//! File system utils for the JSON artifact files.

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::DeployError;

/// Read and parse a JSON artifact file.
///
/// Returns `Ok(None)` when the file does not exist, so callers can start
/// from an empty structure on the first run.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, DeployError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents =
        std::fs::read_to_string(path).map_err(|e| DeployError::file_io(path, e))?;
    let value = serde_json::from_str(&contents).map_err(|e| DeployError::file_io(path, e))?;

    Ok(Some(value))
}

/// Write a JSON artifact file with two-space indentation.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DeployError> {
    let contents =
        serde_json::to_string_pretty(value).map_err(|e| DeployError::file_io(path, e))?;
    std::fs::write(path, contents).map_err(|e| DeployError::file_io(path, e))?;

    Ok(())
}
