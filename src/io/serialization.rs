// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Reading structured settings files in YAML and JSON formats.

use crate::error::{PlayerError, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

fn config_error(path: &Path, reason: impl ToString) -> PlayerError {
    PlayerError::Config {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Import data from YAML format.
pub fn import_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let yaml = std::fs::read_to_string(path).map_err(|e| config_error(path, e))?;
    serde_yaml::from_str(&yaml).map_err(|e| config_error(path, e))
}

/// Import data from JSON format.
pub fn import_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path).map_err(|e| config_error(path, e))?;
    serde_json::from_str(&json).map_err(|e| config_error(path, e))
}

/// Import data, choosing the format from the file extension.
pub fn import_by_extension<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        other => Err(config_error(
            path,
            format!("unsupported file extension: {:?}", other),
        )),
    }
}
