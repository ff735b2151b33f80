// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Folder listing for SVG frame files.

use crate::error::{PlayerError, Result};
use std::path::{Path, PathBuf};

/// File extension of frame files, compared case-insensitively.
pub const SVG_EXTENSION: &str = "svg";

/// Check whether a path's file name ends in `.svg`, ignoring case.
///
/// A file named just `.svg` counts.
pub fn is_svg_path(path: &Path) -> bool {
    let suffix = format!(".{}", SVG_EXTENSION);
    path.file_name()
        .map(|name| name.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|name| name.ends_with(&suffix))
}

/// List the SVG files directly inside `folder` as full paths, sorted.
///
/// Subdirectories are skipped even if their name ends in `.svg`. A folder
/// with no matching files yields an empty list.
pub fn list_svg_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let access_error = |source| PlayerError::FolderAccess {
        path: folder.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(access_error)? {
        let entry = entry.map_err(access_error)?;
        let path = entry.path();
        if !is_svg_path(&path) {
            continue;
        }
        match entry.file_type() {
            Ok(kind) if kind.is_dir() => continue,
            Ok(_) => files.push(path),
            Err(e) => {
                // Vanished between listing and stat
                log::debug!("Skipping {}: {}", path.display(), e);
            }
        }
    }

    files.sort();
    Ok(files)
}
