// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for folder scanning, rasterization and export.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, PlayerError>;

#[derive(thiserror::Error, Debug)]
pub enum PlayerError {
    /// The frame folder could not be listed.
    #[error("cannot read folder {}: {source}", path.display())]
    FolderAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One frame failed to convert to pixels.
    #[error("cannot rasterize {}: {reason}", path.display())]
    Rasterize { path: PathBuf, reason: String },

    /// The export destination could not be written.
    #[error("cannot write {}: {source}", path.display())]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no SVG frames to export")]
    EmptyPlaylist,

    #[error("cannot watch folder {}: {reason}", path.display())]
    Watch { path: PathBuf, reason: String },

    #[error("invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl PlayerError {
    pub fn rasterize(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Rasterize {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn export_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ExportWrite {
            path: path.into(),
            source,
        }
    }

    /// Title used for the user-facing message box.
    pub fn title(&self) -> &'static str {
        match self {
            Self::FolderAccess { .. } => "Folder Unavailable",
            Self::Rasterize { .. } => "Invalid Frame",
            Self::ExportWrite { .. } => "Export Failed",
            Self::EmptyPlaylist => "No Frames",
            Self::Watch { .. } => "Watch Failed",
            Self::Config { .. } => "Invalid Config",
        }
    }

    /// Warnings are expected states the user can fix, not failures.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::EmptyPlaylist)
    }
}
