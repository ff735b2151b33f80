// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Ordered set of frames discovered in the watched folder.
//!
//! A playlist is never patched in place: each reconciliation scans the
//! folder into a fresh `Playlist` and compares it by value against the
//! current one.

use super::frame::FrameSource;
use crate::error::Result;
use crate::io::folder;
use std::path::{Path, PathBuf};

/// Frames sorted by path with no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    frames: Vec<FrameSource>,
}

impl Playlist {
    /// Build a playlist from arbitrary paths, sorting and deduplicating.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut frames: Vec<FrameSource> = paths.into_iter().map(FrameSource::new).collect();
        frames.sort();
        frames.dedup();
        Self { frames }
    }

    /// Take a fresh listing of the SVG files in `folder`.
    pub fn scan(folder: &Path) -> Result<Self> {
        Ok(Self::from_paths(folder::list_svg_files(folder)?))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FrameSource> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrameSource> {
        self.frames.iter()
    }
}
