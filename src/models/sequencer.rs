// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame sequencing: cursor movement, pause state and playback rate.
//!
//! The sequencer owns the current playlist and the cursor into it. Every
//! cursor change, and every playlist replacement, is pushed to a
//! [`DisplaySurface`] so the screen and window title follow along.

use super::frame::FrameSource;
use super::playlist::Playlist;
use crate::error::Result;
use std::path::Path;

/// Slowest allowed playback rate in frames per second.
pub const MIN_FPS: u32 = 1;
/// Fastest allowed playback rate in frames per second.
pub const MAX_FPS: u32 = 120;

/// Clamp a requested rate into `MIN_FPS..=MAX_FPS`.
pub fn clamp_rate(fps: u32) -> u32 {
    fps.clamp(MIN_FPS, MAX_FPS)
}

/// Something that can show one frame, or nothing.
pub trait DisplaySurface {
    /// Show `frame` as frame `index` of `total`. `frame` is `None` when
    /// the playlist is empty.
    fn render(&mut self, frame: Option<&FrameSource>, index: usize, total: usize);
}

/// Whether the clock advances frames, and how fast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    pub running: bool,
    pub rate: u32,
}

/// Cursor and playback state over a playlist.
#[derive(Debug, Clone)]
pub struct Sequencer {
    playlist: Playlist,
    cursor: usize,
    state: PlaybackState,
}

impl Sequencer {
    /// Create a running sequencer with an empty playlist.
    pub fn new(rate: u32) -> Self {
        Self {
            playlist: Playlist::default(),
            cursor: 0,
            state: PlaybackState {
                running: true,
                rate: clamp_rate(rate),
            },
        }
    }

    /// Rescan `folder` and adopt the result if it differs from the
    /// current playlist. Returns whether anything changed.
    ///
    /// On error the current playlist and cursor are left untouched.
    pub fn reconcile(&mut self, folder: &Path, surface: &mut dyn DisplaySurface) -> Result<bool> {
        let fresh = Playlist::scan(folder)?;
        Ok(self.replace_playlist(fresh, surface))
    }

    /// Swap in `playlist` unless it equals the current one.
    ///
    /// The cursor survives when still in range and resets to 0 otherwise.
    pub fn replace_playlist(&mut self, playlist: Playlist, surface: &mut dyn DisplaySurface) -> bool {
        if playlist == self.playlist {
            return false;
        }

        log::info!(
            "Playlist changed: {} -> {} frames",
            self.playlist.len(),
            playlist.len()
        );
        self.playlist = playlist;
        if self.cursor >= self.playlist.len() {
            self.cursor = 0;
        }
        self.render(surface);
        true
    }

    /// Move the cursor by `step` frames, wrapping in both directions.
    /// Does nothing on an empty playlist.
    pub fn advance(&mut self, step: isize, surface: &mut dyn DisplaySurface) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }
        let next = (self.cursor as isize + step).rem_euclid(len as isize);
        self.cursor = next as usize;
        self.render(surface);
    }

    /// Clock tick: advance one frame if playback is running.
    pub fn tick(&mut self, surface: &mut dyn DisplaySurface) -> bool {
        if !self.state.running || self.playlist.is_empty() {
            return false;
        }
        self.advance(1, surface);
        true
    }

    pub fn set_running(&mut self, running: bool) {
        self.state.running = running;
    }

    /// Set the playback rate, clamped to the supported range.
    /// Returns the rate actually applied.
    pub fn set_rate(&mut self, fps: u32) -> u32 {
        self.state.rate = clamp_rate(fps);
        self.state.rate
    }

    /// Push the current frame (or the empty state) to `surface`.
    pub fn render(&self, surface: &mut dyn DisplaySurface) {
        surface.render(self.current(), self.cursor, self.playlist.len());
    }

    pub fn current(&self) -> Option<&FrameSource> {
        self.playlist.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Independent copy of the playlist for export.
    pub fn snapshot(&self) -> Playlist {
        self.playlist.clone()
    }
}
