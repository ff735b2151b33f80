// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback model: frames, playlist, sequencer and clock.

pub mod clock;
pub mod frame;
pub mod playlist;
pub mod sequencer;
