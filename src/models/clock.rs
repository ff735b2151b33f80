// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Fixed-interval playback clock polled from the UI loop.

use super::sequencer::clamp_rate;
use std::time::{Duration, Instant};

/// Milliseconds between frames at `fps`, truncated.
pub fn frame_interval_ms(fps: u32) -> u64 {
    1000 / u64::from(clamp_rate(fps))
}

/// Decides when the next playback tick is due.
///
/// The clock never fires more than once per poll, so a stalled UI loop
/// resumes at the normal pace instead of replaying missed ticks.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    interval: Duration,
    last_tick: Instant,
}

impl PlaybackClock {
    pub fn new(fps: u32, now: Instant) -> Self {
        Self {
            interval: Duration::from_millis(frame_interval_ms(fps)),
            last_tick: now,
        }
    }

    /// Change the rate and restart the current interval from `now`.
    pub fn set_rate(&mut self, fps: u32, now: Instant) {
        self.interval = Duration::from_millis(frame_interval_ms(fps));
        self.last_tick = now;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true when a tick is due, and schedules the next one.
    ///
    /// Ticks stay on the fixed schedule, so a late poll does not delay the
    /// following tick. After a stall longer than one interval the schedule
    /// restarts from `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_tick) < self.interval {
            return false;
        }
        self.last_tick += self.interval;
        if now.saturating_duration_since(self.last_tick) >= self.interval {
            self.last_tick = now;
        }
        true
    }

    /// Time left until the next tick is due.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last_tick))
    }
}
