// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback controls.
//!
//! This module provides the control strip under the canvas: play/pause,
//! frame stepping, the FPS slider and the GIF export button.

use crate::models::sequencer::{PlaybackState, MAX_FPS, MIN_FPS};

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    TogglePlayback,
    StepBackward,
    StepForward,
    SetRate(u32),
    Export,
}

/// Display the playback controls and report what the user did.
pub fn show(ui: &mut egui::Ui, state: PlaybackState, has_frames: bool) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let play_label = if state.running { "⏸ Pause" } else { "▶ Start" };
        if ui.button(play_label).clicked() {
            action = ToolbarAction::TogglePlayback;
        }

        ui.separator();

        if ui
            .add_enabled(has_frames, egui::Button::new("⏮"))
            .on_hover_text("Previous frame (←)")
            .clicked()
        {
            action = ToolbarAction::StepBackward;
        }
        if ui
            .add_enabled(has_frames, egui::Button::new("⏭"))
            .on_hover_text("Next frame (→)")
            .clicked()
        {
            action = ToolbarAction::StepForward;
        }

        ui.separator();

        let mut fps = state.rate;
        ui.label(format!("FPS: {}", fps));
        if ui
            .add(egui::Slider::new(&mut fps, MIN_FPS..=MAX_FPS).show_value(false))
            .changed()
        {
            action = ToolbarAction::SetRate(fps);
        }

        ui.separator();

        if ui.button("Export as GIF...").clicked() {
            action = ToolbarAction::Export;
        }
    });

    action
}
