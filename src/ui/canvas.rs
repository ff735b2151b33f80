// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame canvas.
//!
//! This module provides the display surface the sequencer renders into and
//! the central panel that draws the current frame, scaled to fit, with a
//! "(i/n) name" overlay in the bottom-right corner.

use crate::io::media;
use crate::models::{frame::FrameSource, sequencer::DisplaySurface};
use crate::util::geometry::{center_offset, fit_size};
use std::collections::HashMap;
use std::path::PathBuf;

/// A rasterized frame, or the reason it could not be rasterized.
enum CachedFrame {
    Ready {
        texture: egui::TextureHandle,
        size: (u32, u32),
    },
    Failed(String),
}

/// What the sequencer last asked us to show.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Shown {
    frame: Option<FrameSource>,
    index: usize,
    total: usize,
}

/// Display surface backed by egui textures.
pub struct FrameDisplay {
    shown: Shown,
    textures: HashMap<PathBuf, CachedFrame>,
}

impl Default for FrameDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for FrameDisplay {
    fn render(&mut self, frame: Option<&FrameSource>, index: usize, total: usize) {
        self.shown = Shown {
            frame: frame.cloned(),
            index,
            total,
        };
    }
}

impl FrameDisplay {
    pub fn new() -> Self {
        Self {
            shown: Shown {
                frame: None,
                index: 0,
                total: 0,
            },
            textures: HashMap::new(),
        }
    }

    /// Drop cached textures so changed files are rasterized again.
    pub fn clear_cache(&mut self) {
        self.textures.clear();
    }

    /// "(i/n) name" for the current frame, or `None` when empty.
    pub fn status_text(&self) -> Option<String> {
        self.shown.frame.as_ref().map(|frame| {
            format!(
                "({}/{}) {}",
                self.shown.index + 1,
                self.shown.total,
                frame.name()
            )
        })
    }

    /// Window title for the current frame.
    pub fn window_title(&self, prefix: &str) -> String {
        match self.status_text() {
            Some(status) => format!("{} - {}", prefix, status),
            None => format!("{} - No frames", prefix),
        }
    }

    fn cached(&mut self, ctx: &egui::Context, frame: &FrameSource) -> &CachedFrame {
        self.textures
            .entry(frame.path().to_path_buf())
            .or_insert_with(|| match media::rasterize(frame.path()) {
                Ok(image) => {
                    let size = image.dimensions();
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(
                        [size.0 as usize, size.1 as usize],
                        image.as_raw(),
                    );
                    let texture =
                        ctx.load_texture(frame.name(), color_image, egui::TextureOptions::LINEAR);
                    CachedFrame::Ready { texture, size }
                }
                Err(e) => {
                    log::warn!("Skipping frame: {}", e);
                    CachedFrame::Failed(e.to_string())
                }
            })
    }
}

/// Draw the current frame into the central panel.
pub fn show(ui: &mut egui::Ui, display: &mut FrameDisplay) {
    // Set background color
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();
    let status = display.status_text();
    let frame = display.shown.frame.clone();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let Some(frame) = frame else {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("No frames")
                        .size(18.0)
                        .color(egui::Color32::from_gray(180)),
                );
            });
            return;
        };

        let canvas = ui.max_rect();
        match display.cached(ui.ctx(), &frame) {
            CachedFrame::Ready { texture, size } => {
                let available = (canvas.width(), canvas.height());
                let fitted = fit_size(*size, available);
                let (x_offset, y_offset) = center_offset(fitted, available);
                let image_rect = egui::Rect::from_min_size(
                    canvas.min + egui::vec2(x_offset, y_offset),
                    egui::vec2(fitted.0, fitted.1),
                );

                ui.painter().image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            CachedFrame::Failed(reason) => {
                let reason = reason.clone();
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new(reason).color(egui::Color32::LIGHT_RED));
                });
            }
        }

        if let Some(text) = status {
            draw_status(ui.painter(), canvas, text);
        }
    });
}

/// Draw the status label over the bottom-right corner of `canvas`.
fn draw_status(painter: &egui::Painter, canvas: egui::Rect, text: String) {
    let galley = painter.layout_no_wrap(
        text,
        egui::FontId::proportional(14.0),
        egui::Color32::WHITE,
    );
    let anchor = canvas.right_bottom() - egui::vec2(14.0, 14.0);
    let text_rect = egui::Align2::RIGHT_BOTTOM.anchor_size(anchor, galley.size());

    painter.rect_filled(
        text_rect.expand(4.0),
        3.0,
        egui::Color32::from_black_alpha(120),
    );
    painter.galley(text_rect.min, galley, egui::Color32::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_follows_render_calls() {
        let mut display = FrameDisplay::new();
        assert_eq!(display.window_title("SVG Animator"), "SVG Animator - No frames");

        let frame = FrameSource::new("/frames/walk_02.svg");
        display.render(Some(&frame), 1, 3);
        assert_eq!(
            display.window_title("SVG Animator"),
            "SVG Animator - (2/3) walk_02.svg"
        );

        display.render(None, 0, 0);
        assert_eq!(display.status_text(), None);
    }
}
