// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the aspect-preserving fit used to place a frame
//! inside the canvas.

/// Largest size with the image's aspect ratio that fits in `available`.
pub fn fit_size(image: (u32, u32), available: (f32, f32)) -> (f32, f32) {
    let (img_width, img_height) = image;
    if img_width == 0 || img_height == 0 || available.0 <= 0.0 || available.1 <= 0.0 {
        return (0.0, 0.0);
    }

    let img_aspect = img_width as f32 / img_height as f32;
    let available_aspect = available.0 / available.1;

    if img_aspect > available_aspect {
        // Image is wider - fit to width
        (available.0, available.0 / img_aspect)
    } else {
        // Image is taller - fit to height
        (available.1 * img_aspect, available.1)
    }
}

/// Offset that centers `size` inside `available`.
pub fn center_offset(size: (f32, f32), available: (f32, f32)) -> (f32, f32) {
    ((available.0 - size.0) / 2.0, (available.1 - size.1) / 2.0)
}
