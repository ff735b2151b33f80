// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Export of the full playlist as a looping animated GIF.
//!
//! Every frame is rasterized before anything touches the destination.
//! The encoded file is written to a temporary file next to the target and
//! renamed into place, so a failed export never leaves partial output.

use super::media;
use crate::error::{PlayerError, Result};
use crate::models::clock::frame_interval_ms;
use crate::models::playlist::Playlist;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GIF quantizer speed (1 = best quality, 30 = fastest).
const GIF_SPEED: i32 = 10;

/// What an export produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub frames: usize,
    pub width: u32,
    pub height: u32,
    pub delay_ms: u64,
}

/// Append `.gif` unless the path already carries that extension.
pub fn ensure_gif_extension(path: PathBuf) -> PathBuf {
    let has_gif = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"));
    if has_gif {
        path
    } else {
        let mut raw = path.into_os_string();
        raw.push(".gif");
        PathBuf::from(raw)
    }
}

/// Encode every frame of `playlist`, from the first, into `output`.
///
/// The first frame's natural size is the canvas size; later frames are
/// rasterized directly at that size. Each frame is shown for
/// `1000 / fps` milliseconds and the animation loops forever.
pub fn export_gif(playlist: &Playlist, fps: u32, output: &Path) -> Result<ExportSummary> {
    let first = playlist.get(0).ok_or(PlayerError::EmptyPlaylist)?;
    let delay_ms = frame_interval_ms(fps);

    let first_image = media::rasterize(first.path())?;
    let (width, height) = first_image.dimensions();
    let mut images = Vec::with_capacity(playlist.len());
    images.push(first_image);
    for frame in playlist.iter().skip(1) {
        images.push(media::rasterize_to(frame.path(), width, height)?);
    }
    log::debug!("Rasterized {} frames at {}x{}", images.len(), width, height);

    let bytes = encode_gif(images, delay_ms).map_err(|e| {
        PlayerError::export_write(output, std::io::Error::other(e.to_string()))
    })?;
    write_atomically(output, &bytes)?;

    let summary = ExportSummary {
        frames: playlist.len(),
        width,
        height,
        delay_ms,
    };
    log::info!(
        "Exported {} frames ({}x{}, {} ms) to {}",
        summary.frames,
        width,
        height,
        delay_ms,
        output.display()
    );
    Ok(summary)
}

fn encode_gif(images: Vec<RgbaImage>, delay_ms: u64) -> image::ImageResult<Vec<u8>> {
    let delay = Delay::from_numer_denom_ms(delay_ms as u32, 1);
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut bytes, GIF_SPEED);
        encoder.set_repeat(Repeat::Infinite)?;
        for image in images {
            encoder.encode_frame(Frame::from_parts(image, 0, 0, delay))?;
        }
    }
    Ok(bytes)
}

fn write_atomically(output: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let fail = |e| PlayerError::export_write(output, e);

    // Dropped (and deleted) on any early return
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(fail)?;
    tmp.write_all(bytes).map_err(fail)?;
    tmp.as_file().sync_all().map_err(fail)?;
    tmp.persist(output).map_err(|e| fail(e.error))?;
    Ok(())
}
