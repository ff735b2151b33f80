// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! SVG frame rasterization.
//!
//! This module turns SVG files into straight-alpha RGBA buffers suitable
//! both for egui textures and for the GIF encoder.

use crate::error::{PlayerError, Result};
use image::{Rgba, RgbaImage};
use resvg::{tiny_skia, usvg};
use std::path::Path;

/// Largest width or height we are willing to allocate for one frame.
const MAX_DIM: u32 = 16_384;

/// Rasterize an SVG at its natural (document) size.
pub fn rasterize(path: &Path) -> Result<RgbaImage> {
    let tree = load_tree(path)?;
    let size = tree.size().to_int_size();
    render_tree(&tree, size.width(), size.height(), path)
}

/// Rasterize an SVG stretched to exactly `width` x `height` pixels.
pub fn rasterize_to(path: &Path, width: u32, height: u32) -> Result<RgbaImage> {
    let tree = load_tree(path)?;
    render_tree(&tree, width, height, path)
}

fn load_tree(path: &Path) -> Result<usvg::Tree> {
    let data = std::fs::read(path).map_err(|e| PlayerError::rasterize(path, e.to_string()))?;
    usvg::Tree::from_data(&data, &usvg::Options::default())
        .map_err(|e| PlayerError::rasterize(path, e.to_string()))
}

fn render_tree(tree: &usvg::Tree, width: u32, height: u32, path: &Path) -> Result<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(PlayerError::rasterize(path, "SVG has empty dimensions"));
    }
    if width > MAX_DIM || height > MAX_DIM {
        return Err(PlayerError::rasterize(
            path,
            format!("SVG too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"),
        ));
    }

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PlayerError::rasterize(path, "failed to allocate SVG pixmap"))?;

    let sx = width as f32 / tree.size().width();
    let sy = height as f32 / tree.size().height();
    resvg::render(
        tree,
        tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    // tiny-skia stores premultiplied alpha
    let mut image = RgbaImage::new(width, height);
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_svg(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, body.trim()).unwrap();
        path
    }

    #[test]
    fn test_natural_size() {
        let dir = tempdir().unwrap();
        let path = write_svg(
            dir.path(),
            "blue.svg",
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="6" height="3">
                   <rect width="6" height="3" fill="blue"/>
               </svg>"#,
        );

        let image = rasterize(&path).unwrap();
        assert_eq!(image.dimensions(), (6, 3));
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_explicit_size_scales() {
        let dir = tempdir().unwrap();
        let path = write_svg(
            dir.path(),
            "small.svg",
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2">
                   <rect width="2" height="2" fill="lime"/>
               </svg>"#,
        );

        let image = rasterize_to(&path, 8, 4).unwrap();
        assert_eq!(image.dimensions(), (8, 4));
        assert_eq!(image.get_pixel(7, 3), &Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_alpha_is_straight() {
        let dir = tempdir().unwrap();
        let path = write_svg(
            dir.path(),
            "half.svg",
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4">
                   <rect width="4" height="4" fill="red" fill-opacity="0.5"/>
               </svg>"#,
        );

        let image = rasterize(&path).unwrap();
        let Rgba([r, g, b, a]) = *image.get_pixel(1, 1);
        assert!(r >= 250, "red channel was {r}");
        assert_eq!((g, b), (0, 0));
        assert!((120..=135).contains(&a), "alpha was {a}");
    }

    #[test]
    fn test_invalid_svg_is_rasterize_error() {
        let dir = tempdir().unwrap();
        let path = write_svg(dir.path(), "broken.svg", "<svg>oops");
        match rasterize(&path) {
            Err(PlayerError::Rasterize { path: p, reason }) => {
                assert_eq!(p, path);
                assert!(!reason.is_empty());
            }
            other => panic!("expected Rasterize error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_rasterize_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.svg");
        assert!(matches!(
            rasterize(&path),
            Err(PlayerError::Rasterize { .. })
        ));
    }

    #[test]
    fn test_zero_target_size_errors() {
        let dir = tempdir().unwrap();
        let path = write_svg(
            dir.path(),
            "ok.svg",
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"/>"#,
        );
        assert!(rasterize_to(&path, 0, 2).is_err());
    }
}
