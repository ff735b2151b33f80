// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! SVG Player
//!
//! A cross-platform desktop application that loops a folder of SVG files
//! as an animation, follows the folder as files come and go, and exports
//! the sequence as an animated GIF.

mod app;
mod config;
mod error;
mod io;
mod models;
mod ui;
mod util;

use anyhow::{anyhow, Context, Result};
use app::PlayerApp;
use clap::Parser;
use config::PlayerConfig;
use models::sequencer::clamp_rate;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "svg_player", version, about = "Loop a folder of SVG frames as an animation")]
struct Cli {
    /// Folder containing the SVG frames (a picker is shown when omitted)
    folder: Option<PathBuf>,

    /// Initial playback rate, 1-120 frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// YAML or JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PlayerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PlayerConfig::default(),
    };
    if let Some(fps) = cli.fps {
        config.fps = clamp_rate(fps);
    }

    let folder = match cli.folder {
        Some(folder) => folder,
        None => rfd::FileDialog::new()
            .set_title("Select folder containing SVGs")
            .pick_folder()
            .ok_or_else(|| anyhow!("No folder selected. Exiting."))?,
    };
    log::info!("Playing {} at {} fps", folder.display(), config.fps);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([320.0, 240.0])
            .with_title(config.title.clone()),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "SVG Player",
        options,
        Box::new(move |cc| Ok(Box::new(PlayerApp::new(cc, folder, config)))),
    )
    .map_err(|e| anyhow!("Application error: {}", e))?;

    Ok(())
}
