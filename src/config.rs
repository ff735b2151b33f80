// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Startup settings.
//!
//! Settings come from built-in defaults, optionally overridden by a YAML or
//! JSON file given on the command line. They are read once and never
//! written back.

use crate::error::Result;
use crate::io::serialization;
use crate::models::sequencer::clamp_rate;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_FPS: u32 = 24;
pub const WINDOW_WIDTH: f32 = 800.0;
pub const WINDOW_HEIGHT: f32 = 600.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Initial playback rate in frames per second
    pub fps: u32,
    pub window_width: f32,
    pub window_height: f32,
    /// Window title prefix
    pub title: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            title: "SVG Animator".to_string(),
        }
    }
}

impl PlayerConfig {
    /// Load settings from a `.yaml`/`.yml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config: Self = serialization::import_by_extension(path)?;
        config.fps = clamp_rate(config.fps);
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlayerError;

    #[test]
    fn test_yaml_overrides_some_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.yaml");
        std::fs::write(&path, "fps: 12\ntitle: Flipbook\n").unwrap();

        let config = PlayerConfig::load(&path).unwrap();
        assert_eq!(config.fps, 12);
        assert_eq!(config.title, "Flipbook");
        assert_eq!(config.window_width, WINDOW_WIDTH);
    }

    #[test]
    fn test_json_rate_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.json");
        std::fs::write(&path, r#"{ "fps": 1000, "window_height": 480.0 }"#).unwrap();

        let config = PlayerConfig::load(&path).unwrap();
        assert_eq!(config.fps, 120);
        assert_eq!(config.window_height, 480.0);
    }

    #[test]
    fn test_unknown_extension_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.toml");
        std::fs::write(&path, "fps = 3").unwrap();
        assert!(matches!(
            PlayerConfig::load(&path),
            Err(PlayerError::Config { .. })
        ));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.yml");
        std::fs::write(&path, "frames_per_second: 3\n").unwrap();
        assert!(PlayerConfig::load(&path).is_err());
    }
}
