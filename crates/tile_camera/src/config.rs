//! Camera configuration.

use bevy::prelude::*;
use serde::Deserialize;

/// Screen and tile dimensions used when spawning map viewports.
///
/// Hosts usually embed this in their own config file under a `[camera]`
/// table; see [`TileCameraConfig::from_toml`] for standalone use.
#[derive(Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TileCameraConfig {
  /// Visible window size, in tiles.
  pub screen_tiles: [f32; 2],
  /// Size of one tile, in world units.
  pub tile_size: f32,
  /// Speed used by `ScrollMap` when none is given (1..=6).
  pub default_scroll_speed: u8,
}

impl Default for TileCameraConfig {
  fn default() -> Self {
    Self {
      screen_tiles: [17.0, 13.0],
      tile_size: 48.0,
      default_scroll_speed: 4,
    }
  }
}

impl TileCameraConfig {
  /// Parses a config from TOML text. Missing keys keep their defaults.
  pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(text)
  }

  pub fn screen_tiles(&self) -> Vec2 {
    Vec2::from(self.screen_tiles)
  }
}
