mod plugin;

use bevy::{asset::Asset, prelude::*, reflect::TypePath};
pub use plugin::ConfigPlugin;
use serde::Deserialize;
use tile_camera::{MapDefinition, TileCameraConfig};

pub const CONFIG_PATH: &str = "assets/config/game.config.toml";
const BUNDLED_CONFIG: &str = include_str!("../../assets/config/game.config.toml");

#[derive(Asset, TypePath, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct GameConfig {
  pub window: WindowConfig,
  pub camera: TileCameraConfig,
  pub player: PlayerConfig,
  pub wander: WanderConfig,
  pub maps: Vec<MapConfig>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WindowConfig {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

impl Default for WindowConfig {
  fn default() -> Self {
    Self {
      width: 816,
      height: 624,
      title: "tile camera".to_string(),
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PlayerConfig {
  /// 1..=6, each step doubles the speed. 4 covers a tile in 16 ticks.
  pub move_speed: u8,
  /// Index into `maps` loaded at startup.
  pub start_map: usize,
}

impl Default for PlayerConfig {
  fn default() -> Self {
    Self {
      move_speed: 4,
      start_map: 0,
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WanderConfig {
  pub seed: u64,
  pub move_speed: u8,
  /// Seconds a wandering event waits on a tile before picking a new one.
  pub pause_secs: f32,
}

impl Default for WanderConfig {
  fn default() -> Self {
    Self {
      seed: 7,
      move_speed: 3,
      pause_secs: 1.0,
    }
  }
}

/// A map plus the ids of its events that walk around on their own.
#[derive(Deserialize, Debug, Clone)]
pub struct MapConfig {
  #[serde(flatten)]
  pub definition: MapDefinition,
  #[serde(default)]
  pub wandering: Vec<i32>,
}

#[cfg(not(target_family = "wasm"))]
#[derive(Resource)]
pub struct ConfigHandle(pub Handle<GameConfig>);

#[derive(Resource, Debug, Clone)]
pub struct ConfigLoaded {
  pub window: WindowConfig,
  pub camera: TileCameraConfig,
  pub player: PlayerConfig,
  pub wander: WanderConfig,
  pub maps: Vec<MapConfig>,
}

impl From<GameConfig> for ConfigLoaded {
  fn from(config: GameConfig) -> Self {
    Self {
      window: config.window,
      camera: config.camera,
      player: config.player,
      wander: config.wander,
      maps: config.maps,
    }
  }
}

/// Why the game is not running on the config file from disk.
///
/// Startup reads the config before logging exists, so the reason is kept
/// here and reported by [`ConfigPlugin`] once the app runs.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ConfigFallback {
  pub reason: String,
}

#[derive(Debug)]
pub enum ConfigError {
  Read(std::io::Error),
  Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Read(err) => write!(f, "read failed: {}", err),
      Self::Parse(err) => write!(f, "parse failed: {}", err),
    }
  }
}

impl std::error::Error for ConfigError {}

pub fn read_config_file(path: &str) -> Result<GameConfig, ConfigError> {
  let text = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
  toml::from_str(&text).map_err(ConfigError::Parse)
}

/// Config the game starts with: the file on disk, falling back to the copy
/// compiled into the binary.
pub fn startup_config() -> (GameConfig, Option<ConfigFallback>) {
  #[cfg(not(target_family = "wasm"))]
  let file_error = match read_config_file(CONFIG_PATH) {
    Ok(config) => return (config, None),
    Err(err) => Some(format!("{}: {}, using bundled config", CONFIG_PATH, err)),
  };
  #[cfg(target_family = "wasm")]
  let file_error: Option<String> = None;

  match parse_bundled() {
    Ok(config) => (config, file_error.map(|reason| ConfigFallback { reason })),
    Err(err) => {
      let reason = format!("bundled config is invalid, using defaults: {}", err);
      let reason = match file_error {
        Some(file_error) => format!("{}; {}", file_error, reason),
        None => reason,
      };
      (GameConfig::default(), Some(ConfigFallback { reason }))
    }
  }
}

fn parse_bundled() -> Result<GameConfig, ConfigError> {
  toml::from_str(BUNDLED_CONFIG).map_err(ConfigError::Parse)
}

pub fn bundled_config() -> GameConfig {
  parse_bundled().unwrap_or_else(|err| {
    error!("Bundled config is invalid, using defaults: {}", err);
    GameConfig::default()
  })
}
