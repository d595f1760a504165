#[cfg(not(target_family = "wasm"))]
use bevy::{asset::AssetEvent, ecs::message::MessageReader};
use bevy::{prelude::*, window::PrimaryWindow};
#[cfg(not(target_family = "wasm"))]
use bevy_common_assets::toml::TomlAssetPlugin;
use tile_camera::{TileCameraConfig, ViewportCamera};

#[cfg(not(target_family = "wasm"))]
use super::{ConfigHandle, GameConfig};
use super::{ConfigFallback, ConfigLoaded};
use crate::core::camera::scaling_mode;

/// Hot reload for [`ConfigLoaded`].
///
/// `ConfigLoaded` itself is inserted by `main` before the app starts so the
/// window can be sized from it.
pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
  fn build(&self, app: &mut App) {
    // Native: asset-based config with hot-reload
    #[cfg(not(target_family = "wasm"))]
    app
      .add_plugins(TomlAssetPlugin::<GameConfig>::new(&["config.toml"]))
      .add_systems(PreStartup, watch_config_file)
      .add_systems(Update, watch_config_changes);

    app.add_systems(Startup, report_config_fallback);

    app.add_systems(
      Update,
      (
        update_window_on_config_change,
        update_tile_camera_on_config_change,
        update_camera_on_config_change,
      ),
    );
  }
}

fn report_config_fallback(mut commands: Commands, fallback: Option<Res<ConfigFallback>>) {
  if let Some(fallback) = fallback {
    warn!("Config: {}", fallback.reason);
    commands.remove_resource::<ConfigFallback>();
  }
}

#[cfg(not(target_family = "wasm"))]
fn watch_config_file(mut commands: Commands, asset_server: Res<AssetServer>) {
  let handle: Handle<GameConfig> = asset_server.load("config/game.config.toml");
  commands.insert_resource(ConfigHandle(handle));
}

#[cfg(not(target_family = "wasm"))]
fn watch_config_changes(
  mut commands: Commands,
  config_handle: Res<ConfigHandle>,
  mut messages: MessageReader<AssetEvent<GameConfig>>,
  configs: Res<Assets<GameConfig>>,
) {
  for event in messages.read() {
    if let AssetEvent::Modified { id } = event {
      if config_handle.0.id() == *id {
        if let Some(config) = configs.get(&config_handle.0) {
          info!("Config reloaded!");
          commands.insert_resource(ConfigLoaded::from(config.clone()));
        }
      }
    }
  }
}

fn update_window_on_config_change(
  config: Res<ConfigLoaded>,
  mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
  if config.is_changed() {
    if let Ok(mut window) = windows.single_mut() {
      window
        .resolution
        .set(config.window.width as f32, config.window.height as f32);
      window.title.clone_from(&config.window.title);
    }
  }
}

pub(crate) fn update_tile_camera_on_config_change(
  config: Res<ConfigLoaded>,
  mut camera_config: ResMut<TileCameraConfig>,
) {
  if config.is_changed() {
    // Avoid tripping change detection on viewports when nothing moved.
    camera_config.set_if_neq(config.camera.clone());
  }
}

fn update_camera_on_config_change(
  config: Res<ConfigLoaded>,
  mut camera_query: Query<&mut Projection, With<ViewportCamera>>,
) {
  if config.is_changed() {
    for mut projection in camera_query.iter_mut() {
      if let Projection::Orthographic(ref mut ortho) = *projection {
        ortho.scaling_mode = scaling_mode(&config.camera);
      }
    }
  }
}
