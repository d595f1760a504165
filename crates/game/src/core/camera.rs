use bevy::{camera::ScalingMode, prelude::*};
use tile_camera::{TileCameraConfig, ViewportCamera};

use crate::config::ConfigLoaded;

/// Projection that always shows the whole viewport window.
pub fn scaling_mode(camera: &TileCameraConfig) -> ScalingMode {
  let size = camera.screen_tiles() * camera.tile_size;
  ScalingMode::AutoMin {
    min_width: size.x,
    min_height: size.y,
  }
}

/// Simple orthographic 2D camera, positioned by the active map's viewport.
pub fn setup_camera(mut commands: Commands, config: Res<ConfigLoaded>) {
  commands.spawn((
    ViewportCamera,
    Camera2d,
    Camera {
      order: 0,
      clear_color: ClearColorConfig::Custom(Color::BLACK),
      ..default()
    },
    Projection::Orthographic(OrthographicProjection {
      near: -1000.0,
      far: 1000.0,
      scale: 1.0,
      viewport_origin: Vec2::new(0.5, 0.5),
      scaling_mode: scaling_mode(&config.camera),
      area: Rect::default(),
    }),
  ));
}
