//! Driving a real Bevy camera from the active viewport.

use bevy::prelude::*;

use crate::config::TileCameraConfig;
use crate::map::GameMap;
use crate::viewport::{Viewport, point_to_world};

/// Marks the camera that shows the active map's viewport.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct ViewportCamera;

/// System: copies the active viewport's center to the camera transform.
///
/// Runs in `PostUpdate` before transform propagation.
pub fn sync_viewport_camera(
  config: Res<TileCameraConfig>,
  maps: Query<&Viewport, With<GameMap>>,
  mut cameras: Query<&mut Transform, With<ViewportCamera>>,
) {
  let Ok(viewport) = maps.single() else {
    return;
  };
  let center = point_to_world(viewport.focus(), config.tile_size);

  for mut transform in cameras.iter_mut() {
    transform.translation.x = center.x;
    transform.translation.y = center.y;
    // Keep the camera's z
  }
}

/// System: resizes viewports when the screen size in the config changes.
pub fn apply_config_to_viewports(
  config: Res<TileCameraConfig>,
  mut viewports: Query<&mut Viewport>,
) {
  if !config.is_changed() {
    return;
  }
  let screen_tiles = config.screen_tiles();
  for mut viewport in viewports.iter_mut() {
    if viewport.screen_tiles != screen_tiles {
      // Keep the same tile in the middle of the screen.
      let focus = viewport.focus();
      viewport.screen_tiles = screen_tiles;
      let display = focus - screen_tiles / 2.0;
      viewport.set_display(display);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn camera_sits_on_viewport_center() {
    let mut app = App::new();
    app
      .insert_resource(TileCameraConfig {
        tile_size: 10.0,
        ..default()
      })
      .add_systems(Update, sync_viewport_camera);

    let mut viewport = Viewport::new(Vec2::new(17.0, 13.0), Vec2::new(40.0, 30.0));
    viewport.center(Vec2::new(20.0, 15.0));
    app.world_mut().spawn((
      GameMap {
        map_id: 1,
        size: UVec2::new(40, 30),
      },
      viewport,
    ));
    let camera = app
      .world_mut()
      .spawn((ViewportCamera, Transform::from_xyz(0.0, 0.0, 100.0)))
      .id();
    app.update();

    // Tile (20, 15) spans x 200..210 and y -150..-160.
    let translation = app.world().get::<Transform>(camera).unwrap().translation;
    assert_eq!(translation, Vec3::new(205.0, -155.0, 100.0));
  }

  #[test]
  fn resize_keeps_focus() {
    let mut app = App::new();
    app
      .init_resource::<TileCameraConfig>()
      .add_systems(Update, apply_config_to_viewports);

    let mut viewport = Viewport::new(Vec2::new(17.0, 13.0), Vec2::new(40.0, 30.0));
    viewport.center(Vec2::new(20.0, 15.0));
    let entity = app.world_mut().spawn(viewport).id();
    app.update();

    app.world_mut().resource_mut::<TileCameraConfig>().screen_tiles = [21.0, 15.0];
    app.update();

    let resized = app.world().get::<Viewport>(entity).unwrap();
    assert_eq!(resized.screen_tiles, Vec2::new(21.0, 15.0));
    assert_eq!(resized.focus(), Vec2::new(20.5, 15.5));
  }
}
