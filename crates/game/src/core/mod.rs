pub(crate) mod camera;

use bevy::prelude::*;
use tile_camera::TileCameraPlugin;

pub struct CorePlugin;

impl Plugin for CorePlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(TileCameraPlugin)
      .add_systems(Startup, camera::setup_camera);
  }
}
