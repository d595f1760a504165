pub mod movement;
mod spawn;


use bevy::prelude::*;
use tile_camera::FollowCameraSet;

use crate::console::console_closed;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
  fn build(&self, app: &mut App) {
    app.add_systems(Startup, spawn::spawn_player).add_systems(
      FixedUpdate,
      (
        movement::read_move_input.run_if(console_closed),
        movement::advance_player,
      )
        .chain()
        .in_set(FollowCameraSet::Movement),
    );
  }
}
