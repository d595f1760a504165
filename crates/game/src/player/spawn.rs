use bevy::prelude::*;
use tile_camera::ControlledCharacter;

use crate::config::ConfigLoaded;

const PLAYER_Z: f32 = 2.0;

/// Spawns the player; the start map places it on its tile.
pub fn spawn_player(mut commands: Commands, config: Res<ConfigLoaded>) {
  commands.spawn((
    Name::new("Player"),
    ControlledCharacter,
    Sprite {
      color: Color::srgb(0.95, 0.85, 0.3),
      custom_size: Some(Vec2::splat(config.camera.tile_size * 0.8)),
      ..default()
    },
    Transform::from_xyz(0.0, 0.0, PLAYER_Z),
  ));
}
