use bevy::prelude::*;
use tile_camera::map_scroll::scroll_step;
use tile_camera::{ControlledCharacter, GameMap, GridPosition, RealPosition, ScrollDirection};

use crate::config::ConfigLoaded;
use crate::world::grid::neighbor;

const BINDINGS: [(ScrollDirection, [KeyCode; 2]); 4] = [
  (ScrollDirection::Down, [KeyCode::ArrowDown, KeyCode::KeyS]),
  (ScrollDirection::Left, [KeyCode::ArrowLeft, KeyCode::KeyA]),
  (ScrollDirection::Right, [KeyCode::ArrowRight, KeyCode::KeyD]),
  (ScrollDirection::Up, [KeyCode::ArrowUp, KeyCode::KeyW]),
];

/// First held direction, checked down, left, right, up.
pub fn held_direction(keys: &ButtonInput<KeyCode>) -> Option<ScrollDirection> {
  BINDINGS
    .iter()
    .find(|(_, codes)| keys.any_pressed(*codes))
    .map(|(direction, _)| *direction)
}

/// Starts a one-tile step when the player is standing on a tile.
pub fn read_move_input(
  keys: Res<ButtonInput<KeyCode>>,
  maps: Query<&GameMap>,
  mut players: Query<(&mut GridPosition, &RealPosition), With<ControlledCharacter>>,
) {
  let Some(direction) = held_direction(&keys) else {
    return;
  };
  let Ok(map) = maps.single() else {
    return;
  };

  for (mut grid, real) in players.iter_mut() {
    if real.is_moving_toward(grid.0) {
      continue;
    }
    if let Some(next) = neighbor(grid.0, direction, map.size) {
      grid.0 = next;
    }
  }
}

/// Walks the player's real position toward its tile.
pub fn advance_player(
  config: Res<ConfigLoaded>,
  mut players: Query<(&GridPosition, &mut RealPosition), With<ControlledCharacter>>,
) {
  let step = scroll_step(config.player.move_speed);
  for (grid, mut real) in players.iter_mut() {
    if real.is_moving_toward(grid.0) {
      real.advance_toward(grid.0, step);
    }
  }
}
