//! Tile-grid steps shared by the player and wandering events.

use bevy::prelude::*;
use tile_camera::ScrollDirection;

pub const DIRECTIONS: [ScrollDirection; 4] = [
  ScrollDirection::Down,
  ScrollDirection::Left,
  ScrollDirection::Right,
  ScrollDirection::Up,
];

/// One tile in `direction`. Tile y grows downward.
pub fn offset(direction: ScrollDirection) -> IVec2 {
  match direction {
    ScrollDirection::Down => IVec2::Y,
    ScrollDirection::Left => IVec2::NEG_X,
    ScrollDirection::Right => IVec2::X,
    ScrollDirection::Up => IVec2::NEG_Y,
  }
}

/// The tile next to `tile`, or `None` past the edge of a `size` map.
pub fn neighbor(tile: IVec2, direction: ScrollDirection, size: UVec2) -> Option<IVec2> {
  let next = tile + offset(direction);
  let inside = next.cmpge(IVec2::ZERO).all() && next.cmplt(size.as_ivec2()).all();
  inside.then_some(next)
}
