//! Positions of the controlled character and map events.

use bevy::prelude::*;

use crate::config::TileCameraConfig;
use crate::viewport::tile_to_world;

/// The character the default scroll follows.
#[derive(Component, Debug, Default, Clone, Copy)]
#[require(GridPosition, RealPosition, LastScrolled, Transform)]
pub struct ControlledCharacter;

/// Discrete tile a character occupies (or is moving into).
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq, Deref, DerefMut)]
pub struct GridPosition(pub IVec2);

/// Continuous tile position; lags behind [`GridPosition`] while moving.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Deref, DerefMut)]
pub struct RealPosition(pub Vec2);

/// Screen-relative position of the character before this tick's movement.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct LastScrolled(pub Vec2);

impl RealPosition {
  pub fn at(tile: IVec2) -> Self {
    Self(tile.as_vec2())
  }

  pub fn is_moving_toward(&self, tile: IVec2) -> bool {
    self.0 != tile.as_vec2()
  }

  /// Moves up to `distance` tiles per axis toward `tile`, without overshoot.
  pub fn advance_toward(&mut self, tile: IVec2, distance: f32) {
    let target = tile.as_vec2();
    self.0.x = approach(self.0.x, target.x, distance);
    self.0.y = approach(self.0.y, target.y, distance);
  }
}

fn approach(from: f32, to: f32, step: f32) -> f32 {
  if from < to {
    (from + step).min(to)
  } else {
    (from - step).max(to)
  }
}

/// Keeps sprite transforms on the tile grid.
pub fn sync_real_positions(
  config: Res<TileCameraConfig>,
  mut positioned: Query<(Ref<RealPosition>, &mut Transform)>,
) {
  for (real, mut transform) in positioned.iter_mut() {
    if !real.is_changed() && !config.is_changed() {
      continue;
    }
    let world = tile_to_world(real.0, config.tile_size);
    transform.translation.x = world.x;
    transform.translation.y = world.y;
  }
}
