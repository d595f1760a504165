//! Follow mode state owned by each map.

use bevy::prelude::*;

/// What the viewport tracks on each movement tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum FollowMode {
  /// Default edge-following scroll around the controlled character.
  #[default]
  Player,
  /// No automatic scrolling; the viewport stays where it is.
  Map,
  /// Hard lock-on to a map event.
  Event,
}

/// Per-map follow state.
///
/// Lives on the [`GameMap`](crate::map::GameMap) entity, so loading a new
/// map always starts from the default (`Player`) mode.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct FollowState {
  mode: FollowMode,
  tracked_event_id: i32,
}

impl FollowState {
  pub fn mode(&self) -> FollowMode {
    self.mode
  }

  /// Id of the tracked event. Only `Some` while in [`FollowMode::Event`].
  pub fn tracked_event(&self) -> Option<i32> {
    (self.mode == FollowMode::Event).then_some(self.tracked_event_id)
  }

  pub fn follow_player(&mut self) {
    self.mode = FollowMode::Player;
  }

  pub fn follow_map(&mut self) {
    self.mode = FollowMode::Map;
  }

  /// Locks onto event `id`. Existence is checked on every tick, not here.
  pub fn follow_event(&mut self, id: i32) {
    self.mode = FollowMode::Event;
    self.tracked_event_id = id;
  }
}
