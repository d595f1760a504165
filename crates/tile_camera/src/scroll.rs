//! Per-tick scroll resolution.
//!
//! Each movement tick the active map's [`FollowState`] picks one of three
//! actions: hold the viewport, hard-lock it onto an event, or hand over to
//! the default player scroll ([`follow_player_scroll`]).

use bevy::prelude::*;

use crate::character::{ControlledCharacter, LastScrolled, RealPosition};
use crate::follow::{FollowMode, FollowState};
use crate::map::{EventLookup, EventPositions, GameMap, MapEventLookup, MapEventRegistry};
use crate::viewport::{ScrollDirection, Viewport};

/// What the viewport does this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollAction {
  /// Leave the viewport alone.
  Hold,
  /// Center exactly on this continuous position.
  LockOn(Vec2),
  /// Run the default player scroll.
  Delegate,
}

/// Decides this tick's action.
///
/// A tracked id that is non-positive or no longer resolves yields `Hold`:
/// the event may have been erased since the directive was issued.
pub fn resolve_follow(state: &FollowState, events: &impl EventLookup) -> ScrollAction {
  match state.mode() {
    FollowMode::Map => ScrollAction::Hold,
    FollowMode::Event => state
      .tracked_event()
      .filter(|id| *id > 0)
      .and_then(|id| events.real_position(id))
      .map_or(ScrollAction::Hold, ScrollAction::LockOn),
    FollowMode::Player => ScrollAction::Delegate,
  }
}

/// Default scroll: once the character is past the screen center, the
/// viewport moves by however far the character moved this tick.
///
/// `last_scrolled` is the character's screen position before it moved.
pub fn follow_player_scroll(viewport: &mut Viewport, last_scrolled: Vec2, real: Vec2) {
  let current = viewport.screen_position(real);
  let center = viewport.center_offset();

  if current.y > last_scrolled.y && current.y > center.y {
    viewport.scroll(ScrollDirection::Down, current.y - last_scrolled.y);
  }
  if current.x < last_scrolled.x && current.x < center.x {
    viewport.scroll(ScrollDirection::Left, last_scrolled.x - current.x);
  }
  if current.x > last_scrolled.x && current.x > center.x {
    viewport.scroll(ScrollDirection::Right, current.x - last_scrolled.x);
  }
  if current.y < last_scrolled.y && current.y < center.y {
    viewport.scroll(ScrollDirection::Up, last_scrolled.y - current.y);
  }
}

/// System: records the character's screen position before movement.
pub fn capture_last_scrolled(
  maps: Query<&Viewport, With<GameMap>>,
  mut players: Query<(&RealPosition, &mut LastScrolled), With<ControlledCharacter>>,
) {
  let Ok(viewport) = maps.single() else {
    return;
  };
  for (real, mut last) in players.iter_mut() {
    last.0 = viewport.screen_position(real.0);
  }
}

/// System: moves the active viewport according to the follow mode.
pub fn update_scroll(
  mut maps: Query<(&FollowState, &MapEventRegistry, &mut Viewport), With<GameMap>>,
  events: EventPositions,
  players: Query<(&RealPosition, &LastScrolled), With<ControlledCharacter>>,
) {
  let Ok((state, registry, mut viewport)) = maps.single_mut() else {
    return;
  };
  let lookup = MapEventLookup {
    registry,
    positions: &events,
  };

  match resolve_follow(state, &lookup) {
    ScrollAction::Hold => {}
    ScrollAction::LockOn(pos) => viewport.center(pos),
    ScrollAction::Delegate => {
      if let Ok((real, last)) = players.single() {
        follow_player_scroll(&mut viewport, last.0, real.0);
      }
    }
  }
}
