//! Timed scrolling of the viewport ("Scroll Map").
//!
//! A scroll moves the viewport a fixed distance per tick until the requested
//! distance is spent. It runs in every follow mode; in `Event` mode the
//! lock-on recenters after it each tick, so the scroll has no visible effect.

use bevy::prelude::*;

use crate::map::GameMap;
use crate::viewport::{ScrollDirection, Viewport};

pub const MIN_SCROLL_SPEED: u8 = 1;
pub const MAX_SCROLL_SPEED: u8 = 6;

/// Scroll in progress on a map.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MapScroll {
  direction: ScrollDirection,
  rest: f32,
  speed: u8,
}

impl Default for MapScroll {
  fn default() -> Self {
    Self {
      direction: ScrollDirection::Down,
      rest: 0.0,
      speed: 4,
    }
  }
}

impl MapScroll {
  /// Replaces any scroll in progress. `speed` is clamped to 1..=6.
  pub fn start(&mut self, direction: ScrollDirection, distance: f32, speed: u8) {
    self.direction = direction;
    self.rest = distance.max(0.0);
    self.speed = speed.clamp(MIN_SCROLL_SPEED, MAX_SCROLL_SPEED);
  }

  pub fn is_scrolling(&self) -> bool {
    self.rest > 0.0
  }

  pub fn remaining(&self) -> f32 {
    self.rest
  }

  /// Tiles moved per tick at this scroll's speed (2^speed / 256).
  pub fn step(&self) -> f32 {
    scroll_step(self.speed)
  }

  /// Advances one tick, moving `viewport`.
  pub fn advance(&mut self, viewport: &mut Viewport) {
    if !self.is_scrolling() {
      return;
    }
    let step = self.step();
    viewport.scroll(self.direction, step.min(self.rest));
    self.rest = (self.rest - step).max(0.0);
  }
}

pub fn scroll_step(speed: u8) -> f32 {
  2f32.powi(i32::from(speed)) / 256.0
}

/// System: advances the active map's scroll by one tick.
pub fn update_map_scroll(mut maps: Query<(&mut MapScroll, &mut Viewport), With<GameMap>>) {
  for (mut scroll, mut viewport) in maps.iter_mut() {
    if scroll.is_scrolling() {
      scroll.advance(&mut viewport);
      if !scroll.is_scrolling() {
        debug!("Map scroll finished at {:?}", viewport.display);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn step_doubles_with_speed() {
    assert_eq!(scroll_step(1), 2.0 / 256.0);
    assert_eq!(scroll_step(4), 0.0625);
    assert_eq!(scroll_step(6), 0.25);
  }

  #[test]
  fn scroll_spends_distance_then_stops() {
    let mut viewport = Viewport::new(Vec2::new(17.0, 13.0), Vec2::new(40.0, 30.0));
    let mut scroll = MapScroll::default();
    scroll.start(ScrollDirection::Right, 1.0, 6);

    for _ in 0..4 {
      scroll.advance(&mut viewport);
    }
    assert_eq!(viewport.display.x, 1.0);
    assert!(!scroll.is_scrolling());

    scroll.advance(&mut viewport);
    assert_eq!(viewport.display.x, 1.0);
  }

  #[test]
  fn speed_is_clamped() {
    let mut scroll = MapScroll::default();
    scroll.start(ScrollDirection::Up, 3.0, 0);
    assert_eq!(scroll.step(), scroll_step(MIN_SCROLL_SPEED));
    scroll.start(ScrollDirection::Up, 3.0, 9);
    assert_eq!(scroll.step(), scroll_step(MAX_SCROLL_SPEED));
  }

  #[test]
  fn last_step_does_not_overshoot() {
    let mut viewport = Viewport::new(Vec2::new(17.0, 13.0), Vec2::new(40.0, 30.0));
    let mut scroll = MapScroll::default();
    scroll.start(ScrollDirection::Down, 0.375, 6);

    scroll.advance(&mut viewport);
    scroll.advance(&mut viewport);
    assert_eq!(viewport.display.y, 0.375);
    assert_eq!(scroll.remaining(), 0.0);
  }
}
