//! The visible window into a map, in tile coordinates.

use std::str::FromStr;

use bevy::prelude::*;

/// Direction for [`Viewport::scroll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ScrollDirection {
  Down,
  Left,
  Right,
  Up,
}

impl FromStr for ScrollDirection {
  type Err = UnknownDirection;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "down" | "2" => Ok(Self::Down),
      "left" | "4" => Ok(Self::Left),
      "right" | "6" => Ok(Self::Right),
      "up" | "8" => Ok(Self::Up),
      _ => Err(UnknownDirection(s.to_string())),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDirection(pub String);

impl std::fmt::Display for UnknownDirection {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "unknown scroll direction: {}", self.0)
  }
}

impl std::error::Error for UnknownDirection {}

/// Scroll position of a map.
///
/// `display` is the tile shown at the top-left corner of the screen. Tile y
/// grows downward.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Viewport {
  pub display: Vec2,
  pub screen_tiles: Vec2,
  pub map_size: Vec2,
}

impl Default for Viewport {
  fn default() -> Self {
    Self {
      display: Vec2::ZERO,
      screen_tiles: Vec2::new(17.0, 13.0),
      map_size: Vec2::new(17.0, 13.0),
    }
  }
}

impl Viewport {
  pub fn new(screen_tiles: Vec2, map_size: Vec2) -> Self {
    Self {
      display: Vec2::ZERO,
      screen_tiles,
      map_size,
    }
  }

  /// Screen-relative tile offset of the center tile.
  pub fn center_offset(&self) -> Vec2 {
    (self.screen_tiles - Vec2::ONE) / 2.0
  }

  /// Places `pos` at the center of the screen, clamped to the map edges.
  pub fn center(&mut self, pos: Vec2) {
    self.set_display(pos - self.center_offset());
  }

  /// Sets the top-left tile, clamped per axis to the map.
  ///
  /// An axis where the map is smaller than the screen is centered instead.
  pub fn set_display(&mut self, display: Vec2) {
    let end = self.map_size - self.screen_tiles;
    self.display.x = clamp_axis(display.x, end.x);
    self.display.y = clamp_axis(display.y, end.y);
  }

  /// Moves the window by `distance` tiles, stopping at the map edge.
  pub fn scroll(&mut self, direction: ScrollDirection, distance: f32) {
    let end = self.map_size - self.screen_tiles;
    match direction {
      ScrollDirection::Down if end.y >= 0.0 => {
        self.display.y = (self.display.y + distance).min(end.y);
      }
      ScrollDirection::Up if end.y >= 0.0 => {
        self.display.y = (self.display.y - distance).max(0.0);
      }
      ScrollDirection::Right if end.x >= 0.0 => {
        self.display.x = (self.display.x + distance).min(end.x);
      }
      ScrollDirection::Left if end.x >= 0.0 => {
        self.display.x = (self.display.x - distance).max(0.0);
      }
      _ => {}
    }
  }

  /// Position of `real` relative to the top-left of the screen.
  pub fn screen_position(&self, real: Vec2) -> Vec2 {
    real - self.display
  }

  /// Continuous tile position at the middle of the screen.
  pub fn focus(&self) -> Vec2 {
    self.display + self.screen_tiles / 2.0
  }
}

fn clamp_axis(value: f32, end: f32) -> f32 {
  if end < 0.0 {
    end / 2.0
  } else {
    value.clamp(0.0, end)
  }
}

/// Converts a point in tile space to world space (y up).
pub fn point_to_world(point: Vec2, tile_size: f32) -> Vec2 {
  Vec2::new(point.x * tile_size, -point.y * tile_size)
}

/// World-space center of the tile at a continuous tile position.
pub fn tile_to_world(pos: Vec2, tile_size: f32) -> Vec2 {
  point_to_world(pos + Vec2::splat(0.5), tile_size)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn viewport() -> Viewport {
    Viewport::new(Vec2::new(17.0, 13.0), Vec2::new(40.0, 30.0))
  }

  #[test]
  fn center_puts_tile_in_middle() {
    let mut vp = viewport();
    vp.center(Vec2::new(20.0, 15.0));
    assert_eq!(vp.display, Vec2::new(12.0, 9.0));
    assert_eq!(vp.screen_position(Vec2::new(20.0, 15.0)), vp.center_offset());
    assert_eq!(vp.focus(), Vec2::new(20.5, 15.5));
  }

  #[test]
  fn center_clamps_to_edges() {
    let mut vp = viewport();
    vp.center(Vec2::new(1.0, 1.0));
    assert_eq!(vp.display, Vec2::ZERO);

    vp.center(Vec2::new(39.0, 29.0));
    assert_eq!(vp.display, Vec2::new(23.0, 17.0));
  }

  #[test]
  fn small_map_is_centered() {
    let mut vp = Viewport::new(Vec2::new(17.0, 13.0), Vec2::new(11.0, 13.0));
    vp.center(Vec2::new(8.0, 2.0));
    assert_eq!(vp.display, Vec2::new(-3.0, 0.0));

    vp.scroll(ScrollDirection::Right, 1.0);
    assert_eq!(vp.display.x, -3.0);
  }

  #[test]
  fn scroll_stops_at_edges() {
    let mut vp = viewport();
    vp.scroll(ScrollDirection::Up, 2.0);
    assert_eq!(vp.display.y, 0.0);

    vp.scroll(ScrollDirection::Down, 100.0);
    assert_eq!(vp.display.y, 17.0);

    vp.scroll(ScrollDirection::Right, 0.5);
    assert_eq!(vp.display.x, 0.5);
    vp.scroll(ScrollDirection::Left, 0.25);
    assert_eq!(vp.display.x, 0.25);
  }

  #[test]
  fn parses_directions() {
    assert_eq!("Left".parse::<ScrollDirection>(), Ok(ScrollDirection::Left));
    assert_eq!("8".parse::<ScrollDirection>(), Ok(ScrollDirection::Up));
    assert!("sideways".parse::<ScrollDirection>().is_err());
  }

  #[test]
  fn world_space_flips_y() {
    assert_eq!(tile_to_world(Vec2::new(0.0, 0.0), 48.0), Vec2::new(24.0, -24.0));
    assert_eq!(tile_to_world(Vec2::new(2.0, 1.0), 10.0), Vec2::new(25.0, -15.0));
  }
}
