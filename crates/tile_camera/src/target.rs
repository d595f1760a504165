//! Directive targets and their resolution to a tile.

use std::fmt;

use bevy::prelude::*;

use crate::map::EventLookup;

/// What a `CamSet` / `CamFollow` directive points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraTarget {
  Player,
  Event(i32),
  /// Only meaningful for `CamFollow`: stay put and follow the map.
  Map,
  Tile(IVec2),
}

impl CameraTarget {
  /// Parses directive arguments: `player`, `event <id>`, `map` or `<x> <y>`.
  ///
  /// Keywords are case-insensitive. Trailing arguments are ignored.
  pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, TargetParseError> {
    let Some(first) = args.first().map(AsRef::as_ref) else {
      return Err(TargetParseError::Missing);
    };

    if first.eq_ignore_ascii_case("player") {
      Ok(Self::Player)
    } else if first.eq_ignore_ascii_case("event") {
      let id = parse_int(args.get(1).map(AsRef::as_ref), "event id")?;
      if id < 1 {
        return Err(TargetParseError::InvalidEventId(id));
      }
      Ok(Self::Event(id))
    } else if first.eq_ignore_ascii_case("map") {
      Ok(Self::Map)
    } else {
      let x = parse_int(Some(first), "x")?;
      let y = parse_int(args.get(1).map(AsRef::as_ref), "y")?;
      Ok(Self::Tile(IVec2::new(x, y)))
    }
  }

  /// Resolves to the tile the viewport should snap to.
  ///
  /// `Map` resolves to `None`: the viewport stays where it is. Events resolve
  /// to their discrete tile, not their in-between-tiles position.
  pub fn resolve(
    &self,
    player_tile: Option<IVec2>,
    events: &impl EventLookup,
  ) -> Result<Option<IVec2>, TargetError> {
    match *self {
      Self::Player => player_tile.map(Some).ok_or(TargetError::NoPlayer),
      Self::Event(id) => events
        .grid_position(id)
        .map(Some)
        .ok_or(TargetError::EventNotFound(id)),
      Self::Map => Ok(None),
      Self::Tile(tile) => Ok(Some(tile)),
    }
  }
}

impl fmt::Display for CameraTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Player => write!(f, "player"),
      Self::Event(id) => write!(f, "event {}", id),
      Self::Map => write!(f, "map"),
      Self::Tile(tile) => write!(f, "{} {}", tile.x, tile.y),
    }
  }
}

fn parse_int(arg: Option<&str>, name: &'static str) -> Result<i32, TargetParseError> {
  let arg = arg.ok_or(TargetParseError::MissingArgument(name))?;
  arg.parse().map_err(|_| TargetParseError::InvalidInteger {
    name,
    value: arg.to_string(),
  })
}

/// Malformed target arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetParseError {
  Missing,
  MissingArgument(&'static str),
  InvalidInteger { name: &'static str, value: String },
  /// Event ids start at 1.
  InvalidEventId(i32),
}

impl fmt::Display for TargetParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Missing => write!(f, "expected a target: player, event <id>, map or <x> <y>"),
      Self::MissingArgument(name) => write!(f, "missing {}", name),
      Self::InvalidInteger { name, value } => write!(f, "{} is not an integer: {}", name, value),
      Self::InvalidEventId(id) => write!(f, "event id must be 1 or more: {}", id),
    }
  }
}

impl std::error::Error for TargetParseError {}

/// A well-formed target that does not exist right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetError {
  EventNotFound(i32),
  NoPlayer,
}

impl fmt::Display for TargetError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::EventNotFound(id) => write!(f, "no event with id {} on this map", id),
      Self::NoPlayer => write!(f, "no controlled character"),
    }
  }
}

impl std::error::Error for TargetError {}
