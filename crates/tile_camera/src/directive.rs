//! Camera directives issued by scripts and the console.
//!
//! Text such as `CamFollow event 3` is parsed into a typed
//! [`CameraDirective`] before anything touches the follow state. Directives
//! are applied at the start of the next movement tick.

use std::fmt;
use std::str::FromStr;

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

use crate::character::{ControlledCharacter, GridPosition};
use crate::config::TileCameraConfig;
use crate::follow::FollowState;
use crate::map::{EventLookup, EventPositions, GameMap, MapEventLookup, MapEventRegistry};
use crate::map_scroll::MapScroll;
use crate::target::{CameraTarget, TargetError, TargetParseError};
use crate::viewport::{ScrollDirection, UnknownDirection, Viewport};

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum CameraDirective {
  /// Snap the viewport to a target. Follow mode is unchanged.
  Set(CameraTarget),
  /// Snap to a target (except `map`) and switch follow mode.
  Follow(CameraTarget),
  /// Start a timed scroll; `None` speed uses the configured default.
  ScrollMap {
    direction: ScrollDirection,
    distance: f32,
    speed: Option<u8>,
  },
}

impl CameraDirective {
  /// Builds a directive from a command name and its arguments.
  pub fn from_command<S: AsRef<str>>(
    command: &str,
    args: &[S],
  ) -> Result<Self, DirectiveParseError> {
    match command {
      "CamSet" => match CameraTarget::parse(args)? {
        CameraTarget::Map => Err(DirectiveParseError::MapNotSnappable),
        target => Ok(Self::Set(target)),
      },
      "CamFollow" => Ok(Self::Follow(CameraTarget::parse(args)?)),
      "ScrollMap" => {
        let direction = args
          .first()
          .ok_or(DirectiveParseError::MissingArgument("direction"))?
          .as_ref()
          .parse::<ScrollDirection>()?;
        let distance = args
          .get(1)
          .ok_or(DirectiveParseError::MissingArgument("distance"))?
          .as_ref();
        let distance = distance
          .parse::<f32>()
          .ok()
          .filter(|d| d.is_finite() && *d >= 0.0)
          .ok_or_else(|| DirectiveParseError::InvalidNumber(distance.to_string()))?;
        let speed = match args.get(2).map(AsRef::as_ref) {
          Some(speed) => Some(
            speed
              .parse::<u8>()
              .map_err(|_| DirectiveParseError::InvalidNumber(speed.to_string()))?,
          ),
          None => None,
        };
        Ok(Self::ScrollMap {
          direction,
          distance,
          speed,
        })
      }
      other => Err(DirectiveParseError::UnknownCommand(other.to_string())),
    }
  }
}

impl FromStr for CameraDirective {
  type Err = DirectiveParseError;

  /// Parses a whole command line, e.g. `CamSet 5 7`.
  fn from_str(line: &str) -> Result<Self, Self::Err> {
    let mut words = line.split_whitespace();
    let command = words.next().ok_or(DirectiveParseError::Empty)?;
    let args: Vec<&str> = words.collect();
    Self::from_command(command, &args)
  }
}

impl fmt::Display for CameraDirective {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Set(target) => write!(f, "CamSet {}", target),
      Self::Follow(target) => write!(f, "CamFollow {}", target),
      Self::ScrollMap {
        direction,
        distance,
        speed: Some(speed),
      } => write!(f, "ScrollMap {:?} {} {}", direction, distance, speed),
      Self::ScrollMap {
        direction,
        distance,
        speed: None,
      } => write!(f, "ScrollMap {:?} {}", direction, distance),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveParseError {
  Empty,
  UnknownCommand(String),
  Target(TargetParseError),
  MapNotSnappable,
  MissingArgument(&'static str),
  InvalidNumber(String),
  Direction(UnknownDirection),
}

impl fmt::Display for DirectiveParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Empty => write!(f, "empty directive"),
      Self::UnknownCommand(command) => write!(f, "unknown camera command: {}", command),
      Self::Target(err) => write!(f, "{}", err),
      Self::MapNotSnappable => write!(f, "CamSet needs a position; use CamFollow map"),
      Self::MissingArgument(name) => write!(f, "missing {}", name),
      Self::InvalidNumber(value) => write!(f, "invalid number: {}", value),
      Self::Direction(err) => write!(f, "{}", err),
    }
  }
}

impl std::error::Error for DirectiveParseError {}

impl From<TargetParseError> for DirectiveParseError {
  fn from(err: TargetParseError) -> Self {
    Self::Target(err)
  }
}

impl From<UnknownDirection> for DirectiveParseError {
  fn from(err: UnknownDirection) -> Self {
    Self::Direction(err)
  }
}

/// Mutable camera state of the active map.
pub struct MapCamera<'a> {
  pub follow: &'a mut FollowState,
  pub viewport: &'a mut Viewport,
  pub scroll: &'a mut MapScroll,
}

/// Applies one directive. On error nothing has been changed.
///
/// Returns the tile the viewport was snapped to, if any.
pub fn apply_directive(
  directive: &CameraDirective,
  camera: MapCamera<'_>,
  player_tile: Option<IVec2>,
  events: &impl EventLookup,
  config: &TileCameraConfig,
) -> Result<Option<IVec2>, TargetError> {
  match *directive {
    CameraDirective::Set(target) => {
      let tile = target.resolve(player_tile, events)?;
      if let Some(tile) = tile {
        camera.viewport.center(tile.as_vec2());
      }
      Ok(tile)
    }
    CameraDirective::Follow(target) => {
      let tile = target.resolve(player_tile, events)?;
      if let Some(tile) = tile {
        camera.viewport.center(tile.as_vec2());
      }
      match target {
        CameraTarget::Player => camera.follow.follow_player(),
        CameraTarget::Event(id) => camera.follow.follow_event(id),
        CameraTarget::Map | CameraTarget::Tile(_) => camera.follow.follow_map(),
      }
      Ok(tile)
    }
    CameraDirective::ScrollMap {
      direction,
      distance,
      speed,
    } => {
      camera.scroll.start(
        direction,
        distance,
        speed.unwrap_or(config.default_scroll_speed),
      );
      Ok(None)
    }
  }
}

/// System: applies queued directives to the active map.
///
/// Failures are logged and skipped; the follow state stays as it was.
pub fn apply_camera_directives(
  mut directives: MessageReader<CameraDirective>,
  config: Res<TileCameraConfig>,
  mut maps: Query<
    (
      &mut FollowState,
      &mut Viewport,
      &mut MapScroll,
      &MapEventRegistry,
    ),
    With<GameMap>,
  >,
  events: EventPositions,
  players: Query<&GridPosition, With<ControlledCharacter>>,
) {
  let Ok((mut follow, mut viewport, mut scroll, registry)) = maps.single_mut() else {
    for directive in directives.read() {
      warn!("{}: no active map", directive);
    }
    return;
  };

  let lookup = MapEventLookup {
    registry,
    positions: &events,
  };
  let player_tile = players.single().ok().map(|grid| grid.0);

  for directive in directives.read() {
    let camera = MapCamera {
      follow: &mut *follow,
      viewport: &mut *viewport,
      scroll: &mut *scroll,
    };
    match apply_directive(directive, camera, player_tile, &lookup, &config) {
      Ok(Some(tile)) => info!("{}: camera centered on ({}, {})", directive, tile.x, tile.y),
      Ok(None) => info!("{}", directive),
      Err(err) => warn!("{}: {}", directive, err),
    }
  }
}
