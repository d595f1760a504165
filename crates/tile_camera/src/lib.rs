//! Tile Camera - follow-mode camera targeting for tile-based 2D maps.
//!
//! Every loaded map owns a [`FollowState`] that decides, on each movement
//! tick, what its [`Viewport`] does:
//!
//! | Mode | Per-tick behavior |
//! |------|-------------------|
//! | `Player` (default) | Default edge-following scroll around the controlled character |
//! | `Map` | Nothing; the viewport only moves through directives or `ScrollMap` |
//! | `Event` | Hard lock-on: centered exactly on the tracked event every tick |
//!
//! The mode is changed with [`CameraDirective`]s, parsed from text such as
//! `CamFollow event 3` or `CamSet 5 7`.
//!
//! # Usage
//!
//! ```ignore
//! app.add_plugins(TileCameraPlugin);
//! app.add_systems(FixedUpdate, move_player.in_set(FollowCameraSet::Movement));
//!
//! commands.spawn((ControlledCharacter, GridPosition(IVec2::new(4, 4))));
//! commands.spawn((Camera2d, ViewportCamera));
//! commands.queue(SpawnMap::new(definition));
//! ```

use bevy::prelude::*;
use bevy::transform::TransformSystems;

pub mod camera;
pub mod character;
pub mod config;
pub mod directive;
pub mod follow;
pub mod map;
pub mod map_scroll;
pub mod scroll;
pub mod target;
pub mod viewport;

pub use camera::ViewportCamera;
pub use character::{ControlledCharacter, GridPosition, LastScrolled, RealPosition};
pub use config::TileCameraConfig;
pub use directive::{CameraDirective, DirectiveParseError, apply_directive};
pub use follow::{FollowMode, FollowState};
pub use map::{
  EventDefinition, EventLookup, GameMap, MapDefinition, MapEvent, MapEventRegistry, SpawnMap,
};
pub use map_scroll::MapScroll;
pub use scroll::{ScrollAction, follow_player_scroll, resolve_follow};
pub use target::{CameraTarget, TargetError, TargetParseError};
pub use viewport::{ScrollDirection, Viewport, point_to_world, tile_to_world};

/// Stages of one movement tick, chained in `FixedUpdate`.
///
/// Hosts put their character/event movement in [`FollowCameraSet::Movement`]
/// so the default scroll sees the position from before and after the move.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FollowCameraSet {
  /// Event registry catches up with spawned/despawned events.
  Registry,
  /// Queued [`CameraDirective`]s are applied.
  Directives,
  /// Timed map scrolls advance.
  MapScroll,
  /// The character's pre-move screen position is recorded.
  CaptureScroll,
  /// Host movement.
  Movement,
  /// The follow mode moves the viewport.
  Resolve,
}

/// Plugin for follow-mode camera control.
///
/// Insert a [`TileCameraConfig`] before adding the plugin to override the
/// defaults.
pub struct TileCameraPlugin;

impl Plugin for TileCameraPlugin {
  fn build(&self, app: &mut App) {
    app.init_resource::<TileCameraConfig>();
    app.add_message::<CameraDirective>();
    app.register_type::<FollowState>();
    app.register_type::<Viewport>();

    app.configure_sets(
      FixedUpdate,
      (
        FollowCameraSet::Registry,
        FollowCameraSet::Directives,
        FollowCameraSet::MapScroll,
        FollowCameraSet::CaptureScroll,
        FollowCameraSet::Movement,
        FollowCameraSet::Resolve,
      )
        .chain(),
    );

    app.add_systems(
      FixedUpdate,
      (
        map::sync_event_registry.in_set(FollowCameraSet::Registry),
        directive::apply_camera_directives.in_set(FollowCameraSet::Directives),
        map_scroll::update_map_scroll.in_set(FollowCameraSet::MapScroll),
        scroll::capture_last_scrolled.in_set(FollowCameraSet::CaptureScroll),
        scroll::update_scroll.in_set(FollowCameraSet::Resolve),
      ),
    );

    app.add_systems(Update, camera::apply_config_to_viewports);
    app.add_systems(
      PostUpdate,
      (
        character::sync_real_positions,
        camera::sync_viewport_camera,
      )
        .before(TransformSystems::Propagate),
    );
  }
}
