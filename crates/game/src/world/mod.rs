//! Map loading and the things that live on maps.

pub mod grid;
mod tiles;
pub mod wander;

use std::fmt;

use bevy::prelude::*;
use tile_camera::{FollowCameraSet, SpawnMap};

use crate::config::ConfigLoaded;

/// Index into the configured map list of the map currently loaded.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActiveMap(pub usize);

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<ActiveMap>()
      .init_resource::<wander::WanderRng>()
      // Startup spawns the player; the map centers on it.
      .add_systems(PostStartup, load_start_map)
      .add_systems(
        Update,
        (
          tiles::draw_map_tiles,
          tiles::relayout_tiles,
          tiles::decorate_events,
          wander::assign_wanderers,
        ),
      )
      .add_systems(
        FixedUpdate,
        wander::wander_events.in_set(FollowCameraSet::Movement),
      );
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMap {
  pub index: usize,
  pub count: usize,
}

impl fmt::Display for UnknownMap {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "no map at index {} ({} maps configured)",
      self.index, self.count
    )
  }
}

impl std::error::Error for UnknownMap {}

/// Queues loading of the `index`th configured map. Returns its map id.
pub fn load_map(
  commands: &mut Commands,
  config: &ConfigLoaded,
  index: usize,
) -> Result<u32, UnknownMap> {
  let map = config.maps.get(index).ok_or(UnknownMap {
    index,
    count: config.maps.len(),
  })?;
  commands.insert_resource(ActiveMap(index));
  commands.queue(SpawnMap::new(map.definition.clone()));
  Ok(map.definition.map_id)
}

fn load_start_map(mut commands: Commands, config: Res<ConfigLoaded>) {
  if let Err(err) = load_map(&mut commands, &config, config.player.start_map) {
    error!("Failed to load start map: {}", err);
  }
}
