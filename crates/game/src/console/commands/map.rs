//! Map switching and event removal.

use bevy::prelude::*;
use bevy_console::{ConsoleCommand, reply};
use clap::Parser;
use tile_camera::{GameMap, MapEventRegistry};

use crate::config::ConfigLoaded;
use crate::world::load_map;

#[derive(Parser, ConsoleCommand)]
#[command(name = "map")]
pub struct MapCommand {
  /// Index into the configured map list
  index: usize,
}

pub fn map_command(
  mut log: ConsoleCommand<MapCommand>,
  mut commands: Commands,
  config: Res<ConfigLoaded>,
) {
  if let Some(Ok(MapCommand { index })) = log.take() {
    match load_map(&mut commands, &config, index) {
      Ok(map_id) => reply!(log, "Loading map {} (index {})", map_id, index),
      Err(err) => reply!(log, "{}", err),
    }
  }
}

#[derive(Parser, ConsoleCommand)]
#[command(name = "erase_event")]
pub struct EraseEventCommand {
  /// Event id
  #[arg(allow_hyphen_values = true)]
  id: i32,
}

pub fn erase_event_command(
  mut log: ConsoleCommand<EraseEventCommand>,
  mut commands: Commands,
  maps: Query<&MapEventRegistry, With<GameMap>>,
) {
  if let Some(Ok(EraseEventCommand { id })) = log.take() {
    let Ok(registry) = maps.single() else {
      reply!(log, "No map loaded");
      return;
    };
    let Some(entity) = registry.get(id) else {
      reply!(log, "No event with id {}", id);
      return;
    };
    // The registry catches up with despawns on the next tick.
    if let Ok(mut event) = commands.get_entity(entity) {
      event.despawn();
      reply!(log, "Erased event {}", id);
    } else {
      reply!(log, "No event with id {}", id);
    }
  }
}
