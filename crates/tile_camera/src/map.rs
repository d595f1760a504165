//! The map aggregate: follow state, viewport and the event registry.

use std::collections::HashMap;

use bevy::ecs::system::Command;
use bevy::prelude::*;
use serde::Deserialize;

use crate::character::{ControlledCharacter, GridPosition, RealPosition};
use crate::config::TileCameraConfig;
use crate::directive::CameraDirective;
use crate::follow::FollowState;
use crate::map_scroll::MapScroll;
use crate::viewport::Viewport;

/// A loaded map. Exactly one is active at a time.
///
/// Everything the camera keeps per map is a required component, so a freshly
/// spawned map always starts in [`FollowMode::Player`](crate::FollowMode)
/// with no scroll in progress.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
#[require(FollowState, Viewport, MapScroll, MapEventRegistry, Transform, Visibility)]
pub struct GameMap {
  pub map_id: u32,
  pub size: UVec2,
}

/// An entity placed on a map, addressable by its event id.
///
/// Spawn it as a child of its [`GameMap`]; the registry picks it up on the
/// next tick.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
#[require(GridPosition, RealPosition, Transform)]
pub struct MapEvent {
  pub id: i32,
}

/// Event id to entity mapping, owned by the map.
#[derive(Component, Debug, Default, Clone)]
pub struct MapEventRegistry {
  events: HashMap<i32, Entity>,
}

impl MapEventRegistry {
  pub fn get(&self, id: i32) -> Option<Entity> {
    self.events.get(&id).copied()
  }

  /// Maps `id` to `entity`, replacing any previous occupant of the id.
  pub fn insert(&mut self, id: i32, entity: Entity) -> Option<Entity> {
    self.events.insert(id, entity)
  }

  /// Keeps only the entries whose entity passes `keep`.
  pub fn retain(&mut self, mut keep: impl FnMut(Entity) -> bool) {
    self.events.retain(|_, entity| keep(*entity));
  }

  pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
    self.events.values().copied()
  }

  pub fn len(&self) -> usize {
    self.events.len()
  }

  pub fn is_empty(&self) -> bool {
    self.events.is_empty()
  }
}

/// Positions of map events, for building a [`MapEventLookup`].
pub type EventPositions<'w, 's> =
  Query<'w, 's, (&'static GridPosition, &'static RealPosition), With<MapEvent>>;

/// Resolves event ids to live positions.
pub trait EventLookup {
  fn grid_position(&self, id: i32) -> Option<IVec2>;
  fn real_position(&self, id: i32) -> Option<Vec2>;
}

/// [`EventLookup`] over a map's registry and the event position query.
///
/// Ids whose entity has been despawned resolve to `None` even before the
/// registry catches up.
pub struct MapEventLookup<'a, 'w, 's> {
  pub registry: &'a MapEventRegistry,
  pub positions: &'a EventPositions<'w, 's>,
}

impl EventLookup for MapEventLookup<'_, '_, '_> {
  fn grid_position(&self, id: i32) -> Option<IVec2> {
    let entity = self.registry.get(id)?;
    self.positions.get(entity).ok().map(|(grid, _)| grid.0)
  }

  fn real_position(&self, id: i32) -> Option<Vec2> {
    let entity = self.registry.get(id)?;
    self.positions.get(entity).ok().map(|(_, real)| real.0)
  }
}

/// System: keeps every map's registry in step with spawned/despawned events.
///
/// Dead entries are found by checking each entity against the live events,
/// so despawns are caught no matter how many frames passed between ticks.
pub fn sync_event_registry(
  added: Query<(Entity, &MapEvent, &ChildOf), Added<MapEvent>>,
  live: Query<(), With<MapEvent>>,
  mut maps: Query<&mut MapEventRegistry, With<GameMap>>,
) {
  for mut registry in maps.iter_mut() {
    if registry.entities().any(|entity| !live.contains(entity)) {
      registry.retain(|entity| live.contains(entity));
    }
  }

  for (entity, event, child_of) in added.iter() {
    if event.id < 1 {
      warn!("Event id {} is below 1, ignoring", event.id);
      continue;
    }
    let Ok(mut registry) = maps.get_mut(child_of.parent()) else {
      warn!("Event {} is not a child of a map, ignoring", event.id);
      continue;
    };
    if registry.get(event.id) == Some(entity) {
      continue;
    }
    if registry.insert(event.id, entity).is_some() {
      debug!("Event id {} reassigned to {}", event.id, entity);
    }
  }
}

/// Serialized description of a map to load.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct MapDefinition {
  pub map_id: u32,
  /// Width and height in tiles.
  pub size: [u32; 2],
  #[serde(default)]
  pub events: Vec<EventDefinition>,
  /// Where to put the controlled character. Keeps its tile when absent.
  #[serde(default)]
  pub player_start: Option<[i32; 2]>,
  /// Directive lines (`CamFollow map`, `ScrollMap right 4`, ...) queued once
  /// the map is loaded.
  #[serde(default)]
  pub on_load: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDefinition {
  pub id: i32,
  pub position: [i32; 2],
}

/// Command that replaces the active map.
///
/// Despawns every existing [`GameMap`] along with its events, so follow
/// state never carries over between maps. The viewport starts centered on
/// the controlled character.
///
/// # Example
/// ```ignore
/// fn load(mut commands: Commands, maps: Res<MapList>) {
///     commands.queue(SpawnMap::new(maps.0[1].clone()));
/// }
/// ```
pub struct SpawnMap {
  definition: MapDefinition,
}

impl SpawnMap {
  pub fn new(definition: MapDefinition) -> Self {
    Self { definition }
  }
}

impl Command for SpawnMap {
  fn apply(self, world: &mut World) {
    let old_maps: Vec<Entity> = world
      .query_filtered::<Entity, With<GameMap>>()
      .iter(world)
      .collect();
    for map in old_maps {
      world.despawn(map);
    }

    let config = world
      .get_resource::<TileCameraConfig>()
      .cloned()
      .unwrap_or_default();
    let definition = self.definition;
    let size = UVec2::from(definition.size);
    let mut viewport = Viewport::new(config.screen_tiles(), size.as_vec2());

    let mut players =
      world.query_filtered::<(&mut GridPosition, &mut RealPosition), With<ControlledCharacter>>();
    if let Ok((mut grid, mut real)) = players.single_mut(world) {
      if let Some(start) = definition.player_start {
        grid.0 = IVec2::from(start);
        *real = RealPosition::at(grid.0);
      }
      viewport.center(real.0);
    }

    let map = world
      .spawn((
        GameMap {
          map_id: definition.map_id,
          size,
        },
        viewport,
      ))
      .id();

    let mut registry = MapEventRegistry::default();
    for event in &definition.events {
      if event.id < 1 {
        warn!(
          "Map {} defines event {}, ids start at 1; skipping it",
          definition.map_id, event.id
        );
        continue;
      }
      let tile = IVec2::from(event.position);
      let entity = world
        .spawn((
          MapEvent { id: event.id },
          GridPosition(tile),
          RealPosition::at(tile),
          ChildOf(map),
        ))
        .id();
      if registry.insert(event.id, entity).is_some() {
        warn!(
          "Map {} defines event {} twice, keeping the last one",
          definition.map_id, event.id
        );
      }
    }
    let event_count = registry.len();
    world.entity_mut(map).insert(registry);

    info!(
      "Loaded map {} ({}x{}) with {} events",
      definition.map_id,
      size.x,
      size.y,
      event_count
    );

    for line in &definition.on_load {
      match line.parse::<CameraDirective>() {
        Ok(directive) => {
          world.write_message(directive);
        }
        Err(err) => warn!("Map {} on_load `{}`: {}", definition.map_id, line, err),
      }
    }
  }
}
