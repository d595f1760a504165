//! Events that walk around their map on their own.

use bevy::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tile_camera::map_scroll::scroll_step;
use tile_camera::{GameMap, GridPosition, MapEvent, RealPosition};

use super::ActiveMap;
use super::grid::{DIRECTIONS, neighbor};
use crate::config::ConfigLoaded;

#[derive(Component, Debug)]
pub struct Wander {
  pause: Timer,
}

impl Wander {
  pub fn new(pause_secs: f32) -> Self {
    Self {
      pause: Timer::from_seconds(pause_secs.max(0.0), TimerMode::Repeating),
    }
  }
}

/// Seeded so a given config always produces the same walks.
#[derive(Resource)]
pub struct WanderRng(pub StdRng);

impl FromWorld for WanderRng {
  fn from_world(world: &mut World) -> Self {
    let seed = world
      .get_resource::<ConfigLoaded>()
      .map_or(0, |config| config.wander.seed);
    Self(StdRng::seed_from_u64(seed))
  }
}

/// Tags the active map's wandering events as they spawn.
pub fn assign_wanderers(
  mut commands: Commands,
  active: Res<ActiveMap>,
  config: Res<ConfigLoaded>,
  events: Query<(Entity, &MapEvent), Added<MapEvent>>,
) {
  let Some(map) = config.maps.get(active.0) else {
    return;
  };
  for (entity, event) in events.iter() {
    if map.wandering.contains(&event.id) {
      commands
        .entity(entity)
        .insert(Wander::new(config.wander.pause_secs));
    }
  }
}

/// Moves wandering events one tile at a time, pausing between steps.
pub fn wander_events(
  time: Res<Time>,
  config: Res<ConfigLoaded>,
  mut rng: ResMut<WanderRng>,
  maps: Query<&GameMap>,
  mut events: Query<(&mut Wander, &mut GridPosition, &mut RealPosition, &ChildOf)>,
) {
  let step = scroll_step(config.wander.move_speed);

  for (mut wander, mut grid, mut real, child_of) in events.iter_mut() {
    if real.is_moving_toward(grid.0) {
      real.advance_toward(grid.0, step);
      continue;
    }
    if !wander.pause.tick(time.delta()).just_finished() {
      continue;
    }
    let Ok(map) = maps.get(child_of.parent()) else {
      continue;
    };
    let direction = DIRECTIONS[rng.0.random_range(0..DIRECTIONS.len())];
    if let Some(next) = neighbor(grid.0, direction, map.size) {
      grid.0 = next;
      real.advance_toward(next, step);
    }
  }
}
