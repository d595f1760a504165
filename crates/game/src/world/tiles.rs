//! Sprites for map floors and events.

use bevy::prelude::*;
use tile_camera::{GameMap, MapEvent, TileCameraConfig, tile_to_world};

const FLOOR_LIGHT: Color = Color::srgb(0.22, 0.3, 0.22);
const FLOOR_DARK: Color = Color::srgb(0.18, 0.25, 0.18);

const FLOOR_Z: f32 = 0.0;
const EVENT_Z: f32 = 1.0;

/// Floor tile at this grid position.
#[derive(Component, Debug, Clone, Copy)]
pub struct MapTile(pub UVec2);

/// Checkerboard floor for each newly loaded map.
pub fn draw_map_tiles(
  mut commands: Commands,
  config: Res<TileCameraConfig>,
  maps: Query<(Entity, &GameMap), Added<GameMap>>,
) {
  for (entity, map) in maps.iter() {
    commands.entity(entity).with_children(|parent| {
      for y in 0..map.size.y {
        for x in 0..map.size.x {
          let tile = UVec2::new(x, y);
          let color = if (x + y) % 2 == 0 {
            FLOOR_LIGHT
          } else {
            FLOOR_DARK
          };
          parent.spawn((
            MapTile(tile),
            Sprite {
              color,
              custom_size: Some(Vec2::splat(config.tile_size)),
              ..default()
            },
            tile_transform(tile, config.tile_size),
          ));
        }
      }
    });
  }
}

/// Follows `tile_size` changes from a config reload.
pub fn relayout_tiles(
  config: Res<TileCameraConfig>,
  mut tiles: Query<(&MapTile, &mut Sprite, &mut Transform)>,
  mut events: Query<&mut Sprite, (With<MapEvent>, Without<MapTile>)>,
) {
  if !config.is_changed() {
    return;
  }
  for (tile, mut sprite, mut transform) in tiles.iter_mut() {
    sprite.custom_size = Some(Vec2::splat(config.tile_size));
    *transform = tile_transform(tile.0, config.tile_size);
  }
  for mut sprite in events.iter_mut() {
    sprite.custom_size = Some(Vec2::splat(config.tile_size * 0.8));
  }
}

fn tile_transform(tile: UVec2, tile_size: f32) -> Transform {
  let world = tile_to_world(tile.as_vec2(), tile_size);
  Transform::from_xyz(world.x, world.y, FLOOR_Z)
}

/// Gives each new event a sprite colored by its id.
pub fn decorate_events(
  mut commands: Commands,
  config: Res<TileCameraConfig>,
  mut events: Query<(Entity, &MapEvent, &mut Transform), Added<MapEvent>>,
) {
  for (entity, event, mut transform) in events.iter_mut() {
    transform.translation.z = EVENT_Z;
    let hue = (event.id as f32 * 47.0).rem_euclid(360.0);
    commands.entity(entity).insert(Sprite {
      color: Color::hsl(hue, 0.7, 0.55),
      custom_size: Some(Vec2::splat(config.tile_size * 0.8)),
      ..default()
    });
  }
}
