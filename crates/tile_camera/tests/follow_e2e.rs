//! E2E tests for follow modes driven through directives.
//!
//! Each test builds a `MinimalPlugins` app with the camera plugin, loads a
//! 40x30 map with events 3 and 5, and ticks by running `FixedUpdate`
//! directly so every call is exactly one movement tick.

use bevy::ecs::system::Command;
use bevy::prelude::*;
use tile_camera::{
  CameraDirective, CameraTarget, ControlledCharacter, DirectiveParseError, EventDefinition,
  FollowCameraSet, FollowMode, FollowState, GameMap, GridPosition, MapDefinition, MapEvent,
  MapEventRegistry, RealPosition, SpawnMap, TargetParseError, TileCameraPlugin, Viewport,
};

const SCREEN: Vec2 = Vec2::new(17.0, 13.0);
const MAP: Vec2 = Vec2::new(40.0, 30.0);

/// Distance the player moves during the next tick's movement stage.
#[derive(Resource, Default)]
struct PendingStep(Vec2);

fn step_player(
  mut step: ResMut<PendingStep>,
  mut players: Query<&mut RealPosition, With<ControlledCharacter>>,
) {
  let delta = std::mem::take(&mut step.0);
  if delta == Vec2::ZERO {
    return;
  }
  for mut real in players.iter_mut() {
    real.0 += delta;
  }
}

fn test_map() -> MapDefinition {
  MapDefinition {
    map_id: 1,
    size: [40, 30],
    events: vec![
      EventDefinition {
        id: 3,
        position: [30, 20],
      },
      EventDefinition {
        id: 5,
        position: [8, 6],
      },
    ],
    player_start: Some([20, 15]),
    on_load: Vec::new(),
  }
}

/// Display position a viewport of the test map has when centered on `pos`.
fn centered_on(pos: Vec2) -> Vec2 {
  let mut viewport = Viewport::new(SCREEN, MAP);
  viewport.center(pos);
  viewport.display
}

struct TestHarness {
  app: App,
  player: Entity,
}

impl TestHarness {
  fn new() -> Self {
    Self::with_map(test_map())
  }

  fn with_map(definition: MapDefinition) -> Self {
    let mut app = App::new();
    app
      .add_plugins(MinimalPlugins)
      .add_plugins(TileCameraPlugin)
      .init_resource::<PendingStep>()
      .add_systems(
        FixedUpdate,
        step_player.in_set(FollowCameraSet::Movement),
      );

    let player = app.world_mut().spawn(ControlledCharacter).id();
    SpawnMap::new(definition).apply(app.world_mut());

    Self { app, player }
  }

  fn tick(&mut self) {
    self.app.world_mut().run_schedule(FixedUpdate);
  }

  fn directive(&mut self, line: &str) {
    let directive: CameraDirective = line.parse().unwrap();
    self.app.world_mut().write_message(directive);
  }

  fn step(&mut self, delta: Vec2) {
    self.app.world_mut().resource_mut::<PendingStep>().0 = delta;
  }

  fn map(&mut self) -> Entity {
    let world = self.app.world_mut();
    let mut maps = world.query_filtered::<Entity, With<GameMap>>();
    maps.single(world).unwrap()
  }

  fn display(&mut self) -> Vec2 {
    let map = self.map();
    self.app.world().get::<Viewport>(map).unwrap().display
  }

  fn follow(&mut self) -> FollowState {
    let map = self.map();
    *self.app.world().get::<FollowState>(map).unwrap()
  }

  fn event(&mut self, id: i32) -> Entity {
    let world = self.app.world_mut();
    let mut events = world.query::<(Entity, &MapEvent)>();
    events
      .iter(world)
      .find(|(_, event)| event.id == id)
      .map(|(entity, _)| entity)
      .unwrap()
  }

  fn move_event(&mut self, id: i32, real: Vec2) {
    let entity = self.event(id);
    let mut event = self.app.world_mut().entity_mut(entity);
    event.get_mut::<RealPosition>().unwrap().0 = real;
    event.get_mut::<GridPosition>().unwrap().0 = real.round().as_ivec2();
  }

  fn place_player(&mut self, grid: IVec2, real: Vec2) {
    let mut player = self.app.world_mut().entity_mut(self.player);
    player.get_mut::<GridPosition>().unwrap().0 = grid;
    player.get_mut::<RealPosition>().unwrap().0 = real;
  }
}

#[test]
fn map_load_centers_on_player() {
  let mut harness = TestHarness::new();
  assert_eq!(harness.display(), centered_on(Vec2::new(20.0, 15.0)));
  assert_eq!(harness.follow(), FollowState::default());
}

#[test]
fn follow_event_locks_onto_each_event() {
  for (id, real) in [(3, Vec2::new(30.5, 20.0)), (5, Vec2::new(8.0, 6.25))] {
    let mut harness = TestHarness::new();
    harness.move_event(id, real);

    harness.directive(&format!("CamFollow event {}", id));
    harness.tick();

    assert_eq!(harness.display(), centered_on(real), "event {}", id);
    assert_eq!(harness.follow().tracked_event(), Some(id));
  }
}

#[test]
fn lock_on_tracks_every_tick() {
  let mut harness = TestHarness::new();
  harness.directive("CamFollow event 3");
  harness.tick();

  for x in [30.25, 30.5, 30.75, 31.0] {
    harness.move_event(3, Vec2::new(x, 20.0));
    // Player movement must not pull the camera away.
    harness.step(Vec2::new(0.25, 0.0));
    harness.tick();
    assert_eq!(harness.display(), centered_on(Vec2::new(x, 20.0)));
  }
}

#[test]
fn follow_map_never_moves_viewport() {
  let mut harness = TestHarness::new();
  let before = harness.display();

  harness.directive("CamFollow map");
  harness.tick();
  assert_eq!(harness.display(), before);
  assert_eq!(harness.follow().mode(), FollowMode::Map);

  for _ in 0..10 {
    harness.step(Vec2::new(0.5, -0.5));
    harness.tick();
    assert_eq!(harness.display(), before);
  }
}

#[test]
fn removed_event_freezes_viewport() {
  let mut harness = TestHarness::new();
  harness.directive("CamFollow event 3");
  harness.tick();
  let locked = harness.display();

  let event = harness.event(3);
  harness.app.world_mut().despawn(event);

  harness.step(Vec2::new(0.5, 0.0));
  harness.tick();
  harness.tick();

  assert_eq!(harness.display(), locked);
  assert_eq!(harness.follow().tracked_event(), Some(3));
  let map = harness.map();
  let registry = harness.app.world().get::<MapEventRegistry>(map).unwrap();
  assert_eq!(registry.get(3), None);
}

#[test]
fn cam_set_snaps_without_changing_mode() {
  let mut harness = TestHarness::new();

  // Player mode, player standing still: nothing pulls the camera back.
  harness.directive("CamSet 5 7");
  harness.tick();
  assert_eq!(harness.display(), centered_on(Vec2::new(5.0, 7.0)));
  assert_eq!(harness.follow().mode(), FollowMode::Player);

  harness.directive("CamFollow map");
  harness.directive("CamSet 25 10");
  harness.tick();
  assert_eq!(harness.display(), centered_on(Vec2::new(25.0, 10.0)));
  assert_eq!(harness.follow().mode(), FollowMode::Map);
}

#[test]
fn cam_set_event_uses_event_tile() {
  let mut harness = TestHarness::new();
  harness.directive("CamFollow map");
  harness.move_event(3, Vec2::new(27.0, 18.0));

  harness.directive("CamSet event 3");
  harness.tick();
  assert_eq!(harness.display(), centered_on(Vec2::new(27.0, 18.0)));
  assert_eq!(harness.follow().mode(), FollowMode::Map);
}

#[test]
fn follow_player_uses_default_scroll() {
  let mut harness = TestHarness::new();
  // Halfway between tiles 20 and 21.
  harness.place_player(IVec2::new(21, 15), Vec2::new(20.5, 15.0));

  harness.directive("CamFollow event 3");
  harness.tick();
  harness.directive("CamFollow player");
  harness.tick();

  // Snapped to the player's tile, not hard-locked on its real position.
  let snapped = centered_on(Vec2::new(21.0, 15.0));
  assert_eq!(harness.display(), snapped);
  assert_eq!(harness.follow().mode(), FollowMode::Player);

  // Still left of center: no scroll.
  harness.step(Vec2::new(0.25, 0.0));
  harness.tick();
  assert_eq!(harness.display(), snapped);

  // Past center: the viewport moves by the step.
  harness.step(Vec2::new(0.5, 0.0));
  harness.tick();
  assert_eq!(harness.display(), snapped + Vec2::new(0.5, 0.0));
}

#[test]
fn event_then_player_sequence() {
  let mut harness = TestHarness::new();

  harness.directive("CamFollow event 3");
  harness.tick();
  assert_eq!(harness.display(), centered_on(Vec2::new(30.0, 20.0)));

  harness.directive("CamFollow player");
  harness.tick();
  let on_player = centered_on(Vec2::new(20.0, 15.0));
  assert_eq!(harness.display(), on_player);

  harness.move_event(3, Vec2::new(33.0, 24.0));
  harness.tick();
  assert_eq!(harness.display(), on_player);
}

#[test]
fn bad_directives_keep_previous_state() {
  let mut harness = TestHarness::new();
  harness.directive("CamFollow map");
  harness.tick();
  let before = harness.display();

  harness.directive("CamFollow event 42");
  harness.directive("CamSet event 42");
  harness.tick();

  assert_eq!(harness.follow().mode(), FollowMode::Map);
  assert_eq!(harness.display(), before);
}

#[test]
fn event_ids_below_one_are_refused() {
  let mut definition = test_map();
  definition.events.push(EventDefinition {
    id: 0,
    position: [12, 10],
  });
  let mut harness = TestHarness::with_map(definition);
  let map = harness.map();
  // An event 0 placed by hand still never becomes addressable.
  harness
    .app
    .world_mut()
    .spawn((MapEvent { id: 0 }, GridPosition(IVec2::new(14, 9)), ChildOf(map)));
  harness.directive("CamFollow map");
  harness.tick();
  let before = harness.display();

  for line in ["CamFollow event 0", "CamSet event 0", "CamFollow event -3"] {
    assert!(matches!(
      line.parse::<CameraDirective>(),
      Err(DirectiveParseError::Target(TargetParseError::InvalidEventId(_)))
    ));
  }

  let world = harness.app.world_mut();
  world.write_message(CameraDirective::Follow(CameraTarget::Event(0)));
  world.write_message(CameraDirective::Set(CameraTarget::Event(0)));
  harness.tick();

  assert_eq!(harness.follow().mode(), FollowMode::Map);
  assert_eq!(harness.follow().tracked_event(), None);
  assert_eq!(harness.display(), before);
}

#[test]
fn new_map_resets_follow_state() {
  let mut harness = TestHarness::new();
  harness.directive("CamFollow event 3");
  harness.tick();
  assert_eq!(harness.follow().mode(), FollowMode::Event);

  let mut next = test_map();
  next.map_id = 2;
  next.player_start = Some([4, 4]);
  SpawnMap::new(next).apply(harness.app.world_mut());
  harness.tick();

  assert_eq!(harness.follow(), FollowState::default());
  assert_eq!(harness.display(), centered_on(Vec2::new(4.0, 4.0)));

  let world = harness.app.world_mut();
  let mut maps = world.query::<&GameMap>();
  let maps: Vec<u32> = maps.iter(world).map(|map| map.map_id).collect();
  assert_eq!(maps, vec![2]);
}

#[test]
fn reused_event_id_is_followed() {
  let mut harness = TestHarness::new();
  harness.directive("CamFollow event 3");
  harness.tick();

  let old = harness.event(3);
  harness.app.world_mut().despawn(old);
  harness.tick();

  let map = harness.map();
  harness.app.world_mut().spawn((
    MapEvent { id: 3 },
    GridPosition(IVec2::new(10, 10)),
    RealPosition(Vec2::new(10.0, 10.0)),
    ChildOf(map),
  ));
  harness.tick();

  assert_eq!(harness.display(), centered_on(Vec2::new(10.0, 10.0)));
}

#[test]
fn on_load_directives_run_on_first_tick() {
  let mut definition = test_map();
  definition.on_load = vec!["CamBogus 1".into(), "CamFollow event 5".into()];
  let mut harness = TestHarness::with_map(definition);

  harness.tick();

  assert_eq!(harness.follow().tracked_event(), Some(5));
  assert_eq!(harness.display(), centered_on(Vec2::new(8.0, 6.0)));
}
