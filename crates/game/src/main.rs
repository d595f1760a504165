mod config;
mod console;
mod core;
mod player;
mod world;

use bevy::{
  prelude::*,
  window::{PresentMode, WindowResolution},
};

fn main() {
  let (config, fallback) = config::startup_config();

  let mut app = App::new();

  // One fixed tick is one movement tick.
  app.insert_resource(Time::<Fixed>::from_hz(60.0));

  app
    .add_plugins(
      DefaultPlugins
        .set(ImagePlugin::default_nearest())
        .set(WindowPlugin {
          primary_window: Some(Window {
            resolution: WindowResolution::new(config.window.width, config.window.height),
            title: config.window.title.clone(),
            present_mode: PresentMode::AutoVsync,
            ..default()
          }),
          ..default()
        })
        // Disable 3D PBR plugin
        .disable::<bevy::pbr::PbrPlugin>(),
    )
    .insert_resource(config.camera.clone())
    .insert_resource(config::ConfigLoaded::from(config))
    .add_plugins(config::ConfigPlugin)
    .add_plugins(core::CorePlugin)
    .add_plugins(world::WorldPlugin)
    .add_plugins(player::PlayerPlugin)
    .add_plugins(console::ConsolePlugins);

  if let Some(fallback) = fallback {
    app.insert_resource(fallback);
  }

  app.run();
}
