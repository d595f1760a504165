//! Developer console with camera directives, map switching and event
//! removal.

pub mod commands;

use bevy::prelude::*;
use bevy_console::{AddConsoleCommand, ConsoleConfiguration, ConsoleOpen, ConsolePlugin};
use commands::{
  CamFollowCommand, CamSetCommand, EraseEventCommand, MapCommand, ScrollMapCommand,
  cam_follow_command, cam_set_command, erase_event_command, map_command, scroll_map_command,
};

/// Run condition that returns true while the console is hidden.
pub fn console_closed(open: Res<ConsoleOpen>) -> bool {
  !open.open
}

pub struct ConsolePlugins;

impl Plugin for ConsolePlugins {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(ConsolePlugin)
      .insert_resource(ConsoleConfiguration {
        keys: vec![KeyCode::Backquote, KeyCode::F12],
        ..default()
      })
      .add_console_command::<CamSetCommand, _>(cam_set_command)
      .add_console_command::<CamFollowCommand, _>(cam_follow_command)
      .add_console_command::<ScrollMapCommand, _>(scroll_map_command)
      .add_console_command::<MapCommand, _>(map_command)
      .add_console_command::<EraseEventCommand, _>(erase_event_command);
  }
}
