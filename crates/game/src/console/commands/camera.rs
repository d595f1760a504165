//! Camera directive commands.
//!
//! Arguments are passed through unparsed so the console accepts exactly what
//! map scripts accept.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy_console::{ConsoleCommand, reply};
use clap::Parser;
use tile_camera::CameraDirective;

#[derive(Parser, ConsoleCommand)]
#[command(name = "CamSet")]
pub struct CamSetCommand {
  /// player | event <id> | <x> <y>
  #[arg(allow_hyphen_values = true)]
  args: Vec<String>,
}

#[derive(Parser, ConsoleCommand)]
#[command(name = "CamFollow")]
pub struct CamFollowCommand {
  /// player | event <id> | map | <x> <y>
  #[arg(allow_hyphen_values = true)]
  args: Vec<String>,
}

#[derive(Parser, ConsoleCommand)]
#[command(name = "ScrollMap")]
pub struct ScrollMapCommand {
  /// <direction> <distance> [speed]
  #[arg(allow_hyphen_values = true)]
  args: Vec<String>,
}

/// Parses and queues one directive. Returns the console reply.
fn issue(directives: &mut MessageWriter<CameraDirective>, command: &str, args: &[String]) -> String {
  match CameraDirective::from_command(command, args) {
    Ok(directive) => {
      directives.write(directive);
      directive.to_string()
    }
    Err(err) => {
      warn!("{} {}: {}", command, args.join(" "), err);
      format!("{}: {}", command, err)
    }
  }
}

pub fn cam_set_command(
  mut log: ConsoleCommand<CamSetCommand>,
  mut directives: MessageWriter<CameraDirective>,
) {
  if let Some(Ok(CamSetCommand { args })) = log.take() {
    let response = issue(&mut directives, "CamSet", &args);
    reply!(log, "{}", response);
  }
}

pub fn cam_follow_command(
  mut log: ConsoleCommand<CamFollowCommand>,
  mut directives: MessageWriter<CameraDirective>,
) {
  if let Some(Ok(CamFollowCommand { args })) = log.take() {
    let response = issue(&mut directives, "CamFollow", &args);
    reply!(log, "{}", response);
  }
}

pub fn scroll_map_command(
  mut log: ConsoleCommand<ScrollMapCommand>,
  mut directives: MessageWriter<CameraDirective>,
) {
  if let Some(Ok(ScrollMapCommand { args })) = log.take() {
    let response = issue(&mut directives, "ScrollMap", &args);
    reply!(log, "{}", response);
  }
}
