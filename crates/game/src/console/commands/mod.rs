//! Console commands.

mod camera;
mod map;

pub use camera::{
  CamFollowCommand, CamSetCommand, ScrollMapCommand, cam_follow_command, cam_set_command,
  scroll_map_command,
};
pub use map::{EraseEventCommand, MapCommand, erase_event_command, map_command};
