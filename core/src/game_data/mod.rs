mod error;
mod mistakes;
mod rooms;

pub use error::RegistryError;
pub use mistakes::Mistake;
pub use rooms::{RaidRoom, RoomRegistry, TOMBS_ROOMS, is_pre_raid_lobby, room_for_region};
