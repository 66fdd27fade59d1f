//! Raid participants and their position history

mod raider;

#[cfg(test)]
mod raider_tests;

pub use raider::{GHOST_POSE_IDS, ParticipantRegistry, Raider, RosterLoad};
