use thiserror::Error;

use super::RaidRoom;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("region {region} is claimed by both {first:?} and {second:?}")]
    DuplicateRegion {
        region: i32,
        first: RaidRoom,
        second: RaidRoom,
    },

    #[error("room {0:?} has no regions")]
    EmptyRoom(RaidRoom),
}
