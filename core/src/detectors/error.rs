use thiserror::Error;

use crate::game_data::RaidRoom;

use super::DetectorId;

/// Invariant violations raised while a detector evaluates a raider.
///
/// The manager logs these and treats them as "no mistake" for that detector and
/// raider; evaluation of everything else continues.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("death in a room without a room death: {room:?}")]
    UnknownRoomDeath { room: Option<RaidRoom> },

    #[error("{detector:?} evaluated outside its room (current room {room:?})")]
    WrongRoom {
        detector: DetectorId,
        room: Option<RaidRoom>,
    },
}
