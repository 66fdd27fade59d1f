use crate::context::ParticipantId;
use crate::game_data::RaidRoom;
use crate::world::Tick;

/// Signals emitted by the RaidProgressTracker.
/// These represent raid-level transitions rather than raw world events.
#[derive(Debug, Clone, PartialEq)]
pub enum RaidSignal {
    /// Raid membership flipped. Emitted before any room signal of the same update.
    InRaidChanged { in_raid: bool, tick: Tick },

    RoomChanged {
        previous: Option<RaidRoom>,
        current: RaidRoom,
        tick: Tick,
    },

    /// Walked from the pre-raid lobby into the first room. Replaces `RoomChanged`
    /// for that transition.
    RaidEntered { tick: Tick },

    /// Roster read succeeded
    RosterLoaded {
        raiders: Vec<ParticipantId>,
        tick: Tick,
    },

    /// The party failed the current room and it is resetting
    Wiped { room: Option<RaidRoom>, tick: Tick },
}

impl RaidSignal {
    pub fn tick(&self) -> Tick {
        match self {
            RaidSignal::InRaidChanged { tick, .. }
            | RaidSignal::RoomChanged { tick, .. }
            | RaidSignal::RaidEntered { tick }
            | RaidSignal::RosterLoaded { tick, .. }
            | RaidSignal::Wiped { tick, .. } => *tick,
        }
    }
}
