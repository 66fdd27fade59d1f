//! Raid progress state machine
//!
//! Resolves the observer's region to a room once per tick and emits transitions.
//! Also owns the raider roster, since roster loading is gated on raid membership.

use crate::encounter::{ParticipantRegistry, RosterLoad};
use crate::game_data::{RaidRoom, RoomRegistry, is_pre_raid_lobby};
use crate::signal_processor::signal::RaidSignal;
use crate::world::{ChatKind, Tick, WorldEvent, WorldView, remove_tags};

/// Game broadcast sent when the party fails a room
pub const WIPE_MESSAGE_PREFIX: &str = "Your party failed to complete the challenge";

pub struct RaidProgressTracker {
    rooms: RoomRegistry,
    current_room: Option<RaidRoom>,
    previous_room: Option<RaidRoom>,
    in_raid: bool,
    raiders: ParticipantRegistry,
}

impl Default for RaidProgressTracker {
    fn default() -> Self {
        Self::new(RoomRegistry::tombs())
    }
}

impl RaidProgressTracker {
    pub fn new(rooms: RoomRegistry) -> Self {
        Self {
            rooms,
            current_room: None,
            previous_room: None,
            in_raid: false,
            raiders: ParticipantRegistry::new(),
        }
    }

    pub fn current_room(&self) -> Option<RaidRoom> {
        self.current_room
    }

    pub fn previous_room(&self) -> Option<RaidRoom> {
        self.previous_room
    }

    pub fn in_raid(&self) -> bool {
        self.in_raid
    }

    pub fn raiders(&self) -> &ParticipantRegistry {
        &self.raiders
    }

    pub fn raiders_mut(&mut self) -> &mut ParticipantRegistry {
        &mut self.raiders
    }

    /// Per-tick update. Runs after the client has settled the tick and before any
    /// detector evaluates it.
    pub fn update(&mut self, tick: Tick, world: &dyn WorldView) -> Vec<RaidSignal> {
        let mut signals = Vec::new();

        if let Some(region) = world.local_region()
            && let Some(room) = self.rooms.room_for_region(region)
            && self.current_room != Some(room)
        {
            signals.extend(self.room_changed(room, tick));
        }

        if !self.in_raid {
            self.raiders.clear();
            return signals;
        }

        // Roster is not readable until the HUD is initialized and every raider is
        // in the scene, so keep trying
        if self.raiders.is_empty() {
            signals.extend(self.try_load_roster(tick, world));
        }

        signals
    }

    /// Consume the world events the tracker cares about.
    pub fn handle_event(
        &mut self,
        event: &WorldEvent,
        tick: Tick,
        world: &dyn WorldView,
    ) -> Vec<RaidSignal> {
        match event {
            WorldEvent::Loading => {
                // Nobody is still dead once the scene reloads
                self.raiders.clear_dead();
                Vec::new()
            }
            WorldEvent::RosterUpdated if self.in_raid => self.try_load_roster(tick, world),
            WorldEvent::ChatMessage {
                kind: ChatKind::Game,
                text,
                ..
            } if self.in_raid && remove_tags(text).starts_with(WIPE_MESSAGE_PREFIX) => {
                tracing::info!(tick, room = ?self.current_room, "Party wiped");
                vec![RaidSignal::Wiped {
                    room: self.current_room,
                    tick,
                }]
            }
            _ => Vec::new(),
        }
    }

    /// Forget everything. Used when the observer disconnects or the engine shuts down.
    pub fn reset(&mut self) {
        self.current_room = None;
        self.previous_room = None;
        self.in_raid = false;
        self.raiders.clear();
    }

    fn room_changed(&mut self, room: RaidRoom, tick: Tick) -> Vec<RaidSignal> {
        let mut signals = Vec::new();

        self.previous_room = self.current_room;
        self.current_room = Some(room);
        tracing::debug!(tick, ?room, previous = ?self.previous_room, "New room");

        let in_raid = !is_pre_raid_lobby(room);
        if in_raid != self.in_raid {
            tracing::info!(tick, in_raid, "Raid membership changed");
            self.in_raid = in_raid;
            signals.push(RaidSignal::InRaidChanged { in_raid, tick });
        }

        if self.previous_room == Some(RaidRoom::LobbyOutside) && room == RaidRoom::LobbyInside {
            tracing::info!(tick, "Raid entered");
            signals.push(RaidSignal::RaidEntered { tick });
        } else {
            signals.push(RaidSignal::RoomChanged {
                previous: self.previous_room,
                current: room,
                tick,
            });
        }

        signals
    }

    fn try_load_roster(&mut self, tick: Tick, world: &dyn WorldView) -> Vec<RaidSignal> {
        match self.raiders.try_load(world) {
            RosterLoad::Loaded(raiders) => {
                tracing::info!(tick, count = raiders.len(), "Loaded raiders");
                vec![RaidSignal::RosterLoaded { raiders, tick }]
            }
            RosterLoad::Incomplete { expected, found } => {
                tracing::debug!(tick, expected, found, "Not enough raiders loaded, retrying");
                Vec::new()
            }
        }
    }
}
