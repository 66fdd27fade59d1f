//! Deaths, in every room of the raid

use hashbrown::HashSet;

use crate::context::ParticipantId;
use crate::encounter::Raider;
use crate::game_data::{Mistake, RaidRoom};
use crate::world::{EventKind, WorldEvent};

use super::{DetectorContext, DetectorError, DetectorId, MistakeDetector};

/// Credits `Death` plus the path death for the current room.
#[derive(Debug, Default)]
pub struct DeathDetector {
    deaths: HashSet<ParticipantId>,
}

impl DeathDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MistakeDetector for DeathDetector {
    fn id(&self) -> DetectorId {
        DetectorId::Death
    }

    fn room(&self) -> Option<RaidRoom> {
        None
    }

    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::ActorDeath]
    }

    fn cleanup(&mut self) {
        self.deaths.clear();
    }

    fn handle_event(&mut self, event: &WorldEvent, ctx: &DetectorContext<'_>) {
        if let WorldEvent::ActorDeath { actor } = event
            && let Some(name) = ctx.raider_name(actor)
        {
            self.deaths.insert(name);
        }
    }

    fn detect(
        &mut self,
        raider: &Raider,
        ctx: &DetectorContext<'_>,
    ) -> Result<Vec<Mistake>, DetectorError> {
        if !self.deaths.contains(&raider.name) {
            return Ok(Vec::new());
        }

        let room_death = ctx
            .room
            .and_then(Mistake::room_death)
            .ok_or(DetectorError::UnknownRoomDeath { room: ctx.room })?;
        Ok(vec![Mistake::Death, room_death])
    }

    fn after_detect(&mut self) {
        self.deaths.clear();
    }
}
