//! Zebak
//!
//! Acid pools persist from the tick after they spawn. Blood clouds heal on the
//! tile a raider failed to clear. Earthquake graphics only hurt while Zebak is
//! mid-scream.

use hashbrown::HashSet;

use crate::encounter::Raider;
use crate::game_data::{Mistake, RaidRoom};
use crate::tracking::{ActivationTracker, InstantScheduler};
use crate::world::{EventKind, HitsplatKind, Tile, WorldEvent};

use super::{DetectorContext, DetectorError, DetectorId, MistakeDetector, is_npc_named};

const ACID_TILE_GAME_OBJECT_IDS: [i32; 7] = [45570, 45571, 45572, 45573, 45574, 45575, 45576];
const EARTHQUAKE_GRAPHICS_ID: i32 = 2184;
const ZEBAK_SCREAM_ANIMATION_ID: i32 = 9628;
const ZEBAK_NAME: &str = "Zebak";
const BLOOD_CLOUD_NAME: &str = "Blood Cloud";

#[derive(Debug, Default)]
pub struct ZebakDetector {
    acid_spawning: HashSet<Tile>,
    acid_tiles: HashSet<Tile>,
    blood_heal_tiles: InstantScheduler<Tile>,
    earthquake_tiles: InstantScheduler<Tile>,
    zebak_screaming: bool,
}

impl ZebakDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MistakeDetector for ZebakDetector {
    fn id(&self) -> DetectorId {
        DetectorId::Zebak
    }

    fn room(&self) -> Option<RaidRoom> {
        Some(RaidRoom::Zebak)
    }

    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::GameObjectSpawned,
            EventKind::GameObjectDespawned,
            EventKind::HitsplatApplied,
            EventKind::GraphicsObjectCreated,
            EventKind::AnimationChanged,
        ]
    }

    fn cleanup(&mut self) {
        self.acid_spawning.clear();
        self.acid_tiles.clear();
        self.blood_heal_tiles.clear();
        self.earthquake_tiles.clear();
        self.zebak_screaming = false;
    }

    fn handle_event(&mut self, event: &WorldEvent, _ctx: &DetectorContext<'_>) {
        match event {
            WorldEvent::GameObjectSpawned { object_id, tile }
                if ACID_TILE_GAME_OBJECT_IDS.contains(object_id) =>
            {
                self.acid_spawning.insert(*tile);
            }
            WorldEvent::GameObjectDespawned { object_id, tile }
                if ACID_TILE_GAME_OBJECT_IDS.contains(object_id) =>
            {
                self.acid_spawning.remove(tile);
                self.acid_tiles.remove(tile);
            }
            WorldEvent::HitsplatApplied {
                target,
                kind: HitsplatKind::Heal,
                tile: Some(tile),
                ..
            } if is_npc_named(target, BLOOD_CLOUD_NAME) => {
                self.blood_heal_tiles.add(*tile);
            }
            WorldEvent::GraphicsObjectCreated {
                graphics_id, tile, ..
            } if *graphics_id == EARTHQUAKE_GRAPHICS_ID => {
                self.earthquake_tiles.add(*tile);
            }
            WorldEvent::AnimationChanged {
                actor,
                animation_id,
                ..
            } if is_npc_named(actor, ZEBAK_NAME) => {
                self.zebak_screaming = *animation_id == ZEBAK_SCREAM_ANIMATION_ID;
            }
            _ => {}
        }
    }

    fn on_tick(&mut self, ctx: &DetectorContext<'_>) {
        self.blood_heal_tiles.advance(ctx.tick);
        self.earthquake_tiles.advance(ctx.tick);
    }

    fn detect(
        &mut self,
        raider: &Raider,
        _ctx: &DetectorContext<'_>,
    ) -> Result<Vec<Mistake>, DetectorError> {
        let mut mistakes = Vec::new();

        if raider.was_in(&self.acid_tiles) {
            mistakes.push(Mistake::ZebakAcidTile);
        }

        if raider.was_in(self.blood_heal_tiles.active()) {
            mistakes.push(Mistake::ZebakBloodCloud);
        }

        if self.zebak_screaming && raider.was_in(self.earthquake_tiles.active()) {
            mistakes.push(Mistake::ZebakEarthquake);
        }

        Ok(mistakes)
    }

    fn after_detect(&mut self) {
        self.acid_tiles.extend(self.acid_spawning.drain());
    }

    fn tracked_tiles(&self) -> Vec<Tile> {
        self.acid_tiles
            .iter()
            .chain(self.blood_heal_tiles.active())
            .chain(self.earthquake_tiles.active())
            .copied()
            .collect()
    }
}
