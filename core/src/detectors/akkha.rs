//! Akkha
//!
//! - Quadrant bombs: graphics objects telegraph the explosion; scheduled from
//!   their start cycle. The hourglass special reverses the animation, so its
//!   activation is computed from a shortened start and one extra tick.
//! - Elemental orbs: the orb's tile is hit when the orb NPC despawns.
//! - Unstable orb: popped graphic on the orb; confirmed with a hitsplat.

use hashbrown::HashSet;

use crate::context::{ParticipantId, resolve};
use crate::encounter::Raider;
use crate::game_data::{Mistake, RaidRoom};
use crate::tracking::{ActivationTracker, DelayedScheduler, HitsplatLedger, InstantScheduler};
use crate::world::{EventKind, Tick, Tile, WorldEvent, remove_tags, ticks_from_cycles};

use super::{DetectorContext, DetectorError, DetectorId, MistakeDetector, is_npc_named};

const FULL_HOURGLASS_GAME_OBJECT_IDS: [i32; 4] = [46064, 46065, 46066, 46067];
const QUADRANT_BOMB_GRAPHICS_IDS: [i32; 4] = [2256, 2257, 2258, 2259];
const ELEMENTAL_ORB_NAMES: [&str; 4] = [
    "Orb of Lightning",
    "Orb of Darkness",
    "Burning Orb",
    "Frozen Orb",
];
const UNSTABLE_ORB_NAME: &str = "Unstable Orb";
const UNSTABLE_ORB_POPPED_GRAPHICS_ID: i32 = 2260;
const AKKHA_NAME: &str = "Akkha";

/// 3 cycles per tile, up to 3 tiles away
const HOURGLASS_SPECIAL_SUBTRACTED_CYCLES: i32 = 9;
/// Offsets the subtraction above
const HOURGLASS_SPECIAL_HIT_DELAY_TICKS: Tick = 1;
const QUADRANT_EXPLODE_HIT_DELAY_TICKS: Tick = 0;

#[derive(Debug, Default)]
pub struct AkkhaDetector {
    akkha_present: bool,
    full_hourglasses: HashSet<(i32, Tile)>,
    /// Raiders flagged for a quadrant on the previous tick are not flagged again this tick
    quadrant_hit_last_tick: HashSet<ParticipantId>,

    quadrant_tiles: DelayedScheduler<Tile>,
    elemental_orb_tiles: InstantScheduler<Tile>,
    unstable_orb_tiles: InstantScheduler<Tile>,
    hitsplats: HitsplatLedger,
}

impl AkkhaDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A full hourglass while Akkha is in the room means the hourglass special.
    pub fn is_hourglass_special(&self) -> bool {
        self.akkha_present && !self.full_hourglasses.is_empty()
    }

    fn quadrant_activation_tick(&self, tick: Tick, cycles_until_start: i32) -> Tick {
        if self.is_hourglass_special() {
            tick + ticks_from_cycles(cycles_until_start - HOURGLASS_SPECIAL_SUBTRACTED_CYCLES)
                + HOURGLASS_SPECIAL_HIT_DELAY_TICKS
        } else {
            tick + ticks_from_cycles(cycles_until_start) + QUADRANT_EXPLODE_HIT_DELAY_TICKS
        }
    }
}

impl MistakeDetector for AkkhaDetector {
    fn id(&self) -> DetectorId {
        DetectorId::Akkha
    }

    fn room(&self) -> Option<RaidRoom> {
        Some(RaidRoom::Akkha)
    }

    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::GraphicsObjectCreated,
            EventKind::GraphicChanged,
            EventKind::GameObjectSpawned,
            EventKind::GameObjectDespawned,
            EventKind::NpcSpawned,
            EventKind::NpcDespawned,
            EventKind::HitsplatApplied,
        ]
    }

    fn cleanup(&mut self) {
        self.akkha_present = false;
        self.full_hourglasses.clear();
        self.quadrant_hit_last_tick.clear();
        self.quadrant_tiles.clear();
        self.elemental_orb_tiles.clear();
        self.unstable_orb_tiles.clear();
        self.hitsplats.clear();
    }

    fn handle_event(&mut self, event: &WorldEvent, ctx: &DetectorContext<'_>) {
        match event {
            WorldEvent::GraphicsObjectCreated {
                graphics_id,
                tile,
                cycles_until_start,
            } if QUADRANT_BOMB_GRAPHICS_IDS.contains(graphics_id) => {
                let activation = self.quadrant_activation_tick(ctx.tick, *cycles_until_start);
                self.quadrant_tiles.schedule(activation, *tile);
            }
            WorldEvent::GraphicChanged {
                actor,
                graphic_id,
                tile,
                local_tile,
            } if *graphic_id == UNSTABLE_ORB_POPPED_GRAPHICS_ID
                && is_npc_named(actor, UNSTABLE_ORB_NAME) =>
            {
                // The moving orb changes graphic a tile early; shift toward where
                // the client actually renders it
                self.unstable_orb_tiles.add(tile.step_toward(*local_tile));
            }
            WorldEvent::GameObjectSpawned { object_id, tile }
                if FULL_HOURGLASS_GAME_OBJECT_IDS.contains(object_id) =>
            {
                self.full_hourglasses.insert((*object_id, *tile));
            }
            WorldEvent::GameObjectDespawned { object_id, tile }
                if FULL_HOURGLASS_GAME_OBJECT_IDS.contains(object_id) =>
            {
                self.full_hourglasses.remove(&(*object_id, *tile));
            }
            WorldEvent::NpcSpawned { npc, .. } => {
                if remove_tags(resolve(npc.name)) == AKKHA_NAME {
                    self.akkha_present = true;
                }
            }
            WorldEvent::NpcDespawned { npc, tile, .. } => {
                let name = remove_tags(resolve(npc.name));
                if ELEMENTAL_ORB_NAMES.iter().any(|orb| *orb == name) {
                    self.elemental_orb_tiles.add(*tile);
                } else if name == AKKHA_NAME {
                    self.akkha_present = false;
                }
            }
            WorldEvent::HitsplatApplied { target, .. } => {
                if let Some(name) = ctx.raider_name(target) {
                    self.hitsplats.record_hit(name);
                }
            }
            _ => {}
        }
    }

    fn on_tick(&mut self, ctx: &DetectorContext<'_>) {
        self.quadrant_tiles.advance(ctx.tick);
        self.elemental_orb_tiles.advance(ctx.tick);
        self.unstable_orb_tiles.advance(ctx.tick);
    }

    fn detect(
        &mut self,
        raider: &Raider,
        _ctx: &DetectorContext<'_>,
    ) -> Result<Vec<Mistake>, DetectorError> {
        let mut mistakes = Vec::new();

        let on_quadrant = raider.was_in(self.quadrant_tiles.active());
        if on_quadrant && !self.quadrant_hit_last_tick.contains(&raider.name) {
            mistakes.push(Mistake::AkkhaSpecialQuadrantBomb);
            self.quadrant_hit_last_tick.insert(raider.name);
        } else {
            self.quadrant_hit_last_tick.remove(&raider.name);
        }

        if raider.was_in(self.elemental_orb_tiles.active()) {
            mistakes.push(Mistake::AkkhaSpecialElementalOrbs);
        }

        if raider.was_in(self.unstable_orb_tiles.active()) && self.hitsplats.pop_hit(raider.name) {
            mistakes.push(Mistake::AkkhaUnstableOrb);
        }

        Ok(mistakes)
    }

    fn after_detect(&mut self) {
        self.hitsplats.clear();
    }

    fn tracked_tiles(&self) -> Vec<Tile> {
        self.quadrant_tiles
            .active()
            .iter()
            .chain(self.elemental_orb_tiles.active())
            .chain(self.unstable_orb_tiles.active())
            .copied()
            .collect()
    }
}
