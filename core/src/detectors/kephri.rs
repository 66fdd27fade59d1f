//! Kephri bombs
//!
//! Bomb shadows land a fixed number of ticks after they appear, depending on the
//! shadow graphic. Bombs deal no damage while Kephri sits at 0 health between
//! phases, and nothing counts once she is dead.

use phf::phf_map;

use crate::encounter::Raider;
use crate::game_data::{Mistake, RaidRoom};
use crate::tracking::{ActivationTracker, DelayedScheduler};
use crate::world::{Actor, EventKind, Tile, WorldEvent};

use super::{DetectorContext, DetectorError, DetectorId, MistakeDetector, is_npc_named};

/// Shadow graphics id -> ticks until the bomb lands
static BOMB_SHADOW_DELAYS: phf::Map<i32, i32> = phf_map! {
    1447i32 => 4,
    1446i32 => 3,
    2111i32 => 2,
};

const KEPHRI_NAME: &str = "Kephri";
const KEPHRI_PHASE_IDS: [i32; 3] = [11719, 11720, 11721];
const KEPHRI_DEAD_ID: i32 = 11722;
/// Health ratio before the first hitsplat of a phase is seen
const UNKNOWN_HEALTH: i32 = -1;

#[derive(Debug)]
pub struct KephriDetector {
    bomb_tiles: DelayedScheduler<Tile>,
    /// Health ratio as of the last tick boundary
    health: i32,
    /// Latest health ratio reported by a hitsplat this tick
    pending_health: Option<i32>,
    /// Kephri died; ignore everything until the next startup
    finished: bool,
}

impl Default for KephriDetector {
    fn default() -> Self {
        Self {
            bomb_tiles: DelayedScheduler::new(),
            health: UNKNOWN_HEALTH,
            pending_health: None,
            finished: false,
        }
    }
}

impl KephriDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn is_phase_transition(old_id: i32, new_id: i32) -> bool {
        old_id != new_id && KEPHRI_PHASE_IDS.contains(&old_id) && KEPHRI_PHASE_IDS.contains(&new_id)
    }
}

impl MistakeDetector for KephriDetector {
    fn id(&self) -> DetectorId {
        DetectorId::Kephri
    }

    fn room(&self) -> Option<RaidRoom> {
        Some(RaidRoom::Kephri)
    }

    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::GraphicsObjectCreated,
            EventKind::NpcChanged,
            EventKind::HitsplatApplied,
        ]
    }

    fn cleanup(&mut self) {
        self.bomb_tiles.clear();
        self.health = UNKNOWN_HEALTH;
        self.pending_health = None;
        self.finished = false;
    }

    fn handle_event(&mut self, event: &WorldEvent, ctx: &DetectorContext<'_>) {
        if self.finished {
            return;
        }

        match event {
            WorldEvent::GraphicsObjectCreated {
                graphics_id, tile, ..
            } => {
                if let Some(delay) = BOMB_SHADOW_DELAYS.get(graphics_id) {
                    self.bomb_tiles.schedule(ctx.tick + delay, *tile);
                }
            }
            WorldEvent::NpcChanged { npc, old_id } if is_npc_named(&Actor::Npc(*npc), KEPHRI_NAME) => {
                if Self::is_phase_transition(*old_id, npc.id) {
                    // Non-zero until the next hitsplat reports the real ratio
                    self.health = UNKNOWN_HEALTH;
                    self.pending_health = None;
                } else if npc.id == KEPHRI_DEAD_ID {
                    tracing::debug!(tick = ctx.tick, "Kephri dead, ignoring remaining bombs");
                    self.cleanup();
                    self.finished = true;
                }
            }
            WorldEvent::HitsplatApplied {
                target,
                health_ratio: Some(ratio),
                ..
            } if is_npc_named(target, KEPHRI_NAME) => {
                self.pending_health = Some(*ratio);
            }
            _ => {}
        }
    }

    fn on_tick(&mut self, ctx: &DetectorContext<'_>) {
        if let Some(ratio) = self.pending_health.take() {
            self.health = ratio;
        }
        self.bomb_tiles.advance(ctx.tick);
    }

    fn detect(
        &mut self,
        raider: &Raider,
        _ctx: &DetectorContext<'_>,
    ) -> Result<Vec<Mistake>, DetectorError> {
        if self.health == 0 || !raider.was_in(self.bomb_tiles.active()) {
            return Ok(Vec::new());
        }
        Ok(vec![Mistake::KephriBomb])
    }

    fn tracked_tiles(&self) -> Vec<Tile> {
        self.bomb_tiles.active().iter().copied().collect()
    }
}
