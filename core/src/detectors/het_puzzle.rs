//! Path of Het puzzle: light beams and dark orbs

use crate::context::ParticipantId;
use crate::encounter::Raider;
use crate::game_data::{Mistake, RaidRoom};
use crate::tracking::{ActivationTracker, DelayedMistakes, HitsplatLedger, InstantScheduler};
use crate::world::{EventKind, Tile, WorldEvent};

use super::{DetectorContext, DetectorError, DetectorId, MistakeDetector};

const LIGHT_BEAM_GRAPHICS_IDS: [i32; 2] = [2064, 2114];
const ORB_OF_DARKNESS_GRAPHICS_ID: i32 = 379;
/// The beam lands a tick after its graphic is seen on the raider's tile
const LIGHT_HIT_DELAY_TICKS: i32 = 1;

#[derive(Debug, Default)]
pub struct HetPuzzleDetector {
    orb_tiles: InstantScheduler<Tile>,
    light_tiles: InstantScheduler<Tile>,
    hitsplats: HitsplatLedger,
    delayed: DelayedMistakes,
}

impl HetPuzzleDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MistakeDetector for HetPuzzleDetector {
    fn id(&self) -> DetectorId {
        DetectorId::HetPuzzle
    }

    fn room(&self) -> Option<RaidRoom> {
        Some(RaidRoom::HetPuzzle)
    }

    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::GraphicsObjectCreated, EventKind::HitsplatApplied]
    }

    fn cleanup(&mut self) {
        self.orb_tiles.clear();
        self.light_tiles.clear();
        self.hitsplats.clear();
        self.delayed.clear();
    }

    fn handle_event(&mut self, event: &WorldEvent, ctx: &DetectorContext<'_>) {
        match event {
            WorldEvent::GraphicsObjectCreated {
                graphics_id, tile, ..
            } => {
                if *graphics_id == ORB_OF_DARKNESS_GRAPHICS_ID {
                    self.orb_tiles.add(*tile);
                } else if LIGHT_BEAM_GRAPHICS_IDS.contains(graphics_id) {
                    self.light_tiles.add(*tile);
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
        self.orb_tiles.advance(ctx.tick);
        self.light_tiles.advance(ctx.tick);
    }

    fn detect(
        &mut self,
        raider: &Raider,
        ctx: &DetectorContext<'_>,
    ) -> Result<Vec<Mistake>, DetectorError> {
        let mut mistakes = Vec::new();
        let name: ParticipantId = raider.name;

        // Several raiders can share the orb tile; only the one with a hitsplat was hit
        if raider.was_in(self.orb_tiles.active()) && self.hitsplats.pop_hit(name) {
            mistakes.push(Mistake::HetPuzzleDarkOrb);
        }

        if raider.was_in(self.light_tiles.active()) {
            self.delayed
                .add(name, Mistake::HetPuzzleLight, ctx.tick, LIGHT_HIT_DELAY_TICKS);
        }

        mistakes.extend(self.delayed.pop_due(name, ctx.tick));
        Ok(mistakes)
    }

    fn after_detect(&mut self) {
        self.hitsplats.clear();
    }

    fn tracked_tiles(&self) -> Vec<Tile> {
        self.orb_tiles
            .active()
            .iter()
            .chain(self.light_tiles.active())
            .copied()
            .collect()
    }
}
