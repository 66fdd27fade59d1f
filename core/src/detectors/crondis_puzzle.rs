//! Path of Crondis puzzle: low watering
//!
//! A raider fills a jug at a waterfall, carries it to the palm and pours. Taking
//! damage on the way spills water, and the palm then shows a water hitsplat
//! under the full amount. When two raiders pour on the same tick, each low
//! hitsplat is matched to a pouring raider who took damage since filling.
//!
//! Filling and pouring are attributed by where the raider stands on the tick the
//! pouring animation plays, so this rule reads the current tile.

use hashbrown::HashSet;

use crate::context::ParticipantId;
use crate::encounter::Raider;
use crate::game_data::{Mistake, RaidRoom};
use crate::world::{EventKind, HitsplatKind, RegionId, Tile, WorldEvent};

use super::{DetectorContext, DetectorError, DetectorId, MistakeDetector, is_npc_named};

/// Waterfall tiles in region-local coordinates
const WATERFALL_REGION_TILES: [(i32, i32); 16] = [
    // SW
    (23, 7),
    (24, 7),
    (26, 7),
    (27, 7),
    // SE
    (37, 7),
    (38, 7),
    (40, 7),
    (41, 7),
    // NW
    (23, 57),
    (24, 57),
    (26, 57),
    (27, 57),
    // NE
    (37, 57),
    (38, 57),
    (40, 57),
    (41, 57),
];

/// Tiles around the palm a raider pours from, in region-local coordinates
const PALM_TREE_REGION_TILES: [(i32, i32); 20] = [
    // S
    (30, 29),
    (31, 29),
    (32, 29),
    (33, 29),
    (34, 29),
    // E
    (35, 30),
    (35, 31),
    (35, 32),
    (35, 33),
    (35, 34),
    // N
    (30, 35),
    (31, 35),
    (32, 35),
    (33, 35),
    (34, 35),
    // W
    (29, 30),
    (29, 31),
    (29, 32),
    (29, 33),
    (29, 34),
];

const PALM_TREE_NAME: &str = "Palm of Resourcefulness";
const PLAYER_WATER_ANIMATION_ID: i32 = 827;
const FULL_WATER_AMOUNT: i32 = 100;

#[derive(Debug, Default)]
pub struct CrondisPuzzleDetector {
    /// Resolved once the local player's region is known
    waterfall_tiles: HashSet<Tile>,
    palm_tiles: HashSet<Tile>,

    animating: HashSet<ParticipantId>,
    with_water: HashSet<ParticipantId>,
    lost_water: HashSet<ParticipantId>,
    watering: HashSet<ParticipantId>,
    low_water_hitsplats: u32,
}

impl CrondisPuzzleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the puzzle layout in the instance the local player is standing in.
    fn resolve_tiles(&mut self, ctx: &DetectorContext<'_>) {
        let Some(region) = ctx
            .world
            .local_player_name()
            .and_then(|name| ctx.world.participant_position(&name))
            .map(|tile| tile.region_id())
        else {
            return;
        };
        self.waterfall_tiles = layout(region, &WATERFALL_REGION_TILES);
        self.palm_tiles = layout(region, &PALM_TREE_REGION_TILES);
        tracing::debug!(tick = ctx.tick, region, "Crondis puzzle tiles resolved");
    }

    fn track_interaction(&mut self, raider: &Raider) {
        let Some(tile) = raider.current_position else {
            return;
        };
        if self.waterfall_tiles.contains(&tile) {
            self.with_water.insert(raider.name);
            self.lost_water.remove(&raider.name);
        } else if self.palm_tiles.contains(&tile) {
            self.watering.insert(raider.name);
        }
    }
}

fn layout(region: RegionId, tiles: &[(i32, i32)]) -> HashSet<Tile> {
    tiles
        .iter()
        .map(|&(x, y)| Tile::from_region(region, x, y, 0))
        .collect()
}

impl MistakeDetector for CrondisPuzzleDetector {
    fn id(&self) -> DetectorId {
        DetectorId::CrondisPuzzle
    }

    fn room(&self) -> Option<RaidRoom> {
        Some(RaidRoom::CrondisPuzzle)
    }

    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::AnimationChanged, EventKind::HitsplatApplied]
    }

    fn cleanup(&mut self) {
        self.waterfall_tiles.clear();
        self.palm_tiles.clear();
        self.animating.clear();
        self.with_water.clear();
        self.lost_water.clear();
        self.watering.clear();
        self.low_water_hitsplats = 0;
    }

    fn handle_event(&mut self, event: &WorldEvent, ctx: &DetectorContext<'_>) {
        match event {
            WorldEvent::AnimationChanged {
                actor,
                animation_id: PLAYER_WATER_ANIMATION_ID,
                ..
            } => {
                if let Some(name) = ctx.raider_name(actor) {
                    self.animating.insert(name);
                }
            }
            WorldEvent::HitsplatApplied {
                target,
                kind,
                amount,
                ..
            } => {
                if let Some(name) = ctx.raider_name(target) {
                    if self.with_water.contains(&name) && kind.is_damage() {
                        self.lost_water.insert(name);
                    }
                } else if is_npc_named(target, PALM_TREE_NAME)
                    && *kind == HitsplatKind::Water
                    && *amount < FULL_WATER_AMOUNT
                {
                    self.low_water_hitsplats += 1;
                }
            }
            _ => {}
        }
    }

    fn on_tick(&mut self, ctx: &DetectorContext<'_>) {
        if self.palm_tiles.is_empty() {
            self.resolve_tiles(ctx);
        }
    }

    fn detect(
        &mut self,
        raider: &Raider,
        _ctx: &DetectorContext<'_>,
    ) -> Result<Vec<Mistake>, DetectorError> {
        if self.animating.contains(&raider.name) {
            self.track_interaction(raider);
        }

        let mut mistakes = Vec::new();
        if self.watering.contains(&raider.name) {
            if self.low_water_hitsplats > 0 && self.lost_water.contains(&raider.name) {
                mistakes.push(Mistake::CrondisPuzzleLowWater);
                self.low_water_hitsplats -= 1;
            }
            self.with_water.remove(&raider.name);
            self.lost_water.remove(&raider.name);
        }
        Ok(mistakes)
    }

    fn after_detect(&mut self) {
        self.animating.clear();
        self.watering.clear();
        self.low_water_hitsplats = 0;
    }
}
