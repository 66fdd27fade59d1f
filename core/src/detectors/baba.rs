//! Ba-Ba
//!
//! - Slam: instant tile hit.
//! - Banana: slip animation or graphic on a raider, with a short cooldown so one
//!   slip is not counted twice.
//! - Falling boulders: shadows land after a fixed delay; confirmed with a
//!   hitsplat, and only while rubble exists. Raiders being knocked back cannot
//!   take the hit.
//! - Projectile boulders: Ba-Ba's throw animation starts a volley that lands 7
//!   ticks later. Raiders sheltering behind a rubble take a small hit; anyone else
//!   takes a large one. When a sheltered raider takes several hits that tick, the
//!   rubble's own hitsplat count decides who was actually covered.

use hashbrown::{HashMap, HashSet};
use phf::phf_map;

use crate::context::ParticipantId;
use crate::encounter::Raider;
use crate::game_data::{Mistake, RaidRoom};
use crate::tracking::{ActivationTracker, DelayedScheduler, HitsplatLedger, InstantScheduler};
use crate::world::{Actor, EventKind, Tick, Tile, WorldEvent};

use super::{DetectorContext, DetectorError, DetectorId, MistakeDetector, is_npc_named};

/// Falling boulder shadow graphic -> ticks until it lands
static FALLING_BOULDER_DELAYS: phf::Map<i32, i32> = phf_map! {
    2250i32 => 6,
    2251i32 => 4,
};

const BABA_SLAM_GRAPHICS_ID: i32 = 1103;
const BANANA_SLIP_ANIMATION_ID: i32 = 4030;
const BANANA_GRAPHICS_ID: i32 = 1575;
const PLAYER_KNOCK_BACK_ANIMATION_ID: i32 = 9799;
const RUBBLE_EXPLOSION_GRAPHICS_ID: i32 = 1463;
const BABA_PROJECTILE_BOULDER_ANIMATION_ID: i32 = 9744;
const PROJECTILE_BOULDER_DELAY_TICKS: Tick = 7;
const RUBBLE_SAFE_TILES_LENGTH: i32 = 5;
const RUBBLE_NAME: &str = "Rubble";
const BABA_NAME: &str = "Ba-Ba";

#[derive(Debug, Default)]
pub struct BabaDetector {
    slam_tiles: InstantScheduler<Tile>,

    slipping: HashSet<ParticipantId>,
    /// Raider -> tick of their last counted slip
    last_slip: HashMap<ParticipantId, Tick>,
    /// Raider -> latest animation
    animations: HashMap<ParticipantId, i32>,

    falling_boulder_tiles: DelayedScheduler<Tile>,
    falling_boulder_hits: HitsplatLedger,

    /// Volley landing ticks; the payload is only a timing marker
    projectile_volleys: DelayedScheduler<Tick>,
    /// Raider -> positive damage amounts this tick
    projectile_hits: HashMap<ParticipantId, Vec<i32>>,
    /// Rubble npc index -> tiles covered by it
    safe_rubble_tiles: HashMap<u32, HashSet<Tile>>,
    /// Rubble npc index -> explosion hitsplats this tick
    rubble_hitsplats: HashMap<u32, u32>,
}

impl BabaDetector {
    pub fn new() -> Self {
        Self::default()
    }

    fn safe_tiles_for_rubble(south_west: Tile) -> HashSet<Tile> {
        south_west
            .dx(-1)
            .dy(-1)
            .square_from_south_west(RUBBLE_SAFE_TILES_LENGTH)
            .collect()
    }

    /// Rubble whose cover includes the raider's previous tile
    fn standing_rubble(&self, raider: &Raider) -> Option<u32> {
        self.safe_rubble_tiles
            .iter()
            .find(|(_, tiles)| raider.was_in(tiles))
            .map(|(index, _)| *index)
    }

    fn is_slip(&self, raider: &Raider, ctx: &DetectorContext<'_>) -> bool {
        if !self.slipping.contains(&raider.name) {
            return false;
        }
        let cooldown = ctx.thresholds.banana_slip_cooldown_ticks;
        let recently_slipped = self
            .last_slip
            .get(&raider.name)
            .is_some_and(|&tick| ctx.tick - tick <= cooldown);
        !recently_slipped
    }

    fn is_falling_boulder(&mut self, raider: &Raider) -> bool {
        if self.animations.get(&raider.name) == Some(&PLAYER_KNOCK_BACK_ANIMATION_ID) {
            return false;
        }
        if !self.falling_boulder_hits.pop_hit(raider.name) {
            return false;
        }
        // No rubble left means the room is finishing
        raider.was_in(self.falling_boulder_tiles.active()) && !self.safe_rubble_tiles.is_empty()
    }

    fn is_projectile_boulder(&self, raider: &Raider, ctx: &DetectorContext<'_>) -> bool {
        if self.projectile_volleys.active().is_empty() || self.safe_rubble_tiles.is_empty() {
            return false;
        }

        // No hitsplat at all, e.g. the boss died mid-volley
        let Some(hits) = self.projectile_hits.get(&raider.name) else {
            return false;
        };

        let Some(rubble) = self.standing_rubble(raider) else {
            return true;
        };

        let threshold = ctx.thresholds.projectile_boulder_damage;
        let is_large = |amount: &i32| *amount > threshold;

        if let [only] = hits.as_slice() {
            return is_large(only);
        }
        if !hits.iter().any(is_large) {
            return false;
        }
        if hits.iter().all(is_large) {
            return true;
        }

        // Mixed small and large hits (baboons, Ba-Ba herself). Resolve against the
        // other raiders sheltering behind the same rubble.
        let sharing: Vec<ParticipantId> = ctx
            .raiders
            .iter()
            .filter(|other| other.name != raider.name && !other.is_dead())
            .filter(|other| self.standing_rubble(other) == Some(rubble))
            .map(|other| other.name)
            .collect();
        if sharing.is_empty() {
            return false;
        }

        let sharing_hits: Vec<&Vec<i32>> = sharing
            .iter()
            .filter_map(|name| self.projectile_hits.get(name))
            .collect();
        if sharing_hits.iter().any(|hits| hits.len() != 1) {
            return false;
        }

        let Some(&rubble_hits) = self.rubble_hitsplats.get(&rubble) else {
            return false;
        };
        let safe_raiders = sharing_hits
            .iter()
            .filter(|hits| !hits.iter().any(is_large))
            .count() as u32;

        // Every rubble hit is already accounted for by another raider
        rubble_hits == safe_raiders
    }
}

impl MistakeDetector for BabaDetector {
    fn id(&self) -> DetectorId {
        DetectorId::Baba
    }

    fn room(&self) -> Option<RaidRoom> {
        Some(RaidRoom::Baba)
    }

    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::GraphicsObjectCreated,
            EventKind::NpcSpawned,
            EventKind::NpcDespawned,
            EventKind::AnimationChanged,
            EventKind::HitsplatApplied,
        ]
    }

    fn cleanup(&mut self) {
        self.slam_tiles.clear();
        self.slipping.clear();
        self.last_slip.clear();
        self.animations.clear();
        self.falling_boulder_tiles.clear();
        self.falling_boulder_hits.clear();
        self.projectile_volleys.clear();
        self.projectile_hits.clear();
        self.safe_rubble_tiles.clear();
        self.rubble_hitsplats.clear();
    }

    fn handle_event(&mut self, event: &WorldEvent, ctx: &DetectorContext<'_>) {
        match event {
            WorldEvent::GraphicsObjectCreated {
                graphics_id, tile, ..
            } => {
                if *graphics_id == BABA_SLAM_GRAPHICS_ID {
                    self.slam_tiles.add(*tile);
                } else if let Some(delay) = FALLING_BOULDER_DELAYS.get(graphics_id) {
                    self.falling_boulder_tiles.schedule(ctx.tick + delay, *tile);
                }
            }
            WorldEvent::NpcSpawned { npc, tile } if is_npc_named(&Actor::Npc(*npc), RUBBLE_NAME) => {
                self.safe_rubble_tiles
                    .insert(npc.index, Self::safe_tiles_for_rubble(*tile));
            }
            WorldEvent::NpcDespawned { npc, .. } if is_npc_named(&Actor::Npc(*npc), RUBBLE_NAME) => {
                self.safe_rubble_tiles.remove(&npc.index);
            }
            WorldEvent::AnimationChanged {
                actor,
                animation_id,
                graphic_id,
            } => {
                if let Some(name) = ctx.raider_name(actor) {
                    self.animations.insert(name, *animation_id);
                    if *animation_id == BANANA_SLIP_ANIMATION_ID || *graphic_id == BANANA_GRAPHICS_ID {
                        self.slipping.insert(name);
                    }
                } else if *animation_id == BABA_PROJECTILE_BOULDER_ANIMATION_ID
                    && is_npc_named(actor, BABA_NAME)
                {
                    let lands = ctx.tick + PROJECTILE_BOULDER_DELAY_TICKS;
                    self.projectile_volleys.schedule(lands, lands);
                }
            }
            WorldEvent::HitsplatApplied {
                target,
                kind,
                amount,
                target_graphic,
                ..
            } => {
                if let Some(name) = ctx.raider_name(target) {
                    self.falling_boulder_hits.record_hit(name);
                    if kind.is_damage() && *amount > 0 {
                        self.projectile_hits.entry(name).or_default().push(*amount);
                    }
                } else if let Some(npc) = target.npc()
                    && is_npc_named(target, RUBBLE_NAME)
                {
                    if *target_graphic == RUBBLE_EXPLOSION_GRAPHICS_ID {
                        *self.rubble_hitsplats.entry(npc.index).or_insert(0) += 1;
                    } else {
                        // Phase transition: every volley in flight is cancelled
                        self.projectile_volleys.clear();
                    }
                }
            }
            _ => {}
        }
    }

    fn on_tick(&mut self, ctx: &DetectorContext<'_>) {
        self.slam_tiles.advance(ctx.tick);
        self.falling_boulder_tiles.advance(ctx.tick);
        self.projectile_volleys.advance(ctx.tick);
    }

    fn detect(
        &mut self,
        raider: &Raider,
        ctx: &DetectorContext<'_>,
    ) -> Result<Vec<Mistake>, DetectorError> {
        let mut mistakes = Vec::new();

        if raider.was_in(self.slam_tiles.active()) {
            mistakes.push(Mistake::BabaSlam);
        }

        if self.is_slip(raider, ctx) {
            mistakes.push(Mistake::BabaBanana);
            self.last_slip.insert(raider.name, ctx.tick);
        }

        if self.is_falling_boulder(raider) {
            mistakes.push(Mistake::BabaFallingBoulder);
        }

        if self.is_projectile_boulder(raider, ctx) {
            mistakes.push(Mistake::BabaProjectileBoulder);
        }

        Ok(mistakes)
    }

    fn after_detect(&mut self) {
        self.slipping.clear();
        self.falling_boulder_hits.clear();
        self.projectile_hits.clear();
        self.rubble_hitsplats.clear();
    }

    fn tracked_tiles(&self) -> Vec<Tile> {
        self.slam_tiles
            .active()
            .iter()
            .chain(self.falling_boulder_tiles.active())
            .copied()
            .collect()
    }
}
