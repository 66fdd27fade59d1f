//! Wardens P3
//!
//! Earthquakes and Ba-Ba boulders are graphics objects that start in the future.
//! Kephri bombs and lightning appear on the tick they detonate. Akkha and Zebak
//! projectiles are checked against the target's overhead prayer; the miss is
//! decided when the projectile becomes active and reported once it lands.

use phf::phf_map;

use crate::context::resolve;
use crate::encounter::Raider;
use crate::game_data::{Mistake, RaidRoom};
use crate::tracking::{
    ActivationTracker, DelayedMistakes, DelayedScheduler, InstantScheduler, OverheadTracker,
};
use crate::world::{EventKind, Prayer, Tick, Tile, WorldEvent, ticks_from_cycles};

use super::{DetectorContext, DetectorError, DetectorId, MistakeDetector};

const EARTHQUAKE_GRAPHICS_IDS: [i32; 4] = [2220, 2221, 2222, 2223];
const KEPHRI_BOMB_GRAPHICS_IDS: [i32; 4] = [2156, 2157, 2158, 2159];
const LIGHTNING_GRAPHICS_ID: i32 = 2197;
const EARTHQUAKE_HIT_DELAY_TICKS: Tick = 0;

/// Boulder graphic -> extra ticks after it starts
static BABA_BOULDER_DELAYS: phf::Map<i32, i32> = phf_map! {
    2250i32 => 6,
    2251i32 => 4,
};

/// Projectile id -> prayer that blocks it
static AKKHA_ATTACKS: phf::Map<i32, Prayer> = phf_map! {
    2253i32 => Prayer::Magic,
    2255i32 => Prayer::Ranged,
};

static ZEBAK_ATTACKS: phf::Map<i32, Prayer> = phf_map! {
    2181i32 => Prayer::Magic,
    2187i32 => Prayer::Ranged,
};

#[derive(Debug)]
pub struct WardensP3Detector {
    earthquake_tiles: DelayedScheduler<Tile>,
    kephri_bomb_tiles: InstantScheduler<Tile>,
    baba_boulder_tiles: DelayedScheduler<Tile>,
    lightning_tiles: InstantScheduler<Tile>,
    /// Akkha's prayer check happens on the tick the projectile appears
    akkha_attacks: OverheadTracker,
    /// Zebak's prayer check happens when the projectile lands
    zebak_attacks: OverheadTracker,
    delayed: DelayedMistakes,
}

impl Default for WardensP3Detector {
    fn default() -> Self {
        Self {
            earthquake_tiles: DelayedScheduler::new(),
            kephri_bomb_tiles: InstantScheduler::new(),
            baba_boulder_tiles: DelayedScheduler::new(),
            lightning_tiles: InstantScheduler::new(),
            akkha_attacks: OverheadTracker::new(&AKKHA_ATTACKS),
            zebak_attacks: OverheadTracker::new(&ZEBAK_ATTACKS),
            delayed: DelayedMistakes::new(),
        }
    }
}

impl WardensP3Detector {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_prayer(
        tracker: &OverheadTracker,
        delayed: &mut DelayedMistakes,
        mistake: Mistake,
        raider: &Raider,
        ctx: &DetectorContext<'_>,
    ) {
        let prayer = ctx.world.overhead_prayer(resolve(raider.name));
        if !tracker.did_miss_prayer(raider.name, prayer) {
            return;
        }
        let Some(attack) = tracker.active_attack_for(raider.name) else {
            return;
        };
        let delay = (attack.lands - ctx.tick).max(0);
        delayed.add(raider.name, mistake, ctx.tick, delay);
    }
}

impl MistakeDetector for WardensP3Detector {
    fn id(&self) -> DetectorId {
        DetectorId::WardensP3
    }

    fn room(&self) -> Option<RaidRoom> {
        Some(RaidRoom::WardensP3)
    }

    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::GraphicsObjectCreated, EventKind::ProjectileMoved]
    }

    fn cleanup(&mut self) {
        self.earthquake_tiles.clear();
        self.kephri_bomb_tiles.clear();
        self.baba_boulder_tiles.clear();
        self.lightning_tiles.clear();
        self.akkha_attacks.clear();
        self.zebak_attacks.clear();
        self.delayed.clear();
    }

    fn handle_event(&mut self, event: &WorldEvent, ctx: &DetectorContext<'_>) {
        match event {
            WorldEvent::GraphicsObjectCreated {
                graphics_id,
                tile,
                cycles_until_start,
            } => {
                let starts = ctx.tick + ticks_from_cycles(*cycles_until_start);
                if EARTHQUAKE_GRAPHICS_IDS.contains(graphics_id) {
                    self.earthquake_tiles
                        .schedule(starts + EARTHQUAKE_HIT_DELAY_TICKS, *tile);
                } else if KEPHRI_BOMB_GRAPHICS_IDS.contains(graphics_id) {
                    self.kephri_bomb_tiles.add(*tile);
                } else if let Some(delay) = BABA_BOULDER_DELAYS.get(graphics_id) {
                    self.baba_boulder_tiles.schedule(starts + delay, *tile);
                } else if *graphics_id == LIGHTNING_GRAPHICS_ID {
                    self.lightning_tiles.add(*tile);
                }
            }
            WorldEvent::ProjectileMoved {
                projectile,
                target,
                remaining_cycles,
            } => {
                if self.akkha_attacks.tracks(projectile.id) {
                    self.akkha_attacks.track_projectile(
                        *projectile,
                        target.as_ref(),
                        *remaining_cycles,
                        ctx.tick,
                        ctx.tick,
                    );
                } else if self.zebak_attacks.tracks(projectile.id) {
                    let lands = ctx.tick + ticks_from_cycles(*remaining_cycles);
                    self.zebak_attacks.track_projectile(
                        *projectile,
                        target.as_ref(),
                        *remaining_cycles,
                        ctx.tick,
                        lands,
                    );
                }
            }
            _ => {}
        }
    }

    fn on_tick(&mut self, ctx: &DetectorContext<'_>) {
        self.earthquake_tiles.advance(ctx.tick);
        self.kephri_bomb_tiles.advance(ctx.tick);
        self.baba_boulder_tiles.advance(ctx.tick);
        self.lightning_tiles.advance(ctx.tick);
        self.akkha_attacks.advance(ctx.tick);
        self.zebak_attacks.advance(ctx.tick);
    }

    fn detect(
        &mut self,
        raider: &Raider,
        ctx: &DetectorContext<'_>,
    ) -> Result<Vec<Mistake>, DetectorError> {
        let mut mistakes = Vec::new();

        if raider.was_in(self.earthquake_tiles.active()) {
            mistakes.push(Mistake::WardensP3Earthquake);
        }
        if raider.was_in(self.kephri_bomb_tiles.active()) {
            mistakes.push(Mistake::WardensP3Kephri);
        }
        if raider.was_in(self.baba_boulder_tiles.active()) {
            mistakes.push(Mistake::WardensP3Baba);
        }
        if raider.was_in(self.lightning_tiles.active()) {
            mistakes.push(Mistake::WardensP3Lightning);
        }

        Self::check_prayer(
            &self.akkha_attacks,
            &mut self.delayed,
            Mistake::WardensP3Akkha,
            raider,
            ctx,
        );
        Self::check_prayer(
            &self.zebak_attacks,
            &mut self.delayed,
            Mistake::WardensP3Zebak,
            raider,
            ctx,
        );
        mistakes.extend(self.delayed.pop_due(raider.name, ctx.tick));

        Ok(mistakes)
    }

    fn tracked_tiles(&self) -> Vec<Tile> {
        self.earthquake_tiles
            .active()
            .iter()
            .chain(self.kephri_bomb_tiles.active())
            .chain(self.baba_boulder_tiles.active())
            .chain(self.lightning_tiles.active())
            .copied()
            .collect()
    }
}
