//! Wardens P1 and P2
//!
//! P1 pyramids are game objects whose rendered animation changes; they are polled
//! every tick and hit their 3×3 area one tick after the active animation shows.
//!
//! P2 obelisk specials reuse graphics ids: the windmill hit graphic is also the
//! opening of the DDR special. The obelisk's own animation tells which special is
//! running, so the same graphic is credited to the right one. Special prayer
//! attacks are checked when the projectile lands, unless the raider's vengeance
//! reflected the hit.

use hashbrown::HashSet;

use phf::phf_map;

use crate::context::{ParticipantId, intern_name, resolve};
use crate::encounter::Raider;
use crate::game_data::{Mistake, RaidRoom};
use crate::tracking::{
    ActivationTracker, DelayedScheduler, InstantScheduler, OverheadTracker, VengeanceTracker,
};
use crate::world::{ChatKind, EventKind, Prayer, Tick, Tile, WorldEvent, ticks_from_cycles};

use super::{DetectorContext, DetectorError, DetectorId, MistakeDetector, is_npc_named};

// P1
const PYRAMID_OBJECT_IDS: [i32; 2] = [45750, 45751];
const PYRAMID_ACTIVE_ANIMATION_ID: i32 = 9524;
/// The pyramid animates a tick before it deals damage
const PYRAMID_HIT_DELAY_TICKS: Tick = 1;

// P2
const OBELISK_NAME: &str = "Obelisk";
const DDR_GRAPHICS_ID: i32 = 2235;
const WINDMILL_HIT_GRAPHICS_ID: i32 = 2234;
const BOMB_GRAPHICS_ID: i32 = 2198;
const OBELISK_DDR_LIGHTNING_GRAPHICS_ID: i32 = 2199;
const OBELISK_WINDMILL_LIGHTNING_GRAPHICS_ID: i32 = 2200;
const DDR_HIT_DELAY_TICKS: Tick = 1;
const LIGHTNING_HIT_DELAY_TICKS: Tick = 0;
const PLAYER_BIND_ANIMATION_ID: i32 = 9714;
/// Wardens turning into their core-exposed form. Obelisk specials stop dealing
/// damage from here on.
const WARDENS_HEALTH_PHASE_IDS: [i32; 2] = [11755, 11758];

/// Projectile id -> prayer that blocks it
static SPECIAL_PRAYER_ATTACKS: phf::Map<i32, Prayer> = phf_map! {
    2204i32 => Prayer::Melee,
    2206i32 => Prayer::Ranged,
    2208i32 => Prayer::Magic,
};

/// Special the obelisk is channelling, read from its animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObeliskPhase {
    Ddr,
    Windmill,
    Bombs,
    Death,
}

impl ObeliskPhase {
    fn from_animation(animation_id: i32) -> Option<Self> {
        match animation_id {
            9732 => Some(ObeliskPhase::Ddr),
            9733 => Some(ObeliskPhase::Windmill),
            9727 => Some(ObeliskPhase::Bombs),
            9734 => Some(ObeliskPhase::Death),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct WardensP1P2Detector {
    /// Spawned pyramids as (object id, tile)
    pyramids: HashSet<(i32, Tile)>,
    pyramid_tiles: DelayedScheduler<Tile>,

    obelisk_phase: Option<ObeliskPhase>,
    ddr_tiles: DelayedScheduler<Tile>,
    windmill_tiles: InstantScheduler<Tile>,
    bomb_tiles: DelayedScheduler<Tile>,
    bound: HashSet<ParticipantId>,
    special_attacks: OverheadTracker,
    vengeance: VengeanceTracker,
}

impl Default for WardensP1P2Detector {
    fn default() -> Self {
        Self {
            pyramids: HashSet::new(),
            pyramid_tiles: DelayedScheduler::new(),
            obelisk_phase: None,
            ddr_tiles: DelayedScheduler::new(),
            windmill_tiles: InstantScheduler::new(),
            bomb_tiles: DelayedScheduler::new(),
            bound: HashSet::new(),
            special_attacks: OverheadTracker::new(&SPECIAL_PRAYER_ATTACKS),
            vengeance: VengeanceTracker::new(),
        }
    }
}

impl WardensP1P2Detector {
    pub fn new() -> Self {
        Self::default()
    }

    fn on_graphic(&mut self, graphics_id: i32, tile: Tile, cycles_until_start: i32, tick: Tick) {
        let starts = tick + ticks_from_cycles(cycles_until_start);
        match graphics_id {
            DDR_GRAPHICS_ID => self.ddr_tiles.schedule(starts + DDR_HIT_DELAY_TICKS, tile),
            OBELISK_DDR_LIGHTNING_GRAPHICS_ID => {
                self.ddr_tiles.schedule(starts + LIGHTNING_HIT_DELAY_TICKS, tile)
            }
            WINDMILL_HIT_GRAPHICS_ID => match self.obelisk_phase {
                Some(ObeliskPhase::Ddr) => self.ddr_tiles.schedule(tick, tile),
                Some(ObeliskPhase::Windmill) => self.windmill_tiles.add(tile),
                _ => {}
            },
            OBELISK_WINDMILL_LIGHTNING_GRAPHICS_ID => self.windmill_tiles.add(tile),
            BOMB_GRAPHICS_ID if self.obelisk_phase == Some(ObeliskPhase::Bombs) => {
                self.bomb_tiles.schedule(starts + LIGHTNING_HIT_DELAY_TICKS, tile)
            }
            _ => {}
        }
    }

    /// Queue the 3×3 hit area of every pyramid currently showing its active animation.
    fn poll_pyramids(&mut self, ctx: &DetectorContext<'_>) {
        for &(object_id, tile) in &self.pyramids {
            if ctx.world.game_object_animation(object_id, tile) == Some(PYRAMID_ACTIVE_ANIMATION_ID) {
                self.pyramid_tiles
                    .schedule_all(ctx.tick + PYRAMID_HIT_DELAY_TICKS, tile.square_around(1));
            }
        }
    }

    fn local_raider(ctx: &DetectorContext<'_>) -> Option<ParticipantId> {
        let name = ctx.world.local_player_name()?;
        let key = intern_name(&name);
        ctx.raiders.contains(key).then_some(key)
    }
}

impl MistakeDetector for WardensP1P2Detector {
    fn id(&self) -> DetectorId {
        DetectorId::WardensP1P2
    }

    fn room(&self) -> Option<RaidRoom> {
        Some(RaidRoom::WardensP1P2)
    }

    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::GraphicsObjectCreated,
            EventKind::ProjectileMoved,
            EventKind::GameObjectSpawned,
            EventKind::GameObjectDespawned,
            EventKind::AnimationChanged,
            EventKind::NpcChanged,
            EventKind::ChatMessage,
            EventKind::OverheadTextChanged,
            EventKind::VarbitChanged,
        ]
    }

    fn cleanup(&mut self) {
        self.pyramids.clear();
        self.pyramid_tiles.clear();
        self.obelisk_phase = None;
        self.ddr_tiles.clear();
        self.windmill_tiles.clear();
        self.bomb_tiles.clear();
        self.bound.clear();
        self.special_attacks.clear();
        self.vengeance.clear();
    }

    fn handle_event(&mut self, event: &WorldEvent, ctx: &DetectorContext<'_>) {
        match event {
            WorldEvent::GameObjectSpawned { object_id, tile }
                if PYRAMID_OBJECT_IDS.contains(object_id) =>
            {
                self.pyramids.insert((*object_id, *tile));
            }
            WorldEvent::GameObjectDespawned { object_id, tile } => {
                self.pyramids.remove(&(*object_id, *tile));
            }
            WorldEvent::GraphicsObjectCreated {
                graphics_id,
                tile,
                cycles_until_start,
            } => self.on_graphic(*graphics_id, *tile, *cycles_until_start, ctx.tick),
            WorldEvent::AnimationChanged {
                actor,
                animation_id,
                ..
            } => {
                if is_npc_named(actor, OBELISK_NAME) {
                    if let Some(phase) = ObeliskPhase::from_animation(*animation_id) {
                        tracing::debug!(tick = ctx.tick, ?phase, "Obelisk special changed");
                        self.obelisk_phase = Some(phase);
                    }
                } else if *animation_id == PLAYER_BIND_ANIMATION_ID
                    && let Some(name) = ctx.raider_name(actor)
                {
                    self.bound.insert(name);
                }
            }
            WorldEvent::ProjectileMoved {
                projectile,
                target,
                remaining_cycles,
            } if self.special_attacks.tracks(projectile.id) => {
                let lands = ctx.tick + ticks_from_cycles(*remaining_cycles);
                self.special_attacks.track_projectile(
                    *projectile,
                    target.as_ref(),
                    *remaining_cycles,
                    ctx.tick,
                    lands,
                );
            }
            WorldEvent::NpcChanged { npc, .. } if WARDENS_HEALTH_PHASE_IDS.contains(&npc.id) => {
                tracing::debug!(tick = ctx.tick, "Wardens exposed their core, clearing specials");
                self.ddr_tiles.clear();
                self.windmill_tiles.clear();
                self.bomb_tiles.clear();
                self.special_attacks.clear();
            }
            WorldEvent::VarbitChanged { varbit_id, value } => {
                if let Some(local) = Self::local_raider(ctx) {
                    self.vengeance.on_local_varbit(local, *varbit_id, *value);
                }
            }
            WorldEvent::OverheadTextChanged { actor, text } => {
                if let Some(name) = actor.player_name() {
                    let local = ctx.world.local_player_name().map(|name| intern_name(&name));
                    self.vengeance.on_overhead_text(name, text, local);
                }
            }
            WorldEvent::ChatMessage {
                kind: ChatKind::Public,
                sender: Some(sender),
                text,
            } => {
                let local = ctx.world.local_player_name().map(|name| intern_name(&name));
                self.vengeance.on_public_chat(*sender, text, local);
            }
            _ => {}
        }
    }

    fn on_tick(&mut self, ctx: &DetectorContext<'_>) {
        self.poll_pyramids(ctx);
        self.pyramid_tiles.advance(ctx.tick);
        self.ddr_tiles.advance(ctx.tick);
        self.windmill_tiles.advance(ctx.tick);
        self.bomb_tiles.advance(ctx.tick);
        self.special_attacks.advance(ctx.tick);
        self.vengeance.advance();
    }

    fn detect(
        &mut self,
        raider: &Raider,
        ctx: &DetectorContext<'_>,
    ) -> Result<Vec<Mistake>, DetectorError> {
        let mut mistakes = Vec::new();

        if raider.was_in(self.pyramid_tiles.active()) {
            mistakes.push(Mistake::WardensP1Pyramid);
        }
        if raider.was_in(self.ddr_tiles.active()) {
            mistakes.push(Mistake::WardensP2Ddr);
        }
        if raider.was_in(self.windmill_tiles.active()) {
            mistakes.push(Mistake::WardensP2Windmill);
        }
        if raider.was_in(self.bomb_tiles.active()) {
            mistakes.push(Mistake::WardensP2Bombs);
        }
        if self.bound.contains(&raider.name) {
            mistakes.push(Mistake::WardensP2Bind);
        }

        if !self.vengeance.did_pop_vengeance(raider.name) {
            let prayer = ctx.world.overhead_prayer(resolve(raider.name));
            if self.special_attacks.did_miss_prayer(raider.name, prayer) {
                mistakes.push(Mistake::WardensP2SpecialPrayer);
            }
        }

        Ok(mistakes)
    }

    fn after_detect(&mut self) {
        self.bound.clear();
        self.vengeance.clear();
    }

    fn tracked_tiles(&self) -> Vec<Tile> {
        self.pyramid_tiles
            .active()
            .iter()
            .chain(self.ddr_tiles.active())
            .chain(self.windmill_tiles.active())
            .chain(self.bomb_tiles.active())
            .copied()
            .collect()
    }
}
