//! Hazard detectors
//!
//! Each detector is a struct of owned schedulers and ledgers implementing
//! `MistakeDetector`. The `DetectorManager` owns every detector, activates them
//! as rooms change, routes world events to the active ones, and drives the
//! two-phase tick evaluation (detect for every raider, then `after_detect`).
//!
//! Per-tick hazard rules read accumulated state and each raider's *previous* tile
//! only. Crondis watering is an interaction, not a hazard, and reads the current tile.

mod akkha;
mod apmeken_puzzle;
mod baba;
mod crondis_puzzle;
mod death;
mod error;
mod het_puzzle;
mod kephri;
mod manager;
mod wardens_p1_p2;
mod wardens_p3;
mod zebak;

#[cfg(test)]
mod manager_tests;

use serde::{Deserialize, Serialize};

use crate::context::{DetectorToggles, HazardThresholds, ParticipantId, resolve};
use crate::encounter::{ParticipantRegistry, Raider};
use crate::game_data::{Mistake, RaidRoom};
use crate::world::{Actor, EventKind, Tick, Tile, WorldEvent, WorldView, remove_tags};

pub use akkha::AkkhaDetector;
pub use apmeken_puzzle::ApmekenPuzzleDetector;
pub use baba::BabaDetector;
pub use crondis_puzzle::CrondisPuzzleDetector;
pub use death::DeathDetector;
pub use error::DetectorError;
pub use het_puzzle::HetPuzzleDetector;
pub use kephri::KephriDetector;
pub use manager::{DetectorManager, DetectorState, TickMistakes};
pub use wardens_p1_p2::WardensP1P2Detector;
pub use wardens_p3::WardensP3Detector;
pub use zebak::ZebakDetector;

/// Typed key for looking up a detector in the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectorId {
    Death,
    HetPuzzle,
    CrondisPuzzle,
    ApmekenPuzzle,
    Akkha,
    Zebak,
    Kephri,
    Baba,
    WardensP1P2,
    WardensP3,
}

impl DetectorId {
    pub fn enabled_in(self, toggles: &DetectorToggles) -> bool {
        match self {
            DetectorId::Death => toggles.death,
            DetectorId::HetPuzzle => toggles.het_puzzle,
            DetectorId::CrondisPuzzle => toggles.crondis_puzzle,
            DetectorId::ApmekenPuzzle => toggles.apmeken_puzzle,
            DetectorId::Akkha => toggles.akkha,
            DetectorId::Zebak => toggles.zebak,
            DetectorId::Kephri => toggles.kephri,
            DetectorId::Baba => toggles.baba,
            DetectorId::WardensP1P2 => toggles.wardens_p1_p2,
            DetectorId::WardensP3 => toggles.wardens_p3,
        }
    }
}

/// Read-only state handed to detectors for one call.
#[derive(Clone, Copy)]
pub struct DetectorContext<'a> {
    /// Tick being assembled (events) or evaluated (tick hooks)
    pub tick: Tick,
    pub room: Option<RaidRoom>,
    pub raiders: &'a ParticipantRegistry,
    pub world: &'a dyn WorldView,
    pub thresholds: &'a HazardThresholds,
}

impl DetectorContext<'_> {
    /// Raid member named by a player actor
    pub fn raider_name(&self, actor: &Actor) -> Option<ParticipantId> {
        actor.player_name().filter(|name| self.raiders.contains(*name))
    }
}

/// A room-specific (or all-rooms) rule set.
///
/// Lifecycle: `startup` on activation, `shutdown` on deactivation. Both must leave
/// every owned scheduler and ledger empty.
pub trait MistakeDetector {
    fn id(&self) -> DetectorId;

    /// Room this detector runs in. `None` means every room of the raid.
    fn room(&self) -> Option<RaidRoom>;

    /// Event kinds routed to `handle_event` while active
    fn interests(&self) -> &'static [EventKind];

    /// Reset all state.
    fn cleanup(&mut self);

    fn startup(&mut self) {
        self.cleanup();
    }

    fn shutdown(&mut self) {
        self.cleanup();
    }

    fn handle_event(&mut self, event: &WorldEvent, ctx: &DetectorContext<'_>);

    /// Tick boundary: promote schedulers before anything is evaluated.
    fn on_tick(&mut self, _ctx: &DetectorContext<'_>) {}

    /// Mistakes for one living raider this tick.
    fn detect(
        &mut self,
        raider: &Raider,
        ctx: &DetectorContext<'_>,
    ) -> Result<Vec<Mistake>, DetectorError>;

    /// Runs once per tick after every raider has been evaluated.
    fn after_detect(&mut self) {}

    /// Tiles currently considered dangerous, for debug rendering
    fn tracked_tiles(&self) -> Vec<Tile> {
        Vec::new()
    }
}

/// Every detector in evaluation order. Death is last so a death is reported after
/// the hazard that caused it.
pub fn default_detectors() -> Vec<Box<dyn MistakeDetector>> {
    vec![
        Box::new(HetPuzzleDetector::new()),
        Box::new(CrondisPuzzleDetector::new()),
        Box::new(ApmekenPuzzleDetector::new()),
        Box::new(AkkhaDetector::new()),
        Box::new(ZebakDetector::new()),
        Box::new(KephriDetector::new()),
        Box::new(BabaDetector::new()),
        Box::new(WardensP1P2Detector::new()),
        Box::new(WardensP3Detector::new()),
        Box::new(DeathDetector::new()),
    ]
}

/// NPC actor whose display name (markup stripped) equals `name`.
pub(crate) fn is_npc_named(actor: &Actor, name: &str) -> bool {
    actor.npc().is_some_and(|npc| remove_tags(resolve(npc.name)) == name)
}
