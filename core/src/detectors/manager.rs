//! Detector lifecycle and per-tick evaluation
//!
//! Detectors are held in evaluation order. Raid start activates the all-rooms
//! detectors, room changes swap room detectors in and out, and a wipe restarts
//! everything that is active. Only active detectors see events or evaluate.

use hashbrown::HashMap;
use tracing::{debug, error, info, warn};

use crate::context::{DetectorToggles, ParticipantId};
use crate::game_data::{Mistake, RaidRoom};
use crate::signal_processor::{RaidSignal, SignalHandler};
use crate::world::{Tile, WorldEvent};

use super::{DetectorContext, DetectorError, DetectorId, MistakeDetector, default_detectors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    Inactive,
    Active,
}

struct DetectorSlot {
    detector: Box<dyn MistakeDetector>,
    state: DetectorState,
    enabled: bool,
}

impl DetectorSlot {
    fn is_active(&self) -> bool {
        self.state == DetectorState::Active
    }

    fn start(&mut self) {
        if !self.enabled || self.is_active() {
            return;
        }
        self.detector.startup();
        self.state = DetectorState::Active;
        debug!(detector = ?self.detector.id(), "Detector started");
    }

    fn stop(&mut self) {
        if !self.is_active() {
            return;
        }
        self.detector.shutdown();
        self.state = DetectorState::Inactive;
        debug!(detector = ?self.detector.id(), "Detector stopped");
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tick output
// ═══════════════════════════════════════════════════════════════════════════

/// Mistakes per evaluated raider for one tick, each list in detector order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickMistakes {
    by_raider: HashMap<ParticipantId, Vec<Mistake>>,
}

impl TickMistakes {
    pub fn get(&self, raider: ParticipantId) -> &[Mistake] {
        self.by_raider.get(&raider).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, &[Mistake])> {
        self.by_raider
            .iter()
            .map(|(raider, mistakes)| (*raider, mistakes.as_slice()))
    }

    /// True when nobody made a mistake
    pub fn is_empty(&self) -> bool {
        self.by_raider.values().all(Vec::is_empty)
    }

    pub fn total(&self) -> usize {
        self.by_raider.values().map(Vec::len).sum()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Manager
// ═══════════════════════════════════════════════════════════════════════════

pub struct DetectorManager {
    slots: Vec<DetectorSlot>,
    started: bool,
}

impl DetectorManager {
    /// Every built-in detector, gated by the config toggles.
    pub fn new(toggles: &DetectorToggles) -> Self {
        let mut manager = Self::from_detectors(default_detectors());
        for slot in &mut manager.slots {
            slot.enabled = slot.detector.id().enabled_in(toggles);
        }
        manager
    }

    /// Custom detector set, all enabled, evaluated in the given order.
    pub fn from_detectors(detectors: Vec<Box<dyn MistakeDetector>>) -> Self {
        let slots = detectors
            .into_iter()
            .map(|detector| DetectorSlot {
                detector,
                state: DetectorState::Inactive,
                enabled: true,
            })
            .collect();
        Self {
            slots,
            started: false,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn on_raid_started(&mut self) {
        self.started = true;
        for slot in &mut self.slots {
            if slot.detector.room().is_none() {
                slot.start();
            }
        }
        info!("Raid started, all-rooms detectors active");
    }

    pub fn on_raid_ended(&mut self) {
        self.started = false;
        self.shutdown_all();
        info!("Raid ended, all detectors stopped");
    }

    /// Swap room detectors. Ignored before the raid has started.
    pub fn on_room_changed(&mut self, previous: Option<RaidRoom>, next: RaidRoom) {
        if !self.started {
            return;
        }
        for slot in &mut self.slots {
            let Some(room) = slot.detector.room() else {
                continue;
            };
            if previous == Some(room) && room != next {
                slot.stop();
            } else if room == next {
                slot.start();
            }
        }
        debug!(?previous, room = ?next, "Room detectors swapped");
    }

    /// Shut down and immediately restart every active detector.
    pub fn restart_active(&mut self) {
        let mut restarted = 0;
        for slot in self.slots.iter_mut().filter(|slot| slot.is_active()) {
            slot.detector.shutdown();
            slot.detector.startup();
            restarted += 1;
        }
        info!(restarted, "Restarted active detectors");
    }

    pub fn shutdown_all(&mut self) {
        for slot in &mut self.slots {
            slot.stop();
        }
    }

    /// Route a world event to active detectors interested in its kind.
    pub fn dispatch(&mut self, event: &WorldEvent, ctx: &DetectorContext<'_>) {
        let kind = event.kind();
        for slot in &mut self.slots {
            if slot.is_active() && slot.detector.interests().contains(&kind) {
                slot.detector.handle_event(event, ctx);
            }
        }
    }

    /// Tick boundary for every active detector.
    pub fn advance(&mut self, ctx: &DetectorContext<'_>) {
        for slot in self.slots.iter_mut().filter(|slot| slot.is_active()) {
            slot.detector.on_tick(ctx);
        }
    }

    /// Evaluate every living raider against every active detector.
    ///
    /// A detector error is logged and counts as no mistake; evaluation carries on
    /// with the remaining detectors and raiders.
    pub fn evaluate_tick(&mut self, ctx: &DetectorContext<'_>) -> TickMistakes {
        let mut result = TickMistakes::default();

        for raider in ctx.raiders.iter().filter(|raider| !raider.is_dead()) {
            let mistakes = result.by_raider.entry(raider.name).or_default();

            for slot in self.slots.iter_mut().filter(|slot| slot.is_active()) {
                let detector = slot.detector.id();
                let outcome = match slot.detector.room() {
                    Some(room) if ctx.room != Some(room) => Err(DetectorError::WrongRoom {
                        detector,
                        room: ctx.room,
                    }),
                    _ => slot.detector.detect(raider, ctx),
                };

                match outcome {
                    Ok(found) => mistakes.extend(found),
                    Err(err @ DetectorError::WrongRoom { .. }) => {
                        warn!(?detector, raider = raider.name_str(), error = %err, "Detector skipped");
                    }
                    Err(err) => {
                        error!(
                            ?detector,
                            tick = ctx.tick,
                            raider = raider.name_str(),
                            error = %err,
                            "Detector failed, treating as no mistake"
                        );
                    }
                }
            }
        }

        result
    }

    /// Per-tick cleanup, strictly after every raider has been evaluated.
    pub fn after_tick(&mut self) {
        for slot in self.slots.iter_mut().filter(|slot| slot.is_active()) {
            slot.detector.after_detect();
        }
    }

    pub fn detector(&self, id: DetectorId) -> Option<&dyn MistakeDetector> {
        self.slots
            .iter()
            .find(|slot| slot.detector.id() == id)
            .map(|slot| slot.detector.as_ref())
    }

    pub fn state(&self, id: DetectorId) -> Option<DetectorState> {
        self.slots
            .iter()
            .find(|slot| slot.detector.id() == id)
            .map(|slot| slot.state)
    }

    pub fn is_active(&self, id: DetectorId) -> bool {
        self.state(id) == Some(DetectorState::Active)
    }

    pub fn active_ids(&self) -> Vec<DetectorId> {
        self.slots
            .iter()
            .filter(|slot| slot.is_active())
            .map(|slot| slot.detector.id())
            .collect()
    }

    /// Dangerous tiles across active detectors, for debug rendering
    pub fn tracked_tiles(&self) -> Vec<(DetectorId, Tile)> {
        self.slots
            .iter()
            .filter(|slot| slot.is_active())
            .flat_map(|slot| {
                let id = slot.detector.id();
                slot.detector
                    .tracked_tiles()
                    .into_iter()
                    .map(move |tile| (id, tile))
            })
            .collect()
    }
}

impl SignalHandler for DetectorManager {
    fn handle_signal(&mut self, signal: &RaidSignal) {
        match signal {
            RaidSignal::InRaidChanged { in_raid: true, .. } => self.on_raid_started(),
            RaidSignal::InRaidChanged { in_raid: false, .. } => self.on_raid_ended(),
            RaidSignal::RoomChanged {
                previous, current, ..
            } => self.on_room_changed(*previous, *current),
            RaidSignal::Wiped { room, tick } => {
                info!(?room, tick, "Wipe, restarting detectors");
                self.restart_active();
            }
            RaidSignal::RaidEntered { .. } | RaidSignal::RosterLoaded { .. } => {}
        }
    }
}
