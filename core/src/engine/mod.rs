//! Tick-synchronous mistake engine
//!
//! Owns the clock, raid progress, roster and detectors, and fixes the order in
//! which they run. World events are fed in as they arrive; `on_tick` closes the
//! tick and returns everything that happened on it.


use tracing::debug;

use crate::context::{ParticipantId, TrackerConfig, resolve};
use crate::detectors::{DetectorContext, DetectorId, DetectorManager, TickMistakes};
use crate::encounter::ParticipantRegistry;
use crate::game_data::{RaidRoom, RoomRegistry};
use crate::signal_processor::{RaidProgressTracker, RaidSignal, SignalHandler};
use crate::world::{Clock, Tick, Tile, WorldEvent, WorldView};

/// Everything produced while closing one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: Tick,
    pub signals: Vec<RaidSignal>,
    pub mistakes: TickMistakes,
}

pub struct MistakeEngine {
    config: TrackerConfig,
    clock: Clock,
    tracker: RaidProgressTracker,
    manager: DetectorManager,
}

impl MistakeEngine {
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_rooms(config, RoomRegistry::tombs())
    }

    pub fn with_rooms(config: TrackerConfig, rooms: RoomRegistry) -> Self {
        let manager = DetectorManager::new(&config.detectors);
        Self {
            config,
            clock: Clock::new(),
            tracker: RaidProgressTracker::new(rooms),
            manager,
        }
    }

    /// Feed one world event. It belongs to the tick currently being assembled.
    pub fn handle_event(&mut self, event: &WorldEvent, world: &dyn WorldView) -> Vec<RaidSignal> {
        let tick = self.clock.now();

        let signals = self.tracker.handle_event(event, tick, world);
        self.manager.handle_signals(&signals);

        let ctx = DetectorContext {
            tick,
            room: self.tracker.current_room(),
            raiders: self.tracker.raiders(),
            world,
            thresholds: &self.config.thresholds,
        };
        self.manager.dispatch(event, &ctx);

        signals
    }

    /// Close tick `tick`: update raid progress, promote scheduled hazards,
    /// evaluate every living raider against their previous tile, then roll
    /// positions and clear per-tick state.
    pub fn on_tick(&mut self, tick: Tick, world: &dyn WorldView) -> TickReport {
        let skipped = self.clock.advance_to(tick);
        if skipped > 0 {
            debug!(tick, skipped, "Ticks skipped, their activations are lost");
        }

        let signals = self.tracker.update(tick, world);
        self.manager.handle_signals(&signals);

        self.tracker.raiders_mut().observe(world);

        let ctx = DetectorContext {
            tick,
            room: self.tracker.current_room(),
            raiders: self.tracker.raiders(),
            world,
            thresholds: &self.config.thresholds,
        };
        self.manager.advance(&ctx);
        let mistakes = if self.tracker.in_raid() {
            self.manager.evaluate_tick(&ctx)
        } else {
            TickMistakes::default()
        };

        self.record_mistakes(tick, &mistakes);
        self.tracker.raiders_mut().commit_positions();
        self.manager.after_tick();
        self.clock.finish_tick();

        TickReport {
            tick,
            signals,
            mistakes,
        }
    }

    /// Stop every detector and forget the raid.
    pub fn shutdown(&mut self) {
        self.manager.on_raid_ended();
        self.tracker.reset();
    }

    fn record_mistakes(&mut self, tick: Tick, mistakes: &TickMistakes) {
        let mut died: Vec<ParticipantId> = Vec::new();
        for (raider, found) in mistakes.iter() {
            for mistake in found {
                debug!(
                    tick,
                    room = ?self.tracker.current_room(),
                    raider = resolve(raider),
                    %mistake,
                    "Mistake"
                );
            }
            if found.iter().any(|mistake| mistake.is_death()) {
                died.push(raider);
            }
        }

        let raiders = self.tracker.raiders_mut();
        for raider in died {
            raiders.mark_dead(raider);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Tick that incoming events are attributed to
    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    pub fn in_raid(&self) -> bool {
        self.tracker.in_raid()
    }

    pub fn current_room(&self) -> Option<RaidRoom> {
        self.tracker.current_room()
    }

    pub fn raiders(&self) -> &ParticipantRegistry {
        self.tracker.raiders()
    }

    pub fn progress(&self) -> &RaidProgressTracker {
        &self.tracker
    }

    pub fn detectors(&self) -> &DetectorManager {
        &self.manager
    }

    pub fn is_detector_active(&self, id: DetectorId) -> bool {
        self.manager.is_active(id)
    }

    /// Dangerous tiles this tick, for a debug overlay
    pub fn tracked_tiles(&self) -> Vec<(DetectorId, Tile)> {
        self.manager.tracked_tiles()
    }
}
