//! Tests for detector lifecycle and tick evaluation
//!
//! Uses a stub detector that schedules tiles from graphics objects and logs
//! every event it receives, so activation and dispatch are observable from outside.

use std::cell::RefCell;
use std::rc::Rc;

use crate::context::{DetectorToggles, HazardThresholds, intern};
use crate::encounter::{GHOST_POSE_IDS, ParticipantRegistry, Raider};
use crate::game_data::{Mistake, RaidRoom};
use crate::signal_processor::{RaidSignal, SignalHandler};
use crate::tracking::{ActivationTracker, DelayedScheduler};
use crate::world::fake::FakeWorld;
use crate::world::{ChatKind, EventKind, Tick, Tile, WorldEvent, ticks_from_cycles};

use super::{
    DetectorContext, DetectorError, DetectorId, DetectorManager, DetectorState, MistakeDetector,
};

type EventLog = Rc<RefCell<Vec<(DetectorId, EventKind)>>>;

struct Stub {
    id: DetectorId,
    room: Option<RaidRoom>,
    mistake: Mistake,
    interests: &'static [EventKind],
    always_fire: bool,
    fail: bool,
    tiles: DelayedScheduler<Tile>,
    log: EventLog,
}

impl Stub {
    fn new(id: DetectorId, room: Option<RaidRoom>, log: &EventLog) -> Self {
        Self {
            id,
            room,
            mistake: Mistake::Death,
            interests: &[EventKind::GraphicsObjectCreated],
            always_fire: false,
            fail: false,
            tiles: DelayedScheduler::new(),
            log: Rc::clone(log),
        }
    }

    fn firing(mut self, mistake: Mistake) -> Self {
        self.always_fire = true;
        self.mistake = mistake;
        self
    }

    fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    fn listening(mut self, interests: &'static [EventKind]) -> Self {
        self.interests = interests;
        self
    }
}

impl MistakeDetector for Stub {
    fn id(&self) -> DetectorId {
        self.id
    }

    fn room(&self) -> Option<RaidRoom> {
        self.room
    }

    fn interests(&self) -> &'static [EventKind] {
        self.interests
    }

    fn cleanup(&mut self) {
        self.tiles.clear();
    }

    fn handle_event(&mut self, event: &WorldEvent, ctx: &DetectorContext<'_>) {
        self.log.borrow_mut().push((self.id, event.kind()));
        if let WorldEvent::GraphicsObjectCreated {
            tile,
            cycles_until_start,
            ..
        } = event
        {
            self.tiles
                .schedule(ctx.tick + ticks_from_cycles(*cycles_until_start), *tile);
        }
    }

    fn on_tick(&mut self, ctx: &DetectorContext<'_>) {
        self.tiles.advance(ctx.tick);
    }

    fn detect(
        &mut self,
        raider: &Raider,
        ctx: &DetectorContext<'_>,
    ) -> Result<Vec<Mistake>, DetectorError> {
        if self.fail {
            return Err(DetectorError::UnknownRoomDeath { room: ctx.room });
        }
        let mut mistakes = Vec::new();
        if self.always_fire || raider.was_in(self.tiles.active()) {
            mistakes.push(self.mistake);
        }
        Ok(mistakes)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

const HAZARD: Tile = Tile::new(3200, 3200, 0);
const THRESHOLDS: HazardThresholds = HazardThresholds {
    projectile_boulder_damage: 15,
    banana_slip_cooldown_ticks: 3,
};

fn raider_on(name: &str, tile: Tile) -> Raider {
    let mut raider = Raider::new(intern(name));
    raider.previous_position = Some(tile);
    raider
}

fn registry(raiders: impl IntoIterator<Item = Raider>) -> ParticipantRegistry {
    let mut registry = ParticipantRegistry::new();
    for raider in raiders {
        registry.insert(raider);
    }
    registry
}

fn ctx<'a>(
    tick: Tick,
    room: RaidRoom,
    raiders: &'a ParticipantRegistry,
    world: &'a FakeWorld,
) -> DetectorContext<'a> {
    DetectorContext {
        tick,
        room: Some(room),
        raiders,
        world,
        thresholds: &THRESHOLDS,
    }
}

fn graphic(tile: Tile, cycles_until_start: i32) -> WorldEvent {
    WorldEvent::GraphicsObjectCreated {
        graphics_id: 1,
        tile,
        cycles_until_start,
    }
}

fn three_detectors(log: &EventLog) -> DetectorManager {
    DetectorManager::from_detectors(vec![
        Box::new(Stub::new(DetectorId::Akkha, Some(RaidRoom::Akkha), log)),
        Box::new(Stub::new(DetectorId::Zebak, Some(RaidRoom::Zebak), log)),
        Box::new(Stub::new(DetectorId::Death, None, log)),
    ])
}

// ─────────────────────────────────────────────────────────────────────────────
// Lifecycle
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn room_changes_swap_room_detectors() {
    let log = EventLog::default();
    let mut manager = three_detectors(&log);

    // Room changes before the raid starts are ignored
    manager.on_room_changed(None, RaidRoom::Akkha);
    assert!(manager.active_ids().is_empty());

    manager.on_raid_started();
    assert_eq!(manager.active_ids(), vec![DetectorId::Death]);

    manager.on_room_changed(None, RaidRoom::Akkha);
    assert_eq!(manager.active_ids(), vec![DetectorId::Akkha, DetectorId::Death]);

    manager.on_room_changed(Some(RaidRoom::Akkha), RaidRoom::Zebak);
    assert_eq!(manager.active_ids(), vec![DetectorId::Zebak, DetectorId::Death]);
    assert_eq!(manager.state(DetectorId::Akkha), Some(DetectorState::Inactive));

    manager.on_raid_ended();
    assert!(manager.active_ids().is_empty());
    assert!(!manager.is_started());
}

#[test]
fn signals_drive_lifecycle() {
    let log = EventLog::default();
    let mut manager = three_detectors(&log);

    manager.handle_signals(&[
        RaidSignal::InRaidChanged { in_raid: true, tick: 1 },
        RaidSignal::RoomChanged {
            previous: None,
            current: RaidRoom::Zebak,
            tick: 1,
        },
    ]);
    assert!(manager.is_active(DetectorId::Zebak));
    assert!(manager.is_active(DetectorId::Death));

    manager.handle_signal(&RaidSignal::InRaidChanged { in_raid: false, tick: 2 });
    assert!(manager.active_ids().is_empty());
}

#[test]
fn disabled_detector_is_never_started() {
    let toggles = DetectorToggles {
        akkha: false,
        ..DetectorToggles::default()
    };
    let mut manager = DetectorManager::new(&toggles);

    manager.on_raid_started();
    manager.on_room_changed(None, RaidRoom::Akkha);

    assert!(!manager.is_active(DetectorId::Akkha));
    assert!(manager.is_active(DetectorId::Death));
    assert!(manager.detector(DetectorId::Akkha).is_some());
}

#[test]
fn every_detector_follows_its_room() {
    let mut manager = DetectorManager::new(&DetectorToggles::default());
    manager.on_raid_started();

    let rooms = [
        (RaidRoom::HetPuzzle, DetectorId::HetPuzzle),
        (RaidRoom::CrondisPuzzle, DetectorId::CrondisPuzzle),
        (RaidRoom::ApmekenPuzzle, DetectorId::ApmekenPuzzle),
        (RaidRoom::Akkha, DetectorId::Akkha),
        (RaidRoom::Zebak, DetectorId::Zebak),
        (RaidRoom::Kephri, DetectorId::Kephri),
        (RaidRoom::Baba, DetectorId::Baba),
        (RaidRoom::WardensP1P2, DetectorId::WardensP1P2),
        (RaidRoom::WardensP3, DetectorId::WardensP3),
    ];
    let mut previous = None;
    for (room, id) in rooms {
        manager.on_room_changed(previous, room);
        assert_eq!(manager.active_ids(), vec![id, DetectorId::Death], "{room:?}");
        previous = Some(room);
    }
}

#[test]
fn wipe_restart_discards_pending_activation() {
    let log = EventLog::default();
    let world = FakeWorld::default();
    let raiders = registry([raider_on("Alpha", HAZARD)]);
    let alpha = intern("Alpha");

    let run = |wipe: bool| {
        let mut manager = three_detectors(&log);
        manager.on_raid_started();
        manager.on_room_changed(None, RaidRoom::Akkha);

        // Scheduled at tick 10 for tick 13
        manager.dispatch(&graphic(HAZARD, 90), &ctx(10, RaidRoom::Akkha, &raiders, &world));
        if wipe {
            manager.handle_signal(&RaidSignal::Wiped {
                room: Some(RaidRoom::Akkha),
                tick: 11,
            });
            assert!(manager.is_active(DetectorId::Akkha));
        }

        let mut found = Vec::new();
        for tick in 10..=13 {
            let ctx = ctx(tick, RaidRoom::Akkha, &raiders, &world);
            manager.advance(&ctx);
            found.extend_from_slice(manager.evaluate_tick(&ctx).get(alpha));
            manager.after_tick();
        }
        found
    };

    assert_eq!(run(false), vec![Mistake::Death]);
    assert!(run(true).is_empty());
}

#[test]
fn deactivation_discards_pending_activation() {
    let log = EventLog::default();
    let world = FakeWorld::default();
    let raiders = registry([raider_on("Alpha", HAZARD)]);
    let mut manager = three_detectors(&log);
    manager.on_raid_started();
    manager.on_room_changed(None, RaidRoom::Akkha);

    manager.dispatch(&graphic(HAZARD, 60), &ctx(10, RaidRoom::Akkha, &raiders, &world));

    // Leave and come straight back before the tile would have fired
    manager.on_room_changed(Some(RaidRoom::Akkha), RaidRoom::Zebak);
    manager.on_room_changed(Some(RaidRoom::Zebak), RaidRoom::Akkha);

    let ctx = ctx(12, RaidRoom::Akkha, &raiders, &world);
    manager.advance(&ctx);
    assert!(manager.evaluate_tick(&ctx).is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch and evaluation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn events_reach_only_active_interested_detectors() {
    let log = EventLog::default();
    let world = FakeWorld::default();
    let raiders = ParticipantRegistry::new();
    let mut manager = DetectorManager::from_detectors(vec![
        Box::new(Stub::new(DetectorId::Akkha, Some(RaidRoom::Akkha), &log)),
        Box::new(Stub::new(DetectorId::Zebak, Some(RaidRoom::Zebak), &log)),
        Box::new(
            Stub::new(DetectorId::Death, None, &log).listening(&[EventKind::ChatMessage]),
        ),
    ]);
    manager.on_raid_started();
    manager.on_room_changed(None, RaidRoom::Akkha);

    let ctx = ctx(5, RaidRoom::Akkha, &raiders, &world);
    manager.dispatch(&graphic(HAZARD, 0), &ctx);
    manager.dispatch(
        &WorldEvent::ChatMessage {
            kind: ChatKind::Public,
            sender: None,
            text: "hello".to_string(),
        },
        &ctx,
    );

    assert_eq!(
        *log.borrow(),
        vec![
            (DetectorId::Akkha, EventKind::GraphicsObjectCreated),
            (DetectorId::Death, EventKind::ChatMessage),
        ]
    );
}

#[test]
fn failing_detector_does_not_block_others() {
    let log = EventLog::default();
    let world = FakeWorld::default();
    let raiders = registry([raider_on("Alpha", HAZARD), raider_on("Beta", HAZARD)]);
    let mut manager = DetectorManager::from_detectors(vec![
        Box::new(Stub::new(DetectorId::Kephri, None, &log).failing()),
        Box::new(Stub::new(DetectorId::Death, None, &log).firing(Mistake::KephriBomb)),
    ]);
    manager.on_raid_started();

    let ctx = ctx(1, RaidRoom::Kephri, &raiders, &world);
    manager.advance(&ctx);
    let mistakes = manager.evaluate_tick(&ctx);

    assert_eq!(mistakes.get(intern("Alpha")), &[Mistake::KephriBomb]);
    assert_eq!(mistakes.get(intern("Beta")), &[Mistake::KephriBomb]);
    assert_eq!(mistakes.total(), 2);
}

#[test]
fn mistakes_follow_detector_order() {
    let log = EventLog::default();
    let world = FakeWorld::default();
    let raiders = registry([raider_on("Alpha", HAZARD)]);
    let mut manager = DetectorManager::from_detectors(vec![
        Box::new(Stub::new(DetectorId::Baba, None, &log).firing(Mistake::BabaSlam)),
        Box::new(Stub::new(DetectorId::Death, None, &log).firing(Mistake::Death)),
    ]);
    manager.on_raid_started();

    let ctx = ctx(1, RaidRoom::Baba, &raiders, &world);
    let mistakes = manager.evaluate_tick(&ctx);
    assert_eq!(
        mistakes.get(intern("Alpha")),
        &[Mistake::BabaSlam, Mistake::Death]
    );
}

#[test]
fn dead_raiders_are_not_evaluated() {
    let log = EventLog::default();
    let world = FakeWorld::default();
    let mut ghost = raider_on("Ghost", HAZARD);
    ghost.pose = Some(GHOST_POSE_IDS[0]);
    let raiders = registry([ghost, raider_on("Alive", HAZARD)]);
    let mut manager = DetectorManager::from_detectors(vec![Box::new(
        Stub::new(DetectorId::Death, None, &log).firing(Mistake::Death),
    )]);
    manager.on_raid_started();

    let mistakes = manager.evaluate_tick(&ctx(1, RaidRoom::Akkha, &raiders, &world));
    assert!(mistakes.get(intern("Ghost")).is_empty());
    assert_eq!(mistakes.get(intern("Alive")), &[Mistake::Death]);
}

#[test]
fn room_detector_outside_its_room_is_skipped() {
    let log = EventLog::default();
    let world = FakeWorld::default();
    let raiders = registry([raider_on("Alpha", HAZARD)]);
    let mut manager = DetectorManager::from_detectors(vec![Box::new(
        Stub::new(DetectorId::Akkha, Some(RaidRoom::Akkha), &log).firing(Mistake::AkkhaUnstableOrb),
    )]);
    manager.on_raid_started();
    manager.on_room_changed(None, RaidRoom::Akkha);

    let wrong = manager.evaluate_tick(&ctx(1, RaidRoom::Zebak, &raiders, &world));
    assert!(wrong.is_empty());

    let right = manager.evaluate_tick(&ctx(1, RaidRoom::Akkha, &raiders, &world));
    assert_eq!(right.get(intern("Alpha")), &[Mistake::AkkhaUnstableOrb]);
}
