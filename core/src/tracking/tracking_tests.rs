//! Tests for the tracking primitives
//!
//! Verifies that:
//! - Scheduled items are visible for exactly one tick
//! - Hitsplat pops are consumed once
//! - Delayed mistakes and overhead checks resolve on the right tick
//! - Vengeance procs are told apart from typed chat

use phf::phf_map;

use crate::context::intern;
use crate::game_data::Mistake;
use crate::world::{Actor, Prayer, ProjectileRef, Tile};

use super::*;

static TEST_ATTACKS: phf::Map<i32, Prayer> = phf_map! {
    100i32 => Prayer::Magic,
    101i32 => Prayer::Ranged,
};

fn tile(x: i32, y: i32) -> Tile {
    Tile::new(x, y, 0)
}

// ═══════════════════════════════════════════════════════════════════════════
// Schedulers
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn delayed_item_is_active_for_exactly_its_tick() {
    let mut scheduler = DelayedScheduler::new();
    scheduler.schedule(12, tile(5, 5));

    for tick in 10..12 {
        scheduler.advance(tick);
        assert!(scheduler.active().is_empty(), "active early at tick {tick}");
    }

    scheduler.advance(12);
    assert!(scheduler.is_active(&tile(5, 5)));

    scheduler.advance(13);
    assert!(scheduler.active().is_empty());
    assert_eq!(scheduler.pending_len(), 0);
}

#[test]
fn same_tick_schedules_accumulate() {
    let mut scheduler = DelayedScheduler::new();
    scheduler.schedule(3, tile(1, 1));
    scheduler.schedule_all(3, [tile(1, 1), tile(2, 2)]);
    scheduler.schedule(4, tile(9, 9));

    scheduler.advance(3);
    assert_eq!(scheduler.active().len(), 2);
    assert_eq!(scheduler.pending_len(), 1);
}

#[test]
fn skipped_tick_loses_its_items() {
    let mut scheduler = DelayedScheduler::new();
    scheduler.schedule(5, tile(1, 1));

    scheduler.advance(4);
    scheduler.advance(6);
    assert!(scheduler.active().is_empty());
    // Still pending under a tick that will never be advanced again
    assert_eq!(scheduler.pending_len(), 1);
}

#[test]
fn clear_discards_pending_and_active() {
    let mut scheduler = DelayedScheduler::new();
    scheduler.schedule(1, tile(1, 1));
    scheduler.schedule(3, tile(2, 2));
    scheduler.advance(1);

    scheduler.clear();
    assert!(scheduler.active().is_empty());
    scheduler.advance(3);
    assert!(scheduler.active().is_empty());
}

#[test]
fn instant_item_is_active_on_the_following_boundary_only() {
    let mut scheduler = InstantScheduler::new();
    scheduler.add(tile(4, 4));
    assert!(scheduler.active().is_empty());

    scheduler.advance(7);
    assert!(scheduler.is_active(&tile(4, 4)));

    scheduler.advance(8);
    assert!(scheduler.active().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Hitsplat ledger
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn ledger_pops_each_hit_once() {
    let mut ledger = HitsplatLedger::new();
    let a = intern("Ledger A");
    let b = intern("Ledger B");

    ledger.record_hit(a);
    ledger.record_hit(a);

    assert!(ledger.pop_hit(a));
    assert!(ledger.pop_hit(a));
    assert!(!ledger.pop_hit(a));
    assert!(!ledger.pop_hit(b));
}

#[test]
fn ledger_clear_drops_unconsumed_hits() {
    let mut ledger = HitsplatLedger::new();
    let a = intern("Ledger C");
    ledger.record_hit(a);
    ledger.clear();
    assert_eq!(ledger.hits_for(a), 0);
    assert!(!ledger.pop_hit(a));
}

// ═══════════════════════════════════════════════════════════════════════════
// Delayed mistakes
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn delayed_mistake_waits_for_its_delay() {
    let mut delayed = DelayedMistakes::new();
    let raider = intern("Delayed A");
    delayed.add(raider, Mistake::HetPuzzleLight, 10, 1);

    assert!(delayed.pop_due(raider, 10).is_empty());
    assert_eq!(delayed.pop_due(raider, 11), vec![Mistake::HetPuzzleLight]);
    assert!(delayed.pop_due(raider, 12).is_empty());
    assert!(delayed.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Overhead tracker
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn missed_prayer_detected_on_activation_tick() {
    let mut tracker = OverheadTracker::new(&TEST_ATTACKS);
    let raider = intern("Overhead A");
    let target = Actor::Player(raider);

    let projectile = ProjectileRef { key: 1, id: 100 };
    assert!(tracker.track_projectile(projectile, Some(&target), 90, 20, 23));

    tracker.advance(22);
    assert!(!tracker.did_miss_prayer(raider, None));

    tracker.advance(23);
    assert!(tracker.did_miss_prayer(raider, None));
    assert!(tracker.did_miss_prayer(raider, Some(Prayer::Ranged)));
    assert!(!tracker.did_miss_prayer(raider, Some(Prayer::Magic)));

    tracker.advance(24);
    assert!(!tracker.did_miss_prayer(raider, None));
}

#[test]
fn prayer_check_only_applies_to_the_target() {
    let mut tracker = OverheadTracker::new(&TEST_ATTACKS);
    let target = intern("Overhead B");
    let bystander = intern("Overhead C");

    tracker.track_projectile(
        ProjectileRef { key: 2, id: 101 },
        Some(&Actor::Player(target)),
        60,
        3,
        5,
    );
    tracker.advance(5);

    assert!(tracker.did_miss_prayer(target, Some(Prayer::Magic)));
    assert!(!tracker.did_miss_prayer(bystander, None));
}

#[test]
fn stale_and_repeat_projectiles_are_ignored() {
    let mut tracker = OverheadTracker::new(&TEST_ATTACKS);
    let raider = intern("Overhead D");
    let target = Actor::Player(raider);

    // One tick or less left: leftover from an earlier attack
    assert!(!tracker.track_projectile(ProjectileRef { key: 3, id: 100 }, Some(&target), 30, 0, 1));
    // Unknown projectile id
    assert!(!tracker.track_projectile(ProjectileRef { key: 4, id: 999 }, Some(&target), 90, 0, 1));

    let projectile = ProjectileRef { key: 5, id: 100 };
    assert!(tracker.track_projectile(projectile, Some(&target), 90, 0, 2));
    assert!(!tracker.track_projectile(projectile, Some(&target), 60, 1, 3));

    tracker.advance(2);
    assert_eq!(tracker.active_attack_for(raider).map(|a| a.key), Some(5));
    tracker.advance(3);
    assert!(tracker.active_attack_for(raider).is_none());
}

#[test]
fn projectile_is_forgotten_once_it_lands() {
    let mut tracker = OverheadTracker::new(&TEST_ATTACKS);
    let raider = intern("Overhead E");
    let target = Actor::Player(raider);

    // Checked on the tick it appears, lands three ticks later
    let projectile = ProjectileRef { key: 6, id: 101 };
    assert!(tracker.track_projectile(projectile, Some(&target), 90, 10, 10));
    tracker.advance(10);
    assert_eq!(tracker.active_attack_for(raider).map(|a| a.lands), Some(13));

    tracker.advance(12);
    assert!(tracker.is_tracking(6));
    assert!(!tracker.track_projectile(projectile, Some(&target), 60, 12, 12));

    tracker.advance(13);
    assert!(!tracker.is_tracking(6));
}

// ═══════════════════════════════════════════════════════════════════════════
// Vengeance
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn overhead_vengeance_counts_for_other_players() {
    let mut tracker = VengeanceTracker::new();
    let local = intern("Veng Local");
    let other = intern("Veng Other");

    tracker.on_overhead_text(other, VENGEANCE_TEXT, Some(local));
    tracker.on_overhead_text(local, VENGEANCE_TEXT, Some(local));
    tracker.advance();

    assert!(tracker.did_pop_vengeance(other));
    assert!(!tracker.did_pop_vengeance(local));
}

#[test]
fn typed_vengeance_is_discounted() {
    let mut tracker = VengeanceTracker::new();
    let typist = intern("Veng Typist");

    tracker.on_public_chat(typist, VENGEANCE_TEXT, None);
    tracker.on_overhead_text(typist, VENGEANCE_TEXT, None);
    tracker.advance();

    assert!(!tracker.did_pop_vengeance(typist));
}

#[test]
fn local_vengeance_comes_from_the_varbit() {
    let mut tracker = VengeanceTracker::new();
    let local = intern("Veng Local B");

    tracker.on_local_varbit(local, VENGEANCE_ACTIVE_VARBIT, 1);
    assert!(!tracker.did_pop_vengeance(local));

    tracker.on_local_varbit(local, VENGEANCE_ACTIVE_VARBIT, 0);
    assert!(tracker.did_pop_vengeance(local));

    tracker.clear();
    assert!(!tracker.did_pop_vengeance(local));
}
