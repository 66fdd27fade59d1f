//! Tests for roster loading and position history

use crate::context::intern;
use crate::world::Tile;
use crate::world::fake::FakeWorld;

use super::{ParticipantRegistry, RosterLoad};

fn tile(x: i32, y: i32) -> Tile {
    Tile::new(x, y, 0)
}

#[test]
fn roster_is_party_names_that_are_visible() {
    let mut world = FakeWorld::in_region(14160)
        .with_raider("Alpha", tile(1, 1))
        .with_raider("Beta", tile(2, 2));
    world.visible.push("Bystander".to_string());

    let mut registry = ParticipantRegistry::new();
    let load = registry.try_load(&world);

    assert_eq!(load, RosterLoad::Loaded(vec![intern("Alpha"), intern("Beta")]));
    assert!(!registry.contains(intern("Bystander")));
}

#[test]
fn partial_roster_is_discarded() {
    let mut world = FakeWorld::in_region(14160).with_raider("Alpha", tile(1, 1));
    world.party.push("Gamma".to_string());

    let mut registry = ParticipantRegistry::new();
    let load = registry.try_load(&world);

    assert_eq!(load, RosterLoad::Incomplete { expected: 2, found: 1 });
    assert!(registry.is_empty());
}

#[test]
fn blank_hud_entries_and_nbsp_names() {
    let mut world = FakeWorld::in_region(14160);
    world.party = vec!["".to_string(), "Big\u{a0}Raider".to_string()];
    world.visible = vec!["Big\u{a0}Raider".to_string()];

    let mut registry = ParticipantRegistry::new();
    assert_eq!(
        registry.try_load(&world),
        RosterLoad::Loaded(vec![intern("Big Raider")])
    );
}

#[test]
fn previous_position_rolls_only_on_commit() {
    let mut world = FakeWorld::in_region(14160).with_raider("Alpha", tile(5, 5));
    let mut registry = ParticipantRegistry::new();
    registry.try_load(&world);
    let alpha = intern("Alpha");

    registry.observe(&world);
    registry.commit_positions();

    world.move_to("Alpha", tile(6, 5));
    registry.observe(&world);

    let raider = registry.get(alpha).unwrap();
    assert_eq!(raider.current_position, Some(tile(6, 5)));
    assert!(raider.was_on(&tile(5, 5)));

    registry.commit_positions();
    let raider = registry.get(alpha).unwrap();
    assert!(raider.was_on(&tile(6, 5)));
    assert_eq!(raider.previous_for_overlay, Some(tile(5, 5)));
}

#[test]
fn ghost_pose_counts_as_dead_until_cleared() {
    let mut world = FakeWorld::in_region(14160).with_raider("Alpha", tile(5, 5));
    let mut registry = ParticipantRegistry::new();
    registry.try_load(&world);
    let alpha = intern("Alpha");

    world.poses.insert("Alpha".to_string(), 5538);
    registry.observe(&world);
    assert!(registry.get(alpha).unwrap().is_dead());

    world.poses.remove("Alpha");
    registry.observe(&world);
    assert!(!registry.get(alpha).unwrap().is_dead());

    registry.mark_dead(alpha);
    assert!(registry.get(alpha).unwrap().is_dead());
    registry.clear_dead();
    assert!(!registry.get(alpha).unwrap().is_dead());
}
