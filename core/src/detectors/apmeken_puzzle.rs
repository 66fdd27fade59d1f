//! Path of Apmeken puzzle
//!
//! Team failures arrive as game broadcasts and are credited to every raider.
//! Venom tiles persist from the tick after they spawn until they despawn.
//! Volatile baboons explode in a 3×3 around their tile.

use hashbrown::HashSet;

use crate::encounter::Raider;
use crate::game_data::{Mistake, RaidRoom};
use crate::tracking::{ActivationTracker, InstantScheduler};
use crate::world::{ChatKind, EventKind, Tile, WorldEvent, remove_tags};

use super::{DetectorContext, DetectorError, DetectorId, MistakeDetector};

const VENOM_TILE_GAME_OBJECT_ID: i32 = 45493;
const VOLATILE_GRAPHICS_ID: i32 = 131;

/// Broadcast text -> team mistake
const TEAM_FAILURES: [(&str, Mistake); 3] = [
    (
        "The fumes filling the room suddenly ignite!",
        Mistake::ApmekenPuzzleVent,
    ),
    (
        "Damaged roof supports cause some debris to fall on you!",
        Mistake::ApmekenPuzzlePillar,
    ),
    (
        "Your group is overwhelmed by Amascut's corruption!",
        Mistake::ApmekenPuzzleCorruption,
    ),
];

#[derive(Debug, Default)]
pub struct ApmekenPuzzleDetector {
    team_mistake: Option<Mistake>,
    /// Spawned this tick, harmless until the next one
    venom_spawning: HashSet<Tile>,
    venom_tiles: HashSet<Tile>,
    volatile_tiles: InstantScheduler<Tile>,
}

impl ApmekenPuzzleDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MistakeDetector for ApmekenPuzzleDetector {
    fn id(&self) -> DetectorId {
        DetectorId::ApmekenPuzzle
    }

    fn room(&self) -> Option<RaidRoom> {
        Some(RaidRoom::ApmekenPuzzle)
    }

    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::ChatMessage,
            EventKind::GameObjectSpawned,
            EventKind::GameObjectDespawned,
            EventKind::GraphicsObjectCreated,
        ]
    }

    fn cleanup(&mut self) {
        self.team_mistake = None;
        self.venom_spawning.clear();
        self.venom_tiles.clear();
        self.volatile_tiles.clear();
    }

    fn handle_event(&mut self, event: &WorldEvent, _ctx: &DetectorContext<'_>) {
        match event {
            WorldEvent::ChatMessage {
                kind: ChatKind::Game,
                text,
                ..
            } => {
                let text = remove_tags(text);
                if let Some((_, mistake)) = TEAM_FAILURES.iter().find(|(msg, _)| *msg == text) {
                    self.team_mistake = Some(*mistake);
                }
            }
            WorldEvent::GameObjectSpawned { object_id, tile }
                if *object_id == VENOM_TILE_GAME_OBJECT_ID =>
            {
                self.venom_spawning.insert(*tile);
            }
            WorldEvent::GameObjectDespawned { object_id, tile }
                if *object_id == VENOM_TILE_GAME_OBJECT_ID =>
            {
                self.venom_spawning.remove(tile);
                self.venom_tiles.remove(tile);
            }
            WorldEvent::GraphicsObjectCreated {
                graphics_id, tile, ..
            } if *graphics_id == VOLATILE_GRAPHICS_ID => {
                self.volatile_tiles.add_all(tile.square_around(1));
            }
            _ => {}
        }
    }

    fn on_tick(&mut self, ctx: &DetectorContext<'_>) {
        self.volatile_tiles.advance(ctx.tick);
    }

    fn detect(
        &mut self,
        raider: &Raider,
        _ctx: &DetectorContext<'_>,
    ) -> Result<Vec<Mistake>, DetectorError> {
        let mut mistakes = Vec::new();

        if let Some(team_mistake) = self.team_mistake {
            mistakes.push(team_mistake);
        }

        if raider.was_in(&self.venom_tiles) {
            mistakes.push(Mistake::ApmekenPuzzleVenom);
        }

        if raider.was_in(self.volatile_tiles.active()) {
            mistakes.push(Mistake::ApmekenPuzzleVolatile);
        }

        Ok(mistakes)
    }

    fn after_detect(&mut self) {
        self.team_mistake = None;
        self.venom_tiles.extend(self.venom_spawning.drain());
    }

    fn tracked_tiles(&self) -> Vec<Tile> {
        self.venom_tiles
            .iter()
            .chain(self.volatile_tiles.active())
            .copied()
            .collect()
    }
}
