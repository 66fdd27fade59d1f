use hashbrown::HashSet;

use crate::context::{ParticipantId, intern_name, resolve};
use crate::world::{Tile, WorldView};

/// Pose animations shown while a player is a ghost (dead, waiting to respawn)
pub const GHOST_POSE_IDS: [i32; 2] = [5538, 5539];

/// Upper bound on party size
const MAX_RAIDERS: usize = 8;

/// A tracked raid member.
///
/// Position is held in two slots. `current_position` is read from the client at
/// the start of each tick; `previous_position` is rolled from it only after every
/// detector has evaluated that tick. Spatial rules read `previous_position`, which
/// is where the raider stood when the hazard was resolved server side.
#[derive(Debug, Clone, PartialEq)]
pub struct Raider {
    pub name: ParticipantId,
    pub current_position: Option<Tile>,
    pub previous_position: Option<Tile>,
    /// One tick older than `previous_position`, for debug rendering
    pub previous_for_overlay: Option<Tile>,
    pub pose: Option<i32>,
    dead: bool,
}

impl Raider {
    pub fn new(name: ParticipantId) -> Self {
        Self {
            name,
            current_position: None,
            previous_position: None,
            previous_for_overlay: None,
            pose: None,
            dead: false,
        }
    }

    pub fn name_str(&self) -> &'static str {
        resolve(self.name)
    }

    /// Dead by an observed death, or currently showing a ghost pose.
    pub fn is_dead(&self) -> bool {
        self.dead || self.pose.is_some_and(|pose| GHOST_POSE_IDS.contains(&pose))
    }

    pub fn was_on(&self, tile: &Tile) -> bool {
        self.previous_position.as_ref() == Some(tile)
    }

    /// Previous tile is one of `tiles`
    pub fn was_in(&self, tiles: &HashSet<Tile>) -> bool {
        self.previous_position.is_some_and(|pos| tiles.contains(&pos))
    }
}

/// Outcome of a roster read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterLoad {
    Loaded(Vec<ParticipantId>),
    /// The HUD or the scene was not ready; try again next tick
    Incomplete { expected: usize, found: usize },
}

/// Ordered set of raiders for the current raid.
#[derive(Debug, Clone, Default)]
pub struct ParticipantRegistry {
    raiders: Vec<Raider>,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the roster as party HUD names that are also visible players.
    ///
    /// A read with no raiders, or fewer raiders than HUD names, leaves the
    /// registry empty.
    pub fn try_load(&mut self, world: &dyn WorldView) -> RosterLoad {
        self.raiders.clear();

        let mut expected: Vec<ParticipantId> = Vec::with_capacity(MAX_RAIDERS);
        for name in world.party_names().iter().take(MAX_RAIDERS) {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let key = intern_name(name);
            if !expected.contains(&key) {
                expected.push(key);
            }
        }

        for player in world.visible_players() {
            let key = intern_name(&player);
            if expected.contains(&key) && !self.contains(key) {
                self.raiders.push(Raider::new(key));
            }
        }

        if self.raiders.is_empty() || self.raiders.len() < expected.len() {
            let found = self.raiders.len();
            self.raiders.clear();
            return RosterLoad::Incomplete {
                expected: expected.len(),
                found,
            };
        }

        RosterLoad::Loaded(self.ids())
    }

    /// Refresh live position and pose for every raider. Called once at the start
    /// of tick processing.
    pub fn observe(&mut self, world: &dyn WorldView) {
        for raider in &mut self.raiders {
            let name = resolve(raider.name);
            raider.current_position = world.participant_position(name);
            raider.pose = world.participant_pose(name);
        }
    }

    /// Roll position slots. Called once per tick, after all evaluation.
    pub fn commit_positions(&mut self) {
        for raider in &mut self.raiders {
            raider.previous_for_overlay = raider.previous_position;
            raider.previous_position = raider.current_position;
        }
    }

    pub fn mark_dead(&mut self, name: ParticipantId) {
        if let Some(raider) = self.get_mut(name) {
            raider.dead = true;
        }
    }

    /// Clear death flags after the client reloads the scene.
    pub fn clear_dead(&mut self) {
        for raider in &mut self.raiders {
            raider.dead = false;
        }
    }

    pub fn contains(&self, name: ParticipantId) -> bool {
        self.raiders.iter().any(|r| r.name == name)
    }

    pub fn get(&self, name: ParticipantId) -> Option<&Raider> {
        self.raiders.iter().find(|r| r.name == name)
    }

    fn get_mut(&mut self, name: ParticipantId) -> Option<&mut Raider> {
        self.raiders.iter_mut().find(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Raider> {
        self.raiders.iter()
    }

    pub fn ids(&self) -> Vec<ParticipantId> {
        self.raiders.iter().map(|r| r.name).collect()
    }

    pub fn len(&self) -> usize {
        self.raiders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raiders.is_empty()
    }

    pub fn clear(&mut self) {
        self.raiders.clear();
    }

    #[cfg(test)]
    pub(crate) fn insert(&mut self, raider: Raider) {
        self.raiders.push(raider);
    }
}
