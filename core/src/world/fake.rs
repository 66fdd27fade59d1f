//! In-memory `WorldView` for tests

use hashbrown::HashMap;

use super::{Prayer, RegionId, Tile, WorldView};

#[derive(Debug, Default, Clone)]
pub struct FakeWorld {
    pub local_player: Option<String>,
    pub region: Option<RegionId>,
    pub positions: HashMap<String, Tile>,
    pub poses: HashMap<String, i32>,
    pub party: Vec<String>,
    pub visible: Vec<String>,
    pub prayers: HashMap<String, Prayer>,
    pub object_animations: HashMap<(i32, Tile), i32>,
}

impl FakeWorld {
    pub fn in_region(region: RegionId) -> Self {
        Self {
            region: Some(region),
            ..Self::default()
        }
    }

    /// Add a visible party member standing on `tile`.
    pub fn with_raider(mut self, name: &str, tile: Tile) -> Self {
        self.party.push(name.to_string());
        self.visible.push(name.to_string());
        self.positions.insert(name.to_string(), tile);
        self
    }

    pub fn move_to(&mut self, name: &str, tile: Tile) {
        self.positions.insert(name.to_string(), tile);
    }

    pub fn set_object_animation(&mut self, object_id: i32, tile: Tile, animation: Option<i32>) {
        match animation {
            Some(animation) => self.object_animations.insert((object_id, tile), animation),
            None => self.object_animations.remove(&(object_id, tile)),
        };
    }

    pub fn set_prayer(&mut self, name: &str, prayer: Option<Prayer>) {
        match prayer {
            Some(prayer) => self.prayers.insert(name.to_string(), prayer),
            None => self.prayers.remove(name),
        };
    }
}

impl WorldView for FakeWorld {
    fn local_player_name(&self) -> Option<String> {
        self.local_player.clone()
    }

    fn local_region(&self) -> Option<RegionId> {
        self.region
    }

    fn participant_position(&self, name: &str) -> Option<Tile> {
        self.positions.get(name).copied()
    }

    fn participant_pose(&self, name: &str) -> Option<i32> {
        self.poses.get(name).copied()
    }

    fn party_names(&self) -> Vec<String> {
        self.party.clone()
    }

    fn visible_players(&self) -> Vec<String> {
        self.visible.clone()
    }

    fn overhead_prayer(&self, name: &str) -> Option<Prayer> {
        self.prayers.get(name).copied()
    }

    fn game_object_animation(&self, object_id: i32, tile: Tile) -> Option<i32> {
        self.object_animations.get(&(object_id, tile)).copied()
    }
}
