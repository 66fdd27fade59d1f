//! Query port into the live game client

use serde::{Deserialize, Serialize};

use super::{RegionId, Tile};

/// Active protection prayer shown over a player's head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prayer {
    Magic,
    Ranged,
    Melee,
}

/// Read-only view of the game client, passed into each engine call.
///
/// Every query may return `None`/empty while the client is loading; callers treat
/// that as transient and retry on a later tick.
pub trait WorldView {
    /// Name of the observing player.
    fn local_player_name(&self) -> Option<String>;

    /// Region id of the observer's current location.
    fn local_region(&self) -> Option<RegionId>;

    /// Live tile of a named player, if currently visible.
    fn participant_position(&self, name: &str) -> Option<Tile>;

    /// Current pose animation of a named player.
    fn participant_pose(&self, name: &str) -> Option<i32>;

    /// Names shown in the party HUD. Entries may be blank while loading.
    fn party_names(&self) -> Vec<String>;

    /// Names of all players currently rendered around the observer.
    fn visible_players(&self) -> Vec<String>;

    fn overhead_prayer(&self, name: &str) -> Option<Prayer>;

    /// Animation currently rendered by the game object `object_id` on `tile`.
    fn game_object_animation(&self, object_id: i32, tile: Tile) -> Option<i32>;
}
