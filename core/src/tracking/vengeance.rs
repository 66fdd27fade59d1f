use hashbrown::HashSet;

use crate::context::ParticipantId;

/// Overhead text shown when vengeance reflects a hit
pub const VENGEANCE_TEXT: &str = "Taste vengeance!";

/// Local player's vengeance flag. Drops to 0 when it is consumed.
pub const VENGEANCE_ACTIVE_VARBIT: i32 = 2450;

/// Raiders whose vengeance reflected a hit this tick.
///
/// Other players are seen through their overhead text. Typing the same words in
/// public chat also puts them over the player's head, so names that sent it as a
/// chat message this tick are discounted. The local player is read from its own
/// vengeance flag instead.
#[derive(Debug, Clone, Default)]
pub struct VengeanceTracker {
    procced: HashSet<ParticipantId>,
    typed: HashSet<ParticipantId>,
}

impl VengeanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A varbit of the local raider changed.
    pub fn on_local_varbit(&mut self, local: ParticipantId, varbit_id: i32, value: i32) {
        if varbit_id == VENGEANCE_ACTIVE_VARBIT && value == 0 {
            self.procced.insert(local);
        }
    }

    pub fn on_overhead_text(&mut self, name: ParticipantId, text: &str, local: Option<ParticipantId>) {
        if Self::is_other_vengeance(name, text, local) {
            self.procced.insert(name);
        }
    }

    pub fn on_public_chat(&mut self, name: ParticipantId, text: &str, local: Option<ParticipantId>) {
        if Self::is_other_vengeance(name, text, local) {
            self.typed.insert(name);
        }
    }

    /// Tick boundary: drop overhead text that came from a chat message.
    pub fn advance(&mut self) {
        let typed = &self.typed;
        self.procced.retain(|name| !typed.contains(name));
    }

    pub fn did_pop_vengeance(&self, raider: ParticipantId) -> bool {
        self.procced.contains(&raider)
    }

    pub fn clear(&mut self) {
        self.procced.clear();
        self.typed.clear();
    }

    fn is_other_vengeance(name: ParticipantId, text: &str, local: Option<ParticipantId>) -> bool {
        local != Some(name) && text == VENGEANCE_TEXT
    }
}
