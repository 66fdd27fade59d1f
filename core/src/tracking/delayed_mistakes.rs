use hashbrown::HashMap;

use crate::context::ParticipantId;
use crate::game_data::Mistake;
use crate::world::Tick;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingMistake {
    mistake: Mistake,
    tick_added: Tick,
    delay: Tick,
}

/// Mistakes detected on one tick but reported once the hit actually lands.
#[derive(Debug, Clone, Default)]
pub struct DelayedMistakes {
    pending: HashMap<ParticipantId, Vec<PendingMistake>>,
}

impl DelayedMistakes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, raider: ParticipantId, mistake: Mistake, current_tick: Tick, delay: Tick) {
        self.pending.entry(raider).or_default().push(PendingMistake {
            mistake,
            tick_added: current_tick,
            delay,
        });
    }

    /// Remove and return every mistake for `raider` whose delay has elapsed.
    pub fn pop_due(&mut self, raider: ParticipantId, current_tick: Tick) -> Vec<Mistake> {
        let Some(entries) = self.pending.get_mut(&raider) else {
            return Vec::new();
        };

        let mut due = Vec::new();
        entries.retain(|entry| {
            if current_tick - entry.tick_added >= entry.delay {
                due.push(entry.mistake);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn is_empty(&self) -> bool {
        self.pending.values().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
