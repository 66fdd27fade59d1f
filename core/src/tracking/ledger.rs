use hashbrown::HashMap;

use crate::context::ParticipantId;

/// Damage hitsplats received per raider during the current tick.
///
/// Several raiders can stand on the same hazard tile while only one is struck.
/// A detector confirms a tile match with `pop_hit`, which consumes one recorded hit.
#[derive(Debug, Clone, Default)]
pub struct HitsplatLedger {
    hits: HashMap<ParticipantId, u32>,
}

impl HitsplatLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self, raider: ParticipantId) {
        *self.hits.entry(raider).or_insert(0) += 1;
    }

    /// Consume one hit for `raider`. Returns false when none are left.
    pub fn pop_hit(&mut self, raider: ParticipantId) -> bool {
        match self.hits.get_mut(&raider) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn hits_for(&self, raider: ParticipantId) -> u32 {
        self.hits.get(&raider).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.hits.clear();
    }
}
