//! Prayer checks for tracked projectiles

use hashbrown::HashMap;

use crate::context::ParticipantId;
use crate::world::{Actor, CYCLES_PER_TICK, Prayer, ProjectileRef, Tick, ticks_from_cycles};

use super::{ActivationTracker, DelayedScheduler};

/// A projectile aimed at a raider, remembered with the prayer that blocks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackedAttack {
    pub key: u64,
    pub projectile_id: i32,
    pub target: ParticipantId,
    pub required: Prayer,
    /// Tick the projectile reaches its target, fixed when tracking starts
    pub lands: Tick,
}

/// Schedules attack projectiles and checks the target's overhead prayer on the
/// tick the attack resolves.
#[derive(Debug, Clone)]
pub struct OverheadTracker {
    attacks: &'static phf::Map<i32, Prayer>,
    scheduled: DelayedScheduler<TrackedAttack>,
    /// Projectile key -> landing tick. Keys are kept until the projectile lands.
    seen: HashMap<u64, Tick>,
}

impl OverheadTracker {
    pub fn new(attacks: &'static phf::Map<i32, Prayer>) -> Self {
        Self {
            attacks,
            scheduled: DelayedScheduler::new(),
            seen: HashMap::new(),
        }
    }

    pub fn tracks(&self, projectile_id: i32) -> bool {
        self.attacks.contains_key(&projectile_id)
    }

    /// Start tracking a projectile seen on tick `now`. The prayer check becomes
    /// active on `activation_tick`. Returns false when it is not an attack in the
    /// table, has no player target, is already tracked, or has one tick or less
    /// left (a leftover from an earlier attack).
    pub fn track_projectile(
        &mut self,
        projectile: ProjectileRef,
        target: Option<&Actor>,
        remaining_cycles: i32,
        now: Tick,
        activation_tick: Tick,
    ) -> bool {
        let Some(&required) = self.attacks.get(&projectile.id) else {
            return false;
        };
        let Some(target) = target.and_then(Actor::player_name) else {
            return false;
        };
        if self.seen.contains_key(&projectile.key) || remaining_cycles <= CYCLES_PER_TICK {
            return false;
        }
        let lands = now + ticks_from_cycles(remaining_cycles);
        self.seen.insert(projectile.key, lands);

        self.scheduled.schedule(
            activation_tick,
            TrackedAttack {
                key: projectile.key,
                projectile_id: projectile.id,
                target,
                required,
                lands,
            },
        );
        true
    }

    pub fn advance(&mut self, tick: Tick) {
        self.scheduled.advance(tick);
        self.seen.retain(|_, lands| *lands > tick);
    }

    /// The attack resolving on `raider` this tick, if any.
    pub fn active_attack_for(&self, raider: ParticipantId) -> Option<&TrackedAttack> {
        self.scheduled
            .active()
            .iter()
            .find(|attack| attack.target == raider)
    }

    /// True when an attack resolves on `raider` this tick and their prayer does
    /// not block it.
    pub fn did_miss_prayer(&self, raider: ParticipantId, prayer: Option<Prayer>) -> bool {
        match self.active_attack_for(raider) {
            Some(attack) => prayer != Some(attack.required),
            None => false,
        }
    }

    /// Projectile is in flight and will not be tracked again
    pub fn is_tracking(&self, key: u64) -> bool {
        self.seen.contains_key(&key)
    }

    pub fn clear(&mut self) {
        self.scheduled.clear();
        self.seen.clear();
    }
}
