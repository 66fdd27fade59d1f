use std::hash::Hash;

use hashbrown::{HashMap, HashSet};

use crate::world::Tick;

/// Anything that promotes pending items into a one-tick active set.
pub trait ActivationTracker<T> {
    /// Promote items due at `tick`, dropping whatever was active before.
    /// Must run exactly once per tick, before any reads.
    fn advance(&mut self, tick: Tick);

    /// Items active this tick.
    fn active(&self) -> &HashSet<T>;

    fn clear(&mut self);

    fn is_active(&self, item: &T) -> bool
    where
        T: Eq + Hash,
    {
        self.active().contains(item)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Delayed
// ═══════════════════════════════════════════════════════════════════════════

/// Items keyed by the tick on which they become active.
///
/// A tick whose `advance` is skipped loses its items.
#[derive(Debug, Clone)]
pub struct DelayedScheduler<T> {
    pending: HashMap<Tick, HashSet<T>>,
    active: HashSet<T>,
}

impl<T> Default for DelayedScheduler<T> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
            active: HashSet::new(),
        }
    }
}

impl<T: Eq + Hash> DelayedScheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, activation_tick: Tick, item: T) {
        self.pending.entry(activation_tick).or_default().insert(item);
    }

    pub fn schedule_all(&mut self, activation_tick: Tick, items: impl IntoIterator<Item = T>) {
        self.pending.entry(activation_tick).or_default().extend(items);
    }

    /// Number of items still waiting for their tick
    pub fn pending_len(&self) -> usize {
        self.pending.values().map(HashSet::len).sum()
    }
}

impl<T: Eq + Hash> ActivationTracker<T> for DelayedScheduler<T> {
    fn advance(&mut self, tick: Tick) {
        self.active.clear();
        if let Some(items) = self.pending.remove(&tick) {
            self.active = items;
        }
    }

    fn active(&self) -> &HashSet<T> {
        &self.active
    }

    fn clear(&mut self) {
        self.pending.clear();
        self.active.clear();
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Instant
// ═══════════════════════════════════════════════════════════════════════════

/// Items that are active on the tick boundary following the event that added them.
#[derive(Debug, Clone)]
pub struct InstantScheduler<T> {
    incoming: HashSet<T>,
    active: HashSet<T>,
}

impl<T> Default for InstantScheduler<T> {
    fn default() -> Self {
        Self {
            incoming: HashSet::new(),
            active: HashSet::new(),
        }
    }
}

impl<T: Eq + Hash> InstantScheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: T) {
        self.incoming.insert(item);
    }

    pub fn add_all(&mut self, items: impl IntoIterator<Item = T>) {
        self.incoming.extend(items);
    }
}

impl<T: Eq + Hash> ActivationTracker<T> for InstantScheduler<T> {
    fn advance(&mut self, _tick: Tick) {
        self.active = std::mem::take(&mut self.incoming);
    }

    fn active(&self) -> &HashSet<T> {
        &self.active
    }

    fn clear(&mut self) {
        self.incoming.clear();
        self.active.clear();
    }
}
