//! Discrete tick clock

/// The unit of time. All scheduling is in whole ticks.
pub type Tick = i32;

/// Client render cycles per game tick (600ms tick / 20ms cycle).
pub const CYCLES_PER_TICK: i32 = 30;

/// Convert a remaining-cycles value reported by the client into whole ticks.
///
/// Truncates toward zero, matching how the client rounds effect start times.
pub fn ticks_from_cycles(cycles: i32) -> Tick {
    cycles / CYCLES_PER_TICK
}

/// The engine's only time source.
///
/// `now()` is the tick currently being assembled: events received after tick
/// `N - 1` was processed and before tick `N` is processed belong to tick `N`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Clock {
    now: Tick,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    /// Jump to the tick about to be processed. Returns how many ticks were
    /// skipped since the last boundary (0 for a normal step).
    pub fn advance_to(&mut self, tick: Tick) -> Tick {
        let skipped = (tick - self.now).max(0);
        self.now = tick;
        skipped
    }

    /// Close the processed tick; subsequent events belong to the next one.
    pub fn finish_tick(&mut self) {
        self.now += 1;
    }
}
