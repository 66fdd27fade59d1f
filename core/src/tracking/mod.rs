//! Per-tick tracking primitives shared by every detector
//!
//! - `DelayedScheduler` / `InstantScheduler`: items that become "active" for
//!   exactly one tick
//! - `HitsplatLedger`: pop-once damage counters for disambiguating co-located raiders
//! - `DelayedMistakes`: mistakes detected now but credited on a later tick
//! - `OverheadTracker`: projectiles whose required prayer is checked when they land
//! - `VengeanceTracker`: raiders whose vengeance reflected a hit this tick

mod delayed_mistakes;
mod ledger;
mod overhead;
mod scheduler;
mod vengeance;

#[cfg(test)]
mod tracking_tests;

pub use delayed_mistakes::DelayedMistakes;
pub use ledger::HitsplatLedger;
pub use overhead::{OverheadTracker, TrackedAttack};
pub use scheduler::{ActivationTracker, DelayedScheduler, InstantScheduler};
pub use vengeance::{VENGEANCE_ACTIVE_VARBIT, VENGEANCE_TEXT, VengeanceTracker};
