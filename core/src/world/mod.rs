//! World model consumed by the engine
//!
//! The game client is an external collaborator. Everything the engine knows about
//! it arrives through two narrow seams:
//! - **Events**: `WorldEvent` notifications delivered between tick boundaries
//! - **Queries**: the `WorldView` port, read during tick processing
//!
//! Nothing here mutates game state.

mod clock;
mod event;
mod text;
mod tile;
mod view;

#[cfg(test)]
pub mod fake;

pub use clock::{CYCLES_PER_TICK, Clock, Tick, ticks_from_cycles};
pub use event::{Actor, ChatKind, EventKind, HitsplatKind, NpcRef, ProjectileRef, WorldEvent};
pub use text::remove_tags;
pub use tile::{RegionId, Tile};
pub use view::{Prayer, WorldView};
