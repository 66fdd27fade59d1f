pub mod handler;
pub mod processor;
pub mod signal;


pub use handler::SignalHandler;
pub use processor::{RaidProgressTracker, WIPE_MESSAGE_PREFIX};
pub use signal::RaidSignal;
