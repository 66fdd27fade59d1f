pub mod context;
pub mod detectors;
pub mod encounter;
pub mod engine;
pub mod game_data;
pub mod signal_processor;
pub mod tracking;
pub mod world;

// Re-exports for convenience
pub use context::{
    ConfigError, DetectorToggles, HazardThresholds, ParticipantId, TrackerConfig,
    TrackerConfigExt,
};
pub use detectors::{DetectorError, DetectorId, DetectorManager, MistakeDetector, TickMistakes};
pub use encounter::{ParticipantRegistry, Raider};
pub use engine::{MistakeEngine, TickReport};
pub use game_data::{Mistake, RaidRoom, RegistryError, RoomRegistry};
pub use signal_processor::{RaidProgressTracker, RaidSignal, SignalHandler};
pub use world::{Actor, EventKind, Prayer, Tick, Tile, WorldEvent, WorldView};
