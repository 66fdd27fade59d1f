mod config;
mod error;
mod interner;

pub use config::{
    APP_NAME, CONFIG_NAME, DetectorToggles, HazardThresholds, TrackerConfig, TrackerConfigExt,
};
pub use error::ConfigError;
pub use interner::{IStr, ParticipantId, intern, intern_name, interner, resolve};
