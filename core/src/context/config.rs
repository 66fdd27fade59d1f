//! Tracker configuration
//!
//! This module re-exports shared types from raidwatch-types and provides
//! persistence for TrackerConfig.

use std::path::Path;

use super::ConfigError;

// Re-export all shared types
pub use raidwatch_types::{DetectorToggles, HazardThresholds, TrackerConfig};

/// Application name used for the platform config directory
pub const APP_NAME: &str = "raidwatch";

/// Config file stem inside the application config directory
pub const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// TrackerConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for TrackerConfig persistence
pub trait TrackerConfigExt: Sized {
    /// Load from the platform config directory, falling back to defaults when the
    /// file is missing or unreadable.
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn load_from_path(path: &Path) -> Result<Self, ConfigError>;
    fn from_toml_str(content: &str) -> Result<Self, ConfigError>;
}

impl TrackerConfigExt for TrackerConfig {
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Falling back to default tracker configuration");
            Self::default()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
