//! Shared configuration types for raidwatch
//!
//! This crate contains serializable configuration types that are shared between
//! the detection engine (raidwatch-core) and whatever frontend renders its output.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Tracker Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level tracker configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub detectors: DetectorToggles,

    #[serde(default)]
    pub thresholds: HazardThresholds,
}

/// Per-detector enable flags. A disabled detector is never started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorToggles {
    pub death: bool,
    pub het_puzzle: bool,
    pub crondis_puzzle: bool,
    pub apmeken_puzzle: bool,
    pub akkha: bool,
    pub zebak: bool,
    pub kephri: bool,
    pub baba: bool,
    pub wardens_p1_p2: bool,
    pub wardens_p3: bool,
}

impl Default for DetectorToggles {
    fn default() -> Self {
        Self {
            death: true,
            het_puzzle: true,
            crondis_puzzle: true,
            apmeken_puzzle: true,
            akkha: true,
            zebak: true,
            kephri: true,
            baba: true,
            wardens_p1_p2: true,
            wardens_p3: true,
        }
    }
}

/// Tunable constants for heuristic hazard rules.
///
/// These are approximations observed in game, not exact mechanics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardThresholds {
    /// Hitsplats above this amount during a projectile boulder volley count as a
    /// failed dodge. Correct handling deals ~4 damage, failing deals ~40.
    pub projectile_boulder_damage: i32,

    /// Ticks after a banana slip during which another slip is not counted again
    pub banana_slip_cooldown_ticks: i32,
}

impl Default for HazardThresholds {
    fn default() -> Self {
        Self {
            projectile_boulder_damage: 15,
            banana_slip_cooldown_ticks: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config: TrackerConfig = toml::from_str("").unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert!(config.detectors.baba);
        assert_eq!(config.thresholds.projectile_boulder_damage, 15);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: TrackerConfig = toml::from_str(
            r#"
            [detectors]
            zebak = false
            wardens_p1_p2 = false

            [thresholds]
            projectile_boulder_damage = 20
            "#,
        )
        .unwrap();

        assert!(!config.detectors.zebak);
        assert!(config.detectors.akkha);
        assert!(!config.detectors.wardens_p1_p2);
        assert!(config.detectors.crondis_puzzle);
        assert_eq!(config.thresholds.projectile_boulder_damage, 20);
        assert_eq!(config.thresholds.banana_slip_cooldown_ticks, 3);
    }

    #[test]
    fn display_settings_from_older_files_are_ignored() {
        let config: TrackerConfig = toml::from_str(
            r#"
            show_mistakes_in_chat = false
            debug_mode = true

            [detectors]
            baba = false
            "#,
        )
        .unwrap();

        assert!(!config.detectors.baba);
        assert_eq!(config.thresholds, HazardThresholds::default());
    }
}
