//! Game limits and battle tuning
//!
//! All magic numbers are collected here. Values are read at the moment they
//! matter (character validation, team insertion, battle start), so changing a
//! field affects every later check.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::ConfigError;

/// The four limits enforced when building characters and teams
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Cap on strength + agility + intelligence at creation time
    pub max_stat_points: i32,

    /// How many direct members a Team may hold
    pub max_characters_per_team: usize,

    /// How many abilities one character may carry
    pub max_abilities: usize,

    /// How many direct child teams an Army may hold
    pub max_teams_per_army: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            max_stat_points: 50,
            max_characters_per_team: 5,
            max_abilities: 3,
            max_teams_per_army: 3,
        }
    }
}

impl GameSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate limits for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_stat_points < 0 {
            return Err(ConfigError::Invalid(format!(
                "max_stat_points ({}) must not be negative",
                self.max_stat_points
            )));
        }

        if self.max_characters_per_team == 0 || self.max_teams_per_army == 0 {
            return Err(ConfigError::Invalid(
                "team and army capacities must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

/// Battle loop tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Completed rounds after which the battle ends in a stalemate
    pub max_rounds: u32,

    /// Ask the caller whether to continue every N completed rounds; 0 never asks
    pub continue_poll_interval: u32,

    /// Experience for each survivor of the winning side
    pub victory_experience: u32,

    /// Experience for every survivor when the battle is drawn
    pub draw_experience: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_rounds: 100,
            continue_poll_interval: 3,
            victory_experience: 50,
            draw_experience: 20,
        }
    }
}

impl BattleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds == 0 {
            return Err(ConfigError::Invalid("max_rounds must be at least 1".into()));
        }
        Ok(())
    }
}

/// Contents of a settings file (`[limits]` and `[battle]` tables)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkirmishConfig {
    pub limits: GameSettings,
    pub battle: BattleConfig,
}

impl SkirmishConfig {
    /// Parse settings from TOML text, filling missing fields with defaults
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: SkirmishConfig = toml::from_str(contents)?;
        config.limits.validate()?;
        config.battle.validate()?;
        Ok(config)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<SkirmishConfig> = OnceLock::new();

/// Get the process-wide config (initializes with defaults if not set)
///
/// Library code takes settings as explicit arguments; this exists for binaries.
pub fn config() -> &'static SkirmishConfig {
    CONFIG.get_or_init(SkirmishConfig::default)
}

/// Set the process-wide config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: SkirmishConfig) -> Result<(), SkirmishConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let settings = GameSettings::default();
        assert_eq!(settings.max_stat_points, 50);
        assert_eq!(settings.max_characters_per_team, 5);
        assert_eq!(settings.max_abilities, 3);
        assert_eq!(settings.max_teams_per_army, 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let settings = GameSettings {
            max_characters_per_team: 0,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SkirmishConfig::from_toml(
            r#"
            [limits]
            max_abilities = 4

            [battle]
            max_rounds = 20
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.limits.max_abilities, 4);
        assert_eq!(config.limits.max_stat_points, 50);
        assert_eq!(config.battle.max_rounds, 20);
        assert_eq!(config.battle.victory_experience, 50);
    }

    #[test]
    fn test_invalid_battle_config_rejected() {
        let result = SkirmishConfig::from_toml("[battle]\nmax_rounds = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = SkirmishConfig::from_toml("[limits\nmax_abilities = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
