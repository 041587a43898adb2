//! Rule constants for combat resolution.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from loading a combat configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid rule value: {0}")]
    Invalid(String),
}

/// How spell casting treats the mana pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManaPolicy {
    /// Casting always succeeds and mana may go negative.
    #[default]
    AllowNegative,
    /// Casting always succeeds and mana stops at zero.
    ClampAtZero,
    /// Casting a spell the character cannot afford is rejected.
    RequireFunds,
}

/// Thresholds and constants used by the combat engine.
///
/// A check succeeds when `roll + attribute` is strictly greater than its
/// threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Faces of the die used for every roll.
    pub die_sides: u32,
    /// An attack above this hits.
    pub hit_threshold: u32,
    /// An attack above this is critical. Also the bar an enemy defense
    /// must clear against a critical.
    pub critical_threshold: u32,
    /// Player dodge check, against agility.
    pub dodge_threshold: u32,
    /// Player block check, against strength.
    pub block_threshold: u32,
    /// Player parry check, against the better of strength and agility.
    pub parry_threshold: u32,
    /// Mana a weapon strike restores per point of will.
    pub weapon_mana_per_will: u32,
    /// Display name of the basic weapon strike.
    pub weapon_name: String,
    pub mana_policy: ManaPolicy,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            die_sides: 6,
            hit_threshold: 4,
            critical_threshold: 6,
            dodge_threshold: 6,
            block_threshold: 4,
            parry_threshold: 6,
            weapon_mana_per_will: 5,
            weapon_name: "Sword".to_string(),
            mana_policy: ManaPolicy::AllowNegative,
        }
    }
}

impl CombatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn with_mana_policy(mut self, policy: ManaPolicy) -> Self {
        self.mana_policy = policy;
        self
    }

    pub fn with_weapon_name(mut self, name: impl Into<String>) -> Self {
        self.weapon_name = name.into();
        self
    }

    pub fn with_die_sides(mut self, sides: u32) -> Self {
        self.die_sides = sides;
        self
    }

    pub fn with_hit_threshold(mut self, threshold: u32) -> Self {
        self.hit_threshold = threshold;
        self
    }

    pub fn with_critical_threshold(mut self, threshold: u32) -> Self {
        self.critical_threshold = threshold;
        self
    }

    pub fn with_weapon_mana_per_will(mut self, mana: u32) -> Self {
        self.weapon_mana_per_will = mana;
        self
    }

    /// Reject rule values the engine cannot roll with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.die_sides < 1 {
            return Err(ConfigError::Invalid(format!(
                "die_sides must be at least 1 (got {})",
                self.die_sides
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CombatConfig::from_json(r#"{"mana_policy": "clamp_at_zero"}"#).unwrap();
        assert_eq!(config.mana_policy, ManaPolicy::ClampAtZero);
        assert_eq!(config.hit_threshold, 4);
        assert_eq!(config.weapon_name, "Sword");
    }

    #[test]
    fn test_invalid_json() {
        let err = CombatConfig::from_json(r#"{"die_sides": "six"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_sided_die_rejected() {
        let err = CombatConfig::from_json(r#"{"die_sides": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(CombatConfig::new().with_die_sides(0).validate().is_err());
    }

    #[test]
    fn test_builders_set_rules() {
        let config = CombatConfig::new()
            .with_die_sides(20)
            .with_hit_threshold(10)
            .with_critical_threshold(19)
            .with_weapon_mana_per_will(2)
            .with_weapon_name("Axe");
        assert!(config.validate().is_ok());
        assert_eq!(config.die_sides, 20);
        assert_eq!(config.hit_threshold, 10);
        assert_eq!(config.critical_threshold, 19);
        assert_eq!(config.weapon_mana_per_will, 2);
        assert_eq!(config.weapon_name, "Axe");

        let huge = CombatConfig::from_json(r#"{"die_sides": 4294967295}"#).unwrap();
        assert_eq!(huge.die_sides, u32::MAX);
    }

    #[test]
    fn test_missing_file() {
        let err = CombatConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
