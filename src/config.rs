//! Run configuration
//!
//! Every gameplay constant a run depends on, loadable from JSON and validated
//! before a simulation is built.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::ms_to_ticks;

/// Invalid configuration detected at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("squad size must be at least 1")]
    EmptySquad,

    #[error("arena dimensions must be positive, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },

    #[error("{name} must be positive")]
    NonPositive { name: &'static str },

    #[error("{name} must not be negative")]
    Negative { name: &'static str },

    #[error("pickup chance must be within [0, 1], got {0}")]
    InvalidChance(f32),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Simulation parameters for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Squad ===
    pub squad_size: usize,
    pub formation_spacing: f32,
    pub initial_ammo: u32,
    pub unit_speed: f32,
    pub fire_cooldown_ms: u32,
    pub firing_range: f32,

    // === Hostiles ===
    pub hostile_speed: f32,
    pub contact_damage: f32,
    pub spawn_interval_ms: u32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_damage: f32,

    // === Pickups ===
    pub pickup_chance: f32,
    pub min_pickup_interval_ms: u32,
    pub health_pickup_amount: f32,
    pub ammo_pickup_amount: u32,

    // === Run ===
    pub duration_secs: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            squad_size: SQUAD_SIZE,
            formation_spacing: FORMATION_SPACING,
            initial_ammo: INITIAL_AMMO,
            unit_speed: UNIT_SPEED,
            fire_cooldown_ms: FIRE_COOLDOWN_MS,
            firing_range: FIRING_RANGE,

            hostile_speed: HOSTILE_SPEED,
            contact_damage: CONTACT_DAMAGE,
            spawn_interval_ms: SPAWN_INTERVAL_MS,

            projectile_speed: PROJECTILE_SPEED,
            projectile_damage: PROJECTILE_DAMAGE,

            pickup_chance: PICKUP_SPAWN_CHANCE,
            min_pickup_interval_ms: MIN_PICKUP_INTERVAL_MS,
            health_pickup_amount: HEALTH_PICKUP_AMOUNT,
            ammo_pickup_amount: AMMO_PICKUP_AMOUNT,

            duration_secs: GAME_DURATION_SECS,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.squad_size == 0 {
            return Err(ConfigError::EmptySquad);
        }
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(ConfigError::InvalidArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if !(0.0..=1.0).contains(&self.pickup_chance) {
            return Err(ConfigError::InvalidChance(self.pickup_chance));
        }

        // Float comparisons also reject NaN
        let positive = [
            ("duration_secs", self.duration_secs > 0),
            ("spawn_interval_ms", self.spawn_interval_ms > 0),
            ("fire_cooldown_ms", self.fire_cooldown_ms > 0),
            ("unit_speed", self.unit_speed > 0.0),
            ("formation_spacing", self.formation_spacing > 0.0),
            ("hostile_speed", self.hostile_speed > 0.0),
            ("projectile_speed", self.projectile_speed > 0.0),
            ("projectile_damage", self.projectile_damage > 0.0),
            ("firing_range", self.firing_range > 0.0),
            ("health_pickup_amount", self.health_pickup_amount > 0.0),
            ("ammo_pickup_amount", self.ammo_pickup_amount > 0),
        ];
        for (name, ok) in positive {
            if !ok {
                return Err(ConfigError::NonPositive { name });
            }
        }
        if !(self.contact_damage >= 0.0) {
            return Err(ConfigError::Negative {
                name: "contact_damage",
            });
        }
        Ok(())
    }

    /// Run length in ticks
    pub fn duration_ticks(&self) -> u64 {
        self.duration_secs as u64 * TICKS_PER_SECOND as u64
    }

    pub fn spawn_interval_ticks(&self) -> u64 {
        ms_to_ticks(self.spawn_interval_ms)
    }

    pub fn fire_cooldown_ticks(&self) -> u64 {
        ms_to_ticks(self.fire_cooldown_ms)
    }

    pub fn min_pickup_interval_ticks(&self) -> u64 {
        ms_to_ticks(self.min_pickup_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.duration_ticks(), 180 * 60);
        assert_eq!(config.spawn_interval_ticks(), 180);
        assert_eq!(config.fire_cooldown_ticks(), 30);
    }

    #[test]
    fn test_empty_squad_rejected() {
        let config = SimConfig {
            squad_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptySquad)));
    }

    #[test]
    fn test_bad_chance_rejected() {
        let config = SimConfig {
            pickup_chance: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidChance(_))
        ));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let config = SimConfig {
            duration_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                name: "duration_secs"
            })
        ));
    }

    fn rejected_field(config: SimConfig) -> Option<&'static str> {
        match config.validate() {
            Err(ConfigError::NonPositive { name }) | Err(ConfigError::Negative { name }) => {
                Some(name)
            }
            _ => None,
        }
    }

    #[test]
    fn test_damage_and_amounts_rejected() {
        let cases = [
            (
                SimConfig {
                    health_pickup_amount: -200.0,
                    ..Default::default()
                },
                "health_pickup_amount",
            ),
            (
                SimConfig {
                    projectile_damage: -50.0,
                    ..Default::default()
                },
                "projectile_damage",
            ),
            (
                SimConfig {
                    hostile_speed: 0.0,
                    ..Default::default()
                },
                "hostile_speed",
            ),
            (
                SimConfig {
                    formation_spacing: -1.0,
                    ..Default::default()
                },
                "formation_spacing",
            ),
            (
                SimConfig {
                    ammo_pickup_amount: 0,
                    ..Default::default()
                },
                "ammo_pickup_amount",
            ),
            (
                SimConfig {
                    contact_damage: -0.5,
                    ..Default::default()
                },
                "contact_damage",
            ),
        ];
        for (config, field) in cases {
            assert_eq!(rejected_field(config), Some(field));
        }
    }

    #[test]
    fn test_nan_rejected() {
        let config = SimConfig {
            projectile_damage: f32::NAN,
            ..Default::default()
        };
        assert_eq!(rejected_field(config), Some("projectile_damage"));

        let config = SimConfig {
            contact_damage: f32::NAN,
            ..Default::default()
        };
        assert_eq!(rejected_field(config), Some("contact_damage"));
    }

    #[test]
    fn test_zero_contact_damage_allowed() {
        let config = SimConfig {
            contact_damage: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_rejects_negative_amounts() {
        let err = SimConfig::from_json(r#"{"health_pickup_amount":-200.0,"projectile_damage":-50.0}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { .. }));
    }

    #[test]
    fn test_from_json_partial() {
        let config = SimConfig::from_json(r#"{ "squad_size": 6, "duration_secs": 60 }"#)
            .expect("valid config");
        assert_eq!(config.squad_size, 6);
        assert_eq!(config.duration_secs, 60);
        assert_eq!(config.initial_ammo, INITIAL_AMMO);
    }

    #[test]
    fn test_from_json_validates() {
        let err = SimConfig::from_json(r#"{ "squad_size": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptySquad));

        let err = SimConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
