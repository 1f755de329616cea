//! Data-driven game balance
//!
//! Every number the simulation uses lives here. Defaults reproduce the
//! shipped balance; hosts may override any subset from JSON (missing fields
//! keep their defaults).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Why a tuning override was rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Balance values for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Collision radius
    pub player_size: f32,
    /// Pixels moved per tick per held key
    pub player_speed: f32,
    pub player_max_hp: u32,
    /// Minimum milliseconds between two shots
    pub shot_cooldown_ms: f64,

    // === Bullets ===
    pub bullet_radius: f32,
    pub enemy_bullet_speed: f32,
    pub enemy_bullet_damage: u32,

    // === Enemies ===
    pub enemy_size: f32,
    pub enemy_base_hp: u32,
    pub enemy_hp_per_level: u32,
    /// Chance per tick that an enemy fires at the player
    pub enemy_fire_rate: f32,
    pub enemy_base_speed: f32,
    pub enemy_speed_per_level: f32,
    /// Chance per tick that a new enemy spawns
    pub enemy_spawn_chance: f32,

    // === Rewards & progression ===
    pub kill_heal: u32,
    pub kill_ammo: u32,
    pub kill_xp: u32,
    /// XP needed to leave level `n` is `n * xp_per_level`
    pub xp_per_level: u32,
    pub levels_per_weapon_unlock: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            player_max_hp: PLAYER_MAX_HP,
            shot_cooldown_ms: SHOT_COOLDOWN_MS,

            bullet_radius: BULLET_RADIUS,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            enemy_bullet_damage: ENEMY_BULLET_DAMAGE,

            enemy_size: ENEMY_SIZE,
            enemy_base_hp: ENEMY_BASE_HP,
            enemy_hp_per_level: ENEMY_HP_PER_LEVEL,
            enemy_fire_rate: ENEMY_FIRE_RATE,
            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_speed_per_level: ENEMY_SPEED_PER_LEVEL,
            enemy_spawn_chance: ENEMY_SPAWN_CHANCE,

            kill_heal: KILL_HEAL,
            kill_ammo: KILL_AMMO,
            kill_xp: KILL_XP,
            xp_per_level: XP_PER_LEVEL,
            levels_per_weapon_unlock: LEVELS_PER_WEAPON_UNLOCK,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse an override, logging and falling back to defaults on failure
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, v: f32) -> Result<(), TuningError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }
        fn chance(field: &'static str, v: f32) -> Result<(), TuningError> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a probability in [0, 1]",
                })
            }
        }
        fn nonzero(field: &'static str, v: u32) -> Result<(), TuningError> {
            if v > 0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be greater than zero",
                })
            }
        }

        positive("player_size", self.player_size)?;
        positive("player_speed", self.player_speed)?;
        positive("bullet_radius", self.bullet_radius)?;
        positive("enemy_size", self.enemy_size)?;
        positive("enemy_bullet_speed", self.enemy_bullet_speed)?;
        chance("enemy_fire_rate", self.enemy_fire_rate)?;
        chance("enemy_spawn_chance", self.enemy_spawn_chance)?;
        nonzero("player_max_hp", self.player_max_hp)?;
        nonzero("xp_per_level", self.xp_per_level)?;
        nonzero("levels_per_weapon_unlock", self.levels_per_weapon_unlock)?;
        nonzero(
            "enemy_base_hp",
            self.enemy_base_hp.saturating_add(self.enemy_hp_per_level),
        )?;

        if !(self.enemy_base_speed.is_finite() && self.enemy_base_speed >= 0.0) {
            return Err(TuningError::Invalid {
                field: "enemy_base_speed",
                reason: "must be a non-negative finite number",
            });
        }
        if !(self.enemy_speed_per_level.is_finite() && self.enemy_speed_per_level >= 0.0) {
            return Err(TuningError::Invalid {
                field: "enemy_speed_per_level",
                reason: "must be a non-negative finite number",
            });
        }
        if !(self.shot_cooldown_ms.is_finite() && self.shot_cooldown_ms >= 0.0) {
            return Err(TuningError::Invalid {
                field: "shot_cooldown_ms",
                reason: "must be a non-negative finite number",
            });
        }
        Ok(())
    }

    /// Enemy hit points for an enemy spawned while the player is at `level`
    pub fn enemy_hp_for_level(&self, level: u32) -> u32 {
        self.enemy_base_hp
            .saturating_add(level.saturating_mul(self.enemy_hp_per_level))
    }

    /// Enemy homing speed (pixels per tick) while the player is at `level`
    pub fn enemy_speed_for_level(&self, level: u32) -> f32 {
        self.enemy_base_speed + level as f32 * self.enemy_speed_per_level
    }

    /// XP required to advance past `level`
    pub fn xp_threshold(&self, level: u32) -> u32 {
        level.saturating_mul(self.xp_per_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 7.5, "kill_xp": 20 }"#).unwrap();
        assert_eq!(tuning.player_speed, 7.5);
        assert_eq!(tuning.kill_xp, 20);
        assert_eq!(tuning.player_max_hp, PLAYER_MAX_HP);
        assert_eq!(tuning.enemy_spawn_chance, ENEMY_SPAWN_CHANCE);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let err = Tuning::from_json(r#"{ "enemy_spawn_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "enemy_spawn_chance",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "xp_per_level": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "xp_per_level",
                ..
            }
        ));

        assert!(Tuning::from_json(r#"{ "player_size": -1.0 }"#).is_err());
    }

    #[test]
    fn test_fallback_on_error() {
        let tuning = Tuning::from_json_or_default(r#"{ "enemy_fire_rate": 3.0 }"#);
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_level_scaling() {
        let tuning = Tuning::default();
        assert_eq!(tuning.enemy_hp_for_level(1), 35);
        assert_eq!(tuning.enemy_hp_for_level(3), 45);
        assert!((tuning.enemy_speed_for_level(1) - 1.05).abs() < 1e-6);
        assert!((tuning.enemy_speed_for_level(10) - 1.5).abs() < 1e-6);
        assert_eq!(tuning.xp_threshold(1), 20);
        assert_eq!(tuning.xp_threshold(4), 80);
    }
}
