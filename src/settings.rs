//! Game settings and balance tuning
//!
//! Loaded from a JSON file by the native runner; every field has a default
//! so partial files are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::CombatantVariant;

/// Shortest accepted time between difficulty levels, in seconds
pub const MIN_DIFFICULTY_INTERVAL: f32 = 1.0;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Map the session takes place on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MapKind {
    /// Slower, tougher zombies over a wide area
    #[default]
    Forest,
    /// Faster, weaker zombies packed closer together
    Desert,
}

impl MapKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapKind::Forest => "Forest",
            MapKind::Desert => "Desert",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "forest" => Some(MapKind::Forest),
            "desert" => Some(MapKind::Desert),
            _ => None,
        }
    }

    /// Combatant variant that populates this map
    pub fn combatant_variant(&self) -> CombatantVariant {
        match self {
            MapKind::Forest => CombatantVariant::Forest,
            MapKind::Desert => CombatantVariant::Desert,
        }
    }

    /// Half-width of the square spawn region around the origin
    pub fn spawn_half_extent(&self) -> f32 {
        match self {
            MapKind::Forest => 40.0,
            MapKind::Desert => 20.0,
        }
    }
}

/// How much health a projectile hit removes from a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DamageModel {
    /// Every hit removes exactly one point
    #[default]
    Fixed,
    /// Hits remove the player's current damage stat
    PlayerStat,
}

/// Gameplay balance knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub move_speed: f32,
    /// Speed multiplier while running (ignored while aiming)
    pub run_multiplier: f32,
    /// Speed multiplier while aiming
    pub aim_speed_factor: f32,
    pub max_ammo: u32,
    /// Seconds to refill the magazine
    pub reload_time: f32,
    /// Seconds between shots
    pub shot_cooldown: f32,
    pub base_damage: u32,
    pub damage_model: DamageModel,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,

    // === Combatants ===
    /// Player health removed per zombie attack
    pub attack_damage: u32,
    /// Seconds a zombie waits between attacks
    pub attack_cooldown: f32,
    pub kill_score: u64,

    // === Spawning ===
    pub base_population: u32,
    pub max_population: u32,
    pub population_per_level: u32,
    /// Seconds before a dead zombie is replaced
    pub respawn_delay: f32,
    pub min_spawn_distance: f32,
    /// Push applied along +z to spawns that land too close to the player
    pub spawn_push: f32,
    pub loot_cap: u32,
    pub loot_respawn_min: f32,
    pub loot_respawn_max: f32,
    pub interact_range: f32,

    // === Difficulty ===
    /// Seconds of play per difficulty level
    pub difficulty_interval: f32,
    pub health_step: f32,
    pub speed_step: f32,

    // === Loot ===
    pub multiplier_factor: f32,
    pub multiplier_duration: f32,

    /// Freeze reload/cooldown/spawn timers while paused
    pub pause_aware_timers: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: 8.0,
            run_multiplier: 1.6,
            aim_speed_factor: 0.5,
            max_ammo: 30,
            reload_time: 1.5,
            shot_cooldown: 0.1,
            base_damage: 1,
            damage_model: DamageModel::Fixed,

            projectile_speed: 30.0,
            projectile_lifetime: 2.0,

            attack_damage: 10,
            attack_cooldown: 5.0,
            kill_score: 10,

            base_population: 5,
            max_population: 20,
            population_per_level: 2,
            respawn_delay: 3.0,
            min_spawn_distance: 10.0,
            spawn_push: 15.0,
            loot_cap: 2,
            loot_respawn_min: 2.0,
            loot_respawn_max: 5.0,
            interact_range: 2.5,

            difficulty_interval: 30.0,
            health_step: 0.25,
            speed_step: 0.1,

            multiplier_factor: 2.0,
            multiplier_duration: 30.0,

            pause_aware_timers: true,
        }
    }
}

impl Tuning {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), SettingsError> {
            Err(SettingsError::Invalid { field, reason })
        }

        for (field, value) in [
            ("move_speed", self.move_speed),
            ("run_multiplier", self.run_multiplier),
            ("aim_speed_factor", self.aim_speed_factor),
            ("reload_time", self.reload_time),
            ("shot_cooldown", self.shot_cooldown),
            ("projectile_speed", self.projectile_speed),
            ("projectile_lifetime", self.projectile_lifetime),
            ("attack_cooldown", self.attack_cooldown),
            ("respawn_delay", self.respawn_delay),
            ("min_spawn_distance", self.min_spawn_distance),
            ("spawn_push", self.spawn_push),
            ("loot_respawn_min", self.loot_respawn_min),
            ("loot_respawn_max", self.loot_respawn_max),
            ("interact_range", self.interact_range),
            ("difficulty_interval", self.difficulty_interval),
            ("health_step", self.health_step),
            ("speed_step", self.speed_step),
            ("multiplier_factor", self.multiplier_factor),
            ("multiplier_duration", self.multiplier_duration),
        ] {
            if !value.is_finite() {
                return invalid(field, "must be a finite number");
            }
        }

        if self.max_ammo == 0 {
            return invalid("max_ammo", "must be at least 1");
        }
        if self.projectile_lifetime <= 0.0 {
            return invalid("projectile_lifetime", "must be positive");
        }
        if self.difficulty_interval < MIN_DIFFICULTY_INTERVAL {
            return invalid("difficulty_interval", "must be at least 1 second");
        }
        if self.loot_respawn_min > self.loot_respawn_max {
            return invalid("loot_respawn_min", "must not exceed loot_respawn_max");
        }
        if self.max_population < self.base_population {
            return invalid("max_population", "must be at least base_population");
        }
        if self.multiplier_factor < 1.0 {
            return invalid("multiplier_factor", "must be at least 1.0");
        }
        for (field, value) in [
            ("reload_time", self.reload_time),
            ("shot_cooldown", self.shot_cooldown),
            ("respawn_delay", self.respawn_delay),
            ("attack_cooldown", self.attack_cooldown),
        ] {
            if value < 0.0 {
                return invalid(field, "must not be negative");
            }
        }
        Ok(())
    }
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed (identical seeds and inputs replay identically)
    pub seed: u64,
    pub map: MapKind,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            map: MapKind::Forest,
            master_volume: 0.5,
            muted: false,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Default settings on `map`
    ///
    /// Map differences come from the combatant variant and spawn extent;
    /// tuning is shared.
    pub fn from_map(map: MapKind) -> Self {
        Self {
            map,
            ..Self::default()
        }
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.tuning.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "map": "Desert", "tuning": { "max_ammo": 12 } }"#)
            .expect("valid settings");
        assert_eq!(settings.map, MapKind::Desert);
        assert_eq!(settings.tuning.max_ammo, 12);
        assert_eq!(settings.tuning.reload_time, 1.5);
        assert!(settings.tuning.pause_aware_timers);
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let err = Settings::from_json(r#"{ "tuning": { "max_ammo": 0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "max_ammo", .. }));

        let err = Settings::from_json(
            r#"{ "tuning": { "loot_respawn_min": 9.0, "loot_respawn_max": 3.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "loot_respawn_min", .. }));
    }

    #[test]
    fn test_degenerate_numbers_rejected() {
        let err = Settings::from_json(r#"{ "tuning": { "difficulty_interval": 1e-10 } }"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "difficulty_interval", .. }));

        // Overflows f32
        assert!(Settings::from_json(r#"{ "tuning": { "respawn_delay": 1e39 } }"#).is_err());

        let tuning = Tuning {
            move_speed: f32::NAN,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(SettingsError::Invalid { field: "move_speed", .. })
        ));
        let tuning = Tuning {
            respawn_delay: f32::INFINITY,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(SettingsError::Invalid { field: "respawn_delay", .. })
        ));
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_volume_clamped() {
        let settings = Settings::from_json(r#"{ "master_volume": 3.0 }"#).expect("valid");
        assert_eq!(settings.master_volume, 1.0);
    }

    #[test]
    fn test_map_parse() {
        assert_eq!(MapKind::parse("DESERT"), Some(MapKind::Desert));
        assert_eq!(MapKind::parse("swamp"), None);
        let desert = Settings::from_map(MapKind::Desert);
        assert_eq!(desert.map.spawn_half_extent(), 20.0);
        assert_eq!(desert.tuning.respawn_delay, Tuning::default().respawn_delay);
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load_from("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
