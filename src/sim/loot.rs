//! Loot containers
//!
//! A container opens exactly once and hands the player one random reward.

use glam::Vec3;
use rand::Rng;
use serde::Serialize;

use super::player::Player;
use super::state::EntityId;
use crate::settings::Tuning;

/// Reward rolled from a container
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LootReward {
    /// Health restored (capped at max health)
    Health(u32),
    /// Magazine size increase
    AmmoCapacity(u32),
    /// Damage stat increase
    Damage(u32),
    /// Movement speed increase
    Speed(f32),
    /// Temporary score multiplier
    ScoreMultiplier { factor: f32, duration: f32 },
}

impl LootReward {
    pub fn describe(&self) -> String {
        match self {
            LootReward::Health(n) => format!("+{} health", n),
            LootReward::AmmoCapacity(n) => format!("+{} ammo capacity", n),
            LootReward::Damage(n) => format!("+{} damage", n),
            LootReward::Speed(s) => format!("+{:.2} speed", s),
            LootReward::ScoreMultiplier { factor, duration } => {
                format!("x{:.0} score for {:.0}s", factor, duration)
            }
        }
    }
}

/// Result of opening a container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LootGrant {
    pub reward: LootReward,
    /// False when the roll had no effect (multiplier already active)
    pub applied: bool,
}

/// Roll one reward category and its magnitude
pub fn roll_reward<R: Rng>(rng: &mut R, tuning: &Tuning) -> LootReward {
    match rng.random_range(0..5u32) {
        0 => LootReward::Health(rng.random_range(50..100)),
        1 => LootReward::AmmoCapacity(rng.random_range(5..11)),
        2 => LootReward::Damage(rng.random_range(1..3)),
        3 => LootReward::Speed(rng.random_range(0.1..0.3)),
        _ => LootReward::ScoreMultiplier {
            factor: tuning.multiplier_factor,
            duration: tuning.multiplier_duration,
        },
    }
}

/// A one-shot reward box in the world
#[derive(Debug, Clone)]
pub struct LootContainer {
    pub id: EntityId,
    pub position: Vec3,
    opened: bool,
}

impl LootContainer {
    pub fn new(id: EntityId, position: Vec3) -> Self {
        Self {
            id,
            position,
            opened: false,
        }
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    /// Open the container and grant a random reward; `None` if it was already opened
    pub fn interact<R: Rng>(&mut self, player: &mut Player, tuning: &Tuning, rng: &mut R) -> Option<LootGrant> {
        let reward = roll_reward(rng, tuning);
        self.open_with(player, reward)
    }

    /// Open the container with a known reward
    pub fn open_with(&mut self, player: &mut Player, reward: LootReward) -> Option<LootGrant> {
        if self.opened {
            return None;
        }
        self.opened = true;
        let applied = player.apply_reward(reward);
        Some(LootGrant { reward, applied })
    }
}
