//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Variable frame delta, clamped by the caller
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies (side effects leave as `GameEvent`s)

pub mod collision;
pub mod combatant;
pub mod difficulty;
pub mod loot;
pub mod player;
pub mod projectile;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::{ProjectileOutcome, advance_projectile, hit_damage, nearest_loot_in_range};
pub use combatant::{Combatant, CombatantVariant};
pub use difficulty::{DifficultyState, population_cap_for};
pub use loot::{LootContainer, LootGrant, LootReward, roll_reward};
pub use player::{AimState, MoveFlags, Player, PlayerStep, ShotResult, Stride};
pub use projectile::Projectile;
pub use spawn::SpawnManager;
pub use state::{EntityId, EntityKind, GameEvent, GamePhase, GameState, SessionStats};
pub use tick::{TickInput, tick};
pub use timers::{TimerEvent, TimerQueue};
