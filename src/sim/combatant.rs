//! Zombie AI
//!
//! Combatants walk straight at the player on the ground plane and attack
//! when in range and rested. Attack eligibility is a pure query
//! ([`Combatant::in_attack_window`]); the caller commits an attack with
//! [`Combatant::record_attack`].

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyState;
use super::state::EntityId;
use crate::consts::{COMBATANT_HEIGHT, COMBATANT_HIT_RADIUS, FACING_EPSILON};
use crate::ground_distance;

/// Zombie flavours (one per map)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatantVariant {
    /// Slower but tougher
    Forest,
    /// Faster but weaker, longer reach
    Desert,
}

impl CombatantVariant {
    pub fn base_health(&self) -> u32 {
        match self {
            CombatantVariant::Forest => 3,
            CombatantVariant::Desert => 2,
        }
    }

    /// (minimum, random spread) of walking speed
    pub fn speed_range(&self) -> (f32, f32) {
        match self {
            CombatantVariant::Forest => (1.2, 0.5),
            CombatantVariant::Desert => (2.0, 0.8),
        }
    }

    pub fn attack_range(&self) -> f32 {
        match self {
            CombatantVariant::Forest => 2.0,
            CombatantVariant::Desert => 3.0,
        }
    }
}

/// A hostile entity
#[derive(Debug, Clone)]
pub struct Combatant {
    pub id: EntityId,
    pub variant: CombatantVariant,
    pub position: Vec3,
    /// Heading around +Y (radians)
    pub facing: f32,
    pub health: u32,
    pub speed: f32,
    pub attack_range: f32,
    /// Seconds between attacks
    pub attack_cooldown: f32,
    /// Session time of the last attack
    pub last_attack: Option<f32>,
    /// Hit tint active
    pub flashing: bool,
    death_played: bool,
}

impl Combatant {
    pub fn new(id: EntityId, variant: CombatantVariant, position: Vec3, attack_cooldown: f32) -> Self {
        let (base_speed, _) = variant.speed_range();
        Self {
            id,
            variant,
            position: Vec3::new(position.x, 0.0, position.z),
            facing: 0.0,
            health: variant.base_health(),
            speed: base_speed,
            attack_range: variant.attack_range(),
            attack_cooldown,
            last_attack: None,
            flashing: false,
            death_played: false,
        }
    }

    /// Roll a fresh combatant, scaled by the difficulty at creation time
    pub fn spawn<R: Rng>(
        id: EntityId,
        variant: CombatantVariant,
        position: Vec3,
        attack_cooldown: f32,
        difficulty: &DifficultyState,
        rng: &mut R,
    ) -> Self {
        let mut combatant = Self::new(id, variant, position, attack_cooldown);
        let (base_speed, spread) = variant.speed_range();
        combatant.speed = (base_speed + rng.random::<f32>() * spread) * difficulty.speed_multiplier;
        let scaled = variant.base_health() as f32 * difficulty.health_multiplier;
        combatant.health = (scaled.round() as u32).max(1);
        combatant
    }

    /// Advance toward the player
    ///
    /// Returns true on the single frame a dead combatant plays its death effect.
    pub fn update(&mut self, dt: f32, player_pos: Vec3) -> bool {
        if self.is_dead() {
            if self.death_played {
                return false;
            }
            self.death_played = true;
            return true;
        }

        let to_player = Vec3::new(player_pos.x - self.position.x, 0.0, player_pos.z - self.position.z);
        let direction = to_player.normalize_or_zero();
        let step = direction * self.speed * dt.max(0.0);

        self.position += step;
        self.position.y = 0.0;

        if step.length() > FACING_EPSILON {
            self.facing = direction.x.atan2(direction.z);
        }
        false
    }

    /// Remove one health point (a single projectile hit)
    pub fn take_hit(&mut self) {
        self.take_damage(1);
    }

    /// Remove `amount` health points and start the hit tint
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        self.flashing = true;
    }

    pub fn end_flash(&mut self) {
        self.flashing = false;
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Whether an attack on `target` is allowed at session time `now` (no side effects)
    pub fn in_attack_window(&self, target: Vec3, now: f32) -> bool {
        if self.is_dead() {
            return false;
        }
        let in_range = ground_distance(self.position, target) <= self.attack_range;
        let rested = self
            .last_attack
            .is_none_or(|last| now - last > self.attack_cooldown);
        in_range && rested
    }

    /// Commit an attack at session time `now`, starting the cooldown
    pub fn record_attack(&mut self, now: f32) {
        self.last_attack = Some(now);
    }

    /// Approximate body test: horizontal radius plus a vertical band from the feet up
    pub fn check_collision(&self, point: Vec3) -> bool {
        let within_radius = ground_distance(self.position, point) <= COMBATANT_HIT_RADIUS;
        let within_height =
            point.y >= self.position.y && point.y <= self.position.y + COMBATANT_HEIGHT;
        within_radius && within_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn forest_at(x: f32, z: f32) -> Combatant {
        Combatant::new(1, CombatantVariant::Forest, Vec3::new(x, 0.0, z), 5.0)
    }

    #[test]
    fn test_health_decrements_per_hit() {
        let mut c = forest_at(0.0, 0.0);
        assert_eq!(c.health, 3);
        c.take_hit();
        c.take_hit();
        assert_eq!(c.health, 1);
        assert!(!c.is_dead());
        c.take_hit();
        assert!(c.is_dead());
        c.take_hit();
        assert_eq!(c.health, 0);
    }

    #[test]
    fn test_moves_toward_player_on_ground() {
        let mut c = forest_at(10.0, 0.0);
        c.speed = 2.0;
        c.update(1.0, Vec3::new(0.0, 1.7, 0.0));
        assert!((c.position - Vec3::new(8.0, 0.0, 0.0)).length() < 1e-5);
        // Facing -X
        assert!((c.facing - (-std::f32::consts::FRAC_PI_2)).abs() < 1e-5);
    }

    #[test]
    fn test_no_facing_change_on_zero_displacement() {
        let mut c = forest_at(0.0, 0.0);
        c.facing = 1.0;
        c.update(0.016, Vec3::new(0.0, 1.7, 0.0));
        assert_eq!(c.facing, 1.0);
        assert!(c.position.is_finite());

        c.update(0.0, Vec3::new(5.0, 0.0, 5.0));
        assert_eq!(c.facing, 1.0);
    }

    #[test]
    fn test_dead_plays_terminal_effect_once() {
        let mut c = forest_at(5.0, 0.0);
        c.take_damage(3);
        let before = c.position;
        assert!(c.update(0.1, Vec3::ZERO));
        assert!(!c.update(0.1, Vec3::ZERO));
        assert_eq!(c.position, before);
    }

    #[test]
    fn test_attack_window_then_cooldown() {
        let mut c = forest_at(1.0, 0.0);
        let player = Vec3::new(0.0, 1.7, 0.0);

        assert!(c.in_attack_window(player, 0.0));
        c.record_attack(0.0);
        assert!(!c.in_attack_window(player, 0.0));
        assert!(!c.in_attack_window(player, 5.0));
        assert!(c.in_attack_window(player, 5.01));
    }

    #[test]
    fn test_attack_window_query_has_no_side_effects() {
        let c = forest_at(1.0, 0.0);
        let player = Vec3::ZERO;
        assert!(c.in_attack_window(player, 0.0));
        assert!(c.in_attack_window(player, 0.0));
        assert!(c.last_attack.is_none());
    }

    #[test]
    fn test_out_of_range_never_attacks() {
        let c = forest_at(2.5, 0.0);
        assert!(!c.in_attack_window(Vec3::ZERO, 100.0));
    }

    #[test]
    fn test_cylinder_collision() {
        let c = forest_at(0.0, -5.0);
        assert!(c.check_collision(Vec3::new(0.3, 1.7, -5.2)));
        assert!(!c.check_collision(Vec3::new(0.7, 1.7, -5.0)));
        assert!(!c.check_collision(Vec3::new(0.0, 2.5, -5.0)));
        assert!(!c.check_collision(Vec3::new(0.0, -0.2, -5.0)));
    }

    #[test]
    fn test_spawn_applies_multipliers() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut difficulty = DifficultyState::default();
        let base = Combatant::spawn(1, CombatantVariant::Desert, Vec3::ZERO, 5.0, &difficulty, &mut rng);
        assert_eq!(base.health, 2);
        assert!(base.speed >= 2.0 && base.speed <= 2.8);

        difficulty.health_multiplier = 2.0;
        difficulty.speed_multiplier = 1.5;
        let scaled = Combatant::spawn(2, CombatantVariant::Desert, Vec3::ZERO, 5.0, &difficulty, &mut rng);
        assert_eq!(scaled.health, 4);
        assert!(scaled.speed >= 3.0 && scaled.speed <= 4.2);
    }
}
