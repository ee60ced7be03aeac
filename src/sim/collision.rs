//! Collision detection for projectiles and interaction reach
//!
//! Bodies are upright cylinders (see `Combatant::check_collision`). Projectiles
//! are fast relative to a body's radius, so each frame's travel is split into
//! substeps no longer than that radius before testing for hits.

use glam::Vec3;

use super::combatant::Combatant;
use super::loot::LootContainer;
use super::player::Player;
use super::projectile::Projectile;
use super::state::EntityId;
use crate::consts::COMBATANT_HIT_RADIUS;
use crate::ground_distance;
use crate::settings::DamageModel;

/// Upper bound on substeps per frame
const MAX_SUBSTEPS: usize = 32;

/// What happened to a projectile this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOutcome {
    /// Still travelling
    InFlight,
    /// Lifetime exceeded; remove without effect
    Expired,
    /// Struck the combatant with this id; remove and apply damage
    Hit(EntityId),
}

/// Move a projectile through one frame and resolve it against `combatants`
///
/// `combatants` must be in id order: when several bodies overlap the same
/// point the lowest id wins. Dead combatants are ignored.
pub fn advance_projectile(
    projectile: &mut Projectile,
    combatants: &[Combatant],
    dt: f32,
) -> ProjectileOutcome {
    let dt = dt.max(0.0);
    let travel = projectile.speed * dt;
    let steps = ((travel / COMBATANT_HIT_RADIUS).ceil() as usize).clamp(1, MAX_SUBSTEPS);
    let step_dt = dt / steps as f32;

    for _ in 0..steps {
        projectile.update(step_dt);
        if projectile.has_expired() {
            return ProjectileOutcome::Expired;
        }
        if let Some(hit) = first_hit(combatants, projectile.position) {
            return ProjectileOutcome::Hit(hit);
        }
    }
    ProjectileOutcome::InFlight
}

/// First live combatant whose body contains `point`
pub fn first_hit(combatants: &[Combatant], point: Vec3) -> Option<EntityId> {
    combatants
        .iter()
        .find(|c| !c.is_dead() && c.check_collision(point))
        .map(|c| c.id)
}

/// Health removed by one projectile hit
pub fn hit_damage(model: DamageModel, player: &Player) -> u32 {
    match model {
        DamageModel::Fixed => 1,
        DamageModel::PlayerStat => player.damage.max(1),
    }
}

/// Index of the closest unopened container within `range` (ground distance)
pub fn nearest_loot_in_range(loot: &[LootContainer], position: Vec3, range: f32) -> Option<usize> {
    loot.iter()
        .enumerate()
        .filter(|(_, l)| !l.is_opened())
        .map(|(i, l)| (i, ground_distance(l.position, position)))
        .filter(|&(_, d)| d <= range)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::combatant::CombatantVariant;

    fn zombie(id: EntityId, x: f32, z: f32) -> Combatant {
        Combatant::new(id, CombatantVariant::Forest, Vec3::new(x, 0.0, z), 5.0)
    }

    #[test]
    fn test_fast_projectile_does_not_tunnel() {
        // 30 u/s over a 0.1s frame covers 3 units; body sits mid-path
        let mut p = Projectile::new(1, Vec3::new(0.0, 1.2, 0.0), Vec3::NEG_Z, 30.0, 2.0);
        let targets = [zombie(2, 0.0, -1.5)];
        assert_eq!(
            advance_projectile(&mut p, &targets, 0.1),
            ProjectileOutcome::Hit(2)
        );
    }

    #[test]
    fn test_miss_stays_in_flight() {
        let mut p = Projectile::new(1, Vec3::new(0.0, 1.2, 0.0), Vec3::NEG_Z, 30.0, 2.0);
        let targets = [zombie(2, 5.0, -1.5)];
        assert_eq!(
            advance_projectile(&mut p, &targets, 0.1),
            ProjectileOutcome::InFlight
        );
        assert!((p.position.z + 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_over_head_misses() {
        let mut p = Projectile::new(1, Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Z, 30.0, 2.0);
        let targets = [zombie(2, 0.0, -1.5)];
        assert_eq!(
            advance_projectile(&mut p, &targets, 0.1),
            ProjectileOutcome::InFlight
        );
    }

    #[test]
    fn test_expiry_checked_before_hit() {
        let mut p = Projectile::new(1, Vec3::new(0.0, 1.2, 0.0), Vec3::NEG_Z, 1.0, 2.0);
        p.lifetime = 2.0;
        let targets = [zombie(2, 0.0, 0.0)];
        assert_eq!(
            advance_projectile(&mut p, &targets, 0.01),
            ProjectileOutcome::Expired
        );
    }

    #[test]
    fn test_lowest_id_wins_and_dead_ignored() {
        let mut dead = zombie(2, 0.0, -1.0);
        dead.health = 0;
        let targets = [dead, zombie(3, 0.0, -1.0), zombie(4, 0.0, -1.0)];
        assert_eq!(first_hit(&targets, Vec3::new(0.0, 1.0, -1.0)), Some(3));
    }

    #[test]
    fn test_hit_damage_models() {
        let mut player = Player::new(&Tuning::default());
        player.damage = 3;
        assert_eq!(hit_damage(DamageModel::Fixed, &player), 1);
        assert_eq!(hit_damage(DamageModel::PlayerStat, &player), 3);
    }

    #[test]
    fn test_nearest_loot() {
        let mut opened = LootContainer::new(1, Vec3::new(0.5, 0.0, 0.0));
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        opened.open_with(&mut player, crate::sim::loot::LootReward::Damage(1));

        let loot = vec![
            opened,
            LootContainer::new(2, Vec3::new(2.0, 0.0, 0.0)),
            LootContainer::new(3, Vec3::new(0.0, 0.0, 1.0)),
            LootContainer::new(4, Vec3::new(9.0, 0.0, 0.0)),
        ];
        let eye = Vec3::new(0.0, 1.7, 0.0);
        assert_eq!(nearest_loot_in_range(&loot, eye, 2.5), Some(2));
        assert_eq!(nearest_loot_in_range(&loot[3..], eye, 2.5), None);
    }
}
