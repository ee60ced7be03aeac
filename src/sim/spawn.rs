//! Population-capped spawning policy
//!
//! Tracks how many spawns are already scheduled so a death never queues more
//! than one replacement and the population never overshoots its cap.

use glam::Vec3;
use rand::Rng;

use crate::ground_distance;
use crate::settings::Tuning;

/// Pending spawn bookkeeping
#[derive(Debug, Clone, Default)]
pub struct SpawnManager {
    /// Zombie spawns scheduled but not yet due
    pub pending_combatants: u32,
    /// Loot spawns scheduled but not yet due
    pub pending_loot: u32,
}

impl SpawnManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve one zombie replacement if the population (live + pending) is below `cap`
    pub fn request_combatant(&mut self, live: usize, cap: u32) -> bool {
        if live as u32 + self.pending_combatants < cap {
            self.pending_combatants += 1;
            true
        } else {
            false
        }
    }

    /// Reserve enough zombie spawns to reach `cap`; returns how many were reserved
    pub fn request_combatant_deficit(&mut self, live: usize, cap: u32) -> u32 {
        let deficit = cap.saturating_sub(live as u32 + self.pending_combatants);
        self.pending_combatants += deficit;
        deficit
    }

    /// Consume a due zombie spawn; false if the population filled up meanwhile
    pub fn take_combatant(&mut self, live: usize, cap: u32) -> bool {
        self.pending_combatants = self.pending_combatants.saturating_sub(1);
        (live as u32) < cap
    }

    /// Reserve one loot replacement if below the loot cap
    pub fn request_loot(&mut self, live: usize, cap: u32) -> bool {
        if live as u32 + self.pending_loot < cap {
            self.pending_loot += 1;
            true
        } else {
            false
        }
    }

    /// Consume a due loot spawn
    pub fn take_loot(&mut self, live: usize, cap: u32) -> bool {
        self.pending_loot = self.pending_loot.saturating_sub(1);
        (live as u32) < cap
    }
}

/// Pick a ground position in the square `±half_extent` around the origin
///
/// Candidates too close to the player are pushed along +z instead of re-rolled.
pub fn spawn_position<R: Rng>(rng: &mut R, half_extent: f32, player_pos: Vec3, tuning: &Tuning) -> Vec3 {
    let mut position = Vec3::new(
        (rng.random::<f32>() - 0.5) * 2.0 * half_extent,
        0.0,
        (rng.random::<f32>() - 0.5) * 2.0 * half_extent,
    );
    if ground_distance(position, player_pos) < tuning.min_spawn_distance {
        position.z += tuning.spawn_push;
    }
    position
}

/// Random delay before a replacement loot container appears
pub fn loot_respawn_delay<R: Rng>(rng: &mut R, tuning: &Tuning) -> f32 {
    if tuning.loot_respawn_max <= tuning.loot_respawn_min {
        return tuning.loot_respawn_min;
    }
    rng.random_range(tuning.loot_respawn_min..=tuning.loot_respawn_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_one_replacement_per_request() {
        let mut spawner = SpawnManager::new();
        assert!(spawner.request_combatant(3, 5));
        assert!(spawner.request_combatant(3, 5));
        // 3 live + 2 pending reaches the cap
        assert!(!spawner.request_combatant(3, 5));
        assert_eq!(spawner.pending_combatants, 2);
    }

    #[test]
    fn test_deficit_and_take() {
        let mut spawner = SpawnManager::new();
        assert_eq!(spawner.request_combatant_deficit(4, 7), 3);
        assert_eq!(spawner.request_combatant_deficit(4, 7), 0);

        assert!(spawner.take_combatant(4, 7));
        assert_eq!(spawner.pending_combatants, 2);
        assert!(!spawner.take_combatant(7, 7));
        assert_eq!(spawner.pending_combatants, 1);
    }

    #[test]
    fn test_loot_cap() {
        let mut spawner = SpawnManager::new();
        assert!(spawner.request_loot(1, 2));
        assert!(!spawner.request_loot(1, 2));
        assert!(spawner.take_loot(1, 2));
        assert_eq!(spawner.pending_loot, 0);
    }

    #[test]
    fn test_spawn_positions_in_bounds_or_pushed() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let player = Vec3::new(0.0, 1.7, 0.0);
        for _ in 0..500 {
            let p = spawn_position(&mut rng, 40.0, player, &tuning);
            assert_eq!(p.y, 0.0);
            assert!(p.x.abs() <= 40.0);
            assert!(p.z >= -40.0 && p.z <= 40.0 + tuning.spawn_push);
        }
    }

    #[test]
    fn test_close_spawn_pushed_along_z() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        // With a tiny region every candidate is near the player
        let p = spawn_position(&mut rng, 1.0, Vec3::ZERO, &tuning);
        assert!(p.z >= 14.0);
        assert!(p.x.abs() <= 1.0);
    }

    #[test]
    fn test_loot_delay_window() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..100 {
            let d = loot_respawn_delay(&mut rng, &tuning);
            assert!((2.0..=5.0).contains(&d));
        }
    }
}
