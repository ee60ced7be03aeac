//! Time-based difficulty progression
//!
//! Every `difficulty_interval` seconds of un-paused play the level rises,
//! growing the zombie population cap (up to `max_population`) and the
//! health/speed multipliers applied to newly spawned zombies.

use crate::settings::Tuning;

/// Current difficulty and the values derived from it
#[derive(Debug, Clone)]
pub struct DifficultyState {
    pub level: u32,
    pub population_cap: u32,
    pub health_multiplier: f32,
    pub speed_multiplier: f32,
    /// Play time accumulated toward the next level
    elapsed: f32,
}

impl Default for DifficultyState {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}

impl DifficultyState {
    pub fn new(tuning: &Tuning) -> Self {
        let mut state = Self {
            level: 0,
            population_cap: 0,
            health_multiplier: 1.0,
            speed_multiplier: 1.0,
            elapsed: 0.0,
        };
        state.recompute(tuning);
        state
    }

    /// Accumulate play time; returns the number of levels gained
    ///
    /// Only call while the session is running - paused time must not count.
    pub fn advance(&mut self, dt: f32, tuning: &Tuning) -> u32 {
        let interval = tuning.difficulty_interval;
        self.elapsed += dt.max(0.0);
        if interval.is_nan() || interval <= 0.0 || self.elapsed < interval {
            return 0;
        }
        let gained = (self.elapsed / interval).floor() as u32;
        self.elapsed = (self.elapsed - gained as f32 * interval).max(0.0);
        self.level = self.level.saturating_add(gained);
        self.recompute(tuning);
        gained
    }

    /// Seconds until the next level
    pub fn time_to_next_level(&self, tuning: &Tuning) -> f32 {
        (tuning.difficulty_interval - self.elapsed).max(0.0)
    }

    fn recompute(&mut self, tuning: &Tuning) {
        self.population_cap = population_cap_for(self.level, tuning);
        self.health_multiplier = 1.0 + self.level as f32 * tuning.health_step;
        self.speed_multiplier = 1.0 + self.level as f32 * tuning.speed_step;
    }
}

/// Zombie population target for a level
pub fn population_cap_for(level: u32, tuning: &Tuning) -> u32 {
    tuning
        .base_population
        .saturating_add(level.saturating_mul(tuning.population_per_level))
        .min(tuning.max_population)
}
