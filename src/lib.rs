//! Deadline - first-person zombie survival simulation core
//!
//! Core modules:
//! - `sim`: Simulation (player, combatants, projectiles, loot, spawning, difficulty)
//! - `game`: Frame driver wiring the simulation to the clock and the output ports
//! - `platform`: Clock and input abstraction
//! - `renderer`: Scene port and placeholder primitives
//! - `audio`: Sound cues and the audio port
//! - `ui`: HUD port
//! - `settings`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use game::{Game, Ports, SessionSummary};
pub use settings::{DamageModel, MapKind, Settings, SettingsError, Tuning};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Largest frame delta fed to the simulation (a long stall must not teleport entities)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Player camera height above the ground
    pub const GROUND_LEVEL: f32 = 1.7;
    /// Downward acceleration while airborne (units/s²)
    pub const GRAVITY: f32 = 30.0;
    /// Vertical velocity applied by a jump
    pub const JUMP_IMPULSE: f32 = 10.0;
    pub const MAX_HEALTH: u32 = 100;
    /// Pitch clamp so the view never flips over
    pub const PITCH_LIMIT: f32 = 1.5;

    /// Field of view (degrees)
    pub const DEFAULT_FOV: f32 = 75.0;
    pub const AIM_FOV: f32 = 55.0;
    /// Exponential approach rate for aim transitions (1/s)
    pub const AIM_LERP_RATE: f32 = 10.0;
    /// Gun position relative to the camera
    pub const GUN_OFFSET_HIP: Vec3 = Vec3::new(0.3, -0.2, -0.5);
    pub const GUN_OFFSET_AIM: Vec3 = Vec3::new(0.0, -0.15, -0.4);

    /// Footstep cadence (seconds between steps)
    pub const FOOTSTEP_WALK_INTERVAL: f32 = 0.5;
    pub const FOOTSTEP_RUN_INTERVAL: f32 = 0.3;

    /// Projectiles appear this far along the aim ray (at the gun, not the eye)
    pub const MUZZLE_OFFSET: f32 = 0.5;
    pub const MUZZLE_FLASH_DURATION: f32 = 0.05;
    pub const HIT_FLASH_DURATION: f32 = 0.1;

    /// Combatant hit cylinder
    pub const COMBATANT_HIT_RADIUS: f32 = 0.6;
    pub const COMBATANT_HEIGHT: f32 = 2.3;
    /// Below this displacement a combatant keeps its current facing
    pub const FACING_EPSILON: f32 = 1e-3;
}

/// Unit view direction for a yaw/pitch pair (yaw 0 looks down -Z)
#[inline]
pub fn forward_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        -yaw.sin() * pitch.cos(),
        pitch.sin(),
        -yaw.cos() * pitch.cos(),
    )
}

/// Distance between two points projected onto the ground plane
#[inline]
pub fn ground_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Blend factor for `current += (target - current) * factor`; clamped so a long frame never overshoots
#[inline]
pub fn approach_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_default_looks_down_negative_z() {
        let f = forward_from_angles(0.0, 0.0);
        assert!((f - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_ground_distance_ignores_height() {
        let a = Vec3::new(0.0, 1.7, 0.0);
        let b = Vec3::new(3.0, 0.0, 4.0);
        assert!((ground_distance(a, b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_approach_factor_clamps() {
        assert_eq!(approach_factor(10.0, 0.5), 1.0);
        assert!((approach_factor(10.0, 0.01) - 0.1).abs() < 1e-6);
        assert_eq!(approach_factor(10.0, -1.0), 0.0);
    }
}
