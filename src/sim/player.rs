//! The player
//!
//! Owns movement, jumping, the aim state machine, weapon state and resource
//! pools. Timed transitions (shot cooldown, reload) are started here and
//! completed by the simulation's timer queue.

use glam::{Vec2, Vec3};
use serde::Serialize;

use super::loot::LootReward;
use super::state::EntityId;
use crate::consts::*;
use crate::settings::Tuning;
use crate::{approach_factor, forward_from_angles};

/// Aim state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AimState {
    #[default]
    Idle,
    /// Reduced speed, no run bonus, narrow FOV
    Aiming,
}

/// Held direction keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveFlags {
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Unit input vector (x = right, y = forward); zero when keys cancel out
    pub fn axis(&self) -> Vec2 {
        let x = self.right as i32 - self.left as i32;
        let y = self.forward as i32 - self.backward as i32;
        Vec2::new(x as f32, y as f32).normalize_or_zero()
    }
}

/// Gait used for bobbing and footsteps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stride {
    Walk,
    Run,
    Aim,
}

impl Stride {
    /// (amplitude, angular frequency) of camera bob
    pub fn bob(&self) -> (f32, f32) {
        match self {
            Stride::Walk => (0.05, 10.0),
            Stride::Run => (0.08, 14.0),
            Stride::Aim => (0.015, 6.0),
        }
    }

    pub fn footstep_interval(&self) -> f32 {
        match self {
            Stride::Run => FOOTSTEP_RUN_INTERVAL,
            Stride::Walk | Stride::Aim => FOOTSTEP_WALK_INTERVAL,
        }
    }
}

/// What happened during a player update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStep {
    /// A footstep landed this frame
    pub footstep: Option<Stride>,
    /// Touched the ground after a jump
    pub landed: bool,
}

/// Outcome of pulling the trigger
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotResult {
    /// A round left the barrel
    Fired {
        origin: Vec3,
        direction: Vec3,
        /// The magazine is now empty
        emptied: bool,
    },
    /// Eligible to fire but out of ammo
    EmptyClick,
    /// Cooling down, reloading or not in control
    Blocked,
}

/// The local player
#[derive(Debug, Clone)]
pub struct Player {
    /// Camera (eye) position
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub health: u32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub damage: u32,
    pub move_speed: f32,
    pub running: bool,
    pub aim: AimState,
    pub jumping: bool,
    pub vertical_velocity: f32,
    pub can_shoot: bool,
    pub reloading: bool,
    pub score_multiplier: f32,
    /// Pointer lock engaged (player is controlling, not in a menu)
    pub controls_locked: bool,
    /// Ids of live projectiles this player fired (owned by the simulation)
    pub projectiles: Vec<EntityId>,

    // === Presentation ===
    pub gun_offset: Vec3,
    pub fov: f32,
    pub bob_offset: f32,
    moving_time: f32,
    footstep_timer: f32,

    run_multiplier: f32,
    aim_speed_factor: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            position: Vec3::new(0.0, GROUND_LEVEL, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            health: MAX_HEALTH,
            ammo: tuning.max_ammo,
            max_ammo: tuning.max_ammo,
            damage: tuning.base_damage,
            move_speed: tuning.move_speed,
            running: false,
            aim: AimState::Idle,
            jumping: false,
            vertical_velocity: 0.0,
            can_shoot: true,
            reloading: false,
            score_multiplier: 1.0,
            controls_locked: false,
            projectiles: Vec::new(),
            gun_offset: GUN_OFFSET_HIP,
            fov: DEFAULT_FOV,
            bob_offset: 0.0,
            moving_time: 0.0,
            footstep_timer: 0.0,
            run_multiplier: tuning.run_multiplier,
            aim_speed_factor: tuning.aim_speed_factor,
        }
    }

    pub fn is_aiming(&self) -> bool {
        self.aim == AimState::Aiming
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn health_percent(&self) -> f32 {
        (self.health as f32 / MAX_HEALTH as f32 * 100.0).clamp(0.0, 100.0)
    }

    /// Unit view direction
    pub fn aim_direction(&self) -> Vec3 {
        forward_from_angles(self.yaw, self.pitch)
    }

    pub fn stride(&self) -> Stride {
        if self.is_aiming() {
            Stride::Aim
        } else if self.running {
            Stride::Run
        } else {
            Stride::Walk
        }
    }

    /// Speed after aim/run modifiers (aiming suppresses running)
    pub fn effective_speed(&self) -> f32 {
        let modifier = match (self.aim, self.running) {
            (AimState::Aiming, _) => self.aim_speed_factor,
            (AimState::Idle, true) => self.run_multiplier,
            (AimState::Idle, false) => 1.0,
        };
        self.move_speed * modifier
    }

    /// Aim button pressed/released; returns true on a state change
    pub fn set_aiming(&mut self, pressed: bool) -> bool {
        let next = if pressed { AimState::Aiming } else { AimState::Idle };
        if next == self.aim {
            return false;
        }
        self.aim = next;
        true
    }

    /// Apply a mouse-look delta (radians)
    pub fn look(&mut self, delta: Vec2) {
        if !self.controls_locked {
            return;
        }
        self.yaw -= delta.x;
        self.pitch = (self.pitch - delta.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Advance one frame (the caller skips this while paused)
    pub fn update(&mut self, dt: f32, movement: &MoveFlags) -> PlayerStep {
        let dt = dt.max(0.0);
        let mut step = PlayerStep::default();
        let was_jumping = self.jumping;

        // Horizontal movement relative to the view heading
        let moving = self.controls_locked && movement.axis() != Vec2::ZERO;
        if moving {
            let axis = movement.axis() * self.effective_speed() * dt;
            let forward = Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos());
            let right = Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin());
            self.position += right * axis.x + forward * axis.y;
        }

        // Gravity and ground contact
        self.vertical_velocity -= GRAVITY * dt;
        self.position.y += self.vertical_velocity * dt;
        if self.position.y < GROUND_LEVEL {
            self.position.y = GROUND_LEVEL;
            self.vertical_velocity = 0.0;
            self.jumping = false;
        }

        // Ease gun and FOV toward the aim pose
        let (gun_target, fov_target) = if self.is_aiming() {
            (GUN_OFFSET_AIM, AIM_FOV)
        } else {
            (GUN_OFFSET_HIP, DEFAULT_FOV)
        };
        let t = approach_factor(AIM_LERP_RATE, dt);
        self.gun_offset += (gun_target - self.gun_offset) * t;
        self.fov += (fov_target - self.fov) * t;

        // Bobbing and footsteps while walking on the ground
        let stride = self.stride();
        if moving && !self.jumping {
            let (amplitude, frequency) = stride.bob();
            self.moving_time += dt;
            self.bob_offset = (self.moving_time * frequency).sin() * amplitude;

            self.footstep_timer += dt;
            if self.footstep_timer >= stride.footstep_interval() {
                self.footstep_timer = 0.0;
                step.footstep = Some(stride);
            }
        } else {
            self.moving_time = 0.0;
            self.footstep_timer = 0.0;
            self.bob_offset += (0.0 - self.bob_offset) * t;
        }

        step.landed = was_jumping && !self.jumping;
        step
    }

    /// Pull the trigger
    ///
    /// On `Fired` the caller spawns the projectile and schedules the cooldown.
    pub fn shoot(&mut self) -> ShotResult {
        if !self.controls_locked || !self.can_shoot {
            return ShotResult::Blocked;
        }
        if self.ammo == 0 {
            return ShotResult::EmptyClick;
        }

        self.ammo -= 1;
        self.can_shoot = false;
        let direction = self.aim_direction();
        ShotResult::Fired {
            origin: self.position + direction * MUZZLE_OFFSET,
            direction,
            emptied: self.ammo == 0,
        }
    }

    /// Shot cooldown elapsed; firing stays blocked while a reload runs
    pub fn end_shot_cooldown(&mut self) {
        if !self.reloading {
            self.can_shoot = true;
        }
    }

    /// Start a reload; returns false if one is not allowed
    pub fn begin_reload(&mut self) -> bool {
        if self.ammo >= self.max_ammo || !self.controls_locked || self.reloading {
            return false;
        }
        self.reloading = true;
        self.can_shoot = false;
        true
    }

    /// Reload timer elapsed
    pub fn finish_reload(&mut self) {
        if !self.reloading {
            return;
        }
        self.reloading = false;
        self.ammo = self.max_ammo;
        self.can_shoot = true;
    }

    /// Start a jump; returns false if airborne or not in control
    pub fn jump(&mut self) -> bool {
        if self.jumping || !self.controls_locked {
            return false;
        }
        self.jumping = true;
        self.vertical_velocity = JUMP_IMPULSE;
        true
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Apply a loot reward; returns false if it had no effect
    pub fn apply_reward(&mut self, reward: LootReward) -> bool {
        match reward {
            LootReward::Health(amount) => {
                self.health = (self.health + amount).min(MAX_HEALTH);
            }
            LootReward::AmmoCapacity(amount) => {
                self.max_ammo += amount;
                self.ammo = (self.ammo + amount).min(self.max_ammo);
            }
            LootReward::Damage(amount) => {
                self.damage += amount;
            }
            LootReward::Speed(amount) => {
                self.move_speed += amount;
            }
            LootReward::ScoreMultiplier { factor, .. } => {
                if self.score_multiplier > 1.0 {
                    return false;
                }
                self.score_multiplier = factor.max(1.0);
            }
        }
        true
    }

    /// Score multiplier buff wore off
    pub fn clear_multiplier(&mut self) {
        self.score_multiplier = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn locked_player() -> Player {
        let mut p = Player::new(&Tuning::default());
        p.controls_locked = true;
        p
    }

    fn forward_only() -> MoveFlags {
        MoveFlags {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_move_flags_axis_normalized() {
        let diag = MoveFlags {
            forward: true,
            right: true,
            ..Default::default()
        };
        assert!((diag.axis().length() - 1.0).abs() < 1e-6);

        let cancel = MoveFlags {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(cancel.axis(), Vec2::ZERO);
    }

    #[test]
    fn test_walk_forward_moves_down_negative_z() {
        let mut p = locked_player();
        p.update(0.5, &forward_only());
        assert!((p.position.z - (-4.0)).abs() < 1e-4);
        assert!(p.position.x.abs() < 1e-5);
        assert_eq!(p.position.y, GROUND_LEVEL);
    }

    #[test]
    fn test_no_movement_without_controls() {
        let mut p = locked_player();
        p.controls_locked = false;
        p.update(0.5, &forward_only());
        assert_eq!(p.position, Vec3::new(0.0, GROUND_LEVEL, 0.0));
    }

    #[test]
    fn test_aiming_suppresses_running() {
        let mut p = locked_player();
        p.running = true;
        assert!((p.effective_speed() - 8.0 * 1.6).abs() < 1e-5);

        assert!(p.set_aiming(true));
        assert!(!p.set_aiming(true));
        assert!((p.effective_speed() - 4.0).abs() < 1e-5);
        assert_eq!(p.stride(), Stride::Aim);

        assert!(p.set_aiming(false));
        assert!((p.effective_speed() - 8.0 * 1.6).abs() < 1e-5);
    }

    #[test]
    fn test_jump_and_land() {
        let mut p = locked_player();
        assert!(p.jump());
        assert!(!p.jump(), "cannot double jump");

        let mut landed = false;
        for _ in 0..120 {
            let step = p.update(1.0 / 60.0, &MoveFlags::default());
            if step.landed {
                assert!(!landed, "landing reported once");
                landed = true;
            }
        }
        assert!(landed);
        assert!(!p.jumping);
        assert_eq!(p.position.y, GROUND_LEVEL);
        assert!(p.jump());
    }

    #[test]
    fn test_aim_transition_converges_without_overshoot() {
        let mut p = locked_player();
        p.set_aiming(true);
        let mut last_fov = p.fov;
        for _ in 0..60 {
            p.update(1.0 / 60.0, &MoveFlags::default());
            assert!(p.fov <= last_fov);
            assert!(p.fov >= AIM_FOV);
            last_fov = p.fov;
        }
        assert!((p.fov - AIM_FOV).abs() < 0.1);
        assert!((p.gun_offset - GUN_OFFSET_AIM).length() < 0.01);

        // One huge frame snaps to the target instead of overshooting
        p.set_aiming(false);
        p.update(5.0, &MoveFlags::default());
        assert!((p.fov - DEFAULT_FOV).abs() < 1e-4);
    }

    #[test]
    fn test_footsteps_follow_stride() {
        let mut p = locked_player();
        let mut steps = 0;
        for _ in 0..75 {
            if p.update(1.0 / 60.0, &forward_only()).footstep == Some(Stride::Walk) {
                steps += 1;
            }
        }
        assert_eq!(steps, 2);

        p.running = true;
        let mut run_steps = 0;
        for _ in 0..60 {
            if p.update(1.0 / 60.0, &forward_only()).footstep == Some(Stride::Run) {
                run_steps += 1;
            }
        }
        assert!(run_steps >= 3);
    }

    #[test]
    fn test_bob_settles_when_still() {
        let mut p = locked_player();
        for _ in 0..10 {
            p.update(1.0 / 60.0, &forward_only());
        }
        assert!(p.bob_offset != 0.0);
        for _ in 0..120 {
            p.update(1.0 / 60.0, &MoveFlags::default());
        }
        assert!(p.bob_offset.abs() < 1e-3);
    }

    #[test]
    fn test_empty_click_keeps_cooldown_clear() {
        let mut p = locked_player();
        p.ammo = 0;
        assert_eq!(p.shoot(), ShotResult::EmptyClick);
        assert_eq!(p.ammo, 0);
        assert!(p.can_shoot);
    }

    #[test]
    fn test_reload_guards() {
        let mut p = locked_player();
        assert!(!p.begin_reload(), "full magazine");
        p.ammo = 10;
        assert!(p.begin_reload());
        assert!(!p.can_shoot);
        assert!(!p.begin_reload(), "one reload at a time");

        p.end_shot_cooldown();
        assert!(!p.can_shoot, "cooldown must not re-arm during reload");

        p.finish_reload();
        assert_eq!(p.ammo, 30);
        assert!(p.can_shoot);
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut p = locked_player();
        p.take_damage(30);
        assert_eq!(p.health, 70);
        p.take_damage(500);
        assert_eq!(p.health, 0);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_health_reward_capped() {
        let mut p = locked_player();
        p.health = 80;
        assert!(p.apply_reward(LootReward::Health(60)));
        assert_eq!(p.health, MAX_HEALTH);
    }

    proptest! {
        #[test]
        fn prop_ammo_stays_in_bounds(actions in prop::collection::vec(0u8..4, 0..200)) {
            let mut p = locked_player();
            for action in actions {
                match action {
                    0 => { let _ = p.shoot(); }
                    1 => p.end_shot_cooldown(),
                    2 => { p.begin_reload(); }
                    _ => p.finish_reload(),
                }
                prop_assert!(p.ammo <= p.max_ammo);
                if p.reloading {
                    prop_assert!(!p.can_shoot);
                }
            }
        }
    }
}
