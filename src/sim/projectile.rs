//! Player-fired projectiles

use glam::Vec3;

use super::state::EntityId;

/// A shot travelling in a straight line until it expires or hits something
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: EntityId,
    pub position: Vec3,
    /// Unit travel direction
    pub direction: Vec3,
    pub speed: f32,
    /// Seconds alive so far
    pub lifetime: f32,
    pub max_lifetime: f32,
}

impl Projectile {
    pub fn new(id: EntityId, origin: Vec3, direction: Vec3, speed: f32, max_lifetime: f32) -> Self {
        Self {
            id,
            position: origin,
            direction: direction.try_normalize().unwrap_or(Vec3::NEG_Z),
            speed,
            lifetime: 0.0,
            max_lifetime,
        }
    }

    /// Move along the travel direction and age by `dt`
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.position += self.direction * self.speed * dt;
        self.lifetime += dt;
    }

    pub fn has_expired(&self) -> bool {
        self.lifetime > self.max_lifetime
    }
}
