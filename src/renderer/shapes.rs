//! Primitive geometry for entities without a loadable model
//!
//! Everything here is plain data, so building a placeholder cannot fail.

use glam::Vec3;

use crate::sim::{CombatantVariant, EntityKind};

const FOREST_SKIN: u32 = 0x2d572c;
const DESERT_SKIN: u32 = 0x9c6d51;
const BANDAGE: u32 = 0xe0cfb1;
const PROJECTILE: u32 = 0xffffcc;
const MUZZLE_FLASH: u32 = 0xffff00;
const WOOD: u32 = 0x8b5a2b;

/// Convert a 0xRRGGBB color to RGBA floats
pub fn hex_color(hex: u32) -> [f32; 4] {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    [r, g, b, 1.0]
}

/// A single primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Cuboid { size: Vec3 },
    Sphere { radius: f32 },
    PointLight { intensity: f32, range: f32 },
}

/// One primitive placed relative to the entity origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Part {
    pub primitive: Primitive,
    pub offset: Vec3,
    pub color: [f32; 4],
}

impl Part {
    fn cuboid(size: Vec3, offset: Vec3, color: u32) -> Self {
        Self {
            primitive: Primitive::Cuboid { size },
            offset,
            color: hex_color(color),
        }
    }
}

/// Fallback visual built from primitives
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub kind: EntityKind,
    pub parts: Vec<Part>,
}

/// Blocky zombie: body, head, two arms, two legs
fn humanoid(color: u32, scale: f32) -> Vec<Part> {
    let v = |x: f32, y: f32, z: f32| Vec3::new(x, y, z) * scale;
    vec![
        Part::cuboid(v(0.8, 1.8, 0.4), v(0.0, 0.9, 0.0), color),
        Part::cuboid(v(0.6, 0.6, 0.6), v(0.0, 2.0, 0.0), color),
        Part::cuboid(v(0.2, 1.0, 0.2), v(-0.5, 0.9, 0.0), color),
        Part::cuboid(v(0.2, 1.0, 0.2), v(0.5, 0.9, 0.0), color),
        Part::cuboid(v(0.3, 0.9, 0.3), v(-0.25, 0.0, 0.0), color),
        Part::cuboid(v(0.3, 0.9, 0.3), v(0.25, 0.0, 0.0), color),
    ]
}

fn combatant_parts(variant: CombatantVariant) -> Vec<Part> {
    match variant {
        CombatantVariant::Forest => humanoid(FOREST_SKIN, 1.0),
        CombatantVariant::Desert => {
            let mut parts = humanoid(DESERT_SKIN, 0.9);
            // Mummy wrappings
            parts.push(Part::cuboid(
                Vec3::new(0.7, 0.1, 0.4),
                Vec3::new(0.0, 1.2, 0.2),
                BANDAGE,
            ));
            parts.push(Part::cuboid(
                Vec3::new(0.7, 0.12, 0.4),
                Vec3::new(0.0, 0.5, 0.2),
                BANDAGE,
            ));
            parts
        }
    }
}

/// Placeholder geometry for any entity kind
pub fn placeholder_for(kind: EntityKind) -> Placeholder {
    let parts = match kind {
        EntityKind::Combatant(variant) => combatant_parts(variant),
        EntityKind::Projectile => vec![Part {
            primitive: Primitive::Sphere { radius: 0.05 },
            offset: Vec3::ZERO,
            color: hex_color(PROJECTILE),
        }],
        EntityKind::LootContainer => vec![Part::cuboid(
            Vec3::ONE,
            Vec3::new(0.0, 0.5, 0.0),
            WOOD,
        )],
        EntityKind::MuzzleFlash => vec![Part {
            primitive: Primitive::PointLight {
                intensity: 2.0,
                range: 3.0,
            },
            offset: Vec3::ZERO,
            color: hex_color(MUZZLE_FLASH),
        }],
    };
    Placeholder { kind, parts }
}
