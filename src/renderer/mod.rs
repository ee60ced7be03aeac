//! Scene port
//!
//! The simulation never draws. The frame driver mirrors `GameEvent`s into a
//! [`ScenePort`]; a host binds it to a real renderer, and [`HeadlessScene`]
//! keeps bookkeeping only.

pub mod shapes;

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec3;
use thiserror::Error;

use crate::sim::EntityKind;
pub use shapes::{Part, Placeholder, Primitive, placeholder_for};

/// Model file for loot containers
pub const LOOT_MODEL: &str = "assets/wood_box.glb";

/// Scene-side handle for an entity's visual
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderHandle(pub u64);

/// Loading a visual failed
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
}

/// Request to show an entity
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    pub kind: EntityKind,
    pub position: Vec3,
    /// Model file; `None` means procedural geometry
    pub model: Option<&'static str>,
}

impl Renderable {
    pub fn for_entity(kind: EntityKind, position: Vec3) -> Self {
        let model = match kind {
            EntityKind::LootContainer => Some(LOOT_MODEL),
            _ => None,
        };
        Self {
            kind,
            position,
            model,
        }
    }
}

/// Rendering backend seen from the game shell
pub trait ScenePort {
    /// Create the entity's visual; fails if its model cannot be loaded
    fn add_entity(&mut self, renderable: &Renderable) -> Result<RenderHandle, AssetError>;

    /// Create a visual from primitives (cannot fail)
    fn add_placeholder(&mut self, placeholder: &Placeholder, position: Vec3) -> RenderHandle;

    fn remove_entity(&mut self, handle: RenderHandle);

    /// Hit tint on/off
    fn set_flash(&mut self, _handle: RenderHandle, _on: bool) {}

    /// Move/rotate a visual (yaw around +Y)
    fn set_transform(&mut self, _handle: RenderHandle, _position: Vec3, _yaw: f32) {}
}

/// Scene without a GPU: tracks live visuals and which assets exist
#[derive(Debug, Default)]
pub struct HeadlessScene {
    assets: BTreeSet<String>,
    live: BTreeMap<RenderHandle, Vec3>,
    placeholders: usize,
    next_handle: u64,
}

impl HeadlessScene {
    /// Scene with no model files available
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene where the given model paths load successfully
    pub fn with_assets<I, S>(assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            assets: assets.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of placeholders created so far
    pub fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    pub fn position(&self, handle: RenderHandle) -> Option<Vec3> {
        self.live.get(&handle).copied()
    }

    fn insert(&mut self, position: Vec3) -> RenderHandle {
        self.next_handle += 1;
        let handle = RenderHandle(self.next_handle);
        self.live.insert(handle, position);
        handle
    }
}

impl ScenePort for HeadlessScene {
    fn add_entity(&mut self, renderable: &Renderable) -> Result<RenderHandle, AssetError> {
        match renderable.model {
            Some(path) if !self.assets.contains(path) => {
                Err(AssetError::NotFound(path.to_string()))
            }
            _ => Ok(self.insert(renderable.position)),
        }
    }

    fn add_placeholder(&mut self, placeholder: &Placeholder, position: Vec3) -> RenderHandle {
        log::trace!(
            "Placeholder for {:?} ({} parts)",
            placeholder.kind,
            placeholder.parts.len()
        );
        self.placeholders += 1;
        self.insert(position)
    }

    fn remove_entity(&mut self, handle: RenderHandle) {
        self.live.remove(&handle);
    }

    fn set_transform(&mut self, handle: RenderHandle, position: Vec3, _yaw: f32) {
        if let Some(slot) = self.live.get_mut(&handle) {
            *slot = position;
        }
    }
}
