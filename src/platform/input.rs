//! Semantic input events
//!
//! Raw device handling lives in the host; the simulation only sees these.

use glam::Vec2;

use crate::sim::TickInput;

/// Movement direction keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

/// Discrete input event delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Direction key pressed or released
    Move { direction: Direction, pressed: bool },
    /// Sprint modifier held/released
    Run(bool),
    /// Aim button pressed/released
    Aim(bool),
    /// Mouse-look delta in radians
    Look { dx: f32, dy: f32 },
    Fire,
    Reload,
    Jump,
    /// Open a nearby loot container
    Interact,
    TogglePause,
    /// Pointer lock acquired/released by the host
    ControlsLocked(bool),
}

impl InputEvent {
    /// Fold the event into the input for the next tick
    ///
    /// `ControlsLocked` is state, not input, and is handled by the caller.
    pub fn apply(self, input: &mut TickInput) {
        match self {
            InputEvent::Move { direction, pressed } => {
                let flags = &mut input.movement;
                match direction {
                    Direction::Forward => flags.forward = pressed,
                    Direction::Backward => flags.backward = pressed,
                    Direction::Left => flags.left = pressed,
                    Direction::Right => flags.right = pressed,
                }
            }
            InputEvent::Run(on) => input.running = on,
            InputEvent::Aim(on) => input.aiming = on,
            InputEvent::Look { dx, dy } => input.look += Vec2::new(dx, dy),
            InputEvent::Fire => input.fire = true,
            InputEvent::Reload => input.reload = true,
            InputEvent::Jump => input.jump = true,
            InputEvent::Interact => input.interact = true,
            InputEvent::TogglePause => input.pause = true,
            InputEvent::ControlsLocked(_) => {}
        }
    }
}
