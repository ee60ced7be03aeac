//! Platform abstraction layer
//!
//! Handles the pieces the simulation needs from its host:
//! - Time/ticks (`clock`)
//! - Input events (`input`)

pub mod clock;
pub mod input;

pub use clock::{Clock, ManualClock, SystemClock};
pub use input::{Direction, InputEvent};
