//! Frame clocks
//!
//! A clock reports the seconds elapsed since its previous call. The first
//! call reports zero.

use std::collections::VecDeque;
use std::time::Instant;

/// Source of per-frame deltas
pub trait Clock {
    /// Seconds since the previous call (never negative)
    fn delta(&mut self) -> f32;
}

/// Wall-clock time from a monotonic `Instant`
#[derive(Debug, Default)]
pub struct SystemClock {
    last: Option<Instant>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { last: None }
    }
}

impl Clock for SystemClock {
    fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = self
            .last
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last = Some(now);
        dt
    }
}

/// Scripted clock for tests and headless runs
///
/// Returns queued deltas first, then the fixed step forever.
#[derive(Debug, Clone)]
pub struct ManualClock {
    queued: VecDeque<f32>,
    step: f32,
    started: bool,
}

impl ManualClock {
    /// Clock advancing by `step` seconds per frame (after the initial zero)
    pub fn fixed(step: f32) -> Self {
        Self {
            queued: VecDeque::new(),
            step: step.max(0.0),
            started: false,
        }
    }

    /// Queue an explicit delta for an upcoming frame
    pub fn push(&mut self, delta: f32) {
        self.queued.push_back(delta.max(0.0));
    }
}

impl Clock for ManualClock {
    fn delta(&mut self) -> f32 {
        if let Some(dt) = self.queued.pop_front() {
            self.started = true;
            return dt;
        }
        if !self.started {
            self.started = true;
            return 0.0;
        }
        self.step
    }
}
