//! Deferred effects
//!
//! Every delayed state change (reload completion, shot cooldown, flashes,
//! respawns, buff expiry) is a [`TimerEvent`] in one queue advanced by the
//! tick, so tests drive time with synthetic deltas.

use super::state::EntityId;

/// Something that happens once its delay elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Weapon may fire again
    ShotCooldown,
    /// Magazine refilled
    ReloadComplete,
    /// Remove a muzzle flash renderable
    MuzzleFlashEnd(EntityId),
    /// Revert a combatant's hit tint
    HitFlashEnd(EntityId),
    SpawnCombatant,
    SpawnLoot,
    /// Score multiplier buff wears off
    MultiplierExpired,
}

impl TimerEvent {
    /// Visual-only timers keep running while the game is paused
    pub fn is_cosmetic(&self) -> bool {
        matches!(self, TimerEvent::MuzzleFlashEnd(_) | TimerEvent::HitFlashEnd(_))
    }
}

#[derive(Debug, Clone)]
struct Pending {
    remaining: f32,
    seq: u64,
    event: TimerEvent,
}

/// Countdown queue of deferred events
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: Vec<Pending>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire after `delay` seconds
    pub fn schedule(&mut self, delay: f32, event: TimerEvent) {
        self.pending.push(Pending {
            remaining: delay.max(0.0),
            seq: self.next_seq,
            event,
        });
        self.next_seq += 1;
    }

    /// Advance every timer; returns fired events in deadline order
    pub fn advance(&mut self, dt: f32) -> Vec<TimerEvent> {
        self.advance_where(dt, |_| true)
    }

    /// Advance only cosmetic timers (used while paused)
    pub fn advance_cosmetic(&mut self, dt: f32) -> Vec<TimerEvent> {
        self.advance_where(dt, TimerEvent::is_cosmetic)
    }

    fn advance_where(&mut self, dt: f32, filter: impl Fn(&TimerEvent) -> bool) -> Vec<TimerEvent> {
        let dt = dt.max(0.0);
        let mut fired = Vec::new();
        self.pending.retain_mut(|p| {
            if !filter(&p.event) {
                return true;
            }
            p.remaining -= dt;
            if p.remaining <= 0.0 {
                fired.push((p.remaining, p.seq, p.event));
                false
            } else {
                true
            }
        });
        // Most overdue first, ties broken by scheduling order
        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        fired.into_iter().map(|(_, _, event)| event).collect()
    }

    /// Seconds until the first matching event fires
    pub fn remaining(&self, event: TimerEvent) -> Option<f32> {
        self.pending
            .iter()
            .filter(|p| p.event == event)
            .map(|p| p.remaining)
            .min_by(f32::total_cmp)
    }

    pub fn contains(&self, event: TimerEvent) -> bool {
        self.pending.iter().any(|p| p.event == event)
    }

    /// Count pending events matching a predicate
    pub fn count(&self, pred: impl Fn(&TimerEvent) -> bool) -> usize {
        self.pending.iter().filter(|p| pred(&p.event)).count()
    }

    /// Drop every pending instance of `event`
    pub fn cancel(&mut self, event: TimerEvent) {
        self.pending.retain(|p| p.event != event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut timers = TimerQueue::new();
        timers.schedule(1.5, TimerEvent::ReloadComplete);

        assert!(timers.advance(1.0).is_empty());
        assert!(timers.advance(0.4).is_empty());
        assert_eq!(timers.advance(0.1), vec![TimerEvent::ReloadComplete]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_fired_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(0.3, TimerEvent::SpawnLoot);
        timers.schedule(0.1, TimerEvent::ShotCooldown);
        timers.schedule(0.1, TimerEvent::SpawnCombatant);

        let fired = timers.advance(1.0);
        assert_eq!(
            fired,
            vec![TimerEvent::ShotCooldown, TimerEvent::SpawnCombatant, TimerEvent::SpawnLoot]
        );
    }

    #[test]
    fn test_cosmetic_only_advance() {
        let mut timers = TimerQueue::new();
        timers.schedule(0.1, TimerEvent::HitFlashEnd(7));
        timers.schedule(0.1, TimerEvent::ShotCooldown);

        assert_eq!(timers.advance_cosmetic(0.2), vec![TimerEvent::HitFlashEnd(7)]);
        assert!(timers.contains(TimerEvent::ShotCooldown));
        assert!((timers.remaining(TimerEvent::ShotCooldown).unwrap() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_cancel_and_count() {
        let mut timers = TimerQueue::new();
        timers.schedule(3.0, TimerEvent::SpawnCombatant);
        timers.schedule(3.0, TimerEvent::SpawnCombatant);
        timers.schedule(2.0, TimerEvent::SpawnLoot);
        assert_eq!(timers.count(|e| *e == TimerEvent::SpawnCombatant), 2);

        timers.cancel(TimerEvent::SpawnCombatant);
        assert_eq!(timers.len(), 1);
    }
}
