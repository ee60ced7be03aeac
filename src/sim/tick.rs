//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation by one (variable) frame delta.
//! Clamping the delta is the caller's job.

use glam::Vec2;

use super::collision::{ProjectileOutcome, advance_projectile};
use super::player::{MoveFlags, Stride};
use super::state::{GameEvent, GamePhase, GameState};
use crate::audio::SoundCue;

/// Input for a single frame
///
/// Held state (`movement`, `running`, `aiming`) persists across frames; the
/// one-shot flags and `look` are cleared by the driver after each frame.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub movement: MoveFlags,
    pub running: bool,
    pub aiming: bool,
    /// Accumulated mouse-look delta (radians)
    pub look: Vec2,
    pub fire: bool,
    pub reload: bool,
    pub jump: bool,
    pub interact: bool,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Reset the one-shot inputs, keeping held keys
    pub fn clear_one_shots(&mut self) {
        self.look = Vec2::ZERO;
        self.fire = false;
        self.reload = false;
        self.jump = false;
        self.interact = false;
        self.pause = false;
    }
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.max(0.0);

    if input.pause {
        state.toggle_pause();
    }

    match state.phase {
        GamePhase::GameOver => {
            for event in state.timers.advance_cosmetic(dt) {
                state.apply_timer(event);
            }
            return;
        }
        GamePhase::Paused => {
            let fired = if state.tuning.pause_aware_timers {
                state.timers.advance_cosmetic(dt)
            } else {
                state.timers.advance(dt)
            };
            for event in fired {
                state.apply_timer(event);
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time += dt;

    // Deferred effects due this frame
    for event in state.timers.advance(dt) {
        state.apply_timer(event);
    }

    // One-shot actions
    state.set_aiming(input.aiming);
    state.player.look(input.look);
    state.player.running = input.running;
    if input.jump {
        state.jump();
    }
    if input.reload {
        state.reload();
    }
    if input.fire {
        state.fire();
    }
    if input.interact {
        state.interact();
    }

    // Player movement and presentation
    let step = state.player.update(dt, &input.movement);
    if let Some(stride) = step.footstep {
        let cue = match stride {
            Stride::Run => SoundCue::FootstepRun,
            Stride::Walk | Stride::Aim => SoundCue::Footstep,
        };
        state.push_event(GameEvent::Sound { cue, looped: false });
    }
    if step.landed {
        state.push_event(GameEvent::Sound {
            cue: SoundCue::Land,
            looped: false,
        });
    }

    // Difficulty
    let gained = state.difficulty.advance(dt, &state.tuning);
    if gained > 0 {
        log::info!(
            "Difficulty level {} (population cap {})",
            state.difficulty.level,
            state.difficulty.population_cap
        );
        state.schedule_population_growth();
        state.push_event(GameEvent::DifficultyRaised {
            level: state.difficulty.level,
            population_cap: state.difficulty.population_cap,
        });
    }

    // Combatants
    let player_pos = state.player.position;
    let now = state.time;
    // Deaths settle before any attack this frame
    let mut i = 0;
    while i < state.combatants.len() {
        if !state.combatants[i].is_dead() {
            i += 1;
            continue;
        }
        if state.combatants[i].update(dt, player_pos) {
            state.push_event(GameEvent::Sound {
                cue: SoundCue::ZombieDeath,
                looped: false,
            });
        }
        state.kill_combatant(i);
    }
    for i in 0..state.combatants.len() {
        state.combatants[i].update(dt, player_pos);
        if state.combatants[i].in_attack_window(player_pos, now) {
            state.combatants[i].record_attack(now);
            state.damage_player(state.tuning.attack_damage);
            if state.is_over() {
                state.normalize_order();
                return;
            }
        }
    }

    // Projectiles
    let mut i = 0;
    while i < state.projectiles.len() {
        let outcome = advance_projectile(&mut state.projectiles[i], &state.combatants, dt);
        let id = state.projectiles[i].id;
        match outcome {
            ProjectileOutcome::InFlight => i += 1,
            ProjectileOutcome::Expired => state.remove_projectile(id),
            ProjectileOutcome::Hit(target) => {
                if let Some(index) = state.combatants.iter().position(|c| c.id == target) {
                    state.hit_combatant(index);
                }
                state.remove_projectile(id);
            }
        }
    }

    state.normalize_order();
}
