//! Frame driver
//!
//! Owns the simulation, the clock and the output ports. Each frame it reads a
//! clamped delta, ticks the simulation with the accumulated input, and
//! mirrors the resulting `GameEvent`s into the scene, audio and HUD before
//! handing them to subscribers.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::audio::{AudioPort, LogAudio, Mixer, NullAudio, SoundCue};
use crate::consts::{MAX_FRAME_DELTA, MAX_HEALTH};
use crate::platform::{Clock, InputEvent};
use crate::renderer::{HeadlessScene, Renderable, RenderHandle, ScenePort, placeholder_for};
use crate::settings::{MapKind, Settings};
use crate::sim::{EntityId, GameEvent, GamePhase, GameState, TickInput, tick};
use crate::ui::{LogUi, NullUi, UiPort};

/// Output ports the driver writes to
pub struct Ports {
    pub scene: Box<dyn ScenePort>,
    pub audio: Box<dyn AudioPort>,
    pub ui: Box<dyn UiPort>,
}

impl Ports {
    /// Ports that discard everything
    pub fn headless() -> Self {
        Self {
            scene: Box::new(HeadlessScene::new()),
            audio: Box::new(NullAudio),
            ui: Box::new(NullUi),
        }
    }

    /// Headless scene with audio and HUD traffic sent to the log
    pub fn logging() -> Self {
        Self {
            scene: Box::new(HeadlessScene::new()),
            audio: Box::new(LogAudio),
            ui: Box::new(LogUi),
        }
    }
}

/// Observer callback for simulation events
pub type Listener = Box<dyn FnMut(&GameEvent)>;

/// End-of-session report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub map: MapKind,
    pub phase: GamePhase,
    pub score: u64,
    pub level: u32,
    pub kills: u32,
    pub shots_fired: u32,
    pub hits: u32,
    pub boxes_opened: u32,
    pub damage_taken: u32,
    pub health: u32,
    /// Seconds of un-paused play
    pub elapsed: f32,
    pub frames: u64,
}

pub struct Game {
    state: GameState,
    clock: Box<dyn Clock>,
    ports: Ports,
    mixer: Mixer,
    input: TickInput,
    /// Scene handle for every entity currently shown
    handles: BTreeMap<EntityId, RenderHandle>,
    listeners: Vec<Listener>,
    frames: u64,
    running: bool,
}

impl Game {
    /// Start a session and publish its initial events (spawns, ambient loop, HUD)
    pub fn new(settings: &Settings, clock: Box<dyn Clock>, ports: Ports) -> Self {
        let mut game = Self {
            state: GameState::new(settings),
            clock,
            ports,
            mixer: Mixer::new(settings.master_volume, settings.muted),
            input: TickInput::default(),
            handles: BTreeMap::new(),
            listeners: Vec::new(),
            frames: 0,
            running: true,
        };
        game.dispatch_events();
        game
    }

    /// Register an observer; it sees every event from the next frame on
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Queue an input event for the next frame
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::ControlsLocked(locked) => self.state.set_controls_locked(locked),
            other => other.apply(&mut self.input),
        }
    }

    /// Run one frame; returns the delta fed to the simulation
    pub fn frame(&mut self) -> f32 {
        if !self.running {
            return 0.0;
        }
        let dt = self.clock.delta().clamp(0.0, MAX_FRAME_DELTA);

        tick(&mut self.state, &self.input, dt);
        self.input.clear_one_shots();
        self.frames += 1;

        self.dispatch_events();
        self.sync_transforms();
        dt
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.mixer.set_master_volume(volume);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.mixer.set_muted(muted);
    }

    pub fn summary(&self) -> SessionSummary {
        let state = &self.state;
        SessionSummary {
            seed: state.seed,
            map: state.map,
            phase: state.phase,
            score: state.score,
            level: state.difficulty.level,
            kills: state.stats.kills,
            shots_fired: state.stats.shots_fired,
            hits: state.stats.hits,
            boxes_opened: state.stats.boxes_opened,
            damage_taken: state.stats.damage_taken,
            health: state.player.health,
            elapsed: state.time,
            frames: self.frames,
        }
    }

    /// Leave the session: remove every visual and stop the ambient loop
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        for (_, handle) in std::mem::take(&mut self.handles) {
            self.ports.scene.remove_entity(handle);
        }
        self.ports.audio.stop(SoundCue::Environment);
        log::info!(
            "Session closed after {} frames (score {})",
            self.frames,
            self.state.score
        );
    }

    fn dispatch_events(&mut self) {
        let events = self.state.drain_events();
        for event in &events {
            self.route(event);
            for listener in &mut self.listeners {
                listener(event);
            }
        }
    }

    fn route(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Spawned { id, kind, position } => {
                let renderable = Renderable::for_entity(kind, position);
                let handle = match self.ports.scene.add_entity(&renderable) {
                    Ok(handle) => handle,
                    Err(e) => {
                        log::warn!("{}; using placeholder for {:?}", e, kind);
                        self.ports
                            .scene
                            .add_placeholder(&placeholder_for(kind), position)
                    }
                };
                self.handles.insert(id, handle);
            }
            GameEvent::Despawned { id } => {
                if let Some(handle) = self.handles.remove(&id) {
                    self.ports.scene.remove_entity(handle);
                }
            }
            GameEvent::Flash { id, on } => {
                if let Some(&handle) = self.handles.get(&id) {
                    self.ports.scene.set_flash(handle, on);
                }
            }
            GameEvent::Sound { cue, looped } => {
                if let Some(options) = self.mixer.options_for(cue, looped) {
                    self.ports.audio.play(cue, options);
                }
            }
            GameEvent::StopSound(cue) => self.ports.audio.stop(cue),
            GameEvent::ScoreChanged(score) => self.ports.ui.update_score(score),
            GameEvent::HealthChanged(health) => {
                let percent = (health as f32 / MAX_HEALTH as f32 * 100.0).clamp(0.0, 100.0);
                self.ports.ui.update_health(percent);
            }
            GameEvent::AmmoChanged(ammo) => self.ports.ui.update_ammo(ammo),
            GameEvent::PauseChanged(paused) => self.ports.ui.toggle_pause_menu(paused),
            GameEvent::LootOpened {
                reward, applied, ..
            } => {
                let message = if applied {
                    format!("Found {}", reward.describe())
                } else {
                    "Score multiplier already active".to_string()
                };
                self.ports.ui.notify(&message);
            }
            GameEvent::DifficultyRaised { level, .. } => {
                self.ports
                    .ui
                    .notify(&format!("The horde grows stronger (level {})", level));
            }
            GameEvent::CombatantKilled { .. } => {}
            GameEvent::GameOver { score } => self.ports.ui.show_game_over(score),
        }
    }

    fn sync_transforms(&mut self) {
        for c in &self.state.combatants {
            if let Some(&handle) = self.handles.get(&c.id) {
                self.ports.scene.set_transform(handle, c.position, c.facing);
            }
        }
        for p in &self.state.projectiles {
            if let Some(&handle) = self.handles.get(&p.id) {
                self.ports.scene.set_transform(handle, p.position, 0.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::platform::ManualClock;

    fn game_with_clock(clock: ManualClock) -> Game {
        Game::new(&Settings::default(), Box::new(clock), Ports::headless())
    }

    #[test]
    fn test_frame_delta_clamped() {
        let mut clock = ManualClock::fixed(1.0 / 60.0);
        clock.push(5.0);
        let mut game = game_with_clock(clock);

        assert_eq!(game.frame(), MAX_FRAME_DELTA);
        assert_eq!(game.state().time, MAX_FRAME_DELTA);
    }

    #[test]
    fn test_controls_lock_routes_to_state() {
        let mut game = game_with_clock(ManualClock::fixed(1.0 / 60.0));
        assert!(!game.state().player.controls_locked);
        game.handle_input(InputEvent::ControlsLocked(true));
        assert!(game.state().player.controls_locked);
    }

    #[test]
    fn test_one_shot_inputs_consumed() {
        let mut game = game_with_clock(ManualClock::fixed(1.0 / 60.0));
        game.handle_input(InputEvent::ControlsLocked(true));
        game.handle_input(InputEvent::Fire);
        game.frame();
        game.frame();
        game.frame();
        assert_eq!(game.summary().shots_fired, 1);
        assert_eq!(game.state().player.ammo, 29);
    }

    #[test]
    fn test_subscribers_see_events() {
        let mut game = game_with_clock(ManualClock::fixed(1.0 / 60.0));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        game.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        game.handle_input(InputEvent::ControlsLocked(true));
        game.handle_input(InputEvent::TogglePause);
        game.frame();
        assert!(seen.borrow().contains(&GameEvent::PauseChanged(true)));
    }

    #[test]
    fn test_shutdown_stops_frames() {
        let mut game = game_with_clock(ManualClock::fixed(1.0 / 60.0));
        game.frame();
        game.shutdown();
        assert!(!game.is_running());
        assert_eq!(game.frame(), 0.0);
        assert_eq!(game.summary().frames, 1);
    }
}
