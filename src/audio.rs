//! Sound cues and the audio output port
//!
//! The simulation only names cues; playback belongs to whatever implements
//! [`AudioPort`]. The [`Mixer`] applies master volume and mute before the
//! port sees a request.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Weapon discharged
    Gunshot,
    /// Magazine swap started
    Reload,
    /// Trigger pulled on an empty magazine
    Empty,
    /// Zombie entered the world
    ZombieGrowl,
    /// Zombie hit the player
    ZombieAttack,
    /// Zombie killed
    ZombieDeath,
    Footstep,
    FootstepRun,
    Jump,
    Land,
    /// Loot container opened
    LootOpen,
    /// Ambient loop for the whole session
    Environment,
}

impl SoundCue {
    /// Event name understood by audio backends
    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::Gunshot => "gunshot",
            SoundCue::Reload => "reload",
            SoundCue::Empty => "empty",
            SoundCue::ZombieGrowl => "zombieGrowl",
            SoundCue::ZombieAttack => "zombieAttack",
            SoundCue::ZombieDeath => "zombieDeath",
            SoundCue::Footstep => "footstep",
            SoundCue::FootstepRun => "footstepRun",
            SoundCue::Jump => "jump",
            SoundCue::Land => "land",
            SoundCue::LootOpen => "lootOpen",
            SoundCue::Environment => "environment",
        }
    }

    /// Mix level relative to the master volume
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundCue::Footstep => 0.4,
            SoundCue::FootstepRun => 0.5,
            SoundCue::ZombieGrowl => 0.6,
            SoundCue::Environment => 0.3,
            SoundCue::Empty | SoundCue::Land => 0.7,
            _ => 1.0,
        }
    }
}

/// Playback parameters handed to the port
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayOptions {
    pub volume: f32,
    pub looped: bool,
}

/// Audio output port (fire-and-forget)
pub trait AudioPort {
    fn play(&mut self, cue: SoundCue, options: PlayOptions);
    fn stop(&mut self, cue: SoundCue);
}

/// Master volume and mute state
#[derive(Debug, Clone, Copy)]
pub struct Mixer {
    master_volume: f32,
    muted: bool,
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new(0.5, false)
    }
}

impl Mixer {
    pub fn new(master_volume: f32, muted: bool) -> Self {
        Self {
            master_volume: master_volume.clamp(0.0, 1.0),
            muted,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Final volume for a cue, or `None` if it would be inaudible
    pub fn options_for(&self, cue: SoundCue, looped: bool) -> Option<PlayOptions> {
        if self.muted {
            return None;
        }
        let volume = self.master_volume * cue.base_volume();
        (volume > 0.0).then_some(PlayOptions { volume, looped })
    }
}

/// Port that discards everything (tests, servers)
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioPort for NullAudio {
    fn play(&mut self, _cue: SoundCue, _options: PlayOptions) {}
    fn stop(&mut self, _cue: SoundCue) {}
}

/// Port that logs requests instead of playing them
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioPort for LogAudio {
    fn play(&mut self, cue: SoundCue, options: PlayOptions) {
        log::debug!(
            "play {} (volume {:.2}{})",
            cue.name(),
            options.volume,
            if options.looped { ", looped" } else { "" }
        );
    }

    fn stop(&mut self, cue: SoundCue) {
        log::debug!("stop {}", cue.name());
    }
}
