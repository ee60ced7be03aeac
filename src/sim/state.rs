//! Game state and core simulation types
//!
//! `GameState` is the single owner of every live entity. The player keeps
//! only the ids of its projectiles, and every removal goes through here so
//! the two stay in sync.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::{hit_damage, nearest_loot_in_range};
use super::combatant::{Combatant, CombatantVariant};
use super::difficulty::DifficultyState;
use super::loot::{LootContainer, LootReward};
use super::player::{Player, ShotResult};
use super::projectile::Projectile;
use super::spawn::{SpawnManager, loot_respawn_delay, spawn_position};
use super::timers::{TimerEvent, TimerQueue};
use crate::audio::SoundCue;
use crate::consts::{HIT_FLASH_DURATION, MUZZLE_FLASH_DURATION};
use crate::settings::{MapKind, Settings, Tuning};

/// Opaque entity identifier (unique per session)
pub type EntityId = u32;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen; only cosmetic timers run
    Paused,
    /// Player died; the session is over
    GameOver,
}

/// What an entity looks like to the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Combatant(CombatantVariant),
    Projectile,
    LootContainer,
    MuzzleFlash,
}

/// Side effects produced by the simulation, consumed by the frame driver
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Spawned {
        id: EntityId,
        kind: EntityKind,
        position: Vec3,
    },
    Despawned {
        id: EntityId,
    },
    /// Hit tint on/off for a combatant
    Flash {
        id: EntityId,
        on: bool,
    },
    Sound {
        cue: SoundCue,
        looped: bool,
    },
    StopSound(SoundCue),
    ScoreChanged(u64),
    HealthChanged(u32),
    AmmoChanged(u32),
    PauseChanged(bool),
    LootOpened {
        id: EntityId,
        reward: LootReward,
        applied: bool,
    },
    DifficultyRaised {
        level: u32,
        population_cap: u32,
    },
    CombatantKilled {
        id: EntityId,
        score: u64,
    },
    GameOver {
        score: u64,
    },
}

/// Running totals for the session
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionStats {
    pub kills: u32,
    pub shots_fired: u32,
    pub hits: u32,
    pub boxes_opened: u32,
    pub damage_taken: u32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub map: MapKind,
    pub tuning: Tuning,
    rng: Pcg32,
    pub phase: GamePhase,
    /// Simulated seconds of un-paused play
    pub time: f32,
    pub score: u64,
    pub player: Player,
    /// Live zombies (sorted by id)
    pub combatants: Vec<Combatant>,
    /// Live projectiles (sorted by id)
    pub projectiles: Vec<Projectile>,
    /// Unopened loot containers (sorted by id)
    pub loot: Vec<LootContainer>,
    pub difficulty: DifficultyState,
    pub spawner: SpawnManager,
    pub timers: TimerQueue,
    pub stats: SessionStats,
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Start a session: player at the origin, initial zombies and loot in place
    pub fn new(settings: &Settings) -> Self {
        let tuning = settings.tuning.clone();
        let mut state = Self {
            seed: settings.seed,
            map: settings.map,
            rng: Pcg32::seed_from_u64(settings.seed),
            phase: GamePhase::Playing,
            time: 0.0,
            score: 0,
            player: Player::new(&tuning),
            combatants: Vec::new(),
            projectiles: Vec::new(),
            loot: Vec::new(),
            difficulty: DifficultyState::new(&tuning),
            spawner: SpawnManager::new(),
            timers: TimerQueue::new(),
            stats: SessionStats::default(),
            events: Vec::new(),
            next_id: 1,
            tuning,
        };

        log::info!(
            "Session started on {} (seed {})",
            state.map.as_str(),
            state.seed
        );

        for _ in 0..state.difficulty.population_cap {
            state.spawn_combatant();
        }
        for _ in 0..state.tuning.loot_cap {
            state.spawn_loot();
        }

        state.push_event(GameEvent::Sound {
            cue: SoundCue::Environment,
            looped: true,
        });
        state.push_event(GameEvent::ScoreChanged(0));
        state.push_event(GameEvent::HealthChanged(state.player.health));
        state.push_event(GameEvent::AmmoChanged(state.player.ammo));
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    fn sound(&mut self, cue: SoundCue) {
        self.push_event(GameEvent::Sound { cue, looped: false });
    }

    // === Pause and control lock ===

    /// Pause or resume; pausing releases the controls, resuming re-locks them
    pub fn set_paused(&mut self, paused: bool) {
        let next = match (self.phase, paused) {
            (GamePhase::Playing, true) => GamePhase::Paused,
            (GamePhase::Paused, false) => GamePhase::Playing,
            _ => return,
        };
        self.phase = next;
        self.player.controls_locked = !paused;
        log::info!("{}", if paused { "Paused" } else { "Resumed" });
        self.push_event(GameEvent::PauseChanged(paused));
    }

    pub fn toggle_pause(&mut self) {
        let paused = self.is_paused();
        self.set_paused(!paused);
    }

    /// Host acquired or released the pointer lock
    pub fn set_controls_locked(&mut self, locked: bool) {
        if locked && self.phase != GamePhase::Playing {
            return;
        }
        self.player.controls_locked = locked;
    }

    // === Player actions ===

    /// Fire the weapon (no-op while paused or over)
    pub fn fire(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        match self.player.shoot() {
            ShotResult::Fired {
                origin,
                direction,
                emptied,
            } => {
                let id = self.next_entity_id();
                let projectile = Projectile::new(
                    id,
                    origin,
                    direction,
                    self.tuning.projectile_speed,
                    self.tuning.projectile_lifetime,
                );
                self.projectiles.push(projectile);
                self.player.projectiles.push(id);
                self.stats.shots_fired += 1;
                self.push_event(GameEvent::Spawned {
                    id,
                    kind: EntityKind::Projectile,
                    position: origin,
                });

                let flash_id = self.next_entity_id();
                self.push_event(GameEvent::Spawned {
                    id: flash_id,
                    kind: EntityKind::MuzzleFlash,
                    position: origin,
                });
                self.timers
                    .schedule(MUZZLE_FLASH_DURATION, TimerEvent::MuzzleFlashEnd(flash_id));
                self.timers
                    .schedule(self.tuning.shot_cooldown, TimerEvent::ShotCooldown);

                self.sound(SoundCue::Gunshot);
                self.push_event(GameEvent::AmmoChanged(self.player.ammo));

                if emptied {
                    self.reload();
                }
            }
            ShotResult::EmptyClick => self.sound(SoundCue::Empty),
            ShotResult::Blocked => {}
        }
    }

    /// Start a reload (no-op when full, already reloading, or not in control)
    pub fn reload(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if self.player.begin_reload() {
            self.timers
                .schedule(self.tuning.reload_time, TimerEvent::ReloadComplete);
            self.sound(SoundCue::Reload);
        }
    }

    pub fn jump(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if self.player.jump() {
            self.sound(SoundCue::Jump);
        }
    }

    /// Aim button state
    pub fn set_aiming(&mut self, pressed: bool) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.player.set_aiming(pressed);
    }

    /// Open the nearest unopened loot container in reach
    pub fn interact(&mut self) {
        if self.phase != GamePhase::Playing || !self.player.controls_locked {
            return;
        }
        let Some(index) =
            nearest_loot_in_range(&self.loot, self.player.position, self.tuning.interact_range)
        else {
            return;
        };
        let Some(grant) = self.loot[index].interact(&mut self.player, &self.tuning, &mut self.rng)
        else {
            return;
        };

        let container = self.loot.remove(index);
        self.stats.boxes_opened += 1;
        log::info!(
            "Loot {} opened: {}{}",
            container.id,
            grant.reward.describe(),
            if grant.applied { "" } else { " (already active)" }
        );
        self.push_event(GameEvent::Despawned { id: container.id });
        self.sound(SoundCue::LootOpen);
        self.push_event(GameEvent::LootOpened {
            id: container.id,
            reward: grant.reward,
            applied: grant.applied,
        });

        if grant.applied {
            match grant.reward {
                LootReward::Health(_) => {
                    self.push_event(GameEvent::HealthChanged(self.player.health))
                }
                LootReward::AmmoCapacity(_) => {
                    self.push_event(GameEvent::AmmoChanged(self.player.ammo))
                }
                LootReward::ScoreMultiplier { duration, .. } => {
                    self.timers
                        .schedule(duration, TimerEvent::MultiplierExpired);
                }
                LootReward::Damage(_) | LootReward::Speed(_) => {}
            }
        }

        if self
            .spawner
            .request_loot(self.loot.len(), self.tuning.loot_cap)
        {
            let delay = loot_respawn_delay(&mut self.rng, &self.tuning);
            self.timers.schedule(delay, TimerEvent::SpawnLoot);
        }
    }

    // === Spawning ===

    /// Create a zombie at a random position using the current difficulty
    pub fn spawn_combatant(&mut self) -> EntityId {
        let id = self.next_entity_id();
        let position = spawn_position(
            &mut self.rng,
            self.map.spawn_half_extent(),
            self.player.position,
            &self.tuning,
        );
        let combatant = Combatant::spawn(
            id,
            self.map.combatant_variant(),
            position,
            self.tuning.attack_cooldown,
            &self.difficulty,
            &mut self.rng,
        );
        log::debug!(
            "Spawned zombie {} at ({:.1}, {:.1}) hp={} speed={:.2}",
            id,
            position.x,
            position.z,
            combatant.health,
            combatant.speed
        );
        self.push_event(GameEvent::Spawned {
            id,
            kind: EntityKind::Combatant(combatant.variant),
            position: combatant.position,
        });
        self.combatants.push(combatant);
        self.sound(SoundCue::ZombieGrowl);
        id
    }

    /// Place a loot container at a random position
    pub fn spawn_loot(&mut self) -> EntityId {
        let id = self.next_entity_id();
        let position = spawn_position(
            &mut self.rng,
            self.map.spawn_half_extent(),
            self.player.position,
            &self.tuning,
        );
        log::debug!("Spawned loot {} at ({:.1}, {:.1})", id, position.x, position.z);
        self.loot.push(LootContainer::new(id, position));
        self.push_event(GameEvent::Spawned {
            id,
            kind: EntityKind::LootContainer,
            position,
        });
        id
    }

    /// Reserve a replacement for a dead zombie
    pub fn schedule_combatant_respawn(&mut self) {
        if self
            .spawner
            .request_combatant(self.combatants.len(), self.difficulty.population_cap)
        {
            self.timers
                .schedule(self.tuning.respawn_delay, TimerEvent::SpawnCombatant);
        }
    }

    /// Population cap grew: reserve spawns for the shortfall
    pub fn schedule_population_growth(&mut self) {
        let deficit = self
            .spawner
            .request_combatant_deficit(self.combatants.len(), self.difficulty.population_cap);
        for _ in 0..deficit {
            self.timers
                .schedule(self.tuning.respawn_delay, TimerEvent::SpawnCombatant);
        }
    }

    // === Combat ===

    /// Apply one projectile hit to the combatant at `index`
    pub fn hit_combatant(&mut self, index: usize) {
        let amount = hit_damage(self.tuning.damage_model, &self.player);
        let combatant = &mut self.combatants[index];
        let was_flashing = combatant.flashing;
        combatant.take_damage(amount);
        let id = combatant.id;
        self.stats.hits += 1;

        if !was_flashing {
            self.push_event(GameEvent::Flash { id, on: true });
        }
        self.timers.cancel(TimerEvent::HitFlashEnd(id));
        self.timers
            .schedule(HIT_FLASH_DURATION, TimerEvent::HitFlashEnd(id));
    }

    /// Remove a dead zombie, award score and queue its replacement
    pub fn kill_combatant(&mut self, index: usize) {
        let combatant = self.combatants.remove(index);
        self.timers.cancel(TimerEvent::HitFlashEnd(combatant.id));

        let awarded = (self.tuning.kill_score as f32 * self.player.score_multiplier).round() as u64;
        self.score += awarded;
        self.stats.kills += 1;
        log::debug!("Zombie {} killed (+{})", combatant.id, awarded);

        self.push_event(GameEvent::Despawned { id: combatant.id });
        self.push_event(GameEvent::CombatantKilled {
            id: combatant.id,
            score: awarded,
        });
        self.push_event(GameEvent::ScoreChanged(self.score));
        self.schedule_combatant_respawn();
    }

    /// Zombie attack landed on the player
    pub fn damage_player(&mut self, amount: u32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.player.take_damage(amount);
        self.stats.damage_taken += amount;
        self.sound(SoundCue::ZombieAttack);
        self.push_event(GameEvent::HealthChanged(self.player.health));
        log::debug!("Player health: {}", self.player.health);

        if !self.player.is_alive() {
            self.game_over();
        }
    }

    /// Enter the terminal phase (idempotent)
    pub fn game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.player.controls_locked = false;
        log::info!(
            "Game over: score {} after {:.1}s (level {})",
            self.score,
            self.time,
            self.difficulty.level
        );
        self.push_event(GameEvent::StopSound(SoundCue::Environment));
        self.push_event(GameEvent::GameOver { score: self.score });
    }

    /// Remove a projectile from the world and from the player's view
    pub fn remove_projectile(&mut self, id: EntityId) {
        self.projectiles.retain(|p| p.id != id);
        self.player.projectiles.retain(|&pid| pid != id);
        self.push_event(GameEvent::Despawned { id });
    }

    pub fn combatant(&self, id: EntityId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    // === Timers ===

    /// Apply a fired deferred event
    pub fn apply_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::ShotCooldown => self.player.end_shot_cooldown(),
            TimerEvent::ReloadComplete => {
                self.player.finish_reload();
                self.push_event(GameEvent::AmmoChanged(self.player.ammo));
            }
            TimerEvent::MuzzleFlashEnd(id) => self.push_event(GameEvent::Despawned { id }),
            TimerEvent::HitFlashEnd(id) => {
                if let Some(c) = self.combatants.iter_mut().find(|c| c.id == id) {
                    c.end_flash();
                    self.push_event(GameEvent::Flash { id, on: false });
                }
            }
            TimerEvent::SpawnCombatant => {
                if self
                    .spawner
                    .take_combatant(self.combatants.len(), self.difficulty.population_cap)
                {
                    self.spawn_combatant();
                }
            }
            TimerEvent::SpawnLoot => {
                if self.spawner.take_loot(self.loot.len(), self.tuning.loot_cap) {
                    self.spawn_loot();
                }
            }
            TimerEvent::MultiplierExpired => {
                self.player.clear_multiplier();
                log::info!("Score multiplier expired");
            }
        }
    }

    /// Ensure deterministic iteration order
    pub fn normalize_order(&mut self) {
        self.combatants.sort_by_key(|c| c.id);
        self.projectiles.sort_by_key(|p| p.id);
        self.loot.sort_by_key(|l| l.id);
    }
}
