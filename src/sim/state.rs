//! Game state and the per-tick simulation context
//!
//! `GameState` owns every entity collection, counter and timer. Systems never
//! reach into it directly: each tick the state is split into a `SimContext`
//! (shared clock, playfield, RNG, score/difficulty, event queue) plus mutable
//! borrows of the individual systems.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::BossEncounter;
use super::clock::SimulationClock;
use super::difficulty::DifficultyModel;
use super::enemy::EnemyPopulation;
use super::orb::{OrbColor, OrbSpawner};
use super::player::Player;
use super::projectile::{Owner, ProjectileSet};
use super::snapshot::Snapshot;
use crate::Playfield;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Position and half-extent shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialEntity {
    pub pos: Vec2,
    pub size: f32,
}

impl SpatialEntity {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self { pos, size }
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing advances; timers are frozen
    Paused,
    /// Active gameplay
    Playing,
    /// Terminal until restart
    GameOver,
}

/// How an enemy died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillCause {
    Projectile,
    /// Caught in the blast around the dash target
    DashBlast,
    /// Swept by the dash path
    DashPath,
    /// Touched an invincible player
    Contact,
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    EnemyContact,
    BossContact,
    BossProjectile,
}

/// Discrete notifications for audio/UI/effect cues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyKilled { pos: Vec2, cause: KillCause },
    ScoreChanged { score: u32 },
    DifficultyIncreased { level: u32, enemy_limit: u32 },
    ProjectileFired { owner: Owner, pos: Vec2 },
    DashStarted { from: Vec2, to: Vec2 },
    BossSpawned { pos: Vec2 },
    BossHit { pos: Vec2, health: u32 },
    BossKilled { pos: Vec2 },
    /// Boss sprite leaves the scene partway through the explosion
    BossRemoved,
    /// Death sequence finished and the overlay is gone
    BossSequenceEnded,
    AreaEntered { index: u32 },
    OrbSpawned { color: OrbColor, pos: Vec2 },
    OrbCollected { color: OrbColor },
    OrbExpired { color: OrbColor },
    GameOver { cause: DeathCause, score: u32 },
    Paused,
    Resumed,
    Restarted,
    SettingsChanged,
}

/// Shared read state and mutation hooks handed to every system update
pub struct SimContext<'a> {
    /// Active simulation time (seconds)
    pub now: f32,
    /// Seconds spent in the current area
    pub area_elapsed: f32,
    pub field: Playfield,
    pub tuning: &'a Tuning,
    pub rng: &'a mut Pcg32,
    pub difficulty: &'a mut DifficultyModel,
    pub events: &'a mut Vec<GameEvent>,
    /// Set when a fatal collision happened this tick
    pub game_over: bool,
    /// Set by the boss death sequence when the white hold begins
    pub area_transition_requested: bool,
}

impl SimContext<'_> {
    #[inline]
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Add points and run the difficulty check
    ///
    /// Returns true when the enemy cap was raised, in which case the caller
    /// owes the population one immediate replacement spawn.
    pub fn award(&mut self, points: u32) -> bool {
        let score = self.difficulty.add_score(points);
        self.emit(GameEvent::ScoreChanged { score });
        let raised = self.difficulty.check_difficulty_increase(&self.tuning.enemy);
        if raised {
            let level = self.difficulty.level(&self.tuning.enemy);
            let enemy_limit = self.difficulty.enemy_limit;
            self.emit(GameEvent::DifficultyIncreased { level, enemy_limit });
        }
        raised
    }

    /// Enemy spawn speed range at the current moment
    pub fn speed_range(&self) -> (f32, f32) {
        self.difficulty.speed_range(&self.tuning.enemy, self.now)
    }

    /// Fatal hit; only the first one in a tick is reported
    pub fn end_game(&mut self, cause: DeathCause) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        let score = self.difficulty.score;
        log::info!("Game over ({:?}) with score {}", cause, score);
        self.emit(GameEvent::GameOver { cause, score });
    }

    pub fn request_area_transition(&mut self) {
        self.area_transition_requested = true;
    }
}

/// Mutable borrows of every system, split off alongside a `SimContext`
pub struct Systems<'a> {
    pub player: &'a mut Player,
    pub enemies: &'a mut EnemyPopulation,
    pub boss: &'a mut BossEncounter,
    pub projectiles: &'a mut ProjectileSet,
    pub orbs: &'a mut OrbSpawner,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub field: Playfield,
    pub clock: SimulationClock,
    pub phase: GamePhase,
    /// Areas cleared by defeating a boss
    pub area_index: u32,
    /// Active time at which the current area began
    pub area_started_at: f32,
    pub player: Player,
    pub enemies: EnemyPopulation,
    pub boss: BossEncounter,
    pub projectiles: ProjectileSet,
    pub orbs: OrbSpawner,
    pub difficulty: DifficultyModel,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Player preferences; kept across restarts
    pub settings: Settings,
    rng: Pcg32,
}

impl GameState {
    /// Create an empty, paused state. Call `start` to populate it.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let field = Playfield::new(tuning.aspect_ratio);
        Self {
            seed,
            field,
            clock: SimulationClock::new(),
            phase: GamePhase::Paused,
            area_index: 0,
            area_started_at: 0.0,
            player: Player::new(&tuning),
            enemies: EnemyPopulation::new(),
            boss: BossEncounter::new(),
            projectiles: ProjectileSet::new(),
            orbs: OrbSpawner::new(0.0),
            difficulty: DifficultyModel::new(&tuning.enemy, 0.0),
            events: Vec::new(),
            settings: Settings::default(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    /// Spawn the opening population. The session stays paused.
    pub fn start(&mut self) {
        let (mut ctx, systems) = self.split();
        systems.enemies.top_up(&mut ctx);
        log::info!(
            "Session started with {} enemies (seed {})",
            self.enemies.len(),
            self.seed
        );
    }

    /// Reset every collection, counter and timer, then resume play
    ///
    /// The RNG stream carries on, so a restarted run differs from the first.
    pub fn restart(&mut self) {
        self.clock.reset();
        self.area_index = 0;
        self.area_started_at = 0.0;
        self.player = Player::new(&self.tuning);
        self.enemies.clear();
        self.boss.reset();
        self.projectiles.clear();
        self.orbs = OrbSpawner::new(0.0);
        self.difficulty = DifficultyModel::new(&self.tuning.enemy, 0.0);
        self.events.clear();
        self.events.push(GameEvent::Restarted);
        self.start();
        self.phase = GamePhase::Playing;
        log::info!("Session restarted");
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            self.events.push(GameEvent::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            self.events.push(GameEvent::Resumed);
        }
    }

    /// Enter the next area: hostiles and pickups are cleared and the boss
    /// timer starts over. Score and difficulty carry across.
    pub fn transition_to_next_area(&mut self) {
        let now = self.clock.now();
        self.area_index += 1;
        self.area_started_at = now;
        self.enemies.clear();
        self.projectiles.clear();
        self.orbs.reset(now);
        log::info!("Entering area {}", self.area_index);
        self.events.push(GameEvent::AreaEntered {
            index: self.area_index,
        });
    }

    /// Split into the shared context and per-system borrows
    pub fn split(&mut self) -> (SimContext<'_>, Systems<'_>) {
        let now = self.clock.now();
        let ctx = SimContext {
            now,
            area_elapsed: now - self.area_started_at,
            field: self.field,
            tuning: &self.tuning,
            rng: &mut self.rng,
            difficulty: &mut self.difficulty,
            events: &mut self.events,
            game_over: false,
            area_transition_requested: false,
        };
        let systems = Systems {
            player: &mut self.player,
            enemies: &mut self.enemies,
            boss: &mut self.boss,
            projectiles: &mut self.projectiles,
            orbs: &mut self.orbs,
        };
        (ctx, systems)
    }

    pub fn score(&self) -> u32 {
        self.difficulty.score
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
