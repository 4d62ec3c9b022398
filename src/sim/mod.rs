//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Timers read the active simulation clock, never wall time
//! - No rendering, audio or platform dependencies

pub mod arena;
pub mod boss;
pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod enemy;
pub mod orb;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use arena::{Arena, Handle};
pub use boss::{Boss, BossEncounter, DeathPhase, DeathSequence, EncounterState};
pub use clock::SimulationClock;
pub use difficulty::DifficultyModel;
pub use enemy::{Enemy, EnemyHandle, EnemyPopulation};
pub use orb::{Orb, OrbColor, OrbSpawner};
pub use player::{DashState, Invincibility, Player};
pub use projectile::{Owner, Projectile, ProjectileSet};
pub use snapshot::{OutputView, Snapshot};
pub use state::{DeathCause, GameEvent, GamePhase, GameState, KillCause, SimContext, SpatialEntity, Systems};
pub use tick::{TickInput, tick};
