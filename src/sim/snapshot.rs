//! Read-only per-tick view for renderers and tooling

use glam::Vec2;
use serde::Serialize;

use super::boss::DeathPhase;
use super::orb::OrbColor;
use super::projectile::Owner;
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: f32,
    pub dashing: bool,
    pub invincible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    pub owner: Owner,
    pub pos: Vec2,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbView {
    pub color: OrbColor,
    pub pos: Vec2,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BossView {
    pub pos: Vec2,
    pub size: f32,
    pub health: u32,
    pub scale: f32,
}

/// Output settings the front end should apply this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputView {
    pub fullscreen: bool,
    /// Silenced while muted or paused
    pub music_volume: f32,
    pub sfx_volume: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    /// Active simulation time
    pub time: f32,
    pub phase: GamePhase,
    pub score: u32,
    pub level: u32,
    pub enemy_limit: u32,
    pub area_index: u32,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub orbs: Vec<OrbView>,
    pub boss: Option<BossView>,
    /// White flash opacity during the boss death sequence
    pub overlay_opacity: f32,
    pub death_phase: Option<DeathPhase>,
    pub output: OutputView,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let tuning = &state.tuning;
        Self {
            tick: state.clock.ticks(),
            time: state.clock.now(),
            phase: state.phase,
            score: state.difficulty.score,
            level: state.difficulty.level(&tuning.enemy),
            enemy_limit: state.difficulty.enemy_limit,
            area_index: state.area_index,
            player: PlayerView {
                pos: state.player.pos(),
                size: state.player.body.size,
                dashing: state.player.is_dashing(),
                invincible: state.player.is_invincible(),
            },
            enemies: state
                .enemies
                .iter()
                .map(|(_, e)| EnemyView {
                    pos: e.pos(),
                    size: e.body.size,
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    owner: p.owner,
                    pos: p.pos(),
                    size: p.body.size,
                })
                .collect(),
            orbs: state
                .orbs
                .iter()
                .map(|o| OrbView {
                    color: o.color,
                    pos: o.pos(),
                    size: o.body.size,
                })
                .collect(),
            boss: state.boss.boss().map(|b| BossView {
                pos: b.pos(),
                size: b.body.size,
                health: b.health,
                scale: b.scale,
            }),
            overlay_opacity: state.boss.overlay_opacity(),
            death_phase: state.boss.death_phase(&tuning.boss),
            output: OutputView {
                fullscreen: state.settings.fullscreen,
                music_volume: state
                    .settings
                    .effective_music_volume(state.phase != GamePhase::Playing),
                sfx_volume: state.settings.effective_sfx_volume(),
            },
        }
    }
}
