//! Player movement, firing, dash and invincibility

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{distance_to_segment, within_radius};
use super::enemy::EnemyPopulation;
use super::projectile::{Owner, ProjectileSet};
use super::state::{GameEvent, KillCause, SimContext, SpatialEntity};
use super::tick::TickInput;
use crate::Playfield;
use crate::consts::DEADZONE;
use crate::tuning::Tuning;

/// Dash progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DashState {
    Idle,
    Dashing {
        start: Vec2,
        target: Vec2,
        started_at: f32,
    },
}

/// Timed immunity to contact and boss fire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Invincibility {
    pub active: bool,
    pub started_at: f32,
    pub duration: f32,
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: SpatialEntity,
    pub movement_speed: f32,
    pub dash: DashState,
    /// Active time of the last accepted dash (None before the first)
    pub last_dash_time: Option<f32>,
    pub invincibility: Invincibility,
    /// Active time of the last shot (None before the first)
    pub last_fire_time: Option<f32>,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            body: SpatialEntity::new(Vec2::ZERO, tuning.player.size),
            movement_speed: tuning.player.movement_speed,
            dash: DashState::Idle,
            last_dash_time: None,
            invincibility: Invincibility {
                active: false,
                started_at: 0.0,
                duration: tuning.player.invincibility_duration,
            },
            last_fire_time: None,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    #[inline]
    pub fn is_dashing(&self) -> bool {
        matches!(self.dash, DashState::Dashing { .. })
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincibility.active
    }

    /// `(start, target)` of the dash in progress
    pub fn dash_segment(&self) -> Option<(Vec2, Vec2)> {
        match self.dash {
            DashState::Dashing { start, target, .. } => Some((start, target)),
            DashState::Idle => None,
        }
    }

    /// Integrate a displacement, then clamp to the playfield
    pub fn update_position(&mut self, dx: f32, dy: f32, field: Playfield) {
        self.body.pos = field.clamp(self.body.pos + Vec2::new(dx, dy));
    }

    pub fn can_dash(&self, now: f32, cooldown: f32) -> bool {
        !self.is_dashing() && self.last_dash_time.is_none_or(|last| now - last >= cooldown)
    }

    /// Try to start a dash along `direction`
    ///
    /// Rejected without any state change while dashing, during cooldown, or
    /// when the direction is inside the deadzone.
    pub fn begin_dash(&mut self, direction: Vec2, now: f32, tuning: &Tuning, field: Playfield) -> bool {
        if !self.can_dash(now, tuning.dash.cooldown) {
            return false;
        }
        let magnitude = direction.length();
        if magnitude < DEADZONE {
            return false;
        }
        let dir = direction / magnitude;
        let start = self.body.pos;
        let target = field.clamp(start + dir * tuning.dash.distance);
        self.dash = DashState::Dashing {
            start,
            target,
            started_at: now,
        };
        self.last_dash_time = Some(now);
        true
    }

    /// Move along the dash with a quadratic ease-out; snap and finish at the end
    pub fn advance_dash(&mut self, now: f32, duration: f32) {
        let DashState::Dashing {
            start,
            target,
            started_at,
        } = self.dash
        else {
            return;
        };
        let progress = if duration > 0.0 { (now - started_at) / duration } else { 1.0 };
        if progress >= 1.0 {
            self.body.pos = target;
            self.dash = DashState::Idle;
        } else {
            let t = 1.0 - (1.0 - progress.max(0.0)).powi(2);
            self.body.pos = start.lerp(target, t);
        }
    }

    pub fn start_invincibility(&mut self, now: f32, duration: f32) {
        self.invincibility = Invincibility {
            active: true,
            started_at: now,
            duration,
        };
    }

    /// Clear invincibility once its duration has elapsed
    pub fn update_invincibility(&mut self, now: f32) {
        let inv = &mut self.invincibility;
        if inv.active && now - inv.started_at >= inv.duration {
            inv.active = false;
        }
    }

    fn can_fire(&self, now: f32, interval: f32) -> bool {
        self.last_fire_time.is_none_or(|last| now - last >= interval)
    }

    /// Player step: fire, move, dash, dash hits, invincibility expiry
    pub fn update(
        &mut self,
        ctx: &mut SimContext,
        input: &TickInput,
        projectiles: &mut ProjectileSet,
        enemies: &mut EnemyPopulation,
    ) {
        let tuning = ctx.tuning;
        let now = ctx.now;

        // Shooting with the aim stick
        let aim = input.aim_stick;
        let aim_magnitude = aim.length();
        let trigger_ok = !tuning.player.fire_requires_trigger
            || input.trigger > tuning.player.trigger_threshold;
        if aim_magnitude > DEADZONE && trigger_ok && self.can_fire(now, tuning.player.fire_interval) {
            let pos = self.body.pos;
            projectiles.fire(
                Owner::Player,
                pos,
                aim / aim_magnitude,
                tuning.projectile.player_speed,
                tuning.projectile.player_size,
            );
            self.last_fire_time = Some(now);
            ctx.emit(GameEvent::ProjectileFired {
                owner: Owner::Player,
                pos,
            });
        }

        if !self.is_dashing() {
            let movement = input.movement() * self.movement_speed;
            self.update_position(movement.x, movement.y, ctx.field);
        }

        if input.dash && self.begin_dash(input.dash_direction(), now, tuning, ctx.field) {
            self.start_invincibility(now, tuning.player.invincibility_duration);
            if let Some((from, to)) = self.dash_segment() {
                ctx.emit(GameEvent::DashStarted { from, to });
            }
        }

        // The segment is captured before advancing so the final dash tick
        // still sweeps the path
        let segment = self.dash_segment();
        self.advance_dash(now, tuning.dash.duration);
        if let Some((start, target)) = segment {
            resolve_dash_hits(ctx, enemies, start, target);
        }

        self.update_invincibility(now);
    }
}

/// Destroy enemies caught by a dash
///
/// First the blast around the target (inclusive radius), then the swept
/// path for anything the blast missed. The population is topped back up
/// afterwards.
pub fn resolve_dash_hits(ctx: &mut SimContext, enemies: &mut EnemyPopulation, start: Vec2, target: Vec2) -> u32 {
    let blast_radius = ctx.tuning.dash_aoe_radius();
    let path_radius = ctx.tuning.dash.path_radius;

    let hits: Vec<_> = enemies
        .iter()
        .filter_map(|(handle, enemy)| {
            if within_radius(enemy.pos(), target, blast_radius) {
                Some((handle, KillCause::DashBlast))
            } else if distance_to_segment(enemy.pos(), start, target) < path_radius {
                Some((handle, KillCause::DashPath))
            } else {
                None
            }
        })
        .collect();

    let mut killed = 0;
    for (handle, cause) in hits {
        if enemies.kill(handle, ctx, cause) {
            killed += 1;
        }
    }
    if killed > 0 {
        enemies.top_up(ctx);
    }
    killed
}
