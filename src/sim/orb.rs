//! Green and blue power orbs
//!
//! Green orbs appear on every multiple of the score interval and lower the
//! enemy cap when collected. Blue orbs appear on a fixed active-time cadence
//! and rewind the enemy speed ramp. At most one orb of each colour exists.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::within_box;
use super::player::Player;
use super::spawn::uniform;
use super::state::{GameEvent, SimContext, SpatialEntity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbColor {
    Green,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orb {
    pub color: OrbColor,
    pub body: SpatialEntity,
    pub spawned_at: f32,
    /// Seconds before the orb disappears uncollected
    pub duration: f32,
}

impl Orb {
    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    pub fn is_expired(&self, now: f32) -> bool {
        now - self.spawned_at >= self.duration
    }
}

#[derive(Debug, Clone)]
pub struct OrbSpawner {
    pub green: Option<Orb>,
    pub blue: Option<Orb>,
    /// Score at which the last green orb spawned
    last_green_score: u32,
    /// Active time of the last blue spawn (or of the area start)
    last_blue_spawn: f32,
}

impl OrbSpawner {
    pub fn new(now: f32) -> Self {
        Self {
            green: None,
            blue: None,
            last_green_score: 0,
            last_blue_spawn: now,
        }
    }

    /// Drop both orbs and restart the blue cadence from `now`
    ///
    /// The green edge trigger keeps its last score so re-entering an area
    /// at the same score does not spawn a duplicate.
    pub fn reset(&mut self, now: f32) {
        self.green = None;
        self.blue = None;
        self.last_blue_spawn = now;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Orb> {
        self.green.iter().chain(self.blue.iter())
    }

    fn slot(&mut self, color: OrbColor) -> &mut Option<Orb> {
        match color {
            OrbColor::Green => &mut self.green,
            OrbColor::Blue => &mut self.blue,
        }
    }

    /// Place an orb of `color`, replacing any existing one
    fn spawn(&mut self, ctx: &mut SimContext, color: OrbColor) {
        let tuning = &ctx.tuning.orb;
        let x_max = 0.9 * ctx.field.aspect - 0.1;
        let x = uniform(ctx.rng, -x_max, x_max);
        let y = uniform(ctx.rng, -0.8, 0.8);
        let pos = Vec2::new(x, y);
        let duration = match color {
            OrbColor::Green => tuning.green_duration,
            OrbColor::Blue => tuning.blue_duration,
        };
        *self.slot(color) = Some(Orb {
            color,
            body: SpatialEntity::new(pos, tuning.size),
            spawned_at: ctx.now,
            duration,
        });
        log::debug!("{:?} orb spawned at ({:.2}, {:.2})", color, x, y);
        ctx.emit(GameEvent::OrbSpawned { color, pos });
    }

    fn collect(&mut self, ctx: &mut SimContext, color: OrbColor) {
        *self.slot(color) = None;
        match color {
            OrbColor::Green => ctx.difficulty.relieve(),
            OrbColor::Blue => ctx.difficulty.credit_time(ctx.tuning.orb.blue_time_credit),
        }
        ctx.emit(GameEvent::OrbCollected { color });
    }

    /// Spawn triggers, expiry, then pickup
    pub fn update(&mut self, ctx: &mut SimContext, player: &Player) {
        let tuning = &ctx.tuning.orb;
        let score = ctx.difficulty.score;

        let on_interval = score.checked_rem(tuning.green_score_interval) == Some(0);
        if score > 0 && on_interval && score != self.last_green_score {
            self.last_green_score = score;
            self.spawn(ctx, OrbColor::Green);
        }
        if ctx.now - self.last_blue_spawn >= tuning.blue_interval {
            self.last_blue_spawn = ctx.now;
            self.spawn(ctx, OrbColor::Blue);
        }

        for color in [OrbColor::Green, OrbColor::Blue] {
            let Some(orb) = *self.slot(color) else {
                continue;
            };
            if orb.is_expired(ctx.now) {
                *self.slot(color) = None;
                ctx.emit(GameEvent::OrbExpired { color });
            } else if within_box(player.pos(), orb.pos(), tuning.pickup_threshold) {
                self.collect(ctx, color);
            }
        }
    }
}
