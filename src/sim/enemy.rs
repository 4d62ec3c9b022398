//! Homing enemy population
//!
//! Enemies live in a generational arena so a kill recorded earlier in the
//! tick can never hit a replacement that reused the same slot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, Handle};
use super::collision::{heading, within_box};
use super::player::Player;
use super::spawn::{random_edge_point, uniform};
use super::state::{DeathCause, GameEvent, KillCause, SimContext, SpatialEntity};

pub type EnemyHandle = Handle;

/// A homing enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: SpatialEntity,
    /// Displacement per tick, fixed at spawn
    pub speed: f32,
}

impl Enemy {
    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    /// Greedy homing: straight at the target, no steering memory
    pub fn move_towards(&mut self, target: Vec2, field: crate::Playfield) {
        let dir = heading(self.body.pos, target);
        self.body.pos = field.clamp(self.body.pos + dir * self.speed);
    }
}

#[derive(Debug, Clone, Default)]
pub struct EnemyPopulation {
    enemies: Arena<Enemy>,
}

impl EnemyPopulation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn get(&self, handle: EnemyHandle) -> Option<&Enemy> {
        self.enemies.get(handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EnemyHandle, &Enemy)> {
        self.enemies.iter()
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
    }

    /// Place an enemy directly (used by scripted setups)
    pub fn insert(&mut self, enemy: Enemy) -> EnemyHandle {
        self.enemies.insert(enemy)
    }

    /// Spawn one enemy just off a random edge with a time-scaled speed
    pub fn spawn_one(&mut self, ctx: &mut SimContext) -> EnemyHandle {
        let tuning = &ctx.tuning.enemy;
        let size = tuning.size;
        let pos = random_edge_point(ctx.rng, ctx.field, size, tuning.spawn_buffer);
        let (min, max) = ctx.speed_range();
        let speed = uniform(ctx.rng, min, max);
        self.enemies.insert(Enemy {
            body: SpatialEntity::new(pos, size),
            speed,
        })
    }

    /// Spawn until the population reaches the current enemy limit
    pub fn top_up(&mut self, ctx: &mut SimContext) -> u32 {
        let mut spawned = 0;
        while (self.enemies.len() as u32) < ctx.difficulty.enemy_limit {
            self.spawn_one(ctx);
            spawned += 1;
        }
        spawned
    }

    /// Destroy an enemy and credit the kill
    ///
    /// A kill that raises the difficulty level forces one extra spawn right
    /// away. Returns false for a stale handle.
    pub fn kill(&mut self, handle: EnemyHandle, ctx: &mut SimContext, cause: KillCause) -> bool {
        let Some(enemy) = self.enemies.remove(handle) else {
            return false;
        };
        ctx.emit(GameEvent::EnemyKilled {
            pos: enemy.pos(),
            cause,
        });
        if ctx.award(1) {
            self.spawn_one(ctx);
        }
        true
    }

    /// Top up, home every enemy on the player, then resolve contact
    pub fn update(&mut self, ctx: &mut SimContext, player: &Player) {
        self.top_up(ctx);

        let target = player.pos();
        let threshold = ctx.tuning.enemy.contact_threshold;
        let mut touching = Vec::new();
        for (handle, enemy) in self.enemies.iter_mut() {
            enemy.move_towards(target, ctx.field);
            if within_box(target, enemy.pos(), threshold) {
                touching.push(handle);
            }
        }

        if touching.is_empty() {
            return;
        }
        if player.is_invincible() {
            for handle in touching {
                self.kill(handle, ctx, KillCause::Contact);
            }
        } else {
            ctx.end_game(DeathCause::EnemyContact);
        }
    }
}
