//! Player and boss projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boss::BossEncounter;
use super::collision::within_box;
use super::enemy::EnemyPopulation;
use super::player::Player;
use super::state::{DeathCause, KillCause, SimContext, SpatialEntity};

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Boss,
}

/// A projectile in flight along a fixed unit direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: Owner,
    pub body: SpatialEntity,
    pub direction: Vec2,
    /// Displacement per tick
    pub speed: f32,
}

impl Projectile {
    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectileSet {
    projectiles: Vec<Projectile>,
}

impl ProjectileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    /// Launch a projectile. `direction` must already be normalized.
    pub fn fire(&mut self, owner: Owner, pos: Vec2, direction: Vec2, speed: f32, size: f32) {
        self.projectiles.push(Projectile {
            owner,
            body: SpatialEntity::new(pos, size),
            direction,
            speed,
        });
    }

    /// Move every projectile, drop the ones that left the screen, then
    /// resolve hits
    ///
    /// A player shot hits at most one target: the first enemy in its box,
    /// otherwise the boss.
    pub fn update(
        &mut self,
        ctx: &mut SimContext,
        player: &Player,
        enemies: &mut EnemyPopulation,
        boss: &mut BossEncounter,
    ) {
        let tuning = &ctx.tuning.projectile;
        let (enemy_box, boss_box, player_box) = (
            tuning.enemy_hit_threshold,
            tuning.boss_hit_threshold,
            tuning.player_hit_threshold,
        );

        let in_flight = std::mem::take(&mut self.projectiles);
        for mut projectile in in_flight {
            projectile.body.pos += projectile.direction * projectile.speed;
            if !ctx.field.keeps_projectile(projectile.pos()) {
                continue;
            }

            let consumed = match projectile.owner {
                Owner::Player => {
                    let pos = projectile.pos();
                    let target = enemies
                        .iter()
                        .find(|(_, enemy)| within_box(pos, enemy.pos(), enemy_box))
                        .map(|(handle, _)| handle);
                    if let Some(handle) = target {
                        enemies.kill(handle, ctx, KillCause::Projectile)
                    } else if boss
                        .hittable_position()
                        .is_some_and(|boss_pos| within_box(pos, boss_pos, boss_box))
                    {
                        boss.hit(ctx, enemies)
                    } else {
                        false
                    }
                }
                Owner::Boss => {
                    if within_box(projectile.pos(), player.pos(), player_box) {
                        if !player.is_invincible() {
                            ctx.end_game(DeathCause::BossProjectile);
                        }
                        true
                    } else {
                        false
                    }
                }
            };

            if !consumed {
                self.projectiles.push(projectile);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::Enemy;
    use crate::sim::state::{GameEvent, GameState};
    use crate::tuning::Tuning;

    fn enemy_at(pos: Vec2) -> Enemy {
        Enemy {
            body: SpatialEntity::new(pos, 0.1),
            speed: 0.0,
        }
    }

    #[test]
    fn test_projectile_moves_and_despawns_offscreen() {
        let mut state = GameState::new(3, Tuning::default());
        state
            .projectiles
            .fire(Owner::Player, Vec2::new(0.0, 1.09), Vec2::Y, 0.03, 0.02);
        state
            .projectiles
            .fire(Owner::Player, Vec2::new(0.0, 0.5), Vec2::Y, 0.03, 0.02);

        let (mut ctx, systems) = state.split();
        systems
            .projectiles
            .update(&mut ctx, systems.player, systems.enemies, systems.boss);
        assert_eq!(systems.projectiles.len(), 1);
        let survivor = systems.projectiles.iter().next().unwrap();
        assert!((survivor.pos().y - 0.53).abs() < 1e-6);
    }

    #[test]
    fn test_player_shot_hits_one_enemy() {
        let mut state = GameState::new(3, Tuning::default());
        let first = state.enemies.insert(enemy_at(Vec2::new(0.5, 0.0)));
        let second = state.enemies.insert(enemy_at(Vec2::new(0.52, 0.0)));
        state
            .projectiles
            .fire(Owner::Player, Vec2::new(0.47, 0.0), Vec2::X, 0.03, 0.02);

        let (mut ctx, systems) = state.split();
        systems
            .projectiles
            .update(&mut ctx, systems.player, systems.enemies, systems.boss);
        assert!(systems.projectiles.is_empty());
        let alive = [first, second]
            .iter()
            .filter(|h| systems.enemies.get(**h).is_some())
            .count();
        assert_eq!(alive, 1);
        assert_eq!(state.difficulty.score, 1);
    }

    #[test]
    fn test_boss_shot_is_fatal_unless_invincible() {
        let mut state = GameState::new(3, Tuning::default());
        state
            .projectiles
            .fire(Owner::Boss, Vec2::new(0.05, 0.0), -Vec2::X, 0.005, 0.06);
        let (mut ctx, systems) = state.split();
        systems
            .projectiles
            .update(&mut ctx, systems.player, systems.enemies, systems.boss);
        assert!(ctx.game_over);
        assert!(state.projectiles.is_empty());

        let mut state = GameState::new(3, Tuning::default());
        state.player.start_invincibility(0.0, 1.5);
        state
            .projectiles
            .fire(Owner::Boss, Vec2::new(0.05, 0.0), -Vec2::X, 0.005, 0.06);
        let (mut ctx, systems) = state.split();
        systems
            .projectiles
            .update(&mut ctx, systems.player, systems.enemies, systems.boss);
        assert!(!ctx.game_over);
        assert!(state.projectiles.is_empty());
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_boss_shot_ignores_enemies() {
        let mut state = GameState::new(3, Tuning::default());
        let enemy = state.enemies.insert(enemy_at(Vec2::new(0.5, 0.5)));
        state
            .projectiles
            .fire(Owner::Boss, Vec2::new(0.5, 0.5), Vec2::X, 0.005, 0.06);
        let (mut ctx, systems) = state.split();
        systems
            .projectiles
            .update(&mut ctx, systems.player, systems.enemies, systems.boss);
        assert!(systems.enemies.get(enemy).is_some());
        assert_eq!(systems.projectiles.len(), 1);
    }
}
