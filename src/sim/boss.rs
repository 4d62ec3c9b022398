//! Boss encounter: `Absent -> Active -> Dying -> Absent`
//!
//! The death sequence is counted in ticks rather than seconds so its pacing
//! matches the frame rate the effects were authored for.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{heading, within_box};
use super::enemy::EnemyPopulation;
use super::player::Player;
use super::projectile::{Owner, ProjectileSet};
use super::spawn::random_edge_point;
use super::state::{DeathCause, GameEvent, SimContext, SpatialEntity};
use crate::Playfield;
use crate::tuning::BossTuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub body: SpatialEntity,
    pub health: u32,
    /// Fraction of the current max enemy speed
    pub speed_multiplier: f32,
    /// Render scale, grows during the explosion
    pub scale: f32,
}

impl Boss {
    pub fn new(pos: Vec2, tuning: &BossTuning) -> Self {
        Self {
            body: SpatialEntity::new(pos, tuning.size),
            health: tuning.hits_required,
            speed_multiplier: tuning.speed_multiplier,
            scale: 1.0,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    /// Home on `target`, clamped so the whole sprite stays on screen
    pub fn move_towards(&mut self, target: Vec2, speed: f32, field: Playfield) {
        let dir = heading(self.body.pos, target);
        self.body.pos = field.clamp_inset(self.body.pos + dir * speed, self.body.size);
    }

    /// Remove one hit point; returns the remaining health
    pub fn take_damage(&mut self) -> u32 {
        self.health = self.health.saturating_sub(1);
        self.health
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathPhase {
    /// Boss grows, then disappears
    Explosion,
    /// White overlay fades in
    FadeToWhite,
    /// Full white; the next area is entered on the first tick
    WhiteHold,
    /// White overlay fades out
    FadeFromWhite,
}

/// Tick-counted death animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathSequence {
    /// Ticks elapsed since the killing blow
    pub tick: u32,
    /// The boss, until it is removed late in the explosion
    pub boss: Option<Boss>,
    pub final_pos: Vec2,
    pub overlay_opacity: f32,
}

impl DeathSequence {
    pub fn new(boss: Boss) -> Self {
        Self {
            tick: 0,
            final_pos: boss.pos(),
            boss: Some(boss),
            overlay_opacity: 0.0,
        }
    }

    pub fn phase(&self, tuning: &BossTuning) -> DeathPhase {
        let c = self.tick;
        let fade_in_end = tuning.explosion_ticks + tuning.fade_in_ticks;
        if c <= tuning.explosion_ticks {
            DeathPhase::Explosion
        } else if c <= fade_in_end {
            DeathPhase::FadeToWhite
        } else if c <= fade_in_end + tuning.hold_ticks {
            DeathPhase::WhiteHold
        } else {
            DeathPhase::FadeFromWhite
        }
    }

    /// Advance one tick; returns true once the sequence has finished
    pub fn advance(&mut self, ctx: &mut SimContext) -> bool {
        let tuning = &ctx.tuning.boss;
        self.tick += 1;
        let c = self.tick;
        let explosion = tuning.explosion_ticks;
        let fade_in_end = explosion + tuning.fade_in_ticks;
        let hold_end = fade_in_end + tuning.hold_ticks;
        let total = hold_end + tuning.fade_out_ticks;

        match self.phase(tuning) {
            DeathPhase::Explosion => {
                let progress = c as f32 / explosion as f32;
                let scale_end = tuning.death_scale_end;
                let remove_at = explosion.saturating_sub(tuning.removal_lead_ticks);
                self.overlay_opacity = 0.0;
                if let Some(boss) = self.boss.as_mut() {
                    boss.scale = 1.0 + (scale_end - 1.0) * progress;
                }
                if c >= remove_at && self.boss.take().is_some() {
                    ctx.emit(GameEvent::BossRemoved);
                }
            }
            DeathPhase::FadeToWhite => {
                self.overlay_opacity = (c - explosion) as f32 / tuning.fade_in_ticks as f32;
            }
            DeathPhase::WhiteHold => {
                self.overlay_opacity = 1.0;
                if c == fade_in_end + 1 {
                    ctx.request_area_transition();
                }
            }
            DeathPhase::FadeFromWhite => {
                let t = (c - hold_end) as f32 / tuning.fade_out_ticks as f32;
                self.overlay_opacity = (1.0 - t).max(0.0);
            }
        }

        if c >= total {
            self.overlay_opacity = 0.0;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EncounterState {
    Absent,
    Active(Boss),
    Dying(DeathSequence),
}

#[derive(Debug, Clone)]
pub struct BossEncounter {
    pub state: EncounterState,
    last_fire_time: Option<f32>,
    /// Bosses defeated this session
    pub defeated: u32,
}

impl Default for BossEncounter {
    fn default() -> Self {
        Self::new()
    }
}

impl BossEncounter {
    pub fn new() -> Self {
        Self {
            state: EncounterState::Absent,
            last_fire_time: None,
            defeated: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The live boss, if one is fighting or still exploding
    pub fn boss(&self) -> Option<&Boss> {
        match &self.state {
            EncounterState::Active(boss) => Some(boss),
            EncounterState::Dying(seq) => seq.boss.as_ref(),
            EncounterState::Absent => None,
        }
    }

    /// Position of a boss that can still take hits
    pub fn hittable_position(&self) -> Option<Vec2> {
        match &self.state {
            EncounterState::Active(boss) => Some(boss.pos()),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, EncounterState::Active(_))
    }

    pub fn overlay_opacity(&self) -> f32 {
        match &self.state {
            EncounterState::Dying(seq) => seq.overlay_opacity,
            _ => 0.0,
        }
    }

    pub fn death_phase(&self, tuning: &BossTuning) -> Option<DeathPhase> {
        match &self.state {
            EncounterState::Dying(seq) => Some(seq.phase(tuning)),
            _ => None,
        }
    }

    fn spawn(&mut self, ctx: &mut SimContext) {
        let tuning = &ctx.tuning.boss;
        let pos = random_edge_point(ctx.rng, ctx.field, tuning.size, tuning.spawn_buffer);
        self.state = EncounterState::Active(Boss::new(pos, tuning));
        self.last_fire_time = None;
        log::info!("Boss spawned at ({:.2}, {:.2})", pos.x, pos.y);
        ctx.emit(GameEvent::BossSpawned { pos });
    }

    /// Register a player projectile hit
    ///
    /// Returns false when there is no boss to hit, so the projectile flies on.
    /// A killing blow that raises the difficulty level forces one enemy spawn,
    /// like any other kill.
    pub fn hit(&mut self, ctx: &mut SimContext, enemies: &mut EnemyPopulation) -> bool {
        let EncounterState::Active(boss) = &mut self.state else {
            return false;
        };
        let health = boss.take_damage();
        let pos = boss.pos();
        ctx.emit(GameEvent::BossHit { pos, health });
        if health == 0 {
            let state = std::mem::replace(&mut self.state, EncounterState::Absent);
            if let EncounterState::Active(boss) = state {
                self.state = EncounterState::Dying(DeathSequence::new(boss));
            }
            self.defeated += 1;
            log::info!("Boss defeated at ({:.2}, {:.2})", pos.x, pos.y);
            ctx.emit(GameEvent::BossKilled { pos });
            if ctx.award(ctx.tuning.boss.kill_score) {
                enemies.spawn_one(ctx);
            }
        }
        true
    }

    /// Spawn check, then homing, volley and contact, or one death-sequence tick
    ///
    /// A boss acts on the tick it spawns, so it is on screen and firing
    /// straight away.
    pub fn update(&mut self, ctx: &mut SimContext, player: &Player, projectiles: &mut ProjectileSet) {
        let tuning = ctx.tuning;
        if self.state == EncounterState::Absent && ctx.area_elapsed >= tuning.boss.spawn_time {
            self.spawn(ctx);
        }
        match &mut self.state {
            EncounterState::Absent => {}
            EncounterState::Active(boss) => {
                let speed = ctx.difficulty.current_max_speed(&tuning.enemy, ctx.now) * boss.speed_multiplier;
                boss.move_towards(player.pos(), speed, ctx.field);
                let pos = boss.pos();

                let ready = self
                    .last_fire_time
                    .is_none_or(|last| ctx.now - last >= tuning.boss.fire_interval);
                if ready {
                    let dir = heading(pos, player.pos());
                    if dir != Vec2::ZERO {
                        projectiles.fire(
                            Owner::Boss,
                            pos,
                            dir,
                            tuning.projectile.boss_speed,
                            tuning.projectile.boss_size,
                        );
                        ctx.emit(GameEvent::ProjectileFired { owner: Owner::Boss, pos });
                    }
                    self.last_fire_time = Some(ctx.now);
                }

                if within_box(player.pos(), pos, tuning.boss.contact_threshold) && !player.is_invincible() {
                    ctx.end_game(DeathCause::BossContact);
                }
            }
            EncounterState::Dying(seq) => {
                if seq.advance(ctx) {
                    self.state = EncounterState::Absent;
                    self.last_fire_time = None;
                    ctx.emit(GameEvent::BossSequenceEnded);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameState;
    use crate::tuning::Tuning;

    fn with_active_boss(pos: Vec2) -> GameState {
        let mut state = GameState::new(9, Tuning::default());
        state.boss.state = EncounterState::Active(Boss::new(pos, &state.tuning.boss));
        state
    }

    #[test]
    fn test_spawns_after_area_time() {
        let mut state = GameState::new(9, Tuning::default());
        for _ in 0..149 {
            state.clock.advance(0.1);
        }
        let (mut ctx, systems) = state.split();
        systems.boss.update(&mut ctx, systems.player, systems.projectiles);
        assert!(!systems.boss.is_active());

        state.clock.advance(0.1);
        state.clock.advance(0.1);
        let (mut ctx, systems) = state.split();
        systems.boss.update(&mut ctx, systems.player, systems.projectiles);
        let boss = *systems.boss.boss().expect("boss spawned");
        assert_eq!(boss.health, 10);
        // Pulled on screen and firing on the spawn tick
        let clamped = ctx.field.clamp_inset(boss.pos(), boss.body.size);
        assert!(boss.pos().distance(clamped) < 1e-6);
        assert_eq!(systems.projectiles.len(), 1);
        assert!(ctx.events.iter().any(|e| matches!(e, GameEvent::BossSpawned { .. })));
    }

    #[test]
    fn test_exact_hit_count() {
        let mut state = with_active_boss(Vec2::new(1.0, 0.5));
        let (mut ctx, systems) = state.split();
        for _ in 0..9 {
            assert!(systems.boss.hit(&mut ctx, systems.enemies));
        }
        assert!(systems.boss.is_active());
        assert_eq!(systems.boss.boss().map(|b| b.health), Some(1));

        assert!(systems.boss.hit(&mut ctx, systems.enemies));
        assert!(matches!(systems.boss.state, EncounterState::Dying(_)));
        assert_eq!(ctx.difficulty.score, 10);
        // Further shots pass through
        assert!(!systems.boss.hit(&mut ctx, systems.enemies));
        assert_eq!(systems.boss.defeated, 1);
    }

    #[test]
    fn test_kill_that_raises_level_spawns_enemy() {
        let mut state = with_active_boss(Vec2::new(1.0, 0.5));
        let (mut ctx, systems) = state.split();
        for _ in 0..10 {
            systems.boss.hit(&mut ctx, systems.enemies);
        }
        assert_eq!(ctx.difficulty.enemy_limit, 6);
        assert_eq!(systems.enemies.len(), 1);
    }

    #[test]
    fn test_death_sequence_timeline() {
        let mut state = with_active_boss(Vec2::new(1.0, 0.5));
        let total = state.tuning.death_sequence_ticks();
        {
            let (mut ctx, systems) = state.split();
            for _ in 0..10 {
                systems.boss.hit(&mut ctx, systems.enemies);
            }
        }

        let mut transitions = Vec::new();
        let mut removed_at = None;
        for tick in 1..=total {
            let (mut ctx, systems) = state.split();
            systems.boss.update(&mut ctx, systems.player, systems.projectiles);
            if ctx.area_transition_requested {
                transitions.push(tick);
            }
            if removed_at.is_none() && systems.boss.boss().is_none() {
                removed_at = Some(tick);
            }
            if tick < total {
                assert!(matches!(systems.boss.state, EncounterState::Dying(_)), "tick {tick}");
            }
            if tick == 240 {
                assert!((systems.boss.overlay_opacity() - 0.5).abs() < 1e-6);
            }
            if tick == 400 {
                assert_eq!(systems.boss.overlay_opacity(), 1.0);
            }
        }

        assert_eq!(transitions, vec![301]);
        assert_eq!(removed_at, Some(160));
        assert_eq!(state.boss.state, EncounterState::Absent);
        assert_eq!(state.boss.overlay_opacity(), 0.0);
        assert!(state.events.contains(&GameEvent::BossSequenceEnded));
    }

    #[test]
    fn test_explosion_scale_grows() {
        let mut state = with_active_boss(Vec2::new(1.0, 0.5));
        let (mut ctx, systems) = state.split();
        for _ in 0..10 {
            systems.boss.hit(&mut ctx, systems.enemies);
        }
        for _ in 0..90 {
            systems.boss.update(&mut ctx, systems.player, systems.projectiles);
        }
        let scale = systems.boss.boss().map(|b| b.scale).unwrap();
        assert!((scale - 1.15).abs() < 1e-5);
        assert_eq!(systems.boss.death_phase(&ctx.tuning.boss), Some(DeathPhase::Explosion));
    }

    #[test]
    fn test_contact_is_fatal() {
        let mut state = with_active_boss(Vec2::new(0.2, 0.0));
        let (mut ctx, systems) = state.split();
        systems.boss.update(&mut ctx, systems.player, systems.projectiles);
        assert!(ctx.game_over);
    }

    #[test]
    fn test_contact_harmless_when_invincible() {
        let mut state = with_active_boss(Vec2::new(0.2, 0.0));
        state.player.start_invincibility(0.0, 1.5);
        let (mut ctx, systems) = state.split();
        systems.boss.update(&mut ctx, systems.player, systems.projectiles);
        assert!(!ctx.game_over);
    }

    #[test]
    fn test_fires_at_player_on_interval() {
        let mut state = with_active_boss(Vec2::new(1.5, 0.0));
        for _ in 0..10 {
            state.clock.advance(0.1);
            let (mut ctx, systems) = state.split();
            systems.boss.update(&mut ctx, systems.player, systems.projectiles);
        }
        // First volley immediately, the next 0.8 s later
        assert_eq!(state.projectiles.len(), 2);
        let shot = state.projectiles.iter().next().unwrap();
        assert_eq!(shot.owner, Owner::Boss);
        assert!(shot.direction.x < 0.0);
    }
}
