//! Simulation tick
//!
//! Advances the game state by one frame. Systems run in a fixed order:
//! player, enemies, boss, projectiles, orbs. A fatal collision stops the
//! remaining systems for that tick.

use glam::Vec2;

use super::state::{GamePhase, GameState};
use crate::apply_deadzone;
use crate::consts::DEADZONE;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys / D-pad
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Left stick, `[-1, 1]` per axis
    pub move_stick: Vec2,
    /// Right stick, `[-1, 1]` per axis
    pub aim_stick: Vec2,
    /// Fire trigger, `[0, 1]`
    pub trigger: f32,
    /// One-shot buttons
    pub dash: bool,
    pub pause: bool,
    pub restart: bool,
    pub fullscreen: bool,
    pub mute: bool,
}

impl TickInput {
    fn keys(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.down, self.up))
    }

    /// Movement in units of the player's speed: keys plus the deadzoned stick
    pub fn movement(&self) -> Vec2 {
        let stick = Vec2::new(apply_deadzone(self.move_stick.x), apply_deadzone(self.move_stick.y));
        self.keys() + stick
    }

    /// Stick direction when it is pushed past the deadzone, otherwise the keys
    pub fn dash_direction(&self) -> Vec2 {
        if self.move_stick.length() >= DEADZONE {
            self.move_stick
        } else {
            self.keys()
        }
    }
}

/// Advance the game state by one frame of `dt` seconds
///
/// Restart works from any phase; pause also restarts after a game over.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.restart {
        state.restart();
        return;
    }

    match state.phase {
        GamePhase::GameOver => {
            if input.pause {
                state.restart();
            }
            return;
        }
        GamePhase::Playing if input.pause => {
            state.pause();
            return;
        }
        GamePhase::Paused if input.pause => state.resume(),
        GamePhase::Paused => return,
        GamePhase::Playing => {}
    }

    state.clock.advance(dt);

    let (mut ctx, systems) = state.split();
    systems
        .player
        .update(&mut ctx, input, systems.projectiles, systems.enemies);
    if !ctx.game_over {
        systems.enemies.update(&mut ctx, systems.player);
    }
    if !ctx.game_over {
        systems.boss.update(&mut ctx, systems.player, systems.projectiles);
    }
    if !ctx.game_over {
        systems
            .projectiles
            .update(&mut ctx, systems.player, systems.enemies, systems.boss);
    }
    if !ctx.game_over {
        systems.orbs.update(&mut ctx, systems.player);
    }
    let game_over = ctx.game_over;
    let transition = ctx.area_transition_requested;

    if game_over {
        state.phase = GamePhase::GameOver;
    } else if transition {
        state.transition_to_next_area();
    }
}
