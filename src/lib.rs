//! Castle Bullet - top-down arena shooter
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (entities, collisions, difficulty, boss encounter)
//! - `session`: Session lifecycle (start/pause/restart) and frame sink plumbing
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences toggled from input

pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::{FrameSink, Session};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Default frame delta for headless runs (60 Hz)
    pub const DEFAULT_DT: f32 = 1.0 / 60.0;
    /// Default aspect ratio (1920x1080 window)
    pub const DEFAULT_ASPECT: f32 = 1920.0 / 1080.0;

    /// Horizontal inset that keeps sprites fully on screen
    pub const EDGE_MARGIN: f32 = 0.05;
    /// Vertical clamp for on-screen entities
    pub const VERTICAL_LIMIT: f32 = 0.95;
    /// How far past the screen a projectile may travel before despawning
    pub const PROJECTILE_ESCAPE: f32 = 0.1;

    /// Analog deadzone applied to every stick axis
    pub const DEADZONE: f32 = 0.2;
}

/// Screen-space playfield, `x ∈ [-aspect, aspect]`, `y ∈ [-1, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub aspect: f32,
}

impl Playfield {
    pub fn new(aspect: f32) -> Self {
        Self { aspect }
    }

    /// Clamp a position into the on-screen band used by the player and enemies
    #[inline]
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        self.clamp_inset(pos, consts::EDGE_MARGIN)
    }

    /// Clamp with a custom horizontal inset (the boss uses its own size)
    #[inline]
    pub fn clamp_inset(&self, pos: Vec2, x_inset: f32) -> Vec2 {
        let max_x = (self.aspect - x_inset).max(0.0);
        Vec2::new(
            pos.x.clamp(-max_x, max_x),
            pos.y.clamp(-consts::VERTICAL_LIMIT, consts::VERTICAL_LIMIT),
        )
    }

    /// True while `pos` is inside the clamped on-screen band
    pub fn contains(&self, pos: Vec2) -> bool {
        const SLACK: f32 = 1e-5;
        let max_x = self.aspect - consts::EDGE_MARGIN;
        pos.x.abs() <= max_x + SLACK && pos.y.abs() <= consts::VERTICAL_LIMIT + SLACK
    }

    /// True while a projectile at `pos` should stay alive
    pub fn keeps_projectile(&self, pos: Vec2) -> bool {
        let escape = consts::PROJECTILE_ESCAPE;
        pos.x <= self.aspect + escape
            && pos.x >= -self.aspect - escape
            && pos.y <= 1.0 + escape
            && pos.y >= -1.0 - escape
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(consts::DEFAULT_ASPECT)
    }
}

/// Zero out an analog axis inside the deadzone
#[inline]
pub fn apply_deadzone(value: f32) -> f32 {
    if value.abs() < consts::DEADZONE { 0.0 } else { value }
}
