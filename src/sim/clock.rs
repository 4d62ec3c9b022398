//! Active simulation time
//!
//! Every wall-clock style timer in the simulation (fire cadence, dash
//! cooldown, enemy speed ramp, boss spawn, blue orbs) reads `now()` from this
//! clock. It only advances on unpaused ticks, so pausing never shifts any
//! timer.

use serde::{Deserialize, Serialize};

/// Longest frame delta accepted in a single tick (seconds)
pub const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationClock {
    /// Seconds accumulated over unpaused ticks
    active_time: f32,
    /// Unpaused ticks since the session started
    ticks: u64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick of `dt` seconds (clamped to avoid huge jumps)
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.active_time += dt;
        self.ticks += 1;
    }

    #[inline]
    pub fn now(&self) -> f32 {
        self.active_time
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
