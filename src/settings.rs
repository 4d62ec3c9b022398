//! Player preferences
//!
//! Toggled from input during a session. Held in memory only.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Fullscreen window requested
    pub fullscreen: bool,
    /// Master mute (music and effects)
    pub muted: bool,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fullscreen: false,
            muted: false,
            music_volume: 0.8,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Music volume after mute and pause are applied
    pub fn effective_music_volume(&self, paused: bool) -> f32 {
        if self.muted || paused { 0.0 } else { self.music_volume.clamp(0.0, 1.0) }
    }

    /// Effects volume after mute is applied
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume.clamp(0.0, 1.0) }
    }
}
