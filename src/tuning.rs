//! Data-driven game balance
//!
//! Every gameplay constant lives here so balance passes can be done from a
//! JSON override file without touching simulation code. Missing fields fall
//! back to the shipped defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DEFAULT_ASPECT;

/// Errors produced while loading a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Player movement, firing, dash and invincibility
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Displacement per tick at full input
    pub movement_speed: f32,
    /// Seconds between player shots
    pub fire_interval: f32,
    /// When set, the trigger must be held past `trigger_threshold` to fire
    pub fire_requires_trigger: bool,
    pub trigger_threshold: f32,
    pub invincibility_duration: f32,
    pub size: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            movement_speed: 0.02,
            fire_interval: 0.1,
            fire_requires_trigger: false,
            trigger_threshold: 0.5,
            invincibility_duration: 1.5,
            size: 0.035,
        }
    }
}

/// Dash ability
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashTuning {
    pub distance: f32,
    /// Seconds from start to target
    pub duration: f32,
    /// Seconds between dash starts
    pub cooldown: f32,
    /// AoE radius around the dash target, as a fraction of the aspect ratio
    pub aoe_aspect_factor: f32,
    /// Kill distance from the dash path
    pub path_radius: f32,
}

impl Default for DashTuning {
    fn default() -> Self {
        Self {
            distance: 0.6,
            duration: 0.15,
            cooldown: 3.0,
            aoe_aspect_factor: 0.20,
            path_radius: 0.1,
        }
    }
}

/// Homing enemy population and difficulty ramp
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub base_count: u32,
    /// Score points per difficulty level
    pub score_per_level: u32,
    pub base_speed_min: f32,
    pub base_speed_max: f32,
    /// Speed floor growth per second of elapsed time
    pub speed_min_rate: f32,
    /// Speed ceiling growth per second of elapsed time
    pub speed_max_rate: f32,
    /// Sprite half-extent used to inset edge spawns
    pub size: f32,
    /// How far off-screen new enemies appear
    pub spawn_buffer: f32,
    pub contact_threshold: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            base_count: 5,
            score_per_level: 8,
            base_speed_min: 0.001,
            base_speed_max: 0.003,
            speed_min_rate: 0.0001,
            speed_max_rate: 0.0002,
            size: 0.1,
            spawn_buffer: 0.1,
            contact_threshold: 0.07,
        }
    }
}

/// Projectile speeds and hit boxes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub player_speed: f32,
    pub boss_speed: f32,
    /// Half-width of the hit box against enemies
    pub enemy_hit_threshold: f32,
    /// Half-width of the hit box against the boss
    pub boss_hit_threshold: f32,
    /// Half-width of a boss projectile's hit box against the player
    pub player_hit_threshold: f32,
    pub player_size: f32,
    pub boss_size: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            player_speed: 0.03,
            boss_speed: 0.005,
            enemy_hit_threshold: 0.07,
            boss_hit_threshold: 0.3,
            player_hit_threshold: 0.1,
            player_size: 0.02,
            boss_size: 0.06,
        }
    }
}

/// Boss encounter and its death sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    /// Seconds into an area before the boss appears
    pub spawn_time: f32,
    pub hits_required: u32,
    /// Fraction of the current max enemy speed
    pub speed_multiplier: f32,
    pub size: f32,
    pub spawn_buffer: f32,
    pub fire_interval: f32,
    pub contact_threshold: f32,
    pub kill_score: u32,
    /// Death sequence phase lengths, in ticks
    pub explosion_ticks: u32,
    pub fade_in_ticks: u32,
    pub hold_ticks: u32,
    pub fade_out_ticks: u32,
    /// Ticks before the end of the explosion phase at which the boss is removed
    pub removal_lead_ticks: u32,
    pub death_scale_end: f32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            spawn_time: 15.0,
            hits_required: 10,
            speed_multiplier: 0.5,
            size: 0.3,
            spawn_buffer: 0.1,
            fire_interval: 0.8,
            contact_threshold: 0.3,
            kill_score: 10,
            explosion_ticks: 180,
            fade_in_ticks: 120,
            hold_ticks: 210,
            fade_out_ticks: 60,
            removal_lead_ticks: 20,
            death_scale_end: 1.3,
        }
    }
}

/// Green and blue power orbs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbTuning {
    /// Green orb appears on every positive multiple of this score
    pub green_score_interval: u32,
    pub green_duration: f32,
    /// Seconds of active time between blue orbs
    pub blue_interval: f32,
    pub blue_duration: f32,
    /// Seconds credited to the difficulty start time on blue pickup
    pub blue_time_credit: f32,
    pub pickup_threshold: f32,
    pub size: f32,
}

impl Default for OrbTuning {
    fn default() -> Self {
        Self {
            green_score_interval: 10,
            green_duration: 2.0,
            blue_interval: 11.0,
            blue_duration: 3.0,
            blue_time_credit: 10.0,
            pickup_threshold: 0.1,
            size: 0.05,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub aspect_ratio: f32,
    pub player: PlayerTuning,
    pub dash: DashTuning,
    pub enemy: EnemyTuning,
    pub projectile: ProjectileTuning,
    pub boss: BossTuning,
    pub orb: OrbTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            aspect_ratio: DEFAULT_ASPECT,
            player: PlayerTuning::default(),
            dash: DashTuning::default(),
            enemy: EnemyTuning::default(),
            projectile: ProjectileTuning::default(),
            boss: BossTuning::default(),
            orb: OrbTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would divide by zero or stall the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.aspect_ratio > 0.1) {
            return invalid("aspect_ratio", "must be greater than 0.1");
        }
        if self.enemy.score_per_level == 0 {
            return invalid("enemy.score_per_level", "must be non-zero");
        }
        if self.enemy.base_count == 0 {
            return invalid("enemy.base_count", "must be non-zero");
        }
        if self.enemy.base_speed_min > self.enemy.base_speed_max {
            return invalid("enemy.base_speed_min", "must not exceed base_speed_max");
        }
        if self.orb.green_score_interval == 0 {
            return invalid("orb.green_score_interval", "must be non-zero");
        }
        if self.boss.hits_required == 0 {
            return invalid("boss.hits_required", "must be non-zero");
        }
        if self.boss.explosion_ticks == 0
            || self.boss.fade_in_ticks == 0
            || self.boss.hold_ticks == 0
            || self.boss.fade_out_ticks == 0
        {
            return invalid("boss.*_ticks", "death sequence phases must be non-zero");
        }
        if !(self.dash.duration > 0.0) {
            return invalid("dash.duration", "must be positive");
        }
        Ok(())
    }

    /// Radius of the dash AoE around its target
    #[inline]
    pub fn dash_aoe_radius(&self) -> f32 {
        self.aspect_ratio * self.dash.aoe_aspect_factor
    }

    /// Total length of the boss death sequence in ticks
    pub fn death_sequence_ticks(&self) -> u32 {
        self.boss.explosion_ticks + self.boss.fade_in_ticks + self.boss.hold_ticks + self.boss.fade_out_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.death_sequence_ticks(), 570);
        assert!((tuning.dash_aoe_radius() - DEFAULT_ASPECT * 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "boss": { "hits_required": 3 }, "aspect_ratio": 1.5 }"#)
            .expect("partial override parses");
        assert_eq!(tuning.boss.hits_required, 3);
        assert_eq!(tuning.boss.fire_interval, 0.8);
        assert_eq!(tuning.aspect_ratio, 1.5);
        assert_eq!(tuning.enemy.base_count, 5);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = Tuning::from_json(r#"{ "orb": { "green_score_interval": 0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "orb.green_score_interval", .. }));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }
}
