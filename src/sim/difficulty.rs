//! Score and time driven difficulty
//!
//! Two independent ramps:
//! - Enemy speed grows linearly with elapsed time since `start_time`
//!   (blue orbs push `start_time` forward, rewinding the ramp).
//! - The enemy cap grows by one for every `score_per_level` points.

use serde::{Deserialize, Serialize};

use crate::tuning::EnemyTuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyModel {
    pub score: u32,
    /// Current enemy cap (never below 1)
    pub enemy_limit: u32,
    /// Active-clock time the speed ramp measures from
    pub start_time: f32,
    /// Highest difficulty level already applied to `enemy_limit`
    last_level: u32,
    /// Green orbs collected this session
    pub relief_count: u32,
}

impl DifficultyModel {
    pub fn new(tuning: &EnemyTuning, now: f32) -> Self {
        Self {
            score: 0,
            enemy_limit: tuning.base_count.max(1),
            start_time: now,
            last_level: 0,
            relief_count: 0,
        }
    }

    /// Seconds on the speed ramp (never negative, even after time credit)
    pub fn elapsed(&self, now: f32) -> f32 {
        (now - self.start_time).max(0.0)
    }

    /// `(min, max)` spawn speed for the current moment
    pub fn speed_range(&self, tuning: &EnemyTuning, now: f32) -> (f32, f32) {
        let elapsed = self.elapsed(now);
        let min = tuning.base_speed_min + tuning.speed_min_rate * elapsed;
        let max = tuning.base_speed_max + tuning.speed_max_rate * elapsed;
        (min.min(max), max)
    }

    pub fn current_max_speed(&self, tuning: &EnemyTuning, now: f32) -> f32 {
        self.speed_range(tuning, now).1
    }

    pub fn add_score(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    pub fn level(&self, tuning: &EnemyTuning) -> u32 {
        self.score / tuning.score_per_level.max(1)
    }

    /// Raise the enemy cap once when the score crosses into a new level
    ///
    /// Returns true when the cap was raised. Calling it again at the same
    /// score is a no-op.
    pub fn check_difficulty_increase(&mut self, tuning: &EnemyTuning) -> bool {
        let level = self.level(tuning);
        if level > self.last_level {
            self.enemy_limit += 1;
            self.last_level = level;
            log::debug!("Difficulty level {} -> enemy limit {}", level, self.enemy_limit);
            true
        } else {
            false
        }
    }

    /// Green orb effect: one fewer enemy, floor of 1
    pub fn relieve(&mut self) {
        if self.enemy_limit > 1 {
            self.enemy_limit -= 1;
        }
        self.relief_count += 1;
    }

    /// Blue orb effect: push the speed ramp's origin forward
    pub fn credit_time(&mut self, seconds: f32) {
        self.start_time += seconds;
    }
}
