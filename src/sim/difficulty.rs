//! Score-driven difficulty curves
//!
//! Both curves are step functions of score; no randomness is involved.

use crate::tuning::Tuning;

impl Tuning {
    /// Time between obstacle spawns (ms) at the given score
    pub fn spawn_interval(&self, score: u32) -> f64 {
        let steps = (score / 10) as f64;
        (self.spawn_interval_ms - steps * self.spawn_interval_step_ms).max(self.spawn_interval_min_ms)
    }

    /// Baseline obstacle speed (pixels/s) at the given score, before jitter
    pub fn enemy_speed(&self, score: u32) -> f32 {
        let steps = (score / 5) as f32;
        (self.enemy_base_speed + steps * self.enemy_speed_step).min(self.enemy_max_speed)
    }
}

/// Spawn interval (ms) under the default tuning
pub fn spawn_interval(score: u32) -> f64 {
    Tuning::DEFAULT.spawn_interval(score)
}

/// Baseline obstacle speed (pixels/s) under the default tuning
pub fn enemy_speed(score: u32) -> f32 {
    Tuning::DEFAULT.enemy_speed(score)
}
