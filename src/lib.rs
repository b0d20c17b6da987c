//! Toast Run - a side-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, scoring)
//! - `session`: Ready/playing/game-over lifecycle around the simulation
//! - `hud`: Read-only stats projection for on-screen display
//! - `audio`: Maps simulation events onto sound cues for an external player
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod hud;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use hud::{HudPublisher, HudStats};
pub use session::{Session, SessionMode};
pub use tuning::Tuning;

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Viewport dimensions (pixels)
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Largest frame delta the host loop should hand to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Player spawn column
    pub const PLAYER_START_X: f32 = 60.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 320.0;
    pub const SHOT_SPEED: f32 = 640.0;
    pub const BASE_MAX_SHOTS: u32 = 2;
    pub const MAX_SHOTS_CAP: u32 = 6;
    pub const SHOT_COOLDOWN_MS: f64 = 250.0;
    pub const INVULNERABILITY_MS: f64 = 1000.0;
    pub const STARTING_LIVES: i32 = 3;
    pub const SHIELD_CAP: u8 = 2;

    /// Ammo capacity grows by one every this many kills
    pub const AMMO_UPGRADE_EVERY: u32 = 15;

    /// Obstacle speed curve (pixels/s)
    pub const ENEMY_BASE_SPEED: f32 = 180.0;
    pub const ENEMY_MAX_SPEED: f32 = 420.0;
    pub const ENEMY_SPEED_STEP: f32 = 15.0;
    /// Per-obstacle speed jitter around the curve
    pub const ENEMY_SPEED_JITTER: i32 = 30;
    pub const ENEMY_MIN_SPEED: f32 = 120.0;

    /// Spawn interval curve (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 1100.0;
    pub const SPAWN_INTERVAL_MIN_MS: f64 = 350.0;
    pub const SPAWN_INTERVAL_STEP_MS: f64 = 80.0;

    /// Combo window after each kill (ms)
    pub const COMBO_WINDOW_MS: f64 = 2400.0;

    /// Power-up drops
    pub const POWERUP_BASE_DROP: f32 = 0.12;
    pub const POWERUP_DROP_PER_TIER: f32 = 0.03;
    pub const POWERUP_MAX_TIERS: u32 = 3;
    pub const MAX_ACTIVE_POWERUPS: usize = 3;
    pub const POWERUP_SIZE: f32 = 28.0;
    pub const POWERUP_MIN_SPEED: i32 = 120;
    pub const POWERUP_MAX_SPEED: i32 = 180;

    /// Boost buff
    pub const BOOST_MULTIPLIER: f32 = 1.35;
    pub const BOOST_DURATION_MS: f64 = 6000.0;

    /// Burst buff
    pub const BURST_EXTRA_SHOTS: u32 = 2;
    pub const BURST_COOLDOWN_MS: f64 = 140.0;
    pub const BURST_DURATION_MS: f64 = 6000.0;
    pub const BURST_SPREAD_SPEED: f32 = 140.0;
    pub const BURST_SPREAD_OFFSET: f32 = 10.0;

    /// Slow buff (applies to obstacles)
    pub const SLOW_MULTIPLIER: f32 = 0.7;
    pub const SLOW_DURATION_MS: f64 = 5200.0;

    /// Splitter children
    pub const SHARD_OFFSET: f32 = 14.0;
    pub const SHARD_SPEED_FACTOR: f32 = 1.2;
}

/// Restrict `value` to `[min, max]`.
///
/// `min <= max` is assumed; when it does not hold the result is `max`
/// rather than a panic (unlike `f32::clamp`).
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Uniform integer in `[min, max]` inclusive
#[inline]
pub fn random_between(rng: &mut impl Rng, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}
