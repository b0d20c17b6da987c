//! Data-driven game balance
//!
//! Every balance number the simulation reads lives here. Defaults match the
//! constants in [`crate::consts`]; JSON overrides may name any subset of
//! fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Balance knobs for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Player movement speed (pixels/s)
    pub player_speed: f32,
    /// Forward shot speed (pixels/s)
    pub shot_speed: f32,

    /// Obstacle speed at score 0 (pixels/s)
    pub enemy_base_speed: f32,
    /// Obstacle speed cap (pixels/s)
    pub enemy_max_speed: f32,
    /// Speed added every 5 points
    pub enemy_speed_step: f32,
    /// Per-obstacle random speed offset, either way (pixels/s)
    pub enemy_speed_jitter: i32,
    /// Floor applied after jitter (pixels/s)
    pub enemy_min_speed: f32,

    /// Spawn interval at score 0 (ms)
    pub spawn_interval_ms: f64,
    /// Spawn interval floor (ms)
    pub spawn_interval_min_ms: f64,
    /// Interval removed every 10 points (ms)
    pub spawn_interval_step_ms: f64,

    pub shot_cooldown_ms: f64,
    pub burst_cooldown_ms: f64,
    pub invulnerability_ms: f64,

    /// Simultaneous shots at the start of a run
    pub base_max_shots: u32,
    /// Upper bound for ammo upgrades
    pub max_shots_cap: u32,
    /// Kills between ammo upgrades
    pub ammo_upgrade_every: u32,

    pub starting_lives: i32,
    pub shield_cap: u8,

    pub combo_window_ms: f64,
    pub powerup_base_drop: f32,
    pub powerup_drop_per_tier: f32,
    /// Combo tiers (4 kills each) that raise the drop chance
    pub powerup_max_tiers: u32,
    /// No drops are rolled while this many power-ups are on screen
    pub max_active_powerups: usize,
    /// Power-up box edge (pixels)
    pub powerup_size: f32,
    pub powerup_min_speed: i32,
    pub powerup_max_speed: i32,

    pub boost_multiplier: f32,
    pub boost_duration_ms: f64,
    pub burst_duration_ms: f64,
    /// Shot capacity added while burst is active
    pub burst_extra_shots: u32,
    /// Vertical speed of the diagonal burst shots (pixels/s)
    pub burst_spread_speed: f32,
    /// Vertical offset of the diagonal burst shots (pixels)
    pub burst_spread_offset: f32,
    pub slow_multiplier: f32,
    pub slow_duration_ms: f64,

    /// Splitter fragments spawn this far above and below the parent
    pub shard_offset: f32,
    pub shard_speed_factor: f32,
}

impl Tuning {
    /// Contract defaults
    pub const DEFAULT: Tuning = Tuning {
        player_speed: PLAYER_SPEED,
        shot_speed: SHOT_SPEED,
        enemy_base_speed: ENEMY_BASE_SPEED,
        enemy_max_speed: ENEMY_MAX_SPEED,
        enemy_speed_step: ENEMY_SPEED_STEP,
        enemy_speed_jitter: ENEMY_SPEED_JITTER,
        enemy_min_speed: ENEMY_MIN_SPEED,
        spawn_interval_ms: SPAWN_INTERVAL_MS,
        spawn_interval_min_ms: SPAWN_INTERVAL_MIN_MS,
        spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
        shot_cooldown_ms: SHOT_COOLDOWN_MS,
        burst_cooldown_ms: BURST_COOLDOWN_MS,
        invulnerability_ms: INVULNERABILITY_MS,
        base_max_shots: BASE_MAX_SHOTS,
        max_shots_cap: MAX_SHOTS_CAP,
        ammo_upgrade_every: AMMO_UPGRADE_EVERY,
        starting_lives: STARTING_LIVES,
        shield_cap: SHIELD_CAP,
        combo_window_ms: COMBO_WINDOW_MS,
        powerup_base_drop: POWERUP_BASE_DROP,
        powerup_drop_per_tier: POWERUP_DROP_PER_TIER,
        powerup_max_tiers: POWERUP_MAX_TIERS,
        max_active_powerups: MAX_ACTIVE_POWERUPS,
        powerup_size: POWERUP_SIZE,
        powerup_min_speed: POWERUP_MIN_SPEED,
        powerup_max_speed: POWERUP_MAX_SPEED,
        boost_multiplier: BOOST_MULTIPLIER,
        boost_duration_ms: BOOST_DURATION_MS,
        burst_duration_ms: BURST_DURATION_MS,
        burst_extra_shots: BURST_EXTRA_SHOTS,
        burst_spread_speed: BURST_SPREAD_SPEED,
        burst_spread_offset: BURST_SPREAD_OFFSET,
        slow_multiplier: SLOW_MULTIPLIER,
        slow_duration_ms: SLOW_DURATION_MS,
        shard_offset: SHARD_OFFSET,
        shard_speed_factor: SHARD_SPEED_FACTOR,
    };

    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        let fail = |reason: &str| {
            Err(GameError::InvalidTuning {
                reason: reason.to_string(),
            })
        };

        if self.spawn_interval_min_ms <= 0.0 {
            return fail("spawn_interval_min_ms must be positive");
        }
        if self.spawn_interval_min_ms > self.spawn_interval_ms {
            return fail("spawn_interval_min_ms exceeds spawn_interval_ms");
        }
        if self.enemy_base_speed > self.enemy_max_speed {
            return fail("enemy_base_speed exceeds enemy_max_speed");
        }
        if self.enemy_speed_jitter < 0 {
            return fail("enemy_speed_jitter must not be negative");
        }
        if self.base_max_shots == 0 || self.base_max_shots > self.max_shots_cap {
            return fail("base_max_shots must be in 1..=max_shots_cap");
        }
        if self.ammo_upgrade_every == 0 {
            return fail("ammo_upgrade_every must be non-zero");
        }
        if self.starting_lives <= 0 {
            return fail("starting_lives must be positive");
        }
        if !(0.0..=1.0).contains(&self.powerup_base_drop) {
            return fail("powerup_base_drop must be a probability");
        }
        if self.powerup_size <= 0.0 {
            return fail("powerup_size must be positive");
        }
        if self.powerup_min_speed > self.powerup_max_speed {
            return fail("powerup_min_speed exceeds powerup_max_speed");
        }
        Ok(())
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::DEFAULT
    }
}
