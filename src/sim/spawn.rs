//! Entity factories
//!
//! All randomness is drawn from the caller's RNG so a run replays exactly
//! from its seed.

use glam::Vec2;
use rand::Rng;

use super::rect::Rect;
use super::state::{Obstacle, ObstacleKind, Oscillation, PowerUp, PowerUpKind, SpriteSizes};
use crate::consts::*;
use crate::random_between;
use crate::tuning::Tuning;

/// Weighted kind selection. Later score bands favour the tougher kinds;
/// shards only ever come from splitters.
pub fn choose_obstacle_kind(rng: &mut impl Rng, score: u32) -> ObstacleKind {
    // (drifter, zigzag, armored); splitter takes the rest of 100
    let (drifter, zigzag, armored) = match score {
        0..8 => (65, 20, 10),
        8..18 => (45, 25, 15),
        _ => (30, 30, 20),
    };

    let roll = rng.random_range(0..100);
    if roll < drifter {
        ObstacleKind::Drifter
    } else if roll < drifter + zigzag {
        ObstacleKind::Zigzag(Oscillation {
            amplitude: random_between(rng, 30, 70) as f32,
            frequency: rng.random_range(0.002..=0.004),
            phase: rng.random_range(0.0..std::f32::consts::TAU),
        })
    } else if roll < drifter + zigzag + armored {
        ObstacleKind::Armored
    } else {
        ObstacleKind::Splitter
    }
}

/// Build an obstacle of `kind` at the right viewport edge
pub fn build_obstacle(
    rng: &mut impl Rng,
    tuning: &Tuning,
    sprites: &SpriteSizes,
    kind: ObstacleKind,
    score: u32,
) -> Obstacle {
    let jitter = random_between(rng, -tuning.enemy_speed_jitter, tuning.enemy_speed_jitter) as f32;
    let speed = (tuning.enemy_speed(score) + jitter).max(tuning.enemy_min_speed) * kind.speed_factor();

    let scale = kind.scale();
    let w = sprites.obstacle.x * scale;
    let h = sprites.obstacle.y * scale;
    let max_y = (VIEWPORT_HEIGHT - h).max(0.0) as i32;
    let y = random_between(rng, 0, max_y) as f32;

    Obstacle {
        rect: Rect::new(VIEWPORT_WIDTH, y, w, h),
        speed,
        kind,
        hp: kind.initial_hp(),
        base_y: y,
        scale,
    }
}

/// Pick a kind for the current score and build it
pub fn spawn_obstacle(rng: &mut impl Rng, tuning: &Tuning, sprites: &SpriteSizes, score: u32) -> Obstacle {
    let kind = choose_obstacle_kind(rng, score);
    build_obstacle(rng, tuning, sprites, kind, score)
}

/// The two fragments a destroyed splitter leaves behind
pub fn split_shards(parent: &Obstacle, tuning: &Tuning, sprites: &SpriteSizes) -> [Obstacle; 2] {
    let kind = ObstacleKind::Shard;
    let scale = kind.scale();
    let w = sprites.obstacle.x * scale;
    let h = sprites.obstacle.y * scale;

    [-tuning.shard_offset, tuning.shard_offset].map(|offset| {
        let mut rect = Rect::new(parent.rect.x, parent.rect.y + offset, w, h);
        rect.clamp_to_viewport();
        Obstacle {
            rect,
            speed: parent.speed * tuning.shard_speed_factor,
            kind,
            hp: kind.initial_hp(),
            base_y: rect.y,
            scale,
        }
    })
}

/// Fixed probability bands: boost 30%, burst 30%, slow 20%, shield 20%
pub fn choose_powerup_kind(rng: &mut impl Rng) -> PowerUpKind {
    let roll: f32 = rng.random();
    if roll < 0.3 {
        PowerUpKind::Boost
    } else if roll < 0.6 {
        PowerUpKind::Burst
    } else if roll < 0.8 {
        PowerUpKind::Slow
    } else {
        PowerUpKind::Shield
    }
}

/// Build a power-up centred on `center`, kept fully on screen
pub fn spawn_powerup(rng: &mut impl Rng, tuning: &Tuning, center: Vec2) -> PowerUp {
    let kind = choose_powerup_kind(rng);
    let size = tuning.powerup_size;
    let mut rect = Rect::centered(center, size, size);
    rect.clamp_to_viewport();
    PowerUp {
        rect,
        speed: random_between(rng, tuning.powerup_min_speed, tuning.powerup_max_speed) as f32,
        kind,
    }
}

/// Drop probability for a kill at the given combo count
pub fn powerup_drop_chance(tuning: &Tuning, combo: u32) -> f32 {
    let tier = (combo / 4).min(tuning.powerup_max_tiers);
    tuning.powerup_base_drop + tuning.powerup_drop_per_tier * tier as f32
}
