//! Game state and core simulation types
//!
//! Everything the renderer draws and the step mutates lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::clamp;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Lives exhausted; the step no longer mutates state
    GameOver,
}

/// Sprite dimensions supplied by the asset loader
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSizes {
    pub player: Vec2,
    pub shot: Vec2,
    /// Unscaled obstacle sprite; kinds apply their own scale
    pub obstacle: Vec2,
}

/// Signals emitted by a step, in the order they happened.
///
/// Consumers (audio, HUD flashes) react to these; the step itself performs
/// no I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// At least one shot left the player this step
    ShotFired,
    /// A shot damaged an obstacle, or a power-up was picked up
    HitRegistered,
    PowerUpCollected(PowerUpKind),
    /// An obstacle touched the player
    PlayerHit { shielded: bool },
    /// Lives ran out on this step
    GameOver { score: u32 },
    /// A fresh run began (background music start)
    SessionStarted,
    /// The run stopped (background music stop)
    SessionEnded,
}

/// The player's craft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Simultaneous shot capacity without buffs
    pub max_shots: u32,
    /// Timestamp (ms) of the most recent volley, `None` before the first
    pub last_shot_at: Option<f64>,
    /// No damage is taken before this timestamp (ms)
    pub invulnerable_until: f64,
    /// Hits that will be absorbed without losing a life
    pub shield: u8,
}

/// A player projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub rect: Rect,
    pub vel: Vec2,
}

impl Shot {
    /// Build a shot leaving the player's nose, shifted vertically by `y_offset`
    pub fn from_player(player: &Player, size: Vec2, vel: Vec2, y_offset: f32) -> Self {
        let nose = Vec2::new(player.rect.right(), player.rect.center().y + y_offset);
        Self {
            rect: Rect::new(nose.x, nose.y - size.y / 2.0, size.x, size.y),
            vel,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.rect.x += self.vel.x * dt;
        self.rect.y += self.vel.y * dt;
    }
}

/// Sinusoidal vertical motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    /// Peak offset from the baseline (pixels)
    pub amplitude: f32,
    /// Angular rate (radians per ms)
    pub frequency: f32,
    pub phase: f32,
}

impl Oscillation {
    /// Offset from baseline at timestamp `now` (ms)
    pub fn offset_at(&self, now: f64) -> f32 {
        let angle = now * self.frequency as f64 + self.phase as f64;
        (angle.sin() as f32) * self.amplitude
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Plain leftward drift
    Drifter,
    /// Smaller, weaves up and down
    Zigzag(Oscillation),
    /// Bigger and slower, takes two hits
    Armored,
    /// Breaks into two shards when destroyed
    Splitter,
    /// Splitter fragment; never spawned directly
    Shard,
}

impl ObstacleKind {
    /// Hit-points a fresh obstacle of this kind starts with
    pub fn initial_hp(&self) -> u8 {
        match self {
            ObstacleKind::Armored => 2,
            _ => 1,
        }
    }

    /// Size relative to the obstacle sprite
    pub fn scale(&self) -> f32 {
        match self {
            ObstacleKind::Drifter => 1.0,
            ObstacleKind::Zigzag(_) => 0.8,
            ObstacleKind::Armored => 1.25,
            ObstacleKind::Splitter => 1.1,
            ObstacleKind::Shard => 0.6,
        }
    }

    /// Speed factor applied after jitter
    pub fn speed_factor(&self) -> f32 {
        match self {
            ObstacleKind::Armored => 0.85,
            _ => 1.0,
        }
    }

    pub fn oscillation(&self) -> Option<&Oscillation> {
        match self {
            ObstacleKind::Zigzag(osc) => Some(osc),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ObstacleKind::Drifter => "drifter",
            ObstacleKind::Zigzag(_) => "zigzag",
            ObstacleKind::Armored => "armored",
            ObstacleKind::Splitter => "splitter",
            ObstacleKind::Shard => "shard",
        }
    }
}

/// A hostile entity drifting toward the left edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    /// Leftward speed (pixels/s)
    pub speed: f32,
    pub kind: ObstacleKind,
    pub hp: u8,
    /// Vertical anchor for oscillating kinds
    pub base_y: f32,
    pub scale: f32,
}

impl Obstacle {
    /// Move left by `speed * speed_mult * dt`; oscillating kinds also
    /// recompute their height from the timestamp
    pub fn advance(&mut self, dt: f32, now: f64, speed_mult: f32) {
        self.rect.x -= self.speed * speed_mult * dt;
        if let Some(osc) = self.kind.oscillation() {
            if osc.amplitude != 0.0 {
                self.rect.y = clamp(self.base_y + osc.offset_at(now), 0.0, self.rect.max_y());
            }
        }
    }

    /// Remove one hit-point; returns true when this hit destroyed it
    pub fn damage(&mut self) -> bool {
        self.hp = self.hp.saturating_sub(1);
        self.hp == 0
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.hp == 0
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Faster movement
    Boost,
    /// Spread shot, faster fire, extra capacity
    Burst,
    /// One absorbed hit
    Shield,
    /// Obstacles slow down
    Slow,
}

/// A pickup drifting toward the left edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub rect: Rect,
    pub speed: f32,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn advance(&mut self, dt: f32) {
        self.rect.x -= self.speed * dt;
    }
}

/// Expiry timestamps (ms) for timed buffs; a buff is active while `now`
/// is before its expiry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Buffs {
    pub boost_until: f64,
    pub burst_until: f64,
    pub slow_until: f64,
}

impl Buffs {
    pub fn boost_active(&self, now: f64) -> bool {
        now < self.boost_until
    }

    pub fn burst_active(&self, now: f64) -> bool {
        now < self.burst_until
    }

    pub fn slow_active(&self, now: f64) -> bool {
        now < self.slow_until
    }

    /// Push an expiry forward; reapplying before expiry extends rather
    /// than restarts
    pub fn extend(expiry: &mut f64, now: f64, duration: f64) {
        *expiry = expiry.max(now) + duration;
    }
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn, kind and drop rolls all draw from this
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    /// Balance the run was started with
    pub tuning: Tuning,
    pub sprites: SpriteSizes,
    pub phase: GamePhase,
    /// Obstacles destroyed
    pub score: u32,
    pub lives: i32,
    /// Timestamp (ms) of the most recent spawn
    pub last_spawn_at: f64,
    /// Score at which max shots next grows
    pub next_upgrade_at: u32,
    /// Consecutive kills within the combo window
    pub combo: u32,
    pub combo_expires_at: f64,
    pub buffs: Buffs,
    pub player: Player,
    /// Active shots (insertion order)
    pub shots: Vec<Shot>,
    /// Active obstacles (insertion order is the collision tie-break)
    pub obstacles: Vec<Obstacle>,
    /// Active power-ups (insertion order)
    pub powerups: Vec<PowerUp>,
}

impl GameState {
    /// Fresh run starting at timestamp `now` (ms)
    pub fn new(sprites: SpriteSizes, tuning: Tuning, seed: u64, now: f64) -> Self {
        let mut rect = Rect::new(crate::consts::PLAYER_START_X, 0.0, sprites.player.x, sprites.player.y);
        rect.y = rect.max_y() / 2.0;
        rect.clamp_to_viewport();

        let player = Player {
            rect,
            max_shots: tuning.base_max_shots,
            last_shot_at: None,
            invulnerable_until: now,
            shield: 0,
        };

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            score: 0,
            lives: tuning.starting_lives,
            last_spawn_at: now,
            next_upgrade_at: tuning.ammo_upgrade_every,
            combo: 0,
            combo_expires_at: 0.0,
            buffs: Buffs::default(),
            player,
            shots: Vec::new(),
            obstacles: Vec::new(),
            powerups: Vec::new(),
            sprites,
            tuning,
        }
    }

    /// Shot capacity including the burst bonus
    pub fn effective_max_shots(&self, now: f64) -> u32 {
        if self.buffs.burst_active(now) {
            self.player.max_shots + self.tuning.burst_extra_shots
        } else {
            self.player.max_shots
        }
    }

    /// Drop combo state after a hit or escape
    pub fn break_combo(&mut self) {
        self.combo = 0;
        self.combo_expires_at = 0.0;
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
