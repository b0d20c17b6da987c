//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Time comes in as arguments (elapsed seconds, timestamp in ms)
//! - Seeded RNG only, owned by the state
//! - Stable iteration order (insertion order of each collection)
//! - Side effects leave as returned events

pub mod autopilot;
pub mod difficulty;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use difficulty::{enemy_speed, spawn_interval};
pub use rect::{Rect, rects_intersect};
pub use spawn::{
    build_obstacle, choose_obstacle_kind, choose_powerup_kind, powerup_drop_chance, spawn_obstacle,
    spawn_powerup, split_shards,
};
pub use state::{
    Buffs, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Oscillation, Player, PowerUp,
    PowerUpKind, Shot, SpriteSizes,
};
pub use tick::{TickInput, tick};
