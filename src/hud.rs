//! HUD stats projection
//!
//! A small read-only summary of the run for on-screen display. The
//! publisher only hands out a new summary when something changed.

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Values shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HudStats {
    pub score: u32,
    pub lives: i32,
    /// Shots that can still be fired right now
    pub ammo: u32,
    pub combo: u32,
    pub shield: u8,
}

impl HudStats {
    /// Derive the summary at timestamp `now` (ms); burst affects ammo
    pub fn from_state(state: &GameState, now: f64) -> Self {
        let cap = state.effective_max_shots(now) as usize;
        Self {
            score: state.score,
            lives: state.lives,
            ammo: cap.saturating_sub(state.shots.len()) as u32,
            combo: state.combo,
            shield: state.player.shield,
        }
    }
}

/// Change-only publisher
#[derive(Debug, Clone, Default)]
pub struct HudPublisher {
    last: Option<HudStats>,
}

impl HudPublisher {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Returns `stats` if it differs from the previously published value
    pub fn publish(&mut self, stats: HudStats) -> Option<HudStats> {
        if self.last == Some(stats) {
            return None;
        }
        self.last = Some(stats);
        Some(stats)
    }

    /// Last value handed out
    pub fn last(&self) -> Option<HudStats> {
        self.last
    }

    /// Forget the last value so the next publish always goes out
    pub fn reset(&mut self) {
        self.last = None;
    }
}
