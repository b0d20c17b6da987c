//! Demo controller
//!
//! Derives an input snapshot from the current state so the game can play
//! itself (attract mode, headless soak runs). Pure function of the state;
//! no randomness.

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::PLAYER_START_X;

/// Obstacles closer than this (pixels, ahead of the nose) are dodged
/// rather than lined up on
const DANGER_DISTANCE: f32 = 110.0;
/// Vertical slack before the autopilot bothers to move
const DEADZONE: f32 = 6.0;
/// Horizontal band the autopilot keeps to
const HOME_SLACK: f32 = 30.0;

/// Input the autopilot would hold this frame
pub fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player.rect;
    let center_y = player.center().y;

    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };

    // Drift back toward the home column
    if player.x > PLAYER_START_X + HOME_SLACK {
        input.left = true;
    } else if player.x < PLAYER_START_X - HOME_SLACK {
        input.right = true;
    }

    // Most urgent threat: the nearest obstacle still ahead of the player
    let threat = state
        .obstacles
        .iter()
        .filter(|o| o.rect.right() > player.x)
        .min_by(|a, b| a.rect.x.total_cmp(&b.rect.x));

    let target_y = match threat {
        Some(o)
            if o.rect.x - player.right() < DANGER_DISTANCE
                && overlaps_lane(player.y, player.bottom(), o.rect.y, o.rect.bottom()) =>
        {
            // Too close to shoot down in time: step out of its lane
            let above = o.rect.y - player.h;
            let below = o.rect.bottom();
            let player_is_above = center_y < o.rect.center().y;
            if (player_is_above && above >= 0.0) || below > player.max_y() {
                above + player.h / 2.0 - DEADZONE * 2.0
            } else {
                below + player.h / 2.0 + DEADZONE * 2.0
            }
        }
        Some(o) => o.rect.center().y,
        // Nothing to shoot: go collect a pickup
        None => match state.powerups.iter().min_by(|a, b| a.rect.x.total_cmp(&b.rect.x)) {
            Some(p) => p.rect.center().y,
            None => center_y,
        },
    };

    if target_y < center_y - DEADZONE {
        input.up = true;
    } else if target_y > center_y + DEADZONE {
        input.down = true;
    }

    input
}

fn overlaps_lane(top: f32, bottom: f32, other_top: f32, other_bottom: f32) -> bool {
    top < other_bottom && bottom > other_top
}
