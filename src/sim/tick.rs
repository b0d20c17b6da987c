//! Per-frame simulation step
//!
//! Advances the game state by one variable timestep. Phases run in a fixed
//! order and later phases observe the results of earlier ones. Within a
//! phase entities are visited in insertion order, which decides which
//! obstacle a shot (or the player) touches first.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::spawn::{powerup_drop_chance, spawn_obstacle, spawn_powerup, split_shards};
use super::state::{Buffs, GameEvent, GamePhase, GameState, ObstacleKind, PowerUpKind, Shot};

/// Held controls for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl TickInput {
    /// Unit direction from the four flags; zero when idle or cancelled
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down)).normalize_or_zero()
    }

    /// Release everything
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Advance the game by `dt` seconds ending at timestamp `now` (ms).
///
/// The caller is expected to clamp `dt` to [`MAX_FRAME_DT`]. Returns the
/// events raised during the step, in order. A finished run is left
/// untouched.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, now: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    // 1. Movement
    move_player(state, input, dt, now);

    // 2. Firing
    if input.fire && fire(state, now) {
        events.push(GameEvent::ShotFired);
    }

    // 3. Shots advance and leave through any edge
    for shot in &mut state.shots {
        shot.advance(dt);
    }
    state.shots.retain(|s| !s.rect.is_outside_viewport());

    // 4. Spawning
    if now - state.last_spawn_at >= state.tuning.spawn_interval(state.score) {
        let obstacle = spawn_obstacle(&mut state.rng, &state.tuning, &state.sprites, state.score);
        log::debug!(
            "Spawned {} at y={:.0} speed={:.0}",
            obstacle.kind.name(),
            obstacle.rect.y,
            obstacle.speed
        );
        state.obstacles.push(obstacle);
        state.last_spawn_at = now;
    }

    // 5. Obstacles advance
    let speed_mult = if state.buffs.slow_active(now) {
        state.tuning.slow_multiplier
    } else {
        1.0
    };
    for obstacle in &mut state.obstacles {
        obstacle.advance(dt, now, speed_mult);
    }

    // 6. Escapes cost a life each
    let before = state.obstacles.len();
    state.obstacles.retain(|o| !o.rect.is_past_left_edge());
    let escaped = before - state.obstacles.len();
    if escaped > 0 {
        state.lives -= escaped as i32;
        state.break_combo();
        log::debug!("{} obstacle(s) escaped, lives={}", escaped, state.lives);
    }

    // 7. Power-ups drift left
    for powerup in &mut state.powerups {
        powerup.advance(dt);
    }
    state.powerups.retain(|p| !p.rect.is_past_left_edge());

    // 8. Shots against obstacles: first live obstacle in order takes the hit
    let mut any_hit = false;
    let obstacles = &mut state.obstacles;
    state.shots.retain(|shot| {
        match obstacles
            .iter_mut()
            .find(|o| !o.is_destroyed() && o.rect.intersects(&shot.rect))
        {
            Some(target) => {
                target.damage();
                any_hit = true;
                false
            }
            None => true,
        }
    });
    if any_hit {
        events.push(GameEvent::HitRegistered);
    }

    // 9. Resolve destroyed obstacles
    resolve_destroyed(state, now);

    // 10. Ammo upgrades
    while state.score >= state.next_upgrade_at && state.player.max_shots < state.tuning.max_shots_cap {
        state.player.max_shots += 1;
        state.next_upgrade_at += state.tuning.ammo_upgrade_every;
        log::debug!(
            "Ammo upgrade: max_shots={} next at {}",
            state.player.max_shots,
            state.next_upgrade_at
        );
    }

    // 11. Player against obstacles (one contact per step)
    if now >= state.player.invulnerable_until {
        let player_rect = state.player.rect;
        if let Some(idx) = state.obstacles.iter().position(|o| o.rect.intersects(&player_rect)) {
            state.obstacles.remove(idx);
            let shielded = state.player.shield > 0;
            if shielded {
                state.player.shield -= 1;
            } else {
                state.lives -= 1;
            }
            state.player.invulnerable_until = now + state.tuning.invulnerability_ms;
            state.break_combo();
            events.push(GameEvent::PlayerHit { shielded });
        }
    }

    // 12. Player against power-ups
    let player_rect = state.player.rect;
    let mut collected = Vec::new();
    state.powerups.retain(|p| {
        if p.rect.intersects(&player_rect) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });
    for kind in collected {
        apply_powerup(state, kind, now);
        events.push(GameEvent::HitRegistered);
        events.push(GameEvent::PowerUpCollected(kind));
    }

    // 13. Combo decay
    if state.combo > 0 && now > state.combo_expires_at {
        state.combo = 0;
    }

    // 14. Terminal check
    if state.lives <= 0 {
        state.phase = GamePhase::GameOver;
        log::info!("Game over: score={}", state.score);
        events.push(GameEvent::GameOver { score: state.score });
    }

    events
}

fn move_player(state: &mut GameState, input: &TickInput, dt: f32, now: f64) {
    let dir = input.direction();
    if dir == Vec2::ZERO {
        return;
    }

    let mut speed = state.tuning.player_speed;
    if state.buffs.boost_active(now) {
        speed *= state.tuning.boost_multiplier;
    }

    let rect = &mut state.player.rect;
    rect.x += dir.x * speed * dt;
    rect.y += dir.y * speed * dt;
    rect.clamp_to_viewport();
}

/// Emit a volley if cooldown and capacity allow; returns true when at
/// least one shot left
fn fire(state: &mut GameState, now: f64) -> bool {
    let burst = state.buffs.burst_active(now);
    let cooldown = if burst {
        state.tuning.burst_cooldown_ms
    } else {
        state.tuning.shot_cooldown_ms
    };
    if let Some(last) = state.player.last_shot_at {
        if now - last < cooldown {
            return false;
        }
    }

    let cap = state.effective_max_shots(now) as usize;
    let available = cap.saturating_sub(state.shots.len());
    if available == 0 {
        return false;
    }

    // (vertical speed, vertical offset) per barrel
    let straight = [(0.0, 0.0)];
    let spread = [
        (0.0, 0.0),
        (-state.tuning.burst_spread_speed, -state.tuning.burst_spread_offset),
        (state.tuning.burst_spread_speed, state.tuning.burst_spread_offset),
    ];
    let pattern: &[(f32, f32)] = if burst { &spread } else { &straight };

    let shot_speed = state.tuning.shot_speed;
    for &(vy, offset) in pattern.iter().take(available) {
        let shot = Shot::from_player(
            &state.player,
            state.sprites.shot,
            Vec2::new(shot_speed, vy),
            offset,
        );
        state.shots.push(shot);
    }
    state.player.last_shot_at = Some(now);
    true
}

/// Score, combo, drops and splitting for every obstacle brought to zero hp
/// this step, in collection order
fn resolve_destroyed(state: &mut GameState, now: f64) {
    let mut destroyed = Vec::new();
    state.obstacles.retain(|o| {
        if o.is_destroyed() {
            destroyed.push(o.clone());
            false
        } else {
            true
        }
    });

    for obstacle in destroyed {
        state.score += 1;

        state.combo = if now <= state.combo_expires_at {
            state.combo + 1
        } else {
            1
        };
        state.combo_expires_at = now + state.tuning.combo_window_ms;

        if state.powerups.len() < state.tuning.max_active_powerups {
            let chance = powerup_drop_chance(&state.tuning, state.combo);
            if state.rng.random::<f32>() < chance {
                let powerup = spawn_powerup(&mut state.rng, &state.tuning, obstacle.rect.center());
                log::debug!("Dropped {:?} power-up", powerup.kind);
                state.powerups.push(powerup);
            }
        }

        if obstacle.kind == ObstacleKind::Splitter {
            state.obstacles.extend(split_shards(&obstacle, &state.tuning, &state.sprites));
        }
    }
}

fn apply_powerup(state: &mut GameState, kind: PowerUpKind, now: f64) {
    let tuning = &state.tuning;
    let buffs = &mut state.buffs;
    match kind {
        PowerUpKind::Boost => Buffs::extend(&mut buffs.boost_until, now, tuning.boost_duration_ms),
        PowerUpKind::Burst => Buffs::extend(&mut buffs.burst_until, now, tuning.burst_duration_ms),
        PowerUpKind::Slow => Buffs::extend(&mut buffs.slow_until, now, tuning.slow_duration_ms),
        PowerUpKind::Shield => {
            state.player.shield = state.player.shield.saturating_add(1).min(tuning.shield_cap);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::rect::Rect;
    use crate::sim::state::{Obstacle, PowerUp, SpriteSizes};
    use crate::tuning::Tuning;

    const DT: f32 = 1.0 / 60.0;

    fn sprites() -> SpriteSizes {
        SpriteSizes {
            player: Vec2::new(64.0, 40.0),
            shot: Vec2::new(20.0, 8.0),
            obstacle: Vec2::new(40.0, 40.0),
        }
    }

    /// A state whose spawner will not fire during short tests
    fn quiet_state() -> GameState {
        let mut state = GameState::new(sprites(), Tuning::default(), 42, 0.0);
        state.last_spawn_at = 1.0e9;
        state
    }

    fn obstacle_at(x: f32, y: f32, kind: ObstacleKind) -> Obstacle {
        Obstacle {
            rect: Rect::new(x, y, 40.0, 40.0),
            speed: 0.0,
            kind,
            hp: kind.initial_hp(),
            base_y: y,
            scale: 1.0,
        }
    }

    fn shot_at(x: f32, y: f32) -> Shot {
        Shot {
            rect: Rect::new(x, y, 20.0, 8.0),
            vel: Vec2::ZERO,
        }
    }

    fn fire_input() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_direction_cancels_and_normalizes() {
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(input.direction(), Vec2::ZERO);

        let input = TickInput {
            up: true,
            right: true,
            ..Default::default()
        };
        let dir = input.direction();
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.x > 0.0 && dir.y < 0.0);
    }

    #[test]
    fn test_movement_and_clamp() {
        let mut state = quiet_state();
        let start_y = state.player.rect.y;
        let input = TickInput {
            down: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.05, 10.0);
        assert!((state.player.rect.y - (start_y + 16.0)).abs() < 1e-3);

        let input = TickInput {
            left: true,
            up: true,
            ..Default::default()
        };
        for i in 0..200 {
            tick(&mut state, &input, 0.05, 10.0 + i as f64);
        }
        assert_eq!(state.player.rect.x, 0.0);
        assert_eq!(state.player.rect.y, 0.0);
    }

    #[test]
    fn test_boost_speeds_up_movement() {
        let mut state = quiet_state();
        state.buffs.boost_until = 10_000.0;
        let start_x = state.player.rect.x;
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.05, 100.0);
        assert!((state.player.rect.x - (start_x + 320.0 * 1.35 * 0.05)).abs() < 1e-3);
    }

    #[test]
    fn test_fire_respects_cooldown_and_cap() {
        let mut state = quiet_state();
        let events = tick(&mut state, &fire_input(), 0.0, 0.0);
        assert_eq!(events, vec![GameEvent::ShotFired]);
        assert_eq!(state.shots.len(), 1);

        // Within cooldown
        let events = tick(&mut state, &fire_input(), 0.0, 100.0);
        assert!(events.is_empty());
        assert_eq!(state.shots.len(), 1);

        tick(&mut state, &fire_input(), 0.0, 250.0);
        assert_eq!(state.shots.len(), 2);

        // Cap of 2 reached
        let events = tick(&mut state, &fire_input(), 0.0, 600.0);
        assert!(events.is_empty());
        assert_eq!(state.shots.len(), 2);
    }

    #[test]
    fn test_burst_spread_truncated_to_cap() {
        let mut state = quiet_state();
        state.buffs.burst_until = 10_000.0;

        tick(&mut state, &fire_input(), 0.0, 0.0);
        assert_eq!(state.shots.len(), 3);
        assert_eq!(state.shots[0].vel, Vec2::new(SHOT_SPEED, 0.0));
        assert_eq!(state.shots[1].vel, Vec2::new(SHOT_SPEED, -BURST_SPREAD_SPEED));
        assert_eq!(state.shots[2].vel, Vec2::new(SHOT_SPEED, BURST_SPREAD_SPEED));
        assert!((state.shots[1].rect.y - (state.shots[0].rect.y - 10.0)).abs() < 1e-4);

        // Burst cooldown is 140ms; cap is 2 + 2 = 4 so only one more fits
        tick(&mut state, &fire_input(), 0.0, 140.0);
        assert_eq!(state.shots.len(), 4);
    }

    #[test]
    fn test_shots_pruned_outside_viewport() {
        let mut state = quiet_state();
        state.shots.push(Shot {
            rect: Rect::new(790.0, 100.0, 20.0, 8.0),
            vel: Vec2::new(640.0, 0.0),
        });
        state.shots.push(Shot {
            rect: Rect::new(300.0, 2.0, 20.0, 8.0),
            vel: Vec2::new(640.0, -400.0),
        });
        state.shots.push(Shot {
            rect: Rect::new(300.0, 300.0, 20.0, 8.0),
            vel: Vec2::new(640.0, 0.0),
        });
        tick(&mut state, &TickInput::default(), 0.05, 0.0);
        assert_eq!(state.shots.len(), 1);
        assert!((state.shots[0].rect.x - 332.0).abs() < 1e-3);
    }

    #[test]
    fn test_spawn_on_interval() {
        let mut state = GameState::new(sprites(), Tuning::default(), 42, 0.0);
        tick(&mut state, &TickInput::default(), 0.0, 1099.0);
        assert!(state.obstacles.is_empty());
        tick(&mut state, &TickInput::default(), 0.0, 1100.0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.last_spawn_at, 1100.0);
        tick(&mut state, &TickInput::default(), 0.0, 1500.0);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_escapes_cost_lives_and_combo() {
        let mut state = quiet_state();
        state.combo = 5;
        state.combo_expires_at = 9_000.0;
        state.obstacles.push(obstacle_at(-39.0, 100.0, ObstacleKind::Drifter));
        state.obstacles.push(obstacle_at(-39.5, 300.0, ObstacleKind::Drifter));
        state.obstacles.push(obstacle_at(500.0, 300.0, ObstacleKind::Drifter));
        for o in &mut state.obstacles {
            o.speed = 100.0;
        }
        tick(&mut state, &TickInput::default(), 0.05, 1000.0);
        assert_eq!(state.lives, STARTING_LIVES - 2);
        assert_eq!(state.combo, 0);
        assert_eq!(state.combo_expires_at, 0.0);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_shot_hits_first_obstacle_in_order() {
        let mut state = quiet_state();
        state.obstacles.push(obstacle_at(400.0, 300.0, ObstacleKind::Armored));
        state.obstacles.push(obstacle_at(405.0, 300.0, ObstacleKind::Armored));
        state.shots.push(shot_at(410.0, 310.0));

        let events = tick(&mut state, &TickInput::default(), 0.0, 0.0);
        assert_eq!(events, vec![GameEvent::HitRegistered]);
        assert!(state.shots.is_empty());
        assert_eq!(state.obstacles[0].hp, 1);
        assert_eq!(state.obstacles[1].hp, 2);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_two_shots_finish_armored_in_one_step() {
        let mut state = quiet_state();
        state.obstacles.push(obstacle_at(400.0, 300.0, ObstacleKind::Armored));
        state.obstacles.push(obstacle_at(405.0, 300.0, ObstacleKind::Drifter));
        state.shots.push(shot_at(410.0, 310.0));
        state.shots.push(shot_at(410.0, 310.0));
        state.shots.push(shot_at(410.0, 310.0));

        tick(&mut state, &TickInput::default(), 0.0, 0.0);
        // Third shot skips the destroyed armored and takes the drifter
        assert!(state.shots.is_empty());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_missed_shot_survives() {
        let mut state = quiet_state();
        state.obstacles.push(obstacle_at(400.0, 300.0, ObstacleKind::Drifter));
        state.shots.push(shot_at(100.0, 100.0));
        let events = tick(&mut state, &TickInput::default(), 0.0, 0.0);
        assert!(events.is_empty());
        assert_eq!(state.shots.len(), 1);
    }

    #[test]
    fn test_ammo_upgrade_scenario() {
        let mut state = quiet_state();
        state.score = 14;
        state.obstacles.push(obstacle_at(400.0, 300.0, ObstacleKind::Drifter));
        state.shots.push(shot_at(410.0, 310.0));
        tick(&mut state, &TickInput::default(), 0.0, 0.0);
        assert_eq!(state.score, 15);
        assert_eq!(state.player.max_shots, 3);
        assert_eq!(state.next_upgrade_at, 30);
    }

    #[test]
    fn test_ammo_upgrade_stops_at_cap() {
        let mut state = quiet_state();
        state.score = 500;
        tick(&mut state, &TickInput::default(), 0.0, 0.0);
        assert_eq!(state.player.max_shots, MAX_SHOTS_CAP);
        assert_eq!(state.next_upgrade_at, 15 * 5);
    }

    #[test]
    fn test_splitter_destruction_scenario() {
        let mut state = quiet_state();
        state.obstacles.push(obstacle_at(400.0, 300.0, ObstacleKind::Splitter));
        state.shots.push(shot_at(410.0, 310.0));
        tick(&mut state, &TickInput::default(), 0.0, 0.0);

        assert_eq!(state.score, 1);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[0].rect.y, 286.0);
        assert_eq!(state.obstacles[1].rect.y, 314.0);
        for shard in &state.obstacles {
            assert_eq!(shard.kind, ObstacleKind::Shard);
            assert_eq!(shard.hp, 1);
            assert!(shard.rect.w < 40.0);
        }
    }

    #[test]
    fn test_combo_chain_and_expiry() {
        let mut state = quiet_state();
        state.obstacles.push(obstacle_at(400.0, 100.0, ObstacleKind::Drifter));
        state.shots.push(shot_at(410.0, 110.0));
        tick(&mut state, &TickInput::default(), 0.0, 1000.0);
        assert_eq!(state.combo, 1);
        assert_eq!(state.combo_expires_at, 3400.0);

        state.obstacles.push(obstacle_at(400.0, 100.0, ObstacleKind::Drifter));
        state.shots.push(shot_at(410.0, 110.0));
        tick(&mut state, &TickInput::default(), 0.0, 3400.0);
        assert_eq!(state.combo, 2);
        assert_eq!(state.combo_expires_at, 5800.0);

        tick(&mut state, &TickInput::default(), 0.0, 5800.0);
        assert_eq!(state.combo, 2);
        tick(&mut state, &TickInput::default(), 0.0, 5801.0);
        assert_eq!(state.combo, 0);
    }

    #[test]
    fn test_no_drops_when_three_powerups_active() {
        let mut state = quiet_state();
        state.tuning.powerup_base_drop = 1.0;
        for y in [0.0, 100.0, 200.0] {
            state.powerups.push(PowerUp {
                rect: Rect::new(700.0, y, 28.0, 28.0),
                speed: 0.0,
                kind: PowerUpKind::Boost,
            });
        }
        state.obstacles.push(obstacle_at(400.0, 400.0, ObstacleKind::Drifter));
        state.shots.push(shot_at(410.0, 410.0));
        tick(&mut state, &TickInput::default(), 0.0, 0.0);
        assert_eq!(state.powerups.len(), 3);
    }

    #[test]
    fn test_guaranteed_drop_centered_on_kill() {
        let mut state = quiet_state();
        state.tuning.powerup_base_drop = 1.0;
        state.obstacles.push(obstacle_at(400.0, 400.0, ObstacleKind::Drifter));
        state.shots.push(shot_at(410.0, 410.0));
        tick(&mut state, &TickInput::default(), 0.0, 0.0);
        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.powerups[0].rect.center(), Vec2::new(420.0, 420.0));
    }

    #[test]
    fn test_player_collision_costs_life_and_grants_invulnerability() {
        let mut state = quiet_state();
        state.combo = 3;
        state.combo_expires_at = 5000.0;
        let p = state.player.rect;
        state.obstacles.push(obstacle_at(p.x, p.y, ObstacleKind::Drifter));
        state.obstacles.push(obstacle_at(p.x + 1.0, p.y, ObstacleKind::Drifter));

        let events = tick(&mut state, &TickInput::default(), 0.0, 100.0);
        assert_eq!(events, vec![GameEvent::PlayerHit { shielded: false }]);
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.player.invulnerable_until, 1100.0);
        assert_eq!(state.combo, 0);
        // Only the first overlapping obstacle is consumed
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].rect.x, p.x + 1.0);

        // Still invulnerable
        tick(&mut state, &TickInput::default(), 0.0, 1099.0);
        assert_eq!(state.lives, STARTING_LIVES - 1);
        tick(&mut state, &TickInput::default(), 0.0, 1100.0);
        assert_eq!(state.lives, STARTING_LIVES - 2);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_shield_absorbs_hit() {
        let mut state = quiet_state();
        state.player.shield = 1;
        let p = state.player.rect;
        state.obstacles.push(obstacle_at(p.x, p.y, ObstacleKind::Drifter));
        let events = tick(&mut state, &TickInput::default(), 0.0, 2000.0);
        assert_eq!(events, vec![GameEvent::PlayerHit { shielded: true }]);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.player.shield, 0);
        assert_eq!(state.player.invulnerable_until, 3000.0);
    }

    #[test]
    fn test_powerup_pickup_effects() {
        let mut state = quiet_state();
        let p = state.player.rect;
        for kind in [PowerUpKind::Boost, PowerUpKind::Slow, PowerUpKind::Shield, PowerUpKind::Shield, PowerUpKind::Shield] {
            state.powerups.push(PowerUp {
                rect: Rect::new(p.x, p.y, 28.0, 28.0),
                speed: 0.0,
                kind,
            });
        }
        let events = tick(&mut state, &TickInput::default(), 0.0, 1000.0);
        assert!(state.powerups.is_empty());
        assert_eq!(state.buffs.boost_until, 7000.0);
        assert_eq!(state.buffs.slow_until, 6200.0);
        assert_eq!(state.player.shield, SHIELD_CAP);
        let hits = events.iter().filter(|e| **e == GameEvent::HitRegistered).count();
        assert_eq!(hits, 5);
        assert_eq!(events[1], GameEvent::PowerUpCollected(PowerUpKind::Boost));
    }

    #[test]
    fn test_shield_pickup_saturates_at_u8_max() {
        let mut state = quiet_state();
        state.tuning = Tuning::from_json(r#"{ "shield_cap": 255 }"#).unwrap();
        state.player.shield = u8::MAX;
        let p = state.player.rect;
        state.powerups.push(PowerUp {
            rect: Rect::new(p.x, p.y, 28.0, 28.0),
            speed: 0.0,
            kind: PowerUpKind::Shield,
        });
        let events = tick(&mut state, &TickInput::default(), 0.0, 1000.0);
        assert_eq!(state.player.shield, u8::MAX);
        assert_eq!(events[1], GameEvent::PowerUpCollected(PowerUpKind::Shield));
    }

    #[test]
    fn test_burst_overrides_shape_the_volley() {
        let mut state = quiet_state();
        state.tuning = Tuning::from_json(
            r#"{ "burst_extra_shots": 5, "burst_spread_speed": 90.0, "burst_spread_offset": 4.0 }"#,
        )
        .unwrap();
        state.buffs.burst_until = 10_000.0;
        assert_eq!(state.effective_max_shots(0.0), BASE_MAX_SHOTS + 5);

        tick(&mut state, &fire_input(), 0.0, 0.0);
        assert_eq!(state.shots.len(), 3);
        assert_eq!(state.shots[1].vel, Vec2::new(SHOT_SPEED, -90.0));
        assert!((state.shots[2].rect.y - (state.shots[0].rect.y + 4.0)).abs() < 1e-4);

        // Cap of 7: one more full volley, then a single straight shot
        tick(&mut state, &fire_input(), 0.0, 140.0);
        tick(&mut state, &fire_input(), 0.0, 280.0);
        assert_eq!(state.shots.len(), 7);
    }

    #[test]
    fn test_drop_cap_follows_tuning() {
        let mut state = quiet_state();
        state.tuning.powerup_base_drop = 1.0;
        state.tuning.max_active_powerups = 1;
        state.obstacles.push(obstacle_at(300.0, 100.0, ObstacleKind::Drifter));
        state.obstacles.push(obstacle_at(400.0, 400.0, ObstacleKind::Drifter));
        state.shots.push(shot_at(310.0, 110.0));
        state.shots.push(shot_at(410.0, 410.0));
        tick(&mut state, &TickInput::default(), 0.0, 0.0);
        assert_eq!(state.score, 2);
        assert_eq!(state.powerups.len(), 1);
    }

    #[test]
    fn test_player_speed_read_from_tuning() {
        let mut state = quiet_state();
        state.tuning.player_speed = 100.0;
        let x = state.player.rect.x;
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.5, 0.0);
        assert!((state.player.rect.x - (x + 50.0)).abs() < 1e-3);
    }

    #[test]
    fn test_burst_pickup_extends_from_expiry() {
        let mut state = quiet_state();
        state.buffs.burst_until = 4000.0;
        let p = state.player.rect;
        state.powerups.push(PowerUp {
            rect: Rect::new(p.x, p.y, 28.0, 28.0),
            speed: 0.0,
            kind: PowerUpKind::Burst,
        });
        tick(&mut state, &TickInput::default(), 0.0, 1000.0);
        assert_eq!(state.buffs.burst_until, 10_000.0);
    }

    #[test]
    fn test_powerups_pruned_at_left_edge() {
        let mut state = quiet_state();
        state.powerups.push(PowerUp {
            rect: Rect::new(-27.0, 500.0, 28.0, 28.0),
            speed: 100.0,
            kind: PowerUpKind::Slow,
        });
        tick(&mut state, &TickInput::default(), 0.05, 0.0);
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_game_over_on_last_life() {
        let mut state = quiet_state();
        state.lives = 1;
        state.score = 9;
        let p = state.player.rect;
        state.obstacles.push(obstacle_at(p.x, p.y, ObstacleKind::Drifter));
        let events = tick(&mut state, &TickInput::default(), 0.0, 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 9 }));

        // Finished runs are frozen
        let snapshot = state.player.rect;
        let events = tick(&mut state, &TickInput { right: true, ..Default::default() }, 0.05, 10.0);
        assert!(events.is_empty());
        assert_eq!(state.player.rect, snapshot);
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed produce identical runs
        let mut a = GameState::new(sprites(), Tuning::default(), 99_999, 0.0);
        let mut b = GameState::new(sprites(), Tuning::default(), 99_999, 0.0);
        let mut now = 0.0;
        for i in 0..600 {
            now += 1000.0 / 60.0;
            let input = TickInput {
                up: i % 90 < 30,
                down: i % 90 > 60,
                fire: true,
                ..Default::default()
            };
            let ea = tick(&mut a, &input, DT, now);
            let eb = tick(&mut b, &input, DT, now);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.player, b.player);
    }
}
