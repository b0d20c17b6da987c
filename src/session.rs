//! Session lifecycle
//!
//! Owns the game state between frames and runs the ready → playing →
//! game over state machine around the simulation step. Input handlers
//! write the snapshot through [`Session::input_mut`]; the renderer reads
//! [`Session::state`] between frames.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::hud::{HudPublisher, HudStats};
use crate::sim::{GameEvent, GameState, SpriteSizes, TickInput, tick};
use crate::tuning::Tuning;

/// Session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    /// Idle, no active simulation
    Ready,
    Playing,
    /// Lives exhausted; waiting for restart or exit
    GameOver,
}

/// What a frame produced for the host
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    /// Events in emission order, for the effects dispatcher
    pub events: Vec<GameEvent>,
    /// New HUD values, present only when something changed
    pub hud: Option<HudStats>,
}

/// A single-player session
#[derive(Debug, Clone)]
pub struct Session {
    mode: SessionMode,
    seed: u64,
    /// Runs started so far; mixed into each run's seed
    runs: u64,
    tuning: Tuning,
    sprites: Option<SpriteSizes>,
    asset_error: Option<GameError>,
    state: Option<GameState>,
    input: TickInput,
    last_score: Option<u32>,
    hud: HudPublisher,
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            mode: SessionMode::Ready,
            seed,
            runs: 0,
            tuning,
            sprites: None,
            asset_error: None,
            state: None,
            input: TickInput::default(),
            last_score: None,
            hud: HudPublisher::new(),
        }
    }

    /// Sprite dimensions arrived from the asset loader
    pub fn set_sprite_sizes(&mut self, sprites: SpriteSizes) {
        self.sprites = Some(sprites);
    }

    /// An asset failed to load; play stays disabled for this session
    pub fn fail_assets(&mut self, err: GameError) {
        log::warn!("Asset loading failed: {}", err);
        self.asset_error = Some(err);
    }

    pub fn asset_error(&self) -> Option<&GameError> {
        self.asset_error.as_ref()
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Current run, if one exists
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Score of the most recently finished run
    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }

    /// Balance applied to every run of this session
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Most recently published HUD values
    pub fn hud(&self) -> Option<HudStats> {
        self.hud.last()
    }

    pub fn input(&self) -> &TickInput {
        &self.input
    }

    /// Input snapshot for the host's keyboard/touch handlers
    pub fn input_mut(&mut self) -> &mut TickInput {
        &mut self.input
    }

    /// Build a fresh run at timestamp `now` (ms).
    ///
    /// Without sprite sizes there is nothing to size entities with and the
    /// call does nothing; returns whether a new state was built.
    pub fn reset(&mut self, now: f64) -> bool {
        let Some(sprites) = self.sprites else {
            log::debug!("Reset ignored: sprite sizes not known yet");
            return false;
        };

        let seed = self.seed.wrapping_add(self.runs);
        self.runs += 1;
        self.state = Some(GameState::new(sprites, self.tuning.clone(), seed, now));
        self.input.clear();
        self.hud.reset();
        true
    }

    /// Start (or restart) a run. Always resets first.
    pub fn start(&mut self, now: f64) -> Result<Vec<GameEvent>, GameError> {
        if let Some(err) = &self.asset_error {
            return Err(err.clone());
        }
        if !self.reset(now) {
            return Ok(Vec::new());
        }

        self.mode = SessionMode::Playing;
        log::info!("Run {} started", self.runs);
        Ok(vec![GameEvent::SessionStarted])
    }

    /// Restart from game over; same as [`Session::start`]
    pub fn restart(&mut self, now: f64) -> Result<Vec<GameEvent>, GameError> {
        self.start(now)
    }

    /// Leave to the ready screen, discarding the run
    pub fn exit(&mut self) -> Vec<GameEvent> {
        let was_playing = self.mode == SessionMode::Playing;
        self.mode = SessionMode::Ready;
        self.state = None;
        self.input.clear();
        log::info!("Session exited");

        if was_playing {
            vec![GameEvent::SessionEnded]
        } else {
            Vec::new()
        }
    }

    /// Advance one animation frame.
    ///
    /// Outside of play this leaves everything untouched and returns an
    /// empty output; the host still renders the current state.
    pub fn frame(&mut self, dt: f32, now: f64) -> FrameOutput {
        if self.mode != SessionMode::Playing {
            return FrameOutput::default();
        }
        let Some(state) = self.state.as_mut() else {
            return FrameOutput::default();
        };

        let mut events = tick(state, &self.input, dt, now);

        if state.is_over() {
            self.mode = SessionMode::GameOver;
            self.last_score = Some(state.score);
            log::info!("Run {} over with score {}", self.runs, state.score);
            events.push(GameEvent::SessionEnded);
        }

        let hud = self.hud.publish(HudStats::from_state(state, now));
        FrameOutput { events, hud }
    }
}
