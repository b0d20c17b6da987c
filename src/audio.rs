//! Audio cue dispatch
//!
//! The simulation never plays sound itself. Events it emits are mapped
//! onto cues here and handed to whatever sink the host provides. Playback
//! failures (autoplay policy, missing device) are logged and dropped.

use crate::error::GameError;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired
    Shot,
    /// Obstacle damaged or power-up collected
    Hit,
    /// Run ended
    GameOver,
}

/// Background music control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Music {
    Start,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Effect(SoundEffect),
    Music(Music),
}

impl AudioCue {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ShotFired => Some(Self::Effect(SoundEffect::Shot)),
            GameEvent::HitRegistered => Some(Self::Effect(SoundEffect::Hit)),
            GameEvent::GameOver { .. } => Some(Self::Effect(SoundEffect::GameOver)),
            GameEvent::SessionStarted => Some(Self::Music(Music::Start)),
            GameEvent::SessionEnded => Some(Self::Music(Music::Stop)),
            GameEvent::PowerUpCollected(_) | GameEvent::PlayerHit { .. } => None,
        }
    }
}

/// Host-side audio backend
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect) -> Result<(), GameError>;
    fn music(&mut self, music: Music) -> Result<(), GameError>;
}

/// Fire-and-forget delivery of every event's cue, in order.
///
/// Returns how many cues the sink accepted.
pub fn dispatch(events: &[GameEvent], sink: &mut impl AudioSink) -> usize {
    let mut played = 0;
    for cue in events.iter().filter_map(AudioCue::for_event) {
        let result = match cue {
            AudioCue::Effect(effect) => sink.play(effect),
            AudioCue::Music(music) => sink.music(music),
        };
        match result {
            Ok(()) => played += 1,
            Err(err) => log::warn!("Dropped {:?}: {}", cue, err),
        }
    }
    played
}

/// Sink that discards everything (headless runs, muted hosts)
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _effect: SoundEffect) -> Result<(), GameError> {
        Ok(())
    }

    fn music(&mut self, _music: Music) -> Result<(), GameError> {
        Ok(())
    }
}
