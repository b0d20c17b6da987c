use std::fmt;

/// Errors surfaced outside the simulation step.
///
/// The step itself is total; these only come from configuration and the
/// host's asset and audio collaborators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// An image or sound failed to load. Play stays disabled until reload.
    AssetLoad { asset: String, reason: String },
    /// Tuning JSON could not be parsed or is internally inconsistent
    InvalidTuning { reason: String },
    /// The host could not play a sound; never fatal
    Playback { reason: String },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetLoad { asset, reason } => {
                write!(f, "failed to load asset {asset}: {reason}")
            }
            Self::InvalidTuning { reason } => write!(f, "invalid tuning: {reason}"),
            Self::Playback { reason } => write!(f, "audio playback failed: {reason}"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidTuning {
            reason: err.to_string(),
        }
    }
}
