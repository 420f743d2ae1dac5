pub mod diarizer;
pub mod whisper;

pub use diarizer::{normalize_diarization, DiarizerClient, DiarizerConfig};
pub use whisper::{WhisperConfig, WhisperTranscriber};

use anyhow::Result;
use tracing::warn;

/// The external model collaborators, constructed once at process start and
/// injected into the pipeline. Never reloaded mid-request.
pub struct Engines {
    pub transcriber: WhisperTranscriber,
    /// `None` when no diarization endpoint is configured; the pipeline then
    /// always takes the single-speaker fallback.
    pub diarizer: Option<DiarizerClient>,
}

impl Engines {
    /// Build all collaborators from the environment. The transcriber is
    /// required; the diarizer is optional.
    pub fn from_env() -> Result<Self> {
        let transcriber = WhisperTranscriber::new(WhisperConfig::from_env()?);
        let diarizer = match DiarizerConfig::from_env() {
            Some(config) => Some(DiarizerClient::new(config)),
            None => {
                warn!("DIARIZER_URL not set; diarization disabled for this process");
                None
            }
        };

        Ok(Self {
            transcriber,
            diarizer,
        })
    }
}
