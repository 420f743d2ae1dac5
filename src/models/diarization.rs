use serde::{Deserialize, Serialize};

/// Speaker label used when diarization is unavailable and the whole recording
/// is attributed to one synthetic speaker.
pub const FALLBACK_SPEAKER: &str = "Speaker 1";

/// One "who spoke when" interval from the diarization collaborator, in the
/// collaborator's own iteration order (assumed chronological).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerInterval {
    /// Speaker label as reported by the collaborator
    pub speaker: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds (always >= start)
    pub end: f64,
}

/// Outcome of asking the diarization collaborator for a timeline.
///
/// Unavailability is an ordinary value, not an error: the orchestrator
/// matches on it exhaustively and substitutes the single-speaker fallback
/// rather than failing the request.
#[derive(Debug, Clone)]
pub enum DiarizationOutcome {
    /// The collaborator produced a timeline
    Available(Vec<SpeakerInterval>),
    /// The collaborator is not loaded or raised during inference
    Unavailable {
        /// Why the timeline is missing, for the logs only
        reason: String,
    },
}

impl DiarizationOutcome {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_availability() {
        let available = DiarizationOutcome::Available(vec![SpeakerInterval {
            speaker: "SPEAKER_00".to_string(),
            start: 0.0,
            end: 2.0,
        }]);
        assert!(available.is_available());

        let unavailable = DiarizationOutcome::Unavailable {
            reason: "endpoint not configured".to_string(),
        };
        assert!(!unavailable.is_available());
    }
}
