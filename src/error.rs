use thiserror::Error;

/// Terminal failures of the processing pipeline.
///
/// Only conditions that abort a request live here. The two recoverable
/// conditions are modeled elsewhere: diarization unavailability is a
/// [`crate::models::DiarizationOutcome::Unavailable`] variant, and malformed
/// transcript lines are skipped and counted during parsing.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The uploaded file is missing or empty. Surfaced before any processing.
    #[error("no usable audio input: {0}")]
    Input(String),

    /// The format conversion collaborator failed.
    #[error("audio conversion failed: {0}")]
    Conversion(String),

    /// The noise reduction pass failed.
    #[error("noise reduction failed: {0}")]
    Denoise(String),

    /// The transcription process is missing or exited non-zero. The message
    /// carries the collaborator's stderr for diagnosis.
    #[error("transcription failed: {0}")]
    Transcription(String),

    /// Anything else.
    #[error("failed to process audio: {0}")]
    Unknown(String),
}

impl PipelineError {
    /// Stable category label, used in logs.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Input(_) => "input",
            Self::Conversion(_) => "conversion",
            Self::Denoise(_) => "denoise",
            Self::Transcription(_) => "transcription",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        Self::Unknown(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        assert_eq!(PipelineError::Input("x".into()).category(), "input");
        assert_eq!(
            PipelineError::Transcription("x".into()).category(),
            "transcription"
        );
        assert_eq!(PipelineError::Unknown("x".into()).category(), "unknown");
    }

    #[test]
    fn test_transcription_message_carries_stderr() {
        let err = PipelineError::Transcription("model file not found".into());
        assert_eq!(
            err.to_string(),
            "transcription failed: model file not found"
        );
    }
}
