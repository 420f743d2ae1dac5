use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::debug;

use crate::error::PipelineError;

/// Configuration for the external transcription process.
#[derive(Debug, Clone)]
pub struct WhisperConfig {
    /// Path to the whisper-cli executable (from WHISPER_CLI env var)
    pub binary: PathBuf,
    /// Path to the ggml model file (from WHISPER_MODEL env var)
    pub model: PathBuf,
}

impl WhisperConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self> {
        let binary =
            std::env::var("WHISPER_CLI").context("WHISPER_CLI environment variable not set")?;
        let model =
            std::env::var("WHISPER_MODEL").context("WHISPER_MODEL environment variable not set")?;

        Ok(Self {
            binary: binary.into(),
            model: model.into(),
        })
    }
}

/// The transcription collaborator: an external process that reads a waveform
/// file and writes timestamped text lines to stdout. Constructed once at
/// startup and injected; read-only thereafter.
pub struct WhisperTranscriber {
    config: WhisperConfig,
}

impl WhisperTranscriber {
    pub fn new(config: WhisperConfig) -> Self {
        Self { config }
    }

    /// Transcribe a waveform file, returning the raw stdout text. The caller
    /// blocks until the process exits. A missing executable or a non-zero
    /// exit is terminal for the request; stderr is surfaced for diagnosis.
    pub async fn transcribe(&self, wav: &Path) -> Result<String, PipelineError> {
        debug!(binary = %self.config.binary.display(), wav = %wav.display(), "running transcription");

        let output = Command::new(&self.config.binary)
            .arg("-m")
            .arg(&self.config.model)
            .arg("-f")
            .arg(wav)
            .output()
            .await
            .map_err(|e| {
                PipelineError::Transcription(format!(
                    "failed to run {}: {e}",
                    self.config.binary.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(PipelineError::Transcription(stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
