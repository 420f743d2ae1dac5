use std::path::Path;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::{DiarizationOutcome, SpeakerInterval};

/// Configuration for the diarization service.
#[derive(Debug, Clone)]
pub struct DiarizerConfig {
    /// Service endpoint (from DIARIZER_URL env var)
    pub endpoint: String,
    /// Optional bearer token (from DIARIZER_TOKEN env var)
    pub auth_token: Option<String>,
}

impl DiarizerConfig {
    /// Read config from the environment. `None` means the collaborator is
    /// not loaded for this process; the pipeline then always takes the
    /// single-speaker fallback.
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var("DIARIZER_URL").ok()?;
        Some(Self {
            endpoint,
            auth_token: std::env::var("DIARIZER_TOKEN").ok(),
        })
    }
}

/// One track from the diarization service's response, in chronological
/// order.
#[derive(Debug, Clone, Deserialize)]
pub struct DiarizerTrack {
    pub speaker: String,
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds
    pub end: f64,
    /// Service-side track identifier, logged only
    #[serde(default)]
    pub track: Option<String>,
}

/// HTTP client for the diarization collaborator. Constructed once at startup
/// and injected; read-only thereafter.
pub struct DiarizerClient {
    client: Client,
    config: DiarizerConfig,
}

impl DiarizerClient {
    pub fn new(config: DiarizerConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Send the waveform to the service and decode its track list.
    pub async fn diarize(&self, wav: &Path) -> Result<Vec<SpeakerInterval>> {
        let bytes = tokio::fs::read(wav)
            .await
            .with_context(|| format!("Failed to read waveform: {:?}", wav))?;

        let mut request = self
            .client
            .post(&self.config.endpoint)
            .header("content-type", "audio/wav")
            .body(bytes);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .context("Failed to reach diarization service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Diarization service error: {} - {}", status, body);
        }

        let tracks: Vec<DiarizerTrack> = response
            .json()
            .await
            .context("Failed to parse diarization response")?;

        Ok(tracks_to_intervals(tracks))
    }
}

/// Convert the service's track iteration into speaker intervals, keeping
/// the service's own ordering.
fn tracks_to_intervals(tracks: Vec<DiarizerTrack>) -> Vec<SpeakerInterval> {
    tracks
        .into_iter()
        .map(|t| {
            if let Some(track) = &t.track {
                debug!(speaker = %t.speaker, track = %track, "diarizer track");
            }
            SpeakerInterval {
                speaker: t.speaker,
                start: t.start,
                end: t.end,
            }
        })
        .collect()
}

/// Ask the collaborator for a timeline and fold absence and failure into an
/// explicit outcome. An unconfigured client and an inference error both
/// degrade to `Unavailable`; neither fails the request.
pub async fn normalize_diarization(
    client: Option<&DiarizerClient>,
    wav: &Path,
) -> DiarizationOutcome {
    match client {
        None => DiarizationOutcome::Unavailable {
            reason: "diarization model not loaded".to_string(),
        },
        Some(client) => match client.diarize(wav).await {
            Ok(intervals) => DiarizationOutcome::Available(intervals),
            Err(err) => {
                warn!(error = %err, "diarization failed");
                DiarizationOutcome::Unavailable {
                    reason: err.to_string(),
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_decode_and_keep_order() {
        let json = r#"[
            {"speaker": "SPEAKER_00", "start": 0.0, "end": 2.5, "track": "A"},
            {"speaker": "SPEAKER_01", "start": 2.5, "end": 5.0}
        ]"#;

        let tracks: Vec<DiarizerTrack> = serde_json::from_str(json).unwrap();
        let intervals = tracks_to_intervals(tracks);

        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].speaker, "SPEAKER_00");
        assert_eq!(intervals[0].start, 0.0);
        assert_eq!(intervals[1].speaker, "SPEAKER_01");
        assert_eq!(intervals[1].end, 5.0);
    }

    #[tokio::test]
    async fn test_no_client_is_unavailable() {
        let outcome = normalize_diarization(None, Path::new("/tmp/audio.wav")).await;
        match outcome {
            DiarizationOutcome::Unavailable { reason } => {
                assert!(reason.contains("not loaded"));
            }
            DiarizationOutcome::Available(_) => panic!("expected unavailable"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_service_is_unavailable() {
        let client = DiarizerClient::new(DiarizerConfig {
            endpoint: "http://127.0.0.1:1/diarize".to_string(),
            auth_token: None,
        });
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("audio.wav");
        std::fs::write(&wav, b"RIFF").unwrap();

        let outcome = normalize_diarization(Some(&client), &wav).await;
        assert!(!outcome.is_available());
    }
}
