use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use uuid::Uuid;

use crate::audio::{convert_to_wav, denoise, wav_duration_secs};
use crate::engines::{normalize_diarization, Engines};
use crate::error::PipelineError;
use crate::io::input::parse_transcript;
use crate::io::output::ProcessOutput;
use crate::models::{DiarizationOutcome, EnrichedSegment, FusedSegment, ParsedTranscript};
use crate::stages::enrich::enrich_segment;
use crate::stages::fuse::fuse_segments;

/// Discrete pipeline stages in canonical execution order, for log narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Convert,
    Denoise,
    Transcribe,
    Diarize,
    Fuse,
    Enrich,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Self::Convert => "convert",
            Self::Denoise => "denoise",
            Self::Transcribe => "transcribe",
            Self::Diarize => "diarize",
            Self::Fuse => "fuse",
            Self::Enrich => "enrich",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Knobs for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Path to the ffmpeg executable
    pub ffmpeg: PathBuf,
    /// Whether to run the noise reduction pass before transcription
    pub denoise: bool,
}

impl PipelineConfig {
    /// Defaults from the environment: FFMPEG_BIN or plain `ffmpeg` on PATH,
    /// denoising on.
    pub fn from_env() -> Self {
        Self {
            ffmpeg: std::env::var("FFMPEG_BIN")
                .unwrap_or_else(|_| "ffmpeg".to_string())
                .into(),
            denoise: true,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Process one uploaded audio file end to end.
///
/// Conversion and transcription failures abort the request; diarization
/// failure degrades to the single-speaker fallback. Intermediate audio lives
/// in a per-request temp directory released on every exit path.
pub async fn process_audio(
    input: &Path,
    engines: &Engines,
    config: &PipelineConfig,
) -> Result<ProcessOutput, PipelineError> {
    let request_id = Uuid::new_v4();
    info!(%request_id, input = %input.display(), "processing request");

    let meta = std::fs::metadata(input)
        .map_err(|_| PipelineError::Input(format!("no audio file at {}", input.display())))?;
    if meta.len() == 0 {
        return Err(PipelineError::Input(format!(
            "uploaded file {} is empty",
            input.display()
        )));
    }

    let workdir = tempfile::tempdir()?;

    info!(stage = %Stage::Convert, "converting upload to canonical wav");
    let wav = convert_to_wav(&config.ffmpeg, input, workdir.path()).await?;

    let clean = if config.denoise {
        info!(stage = %Stage::Denoise, "reducing noise");
        denoise(&config.ffmpeg, &wav, workdir.path()).await?
    } else {
        wav
    };
    let duration_secs = wav_duration_secs(&clean)?;

    // Transcription and diarization only share the cleaned waveform; run
    // them concurrently and meet at the fuser.
    info!(stage = %Stage::Transcribe, "running transcription and diarization");
    let (raw_transcript, outcome) = tokio::join!(
        engines.transcriber.transcribe(&clean),
        normalize_diarization(engines.diarizer.as_ref(), &clean),
    );
    let raw_transcript = raw_transcript?;

    let parsed = parse_transcript(&raw_transcript);
    info!(
        segments = parsed.segments.len(),
        skipped = parsed.skipped_lines,
        "transcript parsed"
    );

    info!(stage = %Stage::Fuse, diarized = outcome.is_available(), "fusing segments");
    let fused = assemble_speaker_segments(&parsed, &outcome, duration_secs);

    info!(stage = %Stage::Enrich, segments = fused.len(), "enriching segments");
    let results: Vec<EnrichedSegment> = fused.iter().map(enrich_segment).collect();

    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    info!(%request_id, results = results.len(), "request complete");
    Ok(ProcessOutput {
        message: format!("File '{}' processed successfully.", file_name),
        processed_at: chrono::Utc::now().to_rfc3339(),
        results,
    })
}

/// Turn the diarization outcome into fused segments.
///
/// With a timeline, transcript segments are attributed by overlap. Without
/// one, the whole recording becomes a single synthetic speaker whose text is
/// the full concatenated transcript (continuation lines included), bypassing
/// overlap matching.
pub fn assemble_speaker_segments(
    parsed: &ParsedTranscript,
    outcome: &DiarizationOutcome,
    duration_secs: f64,
) -> Vec<FusedSegment> {
    match outcome {
        DiarizationOutcome::Available(intervals) => fuse_segments(&parsed.segments, intervals),
        DiarizationOutcome::Unavailable { reason } => {
            warn!(%reason, "diarization unavailable, falling back to single speaker");
            vec![FusedSegment::full_recording(
                parsed.full_text.clone(),
                duration_secs,
            )]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SpeakerInterval, TranscriptSegment, FALLBACK_SPEAKER};

    fn parsed_fixture() -> ParsedTranscript {
        ParsedTranscript {
            segments: vec![
                TranscriptSegment {
                    start: 0.0,
                    end: 2.5,
                    text: "Hello world.".to_string(),
                },
                TranscriptSegment {
                    start: 2.5,
                    end: 5.0,
                    text: "This is Paris.".to_string(),
                },
            ],
            full_text: "Hello world. This is Paris. off-script aside".to_string(),
            skipped_lines: 0,
        }
    }

    #[test]
    fn test_fallback_produces_single_full_span_segment() {
        let outcome = DiarizationOutcome::Unavailable {
            reason: "inference raised".to_string(),
        };

        let fused = assemble_speaker_segments(&parsed_fixture(), &outcome, 5.0);

        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].speaker, FALLBACK_SPEAKER);
        assert_eq!(fused[0].start, 0.0);
        assert_eq!(fused[0].end, 5.0);
        // The fallback uses the full accumulator, continuation lines and all.
        assert_eq!(fused[0].text, "Hello world. This is Paris. off-script aside");
    }

    #[test]
    fn test_available_outcome_fuses_by_overlap() {
        let outcome = DiarizationOutcome::Available(vec![
            SpeakerInterval {
                speaker: "Speaker 1".to_string(),
                start: 0.0,
                end: 2.5,
            },
            SpeakerInterval {
                speaker: "Speaker 2".to_string(),
                start: 2.5,
                end: 5.0,
            },
        ]);

        let fused = assemble_speaker_segments(&parsed_fixture(), &outcome, 5.0);

        assert_eq!(fused.len(), 2);
        assert_eq!(fused[0].text, "Hello world.");
        assert_eq!(fused[1].text, "This is Paris.");
    }

    #[test]
    fn test_fallback_end_to_end_enrichment() {
        // Diarization raised: exactly one enriched segment labeled
        // "Speaker 1" spanning the recording, carrying the full text.
        let outcome = DiarizationOutcome::Unavailable {
            reason: "model unavailable".to_string(),
        };
        let fused = assemble_speaker_segments(&parsed_fixture(), &outcome, 7.25);
        let results: Vec<EnrichedSegment> = fused.iter().map(enrich_segment).collect();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].speaker, FALLBACK_SPEAKER);
        assert_eq!(results[0].end, 7.25);
        assert!(results[0].keywords.len() <= crate::stages::enrich::MAX_KEYWORDS);
        assert!(results[0]
            .entities
            .iter()
            .any(|e| e.name == "Paris" && e.kind == "GPE"));
    }

    #[test]
    fn test_stage_labels() {
        assert_eq!(Stage::Convert.label(), "convert");
        assert_eq!(Stage::Enrich.to_string(), "enrich");
    }
}
