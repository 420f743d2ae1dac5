use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::debug;

use crate::error::PipelineError;

/// Convert an arbitrary uploaded audio file to the canonical waveform
/// format: 16 kHz mono signed 16-bit PCM WAV. The output lands in `out_dir`.
pub async fn convert_to_wav(
    ffmpeg: &Path,
    input: &Path,
    out_dir: &Path,
) -> Result<PathBuf, PipelineError> {
    let out = out_dir.join("canonical.wav");
    debug!(input = %input.display(), out = %out.display(), "converting to wav");

    let output = Command::new(ffmpeg)
        .arg("-y")
        .arg("-i")
        .arg(input)
        .args(["-ar", "16000", "-ac", "1", "-c:a", "pcm_s16le"])
        .arg(&out)
        .output()
        .await
        .map_err(|e| {
            PipelineError::Conversion(format!("failed to launch {}: {e}", ffmpeg.display()))
        })?;

    if !output.status.success() {
        return Err(PipelineError::Conversion(stderr_excerpt(&output.stderr)));
    }
    Ok(out)
}

/// Run the noise reduction pass (ffmpeg's FFT denoiser) over a canonical
/// WAV, writing the cleaned file next to it in `out_dir`.
pub async fn denoise(
    ffmpeg: &Path,
    input: &Path,
    out_dir: &Path,
) -> Result<PathBuf, PipelineError> {
    let out = out_dir.join("denoised.wav");
    debug!(input = %input.display(), out = %out.display(), "reducing noise");

    let output = Command::new(ffmpeg)
        .arg("-y")
        .arg("-i")
        .arg(input)
        .args(["-af", "afftdn"])
        .arg(&out)
        .output()
        .await
        .map_err(|e| {
            PipelineError::Denoise(format!("failed to launch {}: {e}", ffmpeg.display()))
        })?;

    if !output.status.success() {
        return Err(PipelineError::Denoise(stderr_excerpt(&output.stderr)));
    }
    Ok(out)
}

/// ffmpeg writes pages of progress to stderr; keep only the tail, which is
/// where the actual failure reason lands.
fn stderr_excerpt(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let tail = lines.len().saturating_sub(4);
    lines[tail..].join("\n")
}
